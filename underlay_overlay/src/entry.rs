// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry types: what a screen registers and what a renderer reads back.

use peniko::Color;
use underlay_sheet::SheetState;

/// Identity of a registered sheet within one [`OverlayManager`].
///
/// Ids are never reused by a manager, so a stale handle held across a
/// deregistration simply stops resolving.
///
/// [`OverlayManager`]: crate::OverlayManager
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SheetId(pub(crate) u64);

/// One sheet as registered by its owning screen.
///
/// The manager owns the entry for as long as it is registered; the screen
/// reaches the state back through [`OverlayManager::sheet_mut`].
///
/// [`OverlayManager::sheet_mut`]: crate::OverlayManager::sheet_mut
#[derive(Clone, Debug)]
pub struct SheetEntry<C> {
    /// The sheet's state machine.
    pub state: SheetState,
    /// Fully-opaque-at-peak scrim color; the manager animates its alpha.
    pub scrim_color: Color,
    /// Whether a back press may dismiss this sheet.
    pub close_on_back: bool,
    /// Host-defined content payload (a widget id, a closure, a scene).
    pub content: C,
}

impl<C> SheetEntry<C> {
    /// Creates an entry with the default scrim and back-press handling on.
    pub fn new(state: SheetState, content: C) -> Self {
        Self {
            state,
            scrim_color: Color::from_rgba8(0, 0, 0, 153),
            close_on_back: true,
            content,
        }
    }

    /// Replaces the scrim color.
    #[must_use]
    pub fn with_scrim_color(mut self, color: Color) -> Self {
        self.scrim_color = color;
        self
    }

    /// Sets whether a back press may dismiss this sheet.
    #[must_use]
    pub fn with_close_on_back(mut self, close_on_back: bool) -> Self {
        self.close_on_back = close_on_back;
        self
    }
}

/// Per-sheet data a renderer needs for one frame, in stacking order.
#[derive(Debug)]
pub struct SheetRender<'a, C> {
    /// Identity of the rendered sheet.
    pub id: SheetId,
    /// Pixel offset of the sheet's top edge from the container top. While
    /// unmeasured this is the container height, i.e. fully offscreen.
    pub offset: f64,
    /// Current scrim opacity in `[0, 1]`.
    pub scrim_alpha: f64,
    /// Whether the sheet's content should be composed this frame.
    pub content_mounted: bool,
    /// The registered entry, content included.
    pub entry: &'a SheetEntry<C>,
}

impl<C> SheetRender<'_, C> {
    /// The scrim color with the animated alpha applied.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "alpha is in [0, 1]; f32 is plenty for a color channel"
    )]
    pub fn scrim(&self) -> Color {
        self.entry.scrim_color.multiply_alpha(self.scrim_alpha as f32)
    }
}
