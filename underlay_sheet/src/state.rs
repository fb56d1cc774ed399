// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The public sheet facade: transitions, visibility derivation, persistence.

use crate::anchors::sheet_anchors;
use crate::detent::Detent;
use crate::draggable::{AnchoredDraggable, TransitionId, TransitionState};
use crate::flags::ChangeFlags;
use crate::motion::MotionConfig;
use crate::sizes::LayoutSizes;

/// Configuration fixed for the lifetime of a [`SheetState`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetConfig {
    /// Omit the half-expanded detent from the anchor table.
    pub skip_half_expanded: bool,
    /// When `false`, user gestures, scrim taps, and back presses cannot
    /// reach [`Detent::Hidden`]; only a programmatic
    /// [`SheetState::hide`] may.
    pub is_cancellable: bool,
    /// Keep the sheet's content composed even while fully hidden.
    pub always_compose_content: bool,
    /// Measurements at or below this height are ignored (transient layout
    /// noise while content settles). `0.0` keeps only the mandatory
    /// nonzero-measurement rule.
    pub min_sheet_size: f64,
    /// Gesture settling and animation tuning.
    pub motion: MotionConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            skip_half_expanded: false,
            is_cancellable: true,
            always_compose_content: false,
            min_sheet_size: 0.0,
            motion: MotionConfig::default(),
        }
    }
}

/// Debug snapshot of a [`SheetState`] for inspection.
#[derive(Copy, Clone, Debug)]
pub struct SheetDebugInfo {
    /// Settled detent.
    pub current_value: Detent,
    /// Detent the sheet is at or heading toward.
    pub target_value: Detent,
    /// Live offset from the container top, if established.
    pub offset: Option<f64>,
    /// Measured and derived sizes.
    pub sizes: LayoutSizes,
    /// Whether an animated transition is in flight.
    pub is_animating: bool,
}

/// State of one logical bottom sheet.
///
/// Created once per sheet and owned by the screen that declares it. Layout
/// measurements arrive through [`SheetState::set_container_size`] and
/// [`SheetState::set_sheet_size`]; gestures through [`SheetState::drag_by`]
/// and [`SheetState::settle`]; time through [`SheetState::on_frame`]. All
/// calls happen on the host's single UI thread in arrival order.
///
/// Only the settled detent survives recreation (see [`SheetState::save`]);
/// sizes and offset are rebuilt from fresh measurements.
#[derive(Clone, Debug)]
pub struct SheetState {
    config: SheetConfig,
    sizes: LayoutSizes,
    drag: AnchoredDraggable<Detent>,
}

impl Default for SheetState {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}

impl SheetState {
    /// Creates a hidden sheet with the given configuration.
    #[must_use]
    pub fn new(config: SheetConfig) -> Self {
        Self::restore(Detent::Hidden, config)
    }

    /// Restores a sheet at a persisted detent.
    ///
    /// The counterpart of [`SheetState::save`]: everything except the
    /// settled detent starts fresh.
    #[must_use]
    pub fn restore(detent: Detent, config: SheetConfig) -> Self {
        let detent = if config.skip_half_expanded && detent == Detent::HalfExpanded {
            Detent::Expanded
        } else {
            detent
        };
        Self {
            config,
            sizes: LayoutSizes::default(),
            drag: AnchoredDraggable::new(detent, config.motion),
        }
    }

    /// The value to persist across host recreation.
    #[must_use]
    pub fn save(&self) -> Detent {
        self.current_value()
    }

    /// This sheet's configuration.
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Measured and derived sizes.
    #[must_use]
    pub fn sizes(&self) -> LayoutSizes {
        self.sizes
    }

    /// The settled detent.
    #[must_use]
    pub fn current_value(&self) -> Detent {
        self.drag.current_value()
    }

    /// The detent the sheet is at or heading toward.
    #[must_use]
    pub fn target_value(&self) -> Detent {
        self.drag.target_value()
    }

    /// `true` while the settled detent is not [`Detent::Hidden`].
    ///
    /// Flips atomically with the detent; pixels may still be animating. Use
    /// [`SheetState::is_visible_real`] to gate work on what is actually on
    /// screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current_value() != Detent::Hidden
    }

    /// `true` while any sheet pixels are on screen.
    ///
    /// Distinct from [`SheetState::is_visible`]: a transition can be
    /// requested before layout has measured a nonzero size, and during the
    /// final frames of a hide the detent has flipped while pixels remain.
    #[must_use]
    pub fn is_visible_real(&self) -> bool {
        self.sizes.displayed_sheet_size > 0.0
    }

    /// `true` when settled at [`Detent::Expanded`].
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.current_value() == Detent::Expanded
    }

    /// `true` when settled at [`Detent::HalfExpanded`].
    #[must_use]
    pub fn is_half_expanded(&self) -> bool {
        self.current_value() == Detent::HalfExpanded
    }

    /// `true` when settled at [`Detent::Hidden`].
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.current_value() == Detent::Hidden
    }

    /// `displayed_sheet_size / sheet_size`, or `0.0` while unmeasured.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.sizes.progress
    }

    /// Whether the scrim behind the sheet should be shown.
    #[must_use]
    pub fn scrim_visible(&self) -> bool {
        self.target_value() != Detent::Hidden && self.sizes.sheet_size > 0.0
    }

    /// Whether an animated transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.drag.is_animating()
    }

    /// Status of a previously requested transition.
    #[must_use]
    pub fn transition_state(&self, id: TransitionId) -> TransitionState {
        self.drag.transition_state(id)
    }

    /// Animates to the half-expanded detent if available, else to expanded.
    pub fn show(&mut self, now: f64) -> Option<TransitionId> {
        let target = if self.config.skip_half_expanded {
            Detent::Expanded
        } else {
            Detent::HalfExpanded
        };
        self.request(target, now)
    }

    /// Animates to [`Detent::Expanded`].
    pub fn expand(&mut self, now: f64) -> Option<TransitionId> {
        self.request(Detent::Expanded, now)
    }

    /// Animates to [`Detent::HalfExpanded`]; a no-op when half-expansion is
    /// skipped.
    pub fn half_expand(&mut self, now: f64) -> Option<TransitionId> {
        if self.config.skip_half_expanded {
            return None;
        }
        self.request(Detent::HalfExpanded, now)
    }

    /// Animates to [`Detent::Hidden`]. Always permitted, regardless of
    /// cancellability.
    pub fn hide(&mut self, now: f64) -> Option<TransitionId> {
        self.request(Detent::Hidden, now)
    }

    /// A tap on the scrim: hides the sheet when cancellable.
    pub fn on_scrim_tap(&mut self, now: f64) -> Option<TransitionId> {
        if !self.config.is_cancellable {
            return None;
        }
        self.hide(now)
    }

    /// Reports a new container (viewport) height.
    pub fn set_container_size(&mut self, size: f64) -> ChangeFlags {
        if self.sizes.container_size == size {
            return ChangeFlags::empty();
        }
        self.sizes.container_size = size;
        ChangeFlags::SIZES | self.update_anchors()
    }

    /// Reports a new measured sheet content height.
    ///
    /// Measurements at or below the configured minimum are ignored; the
    /// sheet stays "not yet displayable" until real content arrives.
    pub fn set_sheet_size(&mut self, size: f64) -> ChangeFlags {
        if size <= self.config.min_sheet_size || self.sizes.sheet_size == size {
            return ChangeFlags::empty();
        }
        self.sizes.sheet_size = size;
        ChangeFlags::SIZES | self.update_anchors()
    }

    /// Recomputes the anchor table from the current sizes.
    ///
    /// Idempotent; uses the current target detent as the continuity anchor,
    /// so an in-flight transition or gesture is preserved rather than
    /// restarted.
    pub fn update_anchors(&mut self) -> ChangeFlags {
        let table = sheet_anchors(&self.sizes, self.config.skip_half_expanded);
        let flags = self.drag.update_anchors(table, self.drag.target_value());
        self.refresh_derived();
        flags
    }

    /// The live offset for positioning the sheet, refreshing the derived
    /// size fields as a side effect.
    ///
    /// Never fails: before anchors exist this returns `0.0`.
    pub fn require_offset(&mut self) -> f64 {
        let offset = self.drag.require_offset();
        self.refresh_derived();
        offset
    }

    /// The live offset without the refresh side effect.
    #[must_use]
    pub fn offset(&self) -> Option<f64> {
        self.drag.offset()
    }

    /// The pixel offset of a detent's anchor, if it exists in the current
    /// table.
    #[must_use]
    pub fn anchor_of(&self, detent: Detent) -> Option<f64> {
        self.drag.anchors().offset_of(detent)
    }

    /// Applies a raw drag delta, returning the consumed portion.
    ///
    /// Always produces visual feedback (even when not cancellable); the
    /// cancellability policy is enforced at settle time.
    pub fn drag_by(&mut self, delta: f64) -> f64 {
        let consumed = self.drag.dispatch_raw_delta(delta);
        self.refresh_derived();
        consumed
    }

    /// Settles a released gesture.
    ///
    /// When the sheet is not cancellable the hidden detent is rejected and
    /// the sheet returns to the nearest allowed anchor instead.
    pub fn settle(&mut self, velocity: f64, now: f64) -> Option<TransitionId> {
        let cancellable = self.config.is_cancellable;
        self.drag
            .settle(velocity, now, |detent| cancellable || detent != Detent::Hidden)
    }

    /// Advances in-flight motion and refreshes the derived sizes.
    pub fn on_frame(&mut self, now: f64) -> ChangeFlags {
        let flags = self.drag.tick(now);
        if flags.contains(ChangeFlags::OFFSET) {
            self.refresh_derived();
        }
        flags
    }

    /// Cancels any in-flight transition without moving the sheet.
    ///
    /// Host teardown must call this before releasing the sheet so no
    /// dangling animation mutates a disposed overlay entry.
    pub fn cancel_motion(&mut self) {
        self.drag.cancel_motion();
    }

    /// Snapshot for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> SheetDebugInfo {
        SheetDebugInfo {
            current_value: self.current_value(),
            target_value: self.target_value(),
            offset: self.drag.offset(),
            sizes: self.sizes,
            is_animating: self.drag.is_animating(),
        }
    }

    fn request(&mut self, target: Detent, now: f64) -> Option<TransitionId> {
        let id = self.drag.animate_to(target, now);
        self.refresh_derived();
        id
    }

    fn refresh_derived(&mut self) {
        self.sizes.refresh(self.drag.require_offset());
    }
}
