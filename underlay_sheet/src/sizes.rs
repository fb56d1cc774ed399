// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measured layout sizes and the visibility quantities derived from them.

/// Measured sizes of the sheet and its container, in logical pixels.
///
/// `container_size` and `sheet_size` arrive from the host's layout pass;
/// `displayed_sheet_size` and `progress` are derived from the current sheet
/// offset and are refreshed by [`crate::SheetState`] whenever the offset or a
/// measurement changes.
///
/// Before the first measurement both sizes are `0.0` and `progress` is `0.0`.
/// Once `sheet_size > 0.0`, `displayed_sheet_size` stays within
/// `[0, sheet_size]`. Nothing here is persisted; sizes are rebuilt from fresh
/// measurements after host recreation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutSizes {
    /// Height of the overlay viewport.
    pub container_size: f64,
    /// Measured height of the sheet content.
    pub sheet_size: f64,
    /// How much of the sheet is currently visible on screen.
    pub displayed_sheet_size: f64,
    /// `displayed_sheet_size / sheet_size`, or `0.0` while unmeasured.
    pub progress: f64,
}

impl LayoutSizes {
    /// Recomputes the derived fields from the sheet's current offset.
    ///
    /// `offset` is measured from the top of the container, so the visible
    /// portion of the sheet is `container_size - offset`, clamped into
    /// `[0, sheet_size]`.
    pub(crate) fn refresh(&mut self, offset: f64) {
        if self.sheet_size <= 0.0 {
            self.displayed_sheet_size = 0.0;
            self.progress = 0.0;
            return;
        }
        self.displayed_sheet_size = (self.container_size - offset).clamp(0.0, self.sheet_size);
        self.progress = self.displayed_sheet_size / self.sheet_size;
    }
}
