// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detents: the discrete resting positions of a sheet.

/// A named resting position for a draggable sheet.
///
/// Each detent carries a fraction of the draggable space (the sheet's
/// height, capped at the container height) that is exposed when settled
/// there. The set is fixed; hosts that need arbitrary detents can drive
/// [`crate::AnchoredDraggable`] directly with their own value type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Detent {
    /// Fully off-screen. The anchor sits at the bottom edge of the container.
    Hidden,
    /// Half of the sheet is exposed.
    HalfExpanded,
    /// The whole sheet is exposed (capped at the container height).
    Expanded,
}

impl Detent {
    /// The fraction of the draggable space this detent exposes, in `[0, 1]`.
    #[must_use]
    pub fn draggable_space_fraction(self) -> f64 {
        match self {
            Self::Hidden => 0.0,
            Self::HalfExpanded => 0.5,
            Self::Expanded => 1.0,
        }
    }
}
