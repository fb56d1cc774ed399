// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor tables: detent → pixel offset, recomputed from measured sizes.

use smallvec::SmallVec;

use crate::detent::Detent;
use crate::sizes::LayoutSizes;

/// An ordered map from anchor values to pixel offsets along the drag axis.
///
/// Offsets are measured from the top of the container: the most expanded
/// anchor has the smallest offset and the hidden anchor the largest
/// (`offset == container_size` means fully off-screen). Entries are kept
/// sorted by offset; ties keep insertion order.
///
/// An empty table means "not yet displayable": the sheet content has not
/// produced a nonzero measurement, and drag must be suppressed.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorTable<V> {
    entries: SmallVec<[(V, f64); 3]>,
}

impl<V: Copy + PartialEq> Default for AnchorTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + PartialEq> AnchorTable<V> {
    /// Creates an empty anchor table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Inserts or replaces the anchor for `value`, keeping entries sorted by
    /// offset.
    pub fn insert(&mut self, value: V, offset: f64) {
        self.entries.retain(|(v, _)| *v != value);
        let at = self
            .entries
            .iter()
            .position(|(_, o)| *o > offset)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, (value, offset));
    }

    /// Returns `true` if no anchors have been computed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of anchors in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if `value` has an anchor.
    #[must_use]
    pub fn has_anchor(&self, value: V) -> bool {
        self.entries.iter().any(|(v, _)| *v == value)
    }

    /// The pixel offset for `value`, if present.
    #[must_use]
    pub fn offset_of(&self, value: V) -> Option<f64> {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, o)| *o)
    }

    /// The smallest offset in the table (most expanded position).
    #[must_use]
    pub fn min_offset(&self) -> Option<f64> {
        self.entries.first().map(|(_, o)| *o)
    }

    /// The largest offset in the table (most hidden position).
    #[must_use]
    pub fn max_offset(&self) -> Option<f64> {
        self.entries.last().map(|(_, o)| *o)
    }

    /// The anchor value whose offset is nearest to `offset`.
    ///
    /// Ties resolve to the smaller offset (the more expanded anchor).
    #[must_use]
    pub fn closest_to(&self, offset: f64) -> Option<V> {
        let mut best: Option<(V, f64)> = None;
        for (v, o) in &self.entries {
            let d = (o - offset).abs();
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((*v, d)),
            }
        }
        best.map(|(v, _)| v)
    }

    /// The anchor strictly beyond `offset` in the given direction that lies
    /// nearest to `projected` (a predicted rest position).
    ///
    /// Used for fling settling: the fling direction restricts the candidate
    /// set, and the decay projection picks among the remaining anchors.
    /// Returns `None` when no anchor lies in that direction.
    #[must_use]
    pub fn closest_toward(&self, offset: f64, positive: bool, projected: f64) -> Option<V> {
        let mut best: Option<(V, f64)> = None;
        for (v, o) in &self.entries {
            let beyond = if positive {
                *o > offset + f64::EPSILON
            } else {
                *o < offset - f64::EPSILON
            };
            if !beyond {
                continue;
            }
            let d = (o - projected).abs();
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((*v, d)),
            }
        }
        best.map(|(v, _)| v)
    }

    /// Iterates over `(value, offset)` pairs in ascending offset order.
    pub fn iter(&self) -> impl Iterator<Item = (V, f64)> + '_ {
        self.entries.iter().map(|(v, o)| (*v, *o))
    }
}

/// Computes the sheet anchor table from measured sizes.
///
/// The draggable span is the sheet's own height capped at the container
/// height; each reachable detent exposes its fraction of that span:
/// `offset(d) = container - min(container, sheet) * fraction(d)`. So the
/// half-expanded anchor shows half the sheet, and a sheet at least as tall
/// as the container expands to offset `0.0`.
///
/// While `sheet_size <= 0.0` the table is empty rather than degenerate:
/// with no measurement, Hidden and Expanded would otherwise coincide at the
/// container edge.
#[must_use]
pub fn sheet_anchors(sizes: &LayoutSizes, skip_half_expanded: bool) -> AnchorTable<Detent> {
    let mut table = AnchorTable::new();
    if sizes.sheet_size <= 0.0 {
        return table;
    }

    let span = sizes.container_size.min(sizes.sheet_size);
    let end_point =
        |detent: Detent| sizes.container_size - span * detent.draggable_space_fraction();

    table.insert(Detent::Hidden, end_point(Detent::Hidden));
    if !skip_half_expanded {
        table.insert(Detent::HalfExpanded, end_point(Detent::HalfExpanded));
    }
    table.insert(Detent::Expanded, end_point(Detent::Expanded));
    table
}
