// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change summaries returned from mutating operations.

use bitflags::bitflags;

bitflags! {
    /// A coarse summary of what a mutating call changed.
    ///
    /// Hosts that re-render reactively can forward these to their invalidation
    /// mechanism; the flags are reported synchronously by the call that caused
    /// the change, so dependents observe mutations within the same frame.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// The live drag/animation offset moved.
        const OFFSET = 1 << 0;
        /// `current_value` settled at a new detent.
        const CURRENT = 1 << 1;
        /// `target_value` was retargeted.
        const TARGET = 1 << 2;
        /// The anchor table was recomputed.
        const ANCHORS = 1 << 3;
        /// A measurement or a derived size field changed.
        const SIZES = 1 << 4;
    }
}

#[cfg(test)]
mod tests {
    use super::ChangeFlags;

    #[test]
    fn flags_union_and_query() {
        let flags = ChangeFlags::OFFSET | ChangeFlags::CURRENT;
        assert!(flags.contains(ChangeFlags::OFFSET));
        assert!(!flags.contains(ChangeFlags::ANCHORS));
        assert!(!ChangeFlags::empty().contains(ChangeFlags::OFFSET));
    }
}
