// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underlay Nested Scroll: arbitration between a sheet drag and its inner
//! scrollable content.
//!
//! When a sheet hosts a scrollable (a list, a text area), a single gesture
//! could mean "scroll the content" or "drag the sheet". This crate decides
//! ownership per event, in the order a nested-scroll protocol delivers them:
//!
//! 1. [`pre_scroll`]: the sheet sees the delta *before* the content.
//!    Closing-direction user input is consumed here, so a downward pull
//!    dismisses the sheet in preference to scrolling.
//! 2. The host applies the remaining delta to the inner scrollable.
//! 3. [`post_scroll`]: whatever the content did not consume drags the sheet
//!    (overscroll drags the sheet).
//! 4. [`pre_fling`] / [`post_fling`]: a fling that would carry the sheet
//!    toward its hidden anchor is redirected into the sheet's settle
//!    mechanism instead of the content's own decay, so sheet and content
//!    motion feel unified.
//!
//! Deltas and velocities follow the sheet's axis convention: positive values
//! move the sheet toward its hidden anchor (the "closing" direction).
//!
//! When the sheet is not cancellable every hook passes events through
//! unmodified; user scroll never moves the sheet.
//!
//! ## Minimal example
//!
//! ```
//! use underlay_nested_scroll::{ScrollSource, pre_scroll, post_scroll};
//! use underlay_sheet::{SheetConfig, SheetState};
//!
//! let mut sheet = SheetState::new(SheetConfig::default());
//! sheet.set_container_size(1000.0);
//! sheet.set_sheet_size(400.0);
//! sheet.show(0.0);
//! # let mut now = 0.0;
//! # while sheet.is_animating() { now += 16.0; sheet.on_frame(now); }
//!
//! // A downward pull on the inner list: the sheet takes it first.
//! let consumed = pre_scroll(&mut sheet, 30.0, ScrollSource::UserInput);
//! assert_eq!(consumed, 30.0);
//!
//! // An upward scroll passes through to the content...
//! assert_eq!(pre_scroll(&mut sheet, -10.0, ScrollSource::UserInput), 0.0);
//! // ...and any leftover expands the sheet afterwards.
//! let consumed = post_scroll(&mut sheet, -10.0, ScrollSource::UserInput);
//! assert_eq!(consumed, -10.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use underlay_sheet::{Detent, SheetState, TransitionId};

/// Where a scroll event originated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScrollSource {
    /// Direct user input (a finger on the screen).
    UserInput,
    /// Programmatic or momentum scrolling produced by the framework.
    SideEffect,
}

/// Offers a scroll delta to the sheet before the inner content sees it.
///
/// Consumes closing-direction user input while the sheet is cancellable, so
/// drag-to-dismiss takes priority over inner scrolling. Returns the consumed
/// portion; the host forwards the rest to the content.
pub fn pre_scroll(state: &mut SheetState, available: f64, source: ScrollSource) -> f64 {
    if !state.config().is_cancellable {
        return 0.0;
    }
    if available > 0.0 && source == ScrollSource::UserInput {
        state.drag_by(available)
    } else {
        0.0
    }
}

/// Applies the delta the inner content left unconsumed to the sheet.
///
/// Any direction counts: overscrolling an inner list at its edge drags the
/// sheet. Returns the consumed portion.
pub fn post_scroll(state: &mut SheetState, available: f64, source: ScrollSource) -> f64 {
    if !state.config().is_cancellable {
        return 0.0;
    }
    if source == ScrollSource::UserInput {
        state.drag_by(available)
    } else {
        0.0
    }
}

/// Offers a fling velocity to the sheet before the content's own decay runs.
///
/// A closing fling while the sheet can still travel toward its hidden anchor
/// is redirected into the sheet's settle mechanism; the full velocity is
/// reported as consumed so the inner scrollable does not also fling.
pub fn pre_fling(state: &mut SheetState, velocity: f64, now: f64) -> (f64, Option<TransitionId>) {
    if !state.config().is_cancellable {
        return (0.0, None);
    }
    let offset = state.require_offset();
    let hidden = state.anchor_of(Detent::Hidden);
    let can_close = hidden.is_some_and(|h| offset < h);
    if velocity > 0.0 && can_close {
        let id = state.settle(velocity, now);
        (velocity, id)
    } else {
        (0.0, None)
    }
}

/// Settles the sheet with whatever velocity the content's fling left over.
///
/// Always consumes the remainder (the gesture is finished either way), so a
/// sheet released between anchors snaps to one instead of hanging.
pub fn post_fling(state: &mut SheetState, velocity: f64, now: f64) -> (f64, Option<TransitionId>) {
    if !state.config().is_cancellable {
        return (0.0, None);
    }
    let id = state.settle(velocity, now);
    (velocity, id)
}
