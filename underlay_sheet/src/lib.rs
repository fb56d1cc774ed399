// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underlay Sheet: a detent-anchored bottom-sheet state machine.
//!
//! This crate models the state of a draggable bottom sheet without assuming
//! any particular UI framework. The host owns layout, input, and the frame
//! clock; this crate owns the finite state machine over discrete detents,
//! the continuous drag offset between them, and the rules for settling.
//!
//! The core pieces are:
//!
//! - [`Detent`]: the discrete resting positions (Hidden / HalfExpanded /
//!   Expanded), each exposing a fraction of the draggable space.
//! - [`LayoutSizes`]: measured container/content sizes plus the derived
//!   visible-pixel quantities.
//! - [`AnchorTable`] and [`sheet_anchors`]: the detent → pixel-offset map,
//!   recomputed whenever a measurement changes.
//! - [`AnchoredDraggable`]: the generic state machine tracking the live
//!   offset, the settled value, and in-flight animated transitions.
//! - [`SheetState`]: the public facade combining the machine with the
//!   skip-half-expanded and cancellability policies and the visibility
//!   predicates.
//! - [`pointer::PointerTracker`] (feature `pointer`): converts raw 2D
//!   pointer samples into axis deltas and a release velocity.
//!
//! ## Design
//!
//! Everything is driven by the host on a single logical UI thread:
//! measurements arrive through setters, gestures through
//! [`SheetState::drag_by`] / [`SheetState::settle`], and time through
//! [`SheetState::on_frame`] with caller-supplied millisecond timestamps.
//! There is no internal clock, no executor, and no locking.
//!
//! Animated transitions are identified by [`TransitionId`] handles and are
//! last-writer-wins: a newer request supersedes the in-flight one, which
//! then reports [`TransitionState::Superseded`] instead of completing. This
//! is deliberate — stale intents are never queued.
//!
//! ## Minimal example
//!
//! ```
//! use underlay_sheet::{Detent, SheetConfig, SheetState};
//!
//! let mut sheet = SheetState::new(SheetConfig::default());
//!
//! // Layout reports sizes; anchors come into existence.
//! sheet.set_container_size(1000.0);
//! sheet.set_sheet_size(400.0);
//!
//! // Programmatic show: animates toward the half-expanded anchor.
//! sheet.show(0.0);
//! assert_eq!(sheet.target_value(), Detent::HalfExpanded);
//!
//! // The host ticks frames until the sheet settles.
//! let mut now = 0.0;
//! while sheet.is_animating() {
//!     now += 16.0;
//!     sheet.on_frame(now);
//! }
//! assert!(sheet.is_half_expanded());
//! assert_eq!(sheet.require_offset(), 800.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod anchors;
mod detent;
mod draggable;
mod flags;
pub mod motion;
#[cfg(feature = "pointer")]
pub mod pointer;
mod sizes;
mod state;

pub use anchors::{AnchorTable, sheet_anchors};
pub use detent::Detent;
pub use draggable::{AnchoredDraggable, TransitionId, TransitionState};
pub use flags::ChangeFlags;
pub use motion::{DecaySpec, MotionConfig};
pub use sizes::LayoutSizes;
pub use state::{SheetConfig, SheetDebugInfo, SheetState};
