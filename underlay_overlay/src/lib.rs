// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Underlay Overlay: a per-screen registry of stacked sheets.
//!
//! One [`OverlayManager`] lives with each screen scope. Screens register a
//! [`SheetEntry`] per sheet they declare; the manager keeps stacking order,
//! animates each sheet's scrim, routes system back presses to the topmost
//! eligible sheet, and decides frame by frame whether a sheet's content
//! should be composed at all — including keeping content alive through exit
//! animations so a dismissal is never cut short.
//!
//! The manager is as host-driven as [`underlay_sheet`] itself: the host
//! forwards back presses, lifecycle stop/resume, and frame ticks, then walks
//! [`OverlayManager::iter`] to draw scrims and contents bottom to top.
//!
//! ## Minimal example
//!
//! ```
//! use underlay_overlay::{OverlayManager, SheetEntry};
//! use underlay_sheet::SheetState;
//!
//! let mut overlays = OverlayManager::new();
//! let id = overlays.register(SheetEntry::new(SheetState::default(), "settings"));
//!
//! // Layout measures, the screen shows the sheet, frames tick.
//! let sheet = overlays.sheet_mut(id).unwrap();
//! sheet.set_container_size(1000.0);
//! sheet.set_sheet_size(400.0);
//! sheet.show(0.0);
//! overlays.on_frame(16.0);
//!
//! for render in overlays.iter() {
//!     // Draw render.scrim(), then the content at render.offset.
//!     assert!(render.content_mounted);
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod entry;
mod manager;

pub use entry::{SheetEntry, SheetId, SheetRender};
pub use manager::OverlayManager;
