// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-sample adapter: 2D pointer positions to axis deltas and a release
//! velocity.
//!
//! Hosts that receive raw pointer events can feed positions and timestamps
//! into a [`PointerTracker`] and forward the produced vertical deltas to
//! [`SheetState::drag_by`](crate::SheetState::drag_by). On release,
//! [`PointerTracker::release`] estimates the velocity (px/s) over a short
//! trailing window for [`SheetState::settle`](crate::SheetState::settle).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use underlay_sheet::pointer::PointerTracker;
//!
//! let mut tracker = PointerTracker::new();
//! tracker.begin(Point::new(10.0, 100.0), 0.0);
//!
//! // Finger moves down 30px over two frames.
//! let d1 = tracker.sample(Point::new(10.0, 115.0), 16.0);
//! let d2 = tracker.sample(Point::new(10.0, 130.0), 32.0);
//! assert_eq!(d1, 15.0);
//! assert_eq!(d2, 15.0);
//!
//! // ~30px in 32ms is roughly 937 px/s downward.
//! let velocity = tracker.release(32.0);
//! assert!(velocity > 800.0);
//! ```

use kurbo::Point;

/// Number of trailing samples used for the velocity estimate.
const WINDOW: usize = 16;

/// Samples older than this are excluded from the velocity estimate.
const HORIZON_MS: f64 = 100.0;

/// Tracks one pointer interaction along the vertical axis.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    samples: [(f64, f64); WINDOW],
    len: usize,
    head: usize,
    last: Option<Point>,
    active: bool,
}

impl PointerTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a pointer interaction is being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts tracking at `pos` with a millisecond timestamp.
    pub fn begin(&mut self, pos: Point, time_ms: f64) {
        self.len = 0;
        self.head = 0;
        self.active = true;
        self.last = Some(pos);
        self.push(time_ms, pos.y);
    }

    /// Records a new position, returning the vertical delta since the last
    /// sample. Returns `0.0` when no interaction is active.
    pub fn sample(&mut self, pos: Point, time_ms: f64) -> f64 {
        if !self.active {
            return 0.0;
        }
        let delta = match self.last {
            Some(last) => pos.y - last.y,
            None => 0.0,
        };
        self.last = Some(pos);
        self.push(time_ms, pos.y);
        delta
    }

    /// Ends the interaction and estimates the release velocity in px/s.
    ///
    /// A least-squares fit over the samples inside the trailing window; with
    /// fewer than two usable samples the velocity is `0.0` (a stationary
    /// hold before release should not fling).
    pub fn release(&mut self, time_ms: f64) -> f64 {
        self.active = false;
        self.last = None;

        let mut times = [0.0; WINDOW];
        let mut ys = [0.0; WINDOW];
        let mut n = 0;
        for i in 0..self.len {
            let idx = (self.head + WINDOW - self.len + i) % WINDOW;
            let (t, y) = self.samples[idx];
            if time_ms - t <= HORIZON_MS {
                times[n] = t;
                ys[n] = y;
                n += 1;
            }
        }
        self.len = 0;
        if n < 2 {
            return 0.0;
        }

        let inv = 1.0 / n as f64;
        let mean_t = times[..n].iter().sum::<f64>() * inv;
        let mean_y = ys[..n].iter().sum::<f64>() * inv;
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..n {
            let dt = times[i] - mean_t;
            num += dt * (ys[i] - mean_y);
            den += dt * dt;
        }
        if den <= 0.0 {
            return 0.0;
        }
        // Slope is px/ms; report px/s.
        num / den * 1000.0
    }

    /// Drops any in-progress interaction without producing a velocity.
    pub fn cancel(&mut self) {
        self.active = false;
        self.last = None;
        self.len = 0;
    }

    fn push(&mut self, time_ms: f64, y: f64) {
        self.samples[self.head] = (time_ms, y);
        self.head = (self.head + 1) % WINDOW;
        if self.len < WINDOW {
            self.len += 1;
        }
    }
}
