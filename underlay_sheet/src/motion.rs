// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion primitives: eased snap tweens and decay-based fling projection.
//!
//! Timestamps are caller-supplied milliseconds on a single monotonic clock
//! (the host's frame clock). Nothing here reads wall time, so motion is fully
//! deterministic and testable by feeding synthetic timestamps.

/// Evaluates the fast-out-slow-in easing curve at `t` in `[0, 1]`.
///
/// This is the cubic bezier with control points `(0.4, 0.0)` and
/// `(0.2, 1.0)`. The parameter for a given x is found with a few Newton
/// iterations; the curve's x component is strictly increasing on `[0, 1]`,
/// so the iteration converges quickly.
#[must_use]
pub fn fast_out_slow_in(t: f64) -> f64 {
    const X1: f64 = 0.4;
    const X2: f64 = 0.2;
    const Y1: f64 = 0.0;
    const Y2: f64 = 1.0;

    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let bezier = |p1: f64, p2: f64, u: f64| {
        let v = 1.0 - u;
        3.0 * v * v * u * p1 + 3.0 * v * u * u * p2 + u * u * u
    };
    let bezier_deriv = |p1: f64, p2: f64, u: f64| {
        let v = 1.0 - u;
        3.0 * v * v * p1 + 6.0 * v * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
    };

    let mut u = t;
    for _ in 0..8 {
        let err = bezier(X1, X2, u) - t;
        if err.abs() < 1e-7 {
            break;
        }
        let d = bezier_deriv(X1, X2, u);
        if d.abs() < 1e-7 {
            break;
        }
        u = (u - err / d).clamp(0.0, 1.0);
    }
    bezier(Y1, Y2, u)
}

/// A retargetable, eased tween between two offsets.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tween {
    start_offset: f64,
    end_offset: f64,
    start_time: f64,
    duration_ms: f64,
}

impl Tween {
    /// Starts a tween at `now` from `start_offset` to `end_offset`.
    ///
    /// A non-positive duration produces a tween that is already finished.
    #[must_use]
    pub fn new(start_offset: f64, end_offset: f64, now: f64, duration_ms: f64) -> Self {
        Self {
            start_offset,
            end_offset,
            start_time: now,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// The offset this tween is heading toward.
    #[must_use]
    pub fn end_offset(&self) -> f64 {
        self.end_offset
    }

    /// Redirects the tween to a new destination without restarting its clock.
    ///
    /// Used when anchors are recomputed mid-animation: the in-flight motion
    /// keeps its elapsed time and simply heads for the moved anchor.
    pub fn retarget(&mut self, end_offset: f64) {
        self.end_offset = end_offset;
    }

    /// The eased offset at `now`, clamped to the endpoints in time.
    #[must_use]
    pub fn value(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.end_offset;
        }
        let t = ((now - self.start_time) / self.duration_ms).clamp(0.0, 1.0);
        let eased = fast_out_slow_in(t);
        self.start_offset + (self.end_offset - self.start_offset) * eased
    }

    /// Returns `true` once the tween has run its full duration.
    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start_time >= self.duration_ms
    }
}

/// Exponential-decay projection for fling prediction.
///
/// Only the rest position matters for settling: the projected travel distance
/// for a release velocity `v` (px/s) is `v * time_constant`. The actual
/// motion toward the chosen anchor is then animated with the snap tween, so
/// no decay integration is performed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecaySpec {
    /// Decay time constant in milliseconds.
    pub time_constant_ms: f64,
}

impl Default for DecaySpec {
    fn default() -> Self {
        Self {
            time_constant_ms: 325.0,
        }
    }
}

impl DecaySpec {
    /// Projected travel distance in pixels for a release velocity in px/s.
    #[must_use]
    pub fn project(&self, velocity: f64) -> f64 {
        velocity * self.time_constant_ms / 1000.0
    }
}

/// Tuning for gesture settling and animated transitions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionConfig {
    /// Duration of an animated snap between anchors, in milliseconds.
    pub snap_duration_ms: f64,
    /// Minimum release speed (px/s) for a fling to override the positional
    /// threshold.
    pub velocity_threshold: f64,
    /// Fraction of the distance between two bounding anchors past which a
    /// slow release settles forward rather than back.
    pub positional_threshold: f64,
    /// Fling rest-position projection.
    pub decay: DecaySpec,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            snap_duration_ms: 300.0,
            velocity_threshold: 125.0,
            positional_threshold: 0.5,
            decay: DecaySpec::default(),
        }
    }
}
