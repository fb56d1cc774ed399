// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The anchored-draggable state machine.
//!
//! [`AnchoredDraggable`] tracks a continuous offset between a set of discrete
//! anchors and performs animated or gesture-driven transitions between them.
//! It is generic over the anchor value type so hosts with custom detent sets
//! can reuse it; the sheet facade instantiates it with
//! [`Detent`](crate::Detent).
//!
//! The machine is driven entirely by its host: gesture deltas arrive through
//! [`AnchoredDraggable::dispatch_raw_delta`], releases through
//! [`AnchoredDraggable::settle`], programmatic transitions through
//! [`AnchoredDraggable::animate_to`], and time through
//! [`AnchoredDraggable::tick`]. There is no internal clock or executor.
//!
//! ## Transition handles
//!
//! Animated transitions return a [`TransitionId`]. Requesting a new
//! transition while one is in flight supersedes it (last-writer-wins); the
//! superseded transition is not an error, it simply never reports
//! [`TransitionState::Settled`]. Callers that sequence work after a
//! transition should poll [`AnchoredDraggable::transition_state`] and treat
//! [`TransitionState::Superseded`] as "someone else took over".

use core::fmt::Debug;

use crate::anchors::AnchorTable;
use crate::flags::ChangeFlags;
use crate::motion::{MotionConfig, Tween};

/// Identifies one animated transition request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

/// Where a transition request ended up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionState {
    /// Still animating toward its target anchor.
    Running,
    /// Completed at the exact target anchor offset.
    Settled,
    /// Replaced by a newer transition or gesture before completing.
    Superseded,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Motion<V> {
    Idle,
    /// Target requested before anchors exist; resolves on the first
    /// `update_anchors` with a usable table.
    Pending {
        id: TransitionId,
    },
    Animating {
        tween: Tween,
        destination: V,
        id: TransitionId,
    },
}

/// A draggable position with a finite set of anchors.
///
/// Owns `current_value` (the settled anchor, changed only by settle
/// completion), `target_value` (updated immediately on any transition
/// request so hosts can react optimistically), and the live pixel offset.
#[derive(Clone, Debug)]
pub struct AnchoredDraggable<V> {
    anchors: AnchorTable<V>,
    offset: Option<f64>,
    current_value: V,
    target_value: V,
    motion: Motion<V>,
    dragging: bool,
    config: MotionConfig,
    next_transition: u64,
    last_settled: Option<TransitionId>,
}

impl<V: Copy + PartialEq + Debug> AnchoredDraggable<V> {
    /// Creates a machine resting at `initial` with no anchors yet.
    #[must_use]
    pub fn new(initial: V, config: MotionConfig) -> Self {
        Self {
            anchors: AnchorTable::new(),
            offset: None,
            current_value: initial,
            target_value: initial,
            motion: Motion::Idle,
            dragging: false,
            config,
            next_transition: 0,
            last_settled: None,
        }
    }

    /// The current anchor table.
    #[must_use]
    pub fn anchors(&self) -> &AnchorTable<V> {
        &self.anchors
    }

    /// The settled anchor value.
    #[must_use]
    pub fn current_value(&self) -> V {
        self.current_value
    }

    /// The anchor the machine is at or heading toward.
    #[must_use]
    pub fn target_value(&self) -> V {
        self.target_value
    }

    /// The live offset, or `None` before anchors have been established.
    #[must_use]
    pub fn offset(&self) -> Option<f64> {
        self.offset
    }

    /// The live offset, defaulting to `0.0` before anchors exist.
    ///
    /// This never fails: requesting the offset before the first layout pass
    /// is an expected call pattern, not a fault.
    #[must_use]
    pub fn require_offset(&self) -> f64 {
        self.offset.unwrap_or(0.0)
    }

    /// Returns `true` while an animated transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Animating { .. })
    }

    /// Status of a previously requested transition.
    ///
    /// Only the most recently settled transition is remembered; anything that
    /// is neither running nor the latest settle reports `Superseded`.
    #[must_use]
    pub fn transition_state(&self, id: TransitionId) -> TransitionState {
        match self.motion {
            Motion::Animating { id: active, .. } | Motion::Pending { id: active }
                if active == id =>
            {
                TransitionState::Running
            }
            _ if self.last_settled == Some(id) => TransitionState::Settled,
            _ => TransitionState::Superseded,
        }
    }

    /// Replaces the anchor table, using `new_target` as the continuity
    /// anchor.
    ///
    /// Idempotent: applying an identical table with an unchanged target does
    /// nothing. Otherwise the machine repositions within the new anchors
    /// while preserving intent:
    ///
    /// - an in-flight animation is retargeted to the moved anchor rather
    ///   than restarted;
    /// - an in-progress gesture keeps its offset, clamped into the new span;
    /// - an idle machine snaps to the new target's anchor and settles there.
    pub fn update_anchors(&mut self, new_anchors: AnchorTable<V>, new_target: V) -> ChangeFlags {
        if self.anchors == new_anchors && self.target_value == new_target && self.offset.is_some() {
            return ChangeFlags::empty();
        }

        let mut flags = ChangeFlags::ANCHORS;
        self.anchors = new_anchors;
        if self.target_value != new_target {
            self.target_value = new_target;
            flags |= ChangeFlags::TARGET;
        }

        if self.anchors.is_empty() {
            // Back to "not yet displayable": drop the offset and any motion.
            if self.offset.take().is_some() {
                flags |= ChangeFlags::OFFSET;
            }
            if let Motion::Animating { .. } = self.motion {
                self.motion = Motion::Idle;
            }
            return flags;
        }

        match &mut self.motion {
            Motion::Animating { tween, destination, .. } => {
                if let Some(end) = self.anchors.offset_of(*destination) {
                    tween.retarget(end);
                } else if let Some(fallback) = self.anchors.closest_to(tween.end_offset()) {
                    // The destination vanished (e.g. half-expansion was
                    // disabled); head for the nearest surviving anchor.
                    *destination = fallback;
                    self.target_value = fallback;
                    flags |= ChangeFlags::TARGET;
                    if let Some(end) = self.anchors.offset_of(fallback) {
                        tween.retarget(end);
                    }
                }
            }
            Motion::Pending { id } => {
                // A transition was requested before measurement: resolve it
                // by snapping straight to its anchor.
                let id = *id;
                let target = self.target_value;
                let end = self
                    .anchors
                    .offset_of(target)
                    .or_else(|| self.anchors.max_offset())
                    .unwrap_or(0.0);
                self.offset = Some(end);
                if self.current_value != target && self.anchors.has_anchor(target) {
                    self.current_value = target;
                    flags |= ChangeFlags::CURRENT;
                }
                self.last_settled = Some(id);
                self.motion = Motion::Idle;
                flags |= ChangeFlags::OFFSET;
            }
            Motion::Idle => {
                if self.dragging {
                    // Mid-gesture: keep the finger position, just clamp it.
                    let (min, max) = self.span();
                    let prev = self.require_offset();
                    let clamped = prev.clamp(min, max);
                    if self.offset != Some(clamped) {
                        self.offset = Some(clamped);
                        flags |= ChangeFlags::OFFSET;
                    }
                } else {
                    let end = self
                        .anchors
                        .offset_of(self.target_value)
                        .or_else(|| self.anchors.max_offset())
                        .unwrap_or(0.0);
                    if self.offset != Some(end) {
                        self.offset = Some(end);
                        flags |= ChangeFlags::OFFSET;
                    }
                    if self.current_value != self.target_value
                        && self.anchors.has_anchor(self.target_value)
                    {
                        self.current_value = self.target_value;
                        flags |= ChangeFlags::CURRENT;
                    }
                }
            }
        }
        flags
    }

    /// Applies a raw drag delta to the live offset, returning the consumed
    /// portion.
    ///
    /// Cancels any in-flight animation (the gesture wins) and retargets
    /// `target_value` to the nearest anchor. Deltas are clamped to the anchor
    /// span; before the first measurement nothing is consumed.
    pub fn dispatch_raw_delta(&mut self, delta: f64) -> f64 {
        if self.anchors.is_empty() {
            return 0.0;
        }
        if let Motion::Animating { .. } = self.motion {
            self.motion = Motion::Idle;
        }
        self.dragging = true;

        let prev = self
            .offset
            .or_else(|| self.anchors.offset_of(self.current_value))
            .unwrap_or(0.0);
        let (min, max) = self.span();
        let new = (prev + delta).clamp(min, max);
        self.offset = Some(new);
        if let Some(nearest) = self.anchors.closest_to(new) {
            self.target_value = nearest;
        }
        new - prev
    }

    /// Settles a released gesture, choosing a destination anchor from the
    /// release velocity and position.
    ///
    /// Fast releases (at or above the velocity threshold) settle toward the
    /// anchor in the fling direction nearest the decay-projected rest
    /// position; slow releases snap to the nearer anchor by position.
    /// `confirm` gates the chosen destination; a rejected destination falls
    /// back to the nearest allowed anchor (and finally to the current value).
    ///
    /// Returns `None` before the first measurement.
    pub fn settle(
        &mut self,
        velocity: f64,
        now: f64,
        mut confirm: impl FnMut(V) -> bool,
    ) -> Option<TransitionId> {
        if self.anchors.is_empty() {
            return None;
        }
        let x = self.require_offset();

        let mut destination = if velocity.abs() >= self.config.velocity_threshold {
            let projected = x + self.config.decay.project(velocity);
            self.anchors
                .closest_toward(x, velocity > 0.0, projected)
                .or_else(|| self.anchors.closest_to(x))
        } else {
            self.anchors.closest_to(x)
        }?;

        if !confirm(destination) {
            destination = self
                .nearest_confirmed(x, &mut confirm)
                .unwrap_or(self.current_value);
        }

        self.dragging = false;
        self.start_animation(destination, now)
    }

    /// Starts an animated transition to `value`.
    ///
    /// Returns `None` when `value` has no anchor (a common, expected call
    /// from generic host code — silently a no-op). Before the first
    /// measurement the request is recorded as pending: `target_value` flips
    /// immediately and the machine snaps to the anchor once one exists.
    pub fn animate_to(&mut self, value: V, now: f64) -> Option<TransitionId> {
        if self.anchors.is_empty() {
            self.target_value = value;
            let id = self.fresh_id();
            self.motion = Motion::Pending { id };
            return Some(id);
        }
        if !self.anchors.has_anchor(value) {
            return None;
        }
        self.dragging = false;
        self.start_animation(value, now)
    }

    /// Cancels any in-flight animation without moving the offset.
    ///
    /// Used by host teardown: the superseded transition never settles, and
    /// no further ticks will mutate state.
    pub fn cancel_motion(&mut self) {
        self.motion = Motion::Idle;
        self.dragging = false;
    }

    /// Snaps instantly to `value` if it has an anchor, settling there.
    pub fn snap_to(&mut self, value: V) -> ChangeFlags {
        let Some(end) = self.anchors.offset_of(value) else {
            return ChangeFlags::empty();
        };
        let mut flags = ChangeFlags::empty();
        if self.offset != Some(end) {
            self.offset = Some(end);
            flags |= ChangeFlags::OFFSET;
        }
        if self.target_value != value {
            self.target_value = value;
            flags |= ChangeFlags::TARGET;
        }
        if self.current_value != value {
            self.current_value = value;
            flags |= ChangeFlags::CURRENT;
        }
        self.motion = Motion::Idle;
        self.dragging = false;
        flags
    }

    /// Advances in-flight motion to `now`.
    ///
    /// On arrival the offset lands exactly on the target anchor and
    /// `current_value` flips once.
    pub fn tick(&mut self, now: f64) -> ChangeFlags {
        let Motion::Animating { tween, destination, id } = self.motion else {
            return ChangeFlags::empty();
        };

        let mut flags = ChangeFlags::empty();
        let value = tween.value(now);
        if self.offset != Some(value) {
            self.offset = Some(value);
            flags |= ChangeFlags::OFFSET;
        }
        if tween.is_finished(now) {
            self.offset = Some(tween.end_offset());
            if self.current_value != destination {
                self.current_value = destination;
                flags |= ChangeFlags::CURRENT;
            }
            self.last_settled = Some(id);
            self.motion = Motion::Idle;
        }
        flags
    }

    fn span(&self) -> (f64, f64) {
        (
            self.anchors.min_offset().unwrap_or(0.0),
            self.anchors.max_offset().unwrap_or(0.0),
        )
    }

    fn nearest_confirmed(&self, x: f64, confirm: &mut impl FnMut(V) -> bool) -> Option<V> {
        let mut best: Option<(V, f64)> = None;
        for (v, o) in self.anchors.iter() {
            if !confirm(v) {
                continue;
            }
            let d = (o - x).abs();
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((v, d)),
            }
        }
        best.map(|(v, _)| v)
    }

    fn fresh_id(&mut self) -> TransitionId {
        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        id
    }

    fn start_animation(&mut self, destination: V, now: f64) -> Option<TransitionId> {
        let end = self.anchors.offset_of(destination)?;
        let start = self.require_offset();
        self.target_value = destination;
        let id = self.fresh_id();

        if (end - start).abs() < 1e-9 {
            // Already there: settle immediately, exactly once.
            self.offset = Some(end);
            self.current_value = destination;
            self.last_settled = Some(id);
            self.motion = Motion::Idle;
            return Some(id);
        }

        self.motion = Motion::Animating {
            tween: Tween::new(start, end, now, self.config.snap_duration_ms),
            destination,
            id,
        };
        Some(id)
    }
}
