// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-screen overlay manager.

use alloc::vec::Vec;

use hashbrown::HashMap;
use underlay_sheet::motion::Tween;
use underlay_sheet::{ChangeFlags, Detent, SheetState, TransitionId};

use crate::entry::{SheetEntry, SheetId, SheetRender};

/// Animates scrim opacity toward the sheet's scrim visibility.
///
/// Uses the sheet's own snap duration, so scrim and sheet motion stay in
/// step without a second tuning knob.
#[derive(Copy, Clone, Debug, Default)]
struct ScrimFade {
    value: f64,
    target: f64,
    tween: Option<Tween>,
}

impl ScrimFade {
    fn advance(&mut self, visible: bool, now: f64, duration_ms: f64) {
        let target = if visible { 1.0 } else { 0.0 };
        if target != self.target {
            self.target = target;
            self.tween = Some(Tween::new(self.value, target, now, duration_ms));
        }
        if let Some(tween) = &self.tween {
            self.value = tween.value(now);
            if tween.is_finished(now) {
                self.value = tween.end_offset();
                self.tween = None;
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Slot<C> {
    id: SheetId,
    entry: SheetEntry<C>,
    fade: ScrimFade,
    mounted: bool,
}

/// Owns every sheet declared by one screen, in stacking order.
///
/// Screens register entries, the host forwards back presses, lifecycle
/// events, and frame ticks here, and the renderer walks
/// [`OverlayManager::iter`] each frame. Registration order is stacking
/// order; the most recently registered sheet draws topmost.
///
/// Like [`SheetState`], all calls happen on the host's single UI thread.
#[derive(Clone, Debug)]
pub struct OverlayManager<C> {
    slots: Vec<Slot<C>>,
    index: HashMap<u64, usize>,
    next_id: u64,
    suspended: bool,
}

impl<C> Default for OverlayManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> OverlayManager<C> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            next_id: 0,
            suspended: false,
        }
    }

    /// Number of registered sheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when no sheet is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` currently resolves to a registered sheet.
    #[must_use]
    pub fn contains(&self, id: SheetId) -> bool {
        self.index.contains_key(&id.0)
    }

    /// Registers a sheet on top of the current stack.
    pub fn register(&mut self, entry: SheetEntry<C>) -> SheetId {
        let id = SheetId(self.next_id);
        self.next_id += 1;
        let mounted = !self.suspended && wants_content(&entry);
        self.index.insert(id.0, self.slots.len());
        self.slots.push(Slot {
            id,
            entry,
            fade: ScrimFade::default(),
            mounted,
        });
        id
    }

    /// Replaces the entry behind `id` in place.
    ///
    /// Keeps the sheet's stacking position and scrim fade, so a screen
    /// re-declaring its sheets (new content, same identity) does not restart
    /// the scrim or reorder the stack. Returns the previous entry, or the
    /// offered one back when `id` no longer resolves.
    pub fn reregister(
        &mut self,
        id: SheetId,
        entry: SheetEntry<C>,
    ) -> Result<SheetEntry<C>, SheetEntry<C>> {
        let Some(&at) = self.index.get(&id.0) else {
            return Err(entry);
        };
        Ok(core::mem::replace(&mut self.slots[at].entry, entry))
    }

    /// Removes a sheet, returning its entry.
    ///
    /// Any in-flight transition is cancelled first so nothing keeps mutating
    /// a sheet the screen no longer shows.
    pub fn deregister(&mut self, id: SheetId) -> Option<SheetEntry<C>> {
        let at = self.index.remove(&id.0)?;
        let mut slot = self.slots.remove(at);
        slot.entry.state.cancel_motion();
        for (pos, survivor) in self.slots.iter().enumerate().skip(at) {
            self.index.insert(survivor.id.0, pos);
        }
        Some(slot.entry)
    }

    /// The state machine behind `id`.
    #[must_use]
    pub fn sheet(&self, id: SheetId) -> Option<&SheetState> {
        let &at = self.index.get(&id.0)?;
        Some(&self.slots[at].entry.state)
    }

    /// Mutable access to the state machine behind `id`, for forwarding
    /// gestures and transition requests.
    pub fn sheet_mut(&mut self, id: SheetId) -> Option<&mut SheetState> {
        let &at = self.index.get(&id.0)?;
        Some(&mut self.slots[at].entry.state)
    }

    /// Render data for every sheet, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = SheetRender<'_, C>> {
        self.slots.iter().map(|slot| {
            let state = &slot.entry.state;
            SheetRender {
                id: slot.id,
                offset: state.offset().unwrap_or(state.sizes().container_size),
                scrim_alpha: slot.fade.value,
                content_mounted: slot.mounted,
                entry: &slot.entry,
            }
        })
    }

    /// Routes a system back press to the topmost eligible sheet.
    ///
    /// Eligible means presented (heading somewhere visible, or still showing
    /// pixels), cancellable, and registered with back handling on. Presented
    /// sheets that are not eligible are skipped, so a back press can fall
    /// through a pinned sheet to one below it, and from there to the host.
    /// Returns the hide transition when a sheet consumed the press.
    pub fn on_back_pressed(&mut self, now: f64) -> Option<TransitionId> {
        for slot in self.slots.iter_mut().rev() {
            let state = &mut slot.entry.state;
            if !is_presented(state) {
                continue;
            }
            if !slot.entry.close_on_back || !state.config().is_cancellable {
                continue;
            }
            return state.hide(now);
        }
        None
    }

    /// Advances every sheet's motion, scrim fade, and content mounting.
    ///
    /// Returns the union of the sheets' change flags; an empty result means
    /// no sheet moved and the host may skip repainting the overlay layer.
    pub fn on_frame(&mut self, now: f64) -> ChangeFlags {
        let mut flags = ChangeFlags::empty();
        for slot in &mut self.slots {
            let state = &mut slot.entry.state;
            flags |= state.on_frame(now);
            let duration = state.config().motion.snap_duration_ms;
            slot.fade.advance(state.scrim_visible(), now, duration);
            slot.mounted = !self.suspended && wants_content(&slot.entry);
        }
        flags
    }

    /// Suspends the overlay when the screen leaves the foreground.
    ///
    /// Cancels in-flight transitions, unmounts content, and snaps scrims off.
    /// Sheets keep their settled detent, so resuming restores the overlay
    /// where it was without replaying exit animations.
    pub fn on_lifecycle_stop(&mut self) {
        self.suspended = true;
        for slot in &mut self.slots {
            slot.entry.state.cancel_motion();
            slot.fade = ScrimFade::default();
            slot.mounted = false;
        }
    }

    /// Resumes the overlay; content remounts immediately where due.
    pub fn on_lifecycle_resume(&mut self) {
        self.suspended = false;
        for slot in &mut self.slots {
            slot.mounted = wants_content(&slot.entry);
        }
    }
}

/// Whether a sheet currently takes part in presentation at all.
fn is_presented(state: &SheetState) -> bool {
    state.target_value() != Detent::Hidden || state.is_visible_real()
}

/// Whether a sheet's content should be composed.
///
/// Content must be composed while the sheet is presented, but also while the
/// sheet has never produced a measurement: without composing the content
/// there is nothing to measure, and the anchors could never come into
/// existence. Unmounting happens only once the last pixel has left the
/// screen, so exit animations are never cut short.
fn wants_content<C>(entry: &SheetEntry<C>) -> bool {
    let state = &entry.state;
    state.config().always_compose_content
        || is_presented(state)
        || state.sizes().sheet_size <= 0.0
}

#[cfg(test)]
mod tests {
    use underlay_sheet::{SheetConfig, SheetState};

    use super::OverlayManager;
    use crate::entry::SheetEntry;

    fn entry(label: &'static str) -> SheetEntry<&'static str> {
        SheetEntry::new(SheetState::default(), label)
    }

    #[test]
    fn registration_order_is_stacking_order() {
        let mut manager = OverlayManager::new();
        let lower = manager.register(entry("lower"));
        let upper = manager.register(entry("upper"));

        let order: alloc::vec::Vec<_> = manager.iter().map(|r| r.id).collect();
        assert_eq!(order, [lower, upper]);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn reregister_keeps_position_and_returns_the_old_entry() {
        let mut manager = OverlayManager::new();
        let lower = manager.register(entry("lower"));
        let upper = manager.register(entry("upper"));

        let old = manager.reregister(lower, entry("lower-v2")).unwrap();
        assert_eq!(old.content, "lower");

        let order: alloc::vec::Vec<_> = manager.iter().map(|r| r.entry.content).collect();
        assert_eq!(order, ["lower-v2", "upper"]);
        assert!(manager.contains(upper));
    }

    #[test]
    fn reregister_of_an_unknown_id_hands_the_entry_back() {
        let mut manager = OverlayManager::new();
        let id = manager.register(entry("a"));
        manager.deregister(id).unwrap();

        let offered = entry("b");
        let back = manager.reregister(id, offered).unwrap_err();
        assert_eq!(back.content, "b");
    }

    #[test]
    fn deregister_reindexes_the_survivors() {
        let mut manager = OverlayManager::new();
        let a = manager.register(entry("a"));
        let b = manager.register(entry("b"));
        let c = manager.register(entry("c"));

        manager.deregister(b).unwrap();
        assert!(!manager.contains(b));
        assert!(manager.sheet(c).is_some());
        assert!(manager.sheet(a).is_some());

        let order: alloc::vec::Vec<_> = manager.iter().map(|r| r.entry.content).collect();
        assert_eq!(order, ["a", "c"]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut manager = OverlayManager::new();
        let first = manager.register(entry("a"));
        manager.deregister(first).unwrap();
        let second = manager.register(entry("b"));
        assert_ne!(first, second);
        assert!(!manager.contains(first));
    }

    #[test]
    fn unmeasured_sheets_mount_content_so_layout_can_measure() {
        let mut manager = OverlayManager::new();
        let id = manager.register(entry("a"));
        let render = manager.iter().find(|r| r.id == id).unwrap();
        assert!(render.content_mounted);
        // No offset exists yet; the placeholder is the container height.
        assert_eq!(render.offset, 0.0);
    }
}
