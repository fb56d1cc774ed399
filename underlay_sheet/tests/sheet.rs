// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios for the `underlay_sheet` crate.
//!
//! These exercise the public facade the way a host would: layout
//! measurements, programmatic transitions, drags and flings, interleaved
//! with frame ticks on a synthetic clock.

use underlay_sheet::{
    ChangeFlags, Detent, SheetConfig, SheetState, TransitionState, sheet_anchors,
};

fn pump(state: &mut SheetState, mut now: f64) -> f64 {
    for _ in 0..200 {
        if !state.is_animating() {
            break;
        }
        now += 16.0;
        state.on_frame(now);
    }
    now
}

fn shown(config: SheetConfig) -> (SheetState, f64) {
    let mut state = SheetState::new(config);
    state.set_container_size(1000.0);
    state.set_sheet_size(400.0);
    state.show(0.0);
    let now = pump(&mut state, 0.0);
    (state, now)
}

#[test]
fn reference_layout_produces_the_documented_anchors() {
    let mut state = SheetState::default();
    state.set_container_size(1000.0);
    state.set_sheet_size(400.0);

    let table = sheet_anchors(&state.sizes(), false);
    assert_eq!(table.offset_of(Detent::Expanded), Some(600.0));
    assert_eq!(table.offset_of(Detent::HalfExpanded), Some(800.0));
    assert_eq!(table.offset_of(Detent::Hidden), Some(1000.0));
}

#[test]
fn show_settles_at_half_expanded_then_expand_reaches_the_top_anchor() {
    let (mut state, now) = shown(SheetConfig::default());
    assert!(state.is_half_expanded());
    assert_eq!(state.require_offset(), 800.0);

    state.expand(now);
    let now = pump(&mut state, now);
    assert!(state.is_expanded());
    assert_eq!(state.require_offset(), 600.0);
    assert_eq!(state.progress(), 1.0);

    state.half_expand(now);
    let _ = pump(&mut state, now);
    assert!(state.is_half_expanded());
    assert_eq!(state.require_offset(), 800.0);
}

#[test]
fn skip_half_expanded_show_goes_straight_to_expanded() {
    let (mut state, _) = shown(SheetConfig {
        skip_half_expanded: true,
        ..SheetConfig::default()
    });
    assert!(state.is_expanded());
    assert_eq!(state.require_offset(), 600.0);
}

#[test]
fn closing_fling_from_half_expanded_hides_when_cancellable() {
    let (mut state, now) = shown(SheetConfig::default());

    state.drag_by(50.0);
    state.settle(1500.0, now).unwrap();
    let _ = pump(&mut state, now);
    assert!(state.is_hidden());
    assert_eq!(state.require_offset(), 1000.0);
    assert!(!state.is_visible());
    assert!(!state.is_visible_real());
}

#[test]
fn closing_fling_returns_to_half_expanded_when_not_cancellable() {
    let (mut state, now) = shown(SheetConfig {
        is_cancellable: false,
        ..SheetConfig::default()
    });

    state.drag_by(50.0);
    state.settle(1500.0, now).unwrap();
    let _ = pump(&mut state, now);
    assert!(state.is_half_expanded());
    assert_eq!(state.require_offset(), 800.0);
}

#[test]
fn drag_past_hidden_and_release_respects_cancellability() {
    let (mut state, now) = shown(SheetConfig {
        is_cancellable: false,
        ..SheetConfig::default()
    });

    // Visual feedback is allowed all the way to the hidden anchor.
    state.drag_by(500.0);
    assert_eq!(state.require_offset(), 1000.0);

    state.settle(0.0, now).unwrap();
    let _ = pump(&mut state, now);
    assert_ne!(state.current_value(), Detent::Hidden);
}

#[test]
fn superseding_a_hide_with_a_show_wins() {
    let (mut state, now) = shown(SheetConfig::default());

    let hide = state.hide(now).unwrap();
    state.on_frame(now + 32.0);
    let show = state.show(now + 32.0).unwrap();
    let _ = pump(&mut state, now + 32.0);

    assert_eq!(state.transition_state(hide), TransitionState::Superseded);
    assert_eq!(state.transition_state(show), TransitionState::Settled);
    assert!(state.is_half_expanded());
}

#[test]
fn anchor_recomputation_mid_animation_lands_on_the_moved_anchor() {
    let mut state = SheetState::default();
    state.set_container_size(1000.0);
    state.set_sheet_size(400.0);
    state.show(0.0);
    state.on_frame(100.0);

    // Content grows mid-animation; the half anchor moves from 800 to 750.
    state.set_sheet_size(500.0);
    let _ = pump(&mut state, 100.0);
    assert!(state.is_half_expanded());
    assert_eq!(state.require_offset(), 750.0);
}

#[test]
fn container_resize_repositions_a_settled_sheet() {
    let (mut state, _) = shown(SheetConfig::default());
    assert_eq!(state.require_offset(), 800.0);

    // Keyboard appears: the container shrinks.
    state.set_container_size(600.0);
    assert!(state.is_half_expanded());
    // New half anchor: 600 - min(600, 400) * 0.5 = 400.
    assert_eq!(state.require_offset(), 400.0);
}

#[test]
fn update_anchors_twice_changes_nothing() {
    let (mut state, _) = shown(SheetConfig::default());
    let before = state.debug_info();

    let first = state.update_anchors();
    let second = state.update_anchors();
    assert!(first.is_empty());
    assert!(second.is_empty());

    let after = state.debug_info();
    assert_eq!(after.current_value, before.current_value);
    assert_eq!(after.offset, before.offset);
}

#[test]
fn size_changes_report_flags_for_reactive_hosts() {
    let mut state = SheetState::default();
    let flags = state.set_container_size(1000.0);
    assert!(flags.contains(ChangeFlags::SIZES));

    let flags = state.set_sheet_size(400.0);
    assert!(flags.contains(ChangeFlags::SIZES));
    assert!(flags.contains(ChangeFlags::ANCHORS));

    // Reporting the same measurement again is silent.
    assert!(state.set_sheet_size(400.0).is_empty());
}

#[test]
fn hide_from_any_detent_eventually_settles_hidden() {
    for target in [Detent::HalfExpanded, Detent::Expanded] {
        let mut state = SheetState::default();
        state.set_container_size(1000.0);
        state.set_sheet_size(400.0);
        match target {
            Detent::Expanded => state.expand(0.0),
            _ => state.show(0.0),
        };
        let now = pump(&mut state, 0.0);
        assert_eq!(state.current_value(), target);

        state.hide(now);
        let _ = pump(&mut state, now);
        assert!(state.is_hidden(), "failed to hide from {target:?}");
        assert!(!state.is_visible());
    }
}

#[test]
fn recreation_restores_the_detent_and_remeasures() {
    let (mut state, now) = shown(SheetConfig::default());
    state.expand(now);
    let _ = pump(&mut state, now);

    // Process death: only the settled detent survives.
    let saved = state.save();
    let mut revived = SheetState::restore(saved, SheetConfig::default());
    assert!(revived.is_expanded());
    assert!(!revived.is_visible_real());
    assert_eq!(revived.require_offset(), 0.0);

    // Fresh measurements rebuild anchors around the restored detent.
    revived.set_container_size(1000.0);
    revived.set_sheet_size(400.0);
    assert_eq!(revived.require_offset(), 600.0);
    assert!(revived.is_expanded());
    assert!(revived.is_visible_real());
}
