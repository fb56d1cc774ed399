// Copyright 2025 the Underlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios for the `underlay_overlay` crate: back-press
//! routing, exit-animation teardown, scrim fading, and lifecycle handling.

use underlay_overlay::{OverlayManager, SheetEntry, SheetId};
use underlay_sheet::{Detent, SheetConfig, SheetState, TransitionState};

fn measured(config: SheetConfig) -> SheetState {
    let mut state = SheetState::new(config);
    state.set_container_size(1000.0);
    state.set_sheet_size(400.0);
    state
}

// Runs a fixed stretch of frames, long enough for any snap and scrim fade
// to complete.
fn pump(manager: &mut OverlayManager<&'static str>, mut now: f64) -> f64 {
    for _ in 0..60 {
        now += 16.0;
        manager.on_frame(now);
    }
    now
}

fn shown(
    manager: &mut OverlayManager<&'static str>,
    config: SheetConfig,
    label: &'static str,
) -> SheetId {
    let id = manager.register(SheetEntry::new(measured(config), label));
    manager.sheet_mut(id).unwrap().show(0.0);
    id
}

#[test]
fn back_press_dismisses_the_topmost_presented_sheet() {
    let mut manager = OverlayManager::new();
    let lower = shown(&mut manager, SheetConfig::default(), "lower");
    let upper = shown(&mut manager, SheetConfig::default(), "upper");
    let now = pump(&mut manager, 0.0);

    let id = manager.on_back_pressed(now).unwrap();
    let now = pump(&mut manager, now);

    assert_eq!(
        manager.sheet(upper).unwrap().transition_state(id),
        TransitionState::Settled
    );
    assert!(manager.sheet(upper).unwrap().is_hidden());
    assert!(manager.sheet(lower).unwrap().is_visible());

    // The next press reaches the sheet below.
    manager.on_back_pressed(now).unwrap();
    let _ = pump(&mut manager, now);
    assert!(manager.sheet(lower).unwrap().is_hidden());
}

#[test]
fn back_press_falls_through_pinned_sheets() {
    let mut manager = OverlayManager::new();
    let lower = shown(&mut manager, SheetConfig::default(), "lower");
    let pinned = shown(
        &mut manager,
        SheetConfig {
            is_cancellable: false,
            ..SheetConfig::default()
        },
        "pinned",
    );
    let now = pump(&mut manager, 0.0);

    manager.on_back_pressed(now).unwrap();
    let _ = pump(&mut manager, now);
    assert!(manager.sheet(pinned).unwrap().is_visible());
    assert!(manager.sheet(lower).unwrap().is_hidden());
}

#[test]
fn back_press_skips_sheets_registered_without_back_handling() {
    let mut manager = OverlayManager::new();
    let id = manager.register(
        SheetEntry::new(measured(SheetConfig::default()), "no-back").with_close_on_back(false),
    );
    manager.sheet_mut(id).unwrap().show(0.0);
    let now = pump(&mut manager, 0.0);

    assert_eq!(manager.on_back_pressed(now), None);
    assert!(manager.sheet(id).unwrap().is_visible());
}

#[test]
fn back_press_with_nothing_presented_is_ignored() {
    let mut manager = OverlayManager::new();
    let _hidden = manager.register(SheetEntry::new(measured(SheetConfig::default()), "idle"));
    assert_eq!(manager.on_back_pressed(0.0), None);
}

#[test]
fn content_survives_the_exit_animation() {
    let mut manager = OverlayManager::new();
    let id = shown(&mut manager, SheetConfig::default(), "sheet");
    let now = pump(&mut manager, 0.0);

    manager.sheet_mut(id).unwrap().hide(now);
    manager.on_frame(now + 32.0);

    // Mid-hide: the detent intent is gone, pixels are not.
    let render = manager.iter().next().unwrap();
    assert_eq!(render.entry.state.target_value(), Detent::Hidden);
    assert!(render.entry.state.is_visible_real());
    assert!(render.content_mounted);

    let _ = pump(&mut manager, now + 32.0);
    let render = manager.iter().next().unwrap();
    assert!(!render.entry.state.is_visible_real());
    assert!(!render.content_mounted);
}

#[test]
fn always_composed_content_stays_mounted_while_hidden() {
    let mut manager = OverlayManager::new();
    let id = shown(
        &mut manager,
        SheetConfig {
            always_compose_content: true,
            ..SheetConfig::default()
        },
        "sticky",
    );
    let now = pump(&mut manager, 0.0);

    manager.sheet_mut(id).unwrap().hide(now);
    let _ = pump(&mut manager, now);
    let render = manager.iter().next().unwrap();
    assert!(render.entry.state.is_hidden());
    assert!(render.content_mounted);
}

#[test]
fn scrim_fades_in_with_the_show_and_out_with_the_hide() {
    let mut manager = OverlayManager::new();
    let id = shown(&mut manager, SheetConfig::default(), "sheet");

    manager.on_frame(16.0);
    let at_start = manager.iter().next().unwrap().scrim_alpha;
    manager.on_frame(166.0);
    let mid = manager.iter().next().unwrap().scrim_alpha;
    assert!(mid > at_start, "scrim did not fade in: {at_start} -> {mid}");

    let now = pump(&mut manager, 166.0);
    assert_eq!(manager.iter().next().unwrap().scrim_alpha, 1.0);

    manager.sheet_mut(id).unwrap().hide(now);
    let _ = pump(&mut manager, now);
    assert_eq!(manager.iter().next().unwrap().scrim_alpha, 0.0);
}

#[test]
fn lifecycle_stop_freezes_the_overlay_and_resume_restores_it() {
    let mut manager = OverlayManager::new();
    let id = shown(&mut manager, SheetConfig::default(), "sheet");
    manager.on_frame(100.0);
    assert!(manager.sheet(id).unwrap().is_animating());

    manager.on_lifecycle_stop();
    let render = manager.iter().next().unwrap();
    assert!(!render.entry.state.is_animating());
    assert!(!render.content_mounted);
    assert_eq!(render.scrim_alpha, 0.0);

    // The detent intent survives suspension.
    assert_eq!(manager.sheet(id).unwrap().target_value(), Detent::HalfExpanded);

    manager.on_lifecycle_resume();
    let render = manager.iter().next().unwrap();
    assert!(render.content_mounted);
}

#[test]
fn deregister_mid_animation_cancels_the_motion() {
    let mut manager = OverlayManager::new();
    let id = shown(&mut manager, SheetConfig::default(), "sheet");
    manager.on_frame(100.0);

    let entry = manager.deregister(id).unwrap();
    assert!(!entry.state.is_animating());
    assert!(manager.is_empty());
}
