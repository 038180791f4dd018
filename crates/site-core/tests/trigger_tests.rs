// Host-side tests for one-shot scroll thresholds.

use site_core::trigger::*;

fn sweep(watcher: &mut ThresholdWatcher, values: impl IntoIterator<Item = f32>) -> Vec<(f32, TriggerEffect)> {
    let mut fired = Vec::new();
    for v in values {
        for e in watcher.observe(v) {
            fired.push((v, e));
        }
    }
    fired
}

#[test]
fn single_steps_fire_glitch_then_portal_once() {
    let mut w = ThresholdWatcher::standalone();
    let fired = sweep(&mut w, (0..=100).map(|p| p as f32));
    assert_eq!(
        fired,
        vec![(68.0, TriggerEffect::Glitch), (70.0, TriggerEffect::Portal)]
    );
    assert!(w.flags().glitch_triggered);
    assert!(w.flags().portal_triggered);
}

#[test]
fn throttled_jump_over_the_band_still_fires() {
    let mut w = ThresholdWatcher::standalone();
    let fired = sweep(&mut w, [63.0, 66.0, 72.0]);
    assert_eq!(
        fired,
        vec![(72.0, TriggerEffect::Glitch), (72.0, TriggerEffect::Portal)]
    );
}

#[test]
fn reentering_the_band_does_not_refire() {
    let mut w = ThresholdWatcher::standalone();
    let up: Vec<f32> = (0..=69).map(|p| p as f32).collect();
    let down: Vec<f32> = (60..=68).rev().map(|p| p as f32).collect();
    assert_eq!(sweep(&mut w, up.clone()).len(), 1);
    assert!(sweep(&mut w, down).is_empty());
    assert!(sweep(&mut w, up).is_empty());
}

#[test]
fn scrolling_back_into_the_band_from_above_fires() {
    let w = Threshold::new(68.0, 70.0, TriggerEffect::Glitch);
    assert!(w.crossed(75.0, 69.0));
    assert!(w.crossed(75.0, 60.0));
    assert!(!w.crossed(75.0, 70.0));
    assert!(!w.crossed(50.0, 67.0));
}

#[test]
fn band_is_half_open() {
    let th = Threshold::new(68.0, 70.0, TriggerEffect::Glitch);
    assert!(th.contains(68.0));
    assert!(th.contains(69.9));
    assert!(!th.contains(70.0));
    assert!(!th.contains(67.9));
}

#[test]
fn latch_only_once() {
    let mut flags = TriggerFlags::default();
    assert!(flags.latch(TriggerEffect::Portal));
    assert!(!flags.latch(TriggerEffect::Portal));
    assert!(flags.is_set(TriggerEffect::Portal));
    assert!(!flags.is_set(TriggerEffect::Glitch));
}

#[test]
fn embedded_never_opens_the_portal() {
    let mut w = ThresholdWatcher::embedded(80.0);
    let fired = sweep(&mut w, (0..=80).map(|p| p as f32));
    assert_eq!(fired, vec![(60.0, TriggerEffect::Glitch)]);
}

#[test]
fn embedded_at_default_clamp_has_no_glitch() {
    let mut w = ThresholdWatcher::embedded(65.0);
    assert!(w.thresholds().is_empty());
    assert!(sweep(&mut w, (0..=65).map(|p| p as f32)).is_empty());
}
