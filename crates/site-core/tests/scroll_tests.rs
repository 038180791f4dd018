// Host-side tests for scroll percentage tracking.

use site_core::scroll::{ScrollMetrics, ScrollTracker};

#[test]
fn raw_percentage_from_metrics() {
    let m = ScrollMetrics {
        scroll_top: 500.0,
        scroll_height: 1500.0,
        client_height: 500.0,
    };
    assert_eq!(m.scrollable_height(), 1000.0);
    assert!((m.raw_percentage() - 50.0).abs() < 1e-4);
}

#[test]
fn zero_scrollable_height_yields_zero() {
    let m = ScrollMetrics {
        scroll_top: 120.0,
        scroll_height: 800.0,
        client_height: 800.0,
    };
    assert_eq!(m.raw_percentage(), 0.0);

    let mut t = ScrollTracker::new(1.0, 100.0);
    assert_eq!(t.sample_metrics(&m, 0.0), None);
    assert_eq!(t.percentage(), 0.0);
}

#[test]
fn rounds_to_whole_percent() {
    let mut t = ScrollTracker::new(1.0, 100.0);
    assert_eq!(t.sample(12.4, 1.0), Some(12.0));
    assert_eq!(t.sample(12.6, 2.0), Some(13.0));
    assert_eq!(t.sample(13.2, 3.0), None);
    assert_eq!(t.state().last_sample_time, 2.0);
}

#[test]
fn step_throttles_small_moves() {
    let mut t = ScrollTracker::new(3.0, 100.0);
    assert_eq!(t.sample(1.0, 0.0), None);
    assert_eq!(t.sample(2.0, 0.0), None);
    assert_eq!(t.sample(3.0, 0.0), Some(3.0));
    assert_eq!(t.sample(4.6, 0.0), None);
    assert_eq!(t.sample(6.0, 0.0), Some(6.0));
}

#[test]
fn clamp_bounds_are_always_published() {
    let mut t = ScrollTracker::new(3.0, 100.0);
    let mut pct = 0.0;
    while pct < 99.0 {
        pct += 3.0;
        assert_eq!(t.sample(pct, 0.0), Some(pct));
    }
    // one percent short of the end is below the step, but the end is a bound
    assert_eq!(t.sample(100.0, 0.0), Some(100.0));

    let mut t = ScrollTracker::new(3.0, 100.0);
    assert_eq!(t.sample(3.0, 0.0), Some(3.0));
    assert_eq!(t.sample(1.0, 0.0), None);
    assert_eq!(t.sample(0.0, 0.0), Some(0.0));
}

#[test]
fn percentage_never_exceeds_max() {
    let mut t = ScrollTracker::new(1.0, 65.0);
    assert_eq!(t.sample(90.0, 0.0), Some(65.0));
    assert_eq!(t.sample(80.0, 1.0), None);
    assert_eq!(t.sample(-10.0, 2.0), Some(0.0));
    for raw in [-5.0, 0.0, 33.3, 64.9, 65.0, 120.0, f32::INFINITY] {
        t.sample(raw, 3.0);
        assert!((0.0..=65.0).contains(&t.percentage()));
    }
}

#[test]
fn non_finite_samples_read_as_zero() {
    let mut t = ScrollTracker::new(1.0, 100.0);
    assert_eq!(t.sample(40.0, 0.0), Some(40.0));
    assert_eq!(t.sample(f32::NAN, 1.0), Some(0.0));
}

#[test]
fn reset_returns_to_top() {
    let mut t = ScrollTracker::new(1.0, 100.0);
    t.sample(55.0, 10.0);
    t.reset();
    assert_eq!(t.percentage(), 0.0);
    assert_eq!(t.state().last_sample_time, 0.0);
}

#[test]
fn level_is_unthrottled() {
    let mut t = ScrollTracker::new(3.0, 100.0);
    assert_eq!(t.sample(69.0, 0.0), Some(69.0));
    assert_eq!(t.sample(70.4, 1.0), None);
    assert_eq!(t.level(70.4), 70.0);
    assert_eq!(t.level(f32::NAN), 0.0);
    assert_eq!(ScrollTracker::new(1.0, 65.0).level(90.0), 65.0);
}
