// Host-side tests for zone-based cursor detection.

use site_core::zone::*;

fn page(zone: CursorZone) -> Option<Rect> {
    match zone {
        CursorZone::Home3d => Some(Rect::new(0.0, 0.0, 1000.0, 600.0)),
        CursorZone::Footer => Some(Rect::new(0.0, 500.0, 1000.0, 800.0)),
        CursorZone::Cta => Some(Rect::new(0.0, 800.0, 1000.0, 1200.0)),
        CursorZone::Default => None,
    }
}

#[test]
fn rect_edges_are_inclusive() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert!(r.contains(10.0, 20.0));
    assert!(r.contains(30.0, 40.0));
    assert!(!r.contains(30.1, 40.0));
    assert!(!r.contains(9.9, 25.0));
}

#[test]
fn single_zone_hits() {
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &page, 50.0, 100.0), CursorZone::Home3d);
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &page, 50.0, 700.0), CursorZone::Footer);
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &page, 50.0, 1000.0), CursorZone::Cta);
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &page, 50.0, 1500.0), CursorZone::Default);
}

#[test]
fn overlap_resolves_by_priority() {
    // 550 is inside both the 3d container and the footer
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &page, 50.0, 550.0), CursorZone::Home3d);
    // the shared edge at 800 belongs to the footer
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &page, 50.0, 800.0), CursorZone::Footer);
}

#[test]
fn missing_regions_fall_back_to_default() {
    let empty = |_: CursorZone| -> Option<Rect> { None };
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &empty, 1.0, 1.0), CursorZone::Default);
}

#[test]
fn cursor_reports_changes_and_tracked_positions() {
    let mut c = ZoneCursor::default();
    assert_eq!(c.zone(), CursorZone::Default);

    let u = c.on_move(50.0, 1500.0, &page);
    assert_eq!(u.zone_changed, None);
    assert_eq!(u.position, Some((50.0, 1500.0)));
    assert!(c.zone().shows_crosshair());

    let u = c.on_move(50.0, 700.0, &page);
    assert_eq!(u.zone_changed, Some(CursorZone::Footer));
    assert_eq!(u.position, Some((50.0, 700.0)));
    assert!(c.zone().shows_crosshair());

    let u = c.on_move(50.0, 710.0, &page);
    assert_eq!(u.zone_changed, None);

    let u = c.on_move(50.0, 1000.0, &page);
    assert_eq!(u.zone_changed, Some(CursorZone::Cta));
    assert_eq!(u.position, None);

    let u = c.on_move(50.0, 100.0, &page);
    assert_eq!(u.zone_changed, Some(CursorZone::Home3d));
    assert_eq!(u.position, None);
}

#[test]
fn leaving_resets_to_default() {
    let mut c = ZoneCursor::default();
    assert_eq!(c.on_leave(), None);
    c.on_move(50.0, 1000.0, &page);
    assert_eq!(c.on_leave(), Some(CursorZone::Default));
    assert_eq!(c.zone(), CursorZone::Default);
}

#[test]
fn reduced_priority_ignores_other_zones() {
    let mut c = ZoneCursor::with_priority(&[CursorZone::Footer]);
    let u = c.on_move(50.0, 100.0, &page);
    assert_eq!(u.zone_changed, None);
    assert_eq!(c.zone(), CursorZone::Default);
}

#[test]
fn crosshair_shows_outside_home3d_and_cta() {
    for z in [CursorZone::Default, CursorZone::Footer] {
        assert!(z.shows_crosshair(), "{}", z.as_str());
    }
    for z in [CursorZone::Cta, CursorZone::Home3d] {
        assert!(!z.shows_crosshair(), "{}", z.as_str());
    }
    assert_eq!(CursorZone::Home3d.element_id(), Some("homepage-scroll-container"));
    assert_eq!(CursorZone::Default.element_id(), None);
}

#[test]
fn collapsed_region_does_not_capture_the_corner() {
    // a hidden container measures as an empty rect at the origin
    let hidden = |z: CursorZone| match z {
        CursorZone::Home3d => Some(Rect::default()),
        other => page(other),
    };
    assert!(Rect::default().is_empty());
    assert!(!Rect::default().contains(0.0, 0.0));
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &hidden, 0.0, 0.0), CursorZone::Default);
    assert_eq!(detect_zone(&CursorZone::PRIORITY, &hidden, 50.0, 700.0), CursorZone::Footer);
}
