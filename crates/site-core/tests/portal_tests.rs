// Host-side tests for the portal transition sequence.

use site_core::constants::PORTAL_DURATION_SEC;
use site_core::portal::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn every_tween_ends_within_the_sequence() {
    for tw in PORTAL_TWEENS {
        assert!(
            tw.end() <= PORTAL_DURATION_SEC + 1e-4,
            "{:?} ends at {}",
            tw.channel,
            tw.end()
        );
    }
}

#[test]
fn completes_exactly_once_at_two_seconds() {
    let mut seq = PortalSequencer::default();
    assert_eq!(seq.total_ms(), 2000.0);
    assert!(seq.advance(0.0).is_none());

    assert!(seq.begin(1000.0, -20.0));
    assert!(!seq.begin(1100.0, -20.0));
    assert!(seq.is_running());

    let step = seq.advance(2999.0).unwrap();
    assert!(!step.just_completed);
    assert!(!step.frame.complete);

    let step = seq.advance(3000.0).unwrap();
    assert!(step.just_completed);
    assert!(step.frame.complete);
    assert!(seq.is_complete());
    assert!(!seq.is_running());

    assert!(seq.advance(3001.0).is_none());
    assert!(seq.advance(9000.0).is_none());
}

#[test]
fn starts_from_the_current_camera_depth() {
    let mut seq = PortalSequencer::default();
    seq.begin(0.0, -12.5);
    let step = seq.advance(0.0).unwrap();
    assert_eq!(step.frame, PortalFrame::resting(-12.5));
}

#[test]
fn final_frame_reaches_every_target() {
    let mut seq = PortalSequencer::default();
    seq.begin(0.0, 10.0);
    let f = seq.advance(2500.0).unwrap().frame;
    assert!(close(f.camera_z, -300.0));
    assert!(close(f.scene_scale, 0.02));
    assert!(close(f.rotation_z, std::f32::consts::PI * 2.0));
    assert!(close(f.rotation_x, std::f32::consts::PI * 0.3));
    assert!(close(f.brightness, 400.0));
    assert!(close(f.contrast, 300.0));
    assert!(close(f.blur_px, 2.0));
    assert!(close(f.opacity, 0.0));
}

#[test]
fn camera_dives_monotonically() {
    let mut seq = PortalSequencer::default();
    seq.begin(0.0, 0.0);
    let mut prev = 0.0;
    for ms in (0..2000).step_by(50) {
        let z = seq.advance(ms as f64).unwrap().frame.camera_z;
        assert!(z <= prev + 1e-4, "camera moved back at {}ms", ms);
        prev = z;
    }
}

#[test]
fn filter_at_rest_is_neutral() {
    assert_eq!(
        PortalFrame::resting(0.0).filter_css(),
        "brightness(100%) contrast(100%) blur(0.00px)"
    );
}

#[test]
fn easing_endpoints() {
    for ease in [Ease::Linear, Ease::PowerIn(2), Ease::PowerIn(4), Ease::PowerOut(3)] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
    assert!(Ease::PowerIn(2).apply(0.5) < 0.5);
    assert!(Ease::PowerOut(3).apply(0.5) > 0.5);
}
