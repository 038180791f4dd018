// Host-side scenario tests for the HomePage director, driven by a fake clock.

use glam::Vec3;
use site_core::audio::Track;
use site_core::config::PageConfig;
use site_core::device::{DeviceType, PerformanceProfile};
use site_core::director::{HomeDirector, PageCommand};
use site_core::registry::EffectRegistry;
use site_core::timeline::SceneObject;
use site_core::SiteError;

const FRAME_MS: f64 = 16.0;

fn standalone(reg: &EffectRegistry) -> HomeDirector {
    HomeDirector::mount(PageConfig::default(), reg).unwrap()
}

fn embedded(reg: &EffectRegistry, max: f32) -> HomeDirector {
    let config = PageConfig {
        embedded: true,
        max_scroll_percentage: max,
        ..PageConfig::default()
    };
    HomeDirector::mount(config, reg).unwrap()
}

fn count(log: &[(f64, PageCommand)], pred: impl Fn(&PageCommand) -> bool) -> usize {
    log.iter().filter(|(_, c)| pred(c)).count()
}

#[test]
fn full_scroll_glitches_once_opens_portal_once_and_navigates_on_completion() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.bind_scene(&mut out);
    out.clear();

    let mut log: Vec<(f64, PageCommand)> = Vec::new();
    let mut glitch_at = None;
    let mut portal_at = None;
    let mut now = 0.0;
    for pct in 0..=100 {
        now += FRAME_MS;
        d.on_scroll(pct as f32, now, &mut out);
        for c in &out {
            match c {
                PageCommand::SetGlitch(true) => glitch_at = Some((pct, now)),
                PageCommand::SetTransitioning(true) => portal_at = Some((pct, now)),
                _ => {}
            }
        }
        d.tick(now, &mut out);
        log.extend(out.drain(..).map(|c| (now, c)));
    }

    let (glitch_pct, _) = glitch_at.unwrap();
    let (portal_pct, portal_ms) = portal_at.unwrap();
    assert_eq!(glitch_pct, 68);
    assert_eq!(portal_pct, 70);
    assert_eq!(count(&log, |c| *c == PageCommand::SetGlitch(true)), 1);
    assert_eq!(count(&log, |c| *c == PageCommand::SetTransitioning(true)), 1);
    assert_eq!(count(&log, |c| *c == PageCommand::PlayAudio(Track::Transition)), 1);
    assert!(d.is_transitioning());
    assert!(d.needs_frames());

    d.tick(portal_ms + 1999.0, &mut out);
    assert!(!out.iter().any(|c| matches!(c, PageCommand::Navigate(_))));
    // the glitch flag clears once its animation is over
    assert!(out.contains(&PageCommand::SetGlitch(false)));
    assert_eq!(count(&log, |c| *c == PageCommand::SetGlitch(false)), 0);
    out.clear();

    d.tick(portal_ms + 2000.0, &mut out);
    assert!(out.contains(&PageCommand::Navigate("/rebecca")));
    assert!(out
        .iter()
        .any(|c| matches!(c, PageCommand::ApplyPortal(f) if f.complete)));
    assert!(d.has_navigated());
    out.clear();

    d.tick(portal_ms + 2100.0, &mut out);
    d.on_scroll(50.0, portal_ms + 2100.0, &mut out);
    assert!(out.is_empty());
    assert!(!d.needs_frames());
}

#[test]
fn portal_freezes_the_scroll_animation() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.bind_scene(&mut out);
    d.on_scroll(72.0, 0.0, &mut out);
    out.clear();

    d.on_scroll(80.0, 10.0, &mut out);
    assert!(!out
        .iter()
        .any(|c| matches!(c, PageCommand::SetTransform { .. })));
}

#[test]
fn portal_starts_from_the_last_camera_depth() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.bind_scene(&mut out);
    d.on_scroll(75.0, 100.0, &mut out);
    out.clear();

    d.tick(100.0, &mut out);
    let frame = out
        .iter()
        .find_map(|c| match c {
            PageCommand::ApplyPortal(f) => Some(*f),
            _ => None,
        })
        .unwrap();
    // 30 + (-50 - 30) * 0.75
    assert!((frame.camera_z - -30.0).abs() < 1e-4);
}

#[test]
fn binding_applies_the_current_pose() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();

    d.on_scroll(10.0, 0.0, &mut out);
    assert!(!out
        .iter()
        .any(|c| matches!(c, PageCommand::SetTransform { .. })));
    out.clear();

    d.bind_scene(&mut out);
    assert!(d.is_scene_bound());
    assert_eq!(out.len(), SceneObject::ALL.len());
    let camera = out
        .iter()
        .find_map(|c| match c {
            PageCommand::SetTransform {
                object: SceneObject::Camera,
                position,
            } => Some(*position),
            _ => None,
        })
        .unwrap();
    assert!((camera - Vec3::new(0.0, 9.2, 22.0)).length() < 1e-4);

    out.clear();
    d.bind_scene(&mut out);
    assert!(out.is_empty());
}

#[test]
fn text_fades_only_report_changes() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();

    d.on_scroll(10.0, 0.0, &mut out);
    assert!(out.contains(&PageCommand::SetTextOpacity { line: 0, opacity: 0.0 }));
    out.clear();

    d.on_scroll(20.0, 1.0, &mut out);
    assert!(!out
        .iter()
        .any(|c| matches!(c, PageCommand::SetTextOpacity { .. })));

    d.on_scroll(50.0, 2.0, &mut out);
    assert!(out.contains(&PageCommand::SetTextOpacity { line: 0, opacity: 0.5 }));
}

#[test]
fn ambient_sound_waits_for_a_successful_play() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();

    d.on_scroll(5.0, 0.0, &mut out);
    assert_eq!(count_play(&out), 1);
    out.clear();

    // still pending: no second attempt
    d.on_scroll(8.0, 1.0, &mut out);
    d.on_interaction(&mut out);
    assert_eq!(count_play(&out), 0);

    d.on_play_result(Track::Ambient, false, &mut out);
    assert!(!out.contains(&PageCommand::DetachInteractionListeners));
    assert!(d.ambient_gate().listeners_attached());

    d.on_interaction(&mut out);
    assert_eq!(count_play(&out), 1);
    d.on_play_result(Track::Ambient, true, &mut out);
    assert!(out.contains(&PageCommand::DetachInteractionListeners));
    assert!(d.ambient_gate().is_started());
}

fn count_play(out: &[PageCommand]) -> usize {
    out.iter()
        .filter(|c| **c == PageCommand::PlayAudio(Track::Ambient))
        .count()
}

#[test]
fn rejected_transition_sound_does_not_stop_the_portal() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.on_scroll(70.0, 0.0, &mut out);
    d.on_play_result(Track::Transition, false, &mut out);
    assert!(d.is_transitioning());
    out.clear();
    d.tick(2000.0, &mut out);
    assert!(out.contains(&PageCommand::Navigate("/rebecca")));
}

#[test]
fn unmount_mid_scroll_stops_everything() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.bind_scene(&mut out);
    for pct in 0..=45 {
        d.on_scroll(pct as f32, pct as f64 * FRAME_MS, &mut out);
    }
    d.on_play_result(Track::Ambient, true, &mut out);
    out.clear();

    d.unmount(&mut out);
    assert!(out.contains(&PageCommand::PauseAudio(Track::Ambient)));
    assert!(out.contains(&PageCommand::ReleaseAudio(Track::Ambient)));
    assert!(!out.iter().any(|c| matches!(
        c,
        PageCommand::PauseAudio(Track::Transition) | PageCommand::ReleaseAudio(Track::Transition)
    )));
    assert!(!d.is_mounted());
    assert!(!d.needs_frames());
    out.clear();

    for pct in 46..=100 {
        let now = pct as f64 * FRAME_MS;
        d.on_scroll(pct as f32, now, &mut out);
        d.tick(now, &mut out);
    }
    d.on_interaction(&mut out);
    d.unmount(&mut out);
    assert!(out.is_empty());
}

#[test]
fn unmount_before_audio_started_detaches_listeners() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.unmount(&mut out);
    assert_eq!(
        out,
        vec![
            PageCommand::DetachInteractionListeners,
            PageCommand::ReleaseAudio(Track::Ambient),
        ]
    );
}

#[test]
fn second_mount_is_refused_while_the_first_lives() {
    let reg = EffectRegistry::default();
    let first = standalone(&reg);
    assert_eq!(
        HomeDirector::mount(PageConfig::default(), &reg).err(),
        Some(SiteError::EffectBusy("homepage"))
    );
    // the embedded variant is a separate page
    let _embedded = embedded(&reg, 65.0);
    drop(first);
    assert!(HomeDirector::mount(PageConfig::default(), &reg).is_ok());
}

#[test]
fn embedded_page_clamps_and_never_opens_the_portal() {
    let reg = EffectRegistry::default();
    let mut d = embedded(&reg, 65.0);
    let mut out = Vec::new();
    for pct in 0..=100 {
        d.on_scroll(pct as f32, pct as f64, &mut out);
        d.tick(pct as f64, &mut out);
    }
    assert_eq!(d.percentage(), 65.0);
    assert!(!out.iter().any(|c| matches!(
        c,
        PageCommand::SetGlitch(_) | PageCommand::SetTransitioning(_) | PageCommand::Navigate(_)
    )));
}

#[test]
fn embedded_page_with_headroom_glitches_at_sixty() {
    let reg = EffectRegistry::default();
    let mut d = embedded(&reg, 80.0);
    let mut out = Vec::new();
    let mut glitch_pct = Vec::new();
    for pct in 0..=100 {
        d.on_scroll(pct as f32, pct as f64, &mut out);
        if out.contains(&PageCommand::SetGlitch(true)) {
            glitch_pct.push(pct);
        }
        out.clear();
    }
    assert_eq!(glitch_pct, vec![60]);
    assert!(!d.is_transitioning());
    assert_eq!(d.percentage(), 80.0);
}

#[test]
fn coarse_mobile_steps_still_open_the_portal() {
    let reg = EffectRegistry::default();
    let config = PageConfig {
        profile: PerformanceProfile::for_device(DeviceType::Mobile, false),
        ..PageConfig::default()
    };
    let mut d = HomeDirector::mount(config, &reg).unwrap();
    let mut out = Vec::new();
    d.bind_scene(&mut out);

    let mut log = Vec::new();
    for pct in 0..=71 {
        d.on_scroll(pct as f32, pct as f64 * FRAME_MS, &mut out);
        log.extend(out.drain(..).map(|c| (pct as f64, c)));
    }
    // 3% steps publish 69 and then nothing until 72
    assert_eq!(d.percentage(), 69.0);
    assert_eq!(count(&log, |c| *c == PageCommand::SetGlitch(true)), 1);
    assert_eq!(count(&log, |c| *c == PageCommand::SetTransitioning(true)), 1);
    assert!(d.is_transitioning());
}

#[test]
fn portal_end_is_a_deadline_that_needs_no_frames() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    assert_eq!(d.next_deadline(), None);

    // a jump to 70 sweeps the glitch band as well
    d.on_scroll(70.0, 500.0, &mut out);
    assert_eq!(d.next_deadline(), Some(1100.0));
    d.tick(1100.0, &mut out);
    assert!(out.contains(&PageCommand::SetGlitch(false)));
    assert_eq!(d.next_deadline(), Some(2500.0));
    out.clear();

    // one late tick, as from a background timer, finishes the sequence
    d.tick(2500.0, &mut out);
    assert!(out.contains(&PageCommand::Navigate("/rebecca")));
    assert_eq!(d.next_deadline(), None);
}

#[test]
fn no_deadline_after_unmount() {
    let reg = EffectRegistry::default();
    let mut d = standalone(&reg);
    let mut out = Vec::new();
    d.on_scroll(70.0, 0.0, &mut out);
    assert!(d.next_deadline().is_some());
    d.unmount(&mut out);
    assert_eq!(d.next_deadline(), None);
}
