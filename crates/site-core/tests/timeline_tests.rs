// Host-side tests for the scroll-scrubbed scene timeline.

use glam::Vec3;
use site_core::timeline::*;
use std::collections::HashMap;

#[derive(Default)]
struct SpyScene {
    mounted: Vec<SceneObject>,
    positions: HashMap<SceneObject, Vec3>,
    writes: usize,
}

impl SpyScene {
    fn with_all() -> Self {
        Self {
            mounted: SceneObject::ALL.to_vec(),
            ..Default::default()
        }
    }
}

impl SceneTargets for SpyScene {
    fn is_mounted(&self, object: SceneObject) -> bool {
        self.mounted.contains(&object)
    }

    fn set_position(&mut self, object: SceneObject, position: Vec3) {
        self.positions.insert(object, position);
        self.writes += 1;
    }
}

#[test]
fn landing_timeline_covers_every_object() {
    let tl = ScrubTimeline::landing();
    for obj in SceneObject::ALL {
        assert!(tl.track(obj).is_some(), "missing track for {}", obj.name());
    }
}

#[test]
fn exact_keyframes_at_both_ends() {
    let tl = ScrubTimeline::landing();
    for (obj, pos) in tl.sample(0.0) {
        assert_eq!(pos, tl.track(obj).unwrap().start);
    }
    for (obj, pos) in tl.sample(100.0) {
        assert_eq!(pos, tl.track(obj).unwrap().end);
    }
    let cam = tl.track(SceneObject::Camera).unwrap();
    assert_eq!(cam.start, Vec3::new(0.0, 10.0, 30.0));
    assert_eq!(cam.end, Vec3::new(0.0, 2.0, -50.0));
}

#[test]
fn midpoint_is_linear() {
    let tl = ScrubTimeline::landing();
    let poses = tl.sample(50.0);
    let cam = poses
        .iter()
        .find(|(o, _)| *o == SceneObject::Camera)
        .map(|(_, p)| *p)
        .unwrap();
    assert!((cam - Vec3::new(0.0, 6.0, -10.0)).length() < 1e-5);

    let line = poses
        .iter()
        .find(|(o, _)| *o == SceneObject::PhraseTwoLine1)
        .map(|(_, p)| *p)
        .unwrap();
    assert!((line.z - -60.0).abs() < 1e-4);
}

#[test]
fn out_of_range_percentages_clamp() {
    let tl = ScrubTimeline::landing();
    assert_eq!(tl.sample(-20.0), tl.sample(0.0));
    assert_eq!(tl.sample(140.0), tl.sample(100.0));
}

#[test]
fn unbound_animator_writes_nothing() {
    let mut anim = SceneAnimator::new(ScrubTimeline::landing());
    let mut scene = SpyScene::with_all();
    assert_eq!(anim.apply(30.0, &mut scene), 0);
    assert!(scene.positions.is_empty());
}

#[test]
fn unmounted_objects_are_skipped() {
    let mut anim = SceneAnimator::new(ScrubTimeline::landing());
    anim.bind();
    let mut scene = SpyScene {
        mounted: vec![SceneObject::Camera, SceneObject::Logo],
        ..Default::default()
    };
    assert_eq!(anim.apply(100.0, &mut scene), 2);
    assert_eq!(
        scene.positions.get(&SceneObject::Logo),
        Some(&Vec3::new(0.0, 9.0, 50.0))
    );
    assert!(!scene.positions.contains_key(&SceneObject::PhraseOneLine1));
}

#[test]
fn unchanged_percentage_is_not_rewritten() {
    let mut anim = SceneAnimator::new(ScrubTimeline::landing());
    anim.bind();
    let mut scene = SpyScene::with_all();
    assert_eq!(anim.apply(10.0, &mut scene), 7);
    assert_eq!(anim.apply(10.0, &mut scene), 0);
    assert_eq!(anim.apply(11.0, &mut scene), 7);
    assert_eq!(scene.writes, 14);
}

#[test]
fn frozen_animator_leaves_scene_alone() {
    let mut anim = SceneAnimator::new(ScrubTimeline::landing());
    anim.bind();
    anim.freeze();
    assert!(anim.is_frozen());
    assert!(anim.poses(80.0).is_none());
}
