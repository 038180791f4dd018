use glam::Vec3;
use smallvec::SmallVec;

/// Scene objects driven by the scroll timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneObject {
    Camera,
    Logo,
    PhraseOneLine1,
    PhraseOneLine2,
    PhraseOneLine3,
    PhraseTwoLine1,
    PhraseTwoLine2,
}

impl SceneObject {
    pub const ALL: [SceneObject; 7] = [
        SceneObject::Camera,
        SceneObject::Logo,
        SceneObject::PhraseOneLine1,
        SceneObject::PhraseOneLine2,
        SceneObject::PhraseOneLine3,
        SceneObject::PhraseTwoLine1,
        SceneObject::PhraseTwoLine2,
    ];

    /// Name the scene owner registers the object under.
    pub fn name(self) -> &'static str {
        match self {
            SceneObject::Camera => "camera",
            SceneObject::Logo => "logo",
            SceneObject::PhraseOneLine1 => "phrase1-line1",
            SceneObject::PhraseOneLine2 => "phrase1-line2",
            SceneObject::PhraseOneLine3 => "phrase1-line3",
            SceneObject::PhraseTwoLine1 => "phrase2-line1",
            SceneObject::PhraseTwoLine2 => "phrase2-line2",
        }
    }
}

/// Start and end position of one object over the whole scroll range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub object: SceneObject,
    pub start: Vec3,
    pub end: Vec3,
}

impl Track {
    pub const fn new(object: SceneObject, start: Vec3, end: Vec3) -> Self {
        Self { object, start, end }
    }

    /// Linear interpolation; exact at both ends.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        if t <= 0.0 {
            self.start
        } else if t >= 1.0 {
            self.end
        } else {
            self.start + (self.end - self.start) * t
        }
    }
}

pub const LANDING_TRACKS: [Track; 7] = [
    Track::new(
        SceneObject::Camera,
        Vec3::new(0.0, 10.0, 30.0),
        Vec3::new(0.0, 2.0, -50.0),
    ),
    Track::new(
        SceneObject::Logo,
        Vec3::new(0.0, 9.0, 15.0),
        Vec3::new(0.0, 9.0, 50.0),
    ),
    Track::new(
        SceneObject::PhraseOneLine1,
        Vec3::new(0.0, 7.0, -46.0),
        Vec3::new(0.0, 7.0, 50.0),
    ),
    Track::new(
        SceneObject::PhraseOneLine2,
        Vec3::new(0.0, 5.0, -47.0),
        Vec3::new(0.0, 5.0, 40.0),
    ),
    Track::new(
        SceneObject::PhraseOneLine3,
        Vec3::new(0.0, 2.0, -48.0),
        Vec3::new(0.0, 2.0, 35.0),
    ),
    Track::new(
        SceneObject::PhraseTwoLine1,
        Vec3::new(0.0, 5.0, -140.0),
        Vec3::new(0.0, 5.0, 20.0),
    ),
    Track::new(
        SceneObject::PhraseTwoLine2,
        Vec3::new(0.0, 0.0, -143.0),
        Vec3::new(0.0, 0.0, 15.0),
    ),
];

pub type Poses = SmallVec<[(SceneObject, Vec3); 8]>;

/// One shared scrub timeline: every track uses `percentage / 100`.
#[derive(Clone, Debug)]
pub struct ScrubTimeline {
    tracks: Vec<Track>,
}

impl ScrubTimeline {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn landing() -> Self {
        Self::new(LANDING_TRACKS.to_vec())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, object: SceneObject) -> Option<&Track> {
        self.tracks.iter().find(|t| t.object == object)
    }

    pub fn sample(&self, percentage: f32) -> Poses {
        let t = (percentage / 100.0).clamp(0.0, 1.0);
        self.tracks.iter().map(|tr| (tr.object, tr.at(t))).collect()
    }
}

/// Live transforms owned by the rendering side.
pub trait SceneTargets {
    fn is_mounted(&self, object: SceneObject) -> bool;
    fn set_position(&mut self, object: SceneObject, position: Vec3);
}

/// Writes one pose, skipping objects that are not mounted yet.
pub fn apply_pose<T: SceneTargets + ?Sized>(
    targets: &mut T,
    object: SceneObject,
    position: Vec3,
) -> bool {
    if !targets.is_mounted(object) {
        return false;
    }
    targets.set_position(object, position);
    true
}

/// Maps the scroll percentage onto the timeline once the scene is bound.
#[derive(Clone, Debug)]
pub struct SceneAnimator {
    timeline: ScrubTimeline,
    bound: bool,
    frozen: bool,
    last_percentage: Option<f32>,
}

impl SceneAnimator {
    pub fn new(timeline: ScrubTimeline) -> Self {
        Self {
            timeline,
            bound: false,
            frozen: false,
            last_percentage: None,
        }
    }

    pub fn timeline(&self) -> &ScrubTimeline {
        &self.timeline
    }

    pub fn bind(&mut self) {
        self.bound = true;
        self.last_percentage = None;
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Stop writing transforms; another writer owns the scene from now on.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Poses for `percentage`, or `None` when unbound, frozen or unchanged.
    pub fn poses(&mut self, percentage: f32) -> Option<Poses> {
        if !self.bound || self.frozen || self.last_percentage == Some(percentage) {
            return None;
        }
        self.last_percentage = Some(percentage);
        Some(self.timeline.sample(percentage))
    }

    /// Applies poses directly; returns how many objects were written.
    pub fn apply<T: SceneTargets + ?Sized>(&mut self, percentage: f32, targets: &mut T) -> usize {
        match self.poses(percentage) {
            Some(poses) => poses
                .into_iter()
                .filter(|(obj, pos)| apply_pose(targets, *obj, *pos))
                .count(),
            None => 0,
        }
    }
}
