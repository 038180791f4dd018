//! HomePage orchestration.
//!
//! `HomeDirector` owns every piece of HomePage state and turns timestamped
//! inputs (scroll samples, user gestures, play results, frame ticks) into a
//! list of [`PageCommand`]s. The web shell executes the commands; nothing in
//! here touches the DOM, so the whole flow runs on the host with a fake clock.

use crate::audio::{AudioGate, Track};
use crate::config::PageConfig;
use crate::constants::{GLITCH_DURATION_MS, PORTAL_DESTINATION};
use crate::error::SiteError;
use crate::portal::{PortalFrame, PortalSequencer};
use crate::registry::{EffectLease, EffectRegistry};
use crate::reveal::phrase_two_opacity;
use crate::scroll::ScrollTracker;
use crate::timeline::{SceneAnimator, SceneObject, ScrubTimeline};
use crate::trigger::{ThresholdWatcher, TriggerEffect};
use glam::Vec3;

pub const HOME_EFFECT: &str = "homepage";
pub const EMBEDDED_HOME_EFFECT: &str = "homepage-embedded";

#[derive(Clone, Debug, PartialEq)]
pub enum PageCommand {
    SetTransform { object: SceneObject, position: Vec3 },
    /// Opacity of one line of the second phrase, `0.0..=1.0`.
    SetTextOpacity { line: usize, opacity: f32 },
    SetGlitch(bool),
    SetTransitioning(bool),
    PlayAudio(Track),
    PauseAudio(Track),
    ReleaseAudio(Track),
    DetachInteractionListeners,
    ApplyPortal(PortalFrame),
    Navigate(&'static str),
}

pub struct HomeDirector {
    config: PageConfig,
    tracker: ScrollTracker,
    animator: SceneAnimator,
    watcher: ThresholdWatcher,
    portal: PortalSequencer,
    ambient: AudioGate,
    glitch_off_at: Option<f64>,
    camera_z: f32,
    text_opacity: Option<[f32; 2]>,
    navigated: bool,
    mounted: bool,
    _lease: EffectLease,
}

impl HomeDirector {
    /// Claims the page in `registry`; a second live HomePage of the same kind
    /// is refused.
    pub fn mount(config: PageConfig, registry: &EffectRegistry) -> Result<Self, SiteError> {
        let name = if config.embedded {
            EMBEDDED_HOME_EFFECT
        } else {
            HOME_EFFECT
        };
        let lease = registry.acquire(name).ok_or(SiteError::EffectBusy(name))?;
        let watcher = if config.embedded {
            ThresholdWatcher::embedded(config.max_scroll_percentage)
        } else {
            ThresholdWatcher::standalone()
        };
        let timeline = ScrubTimeline::landing();
        let camera_z = timeline
            .track(SceneObject::Camera)
            .map(|t| t.start.z)
            .unwrap_or_default();
        log::info!(
            "[home] mounted (embedded: {}, max: {}%, step: {})",
            config.embedded,
            config.max_scroll_percentage,
            config.profile.scroll_step
        );
        Ok(Self {
            tracker: ScrollTracker::new(config.profile.scroll_step, config.max_scroll_percentage),
            animator: SceneAnimator::new(timeline),
            watcher,
            portal: PortalSequencer::default(),
            ambient: AudioGate::default(),
            glitch_off_at: None,
            camera_z,
            text_opacity: None,
            navigated: false,
            mounted: true,
            _lease: lease,
            config,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[inline]
    pub fn percentage(&self) -> f32 {
        self.tracker.percentage()
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[inline]
    pub fn is_scene_bound(&self) -> bool {
        self.animator.is_bound()
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.portal.is_running()
    }

    #[inline]
    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    pub fn ambient_gate(&self) -> &AudioGate {
        &self.ambient
    }

    /// True while a timer or the portal needs `tick` every frame.
    pub fn needs_frames(&self) -> bool {
        self.mounted && (self.glitch_off_at.is_some() || self.portal.is_running())
    }

    /// Earliest time `tick` has work to do without any frame in between:
    /// the glitch reset or the end of the portal.
    pub fn next_deadline(&self) -> Option<f64> {
        if !self.mounted {
            return None;
        }
        match (self.glitch_off_at, self.portal.ends_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// The scene signalled readiness: start driving it from the current
    /// percentage.
    pub fn bind_scene(&mut self, out: &mut Vec<PageCommand>) {
        if !self.mounted || self.animator.is_bound() {
            return;
        }
        self.animator.bind();
        log::info!("[home] scene bound at {}%", self.tracker.percentage());
        self.emit_poses(self.tracker.percentage(), out);
    }

    /// Publishes throttled poses and fades. Thresholds see every event's
    /// level, so a scroll that stops between two published steps still fires.
    pub fn on_scroll(&mut self, raw_percentage: f32, now_ms: f64, out: &mut Vec<PageCommand>) {
        if !self.mounted || self.navigated {
            return;
        }
        let level = self.tracker.level(raw_percentage);
        if let Some(pct) = self.tracker.sample(raw_percentage, now_ms) {
            log::debug!("[home] scroll {}%", pct);
            if pct > 0.0 {
                self.request_ambient(out);
            }
            self.emit_text_opacity(pct, out);
            self.emit_poses(pct, out);
        }

        for effect in self.watcher.observe(level) {
            match effect {
                TriggerEffect::Glitch => {
                    log::info!("[home] glitch at {}%", level);
                    self.glitch_off_at = Some(now_ms + GLITCH_DURATION_MS);
                    out.push(PageCommand::SetGlitch(true));
                }
                TriggerEffect::Portal => self.open_portal(now_ms, out),
            }
        }
    }

    /// First user gesture (mousedown, keydown, touchstart).
    pub fn on_interaction(&mut self, out: &mut Vec<PageCommand>) {
        if self.mounted {
            self.request_ambient(out);
        }
    }

    /// Outcome of a `PlayAudio` command.
    pub fn on_play_result(&mut self, track: Track, ok: bool, out: &mut Vec<PageCommand>) {
        match track {
            Track::Ambient => {
                if !ok {
                    log::warn!("[home] ambient sound blocked, waiting for a gesture");
                }
                if self.ambient.on_play_result(ok) {
                    log::info!("[home] ambient sound started");
                    out.push(PageCommand::DetachInteractionListeners);
                }
            }
            _ if !ok => log::warn!("[home] could not play {:?}", track),
            _ => {}
        }
    }

    /// Advances timers and the portal sequence.
    pub fn tick(&mut self, now_ms: f64, out: &mut Vec<PageCommand>) {
        if !self.mounted {
            return;
        }
        if self.glitch_off_at.is_some_and(|at| now_ms >= at) {
            self.glitch_off_at = None;
            out.push(PageCommand::SetGlitch(false));
        }
        if let Some(step) = self.portal.advance(now_ms) {
            out.push(PageCommand::ApplyPortal(step.frame));
            if step.just_completed && !self.navigated {
                self.navigated = true;
                log::info!("[home] portal complete, navigating to {}", PORTAL_DESTINATION);
                out.push(PageCommand::Navigate(PORTAL_DESTINATION));
            }
        }
    }

    /// Pauses and releases owned audio. The transition clip is left alone so
    /// it can carry over into the next page.
    pub fn unmount(&mut self, out: &mut Vec<PageCommand>) {
        if !std::mem::replace(&mut self.mounted, false) {
            return;
        }
        self.glitch_off_at = None;
        self.animator.freeze();
        if self.ambient.listeners_attached() {
            out.push(PageCommand::DetachInteractionListeners);
        }
        if self.ambient.is_started() {
            out.push(PageCommand::PauseAudio(Track::Ambient));
        }
        out.push(PageCommand::ReleaseAudio(Track::Ambient));
        log::info!("[home] unmounted at {}%", self.tracker.percentage());
    }

    fn request_ambient(&mut self, out: &mut Vec<PageCommand>) {
        if self.ambient.on_interaction() {
            out.push(PageCommand::PlayAudio(Track::Ambient));
        }
    }

    fn emit_poses(&mut self, pct: f32, out: &mut Vec<PageCommand>) {
        let Some(poses) = self.animator.poses(pct) else {
            return;
        };
        for (object, position) in poses {
            if object == SceneObject::Camera {
                self.camera_z = position.z;
            }
            out.push(PageCommand::SetTransform { object, position });
        }
    }

    fn emit_text_opacity(&mut self, pct: f32, out: &mut Vec<PageCommand>) {
        let next = phrase_two_opacity(pct);
        let prev = self.text_opacity.replace(next);
        for (line, opacity) in next.iter().copied().enumerate() {
            if prev.map(|p| p[line]) != Some(opacity) {
                out.push(PageCommand::SetTextOpacity { line, opacity });
            }
        }
    }

    fn open_portal(&mut self, now_ms: f64, out: &mut Vec<PageCommand>) {
        // the portal owns the camera from here on
        self.animator.freeze();
        if !self.portal.begin(now_ms, self.camera_z) {
            return;
        }
        out.push(PageCommand::SetTransitioning(true));
        out.push(PageCommand::PlayAudio(Track::Transition));
    }
}
