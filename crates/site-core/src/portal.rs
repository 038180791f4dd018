//! The scripted portal transition: a fixed set of tweens on one clock.
//!
//! The sequence is sampled by elapsed wall time. Completion is reported by the
//! same sample that reaches the end of the sequence, and the caller chains the
//! page navigation off that report, so the visuals and the navigation can
//! never drift apart.

use crate::constants::PORTAL_DURATION_SEC;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// `t^(n+1)`
    PowerIn(i32),
    /// `1 - (1-t)^(n+1)`
    PowerOut(i32),
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn(n) => t.powi(n + 1),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(n + 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalChannel {
    CameraZ,
    SceneScale,
    SceneRotationX,
    SceneRotationZ,
    Brightness,
    Contrast,
    Blur,
    Opacity,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub channel: PortalChannel,
    pub to: f32,
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    const fn new(channel: PortalChannel, to: f32, start: f32, duration: f32, ease: Ease) -> Self {
        Self {
            channel,
            to,
            start,
            duration,
            ease,
        }
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

// Tweens on one channel never overlap; each starts from the previous target.
pub const PORTAL_TWEENS: [Tween; 10] = [
    // zoom in
    Tween::new(PortalChannel::CameraZ, -80.0, 0.0, 0.3, Ease::PowerIn(2)),
    // shrink towards the centre
    Tween::new(PortalChannel::SceneScale, 0.1, 0.2, 0.6, Ease::PowerIn(2)),
    // rush into the tunnel
    Tween::new(PortalChannel::CameraZ, -300.0, 0.4, 0.7, Ease::PowerIn(3)),
    // vortex
    Tween::new(PortalChannel::SceneRotationZ, PI * 2.0, 0.1, 1.4, Ease::PowerIn(2)),
    Tween::new(PortalChannel::SceneRotationX, PI * 0.3, 0.1, 1.4, Ease::PowerIn(2)),
    // vanishing point
    Tween::new(PortalChannel::SceneScale, 0.02, 0.8, 0.5, Ease::PowerIn(4)),
    // white flash
    Tween::new(PortalChannel::Brightness, 400.0, 1.5, 0.3, Ease::PowerIn(2)),
    Tween::new(PortalChannel::Contrast, 300.0, 1.5, 0.3, Ease::PowerIn(2)),
    Tween::new(PortalChannel::Blur, 2.0, 1.5, 0.3, Ease::PowerIn(2)),
    // fade out
    Tween::new(PortalChannel::Opacity, 0.0, 1.7, 0.3, Ease::PowerOut(3)),
];

/// Every animated property of the transition at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalFrame {
    pub camera_z: f32,
    pub scene_scale: f32,
    pub rotation_x: f32,
    pub rotation_z: f32,
    /// Percent, 100 = unchanged.
    pub brightness: f32,
    /// Percent, 100 = unchanged.
    pub contrast: f32,
    pub blur_px: f32,
    pub opacity: f32,
    pub complete: bool,
}

impl PortalFrame {
    pub fn resting(camera_z: f32) -> Self {
        Self {
            camera_z,
            scene_scale: 1.0,
            rotation_x: 0.0,
            rotation_z: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            blur_px: 0.0,
            opacity: 1.0,
            complete: false,
        }
    }

    fn channel_mut(&mut self, channel: PortalChannel) -> &mut f32 {
        match channel {
            PortalChannel::CameraZ => &mut self.camera_z,
            PortalChannel::SceneScale => &mut self.scene_scale,
            PortalChannel::SceneRotationX => &mut self.rotation_x,
            PortalChannel::SceneRotationZ => &mut self.rotation_z,
            PortalChannel::Brightness => &mut self.brightness,
            PortalChannel::Contrast => &mut self.contrast,
            PortalChannel::Blur => &mut self.blur_px,
            PortalChannel::Opacity => &mut self.opacity,
        }
    }

    pub fn channel(&self, channel: PortalChannel) -> f32 {
        match channel {
            PortalChannel::CameraZ => self.camera_z,
            PortalChannel::SceneScale => self.scene_scale,
            PortalChannel::SceneRotationX => self.rotation_x,
            PortalChannel::SceneRotationZ => self.rotation_z,
            PortalChannel::Brightness => self.brightness,
            PortalChannel::Contrast => self.contrast,
            PortalChannel::Blur => self.blur_px,
            PortalChannel::Opacity => self.opacity,
        }
    }

    /// Value for the css `filter` property of the canvas container.
    pub fn filter_css(&self) -> String {
        format!(
            "brightness({:.0}%) contrast({:.0}%) blur({:.2}px)",
            self.brightness, self.contrast, self.blur_px
        )
    }
}

/// Samples `tweens` at `t_sec` starting from `initial`.
pub fn evaluate(tweens: &[Tween], initial: &PortalFrame, t_sec: f32) -> PortalFrame {
    let mut frame = *initial;
    for tw in tweens {
        if t_sec <= tw.start {
            continue;
        }
        let p = if tw.duration > 0.0 {
            ((t_sec - tw.start) / tw.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let v = frame.channel_mut(tw.channel);
        *v += (tw.to - *v) * tw.ease.apply(p);
    }
    frame
}

/// Result of advancing a running sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalStep {
    pub frame: PortalFrame,
    /// Set exactly once, on the sample that finishes the sequence.
    pub just_completed: bool,
}

#[derive(Clone, Debug)]
pub struct PortalSequencer {
    tweens: Vec<Tween>,
    total_ms: f64,
    started_at: Option<f64>,
    initial: PortalFrame,
    completed: bool,
}

impl Default for PortalSequencer {
    fn default() -> Self {
        Self::new(PORTAL_TWEENS.to_vec(), PORTAL_DURATION_SEC)
    }
}

impl PortalSequencer {
    pub fn new(mut tweens: Vec<Tween>, total_sec: f32) -> Self {
        // sequential per-channel evaluation relies on start order
        tweens.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self {
            tweens,
            total_ms: total_sec as f64 * 1000.0,
            started_at: None,
            initial: PortalFrame::resting(0.0),
            completed: false,
        }
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Starts the sequence from the camera's current depth. Fire-and-forget:
    /// returns false if it was already started.
    pub fn begin(&mut self, now_ms: f64, camera_z: f32) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_ms);
        self.initial = PortalFrame::resting(camera_z);
        log::info!("[portal] sequence started at {:.0}ms", now_ms);
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.completed
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// When a running sequence finishes.
    pub fn ends_at(&self) -> Option<f64> {
        self.started_at
            .filter(|_| !self.completed)
            .map(|start| start + self.total_ms)
    }

    /// Frame for `now_ms`; `None` before `begin` and after completion.
    pub fn advance(&mut self, now_ms: f64) -> Option<PortalStep> {
        let start = self.started_at?;
        if self.completed {
            return None;
        }
        let elapsed = (now_ms - start).max(0.0);
        if elapsed >= self.total_ms {
            self.completed = true;
            let mut frame = evaluate(&self.tweens, &self.initial, f32::INFINITY);
            frame.complete = true;
            return Some(PortalStep {
                frame,
                just_completed: true,
            });
        }
        let frame = evaluate(&self.tweens, &self.initial, (elapsed / 1000.0) as f32);
        Some(PortalStep {
            frame,
            just_completed: false,
        })
    }
}
