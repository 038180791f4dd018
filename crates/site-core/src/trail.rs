use crate::constants::{CURSOR_IDLE_MS, TRAIL_FADE_PER_FRAME, TRAIL_MIN_OPACITY};
use crate::device::PerformanceProfile;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

/// Fading polyline following the pointer on the HomePage.
#[derive(Clone, Debug)]
pub struct CursorTrail {
    points: VecDeque<TrailPoint>,
    max_points: usize,
    update_interval_ms: f64,
    last_push_ms: Option<f64>,
    last_move_ms: Option<f64>,
}

impl CursorTrail {
    pub fn new(profile: &PerformanceProfile) -> Self {
        Self {
            points: VecDeque::with_capacity(profile.trail_max_points),
            max_points: profile.trail_max_points.max(1),
            update_interval_ms: profile.trail_update_interval_ms,
            last_push_ms: None,
            last_move_ms: None,
        }
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &TrailPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Records a pointer sample; returns false when throttled.
    pub fn push(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        if let Some(last) = self.last_push_ms {
            if now_ms - last < self.update_interval_ms {
                return false;
            }
        }
        self.last_push_ms = Some(now_ms);
        self.last_move_ms = Some(now_ms);
        self.points.push_back(TrailPoint { x, y, opacity: 1.0 });
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
        true
    }

    #[inline]
    pub fn mouse_active(&self, now_ms: f64) -> bool {
        self.last_move_ms
            .is_some_and(|t| now_ms - t < CURSOR_IDLE_MS)
    }

    /// Fades every point once. Returns whether another frame is needed.
    pub fn fade(&mut self, now_ms: f64) -> bool {
        for p in self.points.iter_mut() {
            p.opacity *= TRAIL_FADE_PER_FRAME;
        }
        self.points.retain(|p| p.opacity > TRAIL_MIN_OPACITY);
        !self.points.is_empty() || self.mouse_active(now_ms)
    }

    /// Pointer left the page: drop everything at once.
    pub fn clear(&mut self) {
        self.points.clear();
        self.last_move_ms = None;
    }
}
