/// Raw geometry of the scroll surface at the time of a scroll event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    #[inline]
    pub fn scrollable_height(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Unclamped, unrounded percentage; 0 when nothing can scroll.
    pub fn raw_percentage(&self) -> f32 {
        let h = self.scrollable_height();
        if h <= 0.0 || !self.scroll_top.is_finite() {
            return 0.0;
        }
        (self.scroll_top / h * 100.0) as f32
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub percentage: f32,
    pub last_sample_time: f64,
}

/// Publishes a throttled, clamped scroll percentage.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    state: ScrollState,
    step: f32,
    max: f32,
}

impl ScrollTracker {
    pub fn new(step: f32, max: f32) -> Self {
        Self {
            state: ScrollState::default(),
            step: step.max(0.0),
            max: max.clamp(0.0, 100.0),
        }
    }

    #[inline]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    #[inline]
    pub fn percentage(&self) -> f32 {
        self.state.percentage
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// `raw` rounded to a whole percent and clamped to `[0, max]`, without
    /// any throttling.
    pub fn level(&self, raw: f32) -> f32 {
        let raw = if raw.is_finite() { raw } else { 0.0 };
        raw.round().clamp(0.0, self.max)
    }

    /// Feed a raw percentage. Returns the newly published value, if any.
    ///
    /// Values go through [`level`](Self::level). A value is published when it
    /// moved at least `step` away from the last one, or when it lands on
    /// either clamp bound.
    pub fn sample(&mut self, raw: f32, now_ms: f64) -> Option<f32> {
        let next = self.level(raw);
        let last = self.state.percentage;
        if next == last {
            return None;
        }
        let at_bound = next == 0.0 || next == self.max;
        if (next - last).abs() < self.step && !at_bound {
            return None;
        }
        self.state = ScrollState {
            percentage: next,
            last_sample_time: now_ms,
        };
        Some(next)
    }

    pub fn sample_metrics(&mut self, metrics: &ScrollMetrics, now_ms: f64) -> Option<f32> {
        self.sample(metrics.raw_percentage(), now_ms)
    }

    pub fn reset(&mut self) {
        self.state = ScrollState::default();
    }
}
