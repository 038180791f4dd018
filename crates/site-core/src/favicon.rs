use crate::constants::{
    FAVICON_COLOR_PERIOD_MS, FAVICON_ORANGE_END, FAVICON_ORANGE_START,
};
use std::f64::consts::PI;

/// Sinusoidal colour pulse applied to the orange paths of the favicon,
/// sampled every `FAVICON_UPDATE_MS`.
#[derive(Clone, Debug)]
pub struct FaviconPulse {
    from: [u8; 3],
    to: [u8; 3],
    period_ms: f64,
    started_ms: Option<f64>,
}

impl Default for FaviconPulse {
    fn default() -> Self {
        Self::new(FAVICON_ORANGE_START, FAVICON_ORANGE_END, FAVICON_COLOR_PERIOD_MS)
    }
}

impl FaviconPulse {
    pub fn new(from: [u8; 3], to: [u8; 3], period_ms: f64) -> Self {
        Self {
            from,
            to,
            period_ms: period_ms.max(1.0),
            started_ms: None,
        }
    }

    /// Colour at `elapsed_ms` into the cycle; starts and ends at `from`.
    pub fn color_at(&self, elapsed_ms: f64) -> [u8; 3] {
        let p = elapsed_ms.rem_euclid(self.period_ms) / self.period_ms;
        let k = ((p * PI * 2.0 - PI / 2.0).sin() + 1.0) / 2.0;
        let mut out = [0u8; 3];
        for (i, c) in out.iter_mut().enumerate() {
            let a = self.from[i] as f64;
            let b = self.to[i] as f64;
            *c = (a + (b - a) * k).round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Colour at `now_ms`; the first call starts the cycle.
    pub fn sample(&mut self, now_ms: f64) -> [u8; 3] {
        let start = *self.started_ms.get_or_insert(now_ms);
        self.color_at(now_ms - start)
    }
}

pub fn css_rgb(c: [u8; 3]) -> String {
    format!("rgb({}, {}, {})", c[0], c[1], c[2])
}
