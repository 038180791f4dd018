use crate::constants::{CTA_REVEAL_RATIO, CTA_TITLE_FULL_RATIO, PORTAL_THRESHOLD};

/// Fade-in between two scroll percentages.
#[inline]
pub fn fade_in(percentage: f32, start: f32, end: f32) -> f32 {
    if percentage < start {
        0.0
    } else if percentage > end || end <= start {
        1.0
    } else {
        (percentage - start) / (end - start)
    }
}

/// Opacity of the two lines of the second phrase; fully shown past the portal
/// threshold.
pub fn phrase_two_opacity(percentage: f32) -> [f32; 2] {
    if percentage > PORTAL_THRESHOLD {
        return [1.0, 1.0];
    }
    [
        fade_in(percentage, 45.0, 55.0),
        fade_in(percentage, 55.0, 60.0),
    ]
}

/// Derived state of the Rebecca call-to-action section.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CtaReveal {
    pub ratio: f64,
    /// 0..1 progress of the title slide-in.
    pub title_progress: f64,
    pub content_visible: bool,
    pub code_rain_active: bool,
}

impl CtaReveal {
    pub fn from_ratio(ratio: f64) -> Self {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        let visible = ratio >= CTA_REVEAL_RATIO;
        Self {
            ratio,
            title_progress: ratio.min(CTA_TITLE_FULL_RATIO) / CTA_TITLE_FULL_RATIO,
            content_visible: visible,
            code_rain_active: visible,
        }
    }
}

/// 0.00, 0.01, ..., 1.00 for the intersection observer.
pub fn intersection_thresholds() -> Vec<f64> {
    (0..=100).map(|i| i as f64 / 100.0).collect()
}
