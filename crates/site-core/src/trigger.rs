use crate::constants::{
    EMBEDDED_GLITCH_HIGH, EMBEDDED_GLITCH_LOW, GLITCH_THRESHOLD, PORTAL_THRESHOLD,
};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEffect {
    Glitch,
    Portal,
}

/// Half-open `[low, high)` band of the scroll percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub low: f32,
    pub high: f32,
    pub effect: TriggerEffect,
}

impl Threshold {
    pub const fn new(low: f32, high: f32, effect: TriggerEffect) -> Self {
        Self { low, high, effect }
    }

    #[inline]
    pub fn contains(&self, percentage: f32) -> bool {
        percentage >= self.low && percentage < self.high
    }

    /// True when the span swept between two samples touches the band, in
    /// either direction. Throttled jumps over the band still count.
    #[inline]
    pub fn crossed(&self, prev: f32, now: f32) -> bool {
        prev.min(now) < self.high && prev.max(now) >= self.low
    }
}

/// One-shot latches, set at most once per mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerFlags {
    pub glitch_triggered: bool,
    pub portal_triggered: bool,
}

impl TriggerFlags {
    #[inline]
    pub fn is_set(&self, effect: TriggerEffect) -> bool {
        match effect {
            TriggerEffect::Glitch => self.glitch_triggered,
            TriggerEffect::Portal => self.portal_triggered,
        }
    }

    /// Sets the latch; returns false when it was already set.
    pub fn latch(&mut self, effect: TriggerEffect) -> bool {
        let flag = match effect {
            TriggerEffect::Glitch => &mut self.glitch_triggered,
            TriggerEffect::Portal => &mut self.portal_triggered,
        };
        if *flag {
            return false;
        }
        *flag = true;
        true
    }
}

pub type Fired = SmallVec<[TriggerEffect; 2]>;

#[derive(Clone, Debug)]
pub struct ThresholdWatcher {
    thresholds: SmallVec<[Threshold; 2]>,
    flags: TriggerFlags,
    prev: f32,
}

impl ThresholdWatcher {
    pub fn new(thresholds: &[Threshold]) -> Self {
        Self {
            thresholds: thresholds.iter().copied().collect(),
            flags: TriggerFlags::default(),
            prev: 0.0,
        }
    }

    /// Glitch at 68%, portal from 70% on.
    pub fn standalone() -> Self {
        Self::new(&[
            Threshold::new(GLITCH_THRESHOLD, PORTAL_THRESHOLD, TriggerEffect::Glitch),
            Threshold::new(PORTAL_THRESHOLD, f32::INFINITY, TriggerEffect::Portal),
        ])
    }

    /// The embedded page only glitches, and only when its clamp lets the
    /// scroll get past the band.
    pub fn embedded(max_percentage: f32) -> Self {
        if max_percentage > EMBEDDED_GLITCH_HIGH {
            Self::new(&[Threshold::new(
                EMBEDDED_GLITCH_LOW,
                EMBEDDED_GLITCH_HIGH,
                TriggerEffect::Glitch,
            )])
        } else {
            Self::new(&[])
        }
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    #[inline]
    pub fn flags(&self) -> TriggerFlags {
        self.flags
    }

    /// Observe a published percentage; returns effects that fire now, in
    /// threshold order.
    pub fn observe(&mut self, percentage: f32) -> Fired {
        let prev = std::mem::replace(&mut self.prev, percentage);
        let mut fired = Fired::new();
        for th in &self.thresholds {
            if !self.flags.is_set(th.effect)
                && th.crossed(prev, percentage)
                && self.flags.latch(th.effect)
            {
                fired.push(th.effect);
            }
        }
        fired
    }
}
