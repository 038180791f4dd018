//! Breakpoint classification and the per-device performance profile.
//!
//! Lower-powered devices publish scroll updates less often and keep a shorter
//! cursor trail; everything here is derived from the viewport width and the
//! user's reduced-motion preference.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    MobileLarge,
    Tablet,
    Desktop,
    DesktopLarge,
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: f64) -> Self {
        match width {
            w if w <= 480.0 => Breakpoint::Mobile,
            w if w <= 768.0 => Breakpoint::MobileLarge,
            w if w <= 1024.0 => Breakpoint::Tablet,
            w if w <= 1440.0 => Breakpoint::Desktop,
            w if w <= 1920.0 => Breakpoint::DesktopLarge,
            _ => Breakpoint::UltraWide,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::MobileLarge => "mobile-large",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
            Breakpoint::DesktopLarge => "desktop-large",
            Breakpoint::UltraWide => "ultra-wide",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceType {
    pub fn from_width(width: f64) -> Self {
        match Breakpoint::from_width(width) {
            Breakpoint::Mobile | Breakpoint::MobileLarge => DeviceType::Mobile,
            Breakpoint::Tablet => DeviceType::Tablet,
            _ => DeviceType::Desktop,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceProfile {
    pub device: DeviceType,
    /// Minimum percentage delta before a scroll sample is published.
    pub scroll_step: f32,
    pub trail_max_points: usize,
    pub trail_update_interval_ms: f64,
    pub particle_size: f32,
    pub animation_duration_sec: f32,
    pub reduced_motion: bool,
}

impl PerformanceProfile {
    pub fn for_device(device: DeviceType, reduced_motion: bool) -> Self {
        let (scroll_step, trail_max_points, trail_update_interval_ms, particle_size, duration) =
            match device {
                DeviceType::Mobile => (3.0, 15, 32.0, 8.0, 0.3),
                DeviceType::Tablet => (2.0, 25, 24.0, 10.0, 0.4),
                DeviceType::Desktop => (1.0, 35, 16.0, 12.0, 0.5),
            };
        Self {
            device,
            scroll_step,
            trail_max_points,
            trail_update_interval_ms,
            particle_size,
            animation_duration_sec: if reduced_motion { 0.01 } else { duration },
            reduced_motion,
        }
    }

    pub fn for_width(width: f64, reduced_motion: bool) -> Self {
        Self::for_device(DeviceType::from_width(width), reduced_motion)
    }
}

impl Default for PerformanceProfile {
    fn default() -> Self {
        Self::for_device(DeviceType::Desktop, false)
    }
}
