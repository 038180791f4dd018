use crate::constants::{CTA_ID, FOOTER_ID, SCROLL_CONTAINER_ID};
use smallvec::SmallVec;

/// Viewport rectangle, edges inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Zero width or height; what a hidden or detached element reports.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }

    /// Empty rectangles contain nothing.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        !self.is_empty()
            && x >= self.left
            && x <= self.right
            && y >= self.top
            && y <= self.bottom
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorZone {
    #[default]
    Default,
    Footer,
    Cta,
    Home3d,
}

impl CursorZone {
    /// Checked first to last; the first hit wins.
    pub const PRIORITY: [CursorZone; 3] = [CursorZone::Home3d, CursorZone::Footer, CursorZone::Cta];

    pub fn as_str(self) -> &'static str {
        match self {
            CursorZone::Default => "default",
            CursorZone::Footer => "footer",
            CursorZone::Cta => "cta",
            CursorZone::Home3d => "home3d",
        }
    }

    /// Element id the zone's rectangle is measured from.
    pub fn element_id(self) -> Option<&'static str> {
        match self {
            CursorZone::Default => None,
            CursorZone::Footer => Some(FOOTER_ID),
            CursorZone::Cta => Some(CTA_ID),
            CursorZone::Home3d => Some(SCROLL_CONTAINER_ID),
        }
    }

    /// The crosshair replaces the system cursor outside the 3D and CTA
    /// regions, and follows the pointer there.
    #[inline]
    pub fn shows_crosshair(self) -> bool {
        matches!(self, CursorZone::Default | CursorZone::Footer)
    }
}

/// Looks up the current rectangle of a zone; `None` when absent from the page.
pub trait RegionSource {
    fn region(&self, zone: CursorZone) -> Option<Rect>;
}

impl<F> RegionSource for F
where
    F: Fn(CursorZone) -> Option<Rect>,
{
    fn region(&self, zone: CursorZone) -> Option<Rect> {
        self(zone)
    }
}

pub fn detect_zone<R: RegionSource + ?Sized>(
    priority: &[CursorZone],
    regions: &R,
    x: f64,
    y: f64,
) -> CursorZone {
    priority
        .iter()
        .copied()
        .find(|z| regions.region(*z).is_some_and(|r| r.contains(x, y)))
        .unwrap_or_default()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorUpdate {
    /// New zone, only when it changed.
    pub zone_changed: Option<CursorZone>,
    /// Position to publish to `--cursor-x` / `--cursor-y`.
    pub position: Option<(f64, f64)>,
}

#[derive(Clone, Debug)]
pub struct ZoneCursor {
    zone: CursorZone,
    priority: SmallVec<[CursorZone; 3]>,
}

impl Default for ZoneCursor {
    fn default() -> Self {
        Self::with_priority(&CursorZone::PRIORITY)
    }
}

impl ZoneCursor {
    /// Pages with fewer zones pass a subset, still in priority order.
    pub fn with_priority(zones: &[CursorZone]) -> Self {
        Self {
            zone: CursorZone::Default,
            priority: zones
                .iter()
                .copied()
                .filter(|z| *z != CursorZone::Default)
                .collect(),
        }
    }

    #[inline]
    pub fn zone(&self) -> CursorZone {
        self.zone
    }

    pub fn on_move<R: RegionSource + ?Sized>(&mut self, x: f64, y: f64, regions: &R) -> CursorUpdate {
        let next = detect_zone(&self.priority, regions, x, y);
        let zone_changed = (next != self.zone).then_some(next);
        self.zone = next;
        CursorUpdate {
            zone_changed,
            position: next.shows_crosshair().then_some((x, y)),
        }
    }

    /// Pointer left the root container.
    pub fn on_leave(&mut self) -> Option<CursorZone> {
        let changed = self.zone != CursorZone::Default;
        self.zone = CursorZone::Default;
        changed.then_some(CursorZone::Default)
    }
}
