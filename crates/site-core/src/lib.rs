pub mod audio;
pub mod config;
pub mod constants;
pub mod device;
pub mod director;
pub mod error;
pub mod favicon;
pub mod frame;
pub mod glitch;
pub mod portal;
pub mod readiness;
pub mod registry;
pub mod reveal;
pub mod scroll;
pub mod timeline;
pub mod title;
pub mod trail;
pub mod trigger;
pub mod voice;
pub mod zone;

pub use audio::{AudioGate, Track};
pub use config::PageConfig;
pub use device::{DeviceType, PerformanceProfile};
pub use director::{HomeDirector, PageCommand};
pub use error::SiteError;
pub use frame::{FrameControl, FrameLoop, FrameRequester, Liveness};
pub use portal::{PortalFrame, PortalSequencer};
pub use readiness::ReadySignal;
pub use registry::{EffectLease, EffectRegistry};
pub use scroll::{ScrollMetrics, ScrollTracker};
pub use timeline::{SceneAnimator, SceneObject, SceneTargets, ScrubTimeline};
pub use trigger::{ThresholdWatcher, TriggerEffect};
pub use zone::{CursorZone, Rect, RegionSource, ZoneCursor};
