// Shared timing, threshold and DOM-contract constants used by both pages.

// Scroll tracking
pub const SCROLL_MAX_PERCENTAGE: f32 = 100.0;

// Threshold effects (scroll percentage)
pub const GLITCH_THRESHOLD: f32 = 68.0;
pub const PORTAL_THRESHOLD: f32 = 70.0;
pub const GLITCH_DURATION_MS: f64 = 600.0; // length of the css glitch animation

// Embedded HomePage (inside Rebecca) never opens the portal
pub const EMBEDDED_GLITCH_LOW: f32 = 60.0;
pub const EMBEDDED_GLITCH_HIGH: f32 = 65.0;
pub const EMBEDDED_DEFAULT_MAX_PERCENTAGE: f32 = 65.0;

// Portal transition
pub const PORTAL_DURATION_SEC: f32 = 2.0;
pub const PORTAL_DESTINATION: &str = "/rebecca";

// Scene readiness fallback before giving up on the scroll timeline
pub const READINESS_TIMEOUT_MS: i32 = 3000;

// Audio assets
pub const AMBIENT_SOUND_PATH: &str = "/ambient_sound_HomePage.mp3";
pub const AMBIENT_VOLUME: f64 = 0.15;
pub const TRANSITION_SOUND_PATH: &str = "/transition.mp3";
pub const TRANSITION_VOLUME: f64 = 0.4;
pub const TRANSITION_AUTO_STOP_MS: f64 = 3500.0; // full clip, outlives the navigation
pub const HOME3D_SOUND_PATH: &str = "/home3d_bottom.mp3";
pub const HOME3D_VOLUME: f64 = 0.5;

// DOM contract
pub const HOME_ROOT_ID: &str = "homepage-root";
pub const SCROLL_CONTAINER_ID: &str = "homepage-scroll-container";
pub const FOOTER_ID: &str = "footer-reveal";
pub const CTA_ID: &str = "cta-section";
pub const CTA_SELECTOR: &str = ".call-to-action-section";
pub const INTERACTIVE_CONTAINER_ID: &str = "interactive-container";
pub const REBECCA_ROOT_ID: &str = "rebecca-root";
pub const CANVAS_CONTAINER_SELECTOR: &str = ".canvas-container";
pub const TRAIL_CANVAS_SELECTOR: &str = ".cursor-trail-canvas";
pub const GLITCH_CLASS: &str = "digital-glitch";
pub const TRANSITIONING_CLASS: &str = "transitioning";
pub const CURSOR_CROSS_CLASS: &str = "cursor-cross";
pub const CUSTOM_CURSOR_CLASS: &str = "custom-cursor";
pub const FAVICON_SOURCE_ID: &str = "favicon-source"; // inline svg of the isotype
pub const FAVICON_ORANGE_SELECTOR: &str = ".cls-2";

// Cursor trail
pub const CURSOR_IDLE_MS: f64 = 300.0; // mouse counts as stopped after this
pub const TRAIL_FADE_PER_FRAME: f32 = 0.85;
pub const TRAIL_MIN_OPACITY: f32 = 0.05;

// Document title marquee
pub const TITLE_DEFAULT: &str = "InteliMark";
pub const TITLE_STATIC_PART: &str = "InteliMark || ";
pub const TITLE_SCROLLING_PARTS: [&str; 2] =
    ["Sitio en construcción... |", "Promocional página DEMO |"];
pub const TITLE_SEPARATOR: &str = "   ";
pub const TITLE_VISIBLE_WIDTH: usize = 35;
pub const TITLE_UPDATE_MS: f64 = 300.0;

// Favicon colour pulse
pub const FAVICON_UPDATE_MS: f64 = 200.0;
pub const FAVICON_COLOR_PERIOD_MS: f64 = 2500.0;
pub const FAVICON_ORANGE_START: [u8; 3] = [218, 128, 35];
pub const FAVICON_ORANGE_END: [u8; 3] = [255, 201, 102];

// CTA reveal (intersection ratio)
pub const CTA_REVEAL_RATIO: f64 = 0.3;
pub const CTA_TITLE_FULL_RATIO: f64 = 0.9;
