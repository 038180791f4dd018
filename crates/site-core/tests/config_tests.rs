// Host-side tests for page configuration, device profiles and voice setup.

use site_core::config::PageConfig;
use site_core::device::*;
use site_core::voice::*;
use site_core::SiteError;
use std::collections::HashMap;

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn defaults_without_attributes() {
    let c = PageConfig::from_attributes(attrs(&[]), PerformanceProfile::default()).unwrap();
    assert_eq!(c, PageConfig::default());
    assert_eq!(c.max_scroll_percentage, 100.0);
}

#[test]
fn embedded_defaults_to_sixty_five() {
    let c = PageConfig::from_attributes(
        attrs(&[("embedded", "true"), ("scroll-container", "rebecca-scroll")]),
        PerformanceProfile::default(),
    )
    .unwrap();
    assert!(c.embedded);
    assert_eq!(c.max_scroll_percentage, 65.0);
    assert_eq!(c.scroll_container.as_deref(), Some("rebecca-scroll"));
}

#[test]
fn explicit_max_scroll() {
    let c = PageConfig::from_attributes(
        attrs(&[("embedded", "1"), ("max-scroll", " 80 ")]),
        PerformanceProfile::default(),
    )
    .unwrap();
    assert_eq!(c.max_scroll_percentage, 80.0);
}

#[test]
fn invalid_attributes_are_rejected() {
    let err = PageConfig::from_attributes(attrs(&[("max-scroll", "abc")]), PerformanceProfile::default())
        .unwrap_err();
    assert_eq!(
        err,
        SiteError::InvalidAttribute {
            name: "data-max-scroll",
            value: "abc".into()
        }
    );
    assert!(PageConfig::from_attributes(attrs(&[("max-scroll", "140")]), PerformanceProfile::default()).is_err());
    assert!(PageConfig::from_attributes(attrs(&[("embedded", "yes")]), PerformanceProfile::default()).is_err());
}

#[test]
fn blank_scroll_container_means_window() {
    let c = PageConfig::from_attributes(attrs(&[("scroll-container", "  ")]), PerformanceProfile::default())
        .unwrap();
    assert_eq!(c.scroll_container, None);
}

#[test]
fn breakpoints_and_device_types() {
    assert_eq!(Breakpoint::from_width(320.0), Breakpoint::Mobile);
    assert_eq!(Breakpoint::from_width(768.0), Breakpoint::MobileLarge);
    assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Tablet);
    assert_eq!(Breakpoint::from_width(1440.0), Breakpoint::Desktop);
    assert_eq!(Breakpoint::from_width(1920.0), Breakpoint::DesktopLarge);
    assert_eq!(Breakpoint::from_width(2560.0), Breakpoint::UltraWide);

    assert_eq!(DeviceType::from_width(768.0), DeviceType::Mobile);
    assert_eq!(DeviceType::from_width(769.0), DeviceType::Tablet);
    assert_eq!(DeviceType::from_width(1025.0), DeviceType::Desktop);
}

#[test]
fn profile_scales_with_device() {
    let mobile = PerformanceProfile::for_width(400.0, false);
    let tablet = PerformanceProfile::for_width(900.0, false);
    let desktop = PerformanceProfile::for_width(1300.0, false);
    assert_eq!(
        (mobile.scroll_step, tablet.scroll_step, desktop.scroll_step),
        (3.0, 2.0, 1.0)
    );
    assert_eq!(mobile.trail_max_points, 15);
    assert_eq!(desktop.trail_update_interval_ms, 16.0);
    assert_eq!(PerformanceProfile::for_width(1300.0, true).animation_duration_sec, 0.01);
}

#[test]
fn voice_config_requires_a_key() {
    assert_eq!(VoiceConfig::from_parts(None, Some("a")), Err(SiteError::VoiceNotConfigured));
    assert_eq!(VoiceConfig::from_parts(Some("  "), None), Err(SiteError::VoiceNotConfigured));
    let c = VoiceConfig::from_parts(Some(" pk "), Some("")).unwrap();
    assert_eq!(c.public_key, "pk");
    assert_eq!(c.assistant_id, None);
}

#[test]
fn call_button_states() {
    let idle = CallButton::from_status(VoiceStatus::default());
    assert_eq!(idle, CallButton::Idle);
    assert!(idle.accepts_click());

    let connecting = CallButton::from_status(VoiceStatus {
        is_session_active: false,
        is_loading: true,
    });
    assert_eq!(connecting, CallButton::Connecting);
    assert!(!connecting.accepts_click());

    let live = CallButton::from_status(VoiceStatus {
        is_session_active: true,
        is_loading: false,
    });
    assert_eq!(live.label(), "Finalizar llamada");
    assert!(live.accepts_click());
}
