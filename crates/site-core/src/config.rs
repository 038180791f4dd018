use crate::constants::{EMBEDDED_DEFAULT_MAX_PERCENTAGE, SCROLL_MAX_PERCENTAGE};
use crate::device::PerformanceProfile;
use crate::error::SiteError;

/// Per-mount configuration of the HomePage.
///
/// The web front-end reads it from `data-*` attributes on the page root:
/// `data-scroll-container`, `data-embedded` and `data-max-scroll`.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    /// Id of a custom scroll surface; `None` scrolls the window.
    pub scroll_container: Option<String>,
    pub embedded: bool,
    pub max_scroll_percentage: f32,
    pub profile: PerformanceProfile,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_container: None,
            embedded: false,
            max_scroll_percentage: SCROLL_MAX_PERCENTAGE,
            profile: PerformanceProfile::default(),
        }
    }
}

impl PageConfig {
    pub fn from_attributes(
        attr: impl Fn(&str) -> Option<String>,
        profile: PerformanceProfile,
    ) -> Result<Self, SiteError> {
        let scroll_container = attr("scroll-container").filter(|s| !s.trim().is_empty());
        let embedded = match attr("embedded").as_deref().map(str::trim) {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(SiteError::InvalidAttribute {
                    name: "data-embedded",
                    value: other.to_string(),
                })
            }
        };
        let default_max = if embedded {
            EMBEDDED_DEFAULT_MAX_PERCENTAGE
        } else {
            SCROLL_MAX_PERCENTAGE
        };
        let max_scroll_percentage = match attr("max-scroll") {
            None => default_max,
            Some(raw) => match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() && v > 0.0 && v <= SCROLL_MAX_PERCENTAGE => v,
                _ => {
                    return Err(SiteError::InvalidAttribute {
                        name: "data-max-scroll",
                        value: raw,
                    })
                }
            },
        };
        Ok(Self {
            scroll_container,
            embedded,
            max_scroll_percentage,
            profile,
        })
    }
}
