use thiserror::Error;

/// Failures of the page contract: markup, configuration or duplicate effects.
#[derive(Debug, Error, PartialEq)]
pub enum SiteError {
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("invalid value {value:?} for attribute {name}")]
    InvalidAttribute { name: &'static str, value: String },
    #[error("effect `{0}` is already active")]
    EffectBusy(&'static str),
    #[error("voice assistant is not configured")]
    VoiceNotConfigured,
}
