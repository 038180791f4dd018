use crate::error::SiteError;

/// Credentials for the hosted voice assistant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceConfig {
    pub public_key: String,
    pub assistant_id: Option<String>,
}

impl VoiceConfig {
    pub fn from_parts(public_key: Option<&str>, assistant_id: Option<&str>) -> Result<Self, SiteError> {
        let public_key = public_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SiteError::VoiceNotConfigured)?;
        Ok(Self {
            public_key: public_key.to_string(),
            assistant_id: assistant_id
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

/// What the voice SDK reports back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoiceStatus {
    pub is_session_active: bool,
    pub is_loading: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallButton {
    #[default]
    Idle,
    Connecting,
    Live,
}

impl CallButton {
    pub fn from_status(status: VoiceStatus) -> Self {
        if status.is_loading {
            CallButton::Connecting
        } else if status.is_session_active {
            CallButton::Live
        } else {
            CallButton::Idle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CallButton::Idle => "Hablar con Rebecca",
            CallButton::Connecting => "Conectando...",
            CallButton::Live => "Finalizar llamada",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            CallButton::Idle => "voice-idle",
            CallButton::Connecting => "voice-connecting",
            CallButton::Live => "voice-live",
        }
    }

    /// Clicks are ignored while a call is being set up.
    #[inline]
    pub fn accepts_click(self) -> bool {
        self != CallButton::Connecting
    }
}
