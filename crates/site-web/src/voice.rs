//! Voice assistant call button. The SDK lives in the page script and is
//! reached through `globalThis`; it reports state changes back through the
//! exported `voice_status`.

use crate::dom::{self, Listener};
use site_core::voice::{CallButton, VoiceConfig, VoiceStatus};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

pub const VOICE_BUTTON_SELECTOR: &str = ".vapi-button-container button";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = globalThis, js_name = intelimark_voice_toggle)]
    fn voice_toggle(public_key: &str, assistant_id: Option<String>) -> Result<(), JsValue>;
}

thread_local! {
    static BUTTON: RefCell<Option<(web::HtmlButtonElement, CallButton)>> = const { RefCell::new(None) };
}

fn render(button: &web::HtmlButtonElement, state: CallButton) {
    for s in [CallButton::Idle, CallButton::Connecting, CallButton::Live] {
        dom::set_class(button, s.class_name(), s == state);
    }
    button.set_disabled(!state.accepts_click());
    button.set_text_content(Some(state.label()));
    _ = button.set_attribute(
        "aria-label",
        if state == CallButton::Live {
            "Terminar llamada"
        } else {
            "Iniciar llamada"
        },
    );
}

/// Called by the page script whenever the SDK session changes.
#[wasm_bindgen]
pub fn voice_status(is_session_active: bool, is_loading: bool) {
    let state = CallButton::from_status(VoiceStatus {
        is_session_active,
        is_loading,
    });
    BUTTON.with(|b| {
        if let Some((button, current)) = b.borrow_mut().as_mut() {
            if *current != state {
                log::info!("[voice] {:?} -> {:?}", current, state);
                *current = state;
                render(button, state);
            }
        }
    });
}

pub struct VoiceButton {
    _click: Listener,
}

impl VoiceButton {
    /// Credentials come from `VAPI_PUBLIC_KEY` / `VAPI_ASSISTANT_ID` at build
    /// time; without a key the button stays disabled.
    pub fn mount(root: &web::Element) -> anyhow::Result<Option<Self>> {
        let Some(button) = root
            .query_selector(VOICE_BUTTON_SELECTOR)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .and_then(|el| el.dyn_into::<web::HtmlButtonElement>().ok())
        else {
            return Ok(None);
        };

        let config = match VoiceConfig::from_parts(
            option_env!("VAPI_PUBLIC_KEY"),
            option_env!("VAPI_ASSISTANT_ID"),
        ) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[voice] {}", e);
                button.set_disabled(true);
                return Ok(None);
            }
        };

        render(&button, CallButton::Idle);
        BUTTON.with(|b| *b.borrow_mut() = Some((button.clone(), CallButton::Idle)));

        let click = Listener::new(&button, "click", move |_| {
            let accepts = BUTTON.with(|b| {
                b.borrow()
                    .as_ref()
                    .map(|(_, s)| s.accepts_click())
                    .unwrap_or(false)
            });
            if !accepts {
                return;
            }
            if let Err(e) = voice_toggle(&config.public_key, config.assistant_id.clone()) {
                log::error!("[voice] toggle failed: {:?}", e);
            }
        });
        Ok(Some(Self { _click: click }))
    }
}

impl Drop for VoiceButton {
    fn drop(&mut self) {
        BUTTON.with(|b| b.borrow_mut().take());
    }
}
