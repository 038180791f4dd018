#![cfg(target_arch = "wasm32")]
//! Browser front-end for the InteliMark site.
//!
//! The page markup decides what gets mounted: `#homepage-root` mounts the
//! landing page, `#rebecca-root` the Rebecca page (which embeds a second
//! HomePage under `.homepage-embedded` on demand). The 3D scene is owned by
//! the page script and reached through [`scene`].

mod audio;
mod dom;
mod effects;
mod frame;
mod glitch;
mod home;
mod rebecca;
mod scene;
mod voice;

use home::HomePage;
use rebecca::RebeccaPage;
use site_core::constants::{HOME_ROOT_ID, REBECCA_ROOT_ID};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub use scene::{scene_failed, scene_ready};
pub use voice::voice_status;

enum Page {
    Home(HomePage),
    Rebecca(RebeccaPage),
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("site-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    effects::install_tab_effects(&document);

    let page = if let Ok(root) = dom::element_by_id::<web::HtmlElement>(&document, HOME_ROOT_ID) {
        Page::Home(HomePage::mount(&document, &root)?)
    } else if let Ok(root) = dom::element_by_id::<web::HtmlElement>(&document, REBECCA_ROOT_ID) {
        Page::Rebecca(RebeccaPage::mount(&document, root)?)
    } else {
        log::warn!("no #{} or #{} on this page", HOME_ROOT_ID, REBECCA_ROOT_ID);
        return Ok(());
    };
    PAGE.with(|p| *p.borrow_mut() = Some(page));

    let on_pagehide = Closure::wrap(Box::new(unmount) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())
        .ok();
    on_pagehide.forget();
    Ok(())
}

/// Tears the current page and the tab effects down; also exported for hosts
/// that swap pages without a navigation.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|p| p.borrow_mut().take());
    match page {
        Some(Page::Home(_)) => log::info!("HomePage unmounted"),
        Some(Page::Rebecca(_)) => log::info!("Rebecca unmounted"),
        None => {}
    }
    effects::uninstall_tab_effects();
}
