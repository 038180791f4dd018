//! Bridge to the 3D scene, which is owned by the page's rendering script.
//!
//! The script registers objects by name (see `SceneObject::name`), exposes
//! the setters below on `globalThis`, and calls the exported `scene_ready`
//! once every object is mounted (or `scene_failed` if the canvas could not
//! be created).

use glam::Vec3;
use site_core::constants::CANVAS_CONTAINER_SELECTOR;
use site_core::portal::PortalFrame;
use site_core::readiness::ReadySignal;
use site_core::timeline::{SceneObject, SceneTargets};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = globalThis, js_name = intelimark_scene_has)]
    fn scene_has(name: &str) -> Result<bool, JsValue>;

    #[wasm_bindgen(catch, js_namespace = globalThis, js_name = intelimark_scene_set_position)]
    fn scene_set_position(name: &str, x: f32, y: f32, z: f32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = globalThis, js_name = intelimark_scene_set_opacity)]
    fn scene_set_opacity(name: &str, opacity: f32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = globalThis, js_name = intelimark_scene_set_portal)]
    fn scene_set_portal(camera_z: f32, scale: f32, rotation_x: f32, rotation_z: f32) -> Result<(), JsValue>;
}

thread_local! {
    static READY: RefCell<ReadySignal> = RefCell::new(ReadySignal::new());
}

/// Signal for the scene currently being mounted.
pub fn ready_signal() -> ReadySignal {
    READY.with(|r| r.borrow().clone())
}

/// Fresh signal for a new mount; the previous page's scene is gone.
pub fn reset_ready_signal() -> ReadySignal {
    READY.with(|r| {
        let fresh = ReadySignal::new();
        *r.borrow_mut() = fresh.clone();
        fresh
    })
}

#[wasm_bindgen]
pub fn scene_ready() {
    log::info!("[scene] ready");
    ready_signal().resolve();
}

/// Replaces the canvas with a message instead of taking the page down.
#[wasm_bindgen]
pub fn scene_failed(message: &str) {
    log::error!("[scene] failed: {}", message);
    let Some(document) = crate::dom::window_document() else {
        return;
    };
    if let Ok(Some(container)) = document.query_selector(CANVAS_CONTAINER_SELECTOR) {
        container.set_inner_html(
            "<div class=\"scene-fallback\">No se pudo cargar la escena 3D.</div>",
        );
    }
}

/// Scene handle used by the HomePage.
#[derive(Default)]
pub struct JsScene {
    broken: bool,
}

impl JsScene {
    fn report(&mut self, e: JsValue) {
        if !self.broken {
            log::warn!("[scene] bridge call failed: {:?}", e);
            self.broken = true;
        }
    }

    /// Opacity of a line of the second phrase; `line` is 0 or 1.
    pub fn set_text_opacity(&mut self, line: usize, opacity: f32) {
        let object = match line {
            0 => SceneObject::PhraseTwoLine1,
            1 => SceneObject::PhraseTwoLine2,
            _ => return,
        };
        if let Err(e) = scene_set_opacity(object.name(), opacity) {
            self.report(e);
        }
    }

    pub fn apply_portal(&mut self, frame: &PortalFrame, canvas: Option<&web::HtmlElement>) {
        if let Err(e) = scene_set_portal(
            frame.camera_z,
            frame.scene_scale,
            frame.rotation_x,
            frame.rotation_z,
        ) {
            self.report(e);
        }
        if let Some(el) = canvas {
            crate::dom::set_style(el, "filter", &frame.filter_css());
            crate::dom::set_style(el, "opacity", &format!("{:.3}", frame.opacity));
        }
    }
}

impl SceneTargets for JsScene {
    fn is_mounted(&self, object: SceneObject) -> bool {
        scene_has(object.name()).unwrap_or(false)
    }

    fn set_position(&mut self, object: SceneObject, position: Vec3) {
        if let Err(e) = scene_set_position(object.name(), position.x, position.y, position.z) {
            self.report(e);
        }
    }
}
