//! Rebecca page: zone-aware CAD cursor, the embeddable HomePage preview, the
//! call-to-action reveal and the voice button.

use crate::audio::AudioBank;
use crate::dom::{self, DomRegions, Listener, Timeout};
use crate::frame::next_frame;
use crate::glitch::{self, GlitchTextView};
use crate::home::HomePage;
use crate::voice::VoiceButton;
use site_core::constants::{
    CTA_ID, CURSOR_CROSS_CLASS, CUSTOM_CURSOR_CLASS, INTERACTIVE_CONTAINER_ID,
    SCROLL_CONTAINER_ID,
};
use site_core::reveal::{intersection_thresholds, CtaReveal};
use site_core::{CursorZone, Liveness, Track, ZoneCursor};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

const FADE_IN_SELECTOR: &str = ".fade-in-delayed";
const FADE_IN_ACTIVE_CLASS: &str = "fade-in-active";
const FADE_IN_DELAY_MS: i32 = 500;
const EMBEDDED_ROOT_SELECTOR: &str = ".homepage-embedded";

/// Shows or hides the custom cursor and its crosshair.
struct CursorView {
    container: web::HtmlElement,
    cross: web::HtmlElement,
}

impl CursorView {
    fn new(document: &web::Document, container: web::HtmlElement) -> anyhow::Result<Self> {
        let cross = document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| anyhow::anyhow!("div is not an HtmlElement"))?;
        cross.set_class_name(CURSOR_CROSS_CLASS);
        container
            .append_child(&cross)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { container, cross })
    }

    fn show(&self, visible: bool) {
        dom::set_class(&self.container, CUSTOM_CURSOR_CLASS, visible);
        dom::set_class(&self.cross, "visible", visible);
        dom::set_style(&self.cross, "display", if visible { "block" } else { "none" });
    }

    fn apply_zone(&self, zone: CursorZone) {
        self.show(zone.shows_crosshair());
    }

    fn move_to(&self, x: f64, y: f64) {
        let style = self.container.style();
        _ = style.set_property("--cursor-x", &format!("{}px", x));
        _ = style.set_property("--cursor-y", &format!("{}px", y));
        dom::set_style(&self.cross, "left", &format!("{}px", x));
        dom::set_style(&self.cross, "top", &format!("{}px", y));
    }
}

struct RebeccaState {
    cursor: ZoneCursor,
    view: CursorView,
    regions: DomRegions,
    /// Latest position waiting for the next frame.
    pending: Cell<Option<(f64, f64)>>,
    frame_scheduled: bool,
    batch: Liveness,
    interactive: web::HtmlElement,
    wrapper: Option<web::HtmlElement>,
    home: Option<HomePage>,
    audio: AudioBank,
    document: web::Document,
}

impl RebeccaState {
    fn showing_home(&self) -> bool {
        self.home.is_some()
    }

    fn on_mouse_move(&mut self, x: f64, y: f64, weak: &Weak<RefCell<RebeccaState>>) {
        if self.showing_home() {
            self.view.show(false);
            return;
        }
        let update = self.cursor.on_move(x, y, &self.regions);
        if let Some(zone) = update.zone_changed {
            log::debug!("[rebecca] cursor zone {}", zone.as_str());
            self.view.apply_zone(zone);
        }
        let Some(pos) = update.position else {
            return;
        };
        self.pending.set(Some(pos));
        if self.frame_scheduled {
            return;
        }
        self.frame_scheduled = true;
        let weak = weak.clone();
        let batch = self.batch.clone();
        next_frame(move || {
            if !batch.is_alive() {
                return;
            }
            if let Some(state) = weak.upgrade() {
                if let Ok(mut s) = state.try_borrow_mut() {
                    s.frame_scheduled = false;
                    if let Some((x, y)) = s.pending.take() {
                        s.view.move_to(x, y);
                    }
                }
            }
        });
    }

    fn on_mouse_leave(&mut self) {
        self.cursor.on_leave();
        self.pending.set(None);
        self.view.show(false);
    }

    fn on_mouse_enter(&mut self) {
        self.cursor.on_leave();
        if !self.showing_home() {
            self.view.apply_zone(CursorZone::Default);
        }
    }

    fn open_home(&mut self) {
        if self.showing_home() {
            return;
        }
        self.audio.play(Track::Home3d, |_| {});
        dom::set_class(&self.interactive, "active", true);
        if let Some(w) = &self.wrapper {
            w.set_hidden(false);
        }
        self.view.show(false);
        let root = self
            .wrapper
            .as_ref()
            .and_then(|w| w.query_selector(EMBEDDED_ROOT_SELECTOR).ok().flatten())
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let Some(root) = root else {
            log::warn!("[rebecca] no embedded HomePage root");
            return;
        };
        match HomePage::mount(&self.document, &root) {
            Ok(page) => self.home = Some(page),
            Err(e) => log::error!("[rebecca] embedded HomePage: {:?}", e),
        }
    }

    fn close_home(&mut self) {
        self.audio.play(Track::Home3d, |_| {});
        self.home = None;
        dom::set_class(&self.interactive, "active", false);
        if let Some(w) = &self.wrapper {
            w.set_hidden(true);
        }
        self.cursor.on_leave();
        self.view.apply_zone(CursorZone::Default);
    }
}

/// Mirrors the CTA intersection ratio into classes and a css variable.
struct CtaObserver {
    observer: web::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl CtaObserver {
    #[allow(deprecated)]
    fn observe(section: web::HtmlElement) -> anyhow::Result<Self> {
        let target = section.clone();
        let content = section
            .query_selector(".cta-content")
            .ok()
            .flatten();
        let mut last = CtaReveal::default();
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                let reveal = CtaReveal::from_ratio(entry.intersection_ratio());
                if reveal.code_rain_active != last.code_rain_active {
                    log::debug!("[rebecca] cta effect {}", reveal.code_rain_active);
                }
                dom::set_class(&target, "active-effect", reveal.code_rain_active);
                if let Some(c) = &content {
                    dom::set_class(c, "visible", reveal.content_visible);
                }
                dom::set_style(
                    &target,
                    "--cta-title-progress",
                    &format!("{:.3}", reveal.title_progress),
                );
                last = reveal;
            }
        }) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let thresholds: js_sys::Array = intersection_thresholds()
            .into_iter()
            .map(JsValue::from_f64)
            .collect();
        let mut init = web::IntersectionObserverInit::new();
        init.threshold(&thresholds);
        let observer =
            web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
        observer.observe(&section);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for CtaObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct RebeccaPage {
    state: Rc<RefCell<RebeccaState>>,
    _listeners: Vec<Listener>,
    _fade_in: Option<Timeout>,
    _cta: Option<CtaObserver>,
    _voice: Option<VoiceButton>,
    _glitch: Vec<GlitchTextView>,
}

impl RebeccaPage {
    pub fn mount(document: &web::Document, root: web::HtmlElement) -> anyhow::Result<Self> {
        let interactive = dom::element_by_id::<web::HtmlElement>(document, INTERACTIVE_CONTAINER_ID)?;
        let wrapper = document
            .get_element_by_id(SCROLL_CONTAINER_ID)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        if let Some(w) = &wrapper {
            w.set_hidden(true);
        }

        let mut audio = AudioBank::default();
        audio.preload(Track::Home3d);

        let view = CursorView::new(document, root.clone())?;
        view.apply_zone(CursorZone::Default);

        let state = Rc::new(RefCell::new(RebeccaState {
            cursor: ZoneCursor::default(),
            view,
            regions: DomRegions::new(document.clone()),
            pending: Cell::new(None),
            frame_scheduled: false,
            batch: Liveness::new(),
            interactive: interactive.clone(),
            wrapper: wrapper.clone(),
            home: None,
            audio,
            document: document.clone(),
        }));

        let mut listeners = Vec::with_capacity(5);

        let weak = Rc::downgrade(&state);
        listeners.push(Listener::typed(document, "mousemove", move |e: web::MouseEvent| {
            if let Some(state) = weak.upgrade() {
                state
                    .borrow_mut()
                    .on_mouse_move(e.client_x() as f64, e.client_y() as f64, &weak);
            }
        }));

        let weak = Rc::downgrade(&state);
        listeners.push(Listener::new(&root, "mouseleave", move |_| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_mouse_leave();
            }
        }));

        let weak = Rc::downgrade(&state);
        listeners.push(Listener::new(&root, "mouseenter", move |_| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_mouse_enter();
            }
        }));

        let weak = Rc::downgrade(&state);
        listeners.push(Listener::new(&interactive, "click", move |_| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().open_home();
            }
        }));

        if let Some(w) = &wrapper {
            let weak = Rc::downgrade(&state);
            listeners.push(Listener::new(w, "click", move |e| {
                e.stop_propagation();
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().close_home();
                }
            }));
        }

        let doc = document.clone();
        let fade_in = Timeout::new(FADE_IN_DELAY_MS, move || {
            if let Ok(nodes) = doc.query_selector_all(FADE_IN_SELECTOR) {
                for el in (0..nodes.length())
                    .filter_map(|i| nodes.item(i))
                    .filter_map(|n| n.dyn_into::<web::Element>().ok())
                {
                    dom::set_class(&el, FADE_IN_ACTIVE_CLASS, true);
                }
            }
        });

        let cta = match dom::element_by_id::<web::HtmlElement>(document, CTA_ID) {
            Ok(section) => match CtaObserver::observe(section) {
                Ok(o) => Some(o),
                Err(e) => {
                    log::warn!("[rebecca] {:?}", e);
                    None
                }
            },
            Err(_) => None,
        };

        let voice = VoiceButton::mount(&root)?;
        let glitch = glitch::mount_all(document, &root);
        log::info!("[rebecca] mounted ({} glitch texts)", glitch.len());

        Ok(Self {
            state,
            _listeners: listeners,
            _fade_in: fade_in,
            _cta: cta,
            _voice: voice,
            _glitch: glitch,
        })
    }
}

impl Drop for RebeccaPage {
    fn drop(&mut self) {
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.batch.kill();
            s.home = None;
            s.audio.release_all();
            s.view.show(false);
            s.view.cross.remove();
        }
    }
}
