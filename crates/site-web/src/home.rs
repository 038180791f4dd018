//! HomePage shell: feeds DOM events into the director and executes the
//! commands it returns.

use crate::audio::{interaction_listeners, AudioBank};
use crate::dom::{self, Listener, Timeout};
use crate::effects::TrailLayer;
use crate::frame::{start_loop, FrameHandle};
use crate::scene::{self, JsScene};
use site_core::constants::{
    CANVAS_CONTAINER_SELECTOR, GLITCH_CLASS, READINESS_TIMEOUT_MS, TRAIL_CANVAS_SELECTOR,
    TRANSITIONING_CLASS,
};
use site_core::timeline::{apply_pose, SceneObject, SceneTargets};
use site_core::{
    EffectRegistry, FrameControl, HomeDirector, Liveness, PageCommand, PageConfig,
    PerformanceProfile, ScrollMetrics, Track,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type Shared = Rc<RefCell<HomeState>>;

struct HomeState {
    director: HomeDirector,
    scene: JsScene,
    audio: AudioBank,
    container: Option<web::HtmlElement>,
    gestures: Vec<Listener>,
    ticker: Option<FrameHandle>,
    /// Deadline the background timer is armed for.
    deadline_at: Option<f64>,
    out: Vec<PageCommand>,
}

impl HomeState {
    fn execute(&mut self, cmd: PageCommand, weak: &Weak<RefCell<HomeState>>) {
        match cmd {
            PageCommand::SetTransform { object, position } => {
                apply_pose(&mut self.scene, object, position);
            }
            PageCommand::SetTextOpacity { line, opacity } => {
                self.scene.set_text_opacity(line, opacity);
            }
            PageCommand::SetGlitch(on) => {
                if let Some(el) = &self.container {
                    dom::set_class(el, GLITCH_CLASS, on);
                }
            }
            PageCommand::SetTransitioning(on) => {
                if let Some(el) = &self.container {
                    dom::set_class(el, TRANSITIONING_CLASS, on);
                }
            }
            PageCommand::PlayAudio(track) => {
                let weak = weak.clone();
                self.audio.play(track, move |ok| {
                    if let Some(state) = weak.upgrade() {
                        dispatch(&state, |d, out| d.on_play_result(track, ok, out));
                    }
                });
            }
            PageCommand::PauseAudio(track) => self.audio.pause(track),
            PageCommand::ReleaseAudio(track) => self.audio.release(track),
            PageCommand::DetachInteractionListeners => self.gestures.clear(),
            PageCommand::ApplyPortal(frame) => {
                self.scene.apply_portal(&frame, self.container.as_ref());
            }
            PageCommand::Navigate(path) => {
                if let Some(w) = web::window() {
                    if let Err(e) = w.location().set_href(path) {
                        log::error!("[home] navigation to {} failed: {:?}", path, e);
                    }
                }
            }
        }
    }

    /// Arms a plain timer for the director's next deadline; it still fires in
    /// hidden tabs, where animation frames stop.
    fn sync_deadline(&mut self, weak: &Weak<RefCell<HomeState>>) {
        let Some(at) = self.director.next_deadline() else {
            return;
        };
        if self.deadline_at == Some(at) {
            return;
        }
        self.deadline_at = Some(at);
        let delay = (at - dom::now_ms()).ceil().max(0.0) as i32;
        let weak = weak.clone();
        dom::set_timeout(delay, move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            match state.try_borrow_mut() {
                Ok(mut s) if s.deadline_at == Some(at) => s.deadline_at = None,
                _ => return,
            }
            dispatch(&state, |d, out| d.tick(dom::now_ms(), out));
        });
    }

    /// Keeps the frame loop alive exactly while the director has timers.
    fn sync_ticker(&mut self, weak: &Weak<RefCell<HomeState>>) {
        self.sync_deadline(weak);
        if !self.director.needs_frames() {
            return;
        }
        if let Some(t) = &self.ticker {
            if !t.is_running() {
                t.resume();
            }
            return;
        }
        let weak = weak.clone();
        self.ticker = Some(start_loop(move |_| {
            let Some(state) = weak.upgrade() else {
                return FrameControl::Stop;
            };
            dispatch(&state, |d, out| d.tick(dom::now_ms(), out));
            match state.try_borrow() {
                Ok(s) if s.director.needs_frames() => FrameControl::Continue,
                _ => FrameControl::Stop,
            }
        }));
    }
}

/// Runs one director step and executes what it emitted.
fn dispatch(state: &Shared, step: impl FnOnce(&mut HomeDirector, &mut Vec<PageCommand>)) {
    let weak = Rc::downgrade(state);
    let Ok(mut s) = state.try_borrow_mut() else {
        log::warn!("[home] re-entrant dispatch dropped");
        return;
    };
    let mut out = std::mem::take(&mut s.out);
    step(&mut s.director, &mut out);
    for cmd in out.drain(..) {
        s.execute(cmd, &weak);
    }
    s.out = out;
    s.sync_ticker(&weak);
}

fn read_metrics(document: &web::Document, container: Option<&web::Element>) -> ScrollMetrics {
    match container {
        Some(el) => ScrollMetrics {
            scroll_top: el.scroll_top() as f64,
            scroll_height: el.scroll_height() as f64,
            client_height: el.client_height() as f64,
        },
        None => {
            let scroll_top = web::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or_default();
            let (scroll_height, client_height) = document
                .document_element()
                .map(|el| (el.scroll_height() as f64, el.client_height() as f64))
                .unwrap_or_default();
            ScrollMetrics {
                scroll_top,
                scroll_height,
                client_height,
            }
        }
    }
}

fn page_config(root: &web::Element) -> anyhow::Result<PageConfig> {
    let profile = PerformanceProfile::for_width(dom::viewport_width(), dom::prefers_reduced_motion());
    PageConfig::from_attributes(|key| root.get_attribute(&format!("data-{}", key)), profile)
        .map_err(anyhow::Error::from)
}

/// A mounted HomePage. Dropping it unmounts: listeners go, ambient audio is
/// released and the scene stops receiving transforms.
pub struct HomePage {
    state: Shared,
    ready: Liveness,
    _ready_timeout: Option<Timeout>,
    _scroll: Listener,
    _trail: Option<TrailLayer>,
}

impl HomePage {
    pub fn mount(document: &web::Document, root: &web::HtmlElement) -> anyhow::Result<Self> {
        let config = page_config(root)?;
        let profile = config.profile;
        let scroll_surface = match &config.scroll_container {
            Some(id) => Some(dom::element_by_id::<web::Element>(document, id)?),
            None => None,
        };
        let director = HomeDirector::mount(config, &EffectRegistry::global())?;

        let container = root
            .query_selector(CANVAS_CONTAINER_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let mut audio = AudioBank::default();
        audio.preload(Track::Ambient);
        audio.preload(Track::Transition);

        let state: Shared = Rc::new(RefCell::new(HomeState {
            director,
            scene: JsScene::default(),
            audio,
            container,
            gestures: Vec::new(),
            ticker: None,
            deadline_at: None,
            out: Vec::with_capacity(16),
        }));

        let weak = Rc::downgrade(&state);
        state.borrow_mut().gestures = interaction_listeners(document, move || {
            if let Some(state) = weak.upgrade() {
                dispatch(&state, |d, out| d.on_interaction(out));
            }
        });

        let doc = document.clone();
        let surface = scroll_surface.clone();
        let weak = Rc::downgrade(&state);
        let on_scroll = move |_: web::Event| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let raw = read_metrics(&doc, surface.as_ref()).raw_percentage();
            dispatch(&state, |d, out| d.on_scroll(raw, dom::now_ms(), out));
        };
        let scroll = match &scroll_surface {
            Some(el) => Listener::new(el, "scroll", on_scroll),
            None => {
                let w = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
                Listener::new(&w, "scroll", on_scroll)
            }
        };

        let trail = if profile.reduced_motion {
            None
        } else {
            root.query_selector(TRAIL_CANVAS_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
                .and_then(|canvas| match TrailLayer::mount(document, root, canvas, &profile) {
                    Ok(layer) => Some(layer),
                    Err(e) => {
                        log::warn!("[home] cursor trail disabled: {:?}", e);
                        None
                    }
                })
        };

        let (ready, ready_timeout) = Self::await_scene(&state);

        let raw = read_metrics(document, scroll_surface.as_ref()).raw_percentage();
        dispatch(&state, |d, out| d.on_scroll(raw, dom::now_ms(), out));

        Ok(Self {
            state,
            ready,
            _ready_timeout: ready_timeout,
            _scroll: scroll,
            _trail: trail,
        })
    }

    /// Binds the animator once the scene reports its objects, giving up after
    /// the readiness timeout.
    fn await_scene(state: &Shared) -> (Liveness, Option<Timeout>) {
        let signal = scene::reset_ready_signal();
        let already_mounted = {
            let s = state.borrow();
            SceneObject::ALL.iter().all(|o| s.scene.is_mounted(*o))
        };
        if already_mounted {
            signal.resolve();
        }

        let alive = Liveness::new();
        let waiting = signal.clone();
        let weak = Rc::downgrade(state);
        let alive_wait = alive.clone();
        spawn_local(async move {
            waiting.wait().await;
            if !alive_wait.is_alive() {
                return;
            }
            if let Some(state) = weak.upgrade() {
                dispatch(&state, |d, out| d.bind_scene(out));
            }
        });

        let alive_timeout = alive.clone();
        let timeout = Timeout::new(READINESS_TIMEOUT_MS, move || {
            if !signal.is_ready() {
                log::warn!(
                    "[home] scene not ready after {} ms, scroll animation disabled",
                    READINESS_TIMEOUT_MS
                );
                alive_timeout.kill();
            }
        });
        (alive, timeout)
    }
}

impl Drop for HomePage {
    fn drop(&mut self) {
        self.ready.kill();
        dispatch(&self.state, |d, out| d.unmount(out));
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.ticker = None;
            s.gestures.clear();
            s.audio.release_all();
        }
    }
}
