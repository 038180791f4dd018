use crate::dom::{self, Listener};
use crate::frame::{start_loop, FrameHandle};
use site_core::frame::FrameControl;
use site_core::glitch::{GlitchLayer, GlitchText, RESTING_LAYERS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Elements carrying this attribute get the layered glitch treatment; the
/// attribute value `inactive` disables interaction.
pub const GLITCH_TEXT_SELECTOR: &str = "[data-quantum-glitch]";

const LAYER_CLASS: &str = "quantum-layer";
const PARTICLES_CLASS: &str = "quantum-particles";

struct GlitchState {
    text: GlitchText,
    layers: Vec<web::HtmlElement>,
    particles: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    host: web::HtmlElement,
    drag_origin: (i32, i32),
    ticker: Option<FrameHandle>,
}

impl GlitchState {
    fn paint_layers(&self, layers: &[GlitchLayer; 3]) {
        for (el, layer) in self.layers.iter().zip(layers) {
            dom::set_style(el, "left", &format!("{:.1}px", layer.dx));
            dom::set_style(el, "top", &format!("{:.1}px", layer.dy));
            dom::set_style(el, "color", layer.color);
            dom::set_style(el, "opacity", &format!("{:.2}", layer.opacity));
        }
        let filter = if self.text.is_glitching() {
            "brightness(1.12) contrast(1.18) blur(0.5px)"
        } else {
            "none"
        };
        dom::set_style(&self.host, "filter", filter);
    }

    #[allow(deprecated)]
    fn frame(&mut self) -> FrameControl {
        let layers = self.text.layers();
        self.paint_layers(&layers);

        let (w, h) = (self.host.offset_width() as f64, self.host.offset_height() as f64);
        if self.particles.width() != w as u32 || self.particles.height() != h as u32 {
            self.particles.set_width(w as u32);
            self.particles.set_height(h as u32);
        }
        let ctx = self.ctx.clone();
        ctx.clear_rect(0.0, 0.0, w, h);
        let (cx, cy) = (w / 2.0, h / 2.0);
        let particles = self.text.step_particles();
        for p in particles {
            ctx.set_filter(&format!("blur({:.1}px)", p.blur));
            ctx.set_global_alpha((p.opacity * p.life).clamp(0.0, 1.0) as f64);
            ctx.set_fill_style(&JsValue::from_str(p.color));
            ctx.begin_path();
            _ = ctx.ellipse(
                cx + p.x as f64,
                cy + p.y as f64,
                (8.0 * p.life).max(0.0) as f64,
                (3.0 * p.life).max(0.0) as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }
        let animating = !particles.is_empty();
        ctx.set_filter("none");
        ctx.set_global_alpha(1.0);

        if self.text.is_glitching() || animating {
            FrameControl::Continue
        } else {
            self.paint_layers(&RESTING_LAYERS);
            FrameControl::Stop
        }
    }
}

/// Interactive glitch text bound to one host element.
pub struct GlitchTextView {
    state: Rc<RefCell<GlitchState>>,
    _listeners: Vec<Listener>,
}

fn wake(state: &Rc<RefCell<GlitchState>>) {
    let Ok(mut s) = state.try_borrow_mut() else {
        return;
    };
    if let Some(t) = &s.ticker {
        t.resume();
        return;
    }
    let weak = Rc::downgrade(state);
    s.ticker = Some(start_loop(move |_| match weak.upgrade() {
        Some(state) => match state.try_borrow_mut() {
            Ok(mut s) => s.frame(),
            Err(_) => FrameControl::Continue,
        },
        None => FrameControl::Stop,
    }));
}

impl GlitchTextView {
    pub fn mount(document: &web::Document, host: web::HtmlElement, seed: u64) -> anyhow::Result<Self> {
        let label = host.text_content().unwrap_or_default();
        let js = |e: JsValue| anyhow::anyhow!("{:?}", e);

        let mut layers = Vec::with_capacity(3);
        for _ in 0..3 {
            let span = document
                .create_element("span")
                .map_err(js)?
                .dyn_into::<web::HtmlElement>()
                .map_err(|_| anyhow::anyhow!("span is not an HtmlElement"))?;
            span.set_class_name(LAYER_CLASS);
            span.set_text_content(Some(&label));
            span.set_attribute("aria-hidden", "true").map_err(js)?;
            host.append_child(&span).map_err(js)?;
            layers.push(span);
        }
        let particles = document
            .create_element("canvas")
            .map_err(js)?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| anyhow::anyhow!("canvas is not an HtmlCanvasElement"))?;
        particles.set_class_name(PARTICLES_CLASS);
        host.append_child(&particles).map_err(js)?;
        let ctx = particles
            .get_context("2d")
            .map_err(js)?
            .ok_or_else(|| anyhow::anyhow!("no 2d context for glitch particles"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let mut text = GlitchText::new(seed);
        text.inactive = host.get_attribute("data-quantum-glitch").as_deref() == Some("inactive");

        let state = Rc::new(RefCell::new(GlitchState {
            text,
            layers,
            particles,
            ctx,
            host: host.clone(),
            drag_origin: (0, 0),
            ticker: None,
        }));
        state.borrow().paint_layers(&RESTING_LAYERS);

        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut listeners = Vec::with_capacity(5);

        let st = state.clone();
        listeners.push(Listener::new(&host, "mouseover", move |_| {
            let glitching = {
                let mut s = st.borrow_mut();
                s.text.hovered = !s.text.inactive;
                s.text.is_glitching()
            };
            if glitching {
                wake(&st);
            }
        }));

        let st = state.clone();
        listeners.push(Listener::new(&host, "mouseout", move |_| {
            st.borrow_mut().text.leave();
        }));

        let st = state.clone();
        listeners.push(Listener::typed(&host, "mousedown", move |e: web::MouseEvent| {
            {
                let mut s = st.borrow_mut();
                s.text.begin_drag();
                s.drag_origin = (e.client_x(), e.client_y());
            }
            wake(&st);
        }));

        let st = state.clone();
        listeners.push(Listener::typed(&window, "mousemove", move |e: web::MouseEvent| {
            let mut s = st.borrow_mut();
            if s.text.dragging {
                let (x0, y0) = s.drag_origin;
                s.text
                    .drag_to([(e.client_x() - x0) as f32, (e.client_y() - y0) as f32]);
            }
        }));

        let st = state.clone();
        listeners.push(Listener::new(&window, "mouseup", move |_| {
            let dragging = st.borrow().text.dragging;
            if dragging {
                st.borrow_mut().text.release();
                wake(&st);
            }
        }));

        Ok(Self {
            state,
            _listeners: listeners,
        })
    }
}

impl Drop for GlitchTextView {
    fn drop(&mut self) {
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.ticker = None;
            for el in s.layers.drain(..) {
                el.remove();
            }
            s.particles.remove();
        }
    }
}

/// Mounts every glitch text under `root`.
pub fn mount_all(document: &web::Document, root: &web::Element) -> Vec<GlitchTextView> {
    let Ok(nodes) = root.query_selector_all(GLITCH_TEXT_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .enumerate()
        .filter_map(|(i, host)| match GlitchTextView::mount(document, host, i as u64 + 1) {
            Ok(view) => Some(view),
            Err(e) => {
                log::warn!("[glitch] {:?}", e);
                None
            }
        })
        .collect()
}
