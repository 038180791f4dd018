use crate::dom::{self, Interval, Listener};
use crate::frame::{start_loop, FrameHandle};
use site_core::constants::{
    FAVICON_ORANGE_SELECTOR, FAVICON_SOURCE_ID, FAVICON_UPDATE_MS, TITLE_DEFAULT,
};
use site_core::device::PerformanceProfile;
use site_core::favicon::{css_rgb, FaviconPulse};
use site_core::frame::FrameControl;
use site_core::registry::{EffectLease, EffectRegistry};
use site_core::title::TitleMarquee;
use site_core::trail::CursorTrail;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const TRAIL_COLOR: &str = "218, 128, 35";

fn is_hidden(document: &web::Document) -> bool {
    document.visibility_state() == web::VisibilityState::Hidden
}

/// An interval step that owns a registry lease. The timer only exists while
/// the tab is visible.
struct TabLoop {
    _lease: EffectLease,
    ms: i32,
    step: Rc<RefCell<dyn FnMut()>>,
    interval: Option<Interval>,
}

impl TabLoop {
    fn new(lease: EffectLease, ms: f64, step: impl FnMut() + 'static) -> Self {
        let step: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(step));
        Self {
            _lease: lease,
            ms: ms.round() as i32,
            step,
            interval: None,
        }
    }

    fn set_running(&mut self, on: bool) {
        if !on {
            self.interval = None;
            return;
        }
        if self.interval.is_some() {
            return;
        }
        let step = Rc::clone(&self.step);
        self.interval = Interval::new(self.ms, move || {
            if let Ok(mut f) = step.try_borrow_mut() {
                (&mut *f)();
            }
        });
    }
}

/// Scrolling title and favicon pulse, shared by every page. Both stop while
/// the tab is hidden and resume on `visibilitychange`.
pub struct TabEffects {
    title: Option<TabLoop>,
    favicon: Option<TabLoop>,
    _visibility: Listener,
}

impl TabEffects {
    pub fn mount(document: &web::Document) -> Self {
        let registry = EffectRegistry::global();

        let title = registry.acquire("title").map(|lease| {
            let doc = document.clone();
            let mut marquee = TitleMarquee::default();
            let ms = marquee.interval_ms();
            TabLoop::new(lease, ms, move || {
                if let Some(t) = marquee.advance() {
                    doc.set_title(t);
                }
            })
        });

        let favicon = registry
            .acquire("favicon")
            .and_then(|lease| FaviconTarget::find(document).map(|target| (lease, target)))
            .map(|(lease, target)| {
                let mut pulse = FaviconPulse::default();
                TabLoop::new(lease, FAVICON_UPDATE_MS, move || {
                    target.paint(pulse.sample(dom::now_ms()));
                })
            });
        if favicon.is_none() {
            log::debug!("[favicon] no #{} svg, pulse disabled", FAVICON_SOURCE_ID);
        }

        let doc = document.clone();
        let visibility = Listener::new(document, "visibilitychange", move |_| {
            set_tab_effects_running(!is_hidden(&doc));
        });
        let mut effects = Self {
            title,
            favicon,
            _visibility: visibility,
        };
        effects.set_running(!is_hidden(document));
        effects
    }

    fn set_running(&mut self, on: bool) {
        for l in self.title.iter_mut().chain(self.favicon.iter_mut()) {
            l.set_running(on);
        }
    }
}

impl Drop for TabEffects {
    fn drop(&mut self) {
        self.set_running(false);
        if self.title.is_some() {
            if let Some(doc) = dom::window_document() {
                doc.set_title(TITLE_DEFAULT);
            }
        }
    }
}

thread_local! {
    static TAB_EFFECTS: RefCell<Option<TabEffects>> = const { RefCell::new(None) };
}

pub fn install_tab_effects(document: &web::Document) {
    TAB_EFFECTS.with(|t| {
        let mut slot = t.borrow_mut();
        if slot.is_none() {
            *slot = Some(TabEffects::mount(document));
        }
    });
}

/// Stops both loops, releases their leases and restores the plain title.
pub fn uninstall_tab_effects() {
    let effects = TAB_EFFECTS.with(|t| t.try_borrow_mut().ok().and_then(|mut s| s.take()));
    drop(effects);
}

fn set_tab_effects_running(on: bool) {
    TAB_EFFECTS.with(|t| {
        if let Ok(mut slot) = t.try_borrow_mut() {
            if let Some(effects) = slot.as_mut() {
                effects.set_running(on);
            }
        }
    });
}

/// The `<link rel=icon>` fed from an inline svg of the isotype.
struct FaviconTarget {
    svg: web::Element,
    orange: Vec<web::Element>,
    link: web::HtmlLinkElement,
}

impl FaviconTarget {
    fn find(document: &web::Document) -> Option<Self> {
        let svg = document.get_element_by_id(FAVICON_SOURCE_ID)?;
        let nodes = svg.query_selector_all(FAVICON_ORANGE_SELECTOR).ok()?;
        let orange = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .collect();
        let link = match document
            .query_selector("link[rel~='icon']")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<web::HtmlLinkElement>().ok())
        {
            Some(link) => link,
            None => {
                let link = document
                    .create_element("link")
                    .ok()?
                    .dyn_into::<web::HtmlLinkElement>()
                    .ok()?;
                link.set_rel("icon");
                document.head()?.append_child(&link).ok()?;
                link
            }
        };
        Some(Self { svg, orange, link })
    }

    fn paint(&self, color: [u8; 3]) {
        let fill = css_rgb(color);
        for el in &self.orange {
            _ = el.set_attribute("fill", &fill);
        }
        let encoded: String = js_sys::encode_uri_component(&self.svg.outer_html()).into();
        self.link.set_href(&format!("data:image/svg+xml,{}", encoded));
    }
}

/// Fading pointer trail drawn on the HomePage overlay canvas.
pub struct TrailLayer {
    state: Rc<RefCell<TrailState>>,
    _listeners: Vec<Listener>,
}

struct TrailState {
    trail: CursorTrail,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    ticker: Option<FrameHandle>,
}

fn fit_to_window(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        canvas.set_width(width.max(1.0) as u32);
        canvas.set_height(height.max(1.0) as u32);
    }
}

impl TrailState {
    #[allow(deprecated)]
    fn draw(&mut self, now: f64) -> FrameControl {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        let ctx = &self.ctx;
        _ = ctx.set_global_composite_operation("destination-out");
        ctx.set_fill_style(&JsValue::from_str("rgba(0, 0, 0, 0.2)"));
        ctx.fill_rect(0.0, 0.0, w, h);

        if self.trail.len() > 1 {
            let mut points = self.trail.points();
            if let (Some(first), Some(last)) = (points.next(), self.trail.points().last()) {
                _ = ctx.set_global_composite_operation("lighter");
                ctx.set_line_cap("round");
                ctx.set_line_join("round");
                let gradient = ctx.create_linear_gradient(
                    first.x as f64,
                    first.y as f64,
                    last.x as f64,
                    last.y as f64,
                );
                for (stop, alpha) in [(0.0, 0.1), (0.5, 0.4), (1.0, 0.8)] {
                    _ = gradient.add_color_stop(stop, &format!("rgba({}, {})", TRAIL_COLOR, alpha));
                }
                ctx.set_stroke_style(&gradient);
                ctx.set_line_width(3.0);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in points {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.stroke();
                ctx.set_shadow_blur(10.0);
                ctx.set_shadow_color(&format!("rgba({}, 0.6)", TRAIL_COLOR));
                ctx.stroke();
                ctx.set_shadow_blur(0.0);
            }
        }

        if self.trail.fade(now) {
            FrameControl::Continue
        } else {
            FrameControl::Stop
        }
    }

    fn clear(&mut self) {
        self.trail.clear();
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }
}

impl TrailLayer {
    pub fn mount(
        document: &web::Document,
        root: &web::HtmlElement,
        canvas: web::HtmlCanvasElement,
        profile: &PerformanceProfile,
    ) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context for the trail canvas"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        fit_to_window(&canvas);

        let state = Rc::new(RefCell::new(TrailState {
            trail: CursorTrail::new(profile),
            canvas: canvas.clone(),
            ctx,
            ticker: None,
        }));

        let mut listeners = Vec::with_capacity(3);
        let st = Rc::downgrade(&state);
        listeners.push(Listener::typed(document, "mousemove", move |e: web::MouseEvent| {
            let Some(state) = st.upgrade() else {
                return;
            };
            let mut s = state.borrow_mut();
            let pushed = s
                .trail
                .push(e.client_x() as f32, e.client_y() as f32, dom::now_ms());
            if !pushed {
                return;
            }
            if let Some(t) = s.ticker.as_ref() {
                t.resume();
                return;
            }
            let st_frame = Rc::downgrade(&state);
            s.ticker = Some(start_loop(move |_| match st_frame.upgrade() {
                Some(state) => state.borrow_mut().draw(dom::now_ms()),
                None => FrameControl::Stop,
            }));
        }));

        let st = Rc::downgrade(&state);
        listeners.push(Listener::new(root, "mouseleave", move |_| {
            if let Some(state) = st.upgrade() {
                state.borrow_mut().clear();
            }
        }));

        if let Some(w) = web::window() {
            listeners.push(Listener::new(&w, "resize", move |_| fit_to_window(&canvas)));
        }

        Ok(Self {
            state,
            _listeners: listeners,
        })
    }
}

impl Drop for TrailLayer {
    fn drop(&mut self) {
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.ticker = None;
            s.clear();
        }
    }
}
