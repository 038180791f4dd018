use site_core::frame::{FrameControl, FrameLoop, FrameRequester, Liveness};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` behind the core frame-loop trait.
pub struct RafRequester {
    slot: FrameSlot,
    pending: Option<i32>,
}

impl FrameRequester for RafRequester {
    fn request_frame(&mut self) {
        let Some(w) = web::window() else {
            return;
        };
        if let Some(cb) = self.slot.borrow().as_ref() {
            self.pending = w.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
        }
    }

    fn cancel_frame(&mut self) {
        if let (Some(w), Some(id)) = (web::window(), self.pending.take()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

/// Owns a running frame loop; stops it when dropped.
pub struct FrameHandle {
    frame_loop: Rc<RefCell<FrameLoop<RafRequester>>>,
    slot: FrameSlot,
    alive: Liveness,
}

impl FrameHandle {
    pub fn is_running(&self) -> bool {
        self.alive.is_alive()
            && self
                .frame_loop
                .try_borrow()
                .map(|l| l.is_alive())
                .unwrap_or(true)
    }

    /// Restarts a loop whose body returned `Stop`.
    pub fn resume(&self) {
        if !self.alive.is_alive() {
            return;
        }
        if let Ok(mut l) = self.frame_loop.try_borrow_mut() {
            l.start();
        }
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.alive.kill();
        match self.frame_loop.try_borrow_mut() {
            Ok(mut l) => {
                l.stop();
                drop(l);
                self.slot.borrow_mut().take();
            }
            // dropped from inside its own frame: the closure is still running,
            // so leak it; the killed flag keeps it from rescheduling
            Err(_) => {
                if let Some(cb) = self.slot.borrow_mut().take() {
                    cb.forget();
                }
            }
        }
    }
}

/// Runs `body` every animation frame with the rAF timestamp until it returns
/// `Stop` or the handle is dropped.
pub fn start_loop(mut body: impl FnMut(f64) -> FrameControl + 'static) -> FrameHandle {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let frame_loop = Rc::new(RefCell::new(FrameLoop::new(RafRequester {
        slot: slot.clone(),
        pending: None,
    })));
    let alive = Liveness::new();

    let loop_tick = Rc::downgrade(&frame_loop);
    let alive_tick = alive.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let Some(frame_loop) = loop_tick.upgrade() else {
            return;
        };
        let Ok(mut l) = frame_loop.try_borrow_mut() else {
            return;
        };
        l.on_frame(|| {
            if !alive_tick.is_alive() {
                return FrameControl::Stop;
            }
            let control = body(ts);
            if alive_tick.is_alive() {
                control
            } else {
                FrameControl::Stop
            }
        });
    }) as Box<dyn FnMut(f64)>));

    frame_loop.borrow_mut().start();
    FrameHandle {
        frame_loop,
        slot,
        alive,
    }
}

/// One-shot `requestAnimationFrame`, used to batch style writes.
pub fn next_frame(f: impl FnOnce() + 'static) {
    let Some(w) = web::window() else {
        return;
    };
    let cb = Closure::once(move |_ts: f64| f());
    _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    cb.forget();
}
