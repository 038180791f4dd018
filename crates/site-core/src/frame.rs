use std::cell::Cell;
use std::rc::Rc;

/// Platform hook that schedules the next frame callback.
pub trait FrameRequester {
    fn request_frame(&mut self);
    /// Drop a pending request, if the platform supports it.
    fn cancel_frame(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Repeating frame callback that only reschedules itself while alive.
pub struct FrameLoop<R> {
    requester: R,
    alive: bool,
    frames: u64,
}

impl<R: FrameRequester> FrameLoop<R> {
    pub fn new(requester: R) -> Self {
        Self {
            requester,
            alive: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if self.alive {
            return;
        }
        self.alive = true;
        self.requester.request_frame();
    }

    /// Runs one frame. `body` is skipped entirely once the loop is stopped.
    pub fn on_frame(&mut self, body: impl FnOnce() -> FrameControl) {
        if !self.alive {
            return;
        }
        self.frames += 1;
        if body() == FrameControl::Stop {
            self.alive = false;
            return;
        }
        if self.alive {
            self.requester.request_frame();
        }
    }

    pub fn stop(&mut self) {
        if self.alive {
            self.alive = false;
            self.requester.cancel_frame();
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    pub fn requester_mut(&mut self) -> &mut R {
        &mut self.requester
    }
}

/// Shared mounted flag for one-off callbacks (timeouts, batched writes).
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn kill(&self) {
        self.0.set(false);
    }
}
