use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct Shared {
    ready: bool,
    wakers: Vec<Waker>,
    callbacks: Vec<Box<dyn FnOnce()>>,
}

/// One-shot readiness latch resolved by whoever owns the awaited resource
/// (here: the 3D scene once its objects are mounted).
#[derive(Clone, Default)]
pub struct ReadySignal {
    shared: Rc<RefCell<Shared>>,
}

impl ReadySignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.shared.borrow().ready
    }

    /// Idempotent. Wakers and callbacks run after the borrow is released so
    /// they may touch the signal again.
    pub fn resolve(&self) {
        let (wakers, callbacks) = {
            let mut s = self.shared.borrow_mut();
            if s.ready {
                return;
            }
            s.ready = true;
            (
                std::mem::take(&mut s.wakers),
                std::mem::take(&mut s.callbacks),
            )
        };
        for w in wakers {
            w.wake();
        }
        for cb in callbacks {
            cb();
        }
    }

    /// Runs `f` once ready; immediately if already resolved.
    pub fn on_ready(&self, f: impl FnOnce() + 'static) {
        if self.is_ready() {
            f();
            return;
        }
        self.shared.borrow_mut().callbacks.push(Box::new(f));
    }

    pub fn wait(&self) -> ReadyFuture {
        ReadyFuture {
            shared: self.shared.clone(),
        }
    }
}

pub struct ReadyFuture {
    shared: Rc<RefCell<Shared>>,
}

impl Future for ReadyFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut s = self.shared.borrow_mut();
        if s.ready {
            return Poll::Ready(());
        }
        if !s.wakers.iter().any(|w| w.will_wake(cx.waker())) {
            s.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}
