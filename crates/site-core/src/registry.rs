use fnv::FnvHashSet;
use std::cell::RefCell;
use std::rc::Rc;

/// Names of effects that must not run twice at once.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    active: Rc<RefCell<FnvHashSet<&'static str>>>,
}

thread_local! {
    static GLOBAL: EffectRegistry = EffectRegistry::default();
}

impl EffectRegistry {
    /// Shared per-thread instance; the browser main thread is the only one.
    pub fn global() -> Self {
        GLOBAL.with(|r| r.clone())
    }

    /// Claims `name`; `None` when another owner holds it.
    pub fn acquire(&self, name: &'static str) -> Option<EffectLease> {
        if !self.active.borrow_mut().insert(name) {
            log::warn!("[registry] effect `{}` already active", name);
            return None;
        }
        Some(EffectLease {
            name,
            registry: self.clone(),
        })
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.borrow().contains(name)
    }

    pub fn active_count(&self) -> usize {
        self.active.borrow().len()
    }

    /// Forget every claim. Outstanding leases become no-ops.
    pub fn reset(&self) {
        self.active.borrow_mut().clear();
    }

    fn release(&self, name: &'static str) {
        self.active.borrow_mut().remove(name);
    }
}

/// Held for as long as the effect is mounted; releases on drop.
#[derive(Debug)]
pub struct EffectLease {
    name: &'static str,
    registry: EffectRegistry,
}

impl EffectLease {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for EffectLease {
    fn drop(&mut self) {
        self.registry.release(self.name);
    }
}
