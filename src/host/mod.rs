//! Single-threaded host event source.
//!
//! Stands in for the environment's scroll, resize, and load notifications. Components register
//! with [`Host::on_event`] and hold the returned [`Subscription`]; dropping it removes the
//! listener, so release is guaranteed on every exit path.

use crate::foundation::core::{Size, Viewport};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::{Rc, Weak};

/// What changed in the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEventKind {
    /// Scroll offset changed.
    Scroll,
    /// Viewport size changed.
    Resize,
    /// Late content (fonts, images) finished loading; layout may have shifted.
    Load,
}

/// Notification delivered to listeners, with the viewport state at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HostEvent {
    /// Event kind.
    pub kind: HostEventKind,
    /// Viewport after the change.
    pub viewport: Viewport,
}

type Listener = Box<dyn FnMut(&HostEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
    removed: BTreeSet<u64>,
    dispatching: bool,
    queued: VecDeque<HostEvent>,
}

impl Registry {
    // The caller drops the returned listener after releasing the borrow, since a listener may
    // own further subscriptions.
    fn remove(&mut self, id: u64) -> Option<Listener> {
        let listener = self.listeners.remove(&id);
        if listener.is_none() && self.dispatching {
            // Checked out by the running dispatch.
            self.removed.insert(id);
        }
        listener
    }
}

/// Handle for one registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// Unsubscribe explicitly.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let listener = registry.borrow_mut().remove(self.id);
            drop(listener);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Event source for one page/viewport.
///
/// Scroll samples queued with [`Host::queue_scroll`] are coalesced: only the latest pending
/// sample is dispatched by the next [`Host::frame`]. Events emitted from inside a listener are
/// delivered after the current dispatch finishes, in emission order.
pub struct Host {
    registry: Rc<RefCell<Registry>>,
    viewport: Cell<Viewport>,
    pending_scroll: Cell<Option<f64>>,
}

impl Host {
    /// Host with the given initial viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            registry: Rc::default(),
            viewport: Cell::new(viewport),
            pending_scroll: Cell::new(None),
        }
    }

    /// Current viewport (size and committed scroll offset).
    pub fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    /// Register a listener for all host events.
    pub fn on_event(&self, listener: impl FnMut(&HostEvent) + 'static) -> Subscription {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.listeners.insert(id, Box::new(listener));
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        let reg = self.registry.borrow();
        reg.listeners.len()
    }

    /// Record a scroll sample for the next frame, replacing any pending one.
    pub fn queue_scroll(&self, offset: f64) {
        self.pending_scroll.set(Some(offset));
    }

    /// Return `true` when a scroll sample is waiting for [`Host::frame`].
    pub fn has_pending_frame(&self) -> bool {
        self.pending_scroll.get().is_some()
    }

    /// Run one frame: dispatch the latest pending scroll sample, if any.
    pub fn frame(&self) -> bool {
        let Some(offset) = self.pending_scroll.take() else {
            return false;
        };
        self.set_scroll(offset);
        self.dispatch(HostEventKind::Scroll);
        true
    }

    /// Scroll and dispatch synchronously, dropping any pending sample.
    pub fn scroll_now(&self, offset: f64) {
        self.pending_scroll.set(None);
        self.set_scroll(offset);
        self.dispatch(HostEventKind::Scroll);
    }

    /// Change the viewport size and dispatch a resize.
    pub fn resize(&self, size: Size) {
        let vp = self.viewport.get();
        self.viewport.set(Viewport { size, ..vp });
        self.dispatch(HostEventKind::Resize);
    }

    /// Signal that late content finished loading.
    pub fn notify_load(&self) {
        self.dispatch(HostEventKind::Load);
    }

    fn set_scroll(&self, offset: f64) {
        self.viewport.set(self.viewport.get().with_scroll(offset));
    }

    fn dispatch(&self, kind: HostEventKind) {
        let event = HostEvent {
            kind,
            viewport: self.viewport.get(),
        };
        {
            let mut reg = self.registry.borrow_mut();
            if reg.dispatching {
                reg.queued.push_back(event);
                return;
            }
            reg.dispatching = true;
        }

        let mut next = Some(event);
        while let Some(event) = next {
            let mut listeners = std::mem::take(&mut self.registry.borrow_mut().listeners);
            for (id, listener) in listeners.iter_mut() {
                if self.registry.borrow().removed.contains(id) {
                    continue;
                }
                listener(&event);
            }

            let mut reg = self.registry.borrow_mut();
            let added = std::mem::take(&mut reg.listeners);
            listeners.extend(added);
            let dead: Vec<Listener> = std::mem::take(&mut reg.removed)
                .into_iter()
                .filter_map(|id| listeners.remove(&id))
                .collect();
            reg.listeners = listeners;
            next = reg.queued.pop_front();
            drop(reg);
            drop(dead);
        }
        self.registry.borrow_mut().dispatching = false;
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("viewport", &self.viewport.get())
            .field("listeners", &self.listener_count())
            .field("pending_scroll", &self.pending_scroll.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/host.rs"]
mod tests;
