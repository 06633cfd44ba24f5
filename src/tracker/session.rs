//! Observer lifecycle and change fan-out around [`ActiveSection`].

use super::{ActiveSection, Observation, ObserverOptions, Transition};
use crate::section::{Registry, Section};
use crate::debug;
use std::sync::Arc;

/// A live observation handle attached to section elements.
pub trait Observer {
    /// Start observing the element with the given section id.
    fn observe(&mut self, target: &str);

    /// Stop observing every target. Must be idempotent.
    fn disconnect(&mut self);
}

/// The platform's viewport-observation facility.
pub trait Viewport {
    type Observer: Observer;

    fn create_observer(&mut self, options: &ObserverOptions) -> Self::Observer;

    /// Whether the element for `id` exists yet.
    fn is_rendered(&self, id: &str) -> bool;
}

/// Content that only runs while its section is active.
pub trait ActiveGate {
    fn set_active(&mut self, active: bool);
}

/// Receives active-section changes (e.g. the sidebar highlight).
pub trait Listener {
    fn on_transition(&mut self, from: &Section, to: &Section);
}

impl<F: FnMut(&Section, &Section)> Listener for F {
    fn on_transition(&mut self, from: &Section, to: &Section) {
        self(from, to)
    }
}

/// Page-level owner of the active-section state and its observer.
///
/// At most one observer is alive at a time. Dropping the tracker disconnects
/// it, so no handle outlives the page view.
pub struct Tracker<V: Viewport> {
    state: ActiveSection,
    options: ObserverOptions,
    observer: Option<V::Observer>,
    gates: Vec<(usize, Box<dyn ActiveGate>)>,
    listeners: Vec<Box<dyn Listener>>,
}

impl<V: Viewport> Tracker<V> {
    pub fn new(registry: Arc<Registry>, options: ObserverOptions) -> Self {
        Self {
            state: ActiveSection::new(registry),
            options,
            observer: None,
            gates: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &ActiveSection {
        &self.state
    }

    pub fn active_id(&self) -> &str {
        self.state.active_id()
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.is_some()
    }

    /// Create the observer and attach it to every rendered section.
    ///
    /// Any previous observer is disconnected first. Sections whose elements
    /// are not rendered yet are skipped without error. Returns the number of
    /// observed sections.
    pub fn mount(&mut self, viewport: &mut V) -> usize {
        self.unmount();

        let mut observer = viewport.create_observer(&self.options);
        let mut observed = 0;
        for id in self.state.registry().ids() {
            if viewport.is_rendered(id) {
                observer.observe(id);
                observed += 1;
            } else {
                debug!("tracker"; "section `{}` not rendered, skipped", id);
            }
        }
        self.observer = Some(observer);
        observed
    }

    /// Disconnect and release the observer, if any.
    pub fn unmount(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
    }

    /// Swap in a new registry, re-registering observations when ids changed.
    ///
    /// The active section is kept when its id survives, otherwise it resets
    /// to the new first entry and listeners see the change. Returns true when
    /// the observer was recreated.
    pub fn remount(&mut self, viewport: &mut V, registry: Arc<Registry>) -> bool {
        let previous = self.state.active().clone();

        if self.state.registry().same_ids(&registry) {
            self.state = carry_active(&self.state, registry);
            return false;
        }

        let was_mounted = self.is_mounted();
        self.unmount();
        self.gates.clear();
        self.state = carry_active(&self.state, registry);

        if previous.id != self.state.active_id() {
            let current = self.state.active().clone();
            debug!("tracker"; "active: {} -> {} (sections changed)", previous.id, current.id);
            for listener in &mut self.listeners {
                listener.on_transition(&previous, &current);
            }
        }

        if was_mounted {
            self.mount(viewport);
        }
        true
    }

    /// Register a gate for section `id` and sync it to the current state.
    ///
    /// Returns false (and drops the gate) when `id` is not registered.
    pub fn attach(&mut self, id: &str, mut gate: Box<dyn ActiveGate>) -> bool {
        let Some(pos) = self.state.registry().position(id) else {
            return false;
        };
        gate.set_active(self.state.active_index() == pos);
        self.gates.push((pos, gate));
        true
    }

    pub fn listen(&mut self, listener: impl Listener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Handle one notification batch from the observer.
    ///
    /// Batches delivered while unmounted are stale and ignored.
    pub fn on_batch(&mut self, batch: &[Observation]) -> Option<Transition> {
        if !self.is_mounted() {
            return None;
        }

        let transition = self.state.apply(batch)?;
        let registry = Arc::clone(self.state.registry());
        let (from, to) = (&registry[transition.from], &registry[transition.to]);
        debug!("tracker"; "active: {} -> {}", from.id, to.id);

        for (pos, gate) in &mut self.gates {
            if *pos == transition.from {
                gate.set_active(false);
            } else if *pos == transition.to {
                gate.set_active(true);
            }
        }
        for listener in &mut self.listeners {
            listener.on_transition(from, to);
        }
        Some(transition)
    }
}

impl<V: Viewport> Drop for Tracker<V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn carry_active(prev: &ActiveSection, registry: Arc<Registry>) -> ActiveSection {
    let mut next = ActiveSection::new(registry);
    let id = prev.active_id().to_string();
    next.apply(&[Observation::entering(id, 0.0)]);
    next
}
