//! In-memory viewport that turns a static layout and scroll offsets into
//! observation batches, the way the browser's facility would.
//!
//! Used by `folio trace` to replay scroll sessions without a browser.

use super::{Observation, Observer, ObserverOptions, Rect, Viewport};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Height of one section in the simulated page.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    pub height: f64,
}

#[derive(Debug)]
struct Scene {
    viewport_height: f64,
    /// `(id, document offset, height)`, stacked in layout order.
    blocks: Vec<(String, f64, f64)>,
    scroll: f64,
}

impl Scene {
    fn rect(&self, id: &str) -> Option<Rect> {
        self.blocks
            .iter()
            .find(|(block, ..)| block == id)
            .map(|(_, offset, height)| Rect::new(offset - self.scroll, *height))
    }
}

#[derive(Debug)]
struct Channel {
    options: ObserverOptions,
    connected: bool,
    last: Vec<Observation>,
    pending: Vec<Observation>,
}

impl Channel {
    fn measure(&self, scene: &Scene, id: &str) -> Option<Observation> {
        let band = self.options.band(scene.viewport_height);
        scene.rect(id).map(|rect| Observation::measure(id, rect, band))
    }
}

/// Simulated page: stacked blocks scrolled inside a fixed-height viewport.
pub struct ScrollSimulator {
    scene: Rc<RefCell<Scene>>,
    channel: Option<Rc<RefCell<Channel>>>,
}

impl ScrollSimulator {
    pub fn new(viewport_height: f64, blocks: &[Block]) -> Self {
        let mut offset = 0.0;
        let blocks = blocks
            .iter()
            .map(|block| {
                let entry = (block.id.clone(), offset, block.height);
                offset += block.height;
                entry
            })
            .collect();
        Self {
            scene: Rc::new(RefCell::new(Scene {
                viewport_height,
                blocks,
                scroll: 0.0,
            })),
            channel: None,
        }
    }

    /// Scroll to `y` and queue notifications for observed targets whose
    /// intersection crossed a threshold.
    pub fn scroll_to(&mut self, y: f64) {
        self.scene.borrow_mut().scroll = y;

        let Some(channel) = &self.channel else { return };
        let scene = self.scene.borrow();
        let mut channel = channel.borrow_mut();
        if !channel.connected {
            return;
        }

        let mut fired = Vec::new();
        for prev in &channel.last {
            if let Some(next) = channel.measure(&scene, &prev.target)
                && channel.options.notifies(prev, &next)
            {
                fired.push(next);
            }
        }
        for next in fired {
            if let Some(slot) = channel.last.iter_mut().find(|o| o.target == next.target) {
                *slot = next.clone();
            }
            channel.pending.push(next);
        }
    }

    /// Drain the notifications delivered since the previous call.
    pub fn take_batch(&mut self) -> Vec<Observation> {
        self.channel
            .as_ref()
            .map(|channel| std::mem::take(&mut channel.borrow_mut().pending))
            .unwrap_or_default()
    }
}

impl Viewport for ScrollSimulator {
    type Observer = SimObserver;

    fn create_observer(&mut self, options: &ObserverOptions) -> SimObserver {
        let channel = Rc::new(RefCell::new(Channel {
            options: options.clone(),
            connected: true,
            last: Vec::new(),
            pending: Vec::new(),
        }));
        self.channel = Some(Rc::clone(&channel));
        SimObserver {
            scene: Rc::clone(&self.scene),
            channel,
        }
    }

    fn is_rendered(&self, id: &str) -> bool {
        self.scene.borrow().rect(id).is_some()
    }
}

/// Observer handle issued by [`ScrollSimulator`].
pub struct SimObserver {
    scene: Rc<RefCell<Scene>>,
    channel: Rc<RefCell<Channel>>,
}

impl Observer for SimObserver {
    /// Observing queues an initial notification, like the browser does.
    fn observe(&mut self, target: &str) {
        let scene = self.scene.borrow();
        let mut channel = self.channel.borrow_mut();
        if !channel.connected {
            return;
        }
        if let Some(initial) = channel.measure(&scene, target) {
            channel.last.push(initial.clone());
            channel.pending.push(initial);
        }
    }

    fn disconnect(&mut self) {
        let mut channel = self.channel.borrow_mut();
        channel.connected = false;
        channel.last.clear();
        channel.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{Registry, Section};
    use crate::tracker::Tracker;
    use std::sync::Arc;

    fn page() -> (Arc<Registry>, ScrollSimulator) {
        let ids = ["top", "about", "lab"];
        let registry = Registry::new(ids.iter().map(|id| Section::new(*id, *id, *id)).collect())
            .unwrap();
        let blocks: Vec<Block> = ids
            .iter()
            .map(|id| Block {
                id: id.to_string(),
                height: 800.0,
            })
            .collect();
        (Arc::new(registry), ScrollSimulator::new(800.0, &blocks))
    }

    #[test]
    fn test_initial_batch_reports_every_observed_block() {
        let (registry, mut sim) = page();
        let mut tracker = Tracker::new(registry, ObserverOptions::default());
        tracker.mount(&mut sim);

        let batch = sim.take_batch();
        assert_eq!(batch.len(), 3);
        assert!(batch[0].is_intersecting);
        assert!(!batch[1].is_intersecting);
        tracker.on_batch(&batch);
        assert_eq!(tracker.active_id(), "top");
    }

    #[test]
    fn test_scrolling_moves_active_section() {
        let (registry, mut sim) = page();
        let mut tracker = Tracker::new(registry, ObserverOptions::default());
        tracker.mount(&mut sim);
        tracker.on_batch(&sim.take_batch());

        // about spans 800..1600; band at scroll 500 is 900..980
        sim.scroll_to(500.0);
        tracker.on_batch(&sim.take_batch());
        assert_eq!(tracker.active_id(), "about");

        sim.scroll_to(1300.0);
        tracker.on_batch(&sim.take_batch());
        assert_eq!(tracker.active_id(), "lab");

        sim.scroll_to(0.0);
        tracker.on_batch(&sim.take_batch());
        assert_eq!(tracker.active_id(), "top");
    }

    #[test]
    fn test_small_scroll_inside_block_is_silent() {
        let (registry, mut sim) = page();
        let mut tracker = Tracker::new(registry, ObserverOptions::default());
        tracker.mount(&mut sim);
        sim.take_batch();

        sim.scroll_to(10.0);
        assert!(sim.take_batch().is_empty());
    }

    #[test]
    fn test_unmount_stops_delivery() {
        let (registry, mut sim) = page();
        let mut tracker = Tracker::new(registry, ObserverOptions::default());
        tracker.mount(&mut sim);
        tracker.unmount();

        sim.scroll_to(900.0);
        assert!(sim.take_batch().is_empty());
    }
}
