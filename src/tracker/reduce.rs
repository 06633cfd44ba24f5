//! Pure selection over observation batches.
//!
//! No timing, no handles, no global state: `(state, batch) -> state`.

use super::Observation;
use crate::section::{Registry, Section};
use std::sync::Arc;

/// Pick the section a batch makes active.
///
/// Among intersecting observations for registered ids, the smallest `top`
/// wins; equal tops fall back to registry order. Returns `None` when nothing
/// in the batch intersects the band.
pub fn select(registry: &Registry, batch: &[Observation]) -> Option<usize> {
    batch
        .iter()
        .filter(|obs| obs.is_intersecting)
        .filter_map(|obs| registry.position(&obs.target).map(|pos| (obs.top, pos)))
        .min_by(|(top_a, pos_a), (top_b, pos_b)| {
            top_a.total_cmp(top_b).then_with(|| pos_a.cmp(pos_b))
        })
        .map(|(_, pos)| pos)
}

/// An active-section change produced by a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// The single "what is the user looking at" value.
///
/// Starts at the first registry entry and only moves when a batch reports an
/// intersecting section. A batch with nothing intersecting leaves it as is.
#[derive(Debug, Clone)]
pub struct ActiveSection {
    registry: Arc<Registry>,
    active: usize,
}

impl ActiveSection {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            active: 0,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn active(&self) -> &Section {
        // `active` is only ever assigned from registry positions
        &self.registry[self.active]
    }

    #[inline]
    pub fn active_id(&self) -> &str {
        &self.active().id
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == id
    }

    /// Fold one batch into the state.
    pub fn apply(&mut self, batch: &[Observation]) -> Option<Transition> {
        let next = select(&self.registry, batch)?;
        if next == self.active {
            return None;
        }
        let transition = Transition {
            from: self.active,
            to: next,
        };
        self.active = next;
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> Arc<Registry> {
        Arc::new(
            Registry::new(ids.iter().map(|id| Section::new(*id, *id, *id)).collect()).unwrap(),
        )
    }

    #[test]
    fn test_initial_state_is_first_entry() {
        let state = ActiveSection::new(registry(&["top", "about", "lab"]));
        assert_eq!(state.active_id(), "top");
        assert_eq!(state.active_index(), 0);
    }

    #[test]
    fn test_topmost_intersecting_wins() {
        let reg = registry(&["a", "b"]);
        let batch = [
            Observation::entering("b", 120.0),
            Observation::entering("a", 50.0),
        ];
        assert_eq!(select(&reg, &batch), Some(0));
    }

    #[test]
    fn test_non_intersecting_entries_are_ignored() {
        let reg = registry(&["a", "b"]);
        let batch = [
            Observation::leaving("a", -10.0),
            Observation::entering("b", 300.0),
        ];
        assert_eq!(select(&reg, &batch), Some(1));
    }

    #[test]
    fn test_tie_breaks_by_registry_order() {
        let reg = registry(&["a", "b", "c"]);
        let batch = [
            Observation::entering("c", 40.0),
            Observation::entering("b", 40.0),
        ];
        assert_eq!(select(&reg, &batch), Some(1));
    }

    #[test]
    fn test_unknown_targets_are_skipped() {
        let reg = registry(&["a", "b"]);
        let batch = [
            Observation::entering("ghost", -500.0),
            Observation::entering("b", 10.0),
        ];
        assert_eq!(select(&reg, &batch), Some(1));
        assert_eq!(select(&reg, &[Observation::entering("ghost", 0.0)]), None);
    }

    #[test]
    fn test_sticky_when_nothing_intersects() {
        let mut state = ActiveSection::new(registry(&["a", "b"]));
        state.apply(&[Observation::entering("b", 0.0)]);
        assert_eq!(state.active_id(), "b");

        assert_eq!(state.apply(&[Observation::leaving("b", -900.0)]), None);
        assert_eq!(state.active_id(), "b");

        assert_eq!(state.apply(&[]), None);
        assert_eq!(state.active_id(), "b");
    }

    #[test]
    fn test_same_section_produces_no_transition() {
        let mut state = ActiveSection::new(registry(&["a", "b"]));
        assert_eq!(state.apply(&[Observation::entering("a", 0.0)]), None);
    }

    #[test]
    fn test_scroll_scenario() {
        let mut state = ActiveSection::new(registry(&["top", "about", "lab"]));

        let t = state.apply(&[Observation::entering("about", 300.0)]);
        assert_eq!(t, Some(Transition { from: 0, to: 1 }));
        assert_eq!(state.active_id(), "about");

        assert_eq!(state.apply(&[Observation::leaving("about", -200.0)]), None);
        assert_eq!(state.active_id(), "about");

        let t = state.apply(&[
            Observation::entering("top", 10.0),
            Observation::entering("lab", 200.0),
        ]);
        assert_eq!(t, Some(Transition { from: 1, to: 0 }));
        assert_eq!(state.active_id(), "top");
    }

    #[test]
    fn test_active_is_always_a_member() {
        let reg = registry(&["a", "b", "c"]);
        let mut state = ActiveSection::new(Arc::clone(&reg));
        let batches: Vec<Vec<Observation>> = vec![
            vec![Observation::entering("x", 0.0)],
            vec![Observation::entering("c", 5.0), Observation::leaving("a", 0.0)],
            vec![],
            vec![Observation::entering("b", f64::NAN)],
            vec![Observation::entering("a", -1.0), Observation::entering("y", -9.0)],
        ];
        for batch in &batches {
            state.apply(batch);
            assert!(reg.contains(state.active_id()));
        }
    }
}
