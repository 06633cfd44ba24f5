//! Replay observation batches through the section tracker.
//!
//! Input is JSON in one of two shapes:
//!
//! ```json
//! { "batches": [[{ "target": "about", "isIntersecting": true, "top": 120 }], []] }
//! ```
//!
//! ```json
//! { "viewport": 900, "blocks": [{ "id": "top", "height": 900 }], "scroll": [0, 450, 1200] }
//! ```
//!
//! The first feeds raw batches to the tracker. The second lays the blocks out
//! top to bottom, scrolls a simulated viewport and lets the observer produce
//! the batches. Both accept an optional `sections` id list; without it the
//! registry comes from `[[sections]]`.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::{fs, io::Read, path::Path, sync::Arc};

use crate::{
    cli::TraceArgs,
    config::SiteConfig,
    log,
    section::{Registry, Section},
    tracker::{Block, Observation, ObserverOptions, ScrollSimulator, Tracker, Transition},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TraceInput {
    Scroll {
        #[serde(default)]
        sections: Option<Vec<String>>,
        viewport: f64,
        blocks: Vec<Block>,
        scroll: Vec<f64>,
    },
    Batches {
        #[serde(default)]
        sections: Option<Vec<String>>,
        batches: Vec<Vec<Observation>>,
    },
}

impl TraceInput {
    fn sections(&self) -> Option<&[String]> {
        match self {
            Self::Scroll { sections, .. } | Self::Batches { sections, .. } => sections.as_deref(),
        }
    }
}

/// State after one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    /// 0 is the batch delivered on mount (scroll input only).
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<f64>,
    pub observations: usize,
    pub active: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl TraceStep {
    fn new(
        step: usize,
        scroll: Option<f64>,
        batch: &[Observation],
        tracker: &Tracker<ScrollSimulator>,
        transition: Option<Transition>,
    ) -> Self {
        let registry = tracker.state().registry();
        Self {
            step,
            scroll,
            observations: batch.len(),
            active: tracker.active_id().to_string(),
            from: transition.map(|t| registry[t.from].id.clone()),
        }
    }
}

/// Run `folio trace`.
pub fn run_trace(config: &SiteConfig, args: &TraceArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let registry = match input.sections() {
        Some(ids) => registry_from_ids(ids)?,
        None => config.registry()?,
    };

    let steps = replay(Arc::new(registry), config.observer_options(), input);

    for step in &steps {
        if args.json {
            println!("{}", serde_json::to_string(step)?);
        } else {
            print_step(step);
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<TraceInput> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| {
        format!(
            "{} is neither a batch list nor a scroll script",
            path.display()
        )
    })
}

/// Registry of bare ids (nav label and title equal the id).
fn registry_from_ids(ids: &[String]) -> Result<Registry> {
    let sections = ids.iter().map(|id| Section::new(id, id, id)).collect();
    Registry::new(sections).context("Invalid `sections` in trace input")
}

/// Feed the input through a mounted tracker and record each step.
pub fn replay(
    registry: Arc<Registry>,
    options: ObserverOptions,
    input: TraceInput,
) -> Vec<TraceStep> {
    let mut steps = Vec::new();

    match input {
        TraceInput::Batches { batches, .. } => {
            // Raw batches need no layout; an empty scene still mounts
            let mut viewport = ScrollSimulator::new(0.0, &[]);
            let mut tracker = Tracker::new(registry, options);
            tracker.mount(&mut viewport);
            for (i, batch) in batches.iter().enumerate() {
                let transition = tracker.on_batch(batch);
                steps.push(TraceStep::new(i + 1, None, batch, &tracker, transition));
            }
        }
        TraceInput::Scroll {
            viewport,
            blocks,
            scroll,
            ..
        } => {
            let mut sim = ScrollSimulator::new(viewport, &blocks);
            let mut tracker = Tracker::new(registry, options);
            let observed = tracker.mount(&mut sim);
            if observed < tracker.state().registry().len() {
                log!("trace"; "{} section(s) have no block and are not observed",
                    tracker.state().registry().len() - observed);
            }

            let batch = sim.take_batch();
            let transition = tracker.on_batch(&batch);
            steps.push(TraceStep::new(0, Some(0.0), &batch, &tracker, transition));

            for (i, y) in scroll.into_iter().enumerate() {
                sim.scroll_to(y);
                let batch = sim.take_batch();
                let transition = tracker.on_batch(&batch);
                steps.push(TraceStep::new(i + 1, Some(y), &batch, &tracker, transition));
            }
        }
    }

    steps
}

fn print_step(step: &TraceStep) {
    let at = step
        .scroll
        .map(|y| format!(" @ {y}px"))
        .unwrap_or_default();
    let change = match &step.from {
        Some(from) => format!("{} -> {}", from.dimmed(), step.active.green().bold()),
        None => format!("{} {}", step.active, "(unchanged)".dimmed()),
    };
    log!("trace"; "#{}{} [{} obs] {}", step.step, at, step.observations, change);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> Arc<Registry> {
        let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
        Arc::new(registry_from_ids(&ids).unwrap())
    }

    fn actives(steps: &[TraceStep]) -> Vec<&str> {
        steps.iter().map(|s| s.active.as_str()).collect()
    }

    #[test]
    fn test_batch_scenario() {
        let input: TraceInput = serde_json::from_str(
            r#"{
                "batches": [
                    [{ "target": "about", "isIntersecting": true, "top": 100 }],
                    [{ "target": "about", "isIntersecting": false, "top": -500 }],
                    [
                        { "target": "top", "isIntersecting": true, "top": 10 },
                        { "target": "lab", "isIntersecting": true, "top": 200 }
                    ]
                ]
            }"#,
        )
        .unwrap();

        let steps = replay(registry(&["top", "about", "lab"]), ObserverOptions::default(), input);
        assert_eq!(actives(&steps), ["about", "about", "top"]);
        assert_eq!(steps[0].from.as_deref(), Some("top"));
        assert_eq!(steps[1].from, None);
        assert_eq!(steps[2].from.as_deref(), Some("about"));
    }

    #[test]
    fn test_unknown_targets_ignored() {
        let input: TraceInput = serde_json::from_str(
            r#"{ "batches": [[{ "target": "ghost", "isIntersecting": true, "top": 0 }]] }"#,
        )
        .unwrap();
        let steps = replay(registry(&["top", "about"]), ObserverOptions::default(), input);
        assert_eq!(actives(&steps), ["top"]);
    }

    #[test]
    fn test_scroll_script() {
        let input: TraceInput = serde_json::from_str(
            r#"{
                "sections": ["top", "about", "lab"],
                "viewport": 800,
                "blocks": [
                    { "id": "top", "height": 800 },
                    { "id": "about", "height": 800 },
                    { "id": "lab", "height": 800 }
                ],
                "scroll": [500, 1300, 0]
            }"#,
        )
        .unwrap();
        assert_eq!(input.sections().map(<[String]>::len), Some(3));

        let steps = replay(registry(&["top", "about", "lab"]), ObserverOptions::default(), input);
        assert_eq!(actives(&steps), ["top", "about", "lab", "top"]);
        assert_eq!(steps[0].step, 0);
        assert_eq!(steps[0].observations, 3);
    }

    #[test]
    fn test_step_json() {
        let step = TraceStep {
            step: 2,
            scroll: None,
            observations: 1,
            active: "about".into(),
            from: Some("top".into()),
        };
        assert_eq!(
            serde_json::to_string(&step).unwrap(),
            r#"{"step":2,"observations":1,"active":"about","from":"top"}"#
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        assert!(registry_from_ids(&["a".into(), "a".into()]).is_err());
    }
}
