//! `[tracker]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [tracker]
//! root_margin = "-50% 0px -40% 0px"   # Eligibility band: 50%..60% of the viewport
//! thresholds = [0, 0.25, 0.5, 0.75, 1]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::tracker::{DEFAULT_THRESHOLDS, ObserverOptions, RootMargin};
use serde::{Deserialize, Serialize};

/// Viewport height used to sanity-check the margin.
const REFERENCE_VIEWPORT: f64 = 900.0;

/// Observer options for the active-section tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// CSS margin shorthand shrinking the viewport to the eligibility band.
    pub root_margin: RootMargin,
    pub thresholds: Vec<f64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl TrackerConfig {
    pub fn options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin: self.root_margin,
            thresholds: self.thresholds.clone(),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = FieldPath::new("tracker.thresholds");
        if self.thresholds.is_empty() {
            diag.error(field, "must list at least one threshold");
            return;
        }
        for t in &self.thresholds {
            if !(0.0..=1.0).contains(t) {
                diag.error_with_hint(
                    field.clone(),
                    format!("threshold {t} is out of range"),
                    "thresholds are visibility ratios between 0 and 1",
                );
            }
        }

        // Band must keep some height or nothing ever intersects
        if self.options().band(REFERENCE_VIEWPORT).height() <= 0.0 {
            diag.error(
                FieldPath::new("tracker.root_margin"),
                "top and bottom margins leave no eligibility band",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use crate::tracker::{DEFAULT_THRESHOLDS, ObserverOptions};

    #[test]
    fn test_tracker_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.tracker.options(), ObserverOptions::default());
        assert_eq!(config.tracker.thresholds, DEFAULT_THRESHOLDS);
        assert_eq!(config.tracker.root_margin.to_string(), "-50% 0px -40% 0px");
    }

    #[test]
    fn test_tracker_override() {
        let config = test_parse_config(
            "[tracker]\nroot_margin = \"-30% 0px -30% 0px\"\nthresholds = [0, 1]",
        );
        let band = config.tracker.options().band(1000.0);
        assert_eq!((band.top, band.bottom), (300.0, 700.0));
        assert_eq!(config.tracker.thresholds, [0.0, 1.0]);
    }

    #[test]
    fn test_invalid_root_margin_rejected() {
        let content = "[site]\ntitle = \"T\"\n[tracker]\nroot_margin = \"-50% auto\"";
        assert!(toml::from_str::<crate::config::SiteConfig>(content).is_err());
    }

    #[test]
    fn test_tracker_validation() {
        let config = test_parse_config(
            "[tracker]\nroot_margin = \"-60% 0px -40% 0px\"\nthresholds = [0, 1.5]",
        );
        let mut diag = ConfigDiagnostics::new();
        config.tracker.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["tracker.thresholds", "tracker.root_margin"]);

        let config = test_parse_config("[tracker]\nthresholds = []");
        let mut diag = ConfigDiagnostics::new();
        config.tracker.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
