//! Visibility observations and the observer configuration that produces them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One visibility-change notification for a section element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Section id of the observed element.
    pub target: String,
    /// Whether the element currently overlaps the eligibility band.
    pub is_intersecting: bool,
    /// Top edge of the element's bounding rect, in viewport pixels.
    pub top: f64,
    /// Fraction of the element inside the band.
    #[serde(default)]
    pub ratio: f64,
}

impl Observation {
    pub fn new(target: impl Into<String>, is_intersecting: bool, top: f64) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
            top,
            ratio: 0.0,
        }
    }

    /// Shorthand for an intersecting observation.
    pub fn entering(target: impl Into<String>, top: f64) -> Self {
        Self::new(target, true, top)
    }

    /// Shorthand for a non-intersecting observation.
    pub fn leaving(target: impl Into<String>, top: f64) -> Self {
        Self::new(target, false, top)
    }

    /// Measure an element rect against the eligibility band.
    ///
    /// An element whose edge only touches the band counts as intersecting
    /// with a ratio of zero, as in the browser.
    pub fn measure(target: impl Into<String>, rect: Rect, band: EligibilityBand) -> Self {
        let overlap = rect.bottom().min(band.bottom) - rect.top.max(band.top);
        let is_intersecting = rect.height > 0.0 && overlap >= 0.0;
        let ratio = if is_intersecting {
            (overlap / rect.height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            target: target.into(),
            is_intersecting,
            top: rect.top,
            ratio,
        }
    }
}

/// Vertical geometry of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The vertical slice of the viewport an element must overlap to be eligible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityBand {
    pub top: f64,
    pub bottom: f64,
}

impl EligibilityBand {
    /// Apply a root margin to a viewport of the given height.
    ///
    /// Negative margins shrink the viewport, so `-50% 0px -40% 0px` on an
    /// 800px viewport yields the band `400..480`.
    pub fn for_viewport(margin: &RootMargin, height: f64) -> Self {
        let top = -margin.top.resolve(height);
        let bottom = height + margin.bottom.resolve(height);
        Self {
            top,
            bottom: bottom.max(top),
        }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

// ============================================================================
// Root margin
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarginError {
    #[error("expected 1 to 4 margin values, found {0}")]
    Arity(usize),

    #[error("invalid margin value `{0}` (expected e.g. `-50%` or `10px`)")]
    Value(String),
}

/// A single margin length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Resolve against the viewport dimension the margin applies to.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = MarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |num: &str| {
            num.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| MarginError::Value(s.to_string()))
        };
        if let Some(num) = s.strip_suffix('%') {
            parse(num).map(Self::Percent)
        } else if let Some(num) = s.strip_suffix("px") {
            parse(num).map(Self::Px)
        } else if s == "0" {
            Ok(Self::Px(0.0))
        } else {
            Err(MarginError::Value(s.to_string()))
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// CSS-style root margin (`top right bottom left`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Default for RootMargin {
    /// Excludes the top 50% and bottom 40% of the viewport.
    fn default() -> Self {
        Self {
            top: Length::Percent(-50.0),
            right: Length::Px(0.0),
            bottom: Length::Percent(-40.0),
            left: Length::Px(0.0),
        }
    }
}

impl FromStr for RootMargin {
    type Err = MarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(str::parse::<Length>)
            .collect::<Result<Vec<_>, _>>()?;

        // Same shorthand expansion as the CSS margin property.
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            other => return Err(MarginError::Arity(other.len())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = MarginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RootMargin> for String {
    fn from(margin: RootMargin) -> Self {
        margin.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

// ============================================================================
// Observer options
// ============================================================================

/// Ratios at which the observation facility reports a change.
pub const DEFAULT_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Configuration handed to the observation facility when an observer is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    pub thresholds: Vec<f64>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl ObserverOptions {
    pub fn band(&self, viewport_height: f64) -> EligibilityBand {
        EligibilityBand::for_viewport(&self.root_margin, viewport_height)
    }

    /// Whether moving between two observations crosses a threshold.
    ///
    /// Entering or leaving the band always notifies; otherwise a notification
    /// fires when the ratio passes at least one configured threshold.
    pub fn notifies(&self, prev: &Observation, next: &Observation) -> bool {
        if prev.is_intersecting != next.is_intersecting {
            return true;
        }
        if !next.is_intersecting {
            return false;
        }
        let (lo, hi) = if prev.ratio <= next.ratio {
            (prev.ratio, next.ratio)
        } else {
            (next.ratio, prev.ratio)
        };
        self.thresholds
            .iter()
            .any(|&t| (lo < t && t <= hi) || (lo <= t && t < hi))
    }
}
