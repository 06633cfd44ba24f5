//! Active-section tracking.
//!
//! # Module Structure
//!
//! - `observation` - Observation records, root margin, eligibility band
//! - `reduce` - Pure selection: `(state, batch) -> state`
//! - `session` - Observer lifecycle, gates and listeners
//! - `simulate` - In-memory viewport for replaying scroll sessions
//!
//! The observation facility reports each section's intersection with a thin
//! band of the viewport (by default 50%..60% of its height). Every batch is
//! reduced independently: the topmost intersecting section becomes active,
//! and a batch with nothing intersecting leaves the previous value in place.

mod observation;
mod reduce;
mod session;
mod simulate;

pub use observation::{
    DEFAULT_THRESHOLDS, EligibilityBand, Length, MarginError, Observation, ObserverOptions, Rect,
    RootMargin,
};
pub use reduce::{ActiveSection, Transition, select};
pub use session::{ActiveGate, Listener, Observer, Tracker, Viewport};
pub use simulate::{Block, ScrollSimulator, SimObserver};
