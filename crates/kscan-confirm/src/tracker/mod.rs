//! Multi-frame confirmation.
//!
//! A payload becomes a result only after it has been seen often enough across
//! frames. The tracker owns the hit counters and confirmed set, applies the
//! format and region filters, and enforces that at most one terminal result
//! is emitted per scan.

mod error;
mod params;
mod pipeline;
mod result;
mod state;

pub use error::TrackerParamsError;
pub use params::{CountingMode, Lifecycle, MultiConfirmPolicy, TrackerParams};
pub use pipeline::ConfirmationTracker;
pub use result::{ScanEvent, TrackerPhase, TrackerStats};
pub use state::ConfirmationState;
