use kscan_core::{Barcode, ScanResult};
use serde::{Deserialize, Serialize};

/// Something the tracker wants delivered to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScanEvent {
    /// A terminal (or, in continuous mode, per-confirmation) result.
    Result { result: ScanResult },
    /// Several payloads were confirmed by the same frame.
    Candidates { barcodes: Vec<Barcode> },
    /// Requested symbols were in view, but none inside the scan region.
    OutsideRegion,
}

impl ScanEvent {
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            ScanEvent::Result { result } => Some(result),
            _ => None,
        }
    }
}

impl From<ScanResult> for ScanEvent {
    fn from(result: ScanResult) -> Self {
        ScanEvent::Result { result }
    }
}

/// Lifecycle phase of a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerPhase {
    /// No payload has been counted yet.
    #[default]
    Idle,
    /// Some payload has hits below the threshold.
    Accumulating,
    /// A success was emitted; frames are ignored until reset.
    Confirmed,
    /// The scan was canceled; frames are ignored until reset.
    Canceled,
}

impl TrackerPhase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, TrackerPhase::Confirmed | TrackerPhase::Canceled)
    }
}

/// Counters accumulated over the tracker lifetime. Survive [`reset`].
///
/// [`reset`]: crate::ConfirmationTracker::reset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStats {
    pub frames_processed: u64,
    /// Frames delivered after a terminal result.
    pub frames_ignored: u64,
    pub detections_accepted: u64,
    pub rejected_format: u64,
    pub rejected_region: u64,
    /// Detections with an empty payload.
    pub rejected_empty: u64,
    /// Frames whose matching detections all fell outside the scan region.
    pub frames_outside_region: u64,
    /// Results delivered to the host: success, candidates, failure, cancel.
    pub events_emitted: u64,
}
