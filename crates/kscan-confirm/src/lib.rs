//! Multi-frame barcode confirmation.
//!
//! Current focus:
//! - filtering raw decoder detections by requested format and scan region,
//! - counting hits per payload until a confirmation threshold is reached,
//! - emitting exactly one terminal result per scan,
//! - running that logic behind a single-consumer session.
//!
//! Native format codes and masks live in `kscan-formats`.
//!
//! ```
//! use kscan_confirm::{DecoderMessage, FrameDetections, RawDetection, ScanSession, SessionConfig};
//! use kscan_formats::NativeCode;
//!
//! let mut session = ScanSession::new(&SessionConfig::default()).unwrap();
//! let frame = FrameDetections::new(640, 480, vec![RawDetection::new("hello", NativeCode(256))]);
//! assert!(session.handle_message(DecoderMessage::Frame(frame.clone())).is_none());
//! let event = session.handle_message(DecoderMessage::Frame(frame)).unwrap();
//! assert_eq!(event.result().and_then(|r| r.barcode()).unwrap().data, "hello");
//! ```

mod detection;
mod io;
pub mod region;
mod session;
mod tracker;

pub use detection::{FrameDetections, RawDetection};
pub use io::{ConfigIoError, RecordedStream, ReplayEvent, ReplayReport, SessionConfig};
pub use session::{
    DecoderMessage, ScanListener, ScanSession, SessionError, SessionHandle, SessionSummary,
};
pub use tracker::{
    ConfirmationState, ConfirmationTracker, CountingMode, Lifecycle, MultiConfirmPolicy, ScanEvent,
    TrackerParams, TrackerParamsError, TrackerPhase, TrackerStats,
};
