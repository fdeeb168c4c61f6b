//! Scan sessions: a tracker bound to a decoder configuration, fed by a single
//! consumer and reporting to a listener.

use crate::detection::FrameDetections;
use crate::io::SessionConfig;
use crate::tracker::{ConfirmationTracker, ScanEvent, TrackerParamsError, TrackerStats};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use kscan_core::{Barcode, ScanResult};
use kscan_formats::{FormatError, FormatTranslator, NativeFormatMask};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Errors raised while building or driving a session.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Params(#[from] TrackerParamsError),
    #[error("scan session is closed")]
    Closed,
}

/// Input delivered to a session by the host's decoder integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecoderMessage {
    /// Detections of one analyzed frame.
    Frame(FrameDetections),
    /// The decoder failed on a frame.
    Failure { reason: String },
    /// The user dismissed the scanner.
    Cancel,
    /// Start a new scan with the same configuration.
    Reset,
}

/// Receives what a session produces.
pub trait ScanListener {
    fn on_result(&mut self, result: ScanResult);

    /// Several payloads confirmed together. Default: deliver the first one.
    fn on_candidates(&mut self, barcodes: Vec<Barcode>) {
        if let Some(first) = barcodes.into_iter().next() {
            self.on_result(ScanResult::success(first));
        }
    }

    /// Requested symbols are visible, but outside the scan region.
    fn on_frame_outside(&mut self) {}
}

impl<F: FnMut(ScanResult)> ScanListener for F {
    fn on_result(&mut self, result: ScanResult) {
        self(result)
    }
}

/// Totals reported when a session ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub messages: u64,
    /// Frames dropped by [`SessionHandle::submit_frame`] because the queue was full.
    pub frames_dropped: u64,
    pub tracker: TrackerStats,
}

/// A configured scan: native format mask plus confirmation tracker.
#[derive(Clone, Debug)]
pub struct ScanSession {
    mask: NativeFormatMask,
    tracker: ConfirmationTracker,
    queue_capacity: usize,
    messages: u64,
}

impl ScanSession {
    /// Validate `config` and build the session.
    ///
    /// Fails on unknown decoders, on requests a list-style decoder cannot
    /// satisfy and on invalid tracker parameters.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let translator = FormatTranslator::for_decoder(&config.decoder)?;
        let mask = translator.checked_native_mask(&config.formats)?;
        let tracker = ConfirmationTracker::new(
            translator,
            config.formats.clone(),
            config.region,
            config.tracker,
        )?;
        log::info!(
            "scan session ready: decoder={} formats={:?} region={}",
            translator.table().name,
            config.formats,
            config.region.is_some()
        );
        Ok(Self {
            mask,
            tracker,
            queue_capacity: config.queue_capacity.max(1),
            messages: 0,
        })
    }

    /// Mask to configure the native decoder with.
    #[inline]
    pub fn native_mask(&self) -> &NativeFormatMask {
        &self.mask
    }

    #[inline]
    pub fn tracker(&self) -> &ConfirmationTracker {
        &self.tracker
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            messages: self.messages,
            frames_dropped: 0,
            tracker: *self.tracker.stats(),
        }
    }

    /// Apply one decoder message and return the resulting event, if any.
    pub fn handle_message(&mut self, message: DecoderMessage) -> Option<ScanEvent> {
        self.messages += 1;
        match message {
            DecoderMessage::Frame(frame) => self.tracker.process_frame(&frame),
            DecoderMessage::Failure { reason } => self.tracker.fail(reason),
            DecoderMessage::Cancel => self.tracker.cancel(),
            DecoderMessage::Reset => {
                self.tracker.reset();
                None
            }
        }
    }

    /// Apply one message and forward the event to `listener`.
    /// Returns `true` if something was delivered.
    pub fn dispatch(&mut self, message: DecoderMessage, listener: &mut dyn ScanListener) -> bool {
        let Some(event) = self.handle_message(message) else {
            return false;
        };
        deliver(event, listener);
        true
    }

    /// Move the session onto a worker thread.
    ///
    /// Messages are processed strictly in submission order by that thread.
    /// The worker exits when every [`SessionHandle`] is dropped or closed and
    /// returns the session summary.
    pub fn spawn<L>(self, listener: L) -> (SessionHandle, JoinHandle<SessionSummary>)
    where
        L: ScanListener + Send + 'static,
    {
        let (tx, rx) = bounded(self.queue_capacity);
        let dropped = Arc::new(AtomicU64::new(0));
        let handle = SessionHandle {
            tx,
            dropped: Arc::clone(&dropped),
        };
        let worker = thread::spawn(move || run_worker(self, listener, rx, dropped));
        (handle, worker)
    }
}

fn deliver(event: ScanEvent, listener: &mut dyn ScanListener) {
    match event {
        ScanEvent::Result { result } => listener.on_result(result),
        ScanEvent::Candidates { barcodes } => listener.on_candidates(barcodes),
        ScanEvent::OutsideRegion => listener.on_frame_outside(),
    }
}

fn run_worker<L: ScanListener>(
    mut session: ScanSession,
    mut listener: L,
    rx: Receiver<DecoderMessage>,
    dropped: Arc<AtomicU64>,
) -> SessionSummary {
    log::debug!("scan worker started");
    while let Ok(message) = rx.recv() {
        session.dispatch(message, &mut listener);
    }
    let mut summary = session.summary();
    summary.frames_dropped = dropped.load(Ordering::Relaxed);
    log::debug!(
        "scan worker stopped: {} messages, {} frames dropped",
        summary.messages,
        summary.frames_dropped
    );
    summary
}

/// Producer side of a spawned session. Cheap to clone.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: Sender<DecoderMessage>,
    dropped: Arc<AtomicU64>,
}

impl SessionHandle {
    /// Queue a frame without blocking.
    ///
    /// Returns `Ok(false)` when the queue is full and the frame was dropped,
    /// so the camera pipeline never stalls behind analysis.
    pub fn submit_frame(&self, frame: FrameDetections) -> Result<bool, SessionError> {
        match self.tx.try_send(DecoderMessage::Frame(frame)) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::trace!("analysis queue full, frame dropped");
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(SessionError::Closed),
        }
    }

    pub fn report_failure(&self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.submit(DecoderMessage::Failure {
            reason: reason.into(),
        })
    }

    pub fn cancel(&self) -> Result<(), SessionError> {
        self.submit(DecoderMessage::Cancel)
    }

    pub fn reset(&self) -> Result<(), SessionError> {
        self.submit(DecoderMessage::Reset)
    }

    /// Queue any decoder message, blocking while the queue is full.
    pub fn submit(&self, message: DecoderMessage) -> Result<(), SessionError> {
        self.tx.send(message).map_err(|_| SessionError::Closed)
    }

    /// Frames dropped so far because the queue was full.
    pub fn frames_dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Drop this handle. The worker stops once all handles are gone.
    pub fn close(self) {}
}
