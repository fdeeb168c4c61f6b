use super::{
    ConfirmationState, CountingMode, Lifecycle, MultiConfirmPolicy, ScanEvent, TrackerParams,
    TrackerParamsError, TrackerPhase, TrackerStats,
};
use crate::detection::FrameDetections;
use crate::region;
use kscan_core::{BarcodeFormat, ScanRegion, ScanResult};
use kscan_formats::FormatTranslator;
use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Turns a stream of per-frame detections into at most one result per scan.
///
/// Frames must be fed in order from a single consumer; the tracker keeps no
/// internal locking.
#[derive(Clone, Debug)]
pub struct ConfirmationTracker {
    translator: FormatTranslator,
    requested: Vec<BarcodeFormat>,
    region: Option<ScanRegion>,
    params: TrackerParams,
    state: ConfirmationState,
    phase: TrackerPhase,
    stats: TrackerStats,
}

impl ConfirmationTracker {
    /// Create a tracker for `requested` formats, optionally restricted to
    /// `region`.
    pub fn new(
        translator: FormatTranslator,
        requested: Vec<BarcodeFormat>,
        region: Option<ScanRegion>,
        params: TrackerParams,
    ) -> Result<Self, TrackerParamsError> {
        params.validate()?;
        Ok(Self {
            translator,
            requested,
            region,
            params,
            state: ConfirmationState::default(),
            phase: TrackerPhase::Idle,
            stats: TrackerStats::default(),
        })
    }

    #[inline]
    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    #[inline]
    pub fn translator(&self) -> &FormatTranslator {
        &self.translator
    }

    #[inline]
    pub fn requested(&self) -> &[BarcodeFormat] {
        &self.requested
    }

    #[inline]
    pub fn region(&self) -> Option<&ScanRegion> {
        self.region.as_ref()
    }

    #[inline]
    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    #[inline]
    pub fn stats(&self) -> &TrackerStats {
        &self.stats
    }

    /// True once a terminal result was emitted. Only [`reset`](Self::reset)
    /// leaves this state.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Process one analyzed frame.
    ///
    /// Detections go through the format filter, then the region filter, and
    /// the survivors are counted. Returns the event to deliver, if any. Frames
    /// arriving after a terminal result are ignored.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, frame), fields(detections = frame.detections.len()))
    )]
    pub fn process_frame(&mut self, frame: &FrameDetections) -> Option<ScanEvent> {
        if self.is_finished() {
            self.stats.frames_ignored += 1;
            log::debug!("frame ignored, scan already finished ({:?})", self.phase);
            return None;
        }
        self.stats.frames_processed += 1;

        let consecutive = self.params.counting == CountingMode::Consecutive;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut requested_in_view = 0usize;
        let mut outside_region = 0usize;

        for det in &frame.detections {
            if det.payload.is_empty() {
                self.stats.rejected_empty += 1;
                continue;
            }
            if !self
                .translator
                .matches_request(&self.requested, det.format, det.content_type)
            {
                self.stats.rejected_format += 1;
                log::debug!("format {:?} not requested, skipping", det.format);
                continue;
            }
            requested_in_view += 1;

            if !region::accepts(
                self.region.as_ref(),
                det.bounds.as_ref(),
                frame.width as f32,
                frame.height as f32,
            ) {
                outside_region += 1;
                self.stats.rejected_region += 1;
                log::debug!("detection outside scan region, skipping");
                continue;
            }
            self.stats.detections_accepted += 1;

            if consecutive && !seen.insert(det.payload.as_str()) {
                continue;
            }
            let format = self.translator.resolve_format(det.format, det.content_type);
            if self
                .state
                .record_hit(&det.payload, format, self.params.threshold)
            {
                log::debug!("payload confirmed as {format}");
            }
        }

        if consecutive {
            self.state.retain_seen(&seen);
        }

        if self.state.confirmed().is_empty() {
            self.phase = if self.state.is_empty() {
                TrackerPhase::Idle
            } else {
                TrackerPhase::Accumulating
            };
            if requested_in_view > 0 && outside_region == requested_in_view {
                self.stats.frames_outside_region += 1;
                return Some(ScanEvent::OutsideRegion);
            }
            return None;
        }

        let mut confirmed = self.state.take_confirmed();
        let surface = self.params.multi_confirm == MultiConfirmPolicy::Surface;
        let event = if surface && confirmed.len() > 1 {
            log::info!("{} payloads confirmed in one frame", confirmed.len());
            ScanEvent::Candidates {
                barcodes: confirmed,
            }
        } else {
            let first = confirmed.swap_remove(0);
            log::info!("barcode confirmed ({})", first.format);
            ScanEvent::from(ScanResult::success(first))
        };

        self.phase = match self.params.lifecycle {
            Lifecycle::SingleResult => TrackerPhase::Confirmed,
            Lifecycle::Continuous => TrackerPhase::Idle,
        };
        self.stats.events_emitted += 1;
        Some(event)
    }

    /// Report a decoder failure. Dropped if the scan already finished.
    ///
    /// A failure is not terminal: accumulated hits are kept and later frames
    /// are still processed.
    pub fn fail(&mut self, reason: impl Into<String>) -> Option<ScanEvent> {
        let reason = reason.into();
        if self.is_finished() {
            log::debug!("failure after terminal result dropped: {reason}");
            return None;
        }
        log::warn!("decoder failure: {reason}");
        self.stats.events_emitted += 1;
        Some(ScanEvent::from(ScanResult::failed(reason)))
    }

    /// Cancel the scan. Emits `Canceled` unless a terminal result was
    /// already delivered.
    pub fn cancel(&mut self) -> Option<ScanEvent> {
        if self.is_finished() {
            log::debug!("cancel after terminal result ignored");
            return None;
        }
        self.state.clear();
        self.phase = TrackerPhase::Canceled;
        self.stats.events_emitted += 1;
        log::info!("scan canceled");
        Some(ScanEvent::from(ScanResult::Canceled))
    }

    /// Start a new scan: clears counters and leaves any terminal phase.
    /// Lifetime stats are kept.
    pub fn reset(&mut self) {
        self.state.clear();
        self.phase = TrackerPhase::Idle;
        log::debug!("tracker reset");
    }
}
