//! JSON configuration, recorded decoder streams and replay reports.

use crate::session::{DecoderMessage, ScanSession, SessionError, SessionSummary};
use crate::tracker::{ScanEvent, TrackerParams};
use kscan_core::{BarcodeFormat, ScanRegion};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_decoder() -> String {
    "mlkit".to_string()
}

fn default_queue_capacity() -> usize {
    4
}

fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigIoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Configuration of a scan session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Native decoder the detections come from (`mlkit` or `avfoundation`).
    #[serde(default = "default_decoder")]
    pub decoder: String,
    /// Requested formats. Empty, or containing `FORMAT_ALL_FORMATS`, means all.
    #[serde(default)]
    pub formats: Vec<BarcodeFormat>,
    /// Scan region; `None` scans the whole frame.
    #[serde(default)]
    pub region: Option<ScanRegion>,
    #[serde(default)]
    pub tracker: TrackerParams,
    /// Frames buffered ahead of a spawned session's worker.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            decoder: default_decoder(),
            formats: Vec::new(),
            region: None,
            tracker: TrackerParams::default(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl SessionConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        load(path)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write(self, path)
    }

    pub fn build_session(&self) -> Result<ScanSession, SessionError> {
        ScanSession::new(self)
    }
}

/// Decoder output captured from a device, in delivery order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedStream {
    pub messages: Vec<DecoderMessage>,
}

impl RecordedStream {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        load(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write(self, path)
    }
}

/// An event produced while replaying, tagged with the message that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayEvent {
    pub message_index: usize,
    #[serde(flatten)]
    pub event: ScanEvent,
}

/// Outcome of replaying a [`RecordedStream`] through a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub config: SessionConfig,
    pub events: Vec<ReplayEvent>,
    pub summary: SessionSummary,
}

impl ReplayReport {
    /// Run `stream` through a fresh session built from `config`.
    pub fn run(config: &SessionConfig, stream: &RecordedStream) -> Result<Self, SessionError> {
        let mut session = ScanSession::new(config)?;
        let events = stream
            .messages
            .iter()
            .cloned()
            .enumerate()
            .filter_map(|(message_index, message)| {
                session
                    .handle_message(message)
                    .map(|event| ReplayEvent {
                        message_index,
                        event,
                    })
            })
            .collect();
        Ok(Self {
            config: config.clone(),
            events,
            summary: session.summary(),
        })
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        load(path)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        write(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{FrameDetections, RawDetection};
    use kscan_core::ScanResult;
    use kscan_formats::NativeCode;

    fn frame(payload: &str) -> DecoderMessage {
        DecoderMessage::Frame(FrameDetections::new(
            100,
            100,
            vec![RawDetection::new(payload, NativeCode(256))],
        ))
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let config = SessionConfig {
            formats: vec![BarcodeFormat::QrCode],
            region: Some(ScanRegion::centered(0.5, 0.5).expect("region")),
            ..SessionConfig::default()
        };
        config.write_json(&path).expect("write");
        assert_eq!(SessionConfig::load_json(&path).expect("load"), config);
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn invalid_region_fails_to_load() {
        let err = serde_json::from_str::<SessionConfig>(
            r#"{"region":{"left":0.8,"top":0.0,"width":0.5,"height":0.5}}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SessionConfig::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigIoError::Io(_)));
    }

    #[test]
    fn replay_reports_events_with_message_index() {
        let stream = RecordedStream {
            messages: vec![
                frame("A"),
                DecoderMessage::Failure {
                    reason: "blur".to_string(),
                },
                frame("A"),
                frame("A"),
            ],
        };
        let report = ReplayReport::run(&SessionConfig::default(), &stream).expect("replay");
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.events[0].message_index, 1);
        assert_eq!(
            report.events[0].event.result(),
            Some(&ScanResult::failed("blur"))
        );
        assert_eq!(report.events[1].message_index, 2);
        assert_eq!(report.summary.messages, 4);
        assert_eq!(report.summary.tracker.frames_ignored, 1);
    }

    #[test]
    fn replay_report_json_is_flat() {
        let stream = RecordedStream {
            messages: vec![DecoderMessage::Cancel],
        };
        let report = ReplayReport::run(&SessionConfig::default(), &stream).expect("replay");
        let json = serde_json::to_value(&report.events[0]).expect("serialize");
        assert_eq!(json["message_index"], 0);
        assert_eq!(json["event"], "result");
        assert_eq!(json["result"]["kind"], "canceled");
    }
}
