//! High-level facade crate for the `kscan-*` workspace.
//!
//! kscan sits between a platform barcode decoder (ML Kit on Android,
//! AVFoundation on iOS) and the UI that wants one trustworthy scan result.
//! The decoder reports raw symbols per frame; kscan filters them by format
//! and scan region, confirms a payload once it has been seen often enough and
//! emits a single terminal result.
//!
//! ## Quickstart
//!
//! ```
//! use kscan::confirm::{DecoderMessage, FrameDetections, RawDetection, ScanSession, SessionConfig};
//! use kscan::core::{BarcodeFormat, ScanResult};
//! use kscan::formats::NativeCode;
//!
//! let config = SessionConfig {
//!     formats: vec![BarcodeFormat::QrCode],
//!     ..SessionConfig::default()
//! };
//! let mut session = ScanSession::new(&config).unwrap();
//! let frame = FrameDetections::new(1280, 720, vec![RawDetection::new("hello", NativeCode(256))]);
//!
//! let mut results = Vec::new();
//! let mut listener = |r: ScanResult| results.push(r);
//! session.dispatch(DecoderMessage::Frame(frame.clone()), &mut listener);
//! session.dispatch(DecoderMessage::Frame(frame), &mut listener);
//! assert_eq!(results.len(), 1);
//! ```
//!
//! ## API map
//! - `kscan::core`: formats, barcodes, scan results, scan regions, camera control.
//! - `kscan::formats`: native decoder tables and format translation.
//! - `kscan::confirm`: region filter, confirmation tracker and scan sessions.
//!
//! The `kscan` binary (feature `cli`) replays recorded decoder streams and
//! inspects decoder format tables.

pub use kscan_confirm as confirm;
pub use kscan_core as core;
pub use kscan_formats as formats;

pub use kscan_confirm::{
    ConfirmationTracker, DecoderMessage, FrameDetections, RawDetection, ScanEvent, ScanListener,
    ScanSession, SessionConfig, SessionError,
};
pub use kscan_core::{Barcode, BarcodeFormat, ScanRegion, ScanResult};
pub use kscan_formats::{FormatTranslator, NativeCode};
