//! Core types for barcode detection confirmation.
//!
//! This crate is intentionally small and SDK-agnostic. It does *not* know
//! about any concrete decoder's format codes; see `kscan-formats` for that.

mod barcode;
pub mod camera;
mod format;
mod logger;
mod region;

pub use barcode::{Barcode, ScanFailure, ScanResult};
pub use camera::{CameraControl, ZoomState};
pub use format::{BarcodeFormat, ParseFormatError};
pub use region::{PixelRect, ScanRegion, ScanRegionError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
