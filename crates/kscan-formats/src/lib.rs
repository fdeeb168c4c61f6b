//! Native barcode format tables and format translation.
//!
//! This crate focuses on:
//! - embedded tables for the decoders kscan sits on (ML Kit, AVFoundation),
//! - turning a platform-neutral format request into a native format mask,
//! - translating native format/type codes reported per detection back into
//!   [`kscan_core::BarcodeFormat`].
//!
//! Decoder-specific bit layouts never leave this crate.

pub mod builtins;
mod table;
mod translator;

pub use table::{EmptyMaskPolicy, MaskStyle, NativeCode, NativeFormatTable};
pub use translator::{FormatError, FormatTranslator, NativeFormatMask};
