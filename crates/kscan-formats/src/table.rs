//! Native format table metadata.

use kscan_core::BarcodeFormat;
use serde::{Deserialize, Serialize};

/// Decoder-specific format or content-type identifier.
///
/// Opaque outside this crate: callers pass through whatever integer their
/// decoder reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NativeCode(pub i32);

/// How a decoder expects a set of formats to be expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskStyle {
    /// One bit per format, combined with bitwise OR.
    Bitmask,
    /// An explicit list of format identifiers.
    CodeList,
}

/// What to do when none of the requested formats has a native mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyMaskPolicy {
    /// Scan everything rather than nothing.
    FallBackToAll,
    /// Refuse the configuration at session setup.
    Reject,
}

/// A fixed mapping between [`BarcodeFormat`] and one decoder's identifiers.
#[derive(Clone, Copy, Debug)]
pub struct NativeFormatTable {
    /// Lookup name (for configuration and logging).
    pub name: &'static str,
    pub style: MaskStyle,
    /// Value the decoder understands as "every format".
    pub all_formats: NativeCode,
    /// Value the decoder reports for an unrecognized symbol.
    pub unknown: NativeCode,
    /// Symbology rows.
    pub formats: &'static [(BarcodeFormat, NativeCode)],
    /// Content-type rows. Empty for decoders that do not classify payloads.
    pub content_types: &'static [(BarcodeFormat, NativeCode)],
    pub empty_mask_policy: EmptyMaskPolicy,
}

impl NativeFormatTable {
    /// Symbology for a native format code, `Unknown` if absent.
    pub fn format_for(&self, code: NativeCode) -> BarcodeFormat {
        lookup(self.formats, code)
    }

    /// Content type for a native type code, `Unknown` if absent.
    pub fn content_type_for(&self, code: NativeCode) -> BarcodeFormat {
        lookup(self.content_types, code)
    }

    /// Native code for a symbology or content type.
    pub fn code_for(&self, format: BarcodeFormat) -> Option<NativeCode> {
        self.formats
            .iter()
            .chain(self.content_types)
            .find(|(f, _)| *f == format)
            .map(|&(_, c)| c)
    }

    /// Number of symbologies this decoder can be configured for.
    #[inline]
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }
}

fn lookup(rows: &[(BarcodeFormat, NativeCode)], code: NativeCode) -> BarcodeFormat {
    rows.iter()
        .find(|&&(_, c)| c == code)
        .map_or(BarcodeFormat::Unknown, |&(f, _)| f)
}
