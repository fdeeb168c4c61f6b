//! Translation between [`BarcodeFormat`] and native decoder codes.

use crate::builtins::builtin_table;
use crate::table::{EmptyMaskPolicy, MaskStyle, NativeCode, NativeFormatTable};
use kscan_core::BarcodeFormat;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced while resolving a format request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("no supported barcode types selected for decoder `{decoder}`")]
    NoSupportedFormats { decoder: &'static str },
    #[error("unknown decoder `{0}`")]
    UnknownDecoder(String),
}

/// A set of formats expressed the way a decoder wants it configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeFormatMask {
    /// Everything the decoder supports.
    All,
    /// Bitwise OR of format bits.
    Bits(i32),
    /// Ordered, de-duplicated list of format codes.
    Codes(Vec<NativeCode>),
}

impl NativeFormatMask {
    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Stateless translator over one native table.
///
/// `Copy` and `Sync`: share it freely between threads.
#[derive(Clone, Copy, Debug)]
pub struct FormatTranslator {
    table: &'static NativeFormatTable,
}

impl FormatTranslator {
    pub fn new(table: &'static NativeFormatTable) -> Self {
        Self { table }
    }

    /// Translator for a built-in table, by name.
    pub fn for_decoder(name: &str) -> Result<Self, FormatError> {
        builtin_table(name)
            .map(Self::new)
            .ok_or_else(|| FormatError::UnknownDecoder(name.to_string()))
    }

    /// Table used by this translator.
    #[inline]
    pub fn table(&self) -> &'static NativeFormatTable {
        self.table
    }

    /// Native mask for a format request.
    ///
    /// An empty request, or one containing `AllFormats`, yields `All`. A
    /// request where nothing maps (for example content types only) also
    /// yields `All`: scanning everything beats silently scanning nothing.
    pub fn to_native_mask(&self, requested: &[BarcodeFormat]) -> NativeFormatMask {
        if requests_all(requested) {
            return NativeFormatMask::All;
        }
        let codes = self.mapped_codes(requested);
        if codes.is_empty() {
            log::debug!(
                "{}: no requested format maps to a native code, scanning all formats",
                self.table.name
            );
            return NativeFormatMask::All;
        }
        self.mask_from_codes(codes)
    }

    /// Like [`to_native_mask`](Self::to_native_mask), but honors the table's
    /// [`EmptyMaskPolicy`]. Meant to be called once, at session setup.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, requested),
            fields(decoder = self.table.name, requested = requested.len())
        )
    )]
    pub fn checked_native_mask(
        &self,
        requested: &[BarcodeFormat],
    ) -> Result<NativeFormatMask, FormatError> {
        if requests_all(requested) {
            return Ok(NativeFormatMask::All);
        }
        let codes = self.mapped_codes(requested);
        if !codes.is_empty() {
            return Ok(self.mask_from_codes(codes));
        }
        match self.table.empty_mask_policy {
            EmptyMaskPolicy::FallBackToAll => {
                log::warn!(
                    "{}: requested formats {:?} have no native mapping, scanning all formats",
                    self.table.name,
                    requested
                );
                Ok(NativeFormatMask::All)
            }
            EmptyMaskPolicy::Reject => Err(FormatError::NoSupportedFormats {
                decoder: self.table.name,
            }),
        }
    }

    /// Explicit code list for a mask; `All` expands to every table row.
    pub fn native_codes(&self, mask: &NativeFormatMask) -> Vec<NativeCode> {
        match mask {
            NativeFormatMask::All => self.table.formats.iter().map(|&(_, c)| c).collect(),
            NativeFormatMask::Bits(bits) => self
                .table
                .formats
                .iter()
                .map(|&(_, c)| c)
                .filter(|c| c.0 & bits != 0)
                .collect(),
            NativeFormatMask::Codes(codes) => codes.clone(),
        }
    }

    /// Integer a bitmask decoder expects, `None` for list-style masks.
    pub fn raw_mask(&self, mask: &NativeFormatMask) -> Option<i32> {
        if self.table.style == MaskStyle::CodeList {
            return None;
        }
        match mask {
            NativeFormatMask::All => Some(self.table.all_formats.0),
            NativeFormatMask::Bits(bits) => Some(*bits),
            NativeFormatMask::Codes(_) => None,
        }
    }

    /// Symbology for a native format code; `Unknown` when the table has no row.
    #[inline]
    pub fn from_native(&self, code: NativeCode) -> BarcodeFormat {
        self.table.format_for(code)
    }

    /// Content type for a native type code; `Unknown` when the table has no row.
    #[inline]
    pub fn from_native_type(&self, code: NativeCode) -> BarcodeFormat {
        self.table.content_type_for(code)
    }

    #[inline]
    pub fn native_code(&self, format: BarcodeFormat) -> Option<NativeCode> {
        self.table.code_for(format)
    }

    /// True if a detection with these codes satisfies `requested`.
    ///
    /// The symbology is checked first; the content type, when the decoder
    /// supplies one, is the fallback. `Unknown` never matches.
    pub fn matches_request(
        &self,
        requested: &[BarcodeFormat],
        format_code: NativeCode,
        type_code: Option<NativeCode>,
    ) -> bool {
        if requests_all(requested) {
            return true;
        }
        let format = self.from_native(format_code);
        if format != BarcodeFormat::Unknown && requested.contains(&format) {
            return true;
        }
        type_code
            .map(|t| self.from_native_type(t))
            .is_some_and(|t| t != BarcodeFormat::Unknown && requested.contains(&t))
    }

    /// First translation that succeeds: symbology, then content type.
    pub fn resolve_format(
        &self,
        format_code: NativeCode,
        type_code: Option<NativeCode>,
    ) -> BarcodeFormat {
        match self.from_native(format_code) {
            BarcodeFormat::Unknown => type_code
                .map(|t| self.from_native_type(t))
                .unwrap_or(BarcodeFormat::Unknown),
            format => format,
        }
    }

    /// Symbologies this decoder can be configured for.
    pub fn supported_formats(&self) -> impl Iterator<Item = BarcodeFormat> + '_ {
        self.table.formats.iter().map(|&(f, _)| f)
    }

    fn mapped_codes(&self, requested: &[BarcodeFormat]) -> Vec<NativeCode> {
        let mut codes: Vec<NativeCode> = Vec::new();
        for &format in requested {
            if !format.is_symbology() {
                continue;
            }
            let Some(code) = self.table.formats.iter().find(|(f, _)| *f == format) else {
                continue;
            };
            if !codes.contains(&code.1) {
                codes.push(code.1);
            }
        }
        codes
    }

    fn mask_from_codes(&self, codes: Vec<NativeCode>) -> NativeFormatMask {
        match self.table.style {
            MaskStyle::Bitmask => NativeFormatMask::Bits(codes.iter().fold(0, |acc, c| acc | c.0)),
            MaskStyle::CodeList => NativeFormatMask::Codes(codes),
        }
    }
}

fn requests_all(requested: &[BarcodeFormat]) -> bool {
    requested.is_empty() || requested.contains(&BarcodeFormat::AllFormats)
}
