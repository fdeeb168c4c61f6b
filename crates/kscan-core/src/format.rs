//! Platform-neutral barcode formats and content types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Barcode symbology, payload content type, or one of the two sentinels.
///
/// Symbologies describe how a code is drawn; content types describe what a
/// decoder believes the payload means. Some decoders report both for the
/// same detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "FORMAT_QR_CODE")]
    QrCode,
    #[serde(rename = "FORMAT_CODE_128")]
    Code128,
    #[serde(rename = "FORMAT_CODE_39")]
    Code39,
    #[serde(rename = "FORMAT_CODE_93")]
    Code93,
    #[serde(rename = "FORMAT_CODABAR")]
    Codabar,
    #[serde(rename = "FORMAT_DATA_MATRIX")]
    DataMatrix,
    #[serde(rename = "FORMAT_EAN_13")]
    Ean13,
    #[serde(rename = "FORMAT_EAN_8")]
    Ean8,
    #[serde(rename = "FORMAT_ITF")]
    Itf,
    #[serde(rename = "FORMAT_UPC_A")]
    UpcA,
    #[serde(rename = "FORMAT_UPC_E")]
    UpcE,
    #[serde(rename = "FORMAT_PDF417")]
    Pdf417,
    #[serde(rename = "FORMAT_AZTEC")]
    Aztec,
    /// Wildcard: request every symbology the decoder supports.
    #[serde(rename = "FORMAT_ALL_FORMATS")]
    AllFormats,
    #[serde(rename = "TYPE_CONTACT_INFO")]
    ContactInfo,
    #[serde(rename = "TYPE_EMAIL")]
    Email,
    #[serde(rename = "TYPE_PHONE")]
    Phone,
    #[serde(rename = "TYPE_SMS")]
    Sms,
    #[serde(rename = "TYPE_URL")]
    Url,
    #[serde(rename = "TYPE_WIFI")]
    Wifi,
    #[serde(rename = "TYPE_GEO")]
    Geo,
    #[serde(rename = "TYPE_CALENDAR_EVENT")]
    CalendarEvent,
    #[serde(rename = "TYPE_DRIVER_LICENSE")]
    DriverLicense,
    #[serde(rename = "TYPE_TEXT")]
    Text,
    #[serde(rename = "TYPE_ISBN")]
    Isbn,
    #[serde(rename = "TYPE_PRODUCT")]
    Product,
    /// Result of translating a native code that no table knows about.
    #[serde(rename = "TYPE_UNKNOWN")]
    Unknown,
}

impl BarcodeFormat {
    /// The 13 concrete symbologies, in declaration order.
    pub const SYMBOLOGIES: [BarcodeFormat; 13] = [
        Self::QrCode,
        Self::Code128,
        Self::Code39,
        Self::Code93,
        Self::Codabar,
        Self::DataMatrix,
        Self::Ean13,
        Self::Ean8,
        Self::Itf,
        Self::UpcA,
        Self::UpcE,
        Self::Pdf417,
        Self::Aztec,
    ];

    /// The 12 payload content types, in declaration order.
    pub const CONTENT_TYPES: [BarcodeFormat; 12] = [
        Self::ContactInfo,
        Self::Email,
        Self::Phone,
        Self::Sms,
        Self::Url,
        Self::Wifi,
        Self::Geo,
        Self::CalendarEvent,
        Self::DriverLicense,
        Self::Text,
        Self::Isbn,
        Self::Product,
    ];

    /// Stable upper-case name, e.g. `FORMAT_QR_CODE` or `TYPE_URL`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QrCode => "FORMAT_QR_CODE",
            Self::Code128 => "FORMAT_CODE_128",
            Self::Code39 => "FORMAT_CODE_39",
            Self::Code93 => "FORMAT_CODE_93",
            Self::Codabar => "FORMAT_CODABAR",
            Self::DataMatrix => "FORMAT_DATA_MATRIX",
            Self::Ean13 => "FORMAT_EAN_13",
            Self::Ean8 => "FORMAT_EAN_8",
            Self::Itf => "FORMAT_ITF",
            Self::UpcA => "FORMAT_UPC_A",
            Self::UpcE => "FORMAT_UPC_E",
            Self::Pdf417 => "FORMAT_PDF417",
            Self::Aztec => "FORMAT_AZTEC",
            Self::AllFormats => "FORMAT_ALL_FORMATS",
            Self::ContactInfo => "TYPE_CONTACT_INFO",
            Self::Email => "TYPE_EMAIL",
            Self::Phone => "TYPE_PHONE",
            Self::Sms => "TYPE_SMS",
            Self::Url => "TYPE_URL",
            Self::Wifi => "TYPE_WIFI",
            Self::Geo => "TYPE_GEO",
            Self::CalendarEvent => "TYPE_CALENDAR_EVENT",
            Self::DriverLicense => "TYPE_DRIVER_LICENSE",
            Self::Text => "TYPE_TEXT",
            Self::Isbn => "TYPE_ISBN",
            Self::Product => "TYPE_PRODUCT",
            Self::Unknown => "TYPE_UNKNOWN",
        }
    }

    /// True for the concrete symbologies (not the wildcard, not content types).
    #[inline]
    pub fn is_symbology(self) -> bool {
        Self::SYMBOLOGIES.contains(&self)
    }

    /// True for payload content types.
    #[inline]
    pub fn is_content_type(self) -> bool {
        Self::CONTENT_TYPES.contains(&self)
    }

    fn all() -> impl Iterator<Item = BarcodeFormat> {
        Self::SYMBOLOGIES
            .into_iter()
            .chain(std::iter::once(Self::AllFormats))
            .chain(Self::CONTENT_TYPES)
            .chain(std::iter::once(Self::Unknown))
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known format.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown barcode format `{0}`")]
pub struct ParseFormatError(pub String);

impl FromStr for BarcodeFormat {
    type Err = ParseFormatError;

    /// Accepts the full names (`FORMAT_QR_CODE`) and the short forms
    /// without prefix (`qr_code`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::all()
            .find(|f| {
                let name = f.as_str();
                name == wanted
                    || name.strip_prefix("FORMAT_") == Some(wanted.as_str())
                    || name.strip_prefix("TYPE_") == Some(wanted.as_str())
            })
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}
