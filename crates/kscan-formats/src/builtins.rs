//! Built-in native format tables.

use crate::table::{EmptyMaskPolicy, MaskStyle, NativeCode, NativeFormatTable};
use kscan_core::BarcodeFormat;

/// ML Kit barcode scanning (Android). Formats are bit flags; `0` requests
/// all formats and `-1` marks an unknown symbol.
pub static ML_KIT: NativeFormatTable = NativeFormatTable {
    name: "mlkit",
    style: MaskStyle::Bitmask,
    all_formats: NativeCode(0),
    unknown: NativeCode(-1),
    formats: &[
        (BarcodeFormat::Code128, NativeCode(1)),
        (BarcodeFormat::Code39, NativeCode(2)),
        (BarcodeFormat::Code93, NativeCode(4)),
        (BarcodeFormat::Codabar, NativeCode(8)),
        (BarcodeFormat::DataMatrix, NativeCode(16)),
        (BarcodeFormat::Ean13, NativeCode(32)),
        (BarcodeFormat::Ean8, NativeCode(64)),
        (BarcodeFormat::Itf, NativeCode(128)),
        (BarcodeFormat::QrCode, NativeCode(256)),
        (BarcodeFormat::UpcA, NativeCode(512)),
        (BarcodeFormat::UpcE, NativeCode(1024)),
        (BarcodeFormat::Pdf417, NativeCode(2048)),
        (BarcodeFormat::Aztec, NativeCode(4096)),
    ],
    content_types: &[
        (BarcodeFormat::ContactInfo, NativeCode(1)),
        (BarcodeFormat::Email, NativeCode(2)),
        (BarcodeFormat::Isbn, NativeCode(3)),
        (BarcodeFormat::Phone, NativeCode(4)),
        (BarcodeFormat::Product, NativeCode(5)),
        (BarcodeFormat::Sms, NativeCode(6)),
        (BarcodeFormat::Text, NativeCode(7)),
        (BarcodeFormat::Url, NativeCode(8)),
        (BarcodeFormat::Wifi, NativeCode(9)),
        (BarcodeFormat::Geo, NativeCode(10)),
        (BarcodeFormat::CalendarEvent, NativeCode(11)),
        (BarcodeFormat::DriverLicense, NativeCode(12)),
    ],
    empty_mask_policy: EmptyMaskPolicy::FallBackToAll,
};

/// AVFoundation metadata object types (iOS).
///
/// The platform identifies types by string; hosts convert them with
/// [`av_foundation_code`]. The capture output must be given an explicit
/// type list, so a request with no supported type is rejected.
pub static AV_FOUNDATION: NativeFormatTable = NativeFormatTable {
    name: "avfoundation",
    style: MaskStyle::CodeList,
    all_formats: NativeCode(0),
    unknown: NativeCode(-1),
    formats: &[
        (BarcodeFormat::QrCode, NativeCode(1)),
        (BarcodeFormat::Ean13, NativeCode(2)),
        (BarcodeFormat::Ean8, NativeCode(3)),
        (BarcodeFormat::Code128, NativeCode(4)),
        (BarcodeFormat::Code39, NativeCode(5)),
        (BarcodeFormat::Code93, NativeCode(6)),
        (BarcodeFormat::UpcE, NativeCode(7)),
        (BarcodeFormat::Pdf417, NativeCode(8)),
        (BarcodeFormat::Aztec, NativeCode(9)),
        (BarcodeFormat::DataMatrix, NativeCode(10)),
    ],
    content_types: &[],
    empty_mask_policy: EmptyMaskPolicy::Reject,
};

const AV_FOUNDATION_IDENTIFIERS: [(NativeCode, &str); 10] = [
    (NativeCode(1), "org.iso.QRCode"),
    (NativeCode(2), "org.gs1.EAN-13"),
    (NativeCode(3), "org.gs1.EAN-8"),
    (NativeCode(4), "org.iso.Code128"),
    (NativeCode(5), "org.iso.Code39"),
    (NativeCode(6), "com.intermec.Code93"),
    (NativeCode(7), "org.gs1.UPC-E"),
    (NativeCode(8), "org.iso.PDF417"),
    (NativeCode(9), "org.iso.Aztec"),
    (NativeCode(10), "org.iso.DataMatrix"),
];

/// Names accepted by [`builtin_table`].
pub const BUILTIN_TABLE_NAMES: [&str; 2] = ["mlkit", "avfoundation"];

/// Look up a built-in table by name (case-insensitive).
pub fn builtin_table(name: &str) -> Option<&'static NativeFormatTable> {
    match name.to_ascii_lowercase().as_str() {
        "mlkit" | "ml_kit" | "android" => Some(&ML_KIT),
        "avfoundation" | "av_foundation" | "ios" => Some(&AV_FOUNDATION),
        _ => None,
    }
}

/// Native code for an AVFoundation metadata object type identifier.
///
/// Unknown identifiers map to the table's `unknown` code.
pub fn av_foundation_code(identifier: &str) -> NativeCode {
    AV_FOUNDATION_IDENTIFIERS
        .iter()
        .find(|(_, id)| *id == identifier)
        .map_or(AV_FOUNDATION.unknown, |&(code, _)| code)
}

/// AVFoundation metadata object type identifier for a native code.
pub fn av_foundation_identifier(code: NativeCode) -> Option<&'static str> {
    AV_FOUNDATION_IDENTIFIERS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|&(_, id)| id)
}
