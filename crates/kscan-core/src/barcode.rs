use crate::BarcodeFormat;
use serde::{Deserialize, Serialize};

/// A confirmed scan result.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Barcode {
    /// Decoded payload.
    pub data: String,
    /// Format name, e.g. `FORMAT_QR_CODE`.
    pub format: String,
}

impl Barcode {
    pub fn new(data: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            data: data.into(),
            format: format.as_str().to_string(),
        }
    }
}

/// Reason reported by the decoder for a failed frame, kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub reason: String,
}

impl std::fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Terminal outcome delivered to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanResult {
    Success { barcode: Barcode },
    Failed { failure: ScanFailure },
    Canceled,
}

impl ScanResult {
    pub fn success(barcode: Barcode) -> Self {
        Self::Success { barcode }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            failure: ScanFailure {
                reason: reason.into(),
            },
        }
    }

    /// The barcode carried by a `Success`, if any.
    pub fn barcode(&self) -> Option<&Barcode> {
        match self {
            Self::Success { barcode } => Some(barcode),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_uses_format_name() {
        let b = Barcode::new("ABC123", BarcodeFormat::Code128);
        assert_eq!(b.format, "FORMAT_CODE_128");
    }

    #[test]
    fn result_serializes_with_kind_tag() {
        let r = ScanResult::failed("camera busy");
        let json = serde_json::to_value(&r).expect("serialize");
        assert_eq!(json["kind"], "failed");
        assert_eq!(json["failure"]["reason"], "camera busy");
        assert!(r.barcode().is_none());

        let canceled = serde_json::to_value(ScanResult::Canceled).expect("serialize");
        assert_eq!(canceled["kind"], "canceled");
    }
}
