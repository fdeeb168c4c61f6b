use kscan_core::PixelRect;
use kscan_formats::NativeCode;
use serde::{Deserialize, Serialize};

/// A single symbol reported by the decoder for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// Decoded textual payload. Detections without payload are skipped.
    pub payload: String,
    /// Native symbology code.
    pub format: NativeCode,
    /// Native content-type code, when the decoder reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<NativeCode>,
    /// Bounding box in frame pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<PixelRect>,
}

impl RawDetection {
    pub fn new(payload: impl Into<String>, format: NativeCode) -> Self {
        Self {
            payload: payload.into(),
            format,
            content_type: None,
            bounds: None,
        }
    }

    pub fn with_content_type(mut self, code: NativeCode) -> Self {
        self.content_type = Some(code);
        self
    }

    pub fn with_bounds(mut self, bounds: PixelRect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Everything the decoder found in one analyzed frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

impl FrameDetections {
    pub fn new(width: u32, height: u32, detections: Vec<RawDetection>) -> Self {
        Self {
            width,
            height,
            detections,
        }
    }

    /// Frame with no detections.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::new(width, height, Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
