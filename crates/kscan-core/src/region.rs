//! Normalized scan regions and pixel-space rectangles.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in frame pixel coordinates.
///
/// Edges are inclusive for containment tests.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin plus size, the way platform SDKs report bounds.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True if `other` lies entirely inside `self`. Partial overlap is `false`.
    pub fn contains(&self, other: &PixelRect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// Validation errors for [`ScanRegion`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanRegionError {
    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { field: &'static str, value: f32 },
    #[error("{field} must be greater than 0.0, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{axis} must not exceed 1.0, got {value}")]
    Overflow { axis: &'static str, value: f32 },
}

/// Normalized region of interest inside a frame.
///
/// All coordinates are fractions of the frame size. Instances are always
/// valid: `0 <= left, top`, `width, height > 0`, `left + width <= 1` and
/// `top + height <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScanRegion", into = "RawScanRegion")]
pub struct ScanRegion {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl ScanRegion {
    /// The whole frame.
    pub const FULL_SCREEN: ScanRegion = ScanRegion {
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Validate and create a region.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, ScanRegionError> {
        unit_range("left", left)?;
        unit_range("top", top)?;
        unit_range("width", width)?;
        unit_range("height", height)?;
        if left + width > 1.0 {
            return Err(ScanRegionError::Overflow {
                axis: "left + width",
                value: left + width,
            });
        }
        if top + height > 1.0 {
            return Err(ScanRegionError::Overflow {
                axis: "top + height",
                value: top + height,
            });
        }
        if width <= 0.0 {
            return Err(ScanRegionError::NonPositive {
                field: "width",
                value: width,
            });
        }
        if height <= 0.0 {
            return Err(ScanRegionError::NonPositive {
                field: "height",
                value: height,
            });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// A region of the given size centered in the frame.
    pub fn centered(width: f32, height: f32) -> Result<Self, ScanRegionError> {
        unit_range("width", width)?;
        unit_range("height", height)?;
        Self::new((1.0 - width) / 2.0, (1.0 - height) / 2.0, width, height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.left
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Map the region onto a `frame_width` x `frame_height` pixel frame.
    pub fn to_pixels(&self, frame_width: f32, frame_height: f32) -> PixelRect {
        PixelRect::new(
            self.left * frame_width,
            self.top * frame_height,
            self.right() * frame_width,
            self.bottom() * frame_height,
        )
    }
}

impl Default for ScanRegion {
    fn default() -> Self {
        Self::FULL_SCREEN
    }
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ScanRegionError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScanRegionError::OutOfRange { field, value })
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawScanRegion {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl TryFrom<RawScanRegion> for ScanRegion {
    type Error = ScanRegionError;

    fn try_from(raw: RawScanRegion) -> Result<Self, Self::Error> {
        ScanRegion::new(raw.left, raw.top, raw.width, raw.height)
    }
}

impl From<ScanRegion> for RawScanRegion {
    fn from(r: ScanRegion) -> Self {
        Self {
            left: r.left,
            top: r.top,
            width: r.width,
            height: r.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_out_of_range_left() {
        let err = ScanRegion::new(1.1, 0.0, 0.1, 0.1).unwrap_err();
        assert_eq!(
            err,
            ScanRegionError::OutOfRange {
                field: "left",
                value: 1.1
            }
        );
    }

    #[test]
    fn rejects_zero_width() {
        let err = ScanRegion::new(0.2, 0.2, 0.0, 0.5).unwrap_err();
        assert!(matches!(
            err,
            ScanRegionError::NonPositive { field: "width", .. }
        ));
    }

    #[test]
    fn rejects_overflowing_extent() {
        assert!(matches!(
            ScanRegion::new(0.6, 0.0, 0.5, 0.5),
            Err(ScanRegionError::Overflow { .. })
        ));
        assert!(matches!(
            ScanRegion::new(0.0, 0.7, 0.5, 0.5),
            Err(ScanRegionError::Overflow { .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        assert!(ScanRegion::new(f32::NAN, 0.0, 0.5, 0.5).is_err());
    }

    #[test]
    fn centered_region_is_symmetric() {
        let r = ScanRegion::centered(0.5, 0.5).expect("valid region");
        assert_relative_eq!(r.left(), 0.25);
        assert_relative_eq!(r.top(), 0.25);
        assert_relative_eq!(r.right(), 0.75);
        assert_relative_eq!(r.bottom(), 0.75);
        assert!(ScanRegion::centered(1.5, 0.5).is_err());
    }

    #[test]
    fn full_screen_maps_to_whole_frame() {
        let px = ScanRegion::FULL_SCREEN.to_pixels(640.0, 480.0);
        assert_eq!(px, PixelRect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn containment_is_total_not_intersection() {
        let outer = PixelRect::new(250.0, 250.0, 750.0, 750.0);
        assert!(outer.contains(&PixelRect::new(260.0, 260.0, 740.0, 740.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&PixelRect::new(240.0, 260.0, 740.0, 740.0)));
        assert!(!outer.contains(&PixelRect::from_origin_size(700.0, 700.0, 100.0, 10.0)));
    }

    #[test]
    fn deserialization_validates() {
        let ok: ScanRegion =
            serde_json::from_str(r#"{"left":0.1,"top":0.1,"width":0.8,"height":0.8}"#)
                .expect("valid region");
        assert_relative_eq!(ok.right(), 0.9);
        let bad = serde_json::from_str::<ScanRegion>(
            r#"{"left":0.5,"top":0.1,"width":0.8,"height":0.8}"#,
        );
        assert!(bad.is_err());
    }
}
