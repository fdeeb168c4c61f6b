//! Region-of-interest filtering of raw detections.

use kscan_core::{PixelRect, ScanRegion};

/// Decide whether a detection counts for the current region of interest.
///
/// - No region: every detection counts.
/// - Region but no bounds: the detection is rejected, containment cannot be
///   verified.
/// - Otherwise the bounds must lie entirely inside the region mapped onto the
///   `frame_width` x `frame_height` frame. Partial overlap is rejected.
pub fn accepts(
    region: Option<&ScanRegion>,
    bounds: Option<&PixelRect>,
    frame_width: f32,
    frame_height: f32,
) -> bool {
    let Some(region) = region else {
        return true;
    };
    let Some(bounds) = bounds else {
        return false;
    };
    if !(frame_width > 0.0 && frame_height > 0.0) {
        return false;
    }
    region.to_pixels(frame_width, frame_height).contains(bounds)
}
