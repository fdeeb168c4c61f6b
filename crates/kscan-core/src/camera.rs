//! Torch and zoom control contract.
//!
//! Hosts implement [`CameraControl`] on top of their camera API. This crate
//! only clamps and steps zoom ratios; it never talks to a camera.

use serde::{Deserialize, Serialize};

/// Upper bound applied to whatever zoom ratio the device advertises.
pub const MAX_SUPPORTED_ZOOM: f32 = 5.0;

/// Default increment used by zoom-in/zoom-out controls.
pub const DEFAULT_ZOOM_STEP: f32 = 0.5;

/// Camera operations the scanner UI needs from the host.
pub trait CameraControl {
    fn set_torch(&mut self, enabled: bool);
    fn set_zoom(&mut self, ratio: f32);
    /// Largest zoom ratio the device reports.
    fn max_zoom_ratio(&self) -> f32;
}

/// Current zoom ratio plus the ratio it may not exceed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub ratio: f32,
    pub max_ratio: f32,
}

impl ZoomState {
    /// Build from a device-reported maximum, capped at [`MAX_SUPPORTED_ZOOM`].
    pub fn new(device_max_ratio: f32) -> Self {
        Self {
            ratio: 1.0,
            max_ratio: effective_max_zoom(device_max_ratio),
        }
    }

    /// Clamp `ratio` to `[1.0, max_ratio]`.
    pub fn clamp(&self, ratio: f32) -> f32 {
        if ratio.is_nan() {
            return 1.0;
        }
        ratio.clamp(1.0, self.max_ratio.max(1.0))
    }

    pub fn set(&mut self, ratio: f32) -> f32 {
        self.ratio = self.clamp(ratio);
        self.ratio
    }

    pub fn step_in(&mut self, step: f32) -> f32 {
        self.set(self.ratio + step)
    }

    pub fn step_out(&mut self, step: f32) -> f32 {
        self.set(self.ratio - step)
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Cap a device maximum to `[1.0, MAX_SUPPORTED_ZOOM]`.
pub fn effective_max_zoom(device_max_ratio: f32) -> f32 {
    if !device_max_ratio.is_finite() {
        return 1.0;
    }
    device_max_ratio.clamp(1.0, MAX_SUPPORTED_ZOOM)
}

/// Clamp against the camera's own maximum, then forward. Returns the applied ratio.
pub fn apply_zoom(camera: &mut dyn CameraControl, ratio: f32) -> f32 {
    let state = ZoomState::new(camera.max_zoom_ratio());
    let applied = state.clamp(ratio);
    camera.set_zoom(applied);
    applied
}
