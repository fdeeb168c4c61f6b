use super::TrackerParamsError;
use serde::{Deserialize, Serialize};

/// How hits are accumulated for a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Every accepted detection counts, across any frames and within one
    /// frame. Counters are never decayed.
    #[default]
    Cumulative,
    /// A payload counts at most once per frame and its counter is dropped as
    /// soon as a frame does not contain it.
    Consecutive,
}

/// What happens after a success has been emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// The scan ends; further frames are ignored until reset.
    #[default]
    SingleResult,
    /// State is cleared and scanning continues.
    Continuous,
}

/// How several payloads confirmed by the same frame are surfaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiConfirmPolicy {
    /// Emit the first payload to reach the threshold.
    #[default]
    FirstOnly,
    /// Emit every confirmed payload as candidates for the host to choose from.
    Surface,
}

/// Configuration for [`crate::ConfirmationTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerParams {
    /// Number of hits needed before a payload is confirmed.
    pub threshold: u32,
    pub counting: CountingMode,
    pub lifecycle: Lifecycle,
    pub multi_confirm: MultiConfirmPolicy,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            threshold: 2,
            counting: CountingMode::default(),
            lifecycle: Lifecycle::default(),
            multi_confirm: MultiConfirmPolicy::default(),
        }
    }
}

impl TrackerParams {
    pub fn validate(&self) -> Result<(), TrackerParamsError> {
        if self.threshold == 0 {
            return Err(TrackerParamsError::ZeroThreshold);
        }
        Ok(())
    }
}
