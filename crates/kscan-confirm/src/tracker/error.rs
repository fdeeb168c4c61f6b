/// Errors returned when validating tracker parameters.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerParamsError {
    #[error("confirmation threshold must be at least 1")]
    ZeroThreshold,
}
