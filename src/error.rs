use thiserror::Error;

/// Errors surfaced at the document boundary.
///
/// The extraction sweep itself is infallible: unrecognized lines are inert
/// and an empty document yields an empty result. Only the caller-facing
/// helpers (date conversion) can fail.
#[derive(Error, Debug)]
pub enum LabParseError {
    #[error("unrecognized date format: {0}")]
    InvalidDate(String),
}
