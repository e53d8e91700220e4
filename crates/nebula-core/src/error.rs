//! Error types for the sketch core.

use thiserror::Error;

/// Result alias for fallible core operations.
pub type Result<T> = std::result::Result<T, SketchError>;

/// Errors surfaced by the core.
///
/// Geometry and particle evaluation never fail; only configuration checks
/// and the audio collaborator report errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SketchError {
    /// A tuning value is NaN, infinite or outside its allowed range
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// The microphone could not be opened or started
    #[error("audio capture unavailable: {0}")]
    AudioUnavailable(String),
}
