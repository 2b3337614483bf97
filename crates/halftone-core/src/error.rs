//! Unified error type for the halftone core.
//!
//! [`HalftoneError`] covers every failure the pipeline can report. All of
//! them are raised synchronously, and grid/option problems are raised before
//! any pixel work happens.

use thiserror::Error;

/// Errors reported by the halftone pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HalftoneError {
    /// Neither the horizontal nor the vertical cell count was supplied.
    #[error("at least one of the horizontal or vertical cell counts must be specified")]
    MissingCellCount,

    /// The requested grid cannot be laid over the image.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// Human readable explanation.
        reason: String,
    },

    /// Affine mapping requested with identical input bounds.
    #[error("degenerate range: input bounds are both {value}")]
    DegenerateRange {
        /// The shared input bound.
        value: f64,
    },

    /// Unknown tile shape or axis name.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// An option value is outside its accepted domain.
    #[error("invalid option {name}: {reason}")]
    InvalidOption {
        /// Option name as exposed to users.
        name: &'static str,
        /// Human readable explanation.
        reason: String,
    },

    /// Vasarely floors do not fit inside half a band period.
    #[error(
        "invalid pattern: floors of {floors} px exceed the half band of {half_band} px"
    )]
    InvalidPattern {
        /// Combined half floors (space + band).
        floors: u32,
        /// Half period of one band.
        half_band: u32,
    },

    /// Sample count does not match the declared dimensions.
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch {
        /// `width * height`
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
}

impl HalftoneError {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> Self {
        HalftoneError::InvalidGrid {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        HalftoneError::InvalidOption {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the requested configuration rather than
    /// by the image data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HalftoneError::MissingCellCount
                | HalftoneError::InvalidGrid { .. }
                | HalftoneError::InvalidOption { .. }
                | HalftoneError::InvalidPattern { .. }
                | HalftoneError::UnsupportedMode(_)
        )
    }
}
