//! Error types for the crop pipeline.
//!
//! This module defines the error kinds that can surface while cropping a batch
//! of images: malformed user input, images that fail to decode, images on which
//! the region sampler cannot place enough crops, and crops that cannot be
//! written to disk. Only [`CropError::InvalidInput`] and configuration errors
//! stop a run before it starts; every other kind is isolated to the image or
//! crop it concerns.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::processors::{CanvasSize, CropSize};

/// Enum representing the errors that can occur in the crop pipeline.
#[derive(Error, Debug)]
pub enum CropError {
    /// The source image at `path` could not be opened or decoded.
    #[error("failed to load image {}", path.display())]
    ImageLoad {
        /// Path of the image that failed to load.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// User supplied input that cannot be turned into a crop request.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// The region sampler ran out of attempts before placing every crop.
    #[error(
        "placed {placed} of {requested} non-overlapping {crop} crops on a {canvas} canvas \
         after {attempts} attempts (limit {max_attempts})"
    )]
    PlacementExhausted {
        /// Number of crops accepted before the budget ran out.
        placed: usize,
        /// Number of crops requested.
        requested: usize,
        /// Number of attempts consumed.
        attempts: usize,
        /// The attempt budget in force.
        max_attempts: usize,
        /// Size of the canvas that was sampled.
        canvas: CanvasSize,
        /// Size of every crop.
        crop: CropSize,
    },

    /// A crop could not be encoded or written to `path`.
    #[error("failed to write crop to {}", path.display())]
    Write {
        /// Destination of the failed write.
        path: PathBuf,
        /// The underlying encode or IO error.
        #[source]
        source: image::ImageError,
    },

    /// The pipeline configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be created.
    #[error("worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl CropError {
    /// Creates an [`CropError::InvalidInput`] from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns true if this error came from decoding a source image.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::ImageLoad { .. })
    }

    /// Returns true if this error came from the region sampler running out of attempts.
    pub fn is_placement_exhausted(&self) -> bool {
        matches!(self, Self::PlacementExhausted { .. })
    }
}

/// Convenient result alias for crop operations.
pub type CropResult<T> = Result<T, CropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_exhausted_message_names_geometry() {
        let err = CropError::PlacementExhausted {
            placed: 1,
            requested: 3,
            attempts: 1000,
            max_attempts: 1000,
            canvas: CanvasSize::new(64, 48),
            crop: CropSize::new(64, 48),
        };

        let message = err.to_string();
        assert!(message.contains("placed 1 of 3"));
        assert!(message.contains("64x48"));
        assert!(message.contains("limit 1000"));
        assert!(err.is_placement_exhausted());
        assert!(!err.is_load_failure());
    }

    #[test]
    fn test_invalid_input_constructor() {
        let err = CropError::invalid_input("crop width must be a positive integer");
        assert!(matches!(err, CropError::InvalidInput { .. }));
        assert_eq!(
            err.to_string(),
            "invalid input: crop width must be a positive integer"
        );
    }
}
