//! Configuration error types and validation traits.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that validation failed.
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },

    /// The configuration file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the expected shape.
    #[error("failed to parse configuration")]
    Parse(#[from] serde_json::Error),
}

/// A trait for validating configuration parameters.
pub trait ConfigValidator {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Validates that a count-like value is greater than zero.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the field, used in the error message.
    /// * `value` - The value to check.
    fn validate_positive(&self, name: &str, value: usize) -> Result<(), ConfigError> {
        if value == 0 {
            return Err(ConfigError::ValidationFailed {
                message: format!("{name} must be greater than 0"),
            });
        }
        Ok(())
    }
}
