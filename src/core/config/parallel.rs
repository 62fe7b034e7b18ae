//! Parallel processing configuration.

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigValidator};
use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;

/// Configuration for how images are spread over the worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of worker threads.
    /// If None, the pool is sized to the available hardware parallelism.
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Number of images processed sequentially (<= this uses sequential).
    /// Default: 1 (a single image runs on the calling thread)
    #[serde(default = "ParallelPolicy::default_image_threshold")]
    pub image_threshold: usize,
}

impl ParallelPolicy {
    /// Create a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the image processing threshold.
    pub fn with_image_threshold(mut self, threshold: usize) -> Self {
        self.image_threshold = threshold;
        self
    }

    /// Number of worker threads the pool should be built with.
    pub fn effective_threads(&self) -> usize {
        self.max_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    fn default_image_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            image_threshold: Self::default_image_threshold(),
        }
    }
}

impl ConfigValidator for ParallelPolicy {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threads) = self.max_threads {
            self.validate_positive("max_threads", threads)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_threads_honours_limit() {
        let policy = ParallelPolicy::new().with_max_threads(Some(3));
        assert_eq!(policy.effective_threads(), 3);

        let policy = ParallelPolicy::new();
        assert!(policy.effective_threads() >= 1);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let policy = ParallelPolicy::new().with_max_threads(Some(0));
        assert!(policy.validate().is_err());
        assert!(ParallelPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let policy: ParallelPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, ParallelPolicy::default());

        let policy: ParallelPolicy = serde_json::from_str(r#"{"max_threads": 2}"#).unwrap();
        assert_eq!(policy.max_threads, Some(2));
        assert_eq!(policy.image_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }
}
