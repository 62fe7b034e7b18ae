//! Configuration types for the crop pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::config::{ConfigError, ConfigValidator, ParallelPolicy};
use crate::core::constants::{
    DEFAULT_CROP_COUNT, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_DIR, DEFAULT_ROTATION_DEGREES,
};
use crate::processors::{Rotation, TransformConfig};

/// Tunables for a crop pipeline run.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use crop_sampler::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{ "count": 5, "seed": 7 }"#).unwrap();
/// assert_eq!(config.count, 5);
/// assert_eq!(config.max_attempts, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of crops taken from each image.
    #[serde(default = "PipelineConfig::default_count")]
    pub count: usize,

    /// Ceiling on sampling attempts per image.
    #[serde(default = "PipelineConfig::default_max_attempts")]
    pub max_attempts: usize,

    /// Directory crops are written to. Created if missing.
    #[serde(default = "PipelineConfig::default_output_dir")]
    pub output_dir: PathBuf,

    /// Seed for reproducible sampling. Each image derives its own generator
    /// from this seed and its input position. If None, OS entropy is used.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Transforms applied to every source image before sampling.
    #[serde(default = "PipelineConfig::default_pre_transforms")]
    pub pre_transforms: Vec<TransformConfig>,

    /// Transforms applied to every crop after extraction.
    #[serde(default = "PipelineConfig::default_post_transforms")]
    pub post_transforms: Vec<TransformConfig>,

    /// Worker pool settings.
    #[serde(default)]
    pub parallel_policy: ParallelPolicy,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pre_transforms(mut self, transforms: Vec<TransformConfig>) -> Self {
        self.pre_transforms = transforms;
        self
    }

    pub fn with_post_transforms(mut self, transforms: Vec<TransformConfig>) -> Self {
        self.post_transforms = transforms;
        self
    }

    pub fn with_parallel_policy(mut self, policy: ParallelPolicy) -> Self {
        self.parallel_policy = policy;
        self
    }

    fn default_count() -> usize {
        DEFAULT_CROP_COUNT
    }

    fn default_max_attempts() -> usize {
        DEFAULT_MAX_ATTEMPTS
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    fn default_pre_transforms() -> Vec<TransformConfig> {
        vec![TransformConfig::Greyscale]
    }

    fn default_post_transforms() -> Vec<TransformConfig> {
        vec![TransformConfig::Rotate {
            degrees: DEFAULT_ROTATION_DEGREES,
        }]
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            count: Self::default_count(),
            max_attempts: Self::default_max_attempts(),
            output_dir: Self::default_output_dir(),
            seed: None,
            pre_transforms: Self::default_pre_transforms(),
            post_transforms: Self::default_post_transforms(),
            parallel_policy: ParallelPolicy::default(),
        }
    }
}

impl ConfigValidator for PipelineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_positive("max_attempts", self.max_attempts)?;

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "output_dir must not be empty".to_string(),
            });
        }

        for transform in self.pre_transforms.iter().chain(&self.post_transforms) {
            if let TransformConfig::Rotate { degrees } = transform {
                Rotation::from_degrees(*degrees)?;
            }
        }

        self.parallel_policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = PipelineConfig::default();
        assert_eq!(config.count, 3);
        assert_eq!(config.max_attempts, 1000);
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert_eq!(config.pre_transforms, vec![TransformConfig::Greyscale]);
        assert_eq!(
            config.post_transforms,
            vec![TransformConfig::Rotate { degrees: 180 }]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(PipelineConfig::new().with_max_attempts(0).validate().is_err());
        assert!(PipelineConfig::new().with_output_dir("").validate().is_err());
        assert!(
            PipelineConfig::new()
                .with_post_transforms(vec![TransformConfig::Rotate { degrees: 45 }])
                .validate()
                .is_err()
        );
        assert!(
            PipelineConfig::new()
                .with_parallel_policy(ParallelPolicy::new().with_max_threads(Some(0)))
                .validate()
                .is_err()
        );
        // Zero crops is a valid, if quiet, run.
        assert!(PipelineConfig::new().with_count(0).validate().is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "count": 4,
                "output_dir": "out",
                "pre_transforms": [],
                "post_transforms": [{{"type": "Rotate", "degrees": 90}}],
                "parallel_policy": {{"max_threads": 2}}
            }}"#
        )
        .unwrap();

        let config = PipelineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.count, 4);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(config.pre_transforms.is_empty());
        assert_eq!(config.parallel_policy.max_threads, Some(2));
        assert_eq!(config.max_attempts, 1000);
    }

    #[test]
    fn test_from_json_file_errors() {
        let err = PipelineConfig::from_json_file(Path::new("no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        let err = PipelineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = PipelineConfig::new().with_seed(Some(99)).with_count(6);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PipelineConfig::from_json_str(&json).unwrap(), config);
    }
}
