//! Image transforms applied before and after cropping.
//!
//! Transforms are pure `DynamicImage -> DynamicImage` functions. They are
//! described in configuration by [`TransformConfig`], built into trait objects
//! by [`TransformFactory`], and applied in list order by [`TransformChain`].

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::core::ConfigError;

/// Trait for pure image-to-image transforms.
pub trait ImageTransform: Debug + Send + Sync {
    /// Produce the transformed image.
    fn apply(&self, image: DynamicImage) -> DynamicImage;

    /// Get the transform name for logging
    fn name(&self) -> &str;
}

/// Configuration for a single transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformConfig {
    /// Convert to single-channel greyscale
    Greyscale,

    /// Rotate counter-clockwise by a multiple of 90 degrees
    Rotate {
        /// Rotation angle in degrees: 0, 90, 180 or 270
        degrees: u32,
    },
}

/// Converts images to 8-bit greyscale.
#[derive(Debug, Default)]
pub struct GreyscaleTransform;

impl ImageTransform for GreyscaleTransform {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        image.grayscale()
    }

    fn name(&self) -> &str {
        "Greyscale"
    }
}

/// A rotation by a right angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// Maps an angle in degrees onto a right-angle rotation.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for angles other than 0, 90, 180 and 270.
    pub fn from_degrees(degrees: u32) -> Result<Self, ConfigError> {
        match degrees {
            0 => Ok(Self::None),
            90 => Ok(Self::Quarter),
            180 => Ok(Self::Half),
            270 => Ok(Self::ThreeQuarter),
            other => Err(ConfigError::InvalidConfig {
                message: format!("rotation must be 0, 90, 180 or 270 degrees, got {other}"),
            }),
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }
}

/// Rotates images counter-clockwise by a right angle.
#[derive(Debug)]
pub struct RotateTransform {
    rotation: Rotation,
    name: String,
}

impl RotateTransform {
    pub fn new(rotation: Rotation) -> Self {
        Self {
            rotation,
            name: format!("Rotate{}", rotation.degrees()),
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
}

impl ImageTransform for RotateTransform {
    fn apply(&self, image: DynamicImage) -> DynamicImage {
        // imageops rotates clockwise
        match self.rotation {
            Rotation::None => image,
            Rotation::Quarter => image.rotate270(),
            Rotation::Half => image.rotate180(),
            Rotation::ThreeQuarter => image.rotate90(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Factory for creating transforms from configuration.
pub struct TransformFactory;

impl TransformFactory {
    /// Create the transform described by `config`.
    pub fn create(config: &TransformConfig) -> Result<Box<dyn ImageTransform>, ConfigError> {
        match config {
            TransformConfig::Greyscale => Ok(Box::new(GreyscaleTransform)),
            TransformConfig::Rotate { degrees } => Ok(Box::new(RotateTransform::new(
                Rotation::from_degrees(*degrees)?,
            ))),
        }
    }
}

/// An ordered list of transforms applied one after another.
///
/// An empty chain is the identity.
#[derive(Debug, Default)]
pub struct TransformChain {
    transforms: Vec<Box<dyn ImageTransform>>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from configuration, preserving order.
    pub fn from_configs(configs: &[TransformConfig]) -> Result<Self, ConfigError> {
        let transforms = configs
            .iter()
            .map(TransformFactory::create)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { transforms })
    }

    /// Apply every transform in order.
    pub fn apply(&self, image: DynamicImage) -> DynamicImage {
        self.transforms
            .iter()
            .fold(image, |image, transform| transform.apply(image))
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}
