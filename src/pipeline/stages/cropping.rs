//! Crop extraction stage processor.

use image::DynamicImage;
use rand::Rng;
use tracing::debug;

use crate::core::CropResult;
use crate::pipeline::bundle::ImageBundle;
use crate::processors::TransformChain;

/// Settings shared by every bundle in a cropping run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CroppingConfig {
    /// Number of crops taken from each image.
    pub count: usize,
    /// Ceiling on sampling attempts per image.
    pub max_attempts: usize,
}

/// Processor for the per-image cropping stage.
///
/// This processor encapsulates the logic for:
/// - Applying the pre-crop transforms to the source raster
/// - Sampling non-overlapping crop regions
/// - Extracting each region and applying the post-crop transforms
pub struct CroppingStageProcessor;

impl CroppingStageProcessor {
    /// Turn one bundle into its ordered list of finished crops.
    ///
    /// The bundle is consumed; its full-size raster is released when this
    /// function returns and only the crops survive.
    ///
    /// # Arguments
    ///
    /// * `bundle` - The image and its metadata
    /// * `pre_transforms` - Applied to the whole raster before sampling
    /// * `post_transforms` - Applied to each crop after extraction
    /// * `config` - Crop count and attempt budget
    /// * `rng` - Random source owned by this bundle's task
    ///
    /// # Returns
    ///
    /// Exactly `config.count` crops in region acceptance order.
    ///
    /// # Errors
    ///
    /// Returns `CropError::PlacementExhausted` if the regions cannot be placed.
    pub fn process<R>(
        bundle: ImageBundle,
        pre_transforms: &TransformChain,
        post_transforms: &TransformChain,
        config: CroppingConfig,
        rng: &mut R,
    ) -> CropResult<Vec<DynamicImage>>
    where
        R: Rng + ?Sized,
    {
        let mut bundle = bundle.transform(pre_transforms);
        bundle.sample(config.count, config.max_attempts, rng)?;

        let crops: Vec<DynamicImage> = bundle
            .extract()
            .into_iter()
            .map(|crop| post_transforms.apply(crop))
            .collect();

        debug!(
            "Cropped {} regions from {}",
            crops.len(),
            bundle.source().display()
        );

        Ok(crops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CropError;
    use crate::processors::{CropSize, TransformConfig};
    use image::{GenericImageView, ImageBuffer, Rgb};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn chains() -> (TransformChain, TransformChain) {
        (
            TransformChain::from_configs(&[TransformConfig::Greyscale]).unwrap(),
            TransformChain::from_configs(&[TransformConfig::Rotate { degrees: 180 }]).unwrap(),
        )
    }

    fn gradient_bundle(width: u32, height: u32, crop: CropSize) -> ImageBundle {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            let v = ((x + y) % 256) as u8;
            Rgb([v, v, v])
        }));
        ImageBundle::new("gradient.png", image, crop)
    }

    #[test]
    fn test_process_returns_count_rotated_greyscale_crops() {
        let (pre, post) = chains();
        let crop = CropSize::new(10, 8);
        let bundle = gradient_bundle(100, 80, crop);
        let source = bundle.image().grayscale();

        // Replay the same seed to learn which boxes were chosen.
        let mut probe = bundle.clone().transform(&pre);
        let boxes = probe
            .sample(3, 1000, &mut StdRng::seed_from_u64(21))
            .unwrap()
            .boxes()
            .to_vec();

        let config = CroppingConfig {
            count: 3,
            max_attempts: 1000,
        };
        let crops = CroppingStageProcessor::process(
            bundle,
            &pre,
            &post,
            config,
            &mut StdRng::seed_from_u64(21),
        )
        .unwrap();

        assert_eq!(crops.len(), 3);
        for (crop_image, crop_box) in crops.iter().zip(&boxes) {
            assert_eq!(crop_image.color(), image::ColorType::L8);
            assert_eq!(crop_image.dimensions(), (10, 8));
            // After a half turn the bottom-right source pixel sits at the origin.
            assert_eq!(
                crop_image.get_pixel(0, 0),
                source.get_pixel(crop_box.x2 - 1, crop_box.y2 - 1)
            );
        }
    }

    #[test]
    fn test_process_reports_exhaustion() {
        let (pre, post) = chains();
        let crop = CropSize::new(20, 20);
        let bundle = gradient_bundle(20, 20, crop);

        let err = CroppingStageProcessor::process(
            bundle,
            &pre,
            &post,
            CroppingConfig {
                count: 2,
                max_attempts: 30,
            },
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CropError::PlacementExhausted {
                placed: 1,
                attempts: 30,
                ..
            }
        ));
    }

    #[test]
    fn test_process_with_empty_chains_keeps_pixels() {
        let crop = CropSize::new(4, 4);
        let bundle = gradient_bundle(4, 4, crop);
        let original = bundle.image().clone();

        let crops = CroppingStageProcessor::process(
            bundle,
            &TransformChain::new(),
            &TransformChain::new(),
            CroppingConfig {
                count: 1,
                max_attempts: 5,
            },
            &mut StdRng::seed_from_u64(2),
        )
        .unwrap();

        assert_eq!(crops[0].as_bytes(), original.as_bytes());
    }
}
