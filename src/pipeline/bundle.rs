//! Image bundles: a decoded raster paired with its sampling metadata.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use rand::Rng;
use tracing::{debug, warn};

use crate::core::CropResult;
use crate::processors::{CanvasSize, CropSize, RegionSet, TransformChain, generate_crops};
use crate::utils::{crop_region, load_image};

/// Sampling metadata for one image.
#[derive(Debug, Clone)]
pub struct CropMetadata {
    /// Where the raster was loaded from.
    pub source: PathBuf,
    /// Extent of the current raster.
    pub canvas: CanvasSize,
    /// Size of every crop taken from this image.
    pub crop: CropSize,
    /// Accepted crop boxes, present once sampling has succeeded.
    pub regions: Option<RegionSet>,
}

impl CropMetadata {
    pub fn new(source: impl Into<PathBuf>, canvas: CanvasSize, crop: CropSize) -> Self {
        Self {
            source: source.into(),
            canvas,
            crop,
            regions: None,
        }
    }
}

/// A decoded image together with the metadata used to crop it.
///
/// The bundle owns its raster; dropping the bundle releases it.
#[derive(Debug, Clone)]
pub struct ImageBundle {
    image: DynamicImage,
    metadata: CropMetadata,
}

impl ImageBundle {
    /// Pairs an already decoded raster with fresh metadata.
    ///
    /// The canvas size is read from the raster.
    pub fn new(source: impl Into<PathBuf>, image: DynamicImage, crop: CropSize) -> Self {
        let canvas = CanvasSize::from(image.dimensions());
        Self {
            image,
            metadata: CropMetadata::new(source, canvas, crop),
        }
    }

    /// Decodes the image at `path` and pairs it with fresh metadata.
    ///
    /// # Errors
    ///
    /// Returns `CropError::ImageLoad` if the file cannot be decoded.
    pub fn load(path: &Path, crop: CropSize) -> CropResult<Self> {
        let image = load_image(path)?;
        debug!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::new(path, image, crop))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn metadata(&self) -> &CropMetadata {
        &self.metadata
    }

    pub fn source(&self) -> &Path {
        &self.metadata.source
    }

    /// The accepted crop boxes, if sampling has run.
    pub fn regions(&self) -> Option<&RegionSet> {
        self.metadata.regions.as_ref()
    }

    /// Runs `transforms` over the raster and rebinds the canvas to the result.
    ///
    /// Transforms that change the raster's extent invalidate any earlier
    /// sampling, so the region set is cleared in that case.
    pub fn transform(self, transforms: &TransformChain) -> Self {
        if transforms.is_empty() {
            return self;
        }

        let Self {
            image,
            mut metadata,
        } = self;
        let image = transforms.apply(image);
        let canvas = CanvasSize::from(image.dimensions());

        if canvas != metadata.canvas && metadata.regions.take().is_some() {
            warn!(
                "Transforms resized {} from {} to {}; discarding sampled regions",
                metadata.source.display(),
                metadata.canvas,
                canvas
            );
        }
        metadata.canvas = canvas;

        Self { image, metadata }
    }

    /// Samples `count` non-overlapping crop boxes for this image.
    ///
    /// # Errors
    ///
    /// Propagates the sampler's error; the bundle keeps no regions in that case.
    pub fn sample<R>(
        &mut self,
        count: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> CropResult<&RegionSet>
    where
        R: Rng + ?Sized,
    {
        self.metadata.regions = None;
        let regions = generate_crops(
            self.metadata.canvas,
            self.metadata.crop,
            count,
            max_attempts,
            rng,
        )?;
        let regions = self.metadata.regions.insert(regions);
        Ok(&*regions)
    }

    /// Cuts every sampled region out of the raster, in region order.
    ///
    /// Returns an empty list if sampling has not run.
    pub fn extract(&self) -> Vec<DynamicImage> {
        self.regions()
            .map(|regions| {
                regions
                    .iter()
                    .map(|crop_box| crop_region(&self.image, crop_box))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Loads every path into a bundle.
///
/// This and [`apply_transforms`] are the batch-level entry points for library
/// users who want to drive the steps themselves. [`CropPipeline`] instead
/// loads one bundle per worker so that full rasters never pile up.
///
/// [`CropPipeline`]: crate::pipeline::CropPipeline
///
/// Each path gets its own `Result`, so one undecodable file does not prevent
/// the others from loading.
pub fn bundle<P: AsRef<Path>>(paths: &[P], crop: CropSize) -> Vec<CropResult<ImageBundle>> {
    paths
        .iter()
        .map(|path| ImageBundle::load(path.as_ref(), crop))
        .collect()
}

/// Applies `transforms`, in order, to every bundle's raster.
///
/// Batch-level counterpart of [`ImageBundle::transform`] for bundles obtained
/// from [`bundle`].
pub fn apply_transforms(transforms: &TransformChain, bundles: Vec<ImageBundle>) -> Vec<ImageBundle> {
    bundles
        .into_iter()
        .map(|bundle| bundle.transform(transforms))
        .collect()
}
