//! The crop pipeline.
//!
//! A run takes a [`CropRequest`], loads every source image inside its own
//! worker task, crops it, and writes the crops chunk by chunk in input order.
//! A failing image is reported and skipped; it never stops the others.

use std::path::PathBuf;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::core::config::ConfigValidator;
use crate::core::{CropError, CropResult};
use crate::metrics;
use crate::pipeline::bundle::ImageBundle;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::output::CropWriter;
use crate::pipeline::request::CropRequest;
use crate::pipeline::stages::{
    CroppingConfig, CroppingStageProcessor, StageMetrics, process_indexed,
};
use crate::processors::TransformChain;

/// An image that produced no crops.
#[derive(Debug)]
pub struct ImageFailure {
    /// Position of the image in the request.
    pub index: usize,
    /// Path of the image.
    pub path: PathBuf,
    /// Why it failed.
    pub error: CropError,
}

/// What a run did.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files written, in output order.
    pub written: Vec<PathBuf>,
    /// Images that could not be loaded or cropped, in input order.
    pub image_failures: Vec<ImageFailure>,
    /// Crops that were produced but could not be saved.
    pub write_failures: Vec<CropError>,
    /// Metrics of the cropping stage.
    pub metrics: StageMetrics,
}

impl RunReport {
    pub fn crops_written(&self) -> usize {
        self.written.len()
    }

    /// Images whose file could not be read or decoded.
    pub fn load_failures(&self) -> impl Iterator<Item = &ImageFailure> {
        self.image_failures
            .iter()
            .filter(|failure| failure.error.is_load_failure())
    }

    /// Images whose crop regions could not all be placed.
    pub fn placement_failures(&self) -> impl Iterator<Item = &ImageFailure> {
        self.image_failures
            .iter()
            .filter(|failure| failure.error.is_placement_exhausted())
    }

    /// True if every image was cropped and every crop was written.
    pub fn is_complete(&self) -> bool {
        self.image_failures.is_empty() && self.write_failures.is_empty()
    }
}

/// Crops a batch of images into non-overlapping, transformed regions.
///
/// # Example
///
/// ```rust,no_run
/// use crop_sampler::pipeline::{CropPipeline, InputForm, PipelineConfig};
///
/// let pipeline = CropPipeline::new(PipelineConfig::default().with_seed(Some(42)))?;
/// let request = InputForm::new("assets/robot.jpeg,assets/scissors.png", "64", "64").parse()?;
/// let report = pipeline.run(request)?;
/// println!("wrote {} crops", report.crops_written());
/// # Ok::<(), crop_sampler::core::CropError>(())
/// ```
#[derive(Debug)]
pub struct CropPipeline {
    config: PipelineConfig,
    pre_transforms: TransformChain,
    post_transforms: TransformChain,
}

impl CropPipeline {
    /// Builds a pipeline from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `CropError::Config` if the configuration is invalid.
    pub fn new(config: PipelineConfig) -> CropResult<Self> {
        config.validate()?;
        let pre_transforms = TransformChain::from_configs(&config.pre_transforms)?;
        let post_transforms = TransformChain::from_configs(&config.post_transforms)?;

        info!(
            "Crop pipeline ready: {} crops per image, pre {:?}, post {:?}",
            config.count,
            pre_transforms.names(),
            post_transforms.names()
        );

        Ok(Self {
            config,
            pre_transforms,
            post_transforms,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the request to completion.
    ///
    /// Images are processed concurrently on a dedicated worker pool, one
    /// chunk of pool-size images at a time. Each worker loads its own image,
    /// and a chunk's crops are written before the next chunk starts, so no more
    /// than pool-size images and their crops are held at a time. Output
    /// is grouped by source image in request order and in acceptance order
    /// within an image.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidInput` if the request is invalid, and
    /// `CropError::Io` or `CropError::ThreadPool` if the run cannot start.
    /// Per-image and per-crop failures are collected in the [`RunReport`].
    pub fn run(&self, request: CropRequest) -> CropResult<RunReport> {
        request.validate()?;
        let crop = request.crop_size();
        let cropping = CroppingConfig {
            count: self.config.count,
            max_attempts: self.config.max_attempts,
        };
        let policy = &self.config.parallel_policy;
        let chunk_size = policy.effective_threads().max(1);

        let mut writer = CropWriter::create(&self.config.output_dir)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(chunk_size)
            .build()?;

        let paths = request.paths;
        info!(
            "Cropping {} images into {} regions of {}",
            paths.len(),
            cropping.count,
            crop
        );

        let start_time = Instant::now();
        let mut report = RunReport::default();
        let mut success_count = 0;
        let mut chunk_count = 0;

        for (chunk_index, chunk) in paths.chunks(chunk_size).enumerate() {
            let offset = chunk_index * chunk_size;
            let stage = pool.install(|| {
                process_indexed(
                    "cropping",
                    chunk.to_vec(),
                    |local, path| {
                        let bundle = ImageBundle::load(&path, crop)?;
                        let mut rng = self.rng_for(offset + local);
                        CroppingStageProcessor::process(
                            bundle,
                            &self.pre_transforms,
                            &self.post_transforms,
                            cropping,
                            &mut rng,
                        )
                    },
                    Some(policy.image_threshold),
                )
            });
            debug!("Chunk {}: {}", chunk_index, stage.metrics);
            chunk_count += 1;

            for (entry, path) in stage.data.into_iter().zip(chunk) {
                match entry.outcome {
                    Ok(image_crops) => {
                        success_count += 1;
                        for crop_image in &image_crops {
                            match writer.write(crop_image) {
                                Ok(written) => report.written.push(written),
                                Err(err) => {
                                    error!("{}", err);
                                    report.write_failures.push(err);
                                }
                            }
                        }
                    }
                    Err(err) => {
                        warn!("Skipping {}: {}", path.display(), err);
                        report.image_failures.push(ImageFailure {
                            index: offset + entry.index,
                            path: path.clone(),
                            error: err,
                        });
                    }
                }
            }
        }

        report.metrics = metrics!(success_count, report.image_failures.len(), start_time;
            stage = "cropping",
            total_items = paths.len(),
            chunks = chunk_count,
            chunk_size = chunk_size
        );
        info!("{}", report.metrics);
        info!(
            "Wrote {} crops to {} ({} images failed, {} writes failed)",
            report.crops_written(),
            writer.output_dir().display(),
            report.image_failures.len(),
            report.write_failures.len()
        );

        Ok(report)
    }

    fn rng_for(&self, index: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}
