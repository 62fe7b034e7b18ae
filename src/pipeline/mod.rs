//! The crop pipeline module.
//!
//! This module turns a [`CropRequest`] into files on disk: every source image
//! is loaded, transformed, sampled for non-overlapping regions, cropped, and
//! its crops transformed again before being written in input order.

pub mod bundle;
mod config;
mod crop_pipeline;
mod output;
mod request;
pub mod stages;

pub use bundle::{CropMetadata, ImageBundle, apply_transforms};
pub use config::PipelineConfig;
pub use crop_pipeline::{CropPipeline, ImageFailure, RunReport};
pub use output::CropWriter;
pub use request::{CropRequest, InputForm, split_paths};
pub use stages::{CroppingConfig, CroppingStageProcessor, StageMetrics, StageResult};
