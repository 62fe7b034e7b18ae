//! # Crop Sampler
//!
//! A Rust library that cuts a fixed number of equally sized, non-overlapping
//! rectangular crops out of each image in a batch.
//!
//! ## Features
//!
//! - Rejection sampling of crop regions with a bounded attempt budget
//! - Configurable transforms before sampling (greyscale) and after cropping
//!   (rotation)
//! - Parallel per-image processing with deterministic output numbering
//! - Optional seeding for reproducible runs
//! - JSON configuration
//!
//! ## Modules
//!
//! * [`core`] - Error handling, configuration traits, and constants
//! * [`pipeline`] - Request parsing, the crop pipeline, and output writing
//! * [`processors`] - Geometry, the region sampler, and image transforms
//! * [`utils`] - Image loading and saving, and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crop_sampler::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default()
//!     .with_output_dir("data")
//!     .with_seed(Some(42));
//! let pipeline = CropPipeline::new(config)?;
//!
//! let request = InputForm::new("assets/robot.jpeg,assets/scissors.png", "128", "96").parse()?;
//! let report = pipeline.run(request)?;
//!
//! for path in &report.written {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Sampling regions directly
//!
//! ```rust
//! use crop_sampler::prelude::*;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let regions = generate_crops(
//!     CanvasSize::new(640, 480),
//!     CropSize::new(100, 100),
//!     4,
//!     1000,
//!     &mut rng,
//! )?;
//! assert_eq!(regions.len(), 4);
//! # Ok::<(), CropError>(())
//! ```

// Core modules
pub mod core;

pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use crop_sampler::prelude::*;
/// ```
pub mod prelude {
    pub use crate::pipeline::{CropPipeline, CropRequest, InputForm, PipelineConfig, RunReport};

    pub use crate::processors::{CanvasSize, CropBox, CropSize, RegionSet, generate_crops};

    pub use crate::core::{CropError, CropResult};

    pub use crate::utils::load_image;
}
