//! Crop Images
//!
//! Cuts non-overlapping crops out of a batch of images and writes them as
//! `cropped_image_<n>.jpg`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin crop-images -- [OPTIONS] --paths <PATHS> --crop-width <W> --crop-height <H>
//! ```
//!
//! # Arguments
//!
//! * `-p, --paths` - Comma-separated image paths
//! * `--crop-width` - Width of every crop in pixels
//! * `--crop-height` - Height of every crop in pixels
//! * `-c, --config` - JSON pipeline configuration
//! * `-o, --output-dir` - Directory to write crops to
//! * `-n, --count` - Crops per image
//! * `--max-attempts` - Sampling attempt budget per image
//! * `--seed` - Seed for reproducible sampling
//! * `--threads` - Worker thread count
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=info cargo run --bin crop-images -- \
//!     --paths assets/robot.jpeg,assets/scissors.png --crop-width 64 --crop-height 64
//! ```

use clap::Parser;
use crop_sampler::core::config::ParallelPolicy;
use crop_sampler::pipeline::{CropPipeline, InputForm, PipelineConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info, warn};

/// Command-line arguments for the crop tool
#[derive(Parser)]
#[command(name = "crop-images")]
#[command(about = "Cut random non-overlapping crops out of images")]
struct Args {
    /// Comma-separated paths of the images to crop
    #[arg(short, long)]
    paths: String,

    /// Width of every crop in pixels
    #[arg(long)]
    crop_width: String,

    /// Height of every crop in pixels
    #[arg(long)]
    crop_height: String,

    /// JSON file with pipeline configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to write crops to (default: data)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of crops per image (default: 3)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Sampling attempts per image before giving up (default: 1000)
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of worker threads (default: all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    crop_sampler::utils::init_tracing();

    let args = Args::parse();

    let request = match InputForm::new(&args.paths, &args.crop_width, &args.crop_height).parse() {
        Ok(request) => request,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.threads.is_some() {
        config.parallel_policy = ParallelPolicy::new()
            .with_max_threads(args.threads)
            .with_image_threshold(config.parallel_policy.image_threshold);
    }

    if args.verbose {
        info!("Crop Configuration:");
        info!("  Images: {}", request.paths.len());
        info!("  Crop size: {}", request.crop_size());
        info!("  Crops per image: {}", config.count);
        info!("  Max attempts: {}", config.max_attempts);
        info!("  Output directory: {}", config.output_dir.display());
        info!("  Seed: {:?}", config.seed);
        info!("  Threads: {}", config.parallel_policy.effective_threads());
    }

    let pipeline = CropPipeline::new(config)?;

    let start = Instant::now();
    let report = pipeline.run(request)?;
    let duration = start.elapsed();

    for path in &report.written {
        println!("{}", path.display());
    }

    for failure in &report.image_failures {
        warn!("{}: {}", failure.path.display(), failure.error);
    }

    info!(
        "Wrote {} crops in {:.2}ms ({} unreadable, {} could not be placed, {} failed writes)",
        report.crops_written(),
        duration.as_secs_f64() * 1000.0,
        report.load_failures().count(),
        report.placement_failures().count(),
        report.write_failures.len()
    );

    Ok(())
}
