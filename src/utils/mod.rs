//! Utility functions for the crop pipeline.
//!
//! This module provides image loading and saving helpers and logging setup.

pub mod image;

pub use self::image::{crop_region, flatten_for_jpeg, load_image, save_jpeg};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
