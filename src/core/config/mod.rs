//! Configuration primitives shared across the pipeline.

pub mod errors;
pub mod parallel;

pub use errors::{ConfigError, ConfigValidator};
pub use parallel::ParallelPolicy;
