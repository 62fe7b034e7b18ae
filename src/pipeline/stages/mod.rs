//! Stage processors for the crop pipeline.
//!
//! Each processor encapsulates one step of the per-image work with consistent
//! error handling and logging. [`process_indexed`] spreads a stage over many
//! items while keeping outcomes in input order, and [`StageMetrics`] records
//! what happened.

mod cropping;
mod processor_helper;
mod types;

pub use cropping::{CroppingConfig, CroppingStageProcessor};
pub use processor_helper::{IndexedOutcome, process_indexed};
pub use types::{StageMetrics, StageResult};
