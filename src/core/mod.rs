//! Core building blocks: error handling, configuration primitives, and constants.
//!
//! # Modules
//!
//! * [`config`] - Configuration errors, validation, and the parallel policy
//! * [`constants`] - Default values shared by the library and the CLI
//! * [`errors`] - The [`CropError`] taxonomy and [`CropResult`] alias

pub mod config;
pub mod constants;
pub mod errors;
#[macro_use]
mod macros;

pub use config::{ConfigError, ConfigValidator, ParallelPolicy};
pub use constants::*;
pub use errors::{CropError, CropResult};
