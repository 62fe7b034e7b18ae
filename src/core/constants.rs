//! Constants used throughout the crop pipeline.
//!
//! Default values for sampling, output naming, and parallel dispatch live here
//! so the configuration layer and the command-line front end agree on them.

/// The default ceiling on sampling trials for one image.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// The default number of crops taken from each image.
pub const DEFAULT_CROP_COUNT: usize = 3;

/// The default directory crops are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// File name prefix for written crops, followed by the run-wide crop index.
pub const OUTPUT_FILE_PREFIX: &str = "cropped_image_";

/// File extension for written crops.
pub const OUTPUT_FILE_EXTENSION: &str = "jpg";

/// The default post-crop rotation, in degrees counter-clockwise.
pub const DEFAULT_ROTATION_DEGREES: u32 = 180;

/// Delimiter separating image paths in a path-list string.
pub const PATH_DELIMITER: char = ',';

/// The default threshold for parallel processing.
///
/// Batches with more items than this are dispatched to the worker pool;
/// smaller batches run on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1;
