//! Helper utilities for running a stage over a collection of items.
//!
//! Every item is tagged with its input index before dispatch. Workers return
//! `(index, outcome)` pairs and the pairs are sorted by index before they are
//! handed back, so callers always see outcomes in input order no matter which
//! worker finished first. A failing item never stops its siblings; its error is
//! returned in its slot.

use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

use super::types::StageResult;
use crate::core::{CropError, DEFAULT_PARALLEL_THRESHOLD};
use crate::metrics;

/// The outcome of processing one item, tagged with the item's input index.
#[derive(Debug)]
pub struct IndexedOutcome<O> {
    /// Position of the item in the input collection.
    pub index: usize,
    /// What processing the item produced.
    pub outcome: Result<O, CropError>,
}

impl<O> IndexedOutcome<O> {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Processes every item and returns the outcomes in input order.
///
/// # Arguments
///
/// * `stage_name` - Name of the processing stage for metrics
/// * `items` - Collection of items to process
/// * `processor` - Function applied to each `(index, item)` pair
/// * `parallel_threshold` - Collections larger than this are processed on the
///   current rayon pool (default: [`DEFAULT_PARALLEL_THRESHOLD`])
///
/// # Returns
///
/// A `StageResult` with one [`IndexedOutcome`] per input item, sorted by index.
///
/// # Example
///
/// ```rust
/// use crop_sampler::core::CropError;
/// use crop_sampler::pipeline::stages::process_indexed;
///
/// let result = process_indexed(
///     "double",
///     vec![1, 2, 3],
///     |_index, value| {
///         if value == 2 {
///             Err(CropError::invalid_input("two is not allowed"))
///         } else {
///             Ok(value * 2)
///         }
///     },
///     Some(0),
/// );
///
/// let indices: Vec<usize> = result.data.iter().map(|o| o.index).collect();
/// assert_eq!(indices, vec![0, 1, 2]);
/// assert_eq!(result.metrics.success_count, 2);
/// assert_eq!(result.metrics.failure_count, 1);
/// ```
pub fn process_indexed<I, O, F>(
    stage_name: &str,
    items: Vec<I>,
    processor: F,
    parallel_threshold: Option<usize>,
) -> StageResult<Vec<IndexedOutcome<O>>>
where
    I: Send,
    O: Send,
    F: Fn(usize, I) -> Result<O, CropError> + Send + Sync,
{
    let start_time = Instant::now();

    // Fast path for empty input
    if items.is_empty() {
        let metrics = metrics!(0, 0, start_time;
            stage = stage_name,
            total_items = 0
        );
        return StageResult::new(Vec::new(), metrics);
    }

    let total_items = items.len();
    let threshold = parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD);
    let use_parallel = total_items > threshold;

    debug!(
        "Processing {} items for stage '{}' (parallel: {})",
        total_items, stage_name, use_parallel
    );

    let mut outcomes: Vec<IndexedOutcome<O>> = if use_parallel {
        items
            .into_par_iter()
            .enumerate()
            .map(|(index, item)| IndexedOutcome {
                index,
                outcome: processor(index, item),
            })
            .collect()
    } else {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| IndexedOutcome {
                index,
                outcome: processor(index, item),
            })
            .collect()
    };

    outcomes.sort_by_key(|outcome| outcome.index);

    let success_count = outcomes.iter().filter(|o| o.is_ok()).count();
    let failure_count = total_items - success_count;

    let metrics = metrics!(success_count, failure_count, start_time;
        stage = stage_name,
        total_items = total_items,
        parallel_processing = use_parallel
    );

    StageResult::new(outcomes, metrics)
}
