//! Macros shared across the crate.

/// Builds a [`StageMetrics`](crate::pipeline::stages::StageMetrics) value.
///
/// The first form records the elapsed time since `$start_time`; both forms
/// store each `key = value` pair as additional info.
///
/// ```rust
/// use crop_sampler::metrics;
/// use std::time::Instant;
///
/// let start = Instant::now();
/// let metrics = metrics!(3, 1, start; stage = "cropping", total_items = 4);
/// assert_eq!(metrics.total_count(), 4);
/// assert_eq!(metrics.additional_info["stage"], "cropping");
/// ```
#[macro_export]
macro_rules! metrics {
    // With timing
    ($success:expr, $failure:expr, $start_time:expr; $($key:ident = $value:expr),*) => {
        {
            let mut metrics = $crate::pipeline::stages::StageMetrics::new($success, $failure);
            metrics = metrics.with_processing_time($start_time.elapsed());
            $(
                metrics = metrics.with_info(stringify!($key), $value.to_string());
            )*
            metrics
        }
    };
    // Without timing
    ($success:expr, $failure:expr; $($key:ident = $value:expr),*) => {
        {
            let mut metrics = $crate::pipeline::stages::StageMetrics::new($success, $failure);
            $(
                metrics = metrics.with_info(stringify!($key), $value.to_string());
            )*
            metrics
        }
    };
}
