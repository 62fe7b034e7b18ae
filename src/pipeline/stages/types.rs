//! Result and metrics types returned by stage processors.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Output of a stage together with what the stage measured.
#[derive(Debug, Clone)]
pub struct StageResult<T> {
    pub data: T,
    pub metrics: StageMetrics,
}

impl<T> StageResult<T> {
    pub fn new(data: T, metrics: StageMetrics) -> Self {
        Self { data, metrics }
    }
}

/// Counts and timing for one stage run.
///
/// `additional_info` is ordered by key so the summary line is stable between
/// runs.
#[derive(Debug, Clone, Default)]
pub struct StageMetrics {
    /// Wall time of the stage, if it was measured.
    pub processing_time: Option<Duration>,
    /// Items that produced an output.
    pub success_count: usize,
    /// Items that produced an error.
    pub failure_count: usize,
    /// Free-form key/value details such as the stage name.
    pub additional_info: BTreeMap<String, String>,
}

impl StageMetrics {
    pub fn new(success_count: usize, failure_count: usize) -> Self {
        Self {
            success_count,
            failure_count,
            ..Self::default()
        }
    }

    pub fn with_processing_time(mut self, duration: Duration) -> Self {
        self.processing_time = Some(duration);
        self
    }

    pub fn with_info<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional_info.insert(key.into(), value.into());
        self
    }

    pub fn total_count(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Share of items that succeeded, in percent. An empty stage reports 0.
    pub fn success_rate(&self) -> f64 {
        match self.total_count() {
            0 => 0.0,
            total => self.success_count as f64 * 100.0 / total as f64,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }
}

impl fmt::Display for StageMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = self
            .additional_info
            .get("stage")
            .map(String::as_str)
            .unwrap_or("stage");
        write!(
            f,
            "{stage}: {} ok, {} failed",
            self.success_count, self.failure_count
        )?;
        if let Some(elapsed) = self.processing_time {
            write!(f, " in {:.2}ms", elapsed.as_secs_f64() * 1000.0)?;
        }
        Ok(())
    }
}
