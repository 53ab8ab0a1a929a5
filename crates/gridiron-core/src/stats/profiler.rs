use super::{MetricSet, Timer};
use hashbrown::HashMap;
use std::time::Duration;

/// Per-operation timing hooks. A disabled profiler ignores every call,
/// so profiling can stay wired into the hot loop unconditionally.
/// Generation-count style values can still be recorded through the
/// underlying [MetricSet] by the engine regardless.
#[derive(Clone, Debug, Default)]
pub struct Profiler {
    enabled: bool,
    metrics: MetricSet,
    open: HashMap<&'static str, Timer>,
}

impl Profiler {
    pub fn new(enabled: bool) -> Self {
        Profiler {
            enabled,
            metrics: MetricSet::new(),
            open: HashMap::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Opens a timing window for `op`. Re-starting an already open
    /// operation restarts its window.
    pub fn start(&mut self, op: &'static str) {
        if self.enabled {
            self.open.insert(op, Timer::new());
        }
    }

    /// Closes the timing window for `op`, recording one sample of its
    /// duration. Unmatched stops are ignored.
    pub fn stop(&mut self, op: &'static str) {
        if self.enabled {
            if let Some(timer) = self.open.remove(op) {
                self.metrics.upsert_time(op, timer.elapsed());
            }
        }
    }

    /// Records a completed operation measured externally.
    pub fn record(&mut self, op: &'static str, count: f32, time: Duration) {
        if self.enabled {
            self.metrics.upsert_operation(op, count, time);
        }
    }

    pub fn record_value(&mut self, op: &'static str, value: f32) {
        if self.enabled {
            self.metrics.upsert_value(op, value);
        }
    }

    /// Times a closure as one sample of `op`.
    pub fn time<R>(&mut self, op: &'static str, f: impl FnOnce() -> R) -> R {
        if !self.enabled {
            return f();
        }

        let timer = Timer::new();
        let result = f();
        self.metrics.upsert_time(op, timer.elapsed());
        result
    }

    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    pub fn into_metrics(self) -> MetricSet {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_profiler_records_nothing() {
        let mut profiler = Profiler::new(false);
        profiler.start("fitness");
        profiler.stop("fitness");
        profiler.record("validate", 10.0, Duration::from_millis(1));

        assert!(profiler.metrics().is_empty());
    }

    #[test]
    fn start_stop_records_a_sample() {
        let mut profiler = Profiler::new(true);
        profiler.start("fitness");
        profiler.stop("fitness");

        assert_eq!(profiler.metrics().get("fitness").unwrap().count(), 1);
    }

    #[test]
    fn unmatched_stop_is_ignored() {
        let mut profiler = Profiler::new(true);
        profiler.stop("fitness");
        assert!(profiler.metrics().is_empty());
    }
}
