use super::Metric;
use hashbrown::HashMap;
use std::time::Duration;

/// The collection of metrics accumulated over a run, keyed by
/// operation name. Lookup is hash-based; `iter_sorted` gives a stable
/// order for reports.
#[derive(Clone, Debug, Default)]
pub struct MetricSet {
    metrics: HashMap<&'static str, Metric>,
}

impl MetricSet {
    pub fn new() -> Self {
        MetricSet {
            metrics: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    pub fn upsert_value(&mut self, name: &'static str, value: f32) {
        self.entry(name).record_value(value);
    }

    pub fn upsert_time(&mut self, name: &'static str, time: Duration) {
        self.entry(name).record_time(time);
    }

    pub fn upsert_operation(&mut self, name: &'static str, count: f32, time: Duration) {
        self.entry(name).record_operation(count, time);
    }

    pub fn upsert(&mut self, metric: Metric) {
        self.entry(metric.name()).merge(&metric);
    }

    pub fn merge(&mut self, other: &MetricSet) {
        for metric in other.metrics.values() {
            self.upsert(metric.clone());
        }
    }

    /// Metrics sorted by name, for deterministic reporting.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Metric> {
        let mut metrics = self.metrics.values().collect::<Vec<_>>();
        metrics.sort_by_key(|m| m.name());
        metrics.into_iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names = self.metrics.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    fn entry(&mut self, name: &'static str) -> &mut Metric {
        self.metrics.entry(name).or_insert_with(|| Metric::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upserts_accumulate() {
        let mut set = MetricSet::new();
        set.upsert_operation("fitness", 64.0, Duration::from_millis(1));
        set.upsert_operation("fitness", 64.0, Duration::from_millis(2));
        set.upsert_value("scores", 123.0);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("fitness").unwrap().count(), 2);
        assert_eq!(set.get("fitness").unwrap().value().sum(), 128.0);
        assert_eq!(set.names(), vec!["fitness", "scores"]);
    }
}
