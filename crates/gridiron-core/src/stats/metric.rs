use super::{Statistic, TimeStatistic};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One named measurement: a value distribution, a time distribution,
/// or both (an "operation": how many things it touched and how long it
/// took). Names are static operation identifiers, so metrics
/// serialize for reporting but are not read back.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Metric {
    name: &'static str,
    value: Statistic,
    time: TimeStatistic,
}

impl Metric {
    pub fn new(name: &'static str) -> Self {
        Metric {
            name,
            value: Statistic::default(),
            time: TimeStatistic::default(),
        }
    }

    pub fn new_value(name: &'static str, value: f32) -> Self {
        let mut metric = Metric::new(name);
        metric.record_value(value);
        metric
    }

    pub fn new_operation(name: &'static str, count: f32, time: Duration) -> Self {
        let mut metric = Metric::new(name);
        metric.record_operation(count, time);
        metric
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn record_value(&mut self, value: f32) {
        self.value.add(value);
    }

    pub fn record_time(&mut self, time: Duration) {
        self.time.add(time);
    }

    pub fn record_operation(&mut self, count: f32, time: Duration) {
        self.value.add(count);
        self.time.add(time);
    }

    pub fn value(&self) -> &Statistic {
        &self.value
    }

    pub fn time(&self) -> &TimeStatistic {
        &self.time
    }

    pub fn count(&self) -> u32 {
        self.value.count().max(self.time.count())
    }

    pub fn merge(&mut self, other: &Metric) {
        self.value.merge(&other.value);
        self.time.merge(&other.time);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.time.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_records_both_axes() {
        let mut metric = Metric::new("validate");
        metric.record_operation(100.0, Duration::from_millis(5));
        metric.record_operation(80.0, Duration::from_millis(3));

        assert_eq!(metric.count(), 2);
        assert_eq!(metric.value().sum(), 180.0);
        assert!((metric.time().sum().as_secs_f32() - 0.008).abs() < 1e-6);
    }
}
