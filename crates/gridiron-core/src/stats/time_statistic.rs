use super::Statistic;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A [Statistic] over durations, kept in seconds.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeStatistic {
    statistic: Statistic,
    last_time: Duration,
}

impl TimeStatistic {
    pub fn new(initial_val: Duration) -> Self {
        let mut result = TimeStatistic::default();
        result.add(initial_val);
        result
    }

    pub fn add(&mut self, value: Duration) {
        self.statistic.add(value.as_secs_f32());
        self.last_time = value;
    }

    pub fn last_time(&self) -> Duration {
        self.last_time
    }

    pub fn count(&self) -> u32 {
        self.statistic.count()
    }

    pub fn mean(&self) -> Duration {
        Duration::from_secs_f32(self.statistic.mean())
    }

    pub fn min(&self) -> Duration {
        Duration::from_secs_f32(self.statistic.min())
    }

    pub fn max(&self) -> Duration {
        Duration::from_secs_f32(self.statistic.max())
    }

    pub fn sum(&self) -> Duration {
        Duration::from_secs_f32(self.statistic.sum())
    }

    pub fn merge(&mut self, other: &TimeStatistic) {
        self.statistic.merge(&other.statistic);
        self.last_time = other.last_time;
    }

    pub fn clear(&mut self) {
        self.statistic.clear();
        self.last_time = Duration::default();
    }
}

impl From<Duration> for TimeStatistic {
    fn from(value: Duration) -> Self {
        TimeStatistic::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_durations() {
        let mut stat = TimeStatistic::default();
        stat.add(Duration::from_millis(10));
        stat.add(Duration::from_millis(30));

        assert_eq!(stat.count(), 2);
        assert_eq!(stat.last_time(), Duration::from_millis(30));
        assert!((stat.sum().as_secs_f32() - 0.04).abs() < 1e-6);
        assert!((stat.mean().as_secs_f32() - 0.02).abs() < 1e-6);
    }
}
