#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A streaming univariate summary: count, sum, min, max, last value,
/// and Welford-updated mean/variance. Everything the profiler and the
/// per-generation score summaries need in O(1) space.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistic {
    count: u32,
    mean: f32,
    m2: f32,
    sum: f32,
    min: f32,
    max: f32,
    last_value: f32,
}

impl Statistic {
    pub fn new(initial_val: f32) -> Self {
        let mut result = Statistic::default();
        result.add(initial_val);
        result
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last_value(&self) -> f32 {
        self.last_value
    }

    pub fn min(&self) -> f32 {
        if self.count == 0 { 0.0 } else { self.min }
    }

    pub fn max(&self) -> f32 {
        if self.count == 0 { 0.0 } else { self.max }
    }

    pub fn mean(&self) -> f32 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    pub fn sum(&self) -> f32 {
        self.sum
    }

    pub fn variance(&self) -> f32 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f32
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f32 {
        self.variance().sqrt()
    }

    #[inline]
    pub fn add(&mut self, value: f32) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f32;
        self.m2 += delta * (value - self.mean);

        self.sum += value;
        self.last_value = value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn add_all(&mut self, values: impl IntoIterator<Item = f32>) {
        for value in values {
            self.add(value);
        }
    }

    pub fn merge(&mut self, other: &Statistic) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let n1 = self.count as f32;
        let n2 = other.count as f32;
        let delta = other.mean - self.mean;

        self.mean = (n1 * self.mean + n2 * other.mean) / (n1 + n2);
        self.m2 = self.m2 + other.m2 + delta * delta * n1 * n2 / (n1 + n2);
        self.count += other.count;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.last_value = other.last_value;
    }

    pub fn clear(&mut self) {
        *self = Statistic::default();
    }
}

impl Default for Statistic {
    fn default() -> Self {
        Statistic {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            sum: 0.0,
            min: f32::MAX,
            max: f32::MIN,
            last_value: 0.0,
        }
    }
}

impl From<f32> for Statistic {
    fn from(value: f32) -> Self {
        Statistic::new(value)
    }
}
