// Copyright 2024 Vladimir Kharchev

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Contains [`SampleStore`], the append-only collection of observations.
//!
//! The running statistics are maintained with Welford's online update, so every
//! [`SampleStore::append`] is O(1) while the reported values agree with the two-pass formulas
//! computed over the stored observations.

use std::fmt;

/// Running statistics of the observations appended so far.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RunningStatistics {
    count: usize,
    mean: f64,
    /// Sum of squared deviations from the current mean.
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStatistics {
    fn new() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            m2: 0.0,
            min: f64::NAN,
            max: f64::NAN,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn update(&mut self, value: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean = value;
            self.min = value;
            self.max = value;
            return;
        }
        let old_mean = self.mean;
        self.mean += (value - old_mean) / self.count as f64;
        self.m2 += (value - old_mean) * (value - self.mean);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    #[allow(clippy::cast_precision_loss)]
    fn variance(&self) -> f64 {
        match self.count {
            0 => f64::NAN,
            1 => 0.0,
            // Rounding can push m2 a hair below zero for near-constant samples.
            n => self.m2.max(0.0) / (n - 1) as f64,
        }
    }
}

/// An append-only sequence of observations with incrementally maintained statistics.
///
/// All statistics are NaN while the store is empty. The variance is the unbiased sample
/// variance, and it is `0` for a single observation.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStore {
    values: Vec<f64>,
    stats: RunningStatistics,
}

impl SampleStore {
    /// Returns an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            stats: RunningStatistics::new(),
        }
    }

    /// Appends `value` to the sample and updates the statistics.
    ///
    /// Rejecting non-finite values is the caller's responsibility.
    pub fn append(&mut self, value: f64) {
        self.values.push(value);
        self.stats.update(value);
    }

    /// Number of stored observations.
    #[must_use]
    pub fn size(&self) -> usize {
        self.stats.count
    }

    /// Returns `true` if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean of the sample.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    /// Unbiased sample variance.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.stats.variance()
    }

    /// Square root of [`Self::variance`].
    #[must_use]
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Smallest observation.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.stats.min
    }

    /// Largest observation.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.stats.max
    }

    /// The observations in insertion order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over the observations in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<f64> for SampleStore {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl FromIterator<f64> for SampleStore {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a> IntoIterator for &'a SampleStore {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Echoes the observations in insertion order, separated by spaces.
impl fmt::Display for SampleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.values.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
            for value in values {
                write!(f, " {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::statistics::Statistics;

    #[test]
    fn empty_store_reports_nan() {
        let store = SampleStore::new();
        assert_eq!(store.size(), 0);
        assert!(store.is_empty());
        assert!(store.mean().is_nan());
        assert!(store.variance().is_nan());
        assert!(store.standard_deviation().is_nan());
        assert!(store.min().is_nan());
        assert!(store.max().is_nan());
    }

    #[test]
    fn single_observation_has_zero_variance() {
        let mut store = SampleStore::new();
        store.append(4.5);
        assert_eq!(store.size(), 1);
        assert_eq!(store.mean(), 4.5);
        assert_eq!(store.variance(), 0.0);
        assert_eq!(store.standard_deviation(), 0.0);
        assert_eq!(store.min(), 4.5);
        assert_eq!(store.max(), 4.5);
    }

    #[test]
    fn matches_two_pass_statistics() {
        let data = [
            10.2, -3.5, 7.75, 0.0, 1e3, 42.0, 42.0, -17.25, 3.125, 8.0, 999.5, -0.001,
        ];
        let store: SampleStore = data.iter().copied().collect();

        assert_eq!(store.size(), data.len());
        assert_relative_eq!(store.mean(), Statistics::mean(&data), max_relative = 1e-12);
        assert_relative_eq!(
            store.variance(),
            Statistics::variance(&data),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            store.standard_deviation(),
            Statistics::std_dev(&data),
            max_relative = 1e-12
        );
        assert_eq!(store.min(), -17.25);
        assert_eq!(store.max(), 1e3);
    }

    #[test]
    fn constant_sample_has_exactly_zero_variance() {
        let store: SampleStore = std::iter::repeat(3.3).take(50).collect();
        assert_eq!(store.mean(), 3.3);
        assert_eq!(store.variance(), 0.0);
    }

    #[test]
    fn echoes_values_in_insertion_order() {
        let store: SampleStore = [3.0, 1.5, -2.0].into_iter().collect();
        assert_eq!(store.to_string(), "3 1.5 -2");
        assert_eq!(store.values(), &[3.0, 1.5, -2.0]);
        assert_eq!(SampleStore::new().to_string(), "");
    }
}
