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

//! Contains [`Histogram`], the Monte-Carlo histogram of a sample.
//!
//! The sample is split into contiguous classes centred on an even grid between its minimum and
//! maximum. Every class records its count and the probability mass of all classes before it,
//! which turns the histogram into a discrete proxy of the sample's distribution:
//! [`Histogram::sample_value`] draws from it by inverse-CDF sampling.

use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{Error, Result};

/// Data ranges narrower than this are collapsed into a single class.
pub const RANGE_EPSILON: f64 = 1e-4;
/// Upper limit of the derived number of classes.
pub const MAX_DERIVED_CLASSES: usize = 15;

/// One class of a [`Histogram`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramClass {
    /// Midpoint of `[lower_bound, upper_bound)`.
    pub representative_value: f64,
    /// Inclusive lower bound.
    pub lower_bound: f64,
    /// Exclusive upper bound (the maximum of the sample falls inside the last class).
    pub upper_bound: f64,
    /// Number of observations in the class.
    pub count: usize,
    /// Probability mass of all the classes before this one.
    pub cumulative_probability_before: f64,
}

impl HistogramClass {
    /// The fraction of `total` observations that fall into this class.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn relative_frequency(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 / total as f64
    }
}

impl fmt::Display for HistogramClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Class value {}; Initial probability {}; Number of data {}",
            self.representative_value, self.cumulative_probability_before, self.count
        )
    }
}

/// The number of classes used when the caller does not pin one.
///
/// One class for a range below [`RANGE_EPSILON`], otherwise `min(n / 10 + 1, 15)`.
#[must_use]
pub fn derived_class_count(sample_size: usize, min: f64, max: f64) -> usize {
    if max - min < RANGE_EPSILON {
        1
    } else {
        (sample_size / 10 + 1).min(MAX_DERIVED_CLASSES)
    }
}

/// Overflow-free `(low + high) / 2`.
fn midpoint(low: usize, high: usize) -> usize {
    (low >> 1) + (high >> 1) + (low & high & 1)
}

/// Binary search returning the number of leading elements of `sorted` for which `is_before`
/// holds. `is_before` must be monotone over `sorted`.
fn partition<T>(sorted: &[T], is_before: impl Fn(&T) -> bool) -> usize {
    let (mut low, mut high) = (0, sorted.len());
    while low != high {
        let mid = midpoint(low, high);
        if is_before(&sorted[mid]) {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// A Monte-Carlo histogram: ordered, contiguous classes over a sample.
///
/// The statistics reported by the histogram are computed from the classes (every observation
/// is represented by its class's representative value), not from the raw sample.
///
/// The histogram owns the random generator used by [`Histogram::sample_value`].
#[derive(Debug, Clone)]
pub struct Histogram {
    classes: Vec<HistogramClass>,
    total: usize,
    rng: StdRng,
}

impl Histogram {
    /// Bins `values` into `class_count` classes, or into the derived number of classes when
    /// `class_count` is `0`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInput`] if `values` is empty.
    pub fn new(values: &[f64], class_count: usize) -> Result<Self> {
        Self::with_rng(values, class_count, StdRng::from_entropy())
    }

    /// Same as [`Histogram::new`], with the random generator seeded by `seed`.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInput`] if `values` is empty.
    pub fn with_seed(values: &[f64], class_count: usize, seed: u64) -> Result<Self> {
        Self::with_rng(values, class_count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(values: &[f64], class_count: usize, rng: StdRng) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        // A range below epsilon cannot be split, whatever the caller asked for.
        let number_of_classes = if max - min < RANGE_EPSILON {
            1
        } else if class_count == 0 {
            derived_class_count(values.len(), min, max)
        } else {
            class_count
        };

        let mut classes = Self::empty_classes(min, max, number_of_classes);
        for &value in values {
            // The first lower bound never exceeds the minimum, so the index is at least 1.
            let index = partition(&classes, |class| class.lower_bound <= value).saturating_sub(1);
            classes[index].count += 1;
        }

        let total = values.len();
        let mut cumulative = 0.0;
        for class in &mut classes {
            class.cumulative_probability_before = cumulative;
            cumulative += class.relative_frequency(total);
        }
        log::trace!("binned {total} values in [{min}, {max}] into {number_of_classes} classes");

        Ok(Self {
            classes,
            total,
            rng,
        })
    }

    /// Classes centred on `min, min + step, ..., max`.
    #[allow(clippy::cast_precision_loss)]
    fn empty_classes(min: f64, max: f64, number_of_classes: usize) -> Vec<HistogramClass> {
        let class = |lower_bound: f64, upper_bound: f64| HistogramClass {
            representative_value: lower_bound + (upper_bound - lower_bound) / 2.0,
            lower_bound,
            upper_bound,
            count: 0,
            cumulative_probability_before: 0.0,
        };
        if number_of_classes <= 1 {
            return vec![class(min, max)];
        }
        let step = (max - min) / (number_of_classes - 1) as f64;
        let edge = |i: usize| min + (i as f64 - 0.5) * step;
        (0..number_of_classes)
            .map(|i| class(edge(i), edge(i + 1)))
            .collect()
    }

    /// The classes in ascending order.
    #[must_use]
    pub fn classes(&self) -> &[HistogramClass] {
        &self.classes
    }

    /// Iterates over the classes in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistogramClass> {
        self.classes.iter()
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the histogram has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Number of binned observations.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Mean of the representative values weighted by the class counts.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.classes.is_empty() {
            return f64::NAN;
        }
        self.classes
            .iter()
            .map(|class| class.count as f64 * class.representative_value)
            .sum::<f64>()
            / self.total as f64
    }

    /// Unbiased variance of the representative values weighted by the class counts.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.classes.is_empty() {
            return f64::NAN;
        }
        if self.total == 1 || self.classes.len() == 1 {
            return 0.0;
        }
        let mean = self.mean();
        let sum: f64 = self
            .classes
            .iter()
            .map(|class| {
                let diff = class.representative_value - mean;
                class.count as f64 * diff * diff
            })
            .sum();
        sum / (self.total - 1) as f64
    }

    /// Square root of [`Self::variance`].
    #[must_use]
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Representative value of the first class.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.classes
            .first()
            .map_or(f64::NAN, |class| class.representative_value)
    }

    /// Representative value of the last class.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.classes
            .last()
            .map_or(f64::NAN, |class| class.representative_value)
    }

    /// Representative value of the most populated class; the lowest such class wins ties.
    #[must_use]
    pub fn mode(&self) -> f64 {
        self.classes
            .iter()
            .fold(None::<&HistogramClass>, |best, class| match best {
                Some(best) if best.count >= class.count => Some(best),
                _ => Some(class),
            })
            .map_or(f64::NAN, |class| class.representative_value)
    }

    /// Draws a representative value with probability proportional to its class's count.
    ///
    /// A uniform draw in `[0, 1)` is located by binary search among the cumulative class
    /// masses, so empty classes are never returned.
    pub fn sample_value(&mut self) -> f64 {
        if self.classes.is_empty() {
            return f64::NAN;
        }
        let draw: f64 = self.rng.gen();
        let total = self.total;
        let index = partition(&self.classes, |class| {
            class.cumulative_probability_before + class.relative_frequency(total) <= draw
        });
        match self.classes.get(index) {
            Some(class) => class.representative_value,
            // Rounding left the last cumulative mass just below the draw.
            None => self
                .classes
                .iter()
                .rev()
                .find(|class| class.count > 0)
                .map_or(f64::NAN, |class| class.representative_value),
        }
    }
}

impl Default for Histogram {
    /// An empty histogram; all its statistics are NaN.
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            total: 0,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<'a> IntoIterator for &'a Histogram {
    type Item = &'a HistogramClass;
    type IntoIter = std::slice::Iter<'a, HistogramClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lists the classes, one per line.
impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut classes = self.classes.iter();
        if let Some(first) = classes.next() {
            write!(f, "{first}")?;
            for class in classes {
                write!(f, "\n{class}")?;
            }
        }
        Ok(())
    }
}
