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

//! Find the probability distribution that best explains a sample.
//!
//! Input-analyser summarises a sample of real-valued observations into a Monte-Carlo
//! histogram and selects, among several parametric families, the one whose frequencies are
//! closest to the observed ones according to a chi-squared goodness-of-fit score. The chosen
//! distribution can then evaluate its density and generate random values.
//!
//! The pipeline is:
//! 1. [`SampleStore`] collects the observations and keeps their statistics up to date.
//! 2. [`Histogram`] bins them into classes and records the cumulative mass of each class.
//! 3. [`fitting::fit`] estimates every candidate family by the method of moments, scores it
//!    against the histogram and keeps the best one.
//!
//! [`analyse`] runs the whole pipeline.
//!
//! # Examples
//!
//! ```
//! use input_analyser::{analyse, DistributionKind, FitConfig};
//!
//! let values = [0.1, 0.4, 0.2, 1.3, 0.7, 0.05, 2.2, 0.3, 0.9, 0.15, 0.6, 0.25];
//!
//! // Only compare two families, and make the generated values reproducible.
//! let config = FitConfig::new()
//!     .with_families([DistributionKind::Exponential, DistributionKind::Uniform])
//!     .with_seed(7);
//! let mut analysis = analyse(values, &config).unwrap();
//!
//! // The classes the sample was binned into
//! println!("{}", analysis.histogram);
//!
//! let best = &mut analysis.fit.distribution;
//! println!(
//!     "Best distribution found: {} with parameters: {}",
//!     best.name(),
//!     best.parameters_description()
//! );
//! println!("Chi-squared score: {}", analysis.fit.score);
//!
//! // Random values following the best distribution
//! let generated = best.sample_n(5);
//! assert_eq!(generated.len(), 5);
//! ```
#![deny(clippy::pedantic)]
#![deny(missing_docs)]

pub mod config;
pub mod distribution;
pub mod error;
pub mod fitting;
pub mod histogram;
pub mod integrate;
pub mod sample;

pub use config::FitConfig;
pub use distribution::{Distribution, DistributionFamily, DistributionKind, Family};
pub use error::{Error, Result};
pub use fitting::FitResult;
pub use histogram::{Histogram, HistogramClass};
pub use sample::SampleStore;

/// Everything computed by [`analyse`].
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The observations and their exact statistics.
    pub sample: SampleStore,
    /// The histogram the candidates were scored against.
    pub histogram: Histogram,
    /// The best distribution and its score.
    pub fit: FitResult,
}

/// Collects `values`, bins them and fits the families requested by `config`.
///
/// A class count larger than the sample is replaced by the derived one. With a seed, the
/// fitted distribution's generator is seeded with it and the histogram's with `seed + 1`.
///
/// # Errors
/// [`Error::EmptyInput`] if `values` is empty, and [`Error::NoFittableFamily`] if only
/// unimplemented families were requested.
pub fn analyse<I>(values: I, config: &FitConfig) -> Result<Analysis>
where
    I: IntoIterator<Item = f64>,
{
    let sample: SampleStore = values.into_iter().collect();
    if sample.is_empty() {
        return Err(Error::EmptyInput);
    }
    let class_count = config.effective_class_count(sample.size());
    let histogram = match config.seed {
        Some(seed) => Histogram::with_seed(sample.values(), class_count, seed.wrapping_add(1))?,
        None => Histogram::new(sample.values(), class_count)?,
    };
    let fit = fitting::fit_with(&sample, &histogram, &config.families, config.seed)?;
    Ok(Analysis {
        sample,
        histogram,
        fit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_escalated() {
        let result = analyse(Vec::new(), &FitConfig::default());
        assert_eq!(result.unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn oversized_class_count_is_ignored() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let config = FitConfig::new().with_class_count(11).with_seed(1);
        let analysis = analyse(values, &config).unwrap();
        assert_eq!(analysis.histogram.len(), 2);
        assert_eq!(analysis.sample.size(), 10);
    }

    #[test]
    fn pinned_class_count_is_used() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let config = FitConfig::new().with_class_count(5).with_seed(1);
        let analysis = analyse(values, &config).unwrap();
        assert_eq!(analysis.histogram.len(), 5);
    }
}
