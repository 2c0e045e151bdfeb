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

//! Contains the selection of the distribution that best explains a sample.
//!
//! Each candidate family is built by the method of moments ([`FittingDistribution`]) and
//! scored with a chi-squared statistic against the sample's [`Histogram`]; the lowest score
//! wins. A candidate whose expected count for some class is zero or not finite scores `+∞`,
//! which is how degenerate parameters are disqualified.

use std::collections::BTreeSet;

use statrs::statistics::Statistics;

use crate::distribution::{
    Distribution, DistributionFamily, DistributionKind, Exponential, Family, LogNormal, Normal,
    Poisson, Triangular, Uniform,
};
use crate::error::{Error, Result};
use crate::histogram::{Histogram, HistogramClass};
use crate::integrate::integral;
use crate::sample::SampleStore;

/// Sample statistics shared by the candidates of one fit, each computed at most once.
#[derive(Debug, Clone)]
pub struct Moments<'a> {
    sample: &'a SampleStore,
    mean: Option<f64>,
    variance: Option<f64>,
    standard_deviation: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    /// Mean and standard deviation of the logarithms of the positive observations.
    log_moments: Option<(f64, f64)>,
}

impl<'a> Moments<'a> {
    /// Returns an empty cache over `sample`.
    #[must_use]
    pub fn new(sample: &'a SampleStore) -> Self {
        Self {
            sample,
            mean: None,
            variance: None,
            standard_deviation: None,
            min: None,
            max: None,
            log_moments: None,
        }
    }

    /// Mean of the sample.
    pub fn mean(&mut self) -> f64 {
        let sample = self.sample;
        *self.mean.get_or_insert_with(|| sample.mean())
    }

    /// Unbiased variance of the sample.
    pub fn variance(&mut self) -> f64 {
        let sample = self.sample;
        *self.variance.get_or_insert_with(|| sample.variance())
    }

    /// Standard deviation of the sample.
    pub fn standard_deviation(&mut self) -> f64 {
        if let Some(standard_deviation) = self.standard_deviation {
            return standard_deviation;
        }
        let standard_deviation = self.variance().sqrt();
        self.standard_deviation = Some(standard_deviation);
        standard_deviation
    }

    /// Smallest observation.
    pub fn min(&mut self) -> f64 {
        let sample = self.sample;
        *self.min.get_or_insert_with(|| sample.min())
    }

    /// Largest observation.
    pub fn max(&mut self) -> f64 {
        let sample = self.sample;
        *self.max.get_or_insert_with(|| sample.max())
    }

    /// Mean and standard deviation of `ln(x)` over the strictly positive observations.
    ///
    /// Both are NaN when fewer than two observations are positive.
    pub fn log_moments(&mut self) -> (f64, f64) {
        let sample = self.sample;
        *self.log_moments.get_or_insert_with(|| {
            let logs: Vec<f64> = sample
                .iter()
                .filter(|&&x| x > 0.0)
                .map(|x| x.ln())
                .collect();
            if logs.len() < 2 {
                return (f64::NAN, f64::NAN);
            }
            (Statistics::mean(&logs), Statistics::std_dev(&logs))
        })
    }
}

#[allow(clippy::module_name_repetitions)]
/// A distribution family whose parameters can be estimated from sample statistics.
pub trait FittingDistribution {
    /// Constructs `Self` with the parameters that match the statistics in `moments`.
    fn fit(moments: &mut Moments<'_>) -> Self;
}

impl FittingDistribution for Triangular {
    /// The mode is `3 * mean - min - max`, which is not clamped: a mode outside `[min, max]`
    /// leaves the density undefined and the candidate is disqualified.
    fn fit(moments: &mut Moments<'_>) -> Self {
        let (min, max, mean) = (moments.min(), moments.max(), moments.mean());
        Triangular::new(min, max, 3.0 * mean - min - max)
    }
}

impl FittingDistribution for Normal {
    fn fit(moments: &mut Moments<'_>) -> Self {
        Normal::new(moments.mean(), moments.standard_deviation())
    }
}

impl FittingDistribution for Uniform {
    fn fit(moments: &mut Moments<'_>) -> Self {
        Uniform::new(moments.min(), moments.max())
    }
}

impl FittingDistribution for Exponential {
    fn fit(moments: &mut Moments<'_>) -> Self {
        Exponential::new(1.0 / moments.mean())
    }
}

impl FittingDistribution for LogNormal {
    fn fit(moments: &mut Moments<'_>) -> Self {
        let (mu, sigma) = moments.log_moments();
        LogNormal::new(mu, sigma)
    }
}

impl FittingDistribution for Poisson {
    fn fit(moments: &mut Moments<'_>) -> Self {
        Poisson::new(moments.mean())
    }
}

/// Estimates the family `kind` from `moments`. Returns `None` for families that cannot be
/// fitted.
pub fn estimate(kind: DistributionKind, moments: &mut Moments<'_>) -> Option<Family> {
    let family = match kind {
        DistributionKind::Triangular => Triangular::fit(moments).into(),
        DistributionKind::Normal => Normal::fit(moments).into(),
        DistributionKind::Uniform => Uniform::fit(moments).into(),
        DistributionKind::Exponential => Exponential::fit(moments).into(),
        DistributionKind::LogNormal => LogNormal::fit(moments).into(),
        DistributionKind::Poisson => Poisson::fit(moments).into(),
        DistributionKind::Beta => return None,
    };
    Some(family)
}

/// Probability the distribution assigns to `class`.
///
/// Continuous families are integrated over the class bounds; discrete families use the mass
/// at the class's representative value.
pub fn class_probability<F>(distribution: &F, class: &HistogramClass) -> f64
where
    F: DistributionFamily + Sync,
{
    if distribution.is_discrete() {
        return distribution.frequency_for(class.representative_value);
    }
    integral(class.lower_bound, class.upper_bound, |x| {
        distribution.frequency_for(x)
    })
}

/// Chi-squared statistic of `distribution` against `histogram`: the sum over the classes of
/// `(expected - observed)^2 / expected`.
///
/// Returns `+∞` as soon as a class has an expected count that is not strictly positive and
/// finite.
#[allow(clippy::cast_precision_loss)]
pub fn chi_squared<F>(histogram: &Histogram, distribution: &F) -> f64
where
    F: DistributionFamily + Sync,
{
    let total = histogram.total_count() as f64;
    let mut sum = 0.0;
    for class in histogram {
        let expected = total * class_probability(distribution, class);
        if !expected.is_finite() || expected <= 0.0 {
            return f64::INFINITY;
        }
        let diff = expected - class.count as f64;
        sum += diff * diff / expected;
    }
    sum
}

/// Observed and fitted frequencies of one histogram class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyDifference {
    /// Lower bound of the class.
    pub lower_bound: f64,
    /// Upper bound of the class.
    pub upper_bound: f64,
    /// Fraction of the sample that falls into the class.
    pub observed: f64,
    /// Probability the distribution assigns to the class.
    pub expected: f64,
}

/// Compares, class by class, the sample's frequencies with the distribution's.
pub fn frequency_differences<F>(histogram: &Histogram, distribution: &F) -> Vec<FrequencyDifference>
where
    F: DistributionFamily + Sync,
{
    let total = histogram.total_count();
    histogram
        .iter()
        .map(|class| FrequencyDifference {
            lower_bound: class.lower_bound,
            upper_bound: class.upper_bound,
            observed: class.relative_frequency(total),
            expected: class_probability(distribution, class),
        })
        .collect()
}

/// The outcome of [`fit`]: the best distribution and its chi-squared score.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// The best-scoring distribution.
    pub distribution: Distribution,
    /// Its chi-squared score; lower is better.
    pub score: f64,
    /// The score of every candidate, in the order they were tried.
    pub scores: Vec<(DistributionKind, f64)>,
}

impl FitResult {
    /// Score of the candidate `kind`, if it was tried.
    #[must_use]
    pub fn score_of(&self, kind: DistributionKind) -> Option<f64> {
        self.scores
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|&(_, score)| score)
    }
}

/// Candidate families in canonical order; an empty request means all of them.
fn candidates(requested: &BTreeSet<DistributionKind>) -> Result<Vec<DistributionKind>> {
    if requested.is_empty() {
        return Ok(DistributionKind::ALL.to_vec());
    }
    let mut candidates = Vec::with_capacity(requested.len());
    for &kind in requested {
        if kind.is_fittable() {
            candidates.push(kind);
        } else {
            log::warn!("the {kind} distribution is not implemented, skipping it");
        }
    }
    if candidates.is_empty() {
        return Err(Error::NoFittableFamily);
    }
    Ok(candidates)
}

/// Fits every requested family to the sample and returns the one with the lowest chi-squared
/// score. The returned distribution's generator is seeded from entropy.
///
/// Candidates are tried in the canonical [`DistributionKind`] order and the first one wins
/// ties. An empty `requested` set tries every fittable family.
///
/// # Errors
/// [`Error::EmptyInput`] if the sample or the histogram is empty, and
/// [`Error::NoFittableFamily`] if only unimplemented families were requested.
pub fn fit(
    sample: &SampleStore,
    histogram: &Histogram,
    requested: &BTreeSet<DistributionKind>,
) -> Result<FitResult> {
    fit_with(sample, histogram, requested, None)
}

/// Same as [`fit`], with the returned distribution's generator seeded by `seed`.
///
/// # Errors
/// See [`fit`].
pub fn fit_seeded(
    sample: &SampleStore,
    histogram: &Histogram,
    requested: &BTreeSet<DistributionKind>,
    seed: u64,
) -> Result<FitResult> {
    fit_with(sample, histogram, requested, Some(seed))
}

pub(crate) fn fit_with(
    sample: &SampleStore,
    histogram: &Histogram,
    requested: &BTreeSet<DistributionKind>,
    seed: Option<u64>,
) -> Result<FitResult> {
    if sample.is_empty() || histogram.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut moments = Moments::new(sample);
    let mut best: Option<(Family, f64)> = None;
    let mut scores = Vec::new();
    for kind in candidates(requested)? {
        let Some(family) = estimate(kind, &mut moments) else {
            continue;
        };
        let score = chi_squared(histogram, &family);
        log::debug!(
            "{} ({}) scored {score}",
            family.name(),
            family.parameters_description()
        );
        scores.push((kind, score));
        if best.as_ref().map_or(true, |(_, best_score)| score < *best_score) {
            best = Some((family, score));
        }
    }
    let (family, score) = best.ok_or(Error::NoFittableFamily)?;
    log::debug!("best fit: {} with score {score}", family.name());
    let distribution = match seed {
        Some(seed) => Distribution::with_seed(family, seed),
        None => Distribution::new(family),
    };
    Ok(FitResult {
        distribution,
        score,
        scores,
    })
}
