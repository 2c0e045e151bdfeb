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

//! Contains the distribution families a sample can be fitted to.
//!
//! Every family implements [`DistributionFamily`]: it can generate random values, evaluate its
//! density (or mass, for discrete families), and describe itself. [`Family`] is the closed set
//! of fittable families, and [`Distribution`] pairs a family with the random generator that
//! feeds [`Distribution::sample`].
//!
//! Parameters are never validated. Degenerate parameters (a zero standard deviation, an empty
//! range) make the density non-finite, and the fitting step scores such candidates as the worst
//! possible fit.

use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::Error;

pub mod box_muller;
pub mod exponential;
pub mod log_normal;
pub mod normal;
pub mod poisson;
pub mod triangular;
pub mod uniform;

pub use box_muller::BoxMuller;
pub use exponential::Exponential;
pub use log_normal::LogNormal;
pub use normal::Normal;
pub use poisson::Poisson;
pub use triangular::Triangular;
pub use uniform::Uniform;

/// A uniform draw from `(0, 1]`, safe to take the logarithm of.
pub(crate) fn open_unit(rng: &mut impl Rng) -> f64 {
    1.0 - rng.gen::<f64>()
}

/// The capabilities shared by all distribution families.
pub trait DistributionFamily {
    /// Returns a random value following the distribution.
    fn generate(&mut self, rng: &mut impl Rng) -> f64;

    /// Returns the density at `value`, or the mass for discrete families.
    fn frequency_for(&self, value: f64) -> f64;

    /// Human-readable name of the family.
    fn name(&self) -> &'static str;

    /// The parameters of this instance, e.g. `lambda = 2`.
    fn parameters_description(&self) -> String;

    /// Returns `true` if [`Self::frequency_for`] is a probability mass.
    fn is_discrete(&self) -> bool {
        false
    }
}

/// Identifies a distribution family.
///
/// The ordering is the canonical order in which candidates are fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DistributionKind {
    /// [`Triangular`]
    Triangular,
    /// [`Normal`]
    Normal,
    /// [`Uniform`]
    Uniform,
    /// [`Exponential`]
    Exponential,
    /// [`LogNormal`]
    LogNormal,
    /// [`Poisson`]
    Poisson,
    /// The beta distribution. Declared, but it cannot be fitted.
    Beta,
}

impl DistributionKind {
    /// All the fittable families, in canonical order.
    pub const ALL: [DistributionKind; 6] = [
        DistributionKind::Triangular,
        DistributionKind::Normal,
        DistributionKind::Uniform,
        DistributionKind::Exponential,
        DistributionKind::LogNormal,
        DistributionKind::Poisson,
    ];

    /// Name of the family, as reported by [`DistributionFamily::name`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DistributionKind::Triangular => "triangular",
            DistributionKind::Normal => "normal",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Exponential => "exponential",
            DistributionKind::LogNormal => "log normal",
            DistributionKind::Poisson => "poisson",
            DistributionKind::Beta => "beta",
        }
    }

    /// Returns `false` for families that are declared but not implemented.
    #[must_use]
    pub fn is_fittable(self) -> bool {
        !matches!(self, DistributionKind::Beta)
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangular" => Ok(DistributionKind::Triangular),
            "normal" => Ok(DistributionKind::Normal),
            "uniform" => Ok(DistributionKind::Uniform),
            "exponential" => Ok(DistributionKind::Exponential),
            "log_normal" | "lognormal" | "log normal" | "log-normal" => {
                Ok(DistributionKind::LogNormal)
            }
            "poisson" => Ok(DistributionKind::Poisson),
            "beta" => Ok(DistributionKind::Beta),
            _ => Err(Error::UnknownDistribution(s.to_owned())),
        }
    }
}

/// One of the fittable families, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Family {
    /// See [`Triangular`].
    Triangular(Triangular),
    /// See [`Normal`].
    Normal(Normal),
    /// See [`Uniform`].
    Uniform(Uniform),
    /// See [`Exponential`].
    Exponential(Exponential),
    /// See [`LogNormal`].
    LogNormal(LogNormal),
    /// See [`Poisson`].
    Poisson(Poisson),
}

impl Family {
    /// The kind of this family.
    #[must_use]
    pub fn kind(&self) -> DistributionKind {
        match self {
            Family::Triangular(_) => DistributionKind::Triangular,
            Family::Normal(_) => DistributionKind::Normal,
            Family::Uniform(_) => DistributionKind::Uniform,
            Family::Exponential(_) => DistributionKind::Exponential,
            Family::LogNormal(_) => DistributionKind::LogNormal,
            Family::Poisson(_) => DistributionKind::Poisson,
        }
    }

    /// Drops any generator state cached between draws.
    fn reset(&mut self) {
        match self {
            Family::Normal(normal) => normal.reset(),
            Family::LogNormal(log_normal) => log_normal.reset(),
            Family::Triangular(_)
            | Family::Uniform(_)
            | Family::Exponential(_)
            | Family::Poisson(_) => {}
        }
    }
}

impl DistributionFamily for Family {
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        match self {
            Family::Triangular(d) => d.generate(rng),
            Family::Normal(d) => d.generate(rng),
            Family::Uniform(d) => d.generate(rng),
            Family::Exponential(d) => d.generate(rng),
            Family::LogNormal(d) => d.generate(rng),
            Family::Poisson(d) => d.generate(rng),
        }
    }

    fn frequency_for(&self, value: f64) -> f64 {
        match self {
            Family::Triangular(d) => d.frequency_for(value),
            Family::Normal(d) => d.frequency_for(value),
            Family::Uniform(d) => d.frequency_for(value),
            Family::Exponential(d) => d.frequency_for(value),
            Family::LogNormal(d) => d.frequency_for(value),
            Family::Poisson(d) => d.frequency_for(value),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Family::Triangular(d) => d.name(),
            Family::Normal(d) => d.name(),
            Family::Uniform(d) => d.name(),
            Family::Exponential(d) => d.name(),
            Family::LogNormal(d) => d.name(),
            Family::Poisson(d) => d.name(),
        }
    }

    fn parameters_description(&self) -> String {
        match self {
            Family::Triangular(d) => d.parameters_description(),
            Family::Normal(d) => d.parameters_description(),
            Family::Uniform(d) => d.parameters_description(),
            Family::Exponential(d) => d.parameters_description(),
            Family::LogNormal(d) => d.parameters_description(),
            Family::Poisson(d) => d.parameters_description(),
        }
    }

    fn is_discrete(&self) -> bool {
        match self {
            Family::Triangular(d) => d.is_discrete(),
            Family::Normal(d) => d.is_discrete(),
            Family::Uniform(d) => d.is_discrete(),
            Family::Exponential(d) => d.is_discrete(),
            Family::LogNormal(d) => d.is_discrete(),
            Family::Poisson(d) => d.is_discrete(),
        }
    }
}

macro_rules! impl_from_family {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Family {
                fn from(distribution: $variant) -> Self {
                    Family::$variant(distribution)
                }
            }
        )*
    };
}

impl_from_family!(Triangular, Normal, Uniform, Exponential, LogNormal, Poisson);

/// A fitted distribution: a [`Family`] together with its own random generator.
///
/// Two instances never share random state, so their draws are independent and a seeded
/// instance is reproducible.
#[derive(Debug, Clone)]
pub struct Distribution {
    family: Family,
    /// The random generator used by `family.generate`
    rng: StdRng,
}

impl Distribution {
    /// Wraps `family` with an entropy-seeded generator.
    pub fn new(family: impl Into<Family>) -> Self {
        Self {
            family: family.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Wraps `family` with a generator seeded by `seed`.
    pub fn with_seed(family: impl Into<Family>, seed: u64) -> Self {
        Self {
            family: family.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restarts the random stream from `seed`, discarding any cached variate.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.family.reset();
    }

    /// The family and its parameters.
    #[must_use]
    pub fn family(&self) -> &Family {
        &self.family
    }

    /// The kind of the family.
    #[must_use]
    pub fn kind(&self) -> DistributionKind {
        self.family.kind()
    }

    /// Returns a random value following the distribution.
    pub fn sample(&mut self) -> f64 {
        self.family.generate(&mut self.rng)
    }

    /// Returns `count` random values following the distribution.
    pub fn sample_n(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.sample()).collect()
    }

    /// Density at `value`, or mass for discrete families.
    #[must_use]
    pub fn frequency_for(&self, value: f64) -> f64 {
        self.family.frequency_for(value)
    }

    /// Name of the family.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    /// The parameters of the distribution.
    #[must_use]
    pub fn parameters_description(&self) -> String {
        self.family.parameters_description()
    }

    /// Returns `true` if the family is discrete.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        self.family.is_discrete()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.parameters_description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_in_canonical_order() {
        let mut shuffled = vec![
            DistributionKind::Poisson,
            DistributionKind::Triangular,
            DistributionKind::LogNormal,
            DistributionKind::Uniform,
            DistributionKind::Normal,
            DistributionKind::Exponential,
        ];
        shuffled.sort();
        assert_eq!(shuffled, DistributionKind::ALL);
        assert!(DistributionKind::ALL.iter().all(|kind| kind.is_fittable()));
        assert!(!DistributionKind::Beta.is_fittable());
    }

    #[test]
    fn parses_family_names() {
        assert_eq!("normal".parse::<DistributionKind>(), Ok(DistributionKind::Normal));
        assert_eq!(" Poisson ".parse::<DistributionKind>(), Ok(DistributionKind::Poisson));
        assert_eq!("log_normal".parse::<DistributionKind>(), Ok(DistributionKind::LogNormal));
        assert_eq!("log normal".parse::<DistributionKind>(), Ok(DistributionKind::LogNormal));
        assert_eq!(
            "gamma".parse::<DistributionKind>(),
            Err(Error::UnknownDistribution("gamma".into()))
        );
        for kind in DistributionKind::ALL {
            assert_eq!(kind.to_string().parse::<DistributionKind>(), Ok(kind));
        }
    }

    #[test]
    fn family_names_match_kind_names() {
        let families: Vec<Family> = vec![
            Triangular::new(0.0, 2.0, 1.0).into(),
            Normal::new(0.0, 1.0).into(),
            Uniform::new(0.0, 1.0).into(),
            Exponential::new(1.0).into(),
            LogNormal::new(0.0, 1.0).into(),
            Poisson::new(1.0).into(),
        ];
        for family in &families {
            assert_eq!(family.name(), family.kind().name());
        }
        let kinds: Vec<DistributionKind> = families.iter().map(Family::kind).collect();
        assert_eq!(kinds, DistributionKind::ALL);
    }

    #[test]
    fn seeded_instances_are_reproducible_and_independent() {
        let mut first = Distribution::with_seed(Normal::new(0.0, 1.0), 99);
        let mut second = Distribution::with_seed(Normal::new(0.0, 1.0), 99);
        let expected = first.sample_n(5);

        // Interleaving draws of another instance does not disturb the stream.
        let mut other = Distribution::with_seed(Normal::new(10.0, 1.0), 99);
        let mut interleaved = Vec::new();
        for _ in 0..5 {
            other.sample();
            interleaved.push(second.sample());
        }
        assert_eq!(expected, interleaved);
    }

    #[test]
    fn reseed_restarts_the_stream() {
        let mut distribution = Distribution::with_seed(LogNormal::new(0.0, 1.0), 4);
        let first = distribution.sample_n(3);
        distribution.reseed(4);
        assert_eq!(distribution.sample_n(3), first);
    }

    #[test]
    fn display_names_the_parameters() {
        let distribution = Distribution::new(Exponential::new(2.0));
        assert_eq!(distribution.to_string(), "exponential (lambda = 2)");
        assert_eq!(distribution.kind(), DistributionKind::Exponential);
        assert!(!distribution.is_discrete());
    }
}
