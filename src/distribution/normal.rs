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

//! The normal distribution.

use rand::Rng;
use statrs::consts::SQRT_2PI;

use super::{BoxMuller, DistributionFamily};

/// Normal distribution, sampled with the Box-Muller transform.
///
/// A zero standard deviation is accepted; the density is then non-finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    mean: f64,
    standard_deviation: f64,
    generator: BoxMuller,
}

impl Normal {
    /// Returns a normal distribution. Parameters are not validated.
    #[must_use]
    pub fn new(mean: f64, standard_deviation: f64) -> Self {
        Self {
            mean,
            standard_deviation,
            generator: BoxMuller::new(),
        }
    }

    /// Mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation.
    #[must_use]
    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    pub(crate) fn reset(&mut self) {
        self.generator.reset();
    }
}

/// Gaussian density with the given parameters.
pub(crate) fn gaussian(value: f64, mean: f64, standard_deviation: f64) -> f64 {
    let diff = value - mean;
    let exponent = -(diff * diff) / (2.0 * standard_deviation * standard_deviation);
    exponent.exp() / (standard_deviation * SQRT_2PI)
}

impl DistributionFamily for Normal {
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        self.generator
            .next_normal(rng, self.mean, self.standard_deviation)
    }

    fn frequency_for(&self, value: f64) -> f64 {
        gaussian(value, self.mean, self.standard_deviation)
    }

    fn name(&self) -> &'static str {
        "normal"
    }

    fn parameters_description(&self) -> String {
        format!(
            "mean = {}; standard deviation = {}",
            self.mean, self.standard_deviation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn standard_density() {
        let normal = Normal::new(0.0, 1.0);
        assert_abs_diff_eq!(
            normal.frequency_for(0.0),
            0.398_942_280_401_432_7,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            normal.frequency_for(1.0),
            0.241_970_724_519_143_37,
            epsilon = 1e-12
        );
        assert_eq!(normal.frequency_for(1.0), normal.frequency_for(-1.0));
    }

    #[test]
    fn zero_deviation_is_not_finite() {
        let normal = Normal::new(2.0, 0.0);
        assert!(!normal.frequency_for(2.0).is_finite());
        assert!(!normal.frequency_for(3.0).is_finite());
    }

    #[test]
    fn draws_are_centred() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut normal = Normal::new(-5.0, 0.5);
        let mean = (0..4000).map(|_| normal.generate(&mut rng)).sum::<f64>() / 4000.0;
        assert!((mean + 5.0).abs() < 0.05, "mean = {mean}");
    }

    #[test]
    fn describes_itself() {
        let normal = Normal::new(1.5, 2.0);
        assert_eq!(normal.name(), "normal");
        assert_eq!(
            normal.parameters_description(),
            "mean = 1.5; standard deviation = 2"
        );
    }
}
