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

//! The exponential distribution.

use rand::Rng;

use super::{open_unit, DistributionFamily};

/// Exponential distribution with rate `lambda`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    lambda: f64,
}

impl Exponential {
    /// Returns an exponential distribution. The rate is not validated.
    #[must_use]
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    /// Rate parameter.
    #[must_use]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl DistributionFamily for Exponential {
    /// Inverse transform `-ln(U) / lambda` with `U` in `(0, 1]`.
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        -open_unit(rng).ln() / self.lambda
    }

    fn frequency_for(&self, value: f64) -> f64 {
        if value < 0.0 {
            return 0.0;
        }
        self.lambda * (-self.lambda * value).exp()
    }

    fn name(&self) -> &'static str {
        "exponential"
    }

    fn parameters_description(&self) -> String {
        format!("lambda = {}", self.lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn density() {
        let exponential = Exponential::new(2.0);
        assert_eq!(exponential.frequency_for(-0.5), 0.0);
        assert_eq!(exponential.frequency_for(0.0), 2.0);
        assert_abs_diff_eq!(exponential.frequency_for(1.0), 2.0 * (-2.0_f64).exp());
    }

    #[test]
    fn draws_are_non_negative_with_the_right_mean() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut exponential = Exponential::new(4.0);
        let draws: Vec<f64> = (0..10_000).map(|_| exponential.generate(&mut rng)).collect();
        assert!(draws.iter().all(|&x| x >= 0.0 && x.is_finite()));
        let mean = draws.iter().sum::<f64>() / 10_000.0;
        assert!((mean - 0.25).abs() < 0.01, "mean = {mean}");
    }

    #[test]
    fn describes_itself() {
        let exponential = Exponential::new(0.5);
        assert_eq!(exponential.name(), "exponential");
        assert_eq!(exponential.parameters_description(), "lambda = 0.5");
    }
}
