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

//! The Poisson distribution.

use rand::Rng;
use statrs::function::factorial::ln_factorial;

use super::{open_unit, DistributionFamily};

/// Poisson distribution with mean `lambda`.
///
/// The mass of a non-integer value is the mass of its floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// Returns a Poisson distribution. The mean is not validated.
    #[must_use]
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    /// Mean of the distribution.
    #[must_use]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl DistributionFamily for Poisson {
    /// Knuth's algorithm: multiply uniform draws until the product falls below `e^-lambda`.
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        let limit = (-self.lambda).exp();
        let mut product = open_unit(rng);
        let mut k = 0_u64;
        while product > limit {
            product *= open_unit(rng);
            k += 1;
        }
        #[allow(clippy::cast_precision_loss)]
        let k = k as f64;
        k
    }

    fn frequency_for(&self, value: f64) -> f64 {
        if value < 0.0 {
            return 0.0;
        }
        let k = value.floor();
        if k == 0.0 {
            return (-self.lambda).exp();
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let log_factorial = ln_factorial(k as u64);
        (k * self.lambda.ln() - self.lambda - log_factorial).exp()
    }

    fn name(&self) -> &'static str {
        "poisson"
    }

    fn parameters_description(&self) -> String {
        format!("lambda = {}", self.lambda)
    }

    fn is_discrete(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn mass_function() {
        let poisson = Poisson::new(3.0);
        assert_eq!(poisson.frequency_for(-1.0), 0.0);
        assert_relative_eq!(poisson.frequency_for(0.0), (-3.0_f64).exp());
        assert_relative_eq!(
            poisson.frequency_for(2.0),
            (-3.0_f64).exp() * 9.0 / 2.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            poisson.frequency_for(5.0),
            (-3.0_f64).exp() * 243.0 / 120.0,
            max_relative = 1e-12
        );
        assert_eq!(poisson.frequency_for(2.7), poisson.frequency_for(2.0));
        let total: f64 = (0..60).map(|k| poisson.frequency_for(f64::from(k))).sum();
        assert_relative_eq!(total, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn zero_mean_puts_all_mass_at_zero() {
        let poisson = Poisson::new(0.0);
        assert_eq!(poisson.frequency_for(0.0), 1.0);
        assert_eq!(poisson.frequency_for(1.0), 0.0);
    }

    #[test]
    fn draws_are_counts_with_the_right_mean() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut poisson = Poisson::new(4.0);
        let draws: Vec<f64> = (0..10_000).map(|_| poisson.generate(&mut rng)).collect();
        assert!(draws.iter().all(|&x| x >= 0.0 && x.fract() == 0.0));
        let mean = draws.iter().sum::<f64>() / 10_000.0;
        assert!((mean - 4.0).abs() < 0.1, "mean = {mean}");
    }

    #[test]
    fn describes_itself() {
        let poisson = Poisson::new(2.5);
        assert_eq!(poisson.name(), "poisson");
        assert_eq!(poisson.parameters_description(), "lambda = 2.5");
        assert!(poisson.is_discrete());
    }
}
