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

//! The continuous uniform distribution.

use rand::Rng;

use super::DistributionFamily;

/// Uniform distribution on `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    min: f64,
    max: f64,
}

impl Uniform {
    /// Returns a uniform distribution. Parameters are not validated.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower limit.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper limit.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl DistributionFamily for Uniform {
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        let u: f64 = rng.gen();
        self.min + u * (self.max - self.min)
    }

    fn frequency_for(&self, value: f64) -> f64 {
        if value < self.min || value > self.max {
            return 0.0;
        }
        1.0 / (self.max - self.min)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }

    fn parameters_description(&self) -> String {
        format!("a = {}; b = {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn flat_density_inside_the_range() {
        let uniform = Uniform::new(2.0, 6.0);
        assert_eq!(uniform.frequency_for(2.0), 0.25);
        assert_eq!(uniform.frequency_for(4.0), 0.25);
        assert_eq!(uniform.frequency_for(6.0), 0.25);
        assert_eq!(uniform.frequency_for(1.99), 0.0);
        assert_eq!(uniform.frequency_for(6.01), 0.0);
    }

    #[test]
    fn empty_range_is_not_finite() {
        assert!(!Uniform::new(1.0, 1.0).frequency_for(1.0).is_finite());
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut uniform = Uniform::new(-1.0, 1.0);
        for _ in 0..1000 {
            let value = uniform.generate(&mut rng);
            assert!((-1.0..1.0).contains(&value));
        }
    }

    #[test]
    fn describes_itself() {
        let uniform = Uniform::new(0.5, 2.0);
        assert_eq!(uniform.name(), "uniform");
        assert_eq!(uniform.parameters_description(), "a = 0.5; b = 2");
    }
}
