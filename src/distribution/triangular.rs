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

//! The triangular distribution.

use rand::Rng;

use super::DistributionFamily;

/// Triangular distribution on `[min, max]` peaking at `mode`.
///
/// The density is only defined for `min <= mode <= max` and `min < max`; for other parameters
/// the density is NaN everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangular {
    min: f64,
    max: f64,
    mode: f64,
}

impl Triangular {
    /// Returns a triangular distribution. Parameters are not validated.
    #[must_use]
    pub fn new(min: f64, max: f64, mode: f64) -> Self {
        Self { min, max, mode }
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

    /// Peak of the density.
    #[must_use]
    pub fn mode(&self) -> f64 {
        self.mode
    }

    fn has_valid_shape(&self) -> bool {
        self.min <= self.mode && self.mode <= self.max && self.min < self.max
    }
}

impl DistributionFamily for Triangular {
    /// Inverse-CDF draw split at `(mode - min) / (max - min)`.
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        let width = self.max - self.min;
        let split = (self.mode - self.min) / width;
        let u: f64 = rng.gen();
        if u < split {
            self.min + (u * width * (self.mode - self.min)).sqrt()
        } else {
            self.max - ((1.0 - u) * width * (self.max - self.mode)).sqrt()
        }
    }

    fn frequency_for(&self, value: f64) -> f64 {
        if !self.has_valid_shape() {
            return f64::NAN;
        }
        if value < self.min || value > self.max {
            return 0.0;
        }
        let width = self.max - self.min;
        if value == self.mode {
            2.0 / width
        } else if value < self.mode {
            2.0 * (value - self.min) / (width * (self.mode - self.min))
        } else {
            2.0 * (self.max - value) / (width * (self.max - self.mode))
        }
    }

    fn name(&self) -> &'static str {
        "triangular"
    }

    fn parameters_description(&self) -> String {
        format!("a = {}; b = {}; c = {}", self.min, self.max, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate::integral;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn density_is_a_triangle() {
        let triangular = Triangular::new(0.0, 4.0, 1.0);
        assert_eq!(triangular.frequency_for(-0.1), 0.0);
        assert_eq!(triangular.frequency_for(4.1), 0.0);
        assert_eq!(triangular.frequency_for(0.0), 0.0);
        assert_abs_diff_eq!(triangular.frequency_for(1.0), 0.5);
        assert_abs_diff_eq!(triangular.frequency_for(0.5), 0.25);
        assert_abs_diff_eq!(triangular.frequency_for(2.5), 0.25);
        assert_abs_diff_eq!(
            integral(-1.0, 5.0, |x| triangular.frequency_for(x)),
            1.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn mode_outside_the_range_is_rejected() {
        let triangular = Triangular::new(0.0, 4.0, 5.0);
        assert!(triangular.frequency_for(2.0).is_nan());
        assert!(triangular.frequency_for(-3.0).is_nan());
    }

    #[test]
    fn right_triangles_peak_at_their_edge() {
        let rising = Triangular::new(0.0, 1.0, 1.0);
        assert_abs_diff_eq!(rising.frequency_for(1.0), 2.0);
        assert_abs_diff_eq!(rising.frequency_for(0.5), 1.0);
        assert_eq!(rising.frequency_for(0.0), 0.0);
        assert_abs_diff_eq!(
            integral(0.0, 1.0, |x| rising.frequency_for(x)),
            1.0,
            epsilon = 1e-6
        );

        let falling = Triangular::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(falling.frequency_for(0.0), 2.0);
        assert_abs_diff_eq!(falling.frequency_for(0.5), 1.0);
        assert_eq!(falling.frequency_for(1.0), 0.0);
        assert_abs_diff_eq!(
            integral(0.0, 1.0, |x| falling.frequency_for(x)),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(Triangular::new(2.0, 2.0, 2.0).frequency_for(2.0).is_nan());
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut triangular = Triangular::new(-2.0, 3.0, 0.5);
        for _ in 0..1000 {
            let value = triangular.generate(&mut rng);
            assert!((-2.0..=3.0).contains(&value));
        }
    }

    #[test]
    fn describes_itself() {
        let triangular = Triangular::new(1.0, 3.0, 2.5);
        assert_eq!(triangular.name(), "triangular");
        assert_eq!(triangular.parameters_description(), "a = 1; b = 3; c = 2.5");
    }
}
