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

//! The Box-Muller transform with a per-instance cache of the second variate.

use std::f64::consts::TAU;

use rand::Rng;

use super::open_unit;

/// Produces standard-normal variates from pairs of uniform draws.
///
/// Each transform yields two independent variates; the second is kept and returned by the
/// next call, so instances never share state with each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxMuller {
    spare: Option<f64>,
}

impl BoxMuller {
    /// Returns a generator with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a standard-normal variate.
    pub fn next_standard(&mut self, rng: &mut impl Rng) -> f64 {
        if let Some(z1) = self.spare.take() {
            return z1;
        }
        // Drawn from (0, 1], so the logarithm is finite.
        let u1 = open_unit(rng);
        let u2 = open_unit(rng);
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = TAU * u2;
        self.spare = Some(radius * angle.sin());
        radius * angle.cos()
    }

    /// Returns a normal variate with the given mean and standard deviation.
    pub fn next_normal(
        &mut self,
        rng: &mut impl Rng,
        mean: f64,
        standard_deviation: f64,
    ) -> f64 {
        self.next_standard(rng) * standard_deviation + mean
    }

    /// Drops the cached variate.
    pub fn reset(&mut self) {
        self.spare = None;
    }
}
