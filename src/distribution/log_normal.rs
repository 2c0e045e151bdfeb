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

//! The log-normal distribution.

use rand::Rng;

use super::{normal::gaussian, BoxMuller, DistributionFamily};

/// Log-normal distribution: `ln(X)` is normal with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogNormal {
    mu: f64,
    sigma: f64,
    generator: BoxMuller,
}

impl LogNormal {
    /// Returns a log-normal distribution from the log-space parameters. They are not validated.
    #[must_use]
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self {
            mu,
            sigma,
            generator: BoxMuller::new(),
        }
    }

    /// Mean of `ln(X)`.
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard deviation of `ln(X)`.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub(crate) fn reset(&mut self) {
        self.generator.reset();
    }
}

impl DistributionFamily for LogNormal {
    fn generate(&mut self, rng: &mut impl Rng) -> f64 {
        self.generator.next_normal(rng, self.mu, self.sigma).exp()
    }

    /// The Gaussian density of `ln(value)`, without the `1 / value` factor; zero for
    /// `value <= 0`.
    fn frequency_for(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return 0.0;
        }
        gaussian(value.ln(), self.mu, self.sigma)
    }

    fn name(&self) -> &'static str {
        "log normal"
    }

    fn parameters_description(&self) -> String {
        format!("mean = {}; standard deviation = {}", self.mu, self.sigma)
    }
}
