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

//! Contains [`FitConfig`], the caller's choices for an analysis.

use std::collections::BTreeSet;

use crate::distribution::DistributionKind;

/// Settings for [`analyse`](crate::analyse).
///
/// The default derives the class count from the sample, tries every fittable family and seeds
/// the random generators from entropy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FitConfig {
    /// Desired number of histogram classes; `0` derives it from the sample.
    pub class_count: usize,
    /// Candidate families; an empty set means every fittable family.
    pub families: BTreeSet<DistributionKind>,
    /// Seed for the histogram and fitted distribution generators.
    pub seed: Option<u64>,
}

impl FitConfig {
    /// Returns the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the number of histogram classes.
    #[must_use]
    pub fn with_class_count(mut self, class_count: usize) -> Self {
        self.class_count = class_count;
        self
    }

    /// Adds `kind` to the candidate families.
    #[must_use]
    pub fn with_family(mut self, kind: DistributionKind) -> Self {
        self.families.insert(kind);
        self
    }

    /// Adds every family of `kinds` to the candidates.
    #[must_use]
    pub fn with_families(mut self, kinds: impl IntoIterator<Item = DistributionKind>) -> Self {
        self.families.extend(kinds);
        self
    }

    /// Makes the random streams reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The class count to request for a sample of `sample_size` observations.
    ///
    /// More classes than observations cannot be filled, so such a request falls back to the
    /// derived count (`0`).
    #[must_use]
    pub fn effective_class_count(&self, sample_size: usize) -> usize {
        if self.class_count > sample_size {
            log::warn!(
                "too many classes for the amount of data (classes: {}, data: {sample_size}), \
                 falling back to the default",
                self.class_count
            );
            return 0;
        }
        self.class_count
    }
}
