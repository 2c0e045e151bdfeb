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

//! Contains the [`Error`] type returned by the fallible parts of the crate.
//!
//! Statistical degeneracies (a zero standard deviation, an empty class) are not errors: they
//! are reported as NaN statistics and infinite chi-squared scores. Only conditions that make
//! the whole analysis meaningless are escalated here.

use thiserror::Error;

/// Error type for the analysis pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No observations were supplied.
    #[error("Empty input: at least one observation is required")]
    EmptyInput,

    /// None of the requested distribution families can be fitted.
    #[error("No fittable distribution requested")]
    NoFittableFamily,

    /// A distribution family name could not be recognised.
    #[error("Unknown distribution: {0}")]
    UnknownDistribution(String),
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::EmptyInput.to_string(),
            "Empty input: at least one observation is required"
        );
        assert_eq!(
            Error::UnknownDistribution("gamma".into()).to_string(),
            "Unknown distribution: gamma"
        );
    }
}
