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

//! Trapezoidal integration over a closed interval.
//!
//! The result is approximate (no adaptive refinement): its consumer is a comparative
//! goodness-of-fit score. With the `parallel` feature the sub-interval sum is reduced with
//! rayon; the reduction has no ordering dependency, so the result only differs by rounding.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Widths below this are integrated as a single point evaluation.
const DEGENERATE_WIDTH: f64 = 1e-9;
/// Upper bound on the step between two trapezoid ordinates.
const MAX_STEP: f64 = 0.05;
/// Number of sub-intervals used when the interval is narrower than `100 * MAX_STEP`.
const MIN_SUBINTERVALS: f64 = 100.0;

/// Integrates `fx` over `[min(first, last), max(first, last)]` with the trapezoidal rule.
///
/// An interval narrower than a tiny epsilon returns `fx(first)`. Otherwise the step is
/// `min(width / 100, 0.05)`, adjusted down so that a whole number of sub-intervals covers the
/// interval.
pub fn integral<F>(first: f64, last: f64, fx: F) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    let low = first.min(last);
    let high = first.max(last);
    let width = high - low;
    if width.is_nan() || width < DEGENERATE_WIDTH {
        return fx(first);
    }
    let step = (width / MIN_SUBINTERVALS)
        .min(MAX_STEP)
        .max(DEGENERATE_WIDTH);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (width / step).ceil() as usize;
    #[allow(clippy::cast_precision_loss)]
    let step = width / count as f64;
    sum_trapezia(low, step, count, &fx)
}

/// `(y0 + y1)/2 * h + (y1 + y2)/2 * h + ...` over `count` sub-intervals starting at `low`.
#[allow(clippy::cast_precision_loss)]
fn trapezium<F: Fn(f64) -> f64>(low: f64, step: f64, i: usize, fx: &F) -> f64 {
    let x0 = low + i as f64 * step;
    let x1 = low + (i + 1) as f64 * step;
    (fx(x0) + fx(x1)) / 2.0 * step
}

#[cfg(not(feature = "parallel"))]
fn sum_trapezia<F>(low: f64, step: f64, count: usize, fx: &F) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    (0..count).map(|i| trapezium(low, step, i, fx)).sum()
}

#[cfg(feature = "parallel")]
fn sum_trapezia<F>(low: f64, step: f64, count: usize, fx: &F) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    (0..count)
        .into_par_iter()
        .map(|i| trapezium(low, step, i, fx))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn constant_function_gives_the_width() {
        for (a, b) in [(0.0, 2.0), (-3.5, 7.25), (10.0, 1000.0), (1.0, 2.01)] {
            assert_relative_eq!(integral(a, b, |_| 1.0), b - a, max_relative = 1e-3);
        }
    }

    #[test]
    fn bounds_order_does_not_matter() {
        let forward = integral(0.0, 3.0, |x| x * x);
        let backward = integral(3.0, 0.0, |x| x * x);
        assert_eq!(forward, backward);
        assert_relative_eq!(forward, 9.0, max_relative = 1e-3);
    }

    #[test]
    fn degenerate_interval_is_a_point_evaluation() {
        assert_eq!(integral(2.0, 2.0, |x| 3.0 * x), 6.0);
        assert!(integral(1.0, 1.0, |_| f64::NAN).is_nan());
    }

    #[test]
    fn integrates_a_density_to_one() {
        let density = |x: f64| 2.0 * (-2.0 * x).exp();
        assert_abs_diff_eq!(integral(0.0, 20.0, density), 1.0, epsilon = 2e-3);
    }

    #[test]
    fn narrow_interval_uses_fine_steps() {
        // sin over [0, 0.1] is ~0.0049958
        assert_relative_eq!(
            integral(0.0, 0.1, f64::sin),
            1.0 - 0.1_f64.cos(),
            max_relative = 1e-4
        );
    }
}
