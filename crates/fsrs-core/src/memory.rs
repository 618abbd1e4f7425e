// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The numerical memory model: pure functions over a 19-weight parameter
//! vector. Nothing here touches a clock, an RNG, or a `Card` — the review
//! engine (`crate::engine`) is the only caller.

use crate::rating::Rating;

/// The 19 tunable FSRS weights, in the order the formulas below index them.
pub type Parameters = [f64; 19];

/// Forgetting-curve exponent. Fixed by the FSRS formulation, not tunable.
const DECAY: f64 = -0.5;

/// `0.9^(1/DECAY) - 1`, derived from `DECAY` rather than hard-coded so the
/// two stay consistent across `retrievability` and `interval_for_stability`.
fn factor() -> f64 {
    0.9f64.powf(1.0 / DECAY) - 1.0
}

/// Hard-coded initial-stability table. This intentionally does not consult
/// `Parameters` even though the default vector's first four entries equal
/// these values bit-for-bit: a custom parameter vector does not change
/// initial stability (see DESIGN.md).
pub fn initial_stability(rating: Rating) -> f64 {
    match rating {
        Rating::Again => 0.40255,
        Rating::Hard => 1.18385,
        Rating::Good => 3.173,
        Rating::Easy => 15.69105,
    }
}

/// Hard-coded initial-difficulty table, derived from the default
/// parameters but not recomputed from a custom vector (same rationale as
/// `initial_stability`).
pub fn initial_difficulty(rating: Rating) -> f64 {
    match rating {
        Rating::Again => 7.1949,
        Rating::Hard => 6.488305268471453,
        Rating::Good => 5.282434422319005,
        Rating::Easy => 3.2245015893713678,
    }
}

const INITIAL_DIFFICULTY_EASY: f64 = 3.2245015893713678;

/// Probability of recall after `elapsed_days` days at the given stability.
pub fn retrievability(elapsed_days: f64, stability: f64) -> f64 {
    (1.0 + factor() * elapsed_days / stability).powf(DECAY)
}

/// Difficulty after a review, clamped to `[1.0, 10.0]`.
pub fn next_difficulty(parameters: &Parameters, difficulty: Option<f64>, rating: Rating) -> f64 {
    let d = difficulty.unwrap_or(1.0);
    let delta = -parameters[6] * (rating.as_i64() as f64 - 3.0);
    let damped = (10.0 - d) * delta / 9.0;
    let d_prime = d + damped;
    let mean_reverted = parameters[7] * INITIAL_DIFFICULTY_EASY + (1.0 - parameters[7]) * d_prime;
    mean_reverted.clamp(1.0, 10.0)
}

/// Stability after a review when the elapsed time since the last review is
/// less than one full day.
pub fn short_term_stability(parameters: &Parameters, stability: f64, rating: Rating) -> f64 {
    let g = rating.as_i64() as f64;
    stability * ((parameters[17] * ((g - 3.0) + parameters[18])).exp())
}

/// Stability after a successful recall (`hard`, `good`, or `easy`).
///
/// # Panics
/// Never called with `Rating::Again`; callers route that case to
/// [`next_stability_forget`].
pub fn next_stability_recall(
    parameters: &Parameters,
    difficulty: f64,
    stability: f64,
    retrievability: f64,
    rating: Rating,
) -> f64 {
    debug_assert!(rating != Rating::Again);
    let hard_penalty = if rating == Rating::Hard {
        parameters[15]
    } else {
        1.0
    };
    let easy_bonus = if rating == Rating::Easy {
        parameters[16]
    } else {
        1.0
    };
    let growth = parameters[8].exp()
        * (11.0 - difficulty)
        * stability.powf(-parameters[9])
        * (((1.0 - retrievability) * parameters[10]).exp() - 1.0)
        * hard_penalty
        * easy_bonus;
    stability * (1.0 + growth)
}

/// Stability after a lapse (`again`): the minimum of a long-term forgetting
/// curve and a short-term decay floor.
pub fn next_stability_forget(
    parameters: &Parameters,
    difficulty: f64,
    stability: f64,
    retrievability: f64,
) -> f64 {
    let long_term = parameters[11]
        * difficulty.powf(-parameters[12])
        * (((stability + 1.0).powf(parameters[13])) - 1.0)
        * (((1.0 - retrievability) * parameters[14]).exp());
    let short_term = stability / (parameters[17] * parameters[18]).exp();
    long_term.min(short_term)
}

/// The raw next interval in whole days, clamped to `[1, maximum_interval]`.
pub fn interval_for_stability(stability: f64, desired_retention: f64, maximum_interval: i64) -> i64 {
    let days = ((stability / factor()) * (desired_retention.powf(1.0 / DECAY) - 1.0)).round();
    let days = days as i64;
    days.clamp(1, maximum_interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    const DEFAULT_PARAMETERS: Parameters = [
        0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192,
        1.01925, 1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
    ];

    #[test]
    fn test_factor_matches_known_constant() {
        assert!(approx_eq(factor(), 0.234_567_901_234_567_9));
    }

    #[test]
    fn test_initial_stability_table() {
        assert_eq!(initial_stability(Rating::Again), 0.40255);
        assert_eq!(initial_stability(Rating::Hard), 1.18385);
        assert_eq!(initial_stability(Rating::Good), 3.173);
        assert_eq!(initial_stability(Rating::Easy), 15.69105);
    }

    #[test]
    fn test_initial_difficulty_table() {
        assert_eq!(initial_difficulty(Rating::Good), 5.282434422319005);
    }

    #[test]
    fn test_retrievability_anchor_points() {
        assert!((retrievability(1.0, 10.0) - 0.9).abs() < 0.01);
        assert!((retrievability(10.0, 10.0) - 0.5).abs() < 0.01);
        assert!((retrievability(100.0, 10.0) - 0.1).abs() < 0.01);
    }

    #[test]
    fn test_next_stability_recall_monotonic_in_rating() {
        let r = retrievability(5.0, 10.0);
        let hard = next_stability_recall(&DEFAULT_PARAMETERS, 5.0, 10.0, r, Rating::Hard);
        let good = next_stability_recall(&DEFAULT_PARAMETERS, 5.0, 10.0, r, Rating::Good);
        let easy = next_stability_recall(&DEFAULT_PARAMETERS, 5.0, 10.0, r, Rating::Easy);
        assert!(hard < good);
        assert!(good < easy);
        assert!(hard > 10.0);
    }

    #[test]
    fn test_next_stability_forget_is_smaller_when_recallable() {
        let r = retrievability(5.0, 10.0);
        let forgotten = next_stability_forget(&DEFAULT_PARAMETERS, 5.0, 10.0, r);
        assert!(forgotten < 10.0);
    }

    #[test]
    fn test_next_difficulty_moves_toward_bounds() {
        let easier = next_difficulty(&DEFAULT_PARAMETERS, Some(5.0), Rating::Easy);
        let harder = next_difficulty(&DEFAULT_PARAMETERS, Some(5.0), Rating::Again);
        assert!(easier < 5.0);
        assert!(harder > 5.0);
        assert!((1.0..=10.0).contains(&easier));
        assert!((1.0..=10.0).contains(&harder));
    }

    #[test]
    fn test_interval_for_stability_clamps() {
        assert_eq!(interval_for_stability(0.01, 0.9, 36500), 1);
        assert_eq!(interval_for_stability(1_000_000.0, 0.9, 36500), 36500);
    }
}
