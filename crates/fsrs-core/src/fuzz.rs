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

//! Banded, uniform randomization of long review intervals so that a deck
//! reviewed in bulk doesn't all come due on the same day.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::ThreadRng;

const FUZZ_CEILING_DAYS: f64 = 36500.0;

/// The pluggable uniform-random seam fuzzing draws from. Implementations
/// must return a value in `[lo, hi]`; the engine never touches an RNG
/// directly, only through this trait.
pub trait UniformSource {
    fn sample(&mut self, lo: f64, hi: f64) -> f64;
}

/// Production source: the thread-local RNG. One instance per caller, not
/// shared across `review_card` calls from different threads.
pub struct RandSource {
    rng: ThreadRng,
}

impl RandSource {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for RandSource {
    fn sample(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.random_range(lo..=hi)
    }
}

/// Deterministic source for tests: same seed, same draws.
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededSource {
    fn sample(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.random_range(lo..=hi)
    }
}

/// Applies the banded fuzz to a raw interval (in whole days). Returns the
/// interval unchanged when it is below the smallest band; callers check
/// `enable_fuzzing` before calling this at all.
pub fn fuzz_interval_days(
    interval_days: i64,
    maximum_interval: i64,
    source: &mut dyn UniformSource,
) -> i64 {
    let interval = interval_days as f64;
    let ceiling = FUZZ_CEILING_DAYS.min(maximum_interval as f64);

    let fuzz_range = if interval < 2.5 {
        return interval_days;
    } else if interval < 7.0 {
        0.15
    } else if interval < 20.0 {
        0.10
    } else {
        0.05
    };

    let delta = (fuzz_range * interval).round();
    let min = (interval - delta).max(2.0);
    let max = (interval + delta).min(ceiling);
    let min = min.min(max);
    source.sample(min, max).round() as i64
}
