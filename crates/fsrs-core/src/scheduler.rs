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

use crate::card::Card;
use crate::engine;
use crate::error::Error;
use crate::fuzz::UniformSource;
use crate::memory::Parameters;
use crate::rating::Rating;
use crate::review_log::ReviewLog;
use crate::timestamp::Timestamp;

/// The published default weight vector, indexed 0..18 by the memory-model
/// formulas in [`crate::memory`].
pub const DEFAULT_PARAMETERS: Parameters = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

const DEFAULT_DESIRED_RETENTION: f64 = 0.9;
const DEFAULT_MAXIMUM_INTERVAL: i64 = 36500;

/// Typed, validated configuration options for [`Scheduler::new`].
pub struct SchedulerOptions {
    pub parameters: Vec<f64>,
    pub desired_retention: f64,
    pub learning_steps: Vec<f64>,
    pub relearning_steps: Vec<f64>,
    pub maximum_interval: i64,
    pub enable_fuzzing: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            parameters: DEFAULT_PARAMETERS.to_vec(),
            desired_retention: DEFAULT_DESIRED_RETENTION,
            learning_steps: vec![1.0, 10.0],
            relearning_steps: vec![10.0],
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            enable_fuzzing: true,
        }
    }
}

/// Immutable scheduler configuration: the 19 model weights plus policy
/// knobs. Freely shareable across threads; every review against the same
/// `Scheduler` is independent.
#[derive(Clone, Debug)]
pub struct Scheduler {
    parameters: Parameters,
    desired_retention: f64,
    learning_steps: Vec<f64>,
    relearning_steps: Vec<f64>,
    maximum_interval: i64,
    enable_fuzzing: bool,
}

impl Scheduler {
    pub fn new(options: SchedulerOptions) -> Result<Self, Error> {
        let parameters: Parameters = options.parameters.clone().try_into().map_err(|v: Vec<f64>| {
            Error::contract_violation(format!(
                "expected 19 parameters, got {}",
                v.len()
            ))
        })?;

        if !(options.desired_retention > 0.0 && options.desired_retention < 1.0) {
            return Err(Error::contract_violation(format!(
                "desired_retention must be in (0, 1), got {}",
                options.desired_retention
            )));
        }

        for (label, steps) in [
            ("learning_steps", &options.learning_steps),
            ("relearning_steps", &options.relearning_steps),
        ] {
            if steps.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                return Err(Error::contract_violation(format!(
                    "{label} must contain only finite, positive values"
                )));
            }
        }

        if options.maximum_interval < 1 {
            return Err(Error::contract_violation(format!(
                "maximum_interval must be at least 1, got {}",
                options.maximum_interval
            )));
        }

        Ok(Self {
            parameters,
            desired_retention: options.desired_retention,
            learning_steps: options.learning_steps,
            relearning_steps: options.relearning_steps,
            maximum_interval: options.maximum_interval,
            enable_fuzzing: options.enable_fuzzing,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn desired_retention(&self) -> f64 {
        self.desired_retention
    }

    pub fn learning_steps(&self) -> &[f64] {
        &self.learning_steps
    }

    pub fn relearning_steps(&self) -> &[f64] {
        &self.relearning_steps
    }

    pub fn maximum_interval(&self) -> i64 {
        self.maximum_interval
    }

    pub fn enable_fuzzing(&self) -> bool {
        self.enable_fuzzing
    }

    /// Runs one review. `source` is only drawn from when the card
    /// transitions into `State::Review` and fuzzing is enabled.
    pub fn review_card(
        &self,
        card: &Card,
        rating: Rating,
        review_time: Timestamp,
        review_duration: Option<u64>,
        source: &mut dyn UniformSource,
    ) -> (Card, ReviewLog) {
        engine::review(self, card, rating, review_time, review_duration, source)
    }

    /// Like [`Scheduler::review_card`], but reads the process clock for
    /// `review_time` instead of taking it explicitly.
    #[cfg(feature = "clock")]
    pub fn review_card_now(
        &self,
        card: &Card,
        rating: Rating,
        review_duration: Option<u64>,
        source: &mut dyn UniformSource,
    ) -> (Card, ReviewLog) {
        self.review_card(card, rating, Timestamp::now(), review_duration, source)
    }
}
