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

//! The three-state review state machine. [`review`] is the single entry
//! point; everything else here is a private helper for one of its steps.

use crate::card::Card;
use crate::fuzz::UniformSource;
use crate::fuzz::fuzz_interval_days;
use crate::memory;
use crate::rating::Rating;
use crate::review_log::ReviewLog;
use crate::scheduler::Scheduler;
use crate::state::State;
use crate::timestamp::Timestamp;

const MINUTES_PER_DAY: f64 = 1440.0;

/// The outcome of Step 1: where the card goes next and the raw (unfuzzed,
/// unrounded) interval in minutes until it's due there.
struct Transition {
    state: State,
    step: Option<u32>,
    interval_minutes: f64,
}

/// Runs one review: Scheduler + Card + Rating + time -> (new Card, log).
///
/// `source` is the caller-owned uniform-random seam fuzzing draws from; it
/// is only consulted when the card transitions into `State::Review` and
/// `scheduler.enable_fuzzing()` is true.
pub fn review(
    scheduler: &Scheduler,
    card: &Card,
    rating: Rating,
    review_time: Timestamp,
    review_duration: Option<u64>,
    source: &mut dyn UniformSource,
) -> (Card, ReviewLog) {
    let (stability, difficulty) = compute_memory_update(scheduler, card, rating, review_time);

    let transition = match card.state {
        State::Learning => transition_from_learning(scheduler, card, rating, stability),
        State::Review => transition_from_review(scheduler, card, rating, stability),
        State::Relearning => transition_from_relearning(scheduler, card, rating, stability),
    };

    log::debug!(
        "card {} {:?} --{:?}--> {:?} step={:?} raw_interval_min={}",
        card.card_id,
        card.state,
        rating,
        transition.state,
        transition.step,
        transition.interval_minutes,
    );

    let interval_minutes = if transition.state == State::Review && scheduler.enable_fuzzing() {
        let days = (transition.interval_minutes / MINUTES_PER_DAY).round() as i64;
        let fuzzed = fuzz_interval_days(days, scheduler.maximum_interval(), source);
        if fuzzed != days {
            log::trace!("card {} fuzzed interval {} -> {} days", card.card_id, days, fuzzed);
        }
        fuzzed as f64 * MINUTES_PER_DAY
    } else {
        transition.interval_minutes
    };

    let due = review_time.add_minutes(interval_minutes.round());

    let new_card = Card {
        card_id: card.card_id,
        state: transition.state,
        step: transition.step,
        stability: Some(stability),
        difficulty: Some(difficulty),
        due,
        last_review: Some(review_time),
    };

    let log_entry = ReviewLog {
        card: new_card.clone(),
        rating,
        review_datetime: review_time,
        review_duration,
    };

    (new_card, log_entry)
}

fn compute_memory_update(
    scheduler: &Scheduler,
    card: &Card,
    rating: Rating,
    review_time: Timestamp,
) -> (f64, f64) {
    match (card.stability, card.difficulty) {
        (None, None) => (
            memory::initial_stability(rating),
            memory::initial_difficulty(rating),
        ),
        (Some(s), Some(d)) => {
            let days_since = card.last_review.map(|lr| review_time.days_since(lr));
            let same_day = days_since.map(|days| days < 1).unwrap_or(false);
            if same_day {
                let s2 = memory::short_term_stability(scheduler.parameters(), s, rating);
                let d2 = memory::next_difficulty(scheduler.parameters(), Some(d), rating);
                (s2, d2)
            } else {
                let elapsed = days_since.unwrap_or(0).max(0) as f64;
                let r = memory::retrievability(elapsed, s);
                let s2 = if rating == Rating::Again {
                    memory::next_stability_forget(scheduler.parameters(), d, s, r)
                } else {
                    memory::next_stability_recall(scheduler.parameters(), d, s, r, rating)
                };
                let d2 = memory::next_difficulty(scheduler.parameters(), Some(d), rating);
                (s2, d2)
            }
        }
        // Not reachable under the Card invariant (stability/difficulty are
        // set together), but don't guess: treat as a first review.
        _ => (
            memory::initial_stability(rating),
            memory::initial_difficulty(rating),
        ),
    }
}

fn interval_for_stability_minutes(scheduler: &Scheduler, stability: f64) -> f64 {
    let days = memory::interval_for_stability(
        stability,
        scheduler.desired_retention(),
        scheduler.maximum_interval(),
    );
    days as f64 * MINUTES_PER_DAY
}

fn transition_from_learning(scheduler: &Scheduler, card: &Card, rating: Rating, stability: f64) -> Transition {
    let steps = scheduler.learning_steps();
    let n = steps.len();
    let graduate = || Transition {
        state: State::Review,
        step: None,
        interval_minutes: interval_for_stability_minutes(scheduler, stability),
    };

    if n == 0 {
        return graduate();
    }

    let k = card.step.unwrap_or(0) as usize;
    match rating {
        Rating::Again => {
            if k + 1 == n {
                graduate()
            } else {
                Transition {
                    state: State::Learning,
                    step: Some(0),
                    interval_minutes: steps[0],
                }
            }
        }
        Rating::Hard => Transition {
            state: State::Learning,
            step: Some(k as u32),
            interval_minutes: hard_stay_interval(steps, k),
        },
        Rating::Good => {
            if k + 1 == n {
                graduate()
            } else {
                Transition {
                    state: State::Learning,
                    step: Some((k + 1) as u32),
                    interval_minutes: steps[k + 1],
                }
            }
        }
        Rating::Easy => graduate(),
    }
}

fn transition_from_review(scheduler: &Scheduler, _card: &Card, rating: Rating, stability: f64) -> Transition {
    let steps = scheduler.relearning_steps();
    let graduate = || Transition {
        state: State::Review,
        step: None,
        interval_minutes: interval_for_stability_minutes(scheduler, stability),
    };

    match rating {
        Rating::Again => {
            if steps.is_empty() {
                graduate()
            } else {
                Transition {
                    state: State::Relearning,
                    step: Some(0),
                    interval_minutes: steps[0],
                }
            }
        }
        Rating::Hard | Rating::Good | Rating::Easy => graduate(),
    }
}

fn transition_from_relearning(scheduler: &Scheduler, card: &Card, rating: Rating, stability: f64) -> Transition {
    let steps = scheduler.relearning_steps();
    let m = steps.len();
    let graduate = || Transition {
        state: State::Review,
        step: None,
        interval_minutes: interval_for_stability_minutes(scheduler, stability),
    };

    if m == 0 {
        // No relearning steps configured; an `again` from review graduates
        // immediately back to review (handled in transition_from_review),
        // so this state is only reached if a caller hand-built a card with
        // state = relearning despite an empty table. There is nowhere to
        // step to, so fall straight back to review.
        return graduate();
    }

    let k = card.step.unwrap_or(0) as usize;
    match rating {
        // `again` resets to step 0 rather than advancing, so a single-step
        // table never satisfies `k + 1 == m` here: the card stays in
        // relearning indefinitely under repeated `again`.
        Rating::Again => {
            if k + 1 == m {
                graduate()
            } else {
                Transition {
                    state: State::Relearning,
                    step: Some(0),
                    interval_minutes: steps[0],
                }
            }
        }
        Rating::Hard => Transition {
            state: State::Relearning,
            step: Some(k as u32),
            interval_minutes: hard_stay_interval(steps, k),
        },
        Rating::Good => {
            if k + 1 == m {
                graduate()
            } else {
                Transition {
                    state: State::Relearning,
                    step: Some((k + 1) as u32),
                    interval_minutes: steps[k + 1],
                }
            }
        }
        Rating::Easy => graduate(),
    }
}

fn hard_stay_interval(steps: &[f64], k: usize) -> f64 {
    let n = steps.len();
    if k == 0 && n == 1 {
        steps[0] * 1.5
    } else if k == 0 && n >= 2 {
        (steps[0] + steps[1]) / 2.0
    } else {
        steps[k]
    }
}
