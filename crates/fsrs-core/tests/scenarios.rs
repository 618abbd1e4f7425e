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

//! The concrete A-F scenario table, all with fuzzing disabled and default
//! parameters/desired retention.

use fsrs_core::fuzz::SeededSource;
use fsrs_core::Card;
use fsrs_core::CardOptions;
use fsrs_core::Rating;
use fsrs_core::Scheduler;
use fsrs_core::SchedulerOptions;
use fsrs_core::State;
use fsrs_core::Timestamp;

fn t0() -> Timestamp {
    Timestamp::parse("2024-06-01T12:00:00Z").unwrap()
}

fn no_fuzz_scheduler() -> Scheduler {
    Scheduler::new(SchedulerOptions {
        enable_fuzzing: false,
        ..SchedulerOptions::default()
    })
    .unwrap()
}

#[test]
fn scenario_a_first_review_good_stays_in_learning() {
    let scheduler = no_fuzz_scheduler();
    let now = t0();
    let card = Card::new_at(CardOptions::default(), now);
    let mut source = SeededSource::new(0);

    let (next, _log) = scheduler.review_card(&card, Rating::Good, now, None, &mut source);

    assert_eq!(next.state, State::Learning);
    assert_eq!(next.step, Some(1));
    assert_eq!(next.stability, Some(3.173));
    assert_eq!(next.difficulty, Some(5.282434422319005));
    assert_eq!(next.due, now.add_minutes(10.0));
}

#[test]
fn scenario_b_first_review_easy_graduates_to_review() {
    let scheduler = no_fuzz_scheduler();
    let now = t0();
    let card = Card::new_at(CardOptions::default(), now);
    let mut source = SeededSource::new(0);

    let (next, _log) = scheduler.review_card(&card, Rating::Easy, now, None, &mut source);

    assert_eq!(next.state, State::Review);
    assert_eq!(next.step, None);
    assert_eq!(next.stability, Some(15.69105));
    assert!(next.due.days_since(now) >= 1);
}

#[test]
fn scenario_c_last_learning_step_good_graduates() {
    let scheduler = no_fuzz_scheduler();
    let now = t0();
    let card = Card::new_at(
        CardOptions {
            state: State::Learning,
            step: Some(1),
            stability: Some(3.173),
            difficulty: Some(5.282434422319005),
            last_review: Some(now),
            ..CardOptions::default()
        },
        now,
    );
    let mut source = SeededSource::new(0);

    let (next, _log) = scheduler.review_card(&card, Rating::Good, now, None, &mut source);

    assert_eq!(next.state, State::Review);
    assert_eq!(next.step, None);
}

#[test]
fn scenario_d_lapse_from_review_enters_relearning() {
    let scheduler = no_fuzz_scheduler();
    let now = t0();
    let last_review = now.add_minutes(-10.0 * 1440.0);
    let card = Card::new_at(
        CardOptions {
            state: State::Review,
            step: None,
            stability: Some(10.0),
            difficulty: Some(5.0),
            last_review: Some(last_review),
            ..CardOptions::default()
        },
        now,
    );
    let mut source = SeededSource::new(0);

    let (next, _log) = scheduler.review_card(&card, Rating::Again, now, None, &mut source);

    assert_eq!(next.state, State::Relearning);
    assert_eq!(next.step, Some(0));
    assert_eq!(next.due, now.add_minutes(10.0));
    assert!(next.difficulty.unwrap() > 5.0);
    assert!(next.stability.unwrap() < 10.0);
}

#[test]
fn scenario_e_hard_in_relearning_stays_put() {
    let scheduler = no_fuzz_scheduler();
    let now = t0();
    let last_review = now.add_minutes(-1.0 * 1440.0);
    let card = Card::new_at(
        CardOptions {
            state: State::Relearning,
            step: Some(0),
            stability: Some(5.0),
            difficulty: Some(7.0),
            last_review: Some(last_review),
            ..CardOptions::default()
        },
        now,
    );
    let mut source = SeededSource::new(0);

    let (next, _log) = scheduler.review_card(&card, Rating::Hard, now, None, &mut source);

    assert_eq!(next.state, State::Relearning);
    assert_eq!(next.step, Some(0));
    assert_eq!(next.due, now.add_minutes(15.0));
}

#[test]
fn scenario_f_huge_stability_clamps_to_maximum_interval() {
    let scheduler = no_fuzz_scheduler();
    let now = t0();
    let last_review = now.add_minutes(-1.0 * 1440.0);
    let card = Card::new_at(
        CardOptions {
            state: State::Review,
            step: None,
            stability: Some(1_000_000.0),
            difficulty: Some(5.0),
            last_review: Some(last_review),
            ..CardOptions::default()
        },
        now,
    );
    let mut source = SeededSource::new(0);

    let (next, _log) = scheduler.review_card(&card, Rating::Good, now, None, &mut source);

    assert_eq!(next.due.days_since(now), 36500);
}
