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

//! A pure, deterministic-modulo-fuzzing spaced-repetition scheduler
//! implementing an FSRS variant.
//!
//! The call you almost always want is [`Scheduler::review_card`]:
//!
//! ```
//! use fsrs_core::{Card, CardOptions, Rating, Scheduler, SchedulerOptions, Timestamp, fuzz::SeededSource};
//!
//! let scheduler = Scheduler::new(SchedulerOptions::default()).unwrap();
//! let now = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
//! let card = Card::new_at(CardOptions::default(), now);
//! let mut source = SeededSource::new(0);
//! let (card, log) = scheduler.review_card(&card, Rating::Good, now, None, &mut source);
//! assert_eq!(log.rating, Rating::Good);
//! assert!(card.due >= now);
//! ```

pub mod card;
pub mod engine;
pub mod error;
pub mod fuzz;
pub mod memory;
pub mod rating;
pub mod review_log;
pub mod scheduler;
pub mod state;
pub mod timestamp;

pub use card::Card;
pub use card::CardOptions;
pub use error::Error;
pub use error::ErrorKind;
pub use rating::Rating;
pub use review_log::ReviewLog;
pub use scheduler::Scheduler;
pub use scheduler::SchedulerOptions;
pub use state::State;
pub use timestamp::Timestamp;
