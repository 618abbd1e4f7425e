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

use crate::error::Error;
use crate::error::fail;
use crate::error::ErrorKind;

/// The phase a card is in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    /// Pre-graduation phase, traversing `Scheduler::learning_steps`.
    Learning,
    /// Graduated; intervals are computed from stability.
    Review,
    /// Post-lapse re-entry, traversing `Scheduler::relearning_steps`.
    Relearning,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Learning => "learning",
            State::Review => "review",
            State::Relearning => "relearning",
        }
    }
}

impl TryFrom<&str> for State {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "learning" => Ok(State::Learning),
            "review" => Ok(State::Review),
            "relearning" => Ok(State::Relearning),
            other => fail(ErrorKind::InvalidFormat, format!("invalid state: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for state in [State::Learning, State::Review, State::Relearning] {
            assert_eq!(State::try_from(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn test_try_from_rejects_unknown() {
        let err = State::try_from("graduated").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }
}
