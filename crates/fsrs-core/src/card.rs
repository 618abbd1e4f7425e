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

use serde_json::Value;
use serde_json::json;

use crate::error::Error;
use crate::state::State;
use crate::timestamp::Timestamp;

/// The per-card memory and schedule record.
///
/// `step` is `None` iff `state == State::Review`; `stability` and
/// `difficulty` are `None` only before the card's first review.
#[derive(Clone, PartialEq, Debug)]
pub struct Card {
    pub card_id: i64,
    pub state: State,
    pub step: Option<u32>,
    pub stability: Option<f64>,
    pub difficulty: Option<f64>,
    pub due: Timestamp,
    pub last_review: Option<Timestamp>,
}

/// Typed, validated construction options for [`Card::new`]. Every field has
/// a documented default so omitting all of them yields a brand-new card.
pub struct CardOptions {
    pub card_id: Option<i64>,
    pub state: State,
    pub step: Option<u32>,
    pub stability: Option<f64>,
    pub difficulty: Option<f64>,
    pub due: Option<Timestamp>,
    pub last_review: Option<Timestamp>,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            card_id: None,
            state: State::Learning,
            step: Some(0),
            stability: None,
            difficulty: None,
            due: None,
            last_review: None,
        }
    }
}

impl Card {
    #[cfg(feature = "clock")]
    pub fn new(options: CardOptions) -> Self {
        let now = Timestamp::now();
        Self::new_at(options, now)
    }

    /// Like [`Card::new`], but takes the creation instant explicitly
    /// instead of reading the process clock. Used by the `clock`-gated
    /// `new` and directly by callers that inject time.
    pub fn new_at(options: CardOptions, now: Timestamp) -> Self {
        let due = options.due.unwrap_or(now);
        let card_id = options.card_id.unwrap_or_else(|| now.timestamp_millis());
        Self {
            card_id,
            state: options.state,
            step: options.step,
            stability: options.stability,
            difficulty: options.difficulty,
            due,
            last_review: options.last_review,
        }
    }

    pub fn encode(&self) -> Value {
        json!({
            "card_id": self.card_id,
            "state": self.state.as_str(),
            "step": self.step,
            "stability": self.stability,
            "difficulty": self.difficulty,
            "due": self.due.to_canonical_string(),
            "last_review": self.last_review.map(Timestamp::to_canonical_string),
        })
    }

    pub fn decode(value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::invalid_format("card payload is not a JSON object"))?;

        let card_id_value = field(obj, "card_id")?;
        let card_id = card_id_value
            .as_i64()
            .or_else(|| card_id_value.as_str().and_then(|s| s.parse().ok()))
            .ok_or_else(|| Error::invalid_format("card_id is not an integer"))?;

        let state_str = field(obj, "state")?
            .as_str()
            .ok_or_else(|| Error::invalid_format("state is not a string"))?;
        let state = State::try_from(state_str)?;

        let step = decode_optional_u32(obj, "step")?;
        let stability = decode_optional_f64(obj, "stability")?;
        let difficulty = decode_optional_f64(obj, "difficulty")?;

        let due_str = field(obj, "due")?
            .as_str()
            .ok_or_else(|| Error::invalid_format("due is not a string"))?;
        let due = Timestamp::parse(due_str)?;

        let last_review = match obj.get("last_review") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(Timestamp::parse(s)?),
            Some(_) => return Err(Error::invalid_format("last_review is not a string or null")),
        };

        Ok(Card {
            card_id,
            state,
            step,
            stability,
            difficulty,
            due,
            last_review,
        })
    }
}

fn field<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Result<&'a Value, Error> {
    obj.get(key)
        .ok_or_else(|| Error::invalid_format(format!("missing field: {key}")))
}

fn decode_optional_u32(obj: &serde_json::Map<String, Value>, key: &str) -> Result<Option<u32>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(|v| Some(v as u32))
            .ok_or_else(|| Error::invalid_format(format!("{key} is not a non-negative integer"))),
        Some(Value::String(s)) => s
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::invalid_format(format!("{key} is not a non-negative integer"))),
        Some(_) => Err(Error::invalid_format(format!("{key} has an unsupported type"))),
    }
}

fn decode_optional_f64(obj: &serde_json::Map<String, Value>, key: &str) -> Result<Option<f64>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::invalid_format(format!("{key} is not a number"))),
        Some(Value::String(s)) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| Error::invalid_format(format!("{key} is not a number"))),
        Some(_) => Err(Error::invalid_format(format!("{key} has an unsupported type"))),
    }
}
