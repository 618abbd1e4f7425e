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

use crate::card::Card;
use crate::error::Error;
use crate::rating::Rating;
use crate::timestamp::Timestamp;

/// An append-only record of one review. Produced once by
/// [`crate::engine::review`] (the engine behind [`crate::Scheduler::review_card`])
/// and owned by its consumer; never mutated.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewLog {
    pub card: Card,
    pub rating: Rating,
    pub review_datetime: Timestamp,
    pub review_duration: Option<u64>,
}

impl ReviewLog {
    pub fn encode(&self) -> Value {
        json!({
            "card": self.card.encode(),
            "rating": self.rating.as_str(),
            "review_datetime": self.review_datetime.to_canonical_string(),
            "review_duration": self.review_duration,
        })
    }

    pub fn decode(value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::invalid_format("review log payload is not a JSON object"))?;

        let card_value = obj
            .get("card")
            .ok_or_else(|| Error::invalid_format("missing field: card"))?;
        let card = Card::decode(card_value)?;

        let rating_str = obj
            .get("rating")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_format("rating is not a string"))?;
        let rating = Rating::try_from(rating_str)?;

        let review_datetime_str = obj
            .get("review_datetime")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_format("review_datetime is not a string"))?;
        let review_datetime = Timestamp::parse(review_datetime_str)?;

        let review_duration = match obj.get("review_duration") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(
                n.as_u64()
                    .ok_or_else(|| Error::invalid_format("review_duration is not a non-negative integer"))?,
            ),
            Some(Value::String(s)) => Some(
                s.parse::<u64>()
                    .map_err(|_| Error::invalid_format("review_duration is not a non-negative integer"))?,
            ),
            Some(_) => return Err(Error::invalid_format("review_duration has an unsupported type")),
        };

        Ok(ReviewLog {
            card,
            rating,
            review_datetime,
            review_duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardOptions;
    use crate::state::State;

    #[test]
    fn test_round_trip_encode_decode() {
        let now = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        let card = Card::new_at(
            CardOptions {
                state: State::Review,
                step: None,
                stability: Some(3.0),
                difficulty: Some(5.0),
                last_review: Some(now),
                ..CardOptions::default()
            },
            now,
        );
        let log = ReviewLog {
            card,
            rating: Rating::Good,
            review_datetime: now,
            review_duration: Some(4200),
        };
        let decoded = ReviewLog::decode(&log.encode()).unwrap();
        assert_eq!(log, decoded);
    }

    #[test]
    fn test_decode_rejects_unknown_rating() {
        let value = json!({
            "card": {
                "card_id": 1,
                "state": "review",
                "step": null,
                "stability": 3.0,
                "difficulty": 5.0,
                "due": "2024-01-01T00:00:00Z",
                "last_review": null,
            },
            "rating": "meh",
            "review_datetime": "2024-01-01T00:00:00Z",
            "review_duration": null,
        });
        let err = ReviewLog::decode(&value).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_review_duration_absent_by_default() {
        let value = json!({
            "card": {
                "card_id": 1,
                "state": "learning",
                "step": 0,
                "stability": null,
                "difficulty": null,
                "due": "2024-01-01T00:00:00Z",
                "last_review": null,
            },
            "rating": "good",
            "review_datetime": "2024-01-01T00:00:00Z",
        });
        let decoded = ReviewLog::decode(&value).unwrap();
        assert!(decoded.review_duration.is_none());
    }
}
