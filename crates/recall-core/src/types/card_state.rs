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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::types::timestamp::Timestamp;

/// The longest interval the scheduler will ever assign, in days.
pub const MAX_SCHEDULED_DAYS: u32 = 3650;

/// A card's position in the review lifecycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum State {
    /// Never reviewed.
    New,
    /// Failed on its first review and not yet learned.
    Learning,
    /// Learned, reviewed at growing intervals.
    Review,
    /// Forgotten after having been learned.
    Relearning,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::New => "New",
            State::Learning => "Learning",
            State::Review => "Review",
            State::Relearning => "Relearning",
        }
    }
}

impl FromStr for State {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(State::New),
            "Learning" => Ok(State::Learning),
            "Review" => Ok(State::Review),
            "Relearning" => Ok(State::Relearning),
            _ => fail_with(ErrorKind::InvalidState, format!("invalid card state: {s:?}")),
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for State {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(serde::de::Error::custom)
    }
}

/// A card's scheduling state. Which fields carry meaning depends on the
/// strategy: FSRS uses `stability` and `difficulty` as memory parameters,
/// SM-2 keeps its easiness factor in `difficulty` and its repetition count
/// in `streak`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CardState {
    /// When the card next becomes eligible for review.
    pub due: Timestamp,
    /// Days until recall probability decays to the target (FSRS).
    pub stability: f64,
    /// Intrinsic hardness (FSRS), or the easiness factor (SM-2).
    pub difficulty: f64,
    /// Days between the previous review and the one that produced this
    /// state.
    pub elapsed_days: u32,
    /// The interval most recently assigned.
    pub scheduled_days: u32,
    /// Number of times the card has been scheduled.
    pub reps: u32,
    /// Number of times the card was forgotten while in review.
    pub lapses: u32,
    pub state: State,
    /// When the card was last reviewed, if ever.
    #[serde(default)]
    pub last_review: Option<Timestamp>,
    /// Consecutive reviews not rated Again.
    #[serde(default)]
    pub streak: u32,
}

impl CardState {
    /// The state of a freshly authored card: due immediately, all counters
    /// zero.
    pub fn new(now: Timestamp, stability: f64, difficulty: f64) -> Self {
        Self {
            due: now,
            stability,
            difficulty,
            elapsed_days: 0,
            scheduled_days: 0,
            reps: 0,
            lapses: 0,
            state: State::New,
            last_review: None,
            streak: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.state == State::New
    }

    /// When the card was last reviewed. Rows stored without `last_review`
    /// fall back to `due` minus the interval that produced it.
    pub fn last_reviewed(&self) -> Option<Timestamp> {
        match self.last_review {
            Some(ts) => Some(ts),
            None if self.is_new() => None,
            None => self.due.checked_sub_days(self.scheduled_days),
        }
    }

    /// Checks the invariants every stored state must satisfy.
    pub fn validate(&self) -> Fallible<()> {
        if !self.stability.is_finite() || self.stability < 0.0 {
            return fail_with(
                ErrorKind::InvalidState,
                format!("stability must be a non-negative number, got {}", self.stability),
            );
        }
        if !self.difficulty.is_finite() {
            return fail_with(
                ErrorKind::InvalidState,
                format!("difficulty must be a number, got {}", self.difficulty),
            );
        }
        if self.scheduled_days > MAX_SCHEDULED_DAYS {
            return fail_with(
                ErrorKind::InvalidState,
                format!(
                    "scheduled_days is {}, the maximum is {MAX_SCHEDULED_DAYS}",
                    self.scheduled_days
                ),
            );
        }
        if self.is_new() && (self.reps != 0 || self.last_review.is_some()) {
            return fail_with(ErrorKind::InvalidState, "a new card cannot have been reviewed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Fallible<Timestamp> {
        Timestamp::parse("2025-06-01T09:00:00Z")
    }

    #[test]
    fn test_new_card() -> Fallible<()> {
        let card = CardState::new(now()?, 0.0, 0.0);
        assert_eq!(card.state, State::New);
        assert_eq!(card.due, now()?);
        assert_eq!(card.reps, 0);
        assert_eq!(card.lapses, 0);
        card.validate()?;
        Ok(())
    }

    #[test]
    fn test_state_strings() -> Fallible<()> {
        for state in [State::New, State::Learning, State::Review, State::Relearning] {
            assert_eq!(state.as_str().parse::<State>()?, state);
        }
        let err = "Graduated".parse::<State>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        Ok(())
    }

    #[test]
    fn test_validate() -> Fallible<()> {
        let mut card = CardState::new(now()?, 1.0, 5.0);
        card.stability = f64::NAN;
        assert!(card.validate().is_err());

        let mut card = CardState::new(now()?, 1.0, 5.0);
        card.scheduled_days = MAX_SCHEDULED_DAYS + 1;
        assert!(card.validate().is_err());

        let mut card = CardState::new(now()?, 1.0, 5.0);
        card.reps = 2;
        assert!(card.validate().is_err());
        card.state = State::Review;
        card.validate()?;
        Ok(())
    }

    #[test]
    fn test_last_reviewed() -> Fallible<()> {
        let mut card = CardState::new(now()?, 10.0, 5.0);
        assert_eq!(card.last_reviewed(), None);

        card.state = State::Review;
        card.reps = 3;
        card.scheduled_days = 10;
        card.due = Timestamp::parse("2025-01-11T00:00:00Z")?;
        let derived = Timestamp::parse("2025-01-01T00:00:00Z")?;
        assert_eq!(card.last_reviewed(), Some(derived));

        let recorded = Timestamp::parse("2024-12-30T00:00:00Z")?;
        card.last_review = Some(recorded);
        assert_eq!(card.last_reviewed(), Some(recorded));
        Ok(())
    }

    #[test]
    fn test_persisted_representation() -> Fallible<()> {
        let json = r#"{
            "due": "2025-06-01T09:00:00Z",
            "stability": 3.2,
            "difficulty": 5.1,
            "elapsed_days": 2,
            "scheduled_days": 3,
            "reps": 4,
            "lapses": 1,
            "state": "Review"
        }"#;
        let card: CardState = serde_json::from_str(json)?;
        assert_eq!(card.state, State::Review);
        assert_eq!(card.last_review, None);
        assert_eq!(card.streak, 0);
        let value = serde_json::to_value(&card)?;
        assert_eq!(value["state"], "Review");
        assert_eq!(value["scheduled_days"], 3);
        Ok(())
    }
}
