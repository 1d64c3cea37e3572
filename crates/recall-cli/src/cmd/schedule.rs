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

use std::path::Path;

use recall_core::Card;
use recall_core::CardState;
use recall_core::Fallible;
use recall_core::Rating;
use recall_core::ReviewLogEntry;
use recall_core::Scheduler;
use recall_core::Timestamp;
use serde::Serialize;

use crate::input::read_json;

#[derive(Serialize)]
struct ScheduleOutput {
    next_state: CardState,
    log_entry: ReviewLogEntry,
    /// Why a one-day interval was substituted, if it was.
    fallback: Option<String>,
}

pub fn schedule_card(
    scheduler: &dyn Scheduler,
    path: &Path,
    rating: &str,
    now: Timestamp,
) -> Fallible<String> {
    let rating: Rating = rating.parse()?;
    let card: Card = read_json(path)?;
    card.state.validate()?;
    let review = scheduler.schedule_card(&card, rating, now);
    let output = ScheduleOutput {
        next_state: review.next_state,
        log_entry: review.log_entry,
        fallback: review.fallback.map(|f| f.to_string()),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use recall_core::ErrorKind;
    use recall_core::FsrsScheduler;
    use recall_core::Sm2Scheduler;
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    const NEW_CARD: &str = r#"{
        "id": "c1",
        "deck_id": "d",
        "due": "2025-01-01T00:00:00Z",
        "stability": 0.0,
        "difficulty": 0.0,
        "elapsed_days": 0,
        "scheduled_days": 0,
        "reps": 0,
        "lapses": 0,
        "state": "New"
    }"#;

    #[test]
    fn test_schedule_new_card() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("card.json");
        write(&path, NEW_CARD)?;
        let now = Timestamp::parse("2025-01-02T00:00:00Z")?;
        let json = schedule_card(&FsrsScheduler::default(), &path, "Again", now)?;
        let value: Value = serde_json::from_str(&json)?;
        assert_eq!(value["next_state"]["state"], "Learning");
        assert_eq!(value["next_state"]["reps"], 1);
        assert_eq!(value["next_state"]["lapses"], 0);
        assert_eq!(value["log_entry"]["card_id"], "c1");
        assert_eq!(value["log_entry"]["rating"], "Again");
        assert_eq!(value["fallback"], Value::Null);
        Ok(())
    }

    #[test]
    fn test_schedule_sm2() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("card.json");
        write(&path, NEW_CARD.replace("\"difficulty\": 0.0", "\"difficulty\": 2.5"))?;
        let now = Timestamp::parse("2025-01-02T00:00:00Z")?;
        let json = schedule_card(&Sm2Scheduler::default(), &path, "good", now)?;
        let value: Value = serde_json::from_str(&json)?;
        assert_eq!(value["next_state"]["state"], "Review");
        assert_eq!(value["next_state"]["scheduled_days"], 1);
        assert_eq!(value["next_state"]["due"], "2025-01-03T00:00:00Z");
        Ok(())
    }

    #[test]
    fn test_invalid_rating() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("card.json");
        write(&path, NEW_CARD)?;
        let now = Timestamp::parse("2025-01-02T00:00:00Z")?;
        let err = schedule_card(&FsrsScheduler::default(), &path, "Perfect", now).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRating);
        Ok(())
    }

    #[test]
    fn test_invalid_state() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("card.json");
        write(&path, NEW_CARD.replace("\"reps\": 0", "\"reps\": 3"))?;
        let now = Timestamp::parse("2025-01-02T00:00:00Z")?;
        let err = schedule_card(&FsrsScheduler::default(), &path, "Good", now).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        Ok(())
    }
}
