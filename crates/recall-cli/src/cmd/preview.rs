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
use recall_core::Scheduler;
use recall_core::Timestamp;
use serde::Serialize;

use crate::input::read_json;

#[derive(Serialize)]
struct Outcome {
    rating: Rating,
    next_state: CardState,
    fallback: Option<String>,
}

pub fn preview_card(scheduler: &dyn Scheduler, path: &Path, now: Timestamp) -> Fallible<String> {
    let card: Card = read_json(path)?;
    card.state.validate()?;
    let outcomes: Vec<Outcome> = scheduler
        .preview(&card.state, now)
        .into_iter()
        .map(|output| Outcome {
            rating: output.rating,
            next_state: output.state,
            fallback: output.fallback.map(|f| f.to_string()),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&outcomes)?)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use recall_core::CardId;
    use recall_core::DeckId;
    use recall_core::FsrsScheduler;
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_preview() -> Fallible<()> {
        let now = Timestamp::parse("2025-01-01T00:00:00Z")?;
        let scheduler = FsrsScheduler::default();
        let card = Card::new(
            CardId::new("c1"),
            DeckId::new("d"),
            scheduler.initialize_card(now),
        );
        let dir = tempdir()?;
        let path = dir.path().join("card.json");
        write(&path, serde_json::to_string(&card)?)?;
        let json = preview_card(&scheduler, &path, now)?;
        let value: Value = serde_json::from_str(&json)?;
        let ratings: Vec<&str> = value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|o| o["rating"].as_str())
            .collect();
        assert_eq!(ratings, vec!["Again", "Hard", "Good", "Easy"]);
        assert_eq!(value[0]["next_state"]["state"], "Learning");
        assert_eq!(value[3]["next_state"]["state"], "Review");
        Ok(())
    }
}
