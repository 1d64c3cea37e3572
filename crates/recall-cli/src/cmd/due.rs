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

use std::collections::HashSet;
use std::path::Path;

use recall_core::Card;
use recall_core::DeckId;
use recall_core::Fallible;
use recall_core::Timestamp;
use recall_core::select_due;

use crate::input::read_json;

pub fn print_due(path: &Path, now: Timestamp, decks: Vec<String>) -> Fallible<String> {
    let cards: Vec<Card> = read_json(path)?;
    for card in &cards {
        card.state.validate()?;
    }
    log::debug!("Loaded {} cards.", cards.len());
    let decks: Option<HashSet<DeckId>> = if decks.is_empty() {
        None
    } else {
        Some(decks.into_iter().map(DeckId::new).collect())
    };
    let due: Vec<&Card> = select_due(&cards, now, decks.as_ref());
    log::debug!("{} cards due.", due.len());
    Ok(serde_json::to_string_pretty(&due)?)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use recall_core::CardId;
    use recall_core::FsrsScheduler;
    use recall_core::Rating;
    use recall_core::Scheduler;
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_due() -> Fallible<()> {
        let start = Timestamp::parse("2025-01-01T00:00:00Z")?;
        let now = Timestamp::parse("2025-01-02T00:00:00Z")?;
        let scheduler = FsrsScheduler::default();
        let new = |id: &str, deck: &str| {
            Card::new(CardId::new(id), DeckId::new(deck), scheduler.initialize_card(start))
        };
        let mut easy = new("easy", "a");
        easy.state = scheduler.next_state(&easy.state, Rating::Easy, start).state;
        let mut again = new("again", "b");
        again.state = scheduler.next_state(&again.state, Rating::Again, start).state;
        let cards = vec![easy, again, new("fresh", "a")];

        let dir = tempdir()?;
        let path = dir.path().join("cards.json");
        write(&path, serde_json::to_string(&cards)?)?;

        let value: Value = serde_json::from_str(&print_due(&path, now, vec![])?)?;
        let ids: Vec<&str> = value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|c| c["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["again", "fresh"]);

        let value: Value =
            serde_json::from_str(&print_due(&path, now, vec!["a".to_string()])?)?;
        assert_eq!(value.as_array().map(|a| a.len()), Some(1));
        assert_eq!(value[0]["id"], "fresh");
        Ok(())
    }
}
