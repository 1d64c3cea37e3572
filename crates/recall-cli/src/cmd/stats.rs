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

use recall_core::Fallible;
use recall_core::ReviewLogEntry;
use recall_core::ReviewStats;

use crate::input::read_json;

pub fn print_stats(path: &Path) -> Fallible<String> {
    let logs: Vec<ReviewLogEntry> = read_json(path)?;
    let stats = ReviewStats::from_logs(&logs);
    Ok(serde_json::to_string_pretty(&stats)?)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use recall_core::Card;
    use recall_core::CardId;
    use recall_core::DeckId;
    use recall_core::Rating;
    use recall_core::Scheduler;
    use recall_core::Sm2Scheduler;
    use recall_core::Timestamp;
    use serde_json::Value;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_stats() -> Fallible<()> {
        let now = Timestamp::parse("2025-01-01T00:00:00Z")?;
        let scheduler = Sm2Scheduler::default();
        let mut card = Card::new(
            CardId::new("c"),
            DeckId::new("d"),
            scheduler.initialize_card(now),
        );
        let mut logs = Vec::new();
        for rating in [Rating::Good, Rating::Good, Rating::Hard] {
            let review = scheduler.schedule_card(&card, rating, now);
            card.state = review.next_state;
            logs.push(review.log_entry);
        }
        let dir = tempdir()?;
        let path = dir.path().join("logs.json");
        write(&path, serde_json::to_string(&logs)?)?;
        let value: Value = serde_json::from_str(&print_stats(&path)?)?;
        assert_eq!(value["totalReviews"], 3);
        assert_eq!(value["goodCount"], 2);
        assert_eq!(value["hardCount"], 1);
        assert_eq!(value["lapses"], 0);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        assert!(print_stats(Path::new("./derpherp.json")).is_err());
    }
}
