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

use serde::Serialize;

use crate::types::card_state::State;
use crate::types::rating::Rating;
use crate::types::review_log::ReviewLogEntry;

/// Summary of a review history.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: usize,
    pub again_count: usize,
    pub hard_count: usize,
    pub good_count: usize,
    pub easy_count: usize,
    /// Mean of the scheduled intervals, in days. Zero for an empty log.
    pub average_interval: f64,
    /// Reviews that sent a card into relearning.
    pub lapses: usize,
}

impl ReviewStats {
    pub fn from_logs(logs: &[ReviewLogEntry]) -> Self {
        let count = |rating: Rating| logs.iter().filter(|log| log.rating() == rating).count();
        let total_interval: f64 = logs.iter().map(|log| f64::from(log.scheduled_days())).sum();
        let average_interval = if logs.is_empty() {
            0.0
        } else {
            total_interval / logs.len() as f64
        };
        Self {
            total_reviews: logs.len(),
            again_count: count(Rating::Again),
            hard_count: count(Rating::Hard),
            good_count: count(Rating::Good),
            easy_count: count(Rating::Easy),
            average_interval,
            lapses: logs
                .iter()
                .filter(|log| log.state() == State::Relearning)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::scheduler::FsrsScheduler;
    use crate::scheduler::Scheduler;
    use crate::types::card::Card;
    use crate::types::card::CardId;
    use crate::types::card::DeckId;
    use crate::types::timestamp::Timestamp;

    #[test]
    fn test_empty() {
        let stats = ReviewStats::from_logs(&[]);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_interval, 0.0);
        assert_eq!(stats.lapses, 0);
    }

    #[test]
    fn test_counts() -> Fallible<()> {
        let now = Timestamp::parse("2025-02-01T00:00:00Z")?;
        let scheduler = FsrsScheduler::default();
        let mut card = Card::new(
            CardId::new("c"),
            DeckId::new("d"),
            scheduler.initialize_card(now),
        );
        let mut logs = Vec::new();
        // New -> Review (3d), Review -> Relearning (0d), Relearning -> Review.
        for rating in [Rating::Good, Rating::Again, Rating::Good] {
            let review = scheduler.schedule_card(&card, rating, now);
            card.state = review.next_state;
            logs.push(review.log_entry);
        }
        let stats = ReviewStats::from_logs(&logs);
        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.again_count, 1);
        assert_eq!(stats.good_count, 2);
        assert_eq!(stats.hard_count, 0);
        assert_eq!(stats.easy_count, 0);
        assert_eq!(stats.lapses, 1);
        let expected = f64::from(logs[0].scheduled_days() + logs[2].scheduled_days()) / 3.0;
        assert!((stats.average_interval - expected).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_serializes_camel_case() -> Fallible<()> {
        let value = serde_json::to_value(ReviewStats::from_logs(&[]))?;
        assert_eq!(value["totalReviews"], 0);
        assert_eq!(value["averageInterval"], 0.0);
        Ok(())
    }
}
