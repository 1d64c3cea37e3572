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

use crate::scheduler::Memory;
use crate::scheduler::Scheduler;
use crate::scheduler::SchedulingOutput;
use crate::scheduler::Step;
use crate::scheduler::finish;
use crate::sm2::INITIAL_EASINESS;
use crate::sm2::MIN_EASINESS;
use crate::sm2::calculate_next_review;
use crate::types::card_state::CardState;
use crate::types::card_state::MAX_SCHEDULED_DAYS;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

#[derive(Clone, PartialEq, Debug)]
pub struct Sm2Parameters {
    /// The easiness factor of new cards.
    pub initial_easiness: f64,
    /// The longest interval, in days.
    pub maximum_interval: u32,
}

impl Default for Sm2Parameters {
    fn default() -> Self {
        Self {
            initial_easiness: INITIAL_EASINESS,
            maximum_interval: MAX_SCHEDULED_DAYS,
        }
    }
}

/// Schedules by scaling the previous interval by an easiness factor. The
/// factor lives in `difficulty`; the repetition count in `streak`.
#[derive(Clone, Default, Debug)]
pub struct Sm2Scheduler {
    params: Sm2Parameters,
}

impl Sm2Scheduler {
    pub fn new(params: Sm2Parameters) -> Self {
        Self { params }
    }
}

/// Maps a rating onto the 0-5 quality scale. Only Again is a failed recall.
pub fn quality(rating: Rating) -> i32 {
    match rating {
        Rating::Again => 1,
        Rating::Hard => 3,
        Rating::Good => 4,
        Rating::Easy => 5,
    }
}

impl Scheduler for Sm2Scheduler {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initialize_card(&self, now: Timestamp) -> CardState {
        let easiness = self.params.initial_easiness.max(MIN_EASINESS);
        CardState::new(now, 0.0, easiness)
    }

    fn next_state(&self, card: &CardState, rating: Rating, now: Timestamp) -> SchedulingOutput {
        let step = Step::new(card, rating, now);
        // A new card may have been authored under another strategy.
        let easiness = if card.is_new() {
            self.params.initial_easiness.max(MIN_EASINESS)
        } else {
            card.difficulty
        };
        let review = calculate_next_review(
            quality(rating),
            card.streak,
            easiness,
            card.scheduled_days,
        );
        let max = self.params.maximum_interval.clamp(1, MAX_SCHEDULED_DAYS);
        let memory = Memory {
            stability: 0.0,
            difficulty: review.easiness,
            interval: f64::from(review.interval.min(max)),
            streak: review.repetitions,
        };
        finish(card, rating, now, step, memory)
    }
}
