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

use crate::fsrs::DEFAULT_WEIGHTS;
use crate::fsrs::Weights;
use crate::fsrs::initial_difficulty;
use crate::fsrs::initial_stability;
use crate::fsrs::interval;
use crate::fsrs::new_difficulty;
use crate::fsrs::new_stability;
use crate::fsrs::retrievability;
use crate::fsrs::short_term_stability;
use crate::scheduler::Memory;
use crate::scheduler::Scheduler;
use crate::scheduler::SchedulingOutput;
use crate::scheduler::Step;
use crate::scheduler::finish;
use crate::types::card_state::CardState;
use crate::types::card_state::MAX_SCHEDULED_DAYS;
use crate::types::card_state::State;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// The desired recall probability.
pub const TARGET_RECALL: f64 = 0.9;

/// The minimum interval, in days, for a card that leaves the review in the
/// `Review` state.
const MIN_INTERVAL: f64 = 1.0;

#[derive(Clone, PartialEq, Debug)]
pub struct FsrsParameters {
    pub weights: Weights,
    /// Recall probability at which a card becomes due.
    pub desired_retention: f64,
    /// The longest interval, in days.
    pub maximum_interval: u32,
}

impl Default for FsrsParameters {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            desired_retention: TARGET_RECALL,
            maximum_interval: MAX_SCHEDULED_DAYS,
        }
    }
}

/// Schedules with the FSRS memory model.
#[derive(Clone, Default, Debug)]
pub struct FsrsScheduler {
    params: FsrsParameters,
}

impl FsrsScheduler {
    pub fn new(params: FsrsParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FsrsParameters {
        &self.params
    }
}

impl Scheduler for FsrsScheduler {
    fn name(&self) -> &'static str {
        "fsrs"
    }

    fn initialize_card(&self, now: Timestamp) -> CardState {
        CardState::new(now, 0.0, 0.0)
    }

    fn next_state(&self, card: &CardState, rating: Rating, now: Timestamp) -> SchedulingOutput {
        let w = &self.params.weights;
        let step = Step::new(card, rating, now);
        let (stability, difficulty) = match card.state {
            State::New => (initial_stability(w, rating), initial_difficulty(w, rating)),
            _ if step.elapsed_days == 0 => (
                short_term_stability(w, card.stability, rating),
                new_difficulty(w, card.difficulty, rating),
            ),
            _ => {
                let r = retrievability(f64::from(step.elapsed_days), card.stability);
                (
                    new_stability(w, card.difficulty, card.stability, r, rating),
                    new_difficulty(w, card.difficulty, rating),
                )
            }
        };
        let interval = if step.is_learning() {
            // Stays in the session until the learner gets it right.
            0.0
        } else {
            let max = f64::from(self.params.maximum_interval.min(MAX_SCHEDULED_DAYS));
            interval(self.params.desired_retention, stability)
                .round()
                .clamp(MIN_INTERVAL, max.max(MIN_INTERVAL))
        };
        let streak = if rating.is_pass() {
            card.streak.saturating_add(1)
        } else {
            0
        };
        let memory = Memory {
            stability,
            difficulty,
            interval,
            streak,
        };
        finish(card, rating, now, step, memory)
    }
}
