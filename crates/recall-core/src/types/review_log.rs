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

use serde::Deserialize;
use serde::Serialize;

use crate::scheduler::SchedulingOutput;
use crate::types::card::CardId;
use crate::types::card_state::State;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// One scheduling event. Entries are built once and only read afterwards,
/// so the fields are private.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    card_id: CardId,
    rating: Rating,
    state: State,
    due: Timestamp,
    stability: f64,
    difficulty: f64,
    elapsed_days: u32,
    last_elapsed_days: u32,
    scheduled_days: u32,
    reviewed_at: Timestamp,
}

impl ReviewLogEntry {
    pub fn new(card_id: CardId, output: &SchedulingOutput, reviewed_at: Timestamp) -> Self {
        let next = &output.state;
        Self {
            card_id,
            rating: output.rating,
            state: next.state,
            due: next.due,
            stability: next.stability,
            difficulty: next.difficulty,
            elapsed_days: next.elapsed_days,
            last_elapsed_days: output.last_elapsed_days,
            scheduled_days: next.scheduled_days,
            reviewed_at,
        }
    }

    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// The card's state after the review.
    pub fn state(&self) -> State {
        self.state
    }

    pub fn due(&self) -> Timestamp {
        self.due
    }

    pub fn stability(&self) -> f64 {
        self.stability
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn elapsed_days(&self) -> u32 {
        self.elapsed_days
    }

    pub fn last_elapsed_days(&self) -> u32 {
        self.last_elapsed_days
    }

    pub fn scheduled_days(&self) -> u32 {
        self.scheduled_days
    }

    pub fn reviewed_at(&self) -> Timestamp {
        self.reviewed_at
    }
}
