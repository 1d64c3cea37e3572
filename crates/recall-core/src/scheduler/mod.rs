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

//! Scheduling strategies. Both implement [`Scheduler`]; callers pick one
//! at startup and never look at which.

mod fsrs_scheduler;
mod sm2_scheduler;

use std::fmt::Display;
use std::fmt::Formatter;

pub use fsrs_scheduler::FsrsParameters;
pub use fsrs_scheduler::FsrsScheduler;
pub use sm2_scheduler::Sm2Parameters;
pub use sm2_scheduler::Sm2Scheduler;

use crate::types::card::Card;
use crate::types::card_state::CardState;
use crate::types::card_state::MAX_SCHEDULED_DAYS;
use crate::types::card_state::State;
use crate::types::rating::Rating;
use crate::types::review_log::ReviewLogEntry;
use crate::types::timestamp::Timestamp;

/// Why the scheduler substituted a one-day interval.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArithmeticFallback {
    /// The memory model produced a NaN or infinite stability or
    /// difficulty.
    NonFiniteMemory,
    /// The interval was NaN or infinite.
    NonFiniteInterval,
    /// `now` plus the interval is not a representable time.
    DueOutOfRange,
}

impl Display for ArithmeticFallback {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let s = match self {
            ArithmeticFallback::NonFiniteMemory => "memory model produced a non-finite value",
            ArithmeticFallback::NonFiniteInterval => "interval is not finite",
            ArithmeticFallback::DueOutOfRange => "due date is out of range",
        };
        write!(f, "{s}")
    }
}

/// The result of applying one rating to one card state.
#[derive(Clone, PartialEq, Debug)]
pub struct SchedulingOutput {
    pub rating: Rating,
    /// The card's new state.
    pub state: CardState,
    /// The `elapsed_days` of the state this one replaces.
    pub last_elapsed_days: u32,
    /// Set when a one-day interval was substituted.
    pub fallback: Option<ArithmeticFallback>,
}

/// What a caller persists after a review: the card's new state, and the
/// entry to append to the review log.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduledReview {
    pub next_state: CardState,
    pub log_entry: ReviewLogEntry,
    pub fallback: Option<ArithmeticFallback>,
}

pub trait Scheduler {
    /// A short name for logs and configuration.
    fn name(&self) -> &'static str;

    /// The state of a card authored at `now`.
    fn initialize_card(&self, now: Timestamp) -> CardState;

    /// Applies `rating` to `card` as of `now`. Never fails: arithmetic
    /// trouble is reported through [`SchedulingOutput::fallback`].
    fn next_state(&self, card: &CardState, rating: Rating, now: Timestamp) -> SchedulingOutput;

    /// Schedules a review of `card` performed at `now`.
    fn schedule_card(&self, card: &Card, rating: Rating, now: Timestamp) -> ScheduledReview {
        let output = self.next_state(&card.state, rating, now);
        log::debug!(
            "{} {} {} -> {} S={:.2}d D={:.2} due={}",
            self.name(),
            card.id,
            rating,
            output.state.state,
            output.state.stability,
            output.state.difficulty,
            output.state.due
        );
        let log_entry = ReviewLogEntry::new(card.id.clone(), &output, now);
        ScheduledReview {
            next_state: output.state,
            log_entry,
            fallback: output.fallback,
        }
    }

    /// The outcome of every possible rating, in rating order.
    fn preview(&self, card: &CardState, now: Timestamp) -> Vec<SchedulingOutput> {
        Rating::ALL
            .iter()
            .map(|rating| self.next_state(card, *rating, now))
            .collect()
    }
}

/// The parts of a transition both strategies share: lifecycle state, lapse
/// count, and elapsed time.
pub(crate) struct Step {
    pub state: State,
    pub lapses: u32,
    pub elapsed_days: u32,
}

impl Step {
    pub fn new(card: &CardState, rating: Rating, now: Timestamp) -> Self {
        let lapses = if card.state == State::Review && rating == Rating::Again {
            card.lapses.saturating_add(1)
        } else {
            card.lapses
        };
        let relapsed = lapses > card.lapses;
        let elapsed_days = match card.last_reviewed() {
            Some(last_review) => now.days_since(last_review),
            None => 0,
        };
        Self {
            state: next_lifecycle_state(card.state, rating, relapsed),
            lapses,
            elapsed_days,
        }
    }

    /// Whether the card leaves this review still being (re)learned.
    pub fn is_learning(&self) -> bool {
        matches!(self.state, State::Learning | State::Relearning)
    }
}

pub(crate) fn next_lifecycle_state(current: State, rating: Rating, relapsed: bool) -> State {
    match (current, rating) {
        (State::New, Rating::Again) => State::Learning,
        (State::New, _) => State::Review,
        _ if relapsed => State::Relearning,
        (State::Learning, Rating::Again) => State::Learning,
        (State::Relearning, Rating::Again) => State::Relearning,
        (State::Learning | State::Relearning, _) => State::Review,
        (State::Review, _) => State::Review,
    }
}

/// A strategy's proposal for the card's memory after the review.
pub(crate) struct Memory {
    pub stability: f64,
    pub difficulty: f64,
    /// Candidate interval in days, before clamping.
    pub interval: f64,
    pub streak: u32,
}

/// Assembles the next state, clamping the interval and falling back to one
/// day when the arithmetic went wrong.
pub(crate) fn finish(
    card: &CardState,
    rating: Rating,
    now: Timestamp,
    step: Step,
    memory: Memory,
) -> SchedulingOutput {
    let mut fallback = None;

    let (stability, difficulty) = if memory.stability.is_finite() && memory.difficulty.is_finite()
    {
        (memory.stability, memory.difficulty)
    } else {
        fallback = Some(ArithmeticFallback::NonFiniteMemory);
        (finite_or_zero(card.stability), finite_or_zero(card.difficulty))
    };

    let days = if memory.interval.is_finite() && fallback.is_none() {
        memory.interval.round().clamp(0.0, f64::from(MAX_SCHEDULED_DAYS)) as u32
    } else {
        if fallback.is_none() {
            fallback = Some(ArithmeticFallback::NonFiniteInterval);
        }
        1
    };

    let (due, scheduled_days) = match now.checked_add_days(days) {
        Some(due) => (due, days),
        None => {
            fallback = Some(ArithmeticFallback::DueOutOfRange);
            (now.checked_add_days(1).unwrap_or(now), 1)
        }
    };

    if let Some(reason) = fallback {
        log::warn!("Scheduling fell back to a one-day interval: {reason}.");
    }

    SchedulingOutput {
        rating,
        state: CardState {
            due,
            stability,
            difficulty,
            elapsed_days: step.elapsed_days,
            scheduled_days,
            reps: card.reps.saturating_add(1),
            lapses: step.lapses,
            state: step.state,
            last_review: Some(now),
            streak: memory.streak,
        },
        last_elapsed_days: card.elapsed_days,
        fallback,
    }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x.max(0.0) } else { 0.0 }
}
