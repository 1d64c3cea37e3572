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
use std::collections::VecDeque;

use crate::error::ErrorKind;
use crate::error::Fallible;
use crate::error::fail_with;
use crate::scheduler::ScheduledReview;
use crate::scheduler::Scheduler;
use crate::store::CardStore;
use crate::store::ReviewLogStore;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::DeckId;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// Reviews one card: load it, schedule it, store the new state, and append
/// the log entry. If the log cannot be appended, the card's previous state
/// is written back and the append error is returned, even if the restore
/// fails too.
pub fn review_card<C, L>(
    scheduler: &dyn Scheduler,
    cards: &mut C,
    logs: &mut L,
    id: &CardId,
    rating: Rating,
    now: Timestamp,
) -> Fallible<ScheduledReview>
where
    C: CardStore + ?Sized,
    L: ReviewLogStore + ?Sized,
{
    let Some(card) = cards.get(id)? else {
        return fail_with(ErrorKind::Store, format!("no card with ID {id}"));
    };
    let review = scheduler.schedule_card(&card, rating, now);
    let next = Card {
        state: review.next_state.clone(),
        ..card.clone()
    };
    cards.upsert(next)?;
    if let Err(e) = logs.append(review.log_entry.clone()) {
        log::warn!("Could not append review of {id}, restoring previous state: {e}");
        if let Err(restore) = cards.upsert(card) {
            log::error!("Could not restore the previous state of {id}: {restore}");
        }
        return Err(e);
    }
    Ok(review)
}

/// A study session: the cards due when it started, reviewed front to back.
/// Cards that are still due after being rated go to the back of the queue.
pub struct Session<'a> {
    scheduler: &'a dyn Scheduler,
    queue: VecDeque<CardId>,
    reviewed: usize,
}

impl<'a> Session<'a> {
    pub fn start<C>(
        scheduler: &'a dyn Scheduler,
        cards: &C,
        now: Timestamp,
        decks: Option<&HashSet<DeckId>>,
    ) -> Fallible<Self>
    where
        C: CardStore + ?Sized,
    {
        let queue: VecDeque<CardId> = cards.due(now, decks)?.into_iter().map(|c| c.id).collect();
        log::debug!("Session started with {} due cards.", queue.len());
        Ok(Self {
            scheduler,
            queue,
            reviewed: 0,
        })
    }

    /// The card to present next.
    pub fn current(&self) -> Option<&CardId> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Number of ratings committed so far.
    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Rates the current card. On error the queue is left as it was, so the
    /// caller can retry.
    pub fn rate<C, L>(
        &mut self,
        cards: &mut C,
        logs: &mut L,
        rating: Rating,
        now: Timestamp,
    ) -> Fallible<ScheduledReview>
    where
        C: CardStore + ?Sized,
        L: ReviewLogStore + ?Sized,
    {
        let Some(id) = self.queue.front().cloned() else {
            return fail_with(ErrorKind::Other, "the session is finished");
        };
        let review = review_card(self.scheduler, cards, logs, &id, rating, now)?;
        self.queue.pop_front();
        if review.next_state.due <= now {
            self.queue.push_back(id);
        }
        self.reviewed += 1;
        if self.queue.is_empty() {
            log::debug!("Session completed after {} reviews.", self.reviewed);
        }
        Ok(review)
    }
}
