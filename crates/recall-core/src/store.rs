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

//! Narrow repository interfaces. The scheduler never touches storage;
//! callers inject implementations of these traits.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::Fallible;
use crate::queue::select_due;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::DeckId;
use crate::types::review_log::ReviewLogEntry;
use crate::types::timestamp::Timestamp;

pub trait CardStore {
    /// Returns the card with the given ID, if it exists.
    fn get(&self, id: &CardId) -> Fallible<Option<Card>>;

    /// Returns the cards due at `now`, in queue order.
    fn due(&self, now: Timestamp, decks: Option<&HashSet<DeckId>>) -> Fallible<Vec<Card>>;

    /// Inserts the card, or replaces the card with the same ID.
    fn upsert(&mut self, card: Card) -> Fallible<()>;
}

pub trait ReviewLogStore {
    fn append(&mut self, entry: ReviewLogEntry) -> Fallible<()>;
}

#[derive(Default)]
pub struct MemoryCardStore {
    cards: HashMap<CardId, Card>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards, sorted by ID.
    pub fn cards(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.values().collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        cards
    }
}

impl FromIterator<Card> for MemoryCardStore {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let cards = iter.into_iter().map(|card| (card.id.clone(), card)).collect();
        Self { cards }
    }
}

impl CardStore for MemoryCardStore {
    fn get(&self, id: &CardId) -> Fallible<Option<Card>> {
        Ok(self.cards.get(id).cloned())
    }

    fn due(&self, now: Timestamp, decks: Option<&HashSet<DeckId>>) -> Fallible<Vec<Card>> {
        Ok(select_due(self.cards.values(), now, decks)
            .into_iter()
            .cloned()
            .collect())
    }

    fn upsert(&mut self, card: Card) -> Fallible<()> {
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryReviewLog {
    entries: Vec<ReviewLogEntry>,
}

impl MemoryReviewLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ReviewLogEntry] {
        &self.entries
    }
}

impl ReviewLogStore for MemoryReviewLog {
    fn append(&mut self, entry: ReviewLogEntry) -> Fallible<()> {
        self.entries.push(entry);
        Ok(())
    }
}
