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

use crate::types::card::Card;
use crate::types::card::DeckId;
use crate::types::card_state::CardState;
use crate::types::timestamp::Timestamp;

/// New cards are always due; others once their due time has passed.
pub fn is_due(card: &CardState, now: Timestamp) -> bool {
    card.is_new() || card.due <= now
}

/// Returns the cards due at `now`, earliest first. Ties are broken by card
/// ID so the order does not depend on the input order. If `decks` is given,
/// only cards in those decks are considered.
pub fn select_due<'a, I>(cards: I, now: Timestamp, decks: Option<&HashSet<DeckId>>) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut due: Vec<&'a Card> = cards
        .into_iter()
        .filter(|card| decks.is_none_or(|decks| decks.contains(&card.deck_id)))
        .filter(|card| is_due(&card.state, now))
        .collect();
    due.sort_by(|a, b| {
        a.state
            .due
            .cmp(&b.state.due)
            .then_with(|| a.id.cmp(&b.id))
    });
    due
}
