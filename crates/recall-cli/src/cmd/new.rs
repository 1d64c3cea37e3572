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

use recall_core::Card;
use recall_core::CardId;
use recall_core::DeckId;
use recall_core::Fallible;
use recall_core::Scheduler;
use recall_core::Timestamp;
use recall_core::fail;

/// Creates a card. The ID is either given, or derived from the front and
/// back text.
pub fn new_card(
    scheduler: &dyn Scheduler,
    id: Option<String>,
    content: Option<(String, String)>,
    deck: String,
    now: Timestamp,
) -> Fallible<String> {
    let id = match (id, content) {
        (Some(id), _) => CardId::new(id),
        (None, Some((front, back))) => CardId::from_content(&front, &back),
        (None, None) => return fail("either --id or both --front and --back are required."),
    };
    let card = Card::new(id, DeckId::new(deck), scheduler.initialize_card(now));
    Ok(serde_json::to_string_pretty(&card)?)
}
