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

//! recall-core: the scheduling core of the recall spaced repetition system.
//!
//! This library is pure: it performs no I/O and never reads the clock. It
//! provides:
//! - The card scheduling state and the rating taxonomy
//! - Two interchangeable schedulers: FSRS and SM-2
//! - Review log entries and statistics over them
//! - The due queue selector
//! - Repository traits, with in-memory implementations, and a session driver

pub mod config;
pub mod error;
pub mod fsrs;
pub mod queue;
pub mod scheduler;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::{Config, Strategy};
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use queue::{is_due, select_due};
pub use scheduler::{
    ArithmeticFallback, FsrsScheduler, ScheduledReview, Scheduler, SchedulingOutput, Sm2Scheduler,
};
pub use session::{Session, review_card};
pub use stats::ReviewStats;
pub use store::{CardStore, MemoryCardStore, MemoryReviewLog, ReviewLogStore};
pub use types::card::{Card, CardId, DeckId};
pub use types::card_state::{CardState, MAX_SCHEDULED_DAYS, State};
pub use types::rating::Rating;
pub use types::review_log::ReviewLogEntry;
pub use types::timestamp::Timestamp;
