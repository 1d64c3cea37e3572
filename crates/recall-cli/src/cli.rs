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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use recall_core::Fallible;

use crate::cmd::due::print_due;
use crate::cmd::new::new_card;
use crate::cmd::preview::preview_card;
use crate::cmd::schedule::schedule_card;
use crate::cmd::stats::print_stats;
use crate::input::load_config;
use crate::input::resolve_now;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a new card.
    New {
        /// The card's ID.
        #[arg(long, conflicts_with_all = ["front", "back"])]
        id: Option<String>,
        /// The card's question. With --back, derives the ID from the text.
        #[arg(long, requires = "back")]
        front: Option<String>,
        /// The card's answer.
        #[arg(long, requires = "front")]
        back: Option<String>,
        /// The deck the card belongs to.
        #[arg(long, default_value = "default")]
        deck: String,
        /// Creation time (RFC 3339). Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },
    /// Apply a rating to a card and print its next state and log entry.
    Schedule {
        /// Path to the card's JSON, or `-` for standard input.
        card: PathBuf,
        /// Again, Hard, Good, or Easy (or 1-4).
        rating: String,
        /// Review time (RFC 3339). Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },
    /// Print the outcome of every rating for a card.
    Preview {
        /// Path to the card's JSON, or `-` for standard input.
        card: PathBuf,
        /// Review time (RFC 3339). Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },
    /// Print the due cards, in review order.
    Due {
        /// Path to a JSON array of cards, or `-` for standard input.
        cards: PathBuf,
        /// Reference time (RFC 3339). Defaults to the current time.
        #[arg(long)]
        now: Option<String>,
        /// Only consider cards in this deck. May be repeated.
        #[arg(long = "deck")]
        decks: Vec<String>,
    },
    /// Print statistics over a review log.
    Stats {
        /// Path to a JSON array of review log entries, or `-` for standard
        /// input.
        logs: PathBuf,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let output = match cli.command {
        Command::New {
            id,
            front,
            back,
            deck,
            now,
        } => {
            let scheduler = config.build_scheduler()?;
            new_card(scheduler.as_ref(), id, front.zip(back), deck, resolve_now(now)?)?
        }
        Command::Schedule { card, rating, now } => {
            let scheduler = config.build_scheduler()?;
            schedule_card(scheduler.as_ref(), &card, &rating, resolve_now(now)?)?
        }
        Command::Preview { card, now } => {
            let scheduler = config.build_scheduler()?;
            preview_card(scheduler.as_ref(), &card, resolve_now(now)?)?
        }
        Command::Due { cards, now, decks } => print_due(&cards, resolve_now(now)?, decks)?,
        Command::Stats { logs } => print_stats(&logs)?,
    };
    println!("{output}");
    Ok(())
}
