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

//! SM-2 style interval scaling: an easiness factor multiplies the previous
//! interval, and a failed recall restarts the repetition count.

/// The easiness factor never drops below this.
pub const MIN_EASINESS: f64 = 1.3;

/// The easiness factor of a card that has never been reviewed.
pub const INITIAL_EASINESS: f64 = 2.5;

/// Qualities below this are failed recalls.
const PASSING_QUALITY: i32 = 3;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sm2Review {
    pub repetitions: u32,
    pub easiness: f64,
    /// Days until the next review.
    pub interval: u32,
}

/// Computes the next review from a quality score in `0..=5`. Scores
/// outside that range are clamped.
pub fn calculate_next_review(
    quality: i32,
    prev_repetitions: u32,
    prev_easiness: f64,
    prev_interval: u32,
) -> Sm2Review {
    let quality = quality.clamp(0, 5);
    let q = f64::from(5 - quality);
    let easiness = (prev_easiness + (0.1 - q * (0.08 + q * 0.02))).max(MIN_EASINESS);
    let repetitions = if quality < PASSING_QUALITY {
        0
    } else {
        prev_repetitions.saturating_add(1)
    };
    let interval = match repetitions {
        0 | 1 => 1,
        2 => 6,
        _ => scale_interval(prev_interval, easiness),
    };
    Sm2Review {
        repetitions,
        easiness,
        interval,
    }
}

fn scale_interval(prev_interval: u32, easiness: f64) -> u32 {
    let interval = (f64::from(prev_interval) * easiness).round();
    // `as` saturates, and maps NaN to zero.
    interval as u32
}
