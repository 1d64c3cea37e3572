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

//! The FSRS memory model: how stability and difficulty evolve with each
//! review, and how they translate into an interval.

use crate::types::rating::Rating;

pub type Recall = f64;
pub type Stability = f64;
pub type Difficulty = f64;
/// A duration in days.
pub type T = f64;

/// The nineteen model weights.
pub type Weights = [f64; 19];

pub const DEFAULT_WEIGHTS: Weights = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

const F: f64 = 19.0 / 81.0;
const C: f64 = -0.5;

/// Stability never drops below this many days.
pub const MIN_STABILITY: Stability = 0.01;

pub const MIN_DIFFICULTY: Difficulty = 1.0;
pub const MAX_DIFFICULTY: Difficulty = 10.0;

impl From<Rating> for f64 {
    fn from(rating: Rating) -> f64 {
        f64::from(rating.value())
    }
}

/// Probability of recall after `t` days, for a memory of stability `s`.
pub fn retrievability(t: T, s: Stability) -> Recall {
    if t <= 0.0 {
        return 1.0;
    }
    if s <= 0.0 {
        return 0.0;
    }
    (1.0 + F * (t / s)).powf(C)
}

/// Days until recall probability decays to `r_d`.
pub fn interval(r_d: Recall, s: Stability) -> T {
    (s / F) * (r_d.powf(1.0 / C) - 1.0)
}

pub fn initial_stability(w: &Weights, g: Rating) -> Stability {
    let s = match g {
        Rating::Again => w[0],
        Rating::Hard => w[1],
        Rating::Good => w[2],
        Rating::Easy => w[3],
    };
    s.max(MIN_STABILITY)
}

pub fn initial_difficulty(w: &Weights, g: Rating) -> Difficulty {
    let g: f64 = g.into();
    clamp_d(w[4] - f64::exp(w[5] * (g - 1.0)) + 1.0)
}

/// Stability after a review `t` days since the last one, where `r` is the
/// retrievability at the time of review.
pub fn new_stability(w: &Weights, d: Difficulty, s: Stability, r: Recall, g: Rating) -> Stability {
    let s = if g == Rating::Again {
        s_fail(w, d, s, r)
    } else {
        s_success(w, d, s, r, g)
    };
    s.max(MIN_STABILITY)
}

/// Stability after a second review on the same day.
pub fn short_term_stability(w: &Weights, s: Stability, g: Rating) -> Stability {
    let g: f64 = g.into();
    (s * f64::exp(w[17] * (g - 3.0 + w[18]))).max(MIN_STABILITY)
}

pub fn new_difficulty(w: &Weights, d: Difficulty, g: Rating) -> Difficulty {
    clamp_d(w[7] * initial_difficulty(w, Rating::Easy) + (1.0 - w[7]) * dp(w, d, g))
}

fn s_success(w: &Weights, d: Difficulty, s: Stability, r: Recall, g: Rating) -> Stability {
    let t_d = 11.0 - d;
    let t_s = s.powf(-w[9]);
    let t_r = f64::exp(w[10] * (1.0 - r)) - 1.0;
    let h = if g == Rating::Hard { w[15] } else { 1.0 };
    let b = if g == Rating::Easy { w[16] } else { 1.0 };
    let c = f64::exp(w[8]);
    let alpha = 1.0 + t_d * t_s * t_r * h * b * c;
    s * alpha
}

fn s_fail(w: &Weights, d: Difficulty, s: Stability, r: Recall) -> Stability {
    let d_f = d.powf(-w[12]);
    let s_f = (s + 1.0).powf(w[13]) - 1.0;
    let r_f = f64::exp(w[14] * (1.0 - r));
    let c_f = w[11];
    f64::min(d_f * s_f * r_f * c_f, s)
}

fn clamp_d(d: Difficulty) -> Difficulty {
    d.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

fn dp(w: &Weights, d: Difficulty, g: Rating) -> f64 {
    let g: f64 = g.into();
    let delta_d = -w[6] * (g - 3.0);
    d + delta_d * ((10.0 - d) / 9.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &Weights = &DEFAULT_WEIGHTS;

    #[test]
    fn test_retrievability_at_zero() {
        assert_eq!(retrievability(0.0, 3.0), 1.0);
        assert_eq!(retrievability(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_retrievability_at_stability() {
        // By construction, recall is 90% after `s` days.
        let r = retrievability(7.0, 7.0);
        assert!((r - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_interval_inverts_retrievability() {
        let s = 5.0;
        assert!((interval(0.9, s) - s).abs() < 1e-9);
        assert!(interval(0.8, s) > interval(0.9, s));
    }

    #[test]
    fn test_initial_stability_grows_with_rating() {
        let s: Vec<Stability> = Rating::ALL
            .iter()
            .map(|g| initial_stability(W, *g))
            .collect();
        assert!(s.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_initial_difficulty_shrinks_with_rating() {
        let d: Vec<Difficulty> = Rating::ALL
            .iter()
            .map(|g| initial_difficulty(W, *g))
            .collect();
        assert!(d.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(d.iter().all(|d| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d)));
    }

    #[test]
    fn test_stability_increases_on_good() {
        let s = 3.0;
        let r = retrievability(s, s);
        assert!(new_stability(W, 5.0, s, r, Rating::Good) > s);
    }

    #[test]
    fn test_stability_decreases_on_again() {
        let s = 3.0;
        let r = retrievability(s, s);
        assert!(new_stability(W, 5.0, s, r, Rating::Again) < s);
    }

    #[test]
    fn test_easy_beats_good_beats_hard() {
        let s = 10.0;
        let r = retrievability(10.0, s);
        let hard = new_stability(W, 5.0, s, r, Rating::Hard);
        let good = new_stability(W, 5.0, s, r, Rating::Good);
        let easy = new_stability(W, 5.0, s, r, Rating::Easy);
        assert!(hard < good);
        assert!(good < easy);
    }

    #[test]
    fn test_short_term_stability() {
        assert!(short_term_stability(W, 2.0, Rating::Again) < 2.0);
        assert!(short_term_stability(W, 2.0, Rating::Easy) > 2.0);
    }

    #[test]
    fn test_difficulty_clamped() {
        let mut d = initial_difficulty(W, Rating::Again);
        for _ in 0..100 {
            d = new_difficulty(W, d, Rating::Again);
        }
        assert!(d <= MAX_DIFFICULTY);
        let mut d = initial_difficulty(W, Rating::Easy);
        for _ in 0..100 {
            d = new_difficulty(W, d, Rating::Easy);
        }
        assert!(d >= MIN_DIFFICULTY);
    }
}
