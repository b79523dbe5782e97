//! Computer opponent

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use crate::choice::Choice;
use crate::error::ParseError;
use crate::random::SeededRng;

/// How many of the latest player choices the predictor looks at
pub const PREDICTION_WINDOW: usize = 3;

/// Below this much history the hard opponent plays at random
pub const MIN_HISTORY: usize = 2;

/// Percentage chance the hard opponent plays the counter move
pub const COUNTER_PERCENT: u8 = 70;

/// Opponent difficulty, fixed for a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random.
    Easy,
    /// Predicts the player's most frequent recent move and counters it.
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseError::Difficulty(other.to_string())),
        }
    }
}

/// Most frequent of the player's recent choices
///
/// Returns `None` when there is too little history to predict from. Ties go
/// to the earliest choice in rock, paper, scissors order.
pub fn predict_player_move(history: &[Choice]) -> Option<Choice> {
    if history.len() < MIN_HISTORY {
        return None;
    }

    let recent = &history[history.len().saturating_sub(PREDICTION_WINDOW)..];
    let mut tally = [0usize; 3];
    for choice in recent {
        tally[choice.index()] += 1;
    }

    Choice::ALL
        .into_iter()
        .reduce(|best, next| if tally[next.index()] > tally[best.index()] { next } else { best })
}

/// Pick the computer's move for the coming round
///
/// # Arguments
/// * `difficulty` - Opponent level
/// * `history` - The player's recent choices, oldest first
/// * `rng` - Random number generator for this match
pub fn choose_computer_move(
    difficulty: Difficulty,
    history: &[Choice],
    rng: &mut SeededRng,
) -> Choice {
    match difficulty {
        Difficulty::Easy => rng.next_choice(),
        Difficulty::Hard => match predict_player_move(history) {
            None => rng.next_choice(),
            Some(predicted) => {
                // Stay beatable: part of the time, play at random
                if rng.next_percent() < COUNTER_PERCENT {
                    debug!("predicted {}, countering with {}", predicted, predicted.counter());
                    predicted.counter()
                } else {
                    rng.next_choice()
                }
            }
        },
    }
}
