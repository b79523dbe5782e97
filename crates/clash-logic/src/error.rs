//! Rejection and parse errors
//!
//! Nothing in a match is fatal. An event that is illegal in the current
//! phase comes back as a [`Rejection`] and leaves the state untouched.

use thiserror::Error;
use crate::power_up::PowerUpKind;

/// Why an event was ignored
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("no match in progress, pick a difficulty first")]
    NoMatchInProgress,
    #[error("difficulty is fixed once the match has started")]
    MatchAlreadyStarted,
    #[error("a round is still in progress")]
    RoundInProgress,
    #[error("reroll is only allowed while a wild card reveal is pending")]
    NotAwaitingReveal,
    #[error("nothing to settle, no round is resolving")]
    NotResolving,
    #[error("settle ticket {0} belongs to an earlier round")]
    StaleSettle(u64),
    #[error("the match is over")]
    MatchOver,
    #[error("{0:?} is on cooldown or out of uses")]
    PowerUpUnavailable(PowerUpKind),
    #[error("{0:?} is already active")]
    PowerUpAlreadyActive(PowerUpKind),
}

/// Unknown name handed in by the presentation layer
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown choice: {0}")]
    Choice(String),
    #[error("unknown difficulty: {0}")]
    Difficulty(String),
    #[error("unknown power-up: {0}")]
    PowerUp(String),
}
