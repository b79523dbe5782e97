//! Match state machine
//!
//! A [`MatchState`] is owned by one session and changed only through
//! [`MatchState::apply`], one [`Event`] at a time. Events that make no
//! sense in the current [`Phase`] are rejected and leave the state as it
//! was, version included.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::choice::Choice;
use crate::error::Rejection;
use crate::power_up::{initial_power_ups, settle_power_ups, PowerUp, PowerUpKind};
use crate::random::SeededRng;
use crate::resolver::{resolve_round, RoundResult};
use crate::strategy::{choose_computer_move, Difficulty};

/// Match parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    /// First side to reach this score takes the match
    pub winning_score: u32,
    /// Player choices remembered for the opponent
    pub history_len: usize,
    /// How long the host shows a resolved round before sending `Settle`
    pub settle_delay_ms: u32,
}

impl MatchConfig {
    /// First to five, ten remembered moves, three second pause
    pub fn standard() -> Self {
        Self { winning_score: 5, history_len: 10, settle_delay_ms: 3000 }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Winner of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Computer => "Computer",
        }
    }
}

/// Where the match is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Phase {
    SelectingDifficulty,
    Choosing,
    /// Wild card: the computer has committed and the player may pick again
    AwaitingReveal { player: Choice, computer: Choice },
    /// Round resolved, waiting out the display delay. Only a `Settle`
    /// carrying this ticket ends it.
    Resolving { ticket: u64 },
    MatchOver { winner: Side },
}

/// Input from the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    SelectDifficulty(Difficulty),
    SelectChoice(Choice),
    ActivatePowerUp(PowerUpKind),
    Reroll(Choice),
    /// The post-round delay for the resolution holding `ticket` has elapsed
    Settle { ticket: u64 },
    Restart,
}

/// What an accepted event did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Started { difficulty: Difficulty },
    PowerUpArmed { power_up: PowerUpKind },
    Revealed { computer: Choice },
    /// Schedule `Event::Settle { ticket }` after the display delay
    Resolved { result: RoundResult, ticket: u64 },
    MatchEnded { result: RoundResult, winner: Side },
    Settled,
    Restarted,
}

/// Complete state of one match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    config: MatchConfig,
    version: u64,
    phase: Phase,
    difficulty: Option<Difficulty>,
    player_score: u32,
    computer_score: u32,
    round: u32,
    power_ups: Vec<PowerUp>,
    active_power_up: Option<PowerUpKind>,
    log: Vec<String>,
    last_result: Option<RoundResult>,
    history: Vec<Choice>,
}

impl MatchState {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            version: 0,
            phase: Phase::SelectingDifficulty,
            difficulty: None,
            player_score: 0,
            computer_score: 0,
            round: 1,
            power_ups: initial_power_ups(),
            active_power_up: None,
            log: Vec::new(),
            last_result: None,
            history: Vec::with_capacity(config.history_len + 1),
        }
    }

    /// Apply one event
    ///
    /// On `Err` nothing has changed. The computer's move, when one is
    /// needed, is drawn from `rng`.
    pub fn apply(&mut self, event: Event, rng: &mut SeededRng) -> Result<Transition, Rejection> {
        let outcome = match event {
            Event::SelectDifficulty(difficulty) => self.select_difficulty(difficulty),
            Event::SelectChoice(choice) => self.select_choice(choice, rng),
            Event::ActivatePowerUp(kind) => self.activate_power_up(kind),
            Event::Reroll(choice) => self.reroll(choice),
            Event::Settle { ticket } => self.settle(ticket),
            Event::Restart => Ok(self.restart()),
        };

        match &outcome {
            Ok(_) => self.version += 1,
            Err(reason) => debug!("ignored {:?}: {}", event, reason),
        }
        outcome
    }

    fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<Transition, Rejection> {
        if self.phase != Phase::SelectingDifficulty {
            return Err(Rejection::MatchAlreadyStarted);
        }

        info!("match started on {}", difficulty);
        self.difficulty = Some(difficulty);
        self.phase = Phase::Choosing;
        self.log.push(format!("Game started in {} mode!", difficulty.as_str().to_uppercase()));
        Ok(Transition::Started { difficulty })
    }

    fn expect_choosing(&self) -> Result<Difficulty, Rejection> {
        match self.phase {
            Phase::Choosing => self.difficulty.ok_or(Rejection::NoMatchInProgress),
            Phase::SelectingDifficulty => Err(Rejection::NoMatchInProgress),
            Phase::AwaitingReveal { .. } | Phase::Resolving { .. } => Err(Rejection::RoundInProgress),
            Phase::MatchOver { .. } => Err(Rejection::MatchOver),
        }
    }

    fn select_choice(&mut self, choice: Choice, rng: &mut SeededRng) -> Result<Transition, Rejection> {
        let difficulty = self.expect_choosing()?;
        let computer = choose_computer_move(difficulty, &self.history, rng);

        if self.active_power_up == Some(PowerUpKind::WildCard) {
            self.phase = Phase::AwaitingReveal { player: choice, computer };
            return Ok(Transition::Revealed { computer });
        }

        Ok(self.resolve(choice, computer))
    }

    fn activate_power_up(&mut self, kind: PowerUpKind) -> Result<Transition, Rejection> {
        self.expect_choosing()?;
        if self.active_power_up == Some(kind) {
            return Err(Rejection::PowerUpAlreadyActive(kind));
        }

        let available = self
            .power_ups
            .iter()
            .any(|p| p.kind == kind && p.is_available());
        if !available {
            return Err(Rejection::PowerUpUnavailable(kind));
        }

        self.active_power_up = Some(kind);
        Ok(Transition::PowerUpArmed { power_up: kind })
    }

    fn reroll(&mut self, choice: Choice) -> Result<Transition, Rejection> {
        match self.phase {
            Phase::AwaitingReveal { computer, .. } => Ok(self.resolve(choice, computer)),
            _ => Err(Rejection::NotAwaitingReveal),
        }
    }

    fn settle(&mut self, ticket: u64) -> Result<Transition, Rejection> {
        match self.phase {
            Phase::Resolving { ticket: pending } if pending == ticket => {}
            Phase::Resolving { .. } => return Err(Rejection::StaleSettle(ticket)),
            _ => return Err(Rejection::NotResolving),
        }
        self.phase = Phase::Choosing;
        Ok(Transition::Settled)
    }

    fn restart(&mut self) -> Transition {
        let version = self.version;
        *self = Self::new(self.config);
        self.version = version;
        Transition::Restarted
    }

    /// Resolve the round and do the end-of-round bookkeeping. Order matters:
    /// score, cooldowns, active slot, log, history, round counter, match end.
    fn resolve(&mut self, player: Choice, computer: Choice) -> Transition {
        let active = self.active_power_up;
        let mut result = resolve_round(player, computer, active);
        result.round = self.round;

        self.player_score += u32::from(result.points.player);
        self.computer_score += u32::from(result.points.computer);

        settle_power_ups(&mut self.power_ups, active);
        self.active_power_up = None;

        self.log.push(result.summary());

        self.history.push(player);
        if self.history.len() > self.config.history_len {
            let excess = self.history.len() - self.config.history_len;
            self.history.drain(..excess);
        }

        self.round += 1;
        self.last_result = Some(result.clone());

        debug!(
            "round {}: {} vs {} -> {:?} ({}-{})",
            result.round, player, computer, result.winner, self.player_score, self.computer_score
        );

        match self.winner() {
            Some(winner) => {
                info!("match over, {:?} wins {}-{}", winner, self.player_score, self.computer_score);
                self.phase = Phase::MatchOver { winner };
                self.log.push(format!("Game Over! {} wins!", winner.label()));
                Transition::MatchEnded { result, winner }
            }
            None => {
                // the version this state reaches once the resolving event is
                // accepted; versions never repeat, restarts included
                let ticket = self.version + 1;
                self.phase = Phase::Resolving { ticket };
                Transition::Resolved { result, ticket }
            }
        }
    }

    /// The side that has reached the winning score, if any
    pub fn winner(&self) -> Option<Side> {
        if self.player_score >= self.config.winning_score {
            Some(Side::Player)
        } else if self.computer_score >= self.config.winning_score {
            Some(Side::Computer)
        } else {
            None
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticket the host must hand back with `Settle`, while a round is resolving
    pub fn pending_settle(&self) -> Option<u64> {
        match self.phase {
            Phase::Resolving { ticket } => Some(ticket),
            _ => None,
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// (player, computer)
    pub fn scores(&self) -> (u32, u32) {
        (self.player_score, self.computer_score)
    }

    /// Number of the round about to be played
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn power_up(&self, kind: PowerUpKind) -> Option<&PowerUp> {
        self.power_ups.iter().find(|p| p.kind == kind)
    }

    pub fn active_power_up(&self) -> Option<PowerUpKind> {
        self.active_power_up
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Player's recent choices, oldest first
    pub fn history(&self) -> &[Choice] {
        &self.history
    }

    /// Render-ready copy of the state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            phase: self.phase,
            difficulty: self.difficulty,
            player_score: self.player_score,
            computer_score: self.computer_score,
            round: self.round,
            power_ups: self.power_ups.iter().map(PowerUpView::from).collect(),
            active_power_up: self.active_power_up,
            log: self.log.clone(),
            last_result: self.last_result.clone(),
            settle_delay_ms: self.config.settle_delay_ms,
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchConfig::standard())
    }
}

/// Power-up as the presentation layer sees it
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUpView {
    #[serde(flatten)]
    pub power_up: PowerUp,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub available: bool,
}

impl From<&PowerUp> for PowerUpView {
    fn from(power_up: &PowerUp) -> Self {
        Self {
            power_up: *power_up,
            name: power_up.kind.name(),
            description: power_up.kind.description(),
            icon: power_up.kind.icon(),
            available: power_up.is_available(),
        }
    }
}

/// Everything needed to draw the board after an event
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u64,
    pub phase: Phase,
    pub difficulty: Option<Difficulty>,
    pub player_score: u32,
    pub computer_score: u32,
    pub round: u32,
    pub power_ups: Vec<PowerUpView>,
    pub active_power_up: Option<PowerUpKind>,
    pub log: Vec<String>,
    pub last_result: Option<RoundResult>,
    pub settle_delay_ms: u32,
}
