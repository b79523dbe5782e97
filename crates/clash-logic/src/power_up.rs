//! Power-up definitions and cooldown bookkeeping

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::choice::Outcome;
use crate::error::ParseError;
use crate::resolver::Points;

/// Power-up type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Turn a loss into a draw.
    Shield,
    /// A win is worth two points.
    DoubleDamage,
    /// Turn a loss into a win.
    Reversal,
    /// See the opponent's move, then reroll.
    WildCard,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::DoubleDamage,
        PowerUpKind::Reversal,
        PowerUpKind::WildCard,
    ];

    /// Adjust a base outcome and its default points.
    ///
    /// Wild card never changes the result here; it changes when the
    /// player's choice is committed instead.
    pub fn adjust(self, base: Outcome, points: Points) -> (Outcome, Points) {
        match (self, base) {
            (PowerUpKind::Shield, Outcome::Computer) => (Outcome::Draw, Points::ZERO),
            (PowerUpKind::Reversal, Outcome::Computer) => {
                (Outcome::Player, Points { player: 1, computer: 0 })
            }
            (PowerUpKind::DoubleDamage, Outcome::Player) => {
                (Outcome::Player, Points { player: 2, computer: 0 })
            }
            _ => (base, points),
        }
    }

    /// Rounds before the power-up can be used again
    pub fn cooldown(self) -> u8 {
        match self {
            PowerUpKind::Shield => 3,
            PowerUpKind::DoubleDamage => 0,
            PowerUpKind::Reversal => 5,
            PowerUpKind::WildCard => 5,
        }
    }

    /// Usage cap, `None` for unlimited
    pub fn max_uses(self) -> Option<u8> {
        match self {
            PowerUpKind::DoubleDamage => Some(1),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::DoubleDamage => "Double Damage",
            PowerUpKind::Reversal => "Reversal",
            PowerUpKind::WildCard => "Wild Card",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Turn a loss into a draw",
            PowerUpKind::DoubleDamage => "Win grants +2 points",
            PowerUpKind::Reversal => "Turn a loss into a win",
            PowerUpKind::WildCard => "Reroll after seeing opponent move",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "🛡️",
            PowerUpKind::DoubleDamage => "💥",
            PowerUpKind::Reversal => "🔄",
            PowerUpKind::WildCard => "🎲",
        }
    }

    /// Serialized identifier (`doubleDamage`, `wildCard`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::DoubleDamage => "doubleDamage",
            PowerUpKind::Reversal => "reversal",
            PowerUpKind::WildCard => "wildCard",
        }
    }
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerUpKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerUpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseError::PowerUp(s.to_string()))
    }
}

/// Remaining uses of a power-up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Uses {
    Unlimited,
    Limited(u8),
}

impl Uses {
    pub fn any_left(self) -> bool {
        match self {
            Uses::Unlimited => true,
            Uses::Limited(n) => n > 0,
        }
    }

    fn spend(self) -> Self {
        match self {
            Uses::Unlimited => Uses::Unlimited,
            Uses::Limited(n) => Uses::Limited(n.saturating_sub(1)),
        }
    }
}

/// A power-up and its mutable cooldown/usage state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub cooldown: u8,
    pub max_uses: Option<u8>,
    pub current_cooldown: u8,
    pub uses_left: Uses,
}

impl PowerUp {
    /// Fresh power-up, ready to use
    pub fn new(kind: PowerUpKind) -> Self {
        let max_uses = kind.max_uses();
        Self {
            kind,
            cooldown: kind.cooldown(),
            max_uses,
            current_cooldown: 0,
            uses_left: max_uses.map_or(Uses::Unlimited, Uses::Limited),
        }
    }

    /// Off cooldown with uses left
    pub fn is_available(&self) -> bool {
        self.current_cooldown == 0 && self.uses_left.any_left()
    }

    /// One round has passed
    pub fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }

    /// The power-up was active in the round just resolved
    pub fn consume(&mut self) {
        self.current_cooldown = self.cooldown;
        self.uses_left = self.uses_left.spend();
    }
}

/// The full set, in catalogue order
pub fn initial_power_ups() -> Vec<PowerUp> {
    PowerUpKind::ALL.into_iter().map(PowerUp::new).collect()
}

/// End-of-round bookkeeping: tick every cooldown, then charge the
/// power-up that was active.
pub fn settle_power_ups(power_ups: &mut [PowerUp], active: Option<PowerUpKind>) {
    for power_up in power_ups.iter_mut() {
        power_up.tick();
    }
    if let Some(kind) = active {
        if let Some(power_up) = power_ups.iter_mut().find(|p| p.kind == kind) {
            power_up.consume();
        }
    }
}
