//! Round resolution

use serde::{Deserialize, Serialize};
use crate::choice::{determine_winner, Choice, Outcome};
use crate::power_up::PowerUpKind;

/// Points awarded for one round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub player: u8,
    pub computer: u8,
}

impl Points {
    pub const ZERO: Points = Points { player: 0, computer: 0 };

    /// Default award for a base outcome
    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Player => Points { player: 1, computer: 0 },
            Outcome::Computer => Points { player: 0, computer: 1 },
            Outcome::Draw => Points::ZERO,
        }
    }
}

/// Result of a single round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    /// Outcome after the power-up was applied
    pub winner: Outcome,
    pub player_choice: Choice,
    pub computer_choice: Choice,
    pub points: Points,
    pub power_up: Option<PowerUpKind>,
}

impl RoundResult {
    /// One-line summary for the match log, e.g. `R3: ✊ vs ✌️ [SHIELD] - WIN! +1pts`
    pub fn summary(&self) -> String {
        let mut entry = format!(
            "R{}: {} vs {}",
            self.round,
            self.player_choice.hand(),
            self.computer_choice.hand()
        );

        if let Some(kind) = self.power_up {
            entry.push_str(&format!(" [{}]", kind.as_str().to_uppercase()));
        }

        match self.winner {
            Outcome::Draw => entry.push_str(" - DRAW"),
            Outcome::Player => entry.push_str(&format!(" - WIN! +{}pts", self.points.player)),
            Outcome::Computer => entry.push_str(&format!(" - LOSE +{}pts", self.points.computer)),
        }

        entry
    }
}

/// Resolve one round
///
/// Pure: the base outcome is computed first, then the active power-up (if
/// any) adjusts outcome and points. The round number is left at 0 for the
/// caller to stamp.
pub fn resolve_round(
    player_choice: Choice,
    computer_choice: Choice,
    active: Option<PowerUpKind>,
) -> RoundResult {
    let base = determine_winner(player_choice, computer_choice);
    let points = Points::for_outcome(base);

    let (winner, points) = match active {
        Some(kind) => kind.adjust(base, points),
        None => (base, points),
    };

    RoundResult {
        round: 0,
        winner,
        player_choice,
        computer_choice,
        points,
        power_up: active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINS: [(Choice, Choice); 3] = [
        (Choice::Rock, Choice::Scissors),
        (Choice::Scissors, Choice::Paper),
        (Choice::Paper, Choice::Rock),
    ];

    #[test]
    fn test_no_power_up_points() {
        for (p, c) in WINS {
            let win = resolve_round(p, c, None);
            assert_eq!(win.winner, Outcome::Player);
            assert_eq!(win.points, Points { player: 1, computer: 0 });

            let loss = resolve_round(c, p, None);
            assert_eq!(loss.winner, Outcome::Computer);
            assert_eq!(loss.points, Points { player: 0, computer: 1 });
        }
        for c in Choice::ALL {
            let draw = resolve_round(c, c, None);
            assert_eq!(draw.winner, Outcome::Draw);
            assert_eq!(draw.points, Points::ZERO);
        }
    }

    #[test]
    fn test_shield_turns_loss_into_draw() {
        for (p, c) in WINS {
            let result = resolve_round(c, p, Some(PowerUpKind::Shield));
            assert_eq!(result.winner, Outcome::Draw);
            assert_eq!(result.points, Points::ZERO);
            assert_eq!(result.power_up, Some(PowerUpKind::Shield));
        }
    }

    #[test]
    fn test_reversal_turns_loss_into_win() {
        for (p, c) in WINS {
            let result = resolve_round(c, p, Some(PowerUpKind::Reversal));
            assert_eq!(result.winner, Outcome::Player);
            assert_eq!(result.points, Points { player: 1, computer: 0 });
        }
    }

    #[test]
    fn test_double_damage_on_win() {
        for (p, c) in WINS {
            let result = resolve_round(p, c, Some(PowerUpKind::DoubleDamage));
            assert_eq!(result.winner, Outcome::Player);
            assert_eq!(result.points, Points { player: 2, computer: 0 });
        }
    }

    #[test]
    fn test_double_damage_does_not_soften_loss() {
        let result = resolve_round(Choice::Rock, Choice::Paper, Some(PowerUpKind::DoubleDamage));
        assert_eq!(result.winner, Outcome::Computer);
        assert_eq!(result.points, Points { player: 0, computer: 1 });
    }

    #[test]
    fn test_wild_card_is_neutral() {
        for p in Choice::ALL {
            for c in Choice::ALL {
                let plain = resolve_round(p, c, None);
                let wild = resolve_round(p, c, Some(PowerUpKind::WildCard));
                assert_eq!(plain.winner, wild.winner);
                assert_eq!(plain.points, wild.points);
            }
        }
    }

    #[test]
    fn test_summary_format() {
        let mut result = resolve_round(Choice::Rock, Choice::Scissors, Some(PowerUpKind::DoubleDamage));
        result.round = 3;
        assert_eq!(result.summary(), "R3: ✊ vs ✌️ [DOUBLEDAMAGE] - WIN! +2pts");

        let mut result = resolve_round(Choice::Paper, Choice::Scissors, None);
        result.round = 1;
        assert_eq!(result.summary(), "R1: ✋ vs ✌️ - LOSE +1pts");

        let mut result = resolve_round(Choice::Paper, Choice::Scissors, Some(PowerUpKind::Shield));
        result.round = 2;
        assert_eq!(result.summary(), "R2: ✋ vs ✌️ [SHIELD] - DRAW");
    }

    fn any_choice() -> impl Strategy<Value = Choice> {
        prop::sample::select(Choice::ALL.to_vec())
    }

    fn any_power_up() -> impl Strategy<Value = Option<PowerUpKind>> {
        prop::option::of(prop::sample::select(PowerUpKind::ALL.to_vec()))
    }

    proptest! {
        #[test]
        fn prop_points_are_one_of_the_defined_awards(
            p in any_choice(),
            c in any_choice(),
            active in any_power_up(),
        ) {
            let result = resolve_round(p, c, active);
            let allowed = [
                Points::ZERO,
                Points { player: 1, computer: 0 },
                Points { player: 0, computer: 1 },
                Points { player: 2, computer: 0 },
            ];
            prop_assert!(allowed.contains(&result.points));
            prop_assert_eq!(result.player_choice, p);
            prop_assert_eq!(result.computer_choice, c);
            prop_assert_eq!(result.power_up, active);
        }

        #[test]
        fn prop_power_up_never_hurts_player(
            p in any_choice(),
            c in any_choice(),
            active in any_power_up(),
        ) {
            let plain = resolve_round(p, c, None);
            let boosted = resolve_round(p, c, active);
            prop_assert!(boosted.points.player >= plain.points.player);
            prop_assert!(boosted.points.computer <= plain.points.computer);
        }
    }
}
