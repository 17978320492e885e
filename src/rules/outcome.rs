//! Turn and match results.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{Combatant, CombatantId, Pair, Side};
use crate::effects::{EffectOutcome, StatusOutcome};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    HealthDepleted,
    Draw,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// One side's opponent reached zero health.
    Winner { side: Side, combatant: CombatantId },
    /// Both reached zero health in the same check.
    Draw,
}

impl MatchOutcome {
    /// Win condition: both at zero is a draw, exactly one at zero loses,
    /// otherwise the game continues.
    #[must_use]
    pub fn evaluate(duel: &Pair<Combatant>) -> Option<Self> {
        match (duel[Side::First].is_depleted(), duel[Side::Second].is_depleted()) {
            (true, true) => Some(MatchOutcome::Draw),
            (true, false) => Some(MatchOutcome::Winner {
                side: Side::Second,
                combatant: duel[Side::Second].id,
            }),
            (false, true) => Some(MatchOutcome::Winner {
                side: Side::First,
                combatant: duel[Side::First].id,
            }),
            (false, false) => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> EndReason {
        match self {
            MatchOutcome::Winner { .. } => EndReason::HealthDepleted,
            MatchOutcome::Draw => EndReason::Draw,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<CombatantId> {
        match self {
            MatchOutcome::Winner { combatant, .. } => Some(*combatant),
            MatchOutcome::Draw => None,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, MatchOutcome::Winner { side: s, .. } if *s == side)
    }
}

/// What the series did after a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesTransition {
    /// Single game or draw: the match is terminal.
    Ended,
    /// A side reached the wins needed.
    SeriesEnded { winner: CombatantId },
    /// A fresh game started.
    NextGame { game: u32 },
}

/// One resolved step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// 1..=3
    pub step: u8,
    pub cards: Pair<CardId>,
    pub outcomes: Pair<Vec<EffectOutcome>>,
}

/// Everything that happened while resolving one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub game: u32,
    pub turn_number: u32,
    pub status: Pair<Vec<StatusOutcome>>,
    /// Steps actually resolved; fewer than three when the game ended early.
    pub steps: Vec<StepReport>,
    pub end_of_turn: Pair<Vec<EffectOutcome>>,
    pub outcome: Option<MatchOutcome>,
    pub series: Option<SeriesTransition>,
}

impl TurnReport {
    pub(crate) fn new(game: u32, turn_number: u32) -> Self {
        Self {
            game,
            turn_number,
            status: Pair::default(),
            steps: Vec::with_capacity(3),
            end_of_turn: Pair::default(),
            outcome: None,
            series: None,
        }
    }
}

/// Result of a successful selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the opponent has not selected yet.
    WaitingForOpponent,
    /// Stored, and the turn resolved.
    Resolved(TurnReport),
}
