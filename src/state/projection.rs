//! Read-only projection of a match for the surrounding service layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{CombatantId, Pair, Side, StatusEffect};
use crate::series::{SeriesController, SeriesStatus};

use super::match_state::{Match, MatchId, Phase};

/// Public view of one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantView {
    pub side: Side,
    pub id: CombatantId,
    pub name: String,
    pub health: u32,
    pub charges: u32,
    pub status_effects: Vec<StatusEffect>,
    pub ready: bool,
}

/// Public view of a match. Selected cards are never exposed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub phase: Phase,
    pub turn_number: u32,
    pub game_number: u32,
    pub combatants: Vec<CombatantView>,
    pub deadline: Option<DateTime<Utc>>,
    pub series_score: Pair<u32>,
    pub series_status: SeriesStatus,
    pub winner: Option<CombatantId>,
}

impl Match {
    /// Project the match into its public view.
    #[must_use]
    pub fn view(&self) -> MatchView {
        MatchView {
            id: self.id,
            phase: self.phase,
            turn_number: self.turn_number,
            game_number: self.game_index,
            combatants: self
                .combatants()
                .map(|(side, c)| CombatantView {
                    side,
                    id: c.id,
                    name: c.name.clone(),
                    health: c.health,
                    charges: c.charges,
                    status_effects: c.status_effects.to_vec(),
                    ready: c.ready,
                })
                .collect(),
            deadline: self.deadline,
            series_score: self.series_score.clone(),
            series_status: SeriesController::series_status(self),
            winner: self.winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    #[test]
    fn test_view_of_empty_match() {
        let m = Match::new(
            MatchId::new(1),
            MatchConfig::default().with_best_of(3),
            DateTime::<Utc>::UNIX_EPOCH,
        );
        let view = m.view();

        assert_eq!(view.phase, Phase::Waiting);
        assert!(view.combatants.is_empty());
        assert_eq!(view.series_status.wins_needed, 2);
        assert!(view.winner.is_none());
    }

    #[test]
    fn test_view_serializes() {
        let m = Match::new(MatchId::new(1), MatchConfig::default(), DateTime::<Utc>::UNIX_EPOCH);
        let json = serde_json::to_value(m.view()).unwrap();

        assert_eq!(json["phase"], "Waiting");
        assert_eq!(json["turn_number"], 1);
    }
}
