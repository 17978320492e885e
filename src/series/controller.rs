//! Best-of-N chaining of games within one match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{CombatantId, Side};
use crate::rules::{MatchOutcome, SeriesTransition};
use crate::state::{HistoryEvent, Match, Phase};

/// Series standing, derived from the score and the configuration alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStatus {
    pub wins_needed: u32,
    pub wins_first: u32,
    pub wins_second: u32,
    pub total_played: u32,
    pub current_game_number: u32,
    pub is_complete: bool,
    pub winner: Option<CombatantId>,
    /// Human-readable standing, e.g. `"1-0 (best of 3)"`.
    pub summary: String,
    pub games_remaining: u32,
}

/// Decides what happens to a match after one of its games ends.
pub struct SeriesController;

impl SeriesController {
    /// Consume a finished game.
    ///
    /// Single games and draws leave the match terminal. A win counts
    /// towards the series; the series ends once a side reaches the wins
    /// needed, otherwise both combatants are reset and the next game opens.
    pub fn on_match_ended(
        m: &mut Match,
        outcome: &MatchOutcome,
        now: DateTime<Utc>,
    ) -> SeriesTransition {
        let (side, winner) = match *outcome {
            MatchOutcome::Winner { side, combatant } if m.config.best_of > 1 => (side, combatant),
            _ => {
                m.ended_at = Some(now);
                return SeriesTransition::Ended;
            }
        };

        m.series_score[side] += 1;

        if m.series_score[side] >= m.config.wins_needed() {
            m.series_complete = true;
            m.series_winner = Some(winner);
            m.ended_at = Some(now);
            let score = m.series_score.clone();
            log::info!(
                "{} series won by {} ({}-{})",
                m.id,
                winner,
                score[Side::First],
                score[Side::Second]
            );
            m.record(now, HistoryEvent::SeriesEnded { winner, score });
            return SeriesTransition::SeriesEnded { winner };
        }

        let max_health = m.config.max_health;
        for combatant in m.combatants.values_mut().flatten() {
            combatant.reset_for_new_game(max_health);
        }
        m.game_index += 1;
        m.turn_number = 1;
        m.winner = None;
        m.phase = Phase::Selection;
        m.arm_deadline(now);

        let game = m.game_index;
        let score = m.series_score.clone();
        log::info!("{} starting game {}", m.id, game);
        m.record(now, HistoryEvent::NextGameStarted { game, score });
        SeriesTransition::NextGame { game }
    }

    /// Current standing of the series.
    #[must_use]
    pub fn series_status(m: &Match) -> SeriesStatus {
        let wins_needed = m.config.wins_needed();
        let wins_first = m.series_score[Side::First];
        let wins_second = m.series_score[Side::Second];
        let total_played = wins_first + wins_second;
        let is_complete = wins_first >= wins_needed || wins_second >= wins_needed;

        let summary = if is_complete {
            format!("{wins_first}-{wins_second} (series over)")
        } else {
            format!("{wins_first}-{wins_second} (best of {})", m.config.best_of)
        };

        SeriesStatus {
            wins_needed,
            wins_first,
            wins_second,
            total_played,
            current_game_number: m.game_index,
            is_complete,
            winner: m.series_winner,
            summary,
            games_remaining: if is_complete {
                0
            } else {
                m.config.best_of.saturating_sub(total_played)
            },
        }
    }
}
