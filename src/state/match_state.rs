//! The match record.
//!
//! A `Match` owns its phase, both combatant seats, the selection
//! deadline, series bookkeeping and history. Transitions live in
//! `rules` (turn protocol) and `series` (game chaining); this module only
//! holds the data and the accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Combatant, CombatantId, MatchConfig, Pair, Side};

use super::history::{HistoryEvent, HistoryLog};

/// Identifier of a match, assigned by the session registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    /// Create a new match ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Match phase.
///
/// `Waiting -> Selection -> Resolution -> (Selection | Ended)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Fewer than two combatants seated.
    Waiting,
    /// Both combatants choosing their three cards.
    Selection,
    /// The turn is being resolved.
    Resolution,
    /// Terminal for the current game.
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Waiting => write!(f, "waiting"),
            Phase::Selection => write!(f, "selection"),
            Phase::Resolution => write!(f, "resolution"),
            Phase::Ended => write!(f, "ended"),
        }
    }
}

/// One match, possibly the current game of a series.
#[derive(Clone, Debug)]
pub struct Match {
    pub(crate) id: MatchId,
    pub(crate) phase: Phase,
    pub(crate) turn_number: u32,
    pub(crate) combatants: Pair<Option<Combatant>>,
    pub(crate) deadline: Option<DateTime<Utc>>,
    pub(crate) config: MatchConfig,
    /// Current game of the series (1-based).
    pub(crate) game_index: u32,
    pub(crate) series_score: Pair<u32>,
    pub(crate) series_complete: bool,
    pub(crate) series_winner: Option<CombatantId>,
    pub(crate) winner: Option<CombatantId>,
    /// Set once the match is terminal; drives grace-period reaping.
    pub(crate) ended_at: Option<DateTime<Utc>>,
    pub(crate) history: HistoryLog,
}

impl Match {
    /// Create an empty match waiting for combatants.
    ///
    /// The configuration is assumed valid (see `MatchConfig::validate`).
    #[must_use]
    pub fn new(id: MatchId, config: MatchConfig, now: DateTime<Utc>) -> Self {
        let mut created = Self {
            id,
            phase: Phase::Waiting,
            turn_number: 1,
            combatants: Pair::new(None, None),
            deadline: None,
            config,
            game_index: 1,
            series_score: Pair::with_value(0),
            series_complete: false,
            series_winner: None,
            winner: None,
            ended_at: None,
            history: HistoryLog::new(),
        };
        created.record(now, HistoryEvent::Created);
        created
    }

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Current game number within the series (1-based).
    #[must_use]
    pub fn game_number(&self) -> u32 {
        self.game_index
    }

    #[must_use]
    pub fn series_score(&self) -> &Pair<u32> {
        &self.series_score
    }

    #[must_use]
    pub fn is_series_complete(&self) -> bool {
        self.series_complete
    }

    #[must_use]
    pub fn series_winner(&self) -> Option<CombatantId> {
        self.series_winner
    }

    /// Winner of the current game, once it has ended.
    #[must_use]
    pub fn winner(&self) -> Option<CombatantId> {
        self.winner
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The combatant in a seat, if seated.
    #[must_use]
    pub fn combatant(&self, side: Side) -> Option<&Combatant> {
        self.combatants[side].as_ref()
    }

    /// Seated combatants, in seating order.
    pub fn combatants(&self) -> impl Iterator<Item = (Side, &Combatant)> {
        self.combatants
            .iter()
            .filter_map(|(side, c)| c.as_ref().map(|c| (side, c)))
    }

    /// Number of seated combatants.
    #[must_use]
    pub fn seated(&self) -> usize {
        self.combatants().count()
    }

    /// The seat a combatant occupies.
    #[must_use]
    pub fn side_of(&self, id: CombatantId) -> Option<Side> {
        self.combatants()
            .find(|(_, c)| c.id == id)
            .map(|(side, _)| side)
    }

    /// Whether nothing further will happen in this match.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub(crate) fn record(&mut self, at: DateTime<Utc>, event: HistoryEvent) {
        self.history.record(at, self.game_index, self.turn_number, event);
    }

    pub(crate) fn arm_deadline(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now + self.config.turn_time_limit());
    }

    /// Take both combatants out of their seats. Returns `None` (leaving the
    /// seats untouched) unless both are present.
    pub(crate) fn take_duel(&mut self) -> Option<Pair<Combatant>> {
        if self.seated() < 2 {
            return None;
        }
        let first = self.combatants[Side::First].take()?;
        let second = self.combatants[Side::Second].take()?;
        Some(Pair::new(first, second))
    }

    pub(crate) fn restore_duel(&mut self, duel: Pair<Combatant>) {
        let (first, second) = duel.into_parts();
        self.combatants = Pair::new(Some(first), Some(second));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_is_waiting() {
        let m = Match::new(MatchId::new(3), MatchConfig::default(), DateTime::<Utc>::UNIX_EPOCH);

        assert_eq!(m.id(), MatchId::new(3));
        assert_eq!(m.phase(), Phase::Waiting);
        assert_eq!(m.turn_number(), 1);
        assert_eq!(m.game_number(), 1);
        assert_eq!(m.seated(), 0);
        assert!(m.deadline().is_none());
        assert!(!m.is_terminal());
        assert_eq!(m.history().len(), 1);
    }

    #[test]
    fn test_take_duel_requires_both() {
        let mut m =
            Match::new(MatchId::new(1), MatchConfig::default(), DateTime::<Utc>::UNIX_EPOCH);
        m.combatants[Side::First] = Some(Combatant::new(CombatantId::new(1), "A", 10));

        assert!(m.take_duel().is_none());
        assert_eq!(m.seated(), 1);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Selection.to_string(), "selection");
        assert_eq!(MatchId::new(9).to_string(), "Match(9)");
    }
}
