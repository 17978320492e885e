//! Append-only record of notable transitions in a match.
//!
//! Backed by `im::Vector` so projections can clone the log in O(1).

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{CombatantId, Pair, Side};
use crate::effects::{EffectOutcome, StatusOutcome};
use crate::rules::{MatchOutcome, StepReport};

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    Created,
    CombatantJoined {
        side: Side,
        combatant: CombatantId,
    },
    SelectionStored {
        side: Side,
    },
    /// Sides that received the default selection.
    TimeoutForced {
        defaulted: Vec<Side>,
    },
    StatusTicked {
        side: Side,
        outcomes: Vec<StatusOutcome>,
    },
    StepResolved(StepReport),
    EndOfTurn {
        side: Side,
        card: CardId,
        repeated_cards: u32,
        outcomes: Vec<EffectOutcome>,
    },
    MatchEnded(MatchOutcome),
    SeriesEnded {
        winner: CombatantId,
        score: Pair<u32>,
    },
    NextGameStarted {
        game: u32,
        score: Pair<u32>,
    },
}

/// One history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    /// Game number within the series (1-based).
    pub game: u32,
    pub turn: u32,
    pub event: HistoryEvent,
}

/// Ordered log of a match's history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vector<HistoryEntry>,
}

impl HistoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&mut self, at: DateTime<Utc>, game: u32, turn: u32, event: HistoryEvent) {
        self.entries.push_back(HistoryEntry {
            at,
            game,
            turn,
            event,
        });
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries matching a predicate.
    pub fn count(&self, predicate: impl Fn(&HistoryEvent) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.event)).count()
    }
}
