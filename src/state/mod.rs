//! Match state: the match record, its history and its public projection.

pub mod match_state;
pub mod history;
pub mod projection;

pub use match_state::{Match, MatchId, Phase};
pub use history::{HistoryEntry, HistoryEvent, HistoryLog};
pub use projection::{CombatantView, MatchView};
