//! Error types for rust-duel.
//!
//! Caller-facing failures are classified values. A rejected operation
//! never changes match state.

use thiserror::Error;

use crate::cards::CardId;
use crate::state::MatchId;

/// Why a card cannot be played in a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("insufficient charges: card costs {cost}, combatant has {available}")]
    InsufficientCharges {
        cost: u32,
        available: u32,
    },

    #[error("wrong step: card must be played in step {required}, not step {actual}")]
    WrongStep {
        required: u8,
        actual: u8,
    },
}

/// Errors returned by match operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Match is full")]
    MatchFull,

    #[error("Match is not accepting this action in its current phase")]
    MatchNotJoinable,

    #[error("Combatant already selected cards this turn")]
    AlreadySelected,

    #[error("Must select exactly 3 cards, got {0}")]
    WrongCardCount(usize),

    #[error("Card {card} cannot be played in step {step}: {reason}")]
    CardNotPlayable {
        card: CardId,
        step: u8,
        reason: PlayRejection,
    },

    #[error("Unknown card: {0}")]
    UnknownCard(CardId),

    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Invalid match configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_health must be at least 1")]
    ZeroMaxHealth,

    #[error("turn_time_limit_secs must be at least 1")]
    ZeroTimeLimit,

    #[error("best_of must be a positive odd number, got {0}")]
    InvalidBestOf(u32),
}

/// Result type for match operations.
pub type MatchResult<T> = Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MatchError::CardNotPlayable {
            card: CardId::new(2),
            step: 1,
            reason: PlayRejection::InsufficientCharges { cost: 1, available: 0 },
        };
        assert_eq!(
            err.to_string(),
            "Card Card(2) cannot be played in step 1: insufficient charges: card costs 1, combatant has 0"
        );
        assert_eq!(MatchError::WrongCardCount(2).to_string(), "Must select exactly 3 cards, got 2");
    }
}
