//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its cost,
//! the effects it resolves and the steps it may be played in. Per-turn
//! data (which combatant selected it, in which step) lives on the
//! combatant's selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effects::{Condition, Effect, Timing};

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A restriction on when a card may be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayCondition {
    /// Must be played in the given step (1..=3).
    MustBePlayedInStep(u8),
}

/// Shared handle to an immutable card definition.
pub type CardRef = Arc<CardDefinition>;

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardDefinition, CardId};
/// use rust_duel::effects::Effect;
///
/// let shot = CardDefinition::new(CardId::new(2), "tirer")
///     .with_cost(1)
///     .with_effect(Effect::damage(1));
///
/// assert_eq!(shot.charge_cost, 1);
/// assert_eq!(shot.effects.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Charges spent when the card resolves.
    pub charge_cost: u32,

    /// Effects resolved in order.
    pub effects: Vec<Effect>,

    /// Restrictions checked at selection time.
    pub play_conditions: Vec<PlayCondition>,
}

impl CardDefinition {
    /// Create a free card with no effects.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            charge_cost: 0,
            effects: Vec::new(),
            play_conditions: Vec::new(),
        }
    }

    /// Set the charge cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.charge_cost = cost;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Restrict the card to one step (builder pattern).
    #[must_use]
    pub fn only_in_step(mut self, step: u8) -> Self {
        self.play_conditions.push(PlayCondition::MustBePlayedInStep(step));
        self
    }

    /// Steps this card is restricted to.
    pub fn step_requirements(&self) -> impl Iterator<Item = u8> + '_ {
        self.play_conditions.iter().map(|c| match c {
            PlayCondition::MustBePlayedInStep(step) => *step,
        })
    }

    /// Whether the card triggers the end-of-turn pass, i.e. it carries
    /// an end-of-turn effect keyed on repeated cards.
    #[must_use]
    pub fn has_end_of_turn_effect(&self) -> bool {
        self.effects.iter().any(|e| {
            matches!(
                e.timing,
                Timing::EndOfTurn {
                    condition: Some(Condition::RepeatedCards)
                }
            )
        })
    }

    /// Wrap into a shared reference.
    #[must_use]
    pub fn into_ref(self) -> CardRef {
        Arc::new(self)
    }
}
