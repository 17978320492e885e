//! Combatant records: one side's mutable in-match state.
//!
//! A `Combatant` is owned by its match and only mutated by the effect
//! engine, the turn state machine and the series reset.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardRef;

/// Identifier of a combatant, assigned by the caller (account layer).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u64);

impl CombatantId {
    /// Create a new combatant ID.
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

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Combatant({})", self.0)
    }
}

/// Kinds of timed recurring modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Deals its magnitude as damage at the start of every turn.
    Burn,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Burn => write!(f, "burn"),
        }
    }
}

/// An active status effect. `remaining_duration` is always at least 1
/// while the effect is present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub remaining_duration: u32,
    /// Amount applied per tick.
    pub magnitude: u32,
}

/// The three cards a combatant committed to for the current turn,
/// in step order.
pub type Selection = [CardRef; 3];

/// One side's in-match state.
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub health: u32,
    pub charges: u32,
    /// Damage reduction set by block effects; reset once per turn.
    pub block_value: u32,
    pub status_effects: SmallVec<[StatusEffect; 2]>,
    pub selection: Option<Selection>,
    pub ready: bool,
}

impl Combatant {
    /// Create a combatant at full health with no charges.
    #[must_use]
    pub fn new(id: CombatantId, name: impl Into<String>, max_health: u32) -> Self {
        Self {
            id,
            name: name.into(),
            health: max_health,
            charges: 0,
            block_value: 0,
            status_effects: SmallVec::new(),
            selection: None,
            ready: false,
        }
    }

    /// Health reached zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Remove up to `amount` health, clamping at zero. Returns the amount removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.health);
        self.health -= applied;
        applied
    }

    /// Restore up to `amount` health without exceeding `max_health`.
    /// Returns the amount restored.
    pub fn restore_health(&mut self, amount: u32, max_health: u32) -> u32 {
        let applied = amount.min(max_health.saturating_sub(self.health));
        self.health += applied;
        applied
    }

    /// Pay a card's charge cost, flooring at zero.
    pub fn spend_charges(&mut self, cost: u32) {
        self.charges = self.charges.saturating_sub(cost);
    }

    /// Look up an active status effect.
    #[must_use]
    pub fn status(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.status_effects.iter().find(|s| s.kind == kind)
    }

    /// Clear the per-turn state: readiness, selection and block.
    pub fn clear_turn(&mut self) {
        self.ready = false;
        self.selection = None;
        self.block_value = 0;
    }

    /// Return to the state of a freshly joined combatant.
    pub fn reset_for_new_game(&mut self, max_health: u32) {
        self.health = max_health;
        self.charges = 0;
        self.status_effects.clear();
        self.clear_turn();
    }
}
