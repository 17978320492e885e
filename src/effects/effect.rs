//! Effect definitions.
//!
//! An effect is one atomic change a card makes when it resolves:
//! damage, heal, charge, block or a status. Kinds, targets, timings and
//! conditions are closed enums, so every dispatch is checked exhaustively.

use serde::{Deserialize, Serialize};

use crate::core::StatusKind;

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Remove health (reduced by the opponent's block when targeting them).
    Damage,
    /// Restore health up to the configured maximum.
    Heal,
    /// Gain charges.
    Charge,
    /// Set the block value (overwrites).
    Block,
    /// Apply or extend a status; magnitude is the duration.
    Status(StatusKind),
}

/// Who an effect lands on, relative to the card's owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The combatant who played the card.
    #[serde(rename = "self")]
    Actor,
    /// The other combatant.
    Opponent,
}

/// Situational requirement evaluated against the resolution context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// The actor's block absorbed damage this step.
    BlockedDamage,
    /// The opponent has a block value up.
    OpponentBlocked,
    /// The opponent has no block value up.
    OpponentNotBlocked,
    /// The opponent's selection contains repeated cards.
    RepeatedCards,
}

/// When an effect resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timing {
    /// Resolves in its step unconditionally.
    Immediate,
    /// Resolves in its step when the condition holds.
    Conditional(Condition),
    /// Resolves once after all three steps. The condition only scales
    /// the effect (see `Condition::RepeatedCards`).
    EndOfTurn { condition: Option<Condition> },
}

/// An atomic card effect.
///
/// ## Example
///
/// ```
/// use rust_duel::effects::{Condition, Effect, Target, Timing};
///
/// let counter = Effect::damage(2).when(Condition::OpponentBlocked);
/// assert_eq!(counter.target, Target::Opponent);
/// assert_eq!(counter.timing, Timing::Conditional(Condition::OpponentBlocked));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub magnitude: u32,
    pub target: Target,
    pub timing: Timing,
}

impl Effect {
    /// Create an immediate effect.
    #[must_use]
    pub const fn new(kind: EffectKind, magnitude: u32, target: Target) -> Self {
        Self {
            kind,
            magnitude,
            target,
            timing: Timing::Immediate,
        }
    }

    /// Damage the opponent.
    #[must_use]
    pub const fn damage(amount: u32) -> Self {
        Self::new(EffectKind::Damage, amount, Target::Opponent)
    }

    /// Heal self.
    #[must_use]
    pub const fn heal(amount: u32) -> Self {
        Self::new(EffectKind::Heal, amount, Target::Actor)
    }

    /// Gain charges.
    #[must_use]
    pub const fn charge(amount: u32) -> Self {
        Self::new(EffectKind::Charge, amount, Target::Actor)
    }

    /// Raise a block on self.
    #[must_use]
    pub const fn block(amount: u32) -> Self {
        Self::new(EffectKind::Block, amount, Target::Actor)
    }

    /// Apply a status to the opponent for `duration` turns.
    #[must_use]
    pub const fn status(kind: StatusKind, duration: u32) -> Self {
        Self::new(EffectKind::Status(kind), duration, Target::Opponent)
    }

    /// Redirect the effect.
    #[must_use]
    pub const fn targeting(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Make the effect conditional.
    #[must_use]
    pub const fn when(mut self, condition: Condition) -> Self {
        self.timing = Timing::Conditional(condition);
        self
    }

    /// Defer the effect to the end-of-turn pass.
    #[must_use]
    pub const fn at_end_of_turn(mut self, condition: Option<Condition>) -> Self {
        self.timing = Timing::EndOfTurn { condition };
        self
    }

    /// The condition attached to this effect, if any.
    #[must_use]
    pub const fn condition(&self) -> Option<Condition> {
        match self.timing {
            Timing::Immediate => None,
            Timing::Conditional(condition) => Some(condition),
            Timing::EndOfTurn { condition } => condition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_effect() {
        let effect = Effect::damage(3);
        assert_eq!(effect.kind, EffectKind::Damage);
        assert_eq!(effect.magnitude, 3);
        assert_eq!(effect.target, Target::Opponent);
        assert_eq!(effect.timing, Timing::Immediate);
    }

    #[test]
    fn test_self_targeted_defaults() {
        assert_eq!(Effect::heal(1).target, Target::Actor);
        assert_eq!(Effect::charge(1).target, Target::Actor);
        assert_eq!(Effect::block(1).target, Target::Actor);
        assert_eq!(Effect::status(StatusKind::Burn, 2).target, Target::Opponent);
    }

    #[test]
    fn test_condition_accessor() {
        assert_eq!(Effect::damage(1).condition(), None);
        assert_eq!(
            Effect::damage(1).when(Condition::BlockedDamage).condition(),
            Some(Condition::BlockedDamage)
        );
        assert_eq!(
            Effect::damage(1).at_end_of_turn(Some(Condition::RepeatedCards)).condition(),
            Some(Condition::RepeatedCards)
        );
        assert_eq!(Effect::charge(1).at_end_of_turn(None).condition(), None);
    }

    #[test]
    fn test_target_serialization() {
        assert_eq!(serde_json::to_string(&Target::Actor).unwrap(), "\"self\"");
        let effect = Effect::damage(5).when(Condition::OpponentNotBlocked);
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
