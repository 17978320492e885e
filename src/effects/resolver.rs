//! Effect resolution - executing card effects on combatants.
//!
//! `EffectEngine` is pure: it reads a `ResolutionContext` built by the
//! turn state machine and mutates the two combatant records it is given.
//! It owns no timers and no match state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId};
use crate::core::{Combatant, StatusEffect, StatusKind};
use crate::error::PlayRejection;

use super::{Condition, Effect, EffectKind, Target, Timing};

/// Situation a card resolves in, seen from the card's owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    /// The opponent's block value at the start of the step.
    pub block_value: u32,
    /// Whether the opponent had a block up at the start of the step.
    pub opponent_blocked: bool,
    /// Damage the actor's own block absorbs this step.
    pub blocked_damage: u32,
    /// Repeated cards in the opponent's selection.
    pub repeated_card_count: u32,
    /// Set only for the pass after the three steps.
    pub is_end_of_turn: bool,
    /// Heal cap.
    pub max_health: u32,
}

impl ResolutionContext {
    /// A context for a step with no blocks in play.
    #[must_use]
    pub const fn new(max_health: u32) -> Self {
        Self {
            block_value: 0,
            opponent_blocked: false,
            blocked_damage: 0,
            repeated_card_count: 0,
            is_end_of_turn: false,
            max_health,
        }
    }

    /// A context for the end-of-turn pass.
    #[must_use]
    pub const fn end_of_turn(max_health: u32, repeated_card_count: u32) -> Self {
        Self {
            repeated_card_count,
            is_end_of_turn: true,
            ..Self::new(max_health)
        }
    }

    /// Set the opponent's block value.
    #[must_use]
    pub const fn against_block(mut self, block_value: u32) -> Self {
        self.block_value = block_value;
        self.opponent_blocked = block_value > 0;
        self
    }

    /// Set the damage absorbed by the actor's own block.
    #[must_use]
    pub const fn with_blocked_damage(mut self, blocked_damage: u32) -> Self {
        self.blocked_damage = blocked_damage;
        self
    }

    /// Set the repeated-card count.
    #[must_use]
    pub const fn with_repeated_cards(mut self, count: u32) -> Self {
        self.repeated_card_count = count;
        self
    }

    /// Whether `condition` holds in this context.
    #[must_use]
    pub const fn holds(&self, condition: Condition) -> bool {
        match condition {
            Condition::BlockedDamage => self.blocked_damage > 0,
            Condition::OpponentBlocked => self.opponent_blocked,
            Condition::OpponentNotBlocked => !self.opponent_blocked,
            Condition::RepeatedCards => self.repeated_card_count > 0,
        }
    }
}

/// Result of applying one effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    Damage {
        target: Target,
        requested: u32,
        applied: u32,
        was_blocked: bool,
    },
    Heal {
        target: Target,
        requested: u32,
        applied: u32,
    },
    Charge {
        target: Target,
        amount: u32,
    },
    Block {
        target: Target,
        value: u32,
    },
    Status {
        target: Target,
        kind: StatusKind,
        remaining_duration: u32,
    },
}

/// Result of one status tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusOutcome {
    Tick {
        kind: StatusKind,
        damage: u32,
        remaining_duration: u32,
    },
    Expired {
        kind: StatusKind,
    },
}

/// Interprets card effects.
pub struct EffectEngine;

impl EffectEngine {
    /// Check whether `card` may be played by `combatant` in `step` (1..=3).
    pub fn validate_card_play(
        card: &CardDefinition,
        combatant: &Combatant,
        step: u8,
    ) -> Result<(), PlayRejection> {
        if card.charge_cost > combatant.charges {
            return Err(PlayRejection::InsufficientCharges {
                cost: card.charge_cost,
                available: combatant.charges,
            });
        }
        if let Some(required) = card.step_requirements().find(|&required| required != step) {
            return Err(PlayRejection::WrongStep {
                required,
                actual: step,
            });
        }
        Ok(())
    }

    /// Whether an effect resolves in `context`.
    ///
    /// Immediate and conditional effects are not tied to a pass, so the
    /// end-of-turn pass resolves them again. End-of-turn effects resolve
    /// only there.
    #[must_use]
    pub fn is_eligible(effect: &Effect, context: &ResolutionContext) -> bool {
        match effect.timing {
            Timing::Immediate => true,
            Timing::Conditional(condition) => context.holds(condition),
            Timing::EndOfTurn { .. } => context.is_end_of_turn,
        }
    }

    /// Apply every eligible effect of `card`, in order.
    pub fn apply_effects(
        card: &CardDefinition,
        actor: &mut Combatant,
        opponent: &mut Combatant,
        context: &ResolutionContext,
    ) -> Vec<EffectOutcome> {
        let mut outcomes = Vec::with_capacity(card.effects.len());
        for effect in &card.effects {
            if Self::is_eligible(effect, context) {
                outcomes.push(Self::apply_single(effect, actor, opponent, context));
            }
        }
        outcomes
    }

    /// Apply one effect without checking eligibility.
    pub fn apply_single(
        effect: &Effect,
        actor: &mut Combatant,
        opponent: &mut Combatant,
        context: &ResolutionContext,
    ) -> EffectOutcome {
        let target = effect.target;
        let subject = match target {
            Target::Actor => actor,
            Target::Opponent => opponent,
        };

        match effect.kind {
            EffectKind::Damage => {
                let requested = if effect.condition() == Some(Condition::RepeatedCards) {
                    effect.magnitude.saturating_mul(context.repeated_card_count)
                } else {
                    effect.magnitude
                };
                let was_blocked = target == Target::Opponent && context.opponent_blocked;
                let applied = if was_blocked {
                    requested.saturating_sub(context.block_value)
                } else {
                    requested
                };
                subject.take_damage(applied);
                EffectOutcome::Damage {
                    target,
                    requested,
                    applied,
                    was_blocked,
                }
            }

            EffectKind::Heal => {
                let applied = subject.restore_health(effect.magnitude, context.max_health);
                EffectOutcome::Heal {
                    target,
                    requested: effect.magnitude,
                    applied,
                }
            }

            EffectKind::Charge => {
                subject.charges = subject.charges.saturating_add(effect.magnitude);
                EffectOutcome::Charge {
                    target,
                    amount: effect.magnitude,
                }
            }

            EffectKind::Block => {
                subject.block_value = effect.magnitude;
                EffectOutcome::Block {
                    target,
                    value: effect.magnitude,
                }
            }

            EffectKind::Status(kind) => {
                let remaining_duration =
                    match subject.status_effects.iter().position(|s| s.kind == kind) {
                        Some(index) => {
                            let existing = &mut subject.status_effects[index];
                            existing.remaining_duration =
                                existing.remaining_duration.max(effect.magnitude);
                            existing.remaining_duration
                        }
                        None => {
                            // A zero-duration status would violate the >= 1 invariant.
                            if effect.magnitude > 0 {
                                subject.status_effects.push(StatusEffect {
                                    kind,
                                    remaining_duration: effect.magnitude,
                                    magnitude: 1,
                                });
                            }
                            effect.magnitude
                        }
                    };
                EffectOutcome::Status {
                    target,
                    kind,
                    remaining_duration,
                }
            }
        }
    }

    /// Tick every active status effect once.
    pub fn process_status_effects(combatant: &mut Combatant) -> Vec<StatusOutcome> {
        let snapshot = combatant.status_effects.clone();
        let mut outcomes = Vec::with_capacity(snapshot.len());

        for status in snapshot {
            let damage = match status.kind {
                StatusKind::Burn => combatant.take_damage(status.magnitude),
            };
            let remaining_duration = status.remaining_duration.saturating_sub(1);
            outcomes.push(StatusOutcome::Tick {
                kind: status.kind,
                damage,
                remaining_duration,
            });

            if remaining_duration == 0 {
                combatant.status_effects.retain(|s| s.kind != status.kind);
                outcomes.push(StatusOutcome::Expired { kind: status.kind });
            } else if let Some(active) =
                combatant.status_effects.iter_mut().find(|s| s.kind == status.kind)
            {
                active.remaining_duration = remaining_duration;
            }
        }

        outcomes
    }

    /// Sum over distinct ids of (occurrences - 1).
    #[must_use]
    pub fn count_repeated_cards(cards: &[CardId]) -> u32 {
        let distinct: FxHashSet<CardId> = cards.iter().copied().collect();
        u32::try_from(cards.len() - distinct.len()).unwrap_or(u32::MAX)
    }
}
