//! Effect engine tests.
//!
//! Covers the standard cards against hand-built contexts, status ticks,
//! and property tests for the health bounds and repeat counting.

use proptest::prelude::*;

use rust_duel::cards::{standard, CardId};
use rust_duel::core::{Combatant, CombatantId, StatusKind};
use rust_duel::effects::{
    Condition, Effect, EffectEngine, EffectKind, EffectOutcome, ResolutionContext, StatusOutcome,
    Target,
};

fn duel(health: u32) -> (Combatant, Combatant) {
    (
        Combatant::new(CombatantId::new(1), "Ada", health),
        Combatant::new(CombatantId::new(2), "Bo", health),
    )
}

#[test]
fn test_repeated_cards_examples() {
    let (c, t, b) = (standard::CHARGER, standard::TIRER, standard::BLOQUER);

    assert_eq!(EffectEngine::count_repeated_cards(&[c, c, t]), 1);
    assert_eq!(EffectEngine::count_repeated_cards(&[c, c, c]), 2);
    assert_eq!(EffectEngine::count_repeated_cards(&[c, t, b]), 0);
}

#[test]
fn test_damage_through_block() {
    let (mut a, mut b) = duel(6);
    let card =
        rust_duel::CardDefinition::new(CardId::new(99), "heavy").with_effect(Effect::damage(5));
    let context = ResolutionContext::new(6).against_block(1);

    let outcomes = EffectEngine::apply_effects(&card, &mut a, &mut b, &context);

    assert_eq!(b.health, 2);
    assert_eq!(
        outcomes,
        vec![EffectOutcome::Damage {
            target: Target::Opponent,
            requested: 5,
            applied: 4,
            was_blocked: true
        }]
    );
}

#[test]
fn test_heal_at_full_health() {
    let (mut a, mut b) = duel(10);

    let context = ResolutionContext::new(10);
    let outcomes = EffectEngine::apply_effects(&standard::soigner(), &mut a, &mut b, &context);

    assert_eq!(a.health, 10);
    assert_eq!(
        outcomes,
        vec![EffectOutcome::Heal {
            target: Target::Actor,
            requested: 1,
            applied: 0
        }]
    );
}

#[test]
fn test_burn_ticks_then_expires() {
    let (mut a, mut b) = duel(10);
    EffectEngine::apply_effects(&standard::bruler(), &mut a, &mut b, &ResolutionContext::new(10));
    assert_eq!(b.status(StatusKind::Burn).map(|s| s.remaining_duration), Some(2));

    let first = EffectEngine::process_status_effects(&mut b);
    assert_eq!(
        first,
        vec![StatusOutcome::Tick {
            kind: StatusKind::Burn,
            damage: 1,
            remaining_duration: 1
        }]
    );
    assert_eq!(b.health, 9);

    let second = EffectEngine::process_status_effects(&mut b);
    assert_eq!(
        second,
        vec![
            StatusOutcome::Tick {
                kind: StatusKind::Burn,
                damage: 1,
                remaining_duration: 0
            },
            StatusOutcome::Expired {
                kind: StatusKind::Burn
            },
        ]
    );
    assert_eq!(b.health, 8);
    assert!(b.status_effects.is_empty());

    assert!(EffectEngine::process_status_effects(&mut b).is_empty());
}

#[test]
fn test_percer_only_hits_open_guard() {
    let (mut a, mut b) = duel(10);

    let guarded = ResolutionContext::new(10).against_block(1);
    assert!(EffectEngine::apply_effects(&standard::percer(), &mut a, &mut b, &guarded).is_empty());
    assert_eq!(b.health, 10);

    let open = ResolutionContext::new(10);
    EffectEngine::apply_effects(&standard::percer(), &mut a, &mut b, &open);
    assert_eq!(b.health, 7);
}

#[test]
fn test_contrer_needs_absorbed_damage() {
    let (mut a, mut b) = duel(10);

    let context = ResolutionContext::new(10);
    let quiet = EffectEngine::apply_effects(&standard::contrer(), &mut a, &mut b, &context);
    assert_eq!(quiet.len(), 1);
    assert_eq!(a.block_value, 1);
    assert_eq!(b.health, 10);

    let absorbed = ResolutionContext::new(10).with_blocked_damage(1);
    let outcomes = EffectEngine::apply_effects(&standard::contrer(), &mut a, &mut b, &absorbed);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(b.health, 9);
}

#[test]
fn test_repeated_damage_scales() {
    let (mut a, mut b) = duel(10);
    let context = ResolutionContext::end_of_turn(10, 2);

    let outcomes = EffectEngine::apply_effects(&standard::echo(), &mut a, &mut b, &context);

    assert_eq!(
        outcomes,
        vec![EffectOutcome::Damage {
            target: Target::Opponent,
            requested: 2,
            applied: 2,
            was_blocked: false
        }]
    );
    assert_eq!(b.health, 8);
}

#[test]
fn test_validation_order() {
    let (a, _) = duel(10);
    // echo costs 1 and is step-1 only; cost is checked first.
    let err = EffectEngine::validate_card_play(&standard::echo(), &a, 2).unwrap_err();
    assert!(matches!(
        err,
        rust_duel::PlayRejection::InsufficientCharges { cost: 1, available: 0 }
    ));
}

fn effect_strategy() -> impl Strategy<Value = Effect> {
    (0u8..5, 0u32..15, any::<bool>(), 0u8..3).prop_map(|(kind, magnitude, at_self, timing)| {
        let kind = match kind {
            0 => EffectKind::Damage,
            1 => EffectKind::Heal,
            2 => EffectKind::Charge,
            3 => EffectKind::Block,
            _ => EffectKind::Status(StatusKind::Burn),
        };
        let target = if at_self { Target::Actor } else { Target::Opponent };
        let effect = Effect::new(kind, magnitude, target);
        match timing {
            0 => effect,
            1 => effect.when(Condition::OpponentNotBlocked),
            _ => effect.at_end_of_turn(Some(Condition::RepeatedCards)),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Health stays within [0, max_health] whatever effects resolve.
    #[test]
    fn prop_health_bounded(
        max_health in 1u32..30,
        effects in prop::collection::vec(effect_strategy(), 0..24),
        block in 0u32..4,
        repeats in 0u32..3,
        end_of_turn in any::<bool>(),
    ) {
        let (mut a, mut b) = duel(max_health);
        let context = if end_of_turn {
            ResolutionContext::end_of_turn(max_health, repeats)
        } else {
            ResolutionContext::new(max_health).against_block(block)
        };

        for effect in &effects {
            if EffectEngine::is_eligible(effect, &context) {
                EffectEngine::apply_single(effect, &mut a, &mut b, &context);
            }
            EffectEngine::process_status_effects(&mut b);

            prop_assert!(a.health <= max_health);
            prop_assert!(b.health <= max_health);
            prop_assert!(b.status_effects.iter().all(|s| s.remaining_duration >= 1));
        }
    }

    /// Repeats never exceed the number of cards beyond the first, and
    /// distinct ids never repeat.
    #[test]
    fn prop_repeated_cards(ids in prop::collection::vec(0u32..6, 0..12)) {
        let cards: Vec<CardId> = ids.iter().copied().map(CardId::new).collect();
        let repeated = EffectEngine::count_repeated_cards(&cards) as usize;

        prop_assert!(repeated <= cards.len().saturating_sub(1));

        let mut distinct = cards.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(EffectEngine::count_repeated_cards(&distinct), 0);
        prop_assert_eq!(repeated, cards.len() - distinct.len());
    }
}
