//! The standard card set.
//!
//! | id | name    | cost | effect                                                    |
//! |----|---------|------|-----------------------------------------------------------|
//! | 1  | charger | 0    | +1 charge                                                 |
//! | 2  | tirer   | 1    | 1 damage                                                  |
//! | 3  | bloquer | 0    | block 1                                                   |
//! | 4  | soigner | 1    | heal 1                                                    |
//! | 5  | bruler  | 2    | burn the opponent for 2 turns                             |
//! | 6  | contrer | 0    | block 1; 1 damage if an earlier block absorbs damage      |
//! | 7  | percer  | 2    | 3 damage if the opponent is not blocking                  |
//! | 8  | ouvrir  | 0    | +2 charges, step 1 only                                   |
//! | 9  | echo    | 1    | step 1 only; end of turn, 1 damage per repeated enemy card |
//! | 10 | canon   | 3    | 3 damage                                                  |

use crate::core::StatusKind;
use crate::effects::{Condition, Effect};

use super::definition::{CardDefinition, CardId};

pub const CHARGER: CardId = CardId::new(1);
pub const TIRER: CardId = CardId::new(2);
pub const BLOQUER: CardId = CardId::new(3);
pub const SOIGNER: CardId = CardId::new(4);
pub const BRULER: CardId = CardId::new(5);
pub const CONTRER: CardId = CardId::new(6);
pub const PERCER: CardId = CardId::new(7);
pub const OUVRIR: CardId = CardId::new(8);
pub const ECHO: CardId = CardId::new(9);
pub const CANON: CardId = CardId::new(10);

/// Free, unconditional "+1 charge". Also the card assigned on timeout.
#[must_use]
pub fn charger() -> CardDefinition {
    CardDefinition::new(CHARGER, "charger").with_effect(Effect::charge(1))
}

#[must_use]
pub fn tirer() -> CardDefinition {
    CardDefinition::new(TIRER, "tirer")
        .with_cost(1)
        .with_effect(Effect::damage(1))
}

#[must_use]
pub fn bloquer() -> CardDefinition {
    CardDefinition::new(BLOQUER, "bloquer").with_effect(Effect::block(1))
}

#[must_use]
pub fn soigner() -> CardDefinition {
    CardDefinition::new(SOIGNER, "soigner")
        .with_cost(1)
        .with_effect(Effect::heal(1))
}

#[must_use]
pub fn bruler() -> CardDefinition {
    CardDefinition::new(BRULER, "bruler")
        .with_cost(2)
        .with_effect(Effect::status(StatusKind::Burn, 2))
}

#[must_use]
pub fn contrer() -> CardDefinition {
    CardDefinition::new(CONTRER, "contrer")
        .with_effect(Effect::block(1))
        .with_effect(Effect::damage(1).when(Condition::BlockedDamage))
}

#[must_use]
pub fn percer() -> CardDefinition {
    CardDefinition::new(PERCER, "percer")
        .with_cost(2)
        .with_effect(Effect::damage(3).when(Condition::OpponentNotBlocked))
}

#[must_use]
pub fn ouvrir() -> CardDefinition {
    CardDefinition::new(OUVRIR, "ouvrir")
        .with_effect(Effect::charge(2))
        .only_in_step(1)
}

#[must_use]
pub fn echo() -> CardDefinition {
    CardDefinition::new(ECHO, "echo")
        .with_cost(1)
        .with_effect(Effect::damage(1).at_end_of_turn(Some(Condition::RepeatedCards)))
        .only_in_step(1)
}

#[must_use]
pub fn canon() -> CardDefinition {
    CardDefinition::new(CANON, "canon")
        .with_cost(3)
        .with_effect(Effect::damage(3))
}

/// Every standard card, ordered by id.
#[must_use]
pub fn all() -> Vec<CardDefinition> {
    vec![
        charger(),
        tirer(),
        bloquer(),
        soigner(),
        bruler(),
        contrer(),
        percer(),
        ouvrir(),
        echo(),
        canon(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let ids: Vec<_> = all().iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_charger_is_free_and_unrestricted() {
        let card = charger();
        assert_eq!(card.charge_cost, 0);
        assert!(card.play_conditions.is_empty());
        assert_eq!(card.effects, vec![Effect::charge(1)]);
    }

    #[test]
    fn test_echo_is_end_of_turn() {
        assert!(echo().has_end_of_turn_effect());
        assert_eq!(echo().step_requirements().collect::<Vec<_>>(), vec![1]);
    }
}
