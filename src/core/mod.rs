//! Core engine types: seats, combatants, configuration, clock.
//!
//! This module contains the building blocks shared by the effect engine,
//! the turn state machine and the session layer.

pub mod side;
pub mod combatant;
pub mod config;
pub mod clock;

pub use side::{Pair, Side};
pub use combatant::{Combatant, CombatantId, Selection, StatusEffect, StatusKind};
pub use config::{MatchConfig, SchedulerConfig};
pub use clock::{Clock, ManualClock, SystemClock};
