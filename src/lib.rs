//! # rust-duel
//!
//! Simulation core of a real-time, two-combatant tactical card game.
//!
//! ## Design Principles
//!
//! 1. **Authoritative**: All rules, transitions and timing for a match live
//!    here. Callers submit intents and read projections.
//!
//! 2. **Pure Resolution**: The effect engine never reads phases or clocks.
//!    The turn state machine receives `now` explicitly.
//!
//! 3. **One Lock Per Match**: Matches share nothing but the registry map.
//!
//! ## Turn Protocol
//!
//! Both combatants secretly pick three cards, one per step. When both are
//! ready (or the selection deadline passes) the turn resolves: status
//! effects tick, blocks reset, the three steps play out simultaneously and
//! step-1 cards get an end-of-turn pass. A game ends when a combatant's
//! health reaches zero; a best-of-N series chains games within one match.
//!
//! ## Modules
//!
//! - `core`: Sides, combatants, configuration, clock
//! - `cards`: Card definitions, catalog, standard set
//! - `effects`: Effects and the effect engine
//! - `rules`: Turn state machine and its reports
//! - `series`: Best-of-N series control
//! - `state`: Match record, history, projection
//! - `session`: Match registry and timeout scheduler
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rust_duel::cards::{standard, CardRegistry};
//! use rust_duel::core::{CombatantId, ManualClock, MatchConfig};
//! use rust_duel::rules::SubmitOutcome;
//! use rust_duel::session::SessionRegistry;
//!
//! let registry = SessionRegistry::new(
//!     Arc::new(CardRegistry::standard()),
//!     Arc::new(ManualClock::default()),
//! );
//! let duel = registry.create(MatchConfig::default()).unwrap();
//! let (ada, bo) = (CombatantId::new(1), CombatantId::new(2));
//! duel.join(ada, "Ada").unwrap();
//! duel.join(bo, "Bo").unwrap();
//!
//! let charge = [standard::CHARGER; 3];
//! assert_eq!(duel.submit(ada, &charge).unwrap(), SubmitOutcome::WaitingForOpponent);
//! assert!(matches!(duel.submit(bo, &charge).unwrap(), SubmitOutcome::Resolved(_)));
//! assert_eq!(duel.view().turn_number, 2);
//! ```

pub mod core;
pub mod cards;
pub mod effects;
pub mod rules;
pub mod series;
pub mod state;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Clock, Combatant, CombatantId, ManualClock, MatchConfig, Pair, SchedulerConfig, Side,
    StatusEffect, StatusKind, SystemClock,
};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, CardRef, CardRegistry};

pub use crate::effects::{Effect, EffectEngine, EffectKind, EffectOutcome, ResolutionContext};

pub use crate::rules::{MatchOutcome, SeriesTransition, SubmitOutcome, TurnReport};

pub use crate::series::{SeriesController, SeriesStatus};

pub use crate::state::{Match, MatchId, MatchView, Phase};

pub use crate::session::{MatchHandle, SessionRegistry, TimeoutScheduler};

pub use crate::error::{ConfigError, MatchError, MatchResult, PlayRejection};
