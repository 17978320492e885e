//! Card system: definitions, catalog and the standard set.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Immutable card data (cost, effects, play conditions)
//! - `CardCatalog`: Id lookup supplied by the caller
//! - `CardRegistry`: In-memory catalog

pub mod definition;
pub mod registry;
pub mod standard;

pub use definition::{CardDefinition, CardId, CardRef, PlayCondition};
pub use registry::{CardCatalog, CardRegistry};
