//! Card catalog for definition lookup.
//!
//! The caller owns the catalog; the core only resolves ids through the
//! `CardCatalog` trait. `CardRegistry` is the in-memory implementation.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardRef};
use super::standard;

/// Resolves card ids to definitions.
pub trait CardCatalog: Send + Sync {
    /// Look up a card definition.
    fn card(&self, id: CardId) -> Option<CardRef>;
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_duel::cards::{CardCatalog, CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "charger"));
///
/// let found = registry.card(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "charger");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardRef>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the standard card set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for card in standard::all() {
            registry.register(card);
        }
        registry
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists: a catalog with
    /// duplicate ids is a configuration error.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card.into_ref());
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardRef> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardRef> {
        self.cards.values()
    }
}

impl CardCatalog for CardRegistry {
    fn card(&self, id: CardId) -> Option<CardRef> {
        self.cards.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Test Card"));

        assert_eq!(registry.get(CardId::new(1)).map(|c| c.name.as_str()), Some("Test Card"));
        assert!(registry.get(CardId::new(99)).is_none());
        assert!(registry.card(CardId::new(99)).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::new(CardId::new(1), "Card A"));
        registry.register(CardDefinition::new(CardId::new(1), "Card B"));
    }

    #[test]
    fn test_standard_registry() {
        let registry = CardRegistry::standard();
        assert_eq!(registry.len(), standard::all().len());
        assert!(registry.contains(standard::CHARGER));
        assert!(registry.contains(standard::TIRER));
        assert!(registry.contains(standard::BLOQUER));
        assert!(registry.iter().all(|c| !c.name.is_empty()));
    }
}
