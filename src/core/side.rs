//! Seat identification and per-seat data storage.
//!
//! ## Side
//!
//! A match always has exactly two seats. `Side` names them, and
//! `Side::opponent` replaces any "the other one" lookup.
//!
//! ## Pair
//!
//! Fixed two-element storage indexed by `Side`. Supports iteration and
//! split mutable borrows of both seats at once.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The seat filled by the first combatant to join.
    First,
    /// The seat filled by the second combatant to join.
    Second,
}

impl Side {
    /// Both sides, in seating order.
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use rust_duel::core::{Pair, Side};
///
/// let mut wins: Pair<u32> = Pair::with_value(0);
/// wins[Side::Second] += 1;
///
/// assert_eq!(wins[Side::First], 0);
/// assert_eq!(wins[Side::Second], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair<T> {
    first: T,
    second: T,
}

impl<T> Pair<T> {
    /// Create a pair from explicit values.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Create a pair with values from a factory function.
    pub fn from_fn(factory: impl Fn(Side) -> T) -> Self {
        Self {
            first: factory(Side::First),
            second: factory(Side::Second),
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            first: value.clone(),
            second: value,
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }

    /// Borrow both seats mutably, `side` first and its opponent second.
    pub fn split_mut(&mut self, side: Side) -> (&mut T, &mut T) {
        match side {
            Side::First => (&mut self.first, &mut self.second),
            Side::Second => (&mut self.second, &mut self.first),
        }
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::First, &self.first), (Side::Second, &self.second)].into_iter()
    }

    /// Iterate over mutable entries in seating order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [&mut self.first, &mut self.second].into_iter()
    }

    /// Consume the pair, returning (first, second).
    pub fn into_parts(self) -> (T, T) {
        (self.first, self.second)
    }

    /// Map both entries.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Pair<U> {
        Pair {
            first: f(&self.first),
            second: f(&self.second),
        }
    }
}

impl<T> Index<Side> for Pair<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for Pair<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::First.opponent(), Side::Second);
        assert_eq!(Side::Second.opponent(), Side::First);
        assert_eq!(Side::First.opponent().opponent(), Side::First);
    }

    #[test]
    fn test_side_index() {
        assert_eq!(Side::First.index(), 0);
        assert_eq!(Side::Second.index(), 1);
        assert_eq!(format!("{}", Side::Second), "second");
    }

    #[test]
    fn test_pair_from_fn() {
        let pair: Pair<usize> = Pair::from_fn(|s| s.index() * 10);
        assert_eq!(pair[Side::First], 0);
        assert_eq!(pair[Side::Second], 10);
    }

    #[test]
    fn test_pair_split_mut() {
        let mut pair = Pair::new(1, 2);

        let (actor, opponent) = pair.split_mut(Side::Second);
        assert_eq!(*actor, 2);
        assert_eq!(*opponent, 1);
        *actor += 5;
        *opponent += 10;

        assert_eq!(pair[Side::First], 11);
        assert_eq!(pair[Side::Second], 7);
    }

    #[test]
    fn test_pair_iter_order() {
        let pair = Pair::new("a", "b");
        let entries: Vec<_> = pair.iter().collect();
        assert_eq!(entries, vec![(Side::First, &"a"), (Side::Second, &"b")]);
    }

    #[test]
    fn test_pair_serialization() {
        let pair = Pair::new(3u32, 4u32);
        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: Pair<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, deserialized);
    }
}
