//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The two players of a Togyz Kumalak game. White moves first.
//!
//! ## SideMap
//!
//! Fixed-size per-side storage backed by `[T; 2]`. It is `Copy` whenever
//! `T` is, which keeps `GameState` a plain value type for search.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Storage index (White = 0, Black = 1).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use togyz_ai::core::{Side, SideMap};
///
/// let mut kazan: SideMap<u8> = SideMap::with_value(0);
/// kazan[Side::Black] += 10;
///
/// assert_eq!(kazan[Side::White], 0);
/// assert_eq!(kazan[Side::Black], 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::White), factory(Side::Black)],
        }
    }

    /// Create a map from explicit White and Black values.
    pub const fn from_pair(white: T, black: T) -> Self {
        Self {
            data: [white, black],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a side's data.
    #[inline]
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent().opponent(), Side::White);
    }

    #[test]
    fn test_side_display() {
        assert_eq!(format!("{}", Side::White), "White");
        assert_eq!(format!("{}", Side::Black), "Black");
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::White], 0);
        assert_eq!(map[Side::Black], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);

        map[Side::White] = 3;
        *map.get_mut(Side::Black) += 7;

        assert_eq!(map[Side::White], 3);
        assert_eq!(map[Side::Black], 7);
    }

    #[test]
    fn test_side_map_iter() {
        let map = SideMap::from_pair('w', 'b');

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::White, &'w'), (Side::Black, &'b')]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::from_pair(Some(3u8), None);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<Option<u8>> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
