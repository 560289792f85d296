use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A 2-D boundary coordinate compared for exact floating-point equality.
///
/// Upstream polygon payloads carry fixed-precision decimals, so two
/// occurrences of the same boundary vertex deserialize to bit-identical
/// floats. Equality and hashing therefore operate on the raw values with
/// no tolerance; near-duplicates remain distinct keys.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Coord {
    fn from(pair: [f64; 2]) -> Self {
        Coord::new(pair[0], pair[1])
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Coord {}

impl Hash for Coord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl Ord for Coord {
    /// Total order by x then y. `total_cmp` gives the same answer for the
    /// same bits on every run, which keeps map iteration deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
