use std::fmt;
use std::str::FromStr;

use gridseek_core::{Coord, Offset};

use crate::config::ParseConfigError;
use crate::movement::MovementModel;

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> u64 {
    u64::from(a.row.abs_diff(b.row)) + u64::from(a.col.abs_diff(b.col))
}

/// Chebyshev (L∞) distance between two coordinates.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> u32 {
    a.row.abs_diff(b.row).max(a.col.abs_diff(b.col))
}

/// Euclidean (L2) distance between two coordinates.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let dr = f64::from(a.row) - f64::from(b.row);
    let dc = f64::from(a.col) - f64::from(b.col);
    (dr * dr + dc * dc).sqrt()
}

/// Estimate of the remaining cost from a cell to the target.
///
/// | Heuristic | Admissible with |
/// |---|---|
/// | `Euclidean` | 4-connected; 8-connected with exact √2 diagonals |
/// | `Manhattan` | 4-connected only. With diagonal moves it overestimates and A* is not optimal |
/// | `Chebyshev` | any model whose steps all cost at least 1 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Coord, to: Coord) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => manhattan(from, to) as f64,
            Self::Chebyshev => f64::from(chebyshev(from, to)),
        }
    }

    fn length(self, o: Offset) -> f64 {
        self.estimate(Coord::ZERO, Coord::ZERO + o)
    }

    /// Whether this heuristic never overestimates under `movement`.
    ///
    /// All three heuristics are metrics, so it suffices that no single step
    /// is cheaper than the heuristic's length of its offset: the estimate is
    /// then consistent, and therefore admissible.
    pub fn is_admissible(self, movement: &MovementModel) -> bool {
        movement
            .steps()
            .iter()
            .all(|s| self.length(s.offset) <= s.cost)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
        })
    }
}

impl FromStr for Heuristic {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "chebyshev" | "linf" => Ok(Self::Chebyshev),
            _ => Err(ParseConfigError::new("heuristic", s)),
        }
    }
}
