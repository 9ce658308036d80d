use std::fmt;
use std::str::FromStr;

use crate::heuristic::Heuristic;
use crate::movement::{Connectivity, DiagonalCost, MovementModel};

/// Which quantity orders the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// A*: priority is cost so far plus the heuristic.
    #[default]
    AStar,
    /// Greedy best-first search: priority is the heuristic alone.
    Greedy,
}

impl Strategy {
    /// Whether the cost from the source contributes to the priority.
    #[inline]
    pub fn uses_cost_to_start(self) -> bool {
        matches!(self, Self::AStar)
    }

    /// Frontier priority for a cell with cost `g` and estimate `h`.
    #[inline]
    pub fn priority(self, g: f64, h: f64) -> f64 {
        if self.uses_cost_to_start() { g + h } else { h }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AStar => "a_star",
            Self::Greedy => "greedy",
        })
    }
}

impl FromStr for Strategy {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "astar" | "a_star" | "a*" => Ok(Self::AStar),
            "gbfs" | "greedy" => Ok(Self::Greedy),
            _ => Err(ParseConfigError::new("strategy", s)),
        }
    }
}

/// Options for one search.
///
/// The default is A* over 8-connected movement with exact √2 diagonals and
/// the Euclidean heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub movement: Connectivity,
    pub heuristic: Heuristic,
    pub diagonal_cost: DiagonalCost,
}

impl SearchConfig {
    /// A* with the default movement and heuristic.
    pub fn astar() -> Self {
        Self::default()
    }

    /// Greedy best-first search with the default movement and heuristic.
    pub fn greedy() -> Self {
        Self::default().with_strategy(Strategy::Greedy)
    }

    /// A* over cardinal moves with the Manhattan heuristic.
    pub fn four_connected() -> Self {
        Self::default()
            .with_movement(Connectivity::Four)
            .with_heuristic(Heuristic::Manhattan)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_movement(mut self, movement: Connectivity) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_diagonal_cost(mut self, diagonal_cost: DiagonalCost) -> Self {
        self.diagonal_cost = diagonal_cost;
        self
    }

    /// The movement model these options select.
    pub fn movement_model(&self) -> MovementModel {
        MovementModel::new(self.movement, self.diagonal_cost)
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {}-connected / {}",
            self.strategy, self.movement, self.heuristic
        )?;
        if self.movement == Connectivity::Eight {
            write!(f, " / {} diagonals", self.diagonal_cost)?;
        }
        Ok(())
    }
}

/// An option name that matches no known value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfigError {
    kind: &'static str,
    value: String,
}

impl ParseConfigError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// The option being parsed, e.g. `"strategy"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} \u{201c}{}\u{201d}", self.kind, self.value)
    }
}

impl std::error::Error for ParseConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.strategy, Strategy::AStar);
        assert_eq!(c.movement, Connectivity::Eight);
        assert_eq!(c.heuristic, Heuristic::Euclidean);
        assert_eq!(c.diagonal_cost, DiagonalCost::Exact);
        assert_eq!(c.movement_model(), MovementModel::eight_connected());
    }

    #[test]
    fn presets() {
        assert_eq!(SearchConfig::greedy().strategy, Strategy::Greedy);
        let four = SearchConfig::four_connected();
        assert_eq!(four.movement_model(), MovementModel::four_connected());
        assert_eq!(four.heuristic, Heuristic::Manhattan);
    }

    #[test]
    fn priority_per_strategy() {
        assert_eq!(Strategy::AStar.priority(2.0, 3.0), 5.0);
        assert_eq!(Strategy::Greedy.priority(2.0, 3.0), 3.0);
        assert!(Strategy::AStar.uses_cost_to_start());
        assert!(!Strategy::Greedy.uses_cost_to_start());
    }

    #[test]
    fn parse_strategy() {
        assert_eq!("A*".parse::<Strategy>(), Ok(Strategy::AStar));
        assert_eq!("GBFS".parse::<Strategy>(), Ok(Strategy::Greedy));
        let err = "dijkstra".parse::<Strategy>().unwrap_err();
        assert_eq!(err.kind(), "strategy");
        assert_eq!(err.value(), "dijkstra");
    }

    #[test]
    fn display() {
        assert_eq!(
            SearchConfig::default().to_string(),
            "a_star / eight-connected / euclidean / exact diagonals"
        );
        assert_eq!(
            SearchConfig::four_connected().to_string(),
            "a_star / four-connected / manhattan"
        );
    }
}
