use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use gridseek_core::{Coord, Offset};

use crate::config::ParseConfigError;

/// Diagonal step weight kept for parity with outputs produced by 1.414-based
/// tools.
pub const ROUNDED_SQRT_2: f64 = 1.414;

/// Which neighbour offsets are legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// Up, down, right, left.
    Four,
    /// The four orthogonal moves plus the four diagonals.
    #[default]
    Eight,
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Four => "four",
            Self::Eight => "eight",
        })
    }
}

impl FromStr for Connectivity {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "4" | "four" | "4_connected" | "four_connected" => Ok(Self::Four),
            "8" | "eight" | "8_connected" | "eight_connected" => Ok(Self::Eight),
            _ => Err(ParseConfigError::new("movement", s)),
        }
    }
}

/// Weight of a diagonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagonalCost {
    /// `std::f64::consts::SQRT_2`.
    #[default]
    Exact,
    /// [`ROUNDED_SQRT_2`] (1.414).
    Rounded,
}

impl DiagonalCost {
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Exact => SQRT_2,
            Self::Rounded => ROUNDED_SQRT_2,
        }
    }
}

impl fmt::Display for DiagonalCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Rounded => "rounded",
        })
    }
}

impl FromStr for DiagonalCost {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "sqrt2" => Ok(Self::Exact),
            "rounded" | "1.414" => Ok(Self::Rounded),
            _ => Err(ParseConfigError::new("diagonal cost", s)),
        }
    }
}

/// One legal move: an offset and the cost of taking it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub offset: Offset,
    pub cost: f64,
}

impl Step {
    pub const fn new(offset: Offset, cost: f64) -> Self {
        Self { offset, cost }
    }
}

const ORTHOGONAL: [Offset; 4] = [Offset::UP, Offset::DOWN, Offset::RIGHT, Offset::LEFT];

const DIAGONAL: [Offset; 4] = [
    Offset::new(-1, 1),
    Offset::new(-1, -1),
    Offset::new(1, 1),
    Offset::new(1, -1),
];

/// The set of legal neighbour offsets and their per-step costs.
///
/// Steps are tried in the order they are stored, which fixes tie-breaking
/// between equally good neighbours. The built-in models try up, down, right,
/// left, then up-right, up-left, down-right, down-left. Diagonal steps are
/// allowed even when both adjacent orthogonal cells are blocked.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementModel {
    steps: Vec<Step>,
}

impl Default for MovementModel {
    fn default() -> Self {
        Self::eight_connected()
    }
}

impl MovementModel {
    /// Cardinal moves only, each costing 1.
    pub fn four_connected() -> Self {
        Self {
            steps: ORTHOGONAL.iter().map(|&o| Step::new(o, 1.0)).collect(),
        }
    }

    /// Cardinal moves costing 1 and diagonal moves costing √2.
    pub fn eight_connected() -> Self {
        Self::eight_connected_with(DiagonalCost::Exact)
    }

    /// Cardinal moves costing 1 and diagonal moves weighted by `diagonal`.
    pub fn eight_connected_with(diagonal: DiagonalCost) -> Self {
        let d = diagonal.value();
        let steps = ORTHOGONAL
            .iter()
            .map(|&o| Step::new(o, 1.0))
            .chain(DIAGONAL.iter().map(|&o| Step::new(o, d)))
            .collect();
        Self { steps }
    }

    /// The built-in model for a connectivity option.
    pub fn new(connectivity: Connectivity, diagonal: DiagonalCost) -> Self {
        match connectivity {
            Connectivity::Four => Self::four_connected(),
            Connectivity::Eight => Self::eight_connected_with(diagonal),
        }
    }

    /// A model from an explicit list of steps.
    ///
    /// Every offset must be non-zero and unique, and every cost finite and
    /// strictly positive.
    pub fn custom(steps: Vec<Step>) -> Result<Self, MovementError> {
        if steps.is_empty() {
            return Err(MovementError::NoSteps);
        }
        for (i, step) in steps.iter().enumerate() {
            if step.offset == Offset::ZERO {
                return Err(MovementError::ZeroOffset);
            }
            if !step.cost.is_finite() || step.cost <= 0.0 {
                return Err(MovementError::InvalidCost {
                    offset: step.offset,
                    cost: step.cost,
                });
            }
            if steps[..i].iter().any(|s| s.offset == step.offset) {
                return Err(MovementError::DuplicateOffset(step.offset));
            }
        }
        Ok(Self { steps })
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Cost of moving by `offset`, or `None` if it is not a legal step.
    pub fn step_cost(&self, offset: Offset) -> Option<f64> {
        self.steps
            .iter()
            .find(|s| s.offset == offset)
            .map(|s| s.cost)
    }

    /// Whether `to` is one legal step away from `from`.
    pub fn is_step(&self, from: Coord, to: Coord) -> bool {
        from.checked_offset_to(to)
            .and_then(|o| self.step_cost(o))
            .is_some()
    }

    /// Whether any step moves along both axes at once.
    pub fn allows_diagonal(&self) -> bool {
        self.steps.iter().any(|s| s.offset.is_diagonal())
    }

    /// The neighbours of `c` reachable by one step, with their step costs,
    /// keeping only those for which `keep` returns `true`.
    ///
    /// Candidates whose coordinates would overflow are skipped.
    pub fn neighbors(
        &self,
        c: Coord,
        keep: impl Fn(Coord) -> bool,
    ) -> impl Iterator<Item = (Coord, f64)> {
        self.steps
            .iter()
            .filter_map(move |s| Some((c.checked_add(s.offset)?, s.cost)))
            .filter(move |&(n, _)| keep(n))
    }
}

/// Errors from [`MovementModel::custom`].
#[derive(Debug, Clone, PartialEq)]
pub enum MovementError {
    NoSteps,
    ZeroOffset,
    DuplicateOffset(Offset),
    InvalidCost { offset: Offset, cost: f64 },
}

impl fmt::Display for MovementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSteps => write!(f, "movement model has no steps"),
            Self::ZeroOffset => write!(f, "movement model contains a zero offset"),
            Self::DuplicateOffset(o) => write!(f, "movement model repeats offset {o}"),
            Self::InvalidCost { offset, cost } => {
                write!(f, "step {offset} has invalid cost {cost}")
            }
        }
    }
}

impl std::error::Error for MovementError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_connected_steps() {
        let m = MovementModel::four_connected();
        let offsets: Vec<_> = m.steps().iter().map(|s| s.offset).collect();
        assert_eq!(
            offsets,
            vec![Offset::UP, Offset::DOWN, Offset::RIGHT, Offset::LEFT]
        );
        assert!(m.steps().iter().all(|s| s.cost == 1.0));
        assert!(!m.allows_diagonal());
    }

    #[test]
    fn eight_connected_costs() {
        let m = MovementModel::eight_connected();
        assert_eq!(m.steps().len(), 8);
        assert_eq!(m.step_cost(Offset::new(1, 1)), Some(SQRT_2));
        assert_eq!(m.step_cost(Offset::LEFT), Some(1.0));
        assert_eq!(m.step_cost(Offset::new(2, 0)), None);
        assert!(m.allows_diagonal());

        let rounded = MovementModel::eight_connected_with(DiagonalCost::Rounded);
        assert_eq!(rounded.step_cost(Offset::new(-1, -1)), Some(1.414));
    }

    #[test]
    fn diagonals_follow_orthogonals() {
        let m = MovementModel::eight_connected();
        assert!(m.steps()[..4].iter().all(|s| s.offset.is_orthogonal()));
        assert!(m.steps()[4..].iter().all(|s| s.offset.is_diagonal()));
    }

    #[test]
    fn is_step() {
        let m = MovementModel::four_connected();
        let c = Coord::new(3, 3);
        assert!(m.is_step(c, Coord::new(2, 3)));
        assert!(!m.is_step(c, Coord::new(2, 2)));
        assert!(!m.is_step(c, c));
    }

    #[test]
    fn neighbors_filtered() {
        let m = MovementModel::eight_connected();
        let n: Vec<_> = m
            .neighbors(Coord::new(0, 0), |c| c.row >= 0 && c.col >= 0)
            .collect();
        assert_eq!(
            n,
            vec![
                (Coord::new(1, 0), 1.0),
                (Coord::new(0, 1), 1.0),
                (Coord::new(1, 1), SQRT_2),
            ]
        );
    }

    #[test]
    fn overflowing_neighbors_are_skipped() {
        let m = MovementModel::custom(vec![
            Step::new(Offset::new(i32::MAX, 0), 1.0),
            Step::new(Offset::RIGHT, 1.0),
        ])
        .unwrap();
        let n: Vec<_> = m.neighbors(Coord::new(1, 0), |_| true).collect();
        assert_eq!(n, vec![(Coord::new(1, 1), 1.0)]);
        assert!(!m.is_step(Coord::new(i32::MIN, 0), Coord::new(i32::MAX, 0)));
    }

    #[test]
    fn custom_validation() {
        let knight = vec![
            Step::new(Offset::new(2, 1), 2.0),
            Step::new(Offset::new(1, 2), 2.0),
        ];
        assert!(MovementModel::custom(knight).is_ok());
        assert_eq!(MovementModel::custom(vec![]), Err(MovementError::NoSteps));
        assert_eq!(
            MovementModel::custom(vec![Step::new(Offset::ZERO, 1.0)]),
            Err(MovementError::ZeroOffset)
        );
        assert!(matches!(
            MovementModel::custom(vec![Step::new(Offset::UP, 0.0)]),
            Err(MovementError::InvalidCost { .. })
        ));
        assert!(matches!(
            MovementModel::custom(vec![Step::new(Offset::UP, f64::NAN)]),
            Err(MovementError::InvalidCost { .. })
        ));
        assert_eq!(
            MovementModel::custom(vec![Step::new(Offset::UP, 1.0), Step::new(Offset::UP, 2.0)]),
            Err(MovementError::DuplicateOffset(Offset::UP))
        );
    }

    #[test]
    fn parse_connectivity() {
        assert_eq!("4".parse::<Connectivity>(), Ok(Connectivity::Four));
        assert_eq!("EIGHT".parse::<Connectivity>(), Ok(Connectivity::Eight));
        assert_eq!(
            "8_connected".parse::<Connectivity>(),
            Ok(Connectivity::Eight)
        );
        assert!("6".parse::<Connectivity>().is_err());
        assert_eq!("1.414".parse::<DiagonalCost>(), Ok(DiagonalCost::Rounded));
    }
}
