use std::fmt;

use gridseek_core::{Coord, Grid};

use crate::ledger::Ledger;
use crate::movement::MovementModel;
use crate::outcome::SearchError;

/// A path from source to target, both inclusive, with its total step cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    path: Vec<Coord>,
    cost: f64,
}

impl Route {
    pub(crate) fn new(path: Vec<Coord>, cost: f64) -> Self {
        Self { path, cost }
    }

    /// The zero-cost route of a search that starts on its target.
    pub(crate) fn single(c: Coord) -> Self {
        Self::new(vec![c], 0.0)
    }

    #[inline]
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Coord> {
        self.path
    }

    /// Sum of the step costs along the path.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of moves (one less than the number of cells).
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    pub fn target(&self) -> Option<Coord> {
        self.path.last().copied()
    }
}

impl fmt::Display for Route {
    /// `(r, c) -> (r, c) -> ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Walk the parent links from `target` back to the source and return the
/// route in source-to-target order.
///
/// The source is recognised as the cell that is its own parent.
pub fn reconstruct(
    ledger: &Ledger,
    target: Coord,
    movement: &MovementModel,
) -> Result<Route, SearchError> {
    let mut path = Vec::new();
    let mut cur = target;
    loop {
        let Some(parent) = ledger.parent(cur) else {
            return Err(SearchError::Unreachable(target));
        };
        path.push(cur);
        if parent == cur {
            break;
        }
        if path.len() > ledger.len() {
            log::warn!("parent chain from {target} does not reach a source");
            return Err(SearchError::Unreachable(target));
        }
        cur = parent;
    }
    path.reverse();

    let Some(cost) = route_cost(&path, movement) else {
        log::warn!("parent chain from {target} contains an illegal step");
        return Err(SearchError::Unreachable(target));
    };
    Ok(Route::new(path, cost))
}

/// Sum of step costs between consecutive coordinates of `path`.
///
/// Returns `None` if some consecutive pair is not a legal step.
pub fn route_cost(path: &[Coord], movement: &MovementModel) -> Option<f64> {
    path.windows(2)
        .map(|w| movement.step_cost(w[0].checked_offset_to(w[1])?))
        .sum()
}

/// Whether `route` could have been produced on `grid` under `movement`:
/// non-empty, every cell in bounds and passable, every move a legal step.
pub fn validate_route(grid: &Grid, route: &Route, movement: &MovementModel) -> bool {
    !route.path.is_empty()
        && route.path.iter().all(|&c| grid.in_bounds(c) && grid.passable(c))
        && route.path.windows(2).all(|w| movement.is_step(w[0], w[1]))
}
