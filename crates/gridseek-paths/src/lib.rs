//! Best-first search over 2-D occupancy grids.
//!
//! This crate finds a route between two cells of a
//! [`Grid`](gridseek_core::Grid) with one of two strategies:
//!
//! - **A\*** ([`Strategy::AStar`]): priority `g + h`, cost-optimal when the
//!   heuristic is admissible for the movement model
//! - **Greedy best-first** ([`Strategy::Greedy`]): priority `h` alone,
//!   usually faster, no optimality guarantee
//!
//! Every run goes through [`Search`] (or the [`find_path`] shorthand) and
//! ends in an [`Outcome`].
//!
//! # Building blocks
//!
//! | Type | Role |
//! |---|---|
//! | [`Ledger`] | per-cell costs, parent links and discovery state |
//! | [`Frontier`] | open list keyed by `(priority, insertion order)` |
//! | [`MovementModel`] | legal neighbour offsets and their step costs |
//! | [`Heuristic`] | remaining-cost estimate |
//! | [`reconstruct`] | turns parent links into a [`Route`] |
//!
//! Coordinates are `(row, col)` throughout; convert `(x, y)` input once with
//! [`Coord::from_xy`](gridseek_core::Coord::from_xy).

mod config;
mod engine;
mod frontier;
mod heuristic;
mod ledger;
mod movement;
mod outcome;
mod route;

pub use config::{ParseConfigError, SearchConfig, Strategy};
pub use engine::{Search, SearchStats, find_path};
pub use frontier::Frontier;
pub use heuristic::{Heuristic, chebyshev, euclidean, manhattan};
pub use ledger::{CellRecord, Discovery, Ledger};
pub use movement::{
    Connectivity, DiagonalCost, MovementError, MovementModel, ROUNDED_SQRT_2, Step,
};
pub use outcome::{Endpoint, Outcome, Report, SearchError};
pub use route::{Route, reconstruct, route_cost, validate_route};
