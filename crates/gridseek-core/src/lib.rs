//! **gridseek-core** — occupancy grid and coordinate types.
//!
//! This crate provides the leaf types shared by the *gridseek* search
//! crates: the canonical `(row, col)` [`Coord`], step [`Offset`]s and the
//! immutable passability [`Grid`].

pub mod geom;
pub mod grid;

pub use geom::{Coord, Offset};
pub use grid::{Grid, GridError};
