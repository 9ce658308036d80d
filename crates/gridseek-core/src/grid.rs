//! An immutable passability matrix.
//!
//! [`Grid`] stores one `bool` per cell in a dense row-major buffer. It is
//! built once (typically by a loader outside this workspace) and then only
//! queried, so a single grid can be shared read-only between any number of
//! concurrent searches.

use std::fmt;

use crate::geom::Coord;

/// A rectangular occupancy grid: `true` cells are passable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<bool>,
    rows: i32,
    cols: i32,
}

impl Grid {
    /// Create a `rows` x `cols` grid with every cell set to `passable`.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(rows: i32, cols: i32, passable: bool) -> Self {
        Self::from_fn(rows, cols, |_| passable)
    }

    /// Create a grid by evaluating `f` at every coordinate, row by row.
    pub fn from_fn(rows: i32, cols: i32, mut f: impl FnMut(Coord) -> bool) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Coord::new(row, col)));
            }
        }
        Self { cells, rows, cols }
    }

    /// Create a fully passable grid, then block every coordinate in `blocked`.
    ///
    /// Blocked coordinates outside the grid are ignored.
    pub fn with_blocked(rows: i32, cols: i32, blocked: impl IntoIterator<Item = Coord>) -> Self {
        let mut grid = Self::new(rows, cols, true);
        for c in blocked {
            if let Some(i) = grid.index(c) {
                grid.cells[i] = false;
            }
        }
        grid
    }

    /// Build a grid from explicit rows.
    ///
    /// Fails if there are no cells at all, if the rows differ in length, or
    /// if either dimension does not fit in an `i32`.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::Empty);
        };
        let cols = first.as_ref().len();
        let (nrows, ncols) = dimensions(rows.len(), cols)?;
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            cells,
            rows: nrows,
            cols: ncols,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Whether the cell at `c` can be entered.
    ///
    /// Callers are expected to check [`in_bounds`](Self::in_bounds) first;
    /// out-of-bounds coordinates report `false`.
    #[inline]
    pub fn passable(&self, c: Coord) -> bool {
        match self.index(c) {
            Some(i) => self.cells[i],
            None => false,
        }
    }

    /// Number of passable cells.
    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|&&p| p).count()
    }

    /// Convert a coordinate to a dense row-major index. `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if !self.in_bounds(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Convert a dense index back to a coordinate.
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every coordinate with its passability.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &p)| (self.coord(i), p))
    }
}

fn dimensions(rows: usize, cols: usize) -> Result<(i32, i32), GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::Empty);
    }
    match (i32::try_from(rows), i32::try_from(cols)) {
        (Ok(r), Ok(c)) if rows.checked_mul(cols).is_some() => Ok((r, c)),
        _ => Err(GridError::TooLarge { rows, cols }),
    }
}

/// Errors that can occur when building a [`Grid`] from rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows with no columns.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A dimension exceeds `i32::MAX`, or the cell count overflows `usize`.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid: no cells"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has {found} columns, expected {expected}"
            ),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid: {rows}x{cols} exceeds the coordinate range")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    /// Serialized as a list of rows of booleans.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cols = self.cols.max(1) as usize;
        let rows: Vec<&[bool]> = self.cells.chunks(cols).collect();
        serde::Serialize::serialize(&rows, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = <Vec<Vec<bool>> as serde::Deserialize>::deserialize(deserializer)?;
        Grid::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
