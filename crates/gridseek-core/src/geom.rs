//! Geometry primitives: [`Coord`] and [`Offset`].
//!
//! The canonical axis order everywhere in this workspace is `(row, col)`.
//! Inputs expressed as `(x, y)` are converted exactly once, through
//! [`Coord::from_xy`], where `x` is the column and `y` is the row.

use std::fmt;
use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid position. Rows grow downward, columns grow to the right.
///
/// Components are signed so that neighbour candidates just outside the grid
/// can be represented and rejected by a bounds check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate from `(row, col)`.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Convert a boundary `(x, y)` pair: `x` is the column, `y` the row.
    #[inline]
    pub const fn from_xy(x: i32, y: i32) -> Self {
        Self { row: y, col: x }
    }

    /// The `(x, y)` pair for this coordinate, for callers that speak x/y.
    #[inline]
    pub const fn to_xy(self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// Return the coordinate shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Like [`shift`](Self::shift), but `None` if either component would
    /// overflow.
    #[inline]
    pub const fn checked_shift(self, drow: i32, dcol: i32) -> Option<Self> {
        match (self.row.checked_add(drow), self.col.checked_add(dcol)) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }

    /// `self + offset`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(self, offset: Offset) -> Option<Self> {
        self.checked_shift(offset.drow, offset.dcol)
    }

    /// The offset that moves `self` onto `to`, or `None` if it does not fit
    /// in an [`Offset`].
    #[inline]
    pub const fn checked_offset_to(self, to: Self) -> Option<Offset> {
        match (to.row.checked_sub(self.row), to.col.checked_sub(self.col)) {
            (Some(drow), Some(dcol)) => Some(Offset::new(drow, dcol)),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Coord {
    /// Interprets the tuple as `(row, col)`.
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add<Offset> for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Offset) -> Self {
        self.shift(rhs.drow, rhs.dcol)
    }
}

impl Sub<Offset> for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Offset) -> Self {
        self.shift(-rhs.drow, -rhs.dcol)
    }
}

impl Sub for Coord {
    type Output = Offset;
    /// The offset that moves `rhs` onto `self`.
    #[inline]
    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A displacement between two coordinates, in `(drow, dcol)` order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub drow: i32,
    pub dcol: i32,
}

impl Offset {
    pub const ZERO: Self = Self::new(0, 0);
    pub const UP: Self = Self::new(-1, 0);
    pub const DOWN: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(0, -1);
    pub const RIGHT: Self = Self::new(0, 1);

    #[inline]
    pub const fn new(drow: i32, dcol: i32) -> Self {
        Self { drow, dcol }
    }

    /// Whether both components are non-zero.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.drow != 0 && self.dcol != 0
    }

    /// Whether exactly one component is non-zero.
    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        (self.drow == 0) != (self.dcol == 0)
    }
}

impl Neg for Offset {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.drow, -self.dcol)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.drow, self.dcol)
    }
}
