use std::fmt;
use std::time::Duration;

use gridseek_core::Coord;

use crate::engine::SearchStats;
use crate::route::Route;

/// Which end of a search a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// The terminal result of one search.
///
/// Every variant is an ordinary value; a presentation layer decides how to
/// render each one.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The target was reached.
    Success(Route),
    /// Source and target coincide. The route holds that single cell.
    AlreadyAtTarget(Route),
    /// An endpoint lies outside the grid.
    InvalidEndpoint { endpoint: Endpoint, coord: Coord },
    /// An endpoint lies on an impassable cell.
    BlockedEndpoint { endpoint: Endpoint, coord: Coord },
    /// The frontier ran dry before the target was discovered.
    NoPathExists,
    /// A checkpoint asked the search to stop.
    Cancelled { stats: SearchStats },
}

impl Outcome {
    /// The route, for either success variant.
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Success(r) | Self::AlreadyAtTarget(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.route().is_some()
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<Route, SearchError> {
        match self {
            Self::Success(r) | Self::AlreadyAtTarget(r) => Ok(r),
            Self::InvalidEndpoint { endpoint, coord } => {
                Err(SearchError::InvalidEndpoint { endpoint, coord })
            }
            Self::BlockedEndpoint { endpoint, coord } => {
                Err(SearchError::BlockedEndpoint { endpoint, coord })
            }
            Self::NoPathExists => Err(SearchError::NoPathExists),
            Self::Cancelled { stats } => Err(SearchError::Cancelled { stats }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(r) => write!(f, "path: {r} (cost {:.3})", r.cost()),
            Self::AlreadyAtTarget(r) => write!(f, "already at target {r}"),
            Self::InvalidEndpoint { endpoint, coord } => {
                write!(f, "{endpoint} {coord} is outside the grid")
            }
            Self::BlockedEndpoint { endpoint, coord } => {
                write!(f, "{endpoint} {coord} is blocked")
            }
            Self::NoPathExists => write!(f, "no path exists"),
            Self::Cancelled { stats } => {
                write!(f, "search cancelled after {} expansions", stats.expanded)
            }
        }
    }
}

/// Why a search produced no route.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    InvalidEndpoint { endpoint: Endpoint, coord: Coord },
    BlockedEndpoint { endpoint: Endpoint, coord: Coord },
    NoPathExists,
    Cancelled { stats: SearchStats },
    /// The ledger holds no parent chain from this coordinate to a source.
    Unreachable(Coord),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { endpoint, coord } => {
                write!(f, "{endpoint} {coord} is outside the grid")
            }
            Self::BlockedEndpoint { endpoint, coord } => {
                write!(f, "{endpoint} {coord} is blocked")
            }
            Self::NoPathExists => write!(f, "no path exists"),
            Self::Cancelled { stats } => {
                write!(f, "search cancelled after {} expansions", stats.expanded)
            }
            Self::Unreachable(c) => write!(f, "{c} was never reached"),
        }
    }
}

impl std::error::Error for SearchError {}

/// An outcome together with search counters and the wall-clock time spent.
///
/// `elapsed` is a measurement only and has no bearing on the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub outcome: Outcome,
    pub stats: SearchStats,
    pub elapsed: Duration,
}
