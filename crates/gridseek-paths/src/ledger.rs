use gridseek_core::{Coord, Grid};

/// Search state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discovery {
    /// Never reached by the search.
    #[default]
    Undiscovered,
    /// Reached and waiting in the frontier.
    Open,
    /// Removed from the frontier and expanded. Final.
    Visited,
}

/// Per-cell bookkeeping for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRecord {
    /// Best known cost from the source.
    pub g: f64,
    /// Heuristic estimate to the target, computed on first discovery.
    pub h: f64,
    /// Frontier priority: `g + h` for A*, `h` for greedy search.
    pub f: f64,
    /// Predecessor on the best known route. The source is its own parent.
    pub parent: Option<Coord>,
    pub state: Discovery,
}

impl CellRecord {
    /// The record of a cell the search has not reached.
    pub const UNDISCOVERED: Self = Self {
        g: f64::INFINITY,
        h: f64::INFINITY,
        f: f64::INFINITY,
        parent: None,
        state: Discovery::Undiscovered,
    };

    #[inline]
    pub fn is_discovered(&self) -> bool {
        self.state != Discovery::Undiscovered
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.state == Discovery::Visited
    }
}

impl Default for CellRecord {
    fn default() -> Self {
        Self::UNDISCOVERED
    }
}

/// Dense arena of [`CellRecord`]s, one per grid cell, indexed row-major.
///
/// Coordinates outside the ledger read as undiscovered and writes to them
/// are ignored.
#[derive(Debug, Clone)]
pub struct Ledger {
    records: Vec<CellRecord>,
    rows: i32,
    cols: i32,
}

impl Ledger {
    /// Create a ledger of undiscovered records for a `rows` x `cols` grid.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        Self {
            records: vec![CellRecord::UNDISCOVERED; rows as usize * cols as usize],
            rows,
            cols,
        }
    }

    /// Create a ledger sized to `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.cols())
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    fn idx(&self, c: Coord) -> Option<usize> {
        if c.row < 0 || c.row >= self.rows || c.col < 0 || c.col >= self.cols {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// The record at `c`.
    pub fn get(&self, c: Coord) -> CellRecord {
        match self.idx(c) {
            Some(i) => self.records[i],
            None => CellRecord::UNDISCOVERED,
        }
    }

    /// Overwrite the costs and parent at `c`.
    ///
    /// The caller decides whether the new values are an improvement. An
    /// undiscovered cell becomes open; a visited cell stays visited.
    pub fn update(&mut self, c: Coord, g: f64, h: f64, f: f64, parent: Coord) {
        let Some(i) = self.idx(c) else {
            return;
        };
        let rec = &mut self.records[i];
        rec.g = g;
        rec.h = h;
        rec.f = f;
        rec.parent = Some(parent);
        if rec.state == Discovery::Undiscovered {
            rec.state = Discovery::Open;
        }
    }

    pub fn mark_visited(&mut self, c: Coord) {
        if let Some(i) = self.idx(c) {
            self.records[i].state = Discovery::Visited;
        }
    }

    #[inline]
    pub fn is_visited(&self, c: Coord) -> bool {
        self.get(c).is_visited()
    }

    #[inline]
    pub fn is_discovered(&self, c: Coord) -> bool {
        self.get(c).is_discovered()
    }

    #[inline]
    pub fn parent(&self, c: Coord) -> Option<Coord> {
        self.get(c).parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_cells_are_undiscovered() {
        let l = Ledger::new(3, 3);
        let rec = l.get(Coord::new(1, 1));
        assert_eq!(rec, CellRecord::UNDISCOVERED);
        assert!(rec.g.is_infinite());
        assert!(!l.is_discovered(Coord::new(1, 1)));
        assert!(!l.is_visited(Coord::new(1, 1)));
        assert_eq!(l.parent(Coord::new(1, 1)), None);
    }

    #[test]
    fn zero_priority_is_still_discovered() {
        let mut l = Ledger::new(2, 2);
        let c = Coord::new(0, 1);
        l.update(c, 0.0, 0.0, 0.0, c);
        assert!(l.is_discovered(c));
        assert_eq!(l.get(c).f, 0.0);
        assert_eq!(l.get(c).state, Discovery::Open);
    }

    #[test]
    fn update_overwrites_unconditionally() {
        let mut l = Ledger::new(2, 2);
        let c = Coord::new(1, 1);
        l.update(c, 1.0, 2.0, 3.0, Coord::new(0, 0));
        l.update(c, 5.0, 2.0, 7.0, Coord::new(1, 0));
        let rec = l.get(c);
        assert_eq!(rec.g, 5.0);
        assert_eq!(rec.f, 7.0);
        assert_eq!(rec.parent, Some(Coord::new(1, 0)));
    }

    #[test]
    fn visited_is_sticky() {
        let mut l = Ledger::new(2, 2);
        let c = Coord::new(0, 0);
        l.update(c, 0.0, 1.0, 1.0, c);
        l.mark_visited(c);
        l.update(c, 0.0, 1.0, 0.5, c);
        assert!(l.is_visited(c));
        assert_eq!(l.get(c).f, 0.5);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut l = Ledger::new(2, 2);
        let c = Coord::new(-1, 4);
        l.update(c, 1.0, 1.0, 1.0, Coord::ZERO);
        l.mark_visited(c);
        assert!(!l.is_discovered(c));
        assert!(!l.is_visited(c));
    }

    #[test]
    fn sized_to_grid() {
        let g = Grid::new(4, 7, true);
        let l = Ledger::for_grid(&g);
        assert_eq!(l.len(), 28);
        assert!(!l.is_empty());
    }
}
