use std::ops::ControlFlow;
use std::time::Instant;

use gridseek_core::{Coord, Grid};

use crate::config::{SearchConfig, Strategy};
use crate::frontier::Frontier;
use crate::ledger::Ledger;
use crate::movement::MovementModel;
use crate::outcome::{Endpoint, Outcome, Report};
use crate::route::{Route, reconstruct};

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells removed from the frontier and expanded.
    pub expanded: usize,
    /// Entries pushed onto the frontier, the source included.
    pub pushed: usize,
    /// Popped entries discarded because their cell was already visited.
    pub stale: usize,
}

/// A best-first search over a borrowed [`Grid`].
///
/// One `Search` may be run any number of times; each run allocates its own
/// ledger and frontier and drops them before returning.
///
/// The search stops as soon as the target is discovered as a neighbour, not
/// when it is popped. Under A* the route is still cost-optimal when the
/// heuristic equals the step cost between the target and each of its
/// neighbours: Euclidean with either built-in model and exact diagonals, or
/// Manhattan on the 4-connected model.
#[derive(Debug, Clone)]
pub struct Search<'g> {
    grid: &'g Grid,
    config: SearchConfig,
    movement: MovementModel,
}

impl<'g> Search<'g> {
    /// A search over `grid` with the default options.
    pub fn new(grid: &'g Grid) -> Self {
        Self::with_config(grid, SearchConfig::default())
    }

    pub fn with_config(grid: &'g Grid, config: SearchConfig) -> Self {
        Self {
            grid,
            config,
            movement: config.movement_model(),
        }
    }

    /// Replace the movement model the config selected with a custom one.
    pub fn with_movement(mut self, movement: MovementModel) -> Self {
        self.movement = movement;
        self
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn movement(&self) -> &MovementModel {
        &self.movement
    }

    /// Search from `source` to `target`.
    pub fn run(&self, source: Coord, target: Coord) -> Outcome {
        self.run_with(source, target, |_| ControlFlow::Continue(()))
    }

    /// Like [`run`](Self::run), also reporting counters and elapsed time.
    pub fn run_timed(&self, source: Coord, target: Coord) -> Report {
        let start = Instant::now();
        let (outcome, stats) = self.execute(source, target, |_| ControlFlow::Continue(()));
        Report {
            outcome,
            stats,
            elapsed: start.elapsed(),
        }
    }

    /// Search from `source` to `target`, consulting `checkpoint` before each
    /// expansion.
    ///
    /// Returning `ControlFlow::Break(())` stops the search with
    /// [`Outcome::Cancelled`]. This is where a caller injects a deadline or
    /// an expansion budget.
    pub fn run_with(
        &self,
        source: Coord,
        target: Coord,
        checkpoint: impl FnMut(&SearchStats) -> ControlFlow<()>,
    ) -> Outcome {
        self.execute(source, target, checkpoint).0
    }

    fn validate(&self, source: Coord, target: Coord) -> Option<Outcome> {
        for (endpoint, coord) in [(Endpoint::Source, source), (Endpoint::Target, target)] {
            if !self.grid.in_bounds(coord) {
                return Some(Outcome::InvalidEndpoint { endpoint, coord });
            }
        }
        for (endpoint, coord) in [(Endpoint::Source, source), (Endpoint::Target, target)] {
            if !self.grid.passable(coord) {
                return Some(Outcome::BlockedEndpoint { endpoint, coord });
            }
        }
        if source == target {
            return Some(Outcome::AlreadyAtTarget(Route::single(source)));
        }
        None
    }

    fn execute(
        &self,
        source: Coord,
        target: Coord,
        mut checkpoint: impl FnMut(&SearchStats) -> ControlFlow<()>,
    ) -> (Outcome, SearchStats) {
        let mut stats = SearchStats::default();
        if let Some(outcome) = self.validate(source, target) {
            log::debug!("search {source} -> {target}: {outcome}");
            return (outcome, stats);
        }

        let strategy = self.config.strategy;
        let heuristic = self.config.heuristic;
        log::debug!("search {source} -> {target} ({})", self.config);
        if strategy == Strategy::AStar && !heuristic.is_admissible(&self.movement) {
            log::warn!(
                "{heuristic} heuristic can overestimate under this movement model; \
                 A* routes may not be cost-optimal"
            );
        }

        let grid = self.grid;
        let mut ledger = Ledger::for_grid(grid);
        let mut frontier = Frontier::with_capacity(grid.passable_count());

        let h0 = heuristic.estimate(source, target);
        let f0 = strategy.priority(0.0, h0);
        ledger.update(source, 0.0, h0, f0, source);
        frontier.push(f0, source);
        stats.pushed += 1;

        while let Some((priority, current)) = frontier.pop_min() {
            if ledger.is_visited(current) {
                stats.stale += 1;
                continue;
            }
            if checkpoint(&stats).is_break() {
                log::debug!("search {source} -> {target} cancelled: {stats:?}");
                return (Outcome::Cancelled { stats }, stats);
            }

            ledger.mark_visited(current);
            stats.expanded += 1;
            let current_g = ledger.get(current).g;
            log::trace!("expand {current} f={priority:.3} g={current_g:.3}");

            let enterable = |c: Coord| grid.in_bounds(c) && grid.passable(c);
            for (next, step_cost) in self.movement.neighbors(current, enterable) {
                let g_new = current_g + step_cost;

                if next == target {
                    let h = heuristic.estimate(next, target);
                    ledger.update(next, g_new, h, strategy.priority(g_new, h), current);
                    let outcome = match reconstruct(&ledger, target, &self.movement) {
                        Ok(route) => Outcome::Success(route),
                        Err(e) => {
                            log::warn!("search {source} -> {target}: {e}");
                            Outcome::NoPathExists
                        }
                    };
                    log::debug!("search {source} -> {target}: {outcome}; {stats:?}");
                    return (outcome, stats);
                }

                let rec = ledger.get(next);
                if rec.is_visited() {
                    continue;
                }
                let h_new = if rec.is_discovered() {
                    rec.h
                } else {
                    heuristic.estimate(next, target)
                };
                let f_new = strategy.priority(g_new, h_new);
                if !rec.is_discovered() || f_new < rec.f {
                    ledger.update(next, g_new, h_new, f_new, current);
                    frontier.push(f_new, next);
                    stats.pushed += 1;
                }
            }
        }

        log::debug!("search {source} -> {target}: no path; {stats:?}");
        (Outcome::NoPathExists, stats)
    }
}

/// Run one search from `source` to `target` on `grid` with `config`.
pub fn find_path(grid: &Grid, source: Coord, target: Coord, config: &SearchConfig) -> Outcome {
    Search::with_config(grid, *config).run(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn diagonal_shortcut_on_open_grid() {
        let grid = Grid::new(3, 3, true);
        let out = Search::new(&grid).run(c(0, 0), c(2, 2));
        let route = out.route().unwrap();
        assert_eq!(route.path(), &[c(0, 0), c(1, 1), c(2, 2)]);
        assert_eq!(route.cost(), 2.0 * SQRT_2);
    }

    #[test]
    fn validation_touches_nothing() {
        let grid = Grid::with_blocked(3, 3, [c(0, 0)]);
        let search = Search::new(&grid);
        let report = search.run_timed(c(0, 0), c(2, 2));
        assert_eq!(
            report.outcome,
            Outcome::BlockedEndpoint {
                endpoint: Endpoint::Source,
                coord: c(0, 0)
            }
        );
        assert_eq!(report.stats, SearchStats::default());

        let report = search.run_timed(c(1, 1), c(3, 1));
        assert_eq!(
            report.outcome,
            Outcome::InvalidEndpoint {
                endpoint: Endpoint::Target,
                coord: c(3, 1)
            }
        );
        assert_eq!(report.stats, SearchStats::default());
    }

    #[test]
    fn bounds_are_checked_before_passability() {
        let grid = Grid::with_blocked(2, 2, [c(0, 0)]);
        let out = Search::new(&grid).run(c(0, 0), c(5, 5));
        assert_eq!(
            out,
            Outcome::InvalidEndpoint {
                endpoint: Endpoint::Target,
                coord: c(5, 5)
            }
        );
    }

    #[test]
    fn already_at_target() {
        let grid = Grid::new(2, 2, true);
        let out = Search::new(&grid).run(c(1, 0), c(1, 0));
        match out {
            Outcome::AlreadyAtTarget(r) => {
                assert_eq!(r.path(), &[c(1, 0)]);
                assert_eq!(r.cost(), 0.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn one_step_is_success_not_already_there() {
        let grid = Grid::new(1, 2, true);
        let out = Search::new(&grid).run(c(0, 0), c(0, 1));
        assert!(matches!(out, Outcome::Success(ref r) if r.steps() == 1));
    }

    #[test]
    fn checkpoint_cancels() {
        let grid = Grid::new(20, 20, true);
        let out = Search::new(&grid).run_with(c(0, 0), c(19, 19), |stats| {
            if stats.expanded >= 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        match out {
            Outcome::Cancelled { stats } => assert_eq!(stats.expanded, 3),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn stale_entries_are_skipped() {
        // A wall across the middle forces re-pushes around its ends. Each cell
        // is still expanded at most once.
        let grid = Grid::with_blocked(5, 5, [c(2, 1), c(2, 2), c(2, 3)]);
        let search = Search::with_config(&grid, SearchConfig::astar());
        let report = search.run_timed(c(0, 2), c(4, 2));
        assert!(report.outcome.is_success());
        assert!(report.stats.expanded <= grid.passable_count());
        assert!(report.stats.pushed >= report.stats.expanded);
    }

    #[test]
    fn custom_movement_model() {
        use crate::movement::Step;
        use gridseek_core::Offset;

        // Only rightward and downward moves.
        let movement = MovementModel::custom(vec![
            Step::new(Offset::RIGHT, 1.0),
            Step::new(Offset::DOWN, 1.0),
        ])
        .unwrap();
        let grid = Grid::new(3, 3, true);
        let search = Search::new(&grid).with_movement(movement);
        assert_eq!(search.run(c(0, 0), c(2, 2)).route().map(|r| r.cost()), Some(4.0));
        assert_eq!(search.run(c(2, 2), c(0, 0)), Outcome::NoPathExists);
    }

    #[test]
    fn huge_custom_offset_is_treated_as_off_grid() {
        use crate::movement::Step;
        use gridseek_core::Offset;

        let movement = MovementModel::custom(vec![
            Step::new(Offset::new(i32::MAX, 0), 1.0),
            Step::new(Offset::RIGHT, 1.0),
        ])
        .unwrap();
        let grid = Grid::new(3, 3, true);
        let out = Search::new(&grid).with_movement(movement).run(c(1, 0), c(1, 2));
        let route = out.into_result().unwrap();
        assert_eq!(route.path(), &[c(1, 0), c(1, 1), c(1, 2)]);
        assert_eq!(route.cost(), 2.0);
    }

    #[test]
    fn find_path_uses_config() {
        let grid = Grid::new(3, 3, true);
        let out = find_path(&grid, c(0, 0), c(2, 2), &SearchConfig::four_connected());
        assert_eq!(out.route().map(|r| r.cost()), Some(4.0));
    }
}
