//! Priority-ordered searches: Dijkstra, A* and greedy best-first.
//!
//! All three share one engine and differ only in how the frontier is ranked
//! and whether a discovered node can be relaxed again.

use std::sync::Arc;

use pathstep_core::{Coord, Grid};

use crate::heuristic::Heuristic;
use crate::open_set::OpenSet;
use crate::space::SearchSpace;
use crate::step::{Stage, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ranking {
    /// `g`: Dijkstra.
    Cost,
    /// `g + h`: A*.
    CostPlusEstimate,
    /// `h` only: greedy best-first. First discovery wins.
    Estimate,
}

impl Ranking {
    fn label(self) -> &'static str {
        match self {
            Self::Cost => "dijkstra",
            Self::CostPlusEstimate => "astar",
            Self::Estimate => "greedy",
        }
    }
}

/// A best-first search over a binary min-heap.
///
/// Closed nodes are skipped on pop. Each expansion emits `Current` (except for
/// `start`), checks for the goal, then emits `Visit` and relaxes neighbours.
/// Equal keys pop in insertion order.
pub struct BestFirst {
    grid: Arc<Grid>,
    heuristic: Heuristic,
    ranking: Ranking,
    space: SearchSpace,
    open: OpenSet<Coord>,
    stage: Stage,
}

impl BestFirst {
    /// Dijkstra: ranked by distance from `start`.
    ///
    /// With unit edges, nodes are visited in non-decreasing distance order.
    pub fn dijkstra(grid: Arc<Grid>) -> Self {
        Self::new(grid, Heuristic::default(), Ranking::Cost)
    }

    /// A*: ranked by `g + h`, with Dijkstra-style relaxation.
    pub fn astar(grid: Arc<Grid>, heuristic: Heuristic) -> Self {
        Self::new(grid, heuristic, Ranking::CostPlusEstimate)
    }

    /// Greedy best-first: ranked by `h` alone.
    ///
    /// A node keeps the predecessor that discovered it first, even if a cheaper
    /// route turns up later, so the path is not guaranteed to be shortest.
    pub fn greedy(grid: Arc<Grid>, heuristic: Heuristic) -> Self {
        Self::new(grid, heuristic, Ranking::Estimate)
    }

    fn new(grid: Arc<Grid>, heuristic: Heuristic, ranking: Ranking) -> Self {
        let stage = Stage::initial(&grid);
        let mut bf = Self {
            space: SearchSpace::new(&grid),
            grid,
            heuristic,
            ranking,
            open: OpenSet::new(),
            stage,
        };
        if matches!(bf.stage, Stage::Search) {
            let start = bf.grid.start();
            bf.space.set_g(start, 0);
            let key = bf.key(start, 0);
            bf.open.push(start, key);
        }
        bf
    }

    fn key(&self, c: Coord, g: u32) -> f64 {
        match self.ranking {
            Ranking::Cost => f64::from(g),
            Ranking::CostPlusEstimate => f64::from(g) + self.heuristic.estimate(c, self.grid.end()),
            Ranking::Estimate => self.heuristic.estimate(c, self.grid.end()),
        }
    }

    fn search(&mut self) -> Option<Step> {
        let Some((coord, _)) = self.open.pop() else {
            log::debug!(
                "{}: no path after {} nodes",
                self.ranking.label(),
                self.space.closed_count()
            );
            self.stage = Stage::Fail;
            return None;
        };
        self.stage = Stage::Search;
        if !self.space.close(coord) {
            return None;
        }
        let distance = self.space.g(coord);
        self.stage = Stage::Expand { coord, distance };
        (coord != self.grid.start()).then_some(Step::Current { coord, distance })
    }

    fn expand(&mut self, coord: Coord, distance: u32) -> Option<Step> {
        if coord == self.grid.end() {
            log::debug!(
                "{}: reached {coord} at distance {distance} after {} nodes",
                self.ranking.label(),
                self.space.closed_count()
            );
            self.stage = Stage::trace(self.space.preds.trace(self.grid.start(), coord));
            return None;
        }
        let g = distance + 1;
        for n in self.grid.passable_neighbors(coord) {
            if self.space.is_closed(n) {
                continue;
            }
            let skip = match self.ranking {
                Ranking::Estimate => self.space.is_discovered(n),
                Ranking::Cost | Ranking::CostPlusEstimate => g >= self.space.g(n),
            };
            if skip {
                continue;
            }
            self.space.discover(n, g, coord);
            let key = self.key(n, g);
            self.open.push(n, key);
        }
        self.stage = Stage::Search;
        Some(Step::Visit { coord, distance })
    }
}

impl Iterator for BestFirst {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            let step = match std::mem::replace(&mut self.stage, Stage::Done) {
                Stage::Search => self.search(),
                Stage::Expand { coord, distance } => self.expand(coord, distance),
                other => return other.emit(&mut self.stage),
            };
            if step.is_some() {
                return step;
            }
        }
    }
}
