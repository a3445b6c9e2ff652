//! Breadth-first search and flood fill.

use std::collections::VecDeque;
use std::sync::Arc;

use pathstep_core::{Coord, Grid};

use crate::space::SearchSpace;
use crate::step::{Stage, Step};

/// Breadth-first search over a FIFO queue.
///
/// Nodes are marked discovered when they are queued, so each one is queued
/// and expanded at most once and keeps the predecessor that found it first.
///
/// In flood-fill mode ([`Bfs::flood_fill`]) reaching `end` is only recorded;
/// traversal continues until the whole component of `start` has been
/// visited, and the path is emitted afterwards.
pub struct Bfs {
    grid: Arc<Grid>,
    space: SearchSpace,
    queue: VecDeque<Coord>,
    stage: Stage,
    flood: bool,
    found_end: bool,
}

impl Bfs {
    /// Breadth-first search that stops at `end`.
    pub fn new(grid: Arc<Grid>) -> Self {
        Self::with_mode(grid, false)
    }

    /// Flood fill: breadth-first traversal of the full component of `start`.
    pub fn flood_fill(grid: Arc<Grid>) -> Self {
        Self::with_mode(grid, true)
    }

    fn with_mode(grid: Arc<Grid>, flood: bool) -> Self {
        let stage = Stage::initial(&grid);
        let mut space = SearchSpace::new(&grid);
        let mut queue = VecDeque::new();
        if matches!(stage, Stage::Search) {
            space.set_g(grid.start(), 0);
            queue.push_back(grid.start());
        }
        Self {
            grid,
            space,
            queue,
            stage,
            flood,
            found_end: false,
        }
    }

    fn label(&self) -> &'static str {
        if self.flood { "floodfill" } else { "bfs" }
    }

    fn search(&mut self) -> Option<Step> {
        let Some(coord) = self.queue.pop_front() else {
            if self.found_end {
                self.stage = Stage::trace(self.space.preds.trace(self.grid.start(), self.grid.end()));
            } else {
                log::debug!(
                    "{}: no path after exhausting {} nodes",
                    self.label(),
                    self.space.closed_count()
                );
                self.stage = Stage::Fail;
            }
            return None;
        };
        self.space.close(coord);
        let distance = self.space.g(coord);
        self.stage = Stage::Expand { coord, distance };
        (coord != self.grid.start()).then_some(Step::Current { coord, distance })
    }

    fn expand(&mut self, coord: Coord, distance: u32) -> Option<Step> {
        if coord == self.grid.end() {
            if !self.flood {
                log::debug!("bfs: reached {coord} at distance {distance}");
                self.stage = Stage::trace(self.space.preds.trace(self.grid.start(), coord));
                return None;
            }
            self.found_end = true;
        }
        for n in self.grid.passable_neighbors(coord) {
            if self.space.is_discovered(n) {
                continue;
            }
            self.space.discover(n, distance + 1, coord);
            self.queue.push_back(n);
        }
        self.stage = Stage::Search;
        Some(Step::Visit { coord, distance })
    }
}

impl Iterator for Bfs {
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
