//! Depth-first search.

use std::sync::Arc;

use pathstep_core::{Coord, Grid};

use crate::space::SearchSpace;
use crate::step::{Stage, Step};

/// A stack entry: the node, who pushed it, and its depth.
struct Pending {
    coord: Coord,
    parent: Option<Coord>,
    depth: u32,
}

/// Depth-first search over an explicit LIFO stack.
///
/// A node may be pushed several times through different parents; it is
/// checked for prior visitation only when popped, and the first pop claims
/// the parent recorded with that entry. Neighbours are pushed in reverse
/// order so they pop in up, right, down, left order.
pub struct Dfs {
    grid: Arc<Grid>,
    space: SearchSpace,
    stack: Vec<Pending>,
    stage: Stage,
}

impl Dfs {
    pub fn new(grid: Arc<Grid>) -> Self {
        let stage = Stage::initial(&grid);
        let mut stack = Vec::new();
        if matches!(stage, Stage::Search) {
            stack.push(Pending {
                coord: grid.start(),
                parent: None,
                depth: 0,
            });
        }
        Self {
            space: SearchSpace::new(&grid),
            grid,
            stack,
            stage,
        }
    }

    fn search(&mut self) -> Option<Step> {
        let Some(Pending {
            coord,
            parent,
            depth,
        }) = self.stack.pop()
        else {
            log::debug!("dfs: no path after {} nodes", self.space.closed_count());
            self.stage = Stage::Fail;
            return None;
        };
        if !self.space.close(coord) {
            // Stage stays Search; the loop pops again.
            self.stage = Stage::Search;
            return None;
        }
        match parent {
            Some(p) => self.space.discover(coord, depth, p),
            None => self.space.set_g(coord, depth),
        }
        self.stage = Stage::Expand {
            coord,
            distance: depth,
        };
        (coord != self.grid.start()).then_some(Step::Current {
            coord,
            distance: depth,
        })
    }

    fn expand(&mut self, coord: Coord, distance: u32) -> Option<Step> {
        if coord == self.grid.end() {
            log::debug!("dfs: reached {coord} at depth {distance}");
            self.stage = Stage::trace(self.space.preds.trace(self.grid.start(), coord));
            return None;
        }
        for n in self.grid.passable_neighbors(coord).rev() {
            if !self.space.is_closed(n) {
                self.stack.push(Pending {
                    coord: n,
                    parent: Some(coord),
                    depth: distance + 1,
                });
            }
        }
        self.stage = Stage::Search;
        Some(Step::Visit { coord, distance })
    }
}

impl Iterator for Dfs {
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
