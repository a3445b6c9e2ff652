//! Bidirectional A*.
//!
//! Two A* searches run in lockstep: forward from `start` toward `end`, and
//! backward from `end` toward `start`. A node popped by one side that the
//! other side has already closed is a candidate meeting point; the cheapest
//! candidate seen so far is kept. The run stops once neither frontier can
//! beat that candidate, and the path is stitched together at the meeting
//! point.

use std::sync::Arc;

use pathstep_core::{Coord, Grid};

use crate::heuristic::Heuristic;
use crate::open_set::OpenSet;
use crate::reconstruct::PredecessorMap;
use crate::space::SearchSpace;
use crate::step::{Stage, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// One half of the search.
struct Frontier {
    origin: Coord,
    target: Coord,
    space: SearchSpace,
    open: OpenSet<Coord>,
}

impl Frontier {
    fn new(grid: &Grid, origin: Coord, target: Coord, heuristic: &Heuristic, seed: bool) -> Self {
        let mut f = Self {
            origin,
            target,
            space: SearchSpace::new(grid),
            open: OpenSet::new(),
        };
        if seed {
            f.space.set_g(origin, 0);
            f.open.push(origin, heuristic.estimate(origin, target));
        }
        f
    }

    /// Pop the best node that is not closed yet and close it.
    fn pop_open(&mut self) -> Option<Coord> {
        while let Some((c, _)) = self.open.pop() {
            if self.space.close(c) {
                return Some(c);
            }
        }
        None
    }

    /// Lowest `f` on the frontier, ignoring stale entries. An exhausted
    /// frontier can no longer improve anything and reports infinity.
    fn min_f(&mut self) -> f64 {
        let space = &self.space;
        self.open.prune(|c| space.is_closed(*c));
        self.open.peek_key().unwrap_or(f64::INFINITY)
    }

    fn relax(&mut self, grid: &Grid, heuristic: &Heuristic, coord: Coord, distance: u32) {
        let g = distance + 1;
        for n in grid.passable_neighbors(coord) {
            if self.space.is_closed(n) || g >= self.space.g(n) {
                continue;
            }
            self.space.discover(n, g, coord);
            self.open.push(n, f64::from(g) + heuristic.estimate(n, self.target));
        }
    }
}

/// Bidirectional A*, emitting steps from both directions interleaved.
///
/// The two searches alternate one expansion at a time, forward first. When
/// one side runs dry the other keeps going alone. The seeds (`start` forward,
/// `end` backward) are expanded without a `Current` step.
pub struct BidirectionalAStar {
    grid: Arc<Grid>,
    heuristic: Heuristic,
    forward: Frontier,
    backward: Frontier,
    turn: Direction,
    expanding: Direction,
    /// Cheapest meeting so far: total length and the meeting coordinate.
    best: Option<(u32, Coord)>,
    stage: Stage,
}

impl BidirectionalAStar {
    pub fn new(grid: Arc<Grid>, heuristic: Heuristic) -> Self {
        let stage = Stage::initial(&grid);
        let seed = matches!(stage, Stage::Search);
        let (start, end) = (grid.start(), grid.end());
        Self {
            forward: Frontier::new(&grid, start, end, &heuristic, seed),
            backward: Frontier::new(&grid, end, start, &heuristic, seed),
            grid,
            heuristic,
            turn: Direction::Forward,
            expanding: Direction::Forward,
            best: None,
            stage,
        }
    }

    /// The length and coordinate of the best meeting point found so far.
    pub fn meeting(&self) -> Option<(u32, Coord)> {
        self.best
    }

    fn sides(&mut self, dir: Direction) -> (&mut Frontier, &mut Frontier) {
        match dir {
            Direction::Forward => (&mut self.forward, &mut self.backward),
            Direction::Backward => (&mut self.backward, &mut self.forward),
        }
    }

    fn search(&mut self) -> Option<Step> {
        self.stage = Stage::Search;
        let dir = match (self.forward.open.is_empty(), self.backward.open.is_empty()) {
            (true, true) => {
                self.finish();
                return None;
            }
            (false, true) => Direction::Forward,
            (true, false) => Direction::Backward,
            (false, false) => self.turn,
        };
        let (this, other) = self.sides(dir);
        // Only stale entries left on this side; pick again.
        let coord = this.pop_open()?;
        let distance = this.space.g(coord);
        let is_seed = coord == this.origin;

        if other.space.is_closed(coord) {
            let total = distance + other.space.g(coord);
            if self.best.is_none_or(|(best, _)| total < best) {
                log::debug!("bidirectional-astar: meeting at {coord}, length {total}");
                self.best = Some((total, coord));
            }
        }

        self.turn = dir.opposite();
        self.expanding = dir;
        self.stage = Stage::Expand { coord, distance };
        (!is_seed).then_some(Step::Current { coord, distance })
    }

    fn expand(&mut self, coord: Coord, distance: u32) -> Step {
        let frontier = match self.expanding {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
        };
        frontier.relax(&self.grid, &self.heuristic, coord, distance);

        self.stage = Stage::Search;
        if let Some((best, _)) = self.best {
            let best = f64::from(best);
            if self.forward.min_f() >= best && self.backward.min_f() >= best {
                self.finish();
            }
        }
        Step::Visit { coord, distance }
    }

    fn finish(&mut self) {
        self.stage = match self.best {
            Some((len, meeting)) => {
                log::debug!(
                    "bidirectional-astar: path of length {len} via {meeting}, {} + {} nodes",
                    self.forward.space.closed_count(),
                    self.backward.space.closed_count()
                );
                Stage::trace(PredecessorMap::stitch(
                    &self.forward.space.preds,
                    &self.backward.space.preds,
                    self.grid.start(),
                    meeting,
                    self.grid.end(),
                ))
            }
            None => {
                log::debug!("bidirectional-astar: frontiers exhausted without meeting");
                Stage::Fail
            }
        };
    }
}

impl Iterator for BidirectionalAStar {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match std::mem::replace(&mut self.stage, Stage::Done) {
                Stage::Search => {
                    if let Some(step) = self.search() {
                        return Some(step);
                    }
                }
                Stage::Expand { coord, distance } => return Some(self.expand(coord, distance)),
                other => return other.emit(&mut self.stage),
            }
        }
    }
}
