//! Unguided random walk.

use std::sync::Arc;

use pathstep_core::{Coord, Grid};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::space::SearchSpace;
use crate::step::{Stage, Step};

/// Default number of moves before a walk gives up.
pub const DEFAULT_WALK_BUDGET: u32 = 1000;

/// A walker that moves to a uniformly random passable neighbour on every
/// pull until it lands on `end` or runs out of moves.
///
/// Each move emits `Current` for the cell stepped onto, then `Visit` for it
/// unless it is `end`. The reported distance is the number of moves made so
/// far, not the distance from `start`. Cells may be entered any number of
/// times, but only the first entry records a predecessor, so the emitted path
/// is a valid walk that is usually far from shortest.
pub struct RandomWalk<R = StdRng> {
    grid: Arc<Grid>,
    rng: R,
    space: SearchSpace,
    pos: Coord,
    moves: u32,
    budget: u32,
    stage: Stage,
}

impl RandomWalk<StdRng> {
    /// A walk driven by [`StdRng`]. Without a seed a fresh one is drawn, so
    /// two unseeded walks over the same grid will differ.
    pub fn new(grid: Arc<Grid>, seed: Option<u64>, budget: u32) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        log::trace!("randomwalk: seed {seed}");
        Self::with_rng(grid, StdRng::seed_from_u64(seed), budget)
    }
}

impl<R: Rng> RandomWalk<R> {
    pub fn with_rng(grid: Arc<Grid>, rng: R, budget: u32) -> Self {
        let stage = Stage::initial(&grid);
        let mut space = SearchSpace::new(&grid);
        space.set_g(grid.start(), 0);
        Self {
            pos: grid.start(),
            grid,
            rng,
            space,
            moves: 0,
            budget,
            stage,
        }
    }

    /// Moves made so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    fn search(&mut self) -> Option<Step> {
        if self.moves >= self.budget {
            log::debug!("randomwalk: budget of {} moves exhausted", self.budget);
            self.stage = Stage::Fail;
            return None;
        }
        let mut options = [Coord::ZERO; 4];
        let mut n = 0;
        for c in self.grid.passable_neighbors(self.pos) {
            options[n] = c;
            n += 1;
        }
        if n == 0 {
            log::debug!("randomwalk: stuck at {}", self.pos);
            self.stage = Stage::Fail;
            return None;
        }
        let next = options[self.rng.random_range(0..n)];
        self.moves += 1;
        if !self.space.is_discovered(next) {
            self.space.discover(next, self.moves, self.pos);
        }
        self.pos = next;
        self.stage = Stage::Expand {
            coord: next,
            distance: self.moves,
        };
        Some(Step::Current {
            coord: next,
            distance: self.moves,
        })
    }

    fn expand(&mut self, coord: Coord, distance: u32) -> Option<Step> {
        if coord == self.grid.end() {
            log::debug!("randomwalk: reached {coord} after {distance} moves");
            self.stage = Stage::trace(self.space.preds.trace(self.grid.start(), coord));
            return None;
        }
        self.stage = Stage::Search;
        Some(Step::Visit { coord, distance })
    }
}

impl<R: Rng> Iterator for RandomWalk<R> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::is_valid_walk;
    use crate::summary::RunSummary;

    fn grid(s: &str) -> Arc<Grid> {
        Arc::new(Grid::parse(s).unwrap())
    }

    #[test]
    fn reaches_the_end_of_a_short_corridor() {
        let g = grid("S.E");
        let s = RunSummary::collect(RandomWalk::new(g.clone(), Some(7), DEFAULT_WALK_BUDGET));
        assert!(!s.no_path);
        assert_eq!(s.path, vec![Coord::new(0, 1), Coord::new(0, 2)]);
    }

    #[test]
    fn emitted_path_is_a_valid_walk() {
        let g = grid("\
S....
.#.#.
.....
.#.#.
....E");
        for seed in 0..20 {
            let s = RunSummary::collect(RandomWalk::new(g.clone(), Some(seed), DEFAULT_WALK_BUDGET));
            if s.found() {
                assert!(is_valid_walk(&g, g.start(), &s.path), "seed {seed}");
                assert_eq!(s.path.last(), Some(&g.end()));
            } else {
                assert!(s.no_path);
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        let g = grid("\
S...
....
...E");
        let a: Vec<_> = RandomWalk::new(g.clone(), Some(42), 50).collect();
        let b: Vec<_> = RandomWalk::new(g, Some(42), 50).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn surrounded_start_gives_up_at_once() {
        let g = grid("\
.#..
#S#.
.#.E");
        let steps: Vec<_> = RandomWalk::new(g, Some(1), DEFAULT_WALK_BUDGET).collect();
        assert_eq!(steps, vec![Step::NoPath]);
    }

    #[test]
    fn budget_exhaustion() {
        let g = grid("S..E");
        let mut walk = RandomWalk::new(g, Some(3), 1);
        let steps: Vec<_> = walk.by_ref().collect();
        assert_eq!(
            steps,
            vec![
                Step::Current { coord: Coord::new(0, 1), distance: 1 },
                Step::Visit { coord: Coord::new(0, 1), distance: 1 },
                Step::NoPath,
            ]
        );
        assert_eq!(walk.moves(), 1);
    }

    #[test]
    fn zero_budget_is_no_path() {
        let steps: Vec<_> = RandomWalk::new(grid("S.E"), None, 0).collect();
        assert_eq!(steps, vec![Step::NoPath]);
    }

    #[test]
    fn start_equals_end_emits_nothing() {
        let g = Arc::new(Grid::open(3, 3, Coord::new(1, 1), Coord::new(1, 1)).unwrap());
        assert_eq!(RandomWalk::new(g, None, DEFAULT_WALK_BUDGET).count(), 0);
    }

    #[test]
    fn unreachable_end_runs_out_of_budget() {
        let g = grid("S.#.E");
        let mut walk = RandomWalk::new(g, Some(9), 25);
        let steps: Vec<_> = walk.by_ref().collect();
        assert_eq!(walk.moves(), 25);
        assert_eq!(steps.last(), Some(&Step::NoPath));
        assert_eq!(steps.len(), 25 * 2 + 1);
    }
}
