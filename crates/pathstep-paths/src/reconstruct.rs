//! Predecessor bookkeeping and path reconstruction.

use pathstep_core::{Coord, Grid};

/// Maps a discovered coordinate to the coordinate that discovered it.
///
/// Storage is flat and keyed by the grid's packed index, so lookups never
/// hash. Coordinates outside the grid the map was built for are a
/// programming error and panic.
#[derive(Debug, Clone)]
pub struct PredecessorMap {
    cols: i32,
    parents: Vec<Option<Coord>>,
}

impl PredecessorMap {
    /// An empty map sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            cols: grid.cols(),
            parents: vec![None; grid.len()],
        }
    }

    #[inline]
    fn slot(&self, c: Coord) -> usize {
        debug_assert!(c.row >= 0 && c.col >= 0 && c.col < self.cols);
        (c.row * self.cols + c.col) as usize
    }

    /// Record that `parent` discovered `child`, replacing any earlier entry.
    #[inline]
    pub fn record(&mut self, child: Coord, parent: Coord) {
        let i = self.slot(child);
        self.parents[i] = Some(parent);
    }

    /// The recorded predecessor of `c`, if any.
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Coord> {
        self.parents[self.slot(c)]
    }

    /// Number of coordinates with a recorded predecessor.
    pub fn len(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk back from `goal` to `start` and return the path in start-to-goal
    /// order, excluding `start` and including `goal`.
    ///
    /// # Panics
    ///
    /// If a coordinate on the way has no predecessor, or the predecessors form
    /// a cycle. Either means the search that built the map is broken.
    pub fn trace(&self, start: Coord, goal: Coord) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut cur = goal;
        while cur != start {
            if path.len() >= self.parents.len() {
                panic!("predecessor cycle while tracing {start} -> {goal}");
            }
            path.push(cur);
            cur = match self.get(cur) {
                Some(p) => p,
                None => panic!("{cur} has no predecessor while tracing {start} -> {goal}"),
            };
        }
        path.reverse();
        path
    }

    /// Join a forward and a backward search at `meeting`.
    ///
    /// The forward half is traced from `start` to `meeting`; the backward half
    /// follows `backward` from `meeting` until it reaches `end`. The result
    /// runs from the node after `start` through `end`, and contains `meeting`
    /// exactly once (or not at all when `meeting == start`).
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`trace`](Self::trace), for either half.
    pub fn stitch(
        forward: &PredecessorMap,
        backward: &PredecessorMap,
        start: Coord,
        meeting: Coord,
        end: Coord,
    ) -> Vec<Coord> {
        let mut path = forward.trace(start, meeting);
        let mut cur = meeting;
        let mut hops = 0;
        while cur != end {
            if hops >= backward.parents.len() {
                panic!("predecessor cycle while tracing {meeting} -> {end}");
            }
            cur = match backward.get(cur) {
                Some(p) => p,
                None => panic!("{cur} has no backward predecessor while tracing {meeting} -> {end}"),
            };
            path.push(cur);
            hops += 1;
        }
        path
    }
}

/// Whether `path` is a walk on `grid` starting next to `start`.
///
/// Every element must be passable, and each must be adjacent to the one
/// before it (the first one to `start`). An empty path is trivially valid.
pub fn is_valid_walk(grid: &Grid, start: Coord, path: &[Coord]) -> bool {
    let mut prev = start;
    for &c in path {
        if !grid.is_passable(c) || !prev.is_adjacent(c) {
            return false;
        }
        prev = c;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_grid() -> Grid {
        Grid::open(1, 5, Coord::new(0, 0), Coord::new(0, 4)).unwrap()
    }

    fn c(col: i32) -> Coord {
        Coord::new(0, col)
    }

    #[test]
    fn trace_excludes_start_includes_goal() {
        let g = line_grid();
        let mut m = PredecessorMap::new(&g);
        for i in 1..5 {
            m.record(c(i), c(i - 1));
        }
        assert_eq!(m.trace(c(0), c(4)), vec![c(1), c(2), c(3), c(4)]);
        assert_eq!(m.trace(c(0), c(1)), vec![c(1)]);
        assert!(m.trace(c(0), c(0)).is_empty());
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn stitch_in_the_middle() {
        let g = line_grid();
        let mut fwd = PredecessorMap::new(&g);
        let mut bwd = PredecessorMap::new(&g);
        fwd.record(c(1), c(0));
        fwd.record(c(2), c(1));
        bwd.record(c(3), c(4));
        bwd.record(c(2), c(3));
        let path = PredecessorMap::stitch(&fwd, &bwd, c(0), c(2), c(4));
        assert_eq!(path, vec![c(1), c(2), c(3), c(4)]);
    }

    #[test]
    fn stitch_at_the_endpoints() {
        let g = line_grid();
        let mut fwd = PredecessorMap::new(&g);
        let mut bwd = PredecessorMap::new(&g);
        for i in 1..5 {
            fwd.record(c(i), c(i - 1));
            bwd.record(c(i - 1), c(i));
        }
        let at_end = PredecessorMap::stitch(&fwd, &bwd, c(0), c(4), c(4));
        let at_start = PredecessorMap::stitch(&fwd, &bwd, c(0), c(0), c(4));
        assert_eq!(at_end, vec![c(1), c(2), c(3), c(4)]);
        assert_eq!(at_start, at_end);
    }

    #[test]
    #[should_panic(expected = "has no predecessor")]
    fn missing_predecessor_panics() {
        let g = line_grid();
        let mut m = PredecessorMap::new(&g);
        m.record(c(4), c(3));
        m.trace(c(0), c(4));
    }

    #[test]
    #[should_panic(expected = "predecessor cycle")]
    fn cycle_panics() {
        let g = line_grid();
        let mut m = PredecessorMap::new(&g);
        m.record(c(2), c(1));
        m.record(c(1), c(2));
        m.trace(c(0), c(2));
    }

    #[test]
    fn walk_validation() {
        let g = Grid::parse("S.#\n..E").unwrap();
        let s = g.start();
        assert!(is_valid_walk(&g, s, &[]));
        assert!(is_valid_walk(&g, s, &[Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)]));
        // (0, 2) is walled
        assert!(!is_valid_walk(&g, s, &[Coord::new(0, 1), Coord::new(0, 2)]));
        // jump from start
        assert!(!is_valid_walk(&g, s, &[Coord::new(1, 1)]));
    }
}
