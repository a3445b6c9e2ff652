use pathstep_core::{Coord, Grid};

use crate::reconstruct::PredecessorMap;

/// Sentinel distance for nodes not yet discovered.
pub const UNREACHABLE: u32 = u32::MAX;

/// Per-run search state: best-known distances, the closed set and the
/// predecessor map, all flat arrays keyed by packed grid index.
///
/// Created when a run starts and dropped with it; nothing is shared between
/// runs.
pub(crate) struct SearchSpace {
    cols: i32,
    g: Vec<u32>,
    closed: Vec<bool>,
    pub(crate) preds: PredecessorMap,
}

impl SearchSpace {
    pub(crate) fn new(grid: &Grid) -> Self {
        let len = grid.len();
        Self {
            cols: grid.cols(),
            g: vec![UNREACHABLE; len],
            closed: vec![false; len],
            preds: PredecessorMap::new(grid),
        }
    }

    #[inline]
    fn slot(&self, c: Coord) -> usize {
        (c.row * self.cols + c.col) as usize
    }

    /// Best-known distance from the origin, or [`UNREACHABLE`].
    #[inline]
    pub(crate) fn g(&self, c: Coord) -> u32 {
        self.g[self.slot(c)]
    }

    #[inline]
    pub(crate) fn set_g(&mut self, c: Coord, g: u32) {
        let i = self.slot(c);
        self.g[i] = g;
    }

    /// Record a discovery: distance and predecessor in one go.
    #[inline]
    pub(crate) fn discover(&mut self, c: Coord, g: u32, parent: Coord) {
        self.set_g(c, g);
        self.preds.record(c, parent);
    }

    #[inline]
    pub(crate) fn is_discovered(&self, c: Coord) -> bool {
        self.g(c) != UNREACHABLE
    }

    #[inline]
    pub(crate) fn is_closed(&self, c: Coord) -> bool {
        self.closed[self.slot(c)]
    }

    /// Close `c`. Returns `false` if it was already closed.
    #[inline]
    pub(crate) fn close(&mut self, c: Coord) -> bool {
        let i = self.slot(c);
        !std::mem::replace(&mut self.closed[i], true)
    }

    pub(crate) fn closed_count(&self) -> usize {
        self.closed.iter().filter(|&&c| c).count()
    }
}
