//! The step protocol: what a search run emits, one pull at a time.

use pathstep_core::{Coord, Grid};

/// One observable event of a search run.
///
/// A run is a finite sequence of these. `Path` steps arrive in order from the
/// node after `start` through `end`. `NoPath` is only ever the last step, and
/// a run contains either `Path` steps or one `NoPath`, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum Step {
    /// The node about to be examined, with its distance from `start`.
    Current { coord: Coord, distance: u32 },
    /// The node has been examined and its neighbours expanded.
    Visit { coord: Coord, distance: u32 },
    /// The node lies on the reconstructed path.
    Path { coord: Coord },
    /// No path exists.
    NoPath,
}

impl Step {
    /// The coordinate the step refers to, if any.
    pub fn coord(&self) -> Option<Coord> {
        match *self {
            Self::Current { coord, .. } | Self::Visit { coord, .. } | Self::Path { coord } => {
                Some(coord)
            }
            Self::NoPath => None,
        }
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPath)
    }
}

/// A lazy, finite, single-pass step sequence.
///
/// Nothing is computed until a step is pulled. To replay a run, start a new
/// one.
pub type Steps = Box<dyn Iterator<Item = Step> + Send>;

/// Where a run's state machine stands between pulls.
pub(crate) enum Stage {
    /// Take the next node off the frontier.
    Search,
    /// `Current` was emitted for this node; goal check and expansion are next.
    Expand { coord: Coord, distance: u32 },
    /// Emitting the reconstructed path.
    Trace(std::vec::IntoIter<Coord>),
    /// Emit `NoPath`, then stop.
    Fail,
    Done,
}

impl Stage {
    /// The stage a run starts in.
    ///
    /// `start == end` has nothing to show. A walled endpoint fails right away.
    pub(crate) fn initial(grid: &Grid) -> Self {
        if grid.start() == grid.end() {
            Self::Done
        } else if !grid.endpoints_open() {
            Self::Fail
        } else {
            Self::Search
        }
    }

    pub(crate) fn trace(path: Vec<Coord>) -> Self {
        Self::Trace(path.into_iter())
    }

    /// Produce the output of a terminal stage, leaving the follow-up stage in
    /// `slot`. `slot` is expected to hold [`Stage::Done`] on entry.
    pub(crate) fn emit(self, slot: &mut Stage) -> Option<Step> {
        match self {
            Self::Trace(mut path) => {
                let coord = path.next()?;
                *slot = Self::Trace(path);
                Some(Step::Path { coord })
            }
            Self::Fail => Some(Step::NoPath),
            Self::Search | Self::Expand { .. } | Self::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_coord() {
        let c = Coord::new(1, 2);
        assert_eq!(Step::Current { coord: c, distance: 3 }.coord(), Some(c));
        assert_eq!(Step::Visit { coord: c, distance: 3 }.coord(), Some(c));
        assert_eq!(Step::Path { coord: c }.coord(), Some(c));
        assert_eq!(Step::NoPath.coord(), None);
        assert!(Step::NoPath.is_no_path());
    }

    #[test]
    fn initial_stage() {
        let same = Grid::open(2, 2, Coord::ZERO, Coord::ZERO).unwrap();
        assert!(matches!(Stage::initial(&same), Stage::Done));
        let walled = Grid::parse("S#\n.e").unwrap();
        assert!(matches!(Stage::initial(&walled), Stage::Fail));
        let open = Grid::parse("S.\n.E").unwrap();
        assert!(matches!(Stage::initial(&open), Stage::Search));
    }

    #[test]
    fn trace_stage_drains_in_order() {
        let a = Coord::new(0, 1);
        let b = Coord::new(0, 2);
        let mut stage = Stage::trace(vec![a, b]);
        let mut out = Vec::new();
        loop {
            let current = std::mem::replace(&mut stage, Stage::Done);
            match current.emit(&mut stage) {
                Some(step) => out.push(step),
                None => break,
            }
        }
        assert_eq!(out, vec![Step::Path { coord: a }, Step::Path { coord: b }]);
    }

    #[test]
    fn fail_stage_emits_once() {
        let mut stage = Stage::Done;
        assert_eq!(Stage::Fail.emit(&mut stage), Some(Step::NoPath));
        assert!(matches!(stage, Stage::Done));
    }
}
