//! Folding a finished run into something easy to assert on.

use std::collections::HashSet;

use pathstep_core::Coord;

use crate::step::Step;

/// Everything a run emitted, grouped by step kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// `Current` steps in emission order.
    pub currents: Vec<(Coord, u32)>,
    /// `Visit` steps in emission order.
    pub visits: Vec<(Coord, u32)>,
    pub path: Vec<Coord>,
    pub no_path: bool,
    /// Total number of steps.
    pub steps: usize,
}

impl RunSummary {
    /// Drain `steps` to the end.
    pub fn collect(steps: impl IntoIterator<Item = Step>) -> Self {
        steps.into_iter().collect()
    }

    pub fn push(&mut self, step: Step) {
        self.steps += 1;
        match step {
            Step::Current { coord, distance } => self.currents.push((coord, distance)),
            Step::Visit { coord, distance } => self.visits.push((coord, distance)),
            Step::Path { coord } => self.path.push(coord),
            Step::NoPath => self.no_path = true,
        }
    }

    /// Number of moves on the emitted path.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Whether the run emitted a path.
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// `Current` plus `Visit` steps.
    pub fn explored(&self) -> usize {
        self.currents.len() + self.visits.len()
    }

    /// Distinct coordinates named by `Current` or `Visit` steps.
    pub fn unique_explored(&self) -> usize {
        self.currents
            .iter()
            .chain(&self.visits)
            .map(|(c, _)| *c)
            .collect::<HashSet<_>>()
            .len()
    }
}

impl FromIterator<Step> for RunSummary {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        let mut summary = Self::default();
        for step in iter {
            summary.push(step);
        }
        summary
    }
}
