//! What a consumer draws: the state accumulated from the steps pulled so far.

use std::collections::HashMap;

use pathstep_core::Coord;
use pathstep_paths::Step;

/// Accumulated presentation state.
///
/// - `Current` moves the highlight.
/// - `Visit` records the cell with its distance. A revisit updates the
///   distance but keeps the original position in [`visit_order`](Self::visit_order).
/// - `Path` appends to the path.
/// - `NoPath` raises the terminal flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub current: Option<Coord>,
    pub visited: HashMap<Coord, u32>,
    /// Visited cells in first-visit order.
    pub visit_order: Vec<Coord>,
    pub path: Vec<Coord>,
    pub no_path: bool,
    /// Steps applied so far.
    pub pulled: usize,
    pub last: Option<Step>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, step: Step) {
        match step {
            Step::Current { coord, .. } => self.current = Some(coord),
            Step::Visit { coord, distance } => {
                if self.visited.insert(coord, distance).is_none() {
                    self.visit_order.push(coord);
                }
            }
            Step::Path { coord } => self.path.push(coord),
            Step::NoPath => self.no_path = true,
        }
        self.pulled += 1;
        self.last = Some(step);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_visited(&self, c: Coord) -> bool {
        self.visited.contains_key(&c)
    }

    pub fn distance(&self, c: Coord) -> Option<u32> {
        self.visited.get(&c).copied()
    }

    pub fn on_path(&self, c: Coord) -> bool {
        self.path.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rules() {
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);
        let mut s = Scene::new();
        s.apply(Step::Visit { coord: a, distance: 0 });
        s.apply(Step::Current { coord: b, distance: 1 });
        assert_eq!(s.current, Some(b));
        assert!(s.is_visited(a));
        assert!(!s.is_visited(b));
        s.apply(Step::Path { coord: b });
        assert_eq!(s.path, vec![b]);
        assert!(s.on_path(b));
        assert_eq!(s.pulled, 3);
        assert_eq!(s.last, Some(Step::Path { coord: b }));
        assert!(!s.no_path);
    }

    #[test]
    fn revisit_keeps_first_position() {
        let a = Coord::new(1, 1);
        let b = Coord::new(1, 2);
        let mut s = Scene::new();
        s.apply(Step::Visit { coord: a, distance: 1 });
        s.apply(Step::Visit { coord: b, distance: 2 });
        s.apply(Step::Visit { coord: a, distance: 3 });
        assert_eq!(s.visit_order, vec![a, b]);
        assert_eq!(s.distance(a), Some(3));
    }

    #[test]
    fn no_path_and_clear() {
        let mut s = Scene::new();
        s.apply(Step::NoPath);
        assert!(s.no_path);
        s.clear();
        assert_eq!(s, Scene::default());
    }
}
