//! Run configuration and the entry points that turn it into steps.

use std::sync::Arc;

use pathstep_core::Grid;

use crate::algorithm::Algorithm;
use crate::best_first::BestFirst;
use crate::bfs::Bfs;
use crate::bidirectional::BidirectionalAStar;
use crate::dfs::Dfs;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::random_walk::{DEFAULT_WALK_BUDGET, RandomWalk};
use crate::step::Steps;

/// What to run, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Ignored by algorithms that do not rank by estimate.
    pub heuristic: HeuristicKind,
    /// Seed for the random walk. `None` draws a fresh one per run.
    pub seed: Option<u64>,
    /// Moves a random walk may make before giving up.
    pub walk_budget: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            heuristic: HeuristicKind::Manhattan,
            seed: None,
            walk_budget: DEFAULT_WALK_BUDGET,
        }
    }
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_walk_budget(mut self, budget: u32) -> Self {
        self.walk_budget = budget;
        self
    }
}

/// Start a run over `grid` with a built-in heuristic.
///
/// Nothing is computed until the first step is pulled.
pub fn search(grid: Arc<Grid>, config: &SearchConfig) -> Steps {
    search_with(grid, config, config.heuristic.into())
}

/// Start a run with an explicit heuristic, which may be a custom one.
/// `config.heuristic` is ignored.
pub fn search_with(grid: Arc<Grid>, config: &SearchConfig, heuristic: Heuristic) -> Steps {
    log::debug!(
        "starting {} on a {}x{} grid, {} -> {}",
        config.algorithm,
        grid.rows(),
        grid.cols(),
        grid.start(),
        grid.end()
    );
    match config.algorithm {
        Algorithm::Bfs => Box::new(Bfs::new(grid)),
        Algorithm::Dfs => Box::new(Dfs::new(grid)),
        Algorithm::Dijkstra => Box::new(BestFirst::dijkstra(grid)),
        Algorithm::AStar => Box::new(BestFirst::astar(grid, heuristic)),
        Algorithm::Greedy => Box::new(BestFirst::greedy(grid, heuristic)),
        Algorithm::FloodFill => Box::new(Bfs::flood_fill(grid)),
        Algorithm::RandomWalk => Box::new(RandomWalk::new(grid, config.seed, config.walk_budget)),
        Algorithm::BidirectionalAStar => Box::new(BidirectionalAStar::new(grid, heuristic)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;
    use crate::summary::RunSummary;
    use pathstep_core::Coord;

    fn open_5x5() -> Arc<Grid> {
        Arc::new(Grid::open(5, 5, Coord::new(0, 0), Coord::new(4, 4)).unwrap())
    }

    #[test]
    fn defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.algorithm, Algorithm::AStar);
        assert_eq!(c.heuristic, HeuristicKind::Manhattan);
        assert_eq!(c.seed, None);
        assert_eq!(c.walk_budget, 1000);
    }

    #[test]
    fn open_grid_lengths() {
        let g = open_5x5();
        for algorithm in Algorithm::ALL {
            if algorithm == Algorithm::RandomWalk || algorithm == Algorithm::Dfs {
                continue;
            }
            let s = RunSummary::collect(search(g.clone(), &SearchConfig::new(algorithm)));
            assert_eq!(s.path_len(), 8, "{algorithm}");
        }
    }

    #[test]
    fn single_wall_detour() {
        let g = Arc::new(
            Grid::new(5, 5, Coord::new(0, 0), Coord::new(0, 4), [Coord::new(0, 2)]).unwrap(),
        );
        for algorithm in [Algorithm::AStar, Algorithm::Dijkstra] {
            let s = RunSummary::collect(search(g.clone(), &SearchConfig::new(algorithm)));
            assert_eq!(s.path_len(), 6, "{algorithm}");
        }
    }

    #[test]
    fn start_equals_end_for_everyone() {
        let g = Arc::new(Grid::open(4, 4, Coord::new(2, 1), Coord::new(2, 1)).unwrap());
        for algorithm in Algorithm::ALL {
            assert_eq!(search(g.clone(), &SearchConfig::new(algorithm)).count(), 0, "{algorithm}");
        }
    }

    #[test]
    fn surrounded_endpoints_for_everyone() {
        let boxed_start = Arc::new(
            Grid::parse(
                "\
.#...
#S#..
.#..E",
            )
            .unwrap(),
        );
        let boxed_end = Arc::new(
            Grid::parse(
                "\
S..#.
..#E#
...#.",
            )
            .unwrap(),
        );
        for g in [boxed_start, boxed_end] {
            for algorithm in Algorithm::ALL {
                let config = SearchConfig::new(algorithm).with_seed(5);
                let steps: Vec<_> = search(g.clone(), &config).collect();
                assert_eq!(steps.last(), Some(&Step::NoPath), "{algorithm}");
                assert!(!steps.iter().any(|s| matches!(s, Step::Path { .. })));
            }
        }
    }

    #[test]
    fn custom_heuristic() {
        let g = open_5x5();
        let zero = Heuristic::custom(|_, _| 0.0);
        let s = RunSummary::collect(search_with(g, &SearchConfig::new(Algorithm::AStar), zero));
        assert_eq!(s.path_len(), 8);
    }

    #[test]
    fn seeded_random_walk_is_reproducible() {
        let g = open_5x5();
        let config = SearchConfig::new(Algorithm::RandomWalk).with_seed(11).with_walk_budget(40);
        let a: Vec<_> = search(g.clone(), &config).collect();
        let b: Vec<_> = search(g, &config).collect();
        assert_eq!(a, b);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let c: SearchConfig = serde_json::from_str(r#"{"algorithm":"bfs"}"#).unwrap();
        assert_eq!(c, SearchConfig::new(Algorithm::Bfs));

        let c: SearchConfig =
            serde_json::from_str(r#"{"heuristic":"chebyshev","seed":3,"walk_budget":10}"#).unwrap();
        assert_eq!(c.algorithm, Algorithm::AStar);
        assert_eq!(c.heuristic, HeuristicKind::Chebyshev);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.walk_budget, 10);
    }
}
