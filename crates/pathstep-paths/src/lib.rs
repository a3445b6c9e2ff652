//! Grid searches that run one step at a time.
//!
//! Every algorithm here is a lazy iterator of [`Step`]s over a shared
//! [`Grid`](pathstep_core::Grid). Nothing is computed until a step is pulled,
//! and a run can be abandoned at any point by dropping it.
//!
//! | Algorithm | Type | Path |
//! |---|---|---|
//! | Breadth-first | [`Bfs::new`] | shortest |
//! | Flood fill | [`Bfs::flood_fill`] | shortest, after the whole component |
//! | Depth-first | [`Dfs`] | any |
//! | Dijkstra | [`BestFirst::dijkstra`] | shortest |
//! | A\* | [`BestFirst::astar`] | shortest with an admissible heuristic |
//! | Greedy best-first | [`BestFirst::greedy`] | any |
//! | Bidirectional A\* | [`BidirectionalAStar`] | shortest with a consistent heuristic |
//! | Random walk | [`RandomWalk`] | any, may give up |
//!
//! [`search`] picks one from a [`SearchConfig`] and boxes it as [`Steps`].
//!
//! ```
//! use std::sync::Arc;
//! use pathstep_core::Grid;
//! use pathstep_paths::{Algorithm, RunSummary, SearchConfig, search};
//!
//! let grid = Arc::new(Grid::parse("S.#\n...\n#.E").unwrap());
//! let run = RunSummary::collect(search(grid, &SearchConfig::new(Algorithm::Bfs)));
//! assert_eq!(run.path_len(), 4);
//! ```

mod algorithm;
mod best_first;
mod bfs;
mod bidirectional;
mod config;
mod dfs;
mod distance;
mod heuristic;
mod open_set;
mod random_walk;
mod reconstruct;
mod space;
mod step;
mod summary;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use best_first::BestFirst;
pub use bfs::Bfs;
pub use bidirectional::BidirectionalAStar;
pub use config::{SearchConfig, search, search_with};
pub use dfs::Dfs;
pub use distance::{chebyshev, euclidean, manhattan};
pub use heuristic::{Heuristic, HeuristicFn, HeuristicKind, ParseHeuristicError};
pub use open_set::OpenSet;
pub use random_walk::{DEFAULT_WALK_BUDGET, RandomWalk};
pub use reconstruct::{PredecessorMap, is_valid_walk};
pub use space::UNREACHABLE;
pub use step::{Step, Steps};
pub use summary::RunSummary;
