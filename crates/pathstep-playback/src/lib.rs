//! Playback of stepwise search runs.
//!
//! [`Playback`] wraps a [`Steps`](pathstep_paths::Steps) sequence and pulls
//! from it either on demand ([`Playback::step`]) or on a timer the host
//! drives with [`Tick`]s. Every pulled step is folded into a [`Scene`], which
//! is what a renderer draws.
//!
//! ```
//! use std::sync::Arc;
//! use pathstep_core::Grid;
//! use pathstep_paths::{Algorithm, SearchConfig};
//! use pathstep_playback::{Playback, PlaybackState};
//!
//! let grid = Arc::new(Grid::parse("S..\n.#.\n..E").unwrap());
//! let mut playback = Playback::default();
//! playback.load_search(grid, &SearchConfig::new(Algorithm::Dijkstra));
//! playback.step();
//! assert_eq!(playback.state(), PlaybackState::Paused);
//! let scene = playback.drain();
//! assert_eq!(scene.path.len(), 4);
//! ```

mod config;
mod controller;
mod scene;

pub use config::{MAX_SPEED, MIN_SPEED, PlaybackConfig, PlaybackError};
pub use controller::{Playback, PlaybackState, Tick};
pub use scene::Scene;
