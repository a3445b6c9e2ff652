//! Selecting an algorithm by name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every search the crate can run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[cfg_attr(feature = "serde", serde(rename = "bfs"))]
    Bfs,
    #[cfg_attr(feature = "serde", serde(rename = "dfs"))]
    Dfs,
    #[cfg_attr(feature = "serde", serde(rename = "dijkstra"))]
    Dijkstra,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "astar"))]
    AStar,
    #[cfg_attr(feature = "serde", serde(rename = "greedy"))]
    Greedy,
    #[cfg_attr(feature = "serde", serde(rename = "floodfill"))]
    FloodFill,
    #[cfg_attr(feature = "serde", serde(rename = "randomwalk"))]
    RandomWalk,
    #[cfg_attr(feature = "serde", serde(rename = "bidirectional-astar"))]
    BidirectionalAStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Self::Bfs,
        Self::Dfs,
        Self::Dijkstra,
        Self::AStar,
        Self::Greedy,
        Self::FloodFill,
        Self::RandomWalk,
        Self::BidirectionalAStar,
    ];

    /// The name used on the command line and in serialized configs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
            Self::Greedy => "greedy",
            Self::FloodFill => "floodfill",
            Self::RandomWalk => "randomwalk",
            Self::BidirectionalAStar => "bidirectional-astar",
        }
    }

    /// Whether the heuristic setting affects this algorithm.
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Self::AStar | Self::Greedy | Self::BidirectionalAStar)
    }

    /// Whether the emitted path is guaranteed shortest (given an admissible
    /// heuristic where one is used).
    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            Self::Bfs | Self::Dijkstra | Self::AStar | Self::FloodFill | Self::BidirectionalAStar
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}`")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}
