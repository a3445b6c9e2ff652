//! Distance estimates used to rank frontier nodes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use pathstep_core::Coord;
use thiserror::Error;

use crate::distance::{chebyshev, euclidean, manhattan};

/// The built-in heuristics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Euclidean,
    Chebyshev,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [Self::Manhattan, Self::Euclidean, Self::Chebyshev];

    pub fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Chebyshev => "chebyshev",
        }
    }

    /// Estimate the distance from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Coord, to: Coord) -> f64 {
        match self {
            Self::Manhattan => f64::from(manhattan(from, to)),
            Self::Euclidean => euclidean(from, to),
            Self::Chebyshev => f64::from(chebyshev(from, to)),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a heuristic name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic `{0}` (expected manhattan, euclidean or chebyshev)")]
pub struct ParseHeuristicError(pub String);

impl FromStr for HeuristicKind {
    type Err = ParseHeuristicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| ParseHeuristicError(s.to_string()))
    }
}

/// Signature of a caller-supplied heuristic.
pub type HeuristicFn = dyn Fn(Coord, Coord) -> f64 + Send + Sync;

/// A heuristic: one of the built-ins or a caller-supplied function.
///
/// Admissibility is the caller's responsibility. A* and bidirectional A* only
/// return shortest paths when the estimate never overestimates.
#[derive(Clone)]
pub enum Heuristic {
    Builtin(HeuristicKind),
    Custom(Arc<HeuristicFn>),
}

impl Heuristic {
    /// Wrap a custom estimate function.
    pub fn custom(f: impl Fn(Coord, Coord) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Estimate the distance from `from` to `to`.
    #[inline]
    pub fn estimate(&self, from: Coord, to: Coord) -> f64 {
        match self {
            Self::Builtin(kind) => kind.estimate(from, to),
            Self::Custom(f) => f(from, to),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::Builtin(HeuristicKind::default())
    }
}

impl From<HeuristicKind> for Heuristic {
    fn from(kind: HeuristicKind) -> Self {
        Self::Builtin(kind)
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(kind) => f.debug_tuple("Heuristic::Builtin").field(kind).finish(),
            Self::Custom(_) => f.write_str("Heuristic::Custom(..)"),
        }
    }
}
