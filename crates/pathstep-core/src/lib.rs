//! **pathstep-core**: the grid model shared by the pathstep crates.
//!
//! This crate provides [`Coord`] (a `(row, col)` cell address) and [`Grid`]
//! (dimensions, start/end and blocked cells), validated once at construction
//! and read-only afterwards.

pub mod geom;
pub mod grid;

pub use geom::Coord;
pub use grid::{Grid, GridError, GridLayout};
