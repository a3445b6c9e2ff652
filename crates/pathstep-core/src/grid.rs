//! The search grid: dimensions, endpoints and blocked cells.
//!
//! A [`Grid`] is validated once at construction and is read-only afterwards.
//! Search runs share it through an `Arc`, so nothing can mutate it while a run
//! is in progress.

use thiserror::Error;

use crate::geom::Coord;

/// Reasons a grid description is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// `rows` or `cols` is zero or negative.
    #[error("grid size must be positive, got {rows}x{cols}")]
    NonPositiveSize { rows: i32, cols: i32 },
    /// `rows * cols` does not fit the packed `i32` index.
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: i32, cols: i32 },
    /// The start coordinate lies outside the grid.
    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Coord),
    /// The end coordinate lies outside the grid.
    #[error("end {0} is outside the grid")]
    EndOutOfBounds(Coord),
    /// A wall coordinate lies outside the grid.
    #[error("wall {0} is outside the grid")]
    WallOutOfBounds(Coord),
    /// ASCII input: a line has a different width than the first one.
    #[error("line {line} has width {width}, expected {expected}")]
    RaggedLine {
        line: usize,
        width: usize,
        expected: usize,
    },
    /// ASCII input: an unknown character.
    #[error("invalid character `{ch}` at {pos}")]
    InvalidChar { ch: char, pos: Coord },
    /// ASCII input: no `S` marker.
    #[error("grid has no start marker")]
    MissingStart,
    /// ASCII input: no `E` marker.
    #[error("grid has no end marker")]
    MissingEnd,
    /// ASCII input: more than one `S` or `E` marker.
    #[error("duplicate {what} marker at {pos}")]
    DuplicateMarker { what: &'static str, pos: Coord },
}

/// A rectangular, unit-cost, 4-connected grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    start: Coord,
    end: Coord,
    walls: Vec<bool>,
}

impl Grid {
    /// Build and validate a grid.
    ///
    /// `start` and `end` may be walled; searches report that as no path.
    pub fn new(
        rows: i32,
        cols: i32,
        start: Coord,
        end: Coord,
        walls: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::NonPositiveSize { rows, cols });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(GridError::TooLarge { rows, cols });
        }
        let mut grid = Self {
            rows,
            cols,
            start,
            end,
            walls: vec![false; (rows as usize) * (cols as usize)],
        };
        if !grid.contains(start) {
            return Err(GridError::StartOutOfBounds(start));
        }
        if !grid.contains(end) {
            return Err(GridError::EndOutOfBounds(end));
        }
        for w in walls {
            let i = grid.index(w).ok_or(GridError::WallOutOfBounds(w))?;
            grid.walls[i] = true;
        }
        Ok(grid)
    }

    /// An open grid with no walls.
    pub fn open(rows: i32, cols: i32, start: Coord, end: Coord) -> Result<Self, GridError> {
        Self::new(rows, cols, start, end, [])
    }

    /// Parse a grid from ASCII art.
    ///
    /// `#` is a wall, `.` is open, `S`/`E` mark the endpoints. Lowercase `s`/`e`
    /// mark an endpoint that sits on a wall. Surrounding whitespace is
    /// trimmed from the whole string and from each line.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let mut start = None;
        let mut end = None;
        let mut walls = Vec::new();
        let mut width = None;
        let mut rows = 0;

        for (r, line) in s.trim().lines().enumerate() {
            let line = line.trim();
            let w = line.chars().count();
            match width {
                None => width = Some(w),
                Some(expected) if expected != w => {
                    return Err(GridError::RaggedLine {
                        line: r,
                        width: w,
                        expected,
                    });
                }
                Some(_) => {}
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Coord::new(r as i32, c as i32);
                match ch {
                    '.' => {}
                    '#' => walls.push(pos),
                    'S' | 's' => {
                        if start.replace(pos).is_some() {
                            return Err(GridError::DuplicateMarker { what: "start", pos });
                        }
                        if ch == 's' {
                            walls.push(pos);
                        }
                    }
                    'E' | 'e' => {
                        if end.replace(pos).is_some() {
                            return Err(GridError::DuplicateMarker { what: "end", pos });
                        }
                        if ch == 'e' {
                            walls.push(pos);
                        }
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                }
            }
            rows += 1;
        }

        let start = start.ok_or(GridError::MissingStart)?;
        let end = end.ok_or(GridError::MissingEnd)?;
        Self::new(rows, width.unwrap_or(0) as i32, start, end, walls)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// Always `false`: a valid grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Packed key of an in-bounds coordinate (`row * cols + col`).
    #[inline]
    pub fn index(&self, c: Coord) -> Option<usize> {
        if self.contains(c) {
            Some((c.row * self.cols + c.col) as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord {
        let cols = self.cols as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Whether `c` is walled. Out-of-bounds coordinates count as walls.
    #[inline]
    pub fn is_wall(&self, c: Coord) -> bool {
        self.index(c).is_none_or(|i| self.walls[i])
    }

    /// Whether `c` is inside the grid and not walled.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        !self.is_wall(c)
    }

    /// Whether neither endpoint is walled.
    pub fn endpoints_open(&self) -> bool {
        self.is_passable(self.start) && self.is_passable(self.end)
    }

    /// Passable neighbours of `c`, in up, right, down, left order.
    pub fn passable_neighbors(&self, c: Coord) -> impl DoubleEndedIterator<Item = Coord> + '_ {
        c.neighbors_4().into_iter().filter(move |&n| self.is_passable(n))
    }

    /// All walled coordinates in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = Coord> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, w)| **w)
            .map(move |(i, _)| self.coord(i))
    }

    /// Render back to the ASCII form accepted by [`parse`](Self::parse).
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.len() + self.rows as usize);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let p = Coord::new(r, c);
                let wall = self.is_wall(p);
                let ch = match (p == self.start, p == self.end, wall) {
                    (true, _, false) => 'S',
                    (true, _, true) => 's',
                    (_, true, false) => 'E',
                    (_, true, true) => 'e',
                    (_, _, true) => '#',
                    _ => '.',
                };
                out.push(ch);
            }
            if r + 1 < self.rows {
                out.push('\n');
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// GridLayout (serde)
// ---------------------------------------------------------------------------

/// Plain description of a grid, as supplied by a consumer.
///
/// Converting into a [`Grid`] runs the same validation as [`Grid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub rows: i32,
    pub cols: i32,
    pub start: Coord,
    pub end: Coord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: Vec<Coord>,
}

impl TryFrom<GridLayout> for Grid {
    type Error = GridError;

    fn try_from(layout: GridLayout) -> Result<Self, Self::Error> {
        Grid::new(layout.rows, layout.cols, layout.start, layout.end, layout.walls)
    }
}

impl Grid {
    /// Describe this grid as a [`GridLayout`].
    pub fn to_layout(&self) -> GridLayout {
        GridLayout {
            rows: self.rows,
            cols: self.cols,
            start: self.start,
            end: self.end,
            walls: self.walls().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAZE: &str = "\
S.#..
..#.#
....E";

    #[test]
    fn rejects_bad_dimensions() {
        let err = Grid::open(0, 3, Coord::ZERO, Coord::ZERO).unwrap_err();
        assert_eq!(err, GridError::NonPositiveSize { rows: 0, cols: 3 });
        assert!(Grid::open(3, -1, Coord::ZERO, Coord::ZERO).is_err());
    }

    #[test]
    fn rejects_sizes_that_overflow_the_index() {
        let err = Grid::open(65_536, 65_536, Coord::ZERO, Coord::ZERO).unwrap_err();
        assert_eq!(err, GridError::TooLarge { rows: 65_536, cols: 65_536 });
        assert!(Grid::open(i32::MAX, 2, Coord::ZERO, Coord::ZERO).is_err());
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let err = Grid::open(3, 3, Coord::new(3, 0), Coord::ZERO).unwrap_err();
        assert_eq!(err, GridError::StartOutOfBounds(Coord::new(3, 0)));
        let err = Grid::open(3, 3, Coord::ZERO, Coord::new(0, -1)).unwrap_err();
        assert_eq!(err, GridError::EndOutOfBounds(Coord::new(0, -1)));
    }

    #[test]
    fn rejects_out_of_bounds_walls() {
        let err = Grid::new(2, 2, Coord::ZERO, Coord::new(1, 1), [Coord::new(2, 2)]).unwrap_err();
        assert_eq!(err, GridError::WallOutOfBounds(Coord::new(2, 2)));
    }

    #[test]
    fn walled_endpoints_are_accepted() {
        let g = Grid::new(2, 2, Coord::ZERO, Coord::new(1, 1), [Coord::ZERO]).unwrap();
        assert!(g.is_wall(g.start()));
        assert!(!g.endpoints_open());
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::open(3, 4, Coord::ZERO, Coord::new(2, 3)).unwrap();
        assert_eq!(g.len(), 12);
        for r in 0..3 {
            for c in 0..4 {
                let p = Coord::new(r, c);
                let i = g.index(p).unwrap();
                assert_eq!(g.coord(i), p);
            }
        }
        assert_eq!(g.index(Coord::new(1, 2)), Some(6));
        assert_eq!(g.index(Coord::new(3, 0)), None);
        assert_eq!(g.index(Coord::new(0, 4)), None);
    }

    #[test]
    fn parse_maze() {
        let g = Grid::parse(MAZE).unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 5));
        assert_eq!(g.start(), Coord::new(0, 0));
        assert_eq!(g.end(), Coord::new(2, 4));
        let walls: Vec<_> = g.walls().collect();
        assert_eq!(
            walls,
            vec![Coord::new(0, 2), Coord::new(1, 2), Coord::new(1, 4)]
        );
        assert_eq!(g.to_ascii(), MAZE);
    }

    #[test]
    fn parse_walled_endpoint() {
        let g = Grid::parse("s.E").unwrap();
        assert!(g.is_wall(g.start()));
        assert_eq!(g.to_ascii(), "s.E");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Grid::parse("..\nE"),
            Err(GridError::RaggedLine {
                line: 1,
                width: 1,
                expected: 2,
            })
        );
        assert_eq!(
            Grid::parse("S?E"),
            Err(GridError::InvalidChar {
                ch: '?',
                pos: Coord::new(0, 1)
            })
        );
        assert_eq!(Grid::parse("..E"), Err(GridError::MissingStart));
        assert_eq!(Grid::parse("S.."), Err(GridError::MissingEnd));
        assert_eq!(
            Grid::parse("S.S\n..E"),
            Err(GridError::DuplicateMarker {
                what: "start",
                pos: Coord::new(0, 2)
            })
        );
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let g = Grid::parse(MAZE).unwrap();
        let n: Vec<_> = g.passable_neighbors(Coord::new(0, 1)).collect();
        // up is off-grid, right is a wall
        assert_eq!(n, vec![Coord::new(1, 1), Coord::new(0, 0)]);
        assert!(g.is_wall(Coord::new(-1, 0)));
    }

    #[test]
    fn layout_round_trip() {
        let g = Grid::parse(MAZE).unwrap();
        let back = Grid::try_from(g.to_layout()).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn error_messages() {
        let err = GridError::StartOutOfBounds(Coord::new(9, 9));
        assert_eq!(err.to_string(), "start (9, 9) is outside the grid");
    }
}
