//! Terminal demo: animate one search over a maze.
//!
//! ```text
//! pathstep-demo [algorithm] [heuristic] [speed]
//! pathstep-demo bidirectional-astar euclidean 4
//! ```

use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathstep_core::{Coord, Grid};
use pathstep_paths::{Algorithm, HeuristicKind, SearchConfig};
use pathstep_playback::{Playback, PlaybackConfig, PlaybackState, Scene};

const MAZE: &str = "\
S.....#.............#.......
.####.#.#########.#.#.#####.
.#....#.#.......#.#...#.....
.#.####.#.#####.#.#####.###.
.#......#.#...#.#.......#...
.########.#.#.#.#########.#.
..........#.#.#...........#.
#########.#.#.###########.#.
..........#.#.............#E";

const USAGE: &str = "usage: pathstep-demo [algorithm] [heuristic] [speed]";

fn parse_args() -> Result<(SearchConfig, f64), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let mut config = SearchConfig::default();
    if let Some(a) = args.next() {
        if a == "-h" || a == "--help" {
            println!("{USAGE}");
            println!(
                "algorithms: {}",
                Algorithm::ALL.map(Algorithm::name).join(", ")
            );
            println!(
                "heuristics: {}",
                HeuristicKind::ALL.map(HeuristicKind::name).join(", ")
            );
            std::process::exit(0);
        }
        config.algorithm = a.parse()?;
    }
    if let Some(h) = args.next() {
        config.heuristic = h.parse()?;
    }
    let speed = match args.next() {
        Some(s) => s.parse()?,
        None => 1.0,
    };
    Ok((config, speed))
}

fn cell_glyph(grid: &Grid, scene: &Scene, c: Coord) -> (char, Color) {
    if c == grid.start() {
        ('S', Color::Yellow)
    } else if c == grid.end() {
        ('E', Color::Yellow)
    } else if grid.is_wall(c) {
        ('#', Color::DarkGrey)
    } else if scene.on_path(c) {
        ('*', Color::Cyan)
    } else if scene.current == Some(c) {
        ('@', Color::Green)
    } else if let Some(d) = scene.distance(c) {
        let digit = char::from_digit(d % 10, 10).unwrap_or('?');
        (digit, Color::DarkBlue)
    } else {
        ('.', Color::Grey)
    }
}

fn draw(out: &mut impl Write, grid: &Grid, scene: &Scene, title: &str) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), Print(title))?;
    for row in 0..grid.rows() {
        queue!(out, cursor::MoveTo(0, row as u16 + 2))?;
        for col in 0..grid.cols() {
            let (ch, fg) = cell_glyph(grid, scene, Coord::new(row, col));
            queue!(out, SetForegroundColor(fg), Print(ch))?;
        }
    }
    let status = if scene.no_path {
        "no path".to_string()
    } else if !scene.path.is_empty() {
        format!("path length {}", scene.path.len())
    } else {
        format!("visited {}", scene.visited.len())
    };
    queue!(
        out,
        ResetColor,
        cursor::MoveTo(0, grid.rows() as u16 + 3),
        terminal::Clear(ClearType::CurrentLine),
        Print(format!("{status}, {} steps", scene.pulled))
    )?;
    out.flush()
}

fn main() -> Result<(), Box<dyn Error>> {
    let (config, speed) = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            std::process::exit(2);
        }
    };
    let grid = Arc::new(Grid::parse(MAZE)?);
    let mut playback = Playback::new(PlaybackConfig::default().with_speed(speed))?;
    playback.load_search(grid.clone(), &config);

    let title = if config.algorithm.uses_heuristic() {
        format!("{} ({}) at {speed}x", config.algorithm, config.heuristic)
    } else {
        format!("{} at {speed}x", config.algorithm)
    };

    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide, terminal::Clear(ClearType::All))?;
    draw(&mut stdout, &grid, playback.scene(), &title)?;

    let mut next = playback.play();
    while let Some(tick) = next {
        thread::sleep(tick.delay);
        next = playback.on_tick(tick);
        draw(&mut stdout, &grid, playback.scene(), &title)?;
    }

    execute!(
        stdout,
        cursor::MoveTo(0, grid.rows() as u16 + 4),
        cursor::Show
    )?;
    debug_assert_eq!(playback.state(), PlaybackState::Complete);
    Ok(())
}
