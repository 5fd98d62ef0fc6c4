//! Output files: the maze structure file and the append-only seed log.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::maze::{Maze, SeedCode};
use crate::solvers::path_directions;

/// File the `s` key appends seed codes to.
pub const DEFAULT_SEED_FILE: &str = "seed.txt";

/// Render the structure file.
///
/// One line per row with an uppercase hex digit per cell holding its wall mask, an
/// empty line, the entry and exit as `x,y`, then the path as direction letters.
pub fn format_maze(maze: &Maze) -> String {
    let grid = maze.grid();
    let mut out = String::with_capacity(grid.cell_count() + grid.height() as usize * 2 + 64);

    for row in grid.cells().chunks(grid.width() as usize) {
        out.extend(row.iter().map(|cell| format!("{:X}", cell.walls().bits())));
        out.push('\n');
    }
    out.push('\n');

    let (entry, exit) = (maze.entry(), maze.exit());
    out.push_str(&format!("{},{}\n", entry.0, entry.1));
    out.push_str(&format!("{},{}\n", exit.0, exit.1));
    out.push_str(&path_directions(maze.path()));
    out.push('\n');
    out
}

/// Overwrite `path` with the structure file of `maze`.
pub fn write_maze(path: impl AsRef<Path>, maze: &Maze) -> io::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format_maze(maze))?;
    tracing::info!("[save] Wrote maze structure to {}", path.display());
    Ok(())
}

/// Append the encoded seed as one line, creating the file if needed.
pub fn append_seed(path: impl AsRef<Path>, code: SeedCode) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", code.encode())?;
    tracing::info!("[save] Appended seed {} to {}", code, path.display());
    Ok(())
}
