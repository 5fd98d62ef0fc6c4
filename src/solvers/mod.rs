mod bfs;

pub use bfs::solve_bfs;

use crate::maze::{Coord, Direction};

/// Step-by-step direction letters (`N`, `E`, `S`, `W`) of a path.
/// Consecutive coordinates that are not adjacent are skipped.
pub fn path_directions(path: &[Coord]) -> String {
    path.windows(2)
        .filter_map(|pair| Direction::between(pair[0], pair[1]))
        .map(Direction::letter)
        .collect()
}
