use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use super::LinkObserver;
use crate::maze::{Coord, Grid};

/// Only this fraction of the dead-end walls is knocked down.
const KEEP_DIVISOR: usize = 5;

/// Open some dead ends to add loops to a perfect maze.
///
/// Candidates are the walls of interior, non-reserved cells with exactly three walls,
/// towards non-reserved neighbors. A fifth of them, picked at random, are removed.
pub fn unperfect(grid: &mut Grid, rng: &mut StdRng, on_link: &mut LinkObserver<'_>) {
    let mut candidates: Vec<(Coord, Coord)> = Vec::new();

    for y in 1..grid.height().saturating_sub(1) {
        for x in 1..grid.width().saturating_sub(1) {
            let cell = &grid[(x, y)];
            if cell.is_reserved() || cell.count_walls() != 3 {
                continue;
            }
            candidates.extend(
                grid.neighbors((x, y))
                    .filter(|&(direction, neighbor)| {
                        !grid[neighbor].is_reserved() && cell.has_wall(direction)
                    })
                    .map(|(_, neighbor)| ((x, y), neighbor)),
            );
        }
    }

    candidates.shuffle(rng);
    candidates.truncate(candidates.len() / KEEP_DIVISOR);

    while !candidates.is_empty() {
        let (cell, chosen) = candidates.swap_remove(rng.random_range(0..candidates.len()));
        // Two facing dead ends can both list the same wall
        if grid.link(cell, chosen) {
            on_link(grid, cell, chosen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_small_grids_have_no_interior() {
        for (width, height) in [(1, 1), (2, 5), (5, 2)] {
            let mut grid = Grid::new(width, height).unwrap();
            unperfect(&mut grid, &mut get_rng(Some(0)), &mut |_, _, _| {
                panic!("no wall should be removed")
            });
            assert_eq!(grid.open_pair_count(), 0);
        }
    }

    #[test]
    fn test_only_dead_end_walls_are_removed() {
        // Five interior dead ends opening west in a 7x7 comb, each with 3 wall candidates
        let mut grid = Grid::new(7, 7).unwrap();
        for y in 1..6 {
            grid.link((0, y), (1, y));
        }
        let mut removed = Vec::new();
        unperfect(&mut grid, &mut get_rng(Some(4)), &mut |_, a, b| removed.push((a, b)));
        assert!(!removed.is_empty());
        for (a, _) in removed {
            assert_eq!(a.0, 1);
        }
    }
}
