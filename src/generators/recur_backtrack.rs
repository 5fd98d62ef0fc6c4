use rand::{Rng, rngs::StdRng};

use super::LinkObserver;
use crate::maze::{Coord, Grid};

/// Depth-first carving from `(0, 0)` with an explicit stack.
pub fn recursive_backtrack(grid: &mut Grid, rng: &mut StdRng, on_link: &mut LinkObserver<'_>) {
    let start: Coord = (0, 0);
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        grid[cell].visited = true;

        let available = grid
            .neighbors(cell)
            .map(|(_, neighbor)| neighbor)
            .filter(|&neighbor| !grid[neighbor].visited && !grid[neighbor].is_reserved())
            .collect::<Vec<_>>();

        if !available.is_empty() {
            let chosen = available[rng.random_range(0..available.len())];
            grid.link(cell, chosen);
            on_link(grid, cell, chosen);
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the chosen neighbor on top to carve the maze in its direction
            stack.push(chosen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_every_cell_is_visited() {
        let mut grid = Grid::new(7, 5).unwrap();
        recursive_backtrack(&mut grid, &mut get_rng(Some(0)), &mut |_, _, _| {});
        assert!(grid.cells().iter().all(|cell| cell.visited));
        assert_eq!(grid.open_pair_count(), 7 * 5 - 1);
    }

    #[test]
    fn test_corridor_is_carved_straight() {
        let mut grid = Grid::new(5, 1).unwrap();
        recursive_backtrack(&mut grid, &mut get_rng(Some(0)), &mut |_, _, _| {});
        for x in 0..4 {
            assert!(grid.is_open_between((x, 0), (x + 1, 0)));
        }
    }
}
