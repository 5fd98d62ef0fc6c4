use rand::{Rng, rngs::StdRng};

use super::LinkObserver;
use crate::maze::{Coord, Grid};

/// Candidate edges from a tree cell to its non-reserved neighbors outside the tree.
fn frontier_pairs(grid: &Grid, inside: Coord) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    grid.neighbors(inside)
        .map(|(_, outside)| outside)
        .filter(move |&outside| !grid[outside].visited && !grid[outside].is_reserved())
        .map(move |outside| (inside, outside))
}

/// Randomized Prim's algorithm growing a tree from `(0, 0)`.
/// The `visited` flag of a cell marks membership in the tree.
pub fn randomized_prim(grid: &mut Grid, rng: &mut StdRng, on_link: &mut LinkObserver<'_>) {
    let start: Coord = (0, 0);
    grid[start].visited = true;

    let mut frontier = frontier_pairs(grid, start).collect::<Vec<_>>();

    while !frontier.is_empty() {
        let (inside, outside) = frontier.swap_remove(rng.random_range(0..frontier.len()));
        // Joined through another edge since this one was queued
        if grid[outside].visited {
            continue;
        }

        grid[outside].visited = true;
        grid.link(inside, outside);
        on_link(grid, inside, outside);

        let new_pairs = frontier_pairs(grid, outside).collect::<Vec<_>>();
        frontier.extend(new_pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_frontier_skips_reserved_and_tree_cells() {
        let mut grid = Grid::new(9, 7).unwrap();
        grid[(2, 2)].visited = true;
        // (1, 1) is reserved, (2, 2) is already in the tree
        let pairs = frontier_pairs(&grid, (2, 1)).collect::<Vec<_>>();
        assert_eq!(pairs, vec![((2, 1), (2, 0)), ((2, 1), (3, 1))]);
    }

    #[test]
    fn test_randomized_prim() {
        let mut grid = Grid::new(8, 6).unwrap();
        randomized_prim(&mut grid, &mut get_rng(Some(21)), &mut |_, _, _| {});
        assert!(grid.cells().iter().all(|cell| cell.visited));
        assert_eq!(grid.open_pair_count(), 8 * 6 - 1);
    }
}
