use rand::{Rng, rngs::StdRng};

use super::LinkObserver;
use crate::maze::Grid;

/// Disjoint sets of cell indices that keep their members enumerable,
/// so a representative can be drawn from any set.
struct DisjointSets {
    /// Members of each live set
    members: Vec<Vec<usize>>,
    /// Set id of every cell, `None` for cells that take no part (reserved)
    set_of: Vec<Option<usize>>,
}

impl DisjointSets {
    /// One singleton set per non-reserved cell.
    fn new(grid: &Grid) -> Self {
        let mut members = Vec::new();
        let mut set_of = vec![None; grid.cell_count()];
        for (index, cell) in grid.cells().iter().enumerate() {
            if !cell.is_reserved() {
                set_of[index] = Some(members.len());
                members.push(vec![index]);
            }
        }
        DisjointSets { members, set_of }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    fn find(&self, cell: usize) -> Option<usize> {
        self.set_of[cell]
    }

    /// Merge two sets. The set with the larger id is moved into the smaller one, and the
    /// last set takes over the freed id.
    fn unite(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false; // Already in same set
        }
        let (keep, gone) = (a.min(b), a.max(b));

        let moved = self.members.swap_remove(gone);
        for &cell in &moved {
            self.set_of[cell] = Some(keep);
        }
        self.members[keep].extend(moved);

        if gone < self.members.len() {
            for &cell in &self.members[gone] {
                self.set_of[cell] = Some(gone);
            }
        }
        true
    }
}

/// Randomized Kruskal's algorithm over sets of cells.
///
/// Each round picks a random set, then a random member of it. Members are sorted by
/// `(neighbor count, x, y)` before the draw, so the outcome only depends on the RNG stream.
pub fn randomized_kruskal(grid: &mut Grid, rng: &mut StdRng, on_link: &mut LinkObserver<'_>) {
    let mut sets = DisjointSets::new(grid);

    while sets.len() > 1 {
        let set = rng.random_range(0..sets.len());

        let members = &mut sets.members[set];
        members.sort_by_key(|&index| {
            let coord = grid.coord_of(index);
            (grid.neighbor_count(coord), coord.0, coord.1)
        });
        let actual = grid.coord_of(members[rng.random_range(0..members.len())]);

        let available = grid
            .neighbors(actual)
            .map(|(_, neighbor)| neighbor)
            .filter(|&neighbor| !grid[neighbor].is_reserved())
            .collect::<Vec<_>>();
        if available.is_empty() {
            continue;
        }
        let chosen = available[rng.random_range(0..available.len())];

        let Some(other) = sets.find(grid.ravel_index(chosen)) else {
            continue;
        };
        // Linking inside one set would create a loop
        if sets.unite(set, other) {
            grid.link(actual, chosen);
            on_link(grid, actual, chosen);
        }
    }
}
