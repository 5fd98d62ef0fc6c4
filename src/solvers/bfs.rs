use std::collections::VecDeque;

use crate::maze::{Coord, Grid};

/// Shortest open path from `start` to `goal`, both inclusive.
///
/// Neighbors are expanded in N, E, S, W order, and the search stops as soon as the goal
/// is dequeued. Returns an empty path if the goal cannot be reached.
pub fn solve_bfs(grid: &Grid, start: Coord, goal: Coord) -> Vec<Coord> {
    if !grid.is_in_bounds(start) || !grid.is_in_bounds(goal) {
        return Vec::new();
    }

    let start_index = grid.ravel_index(start);
    let goal_index = grid.ravel_index(goal);

    // `None` means "no parent"; the start keeps `None` but is marked discovered
    let mut parents: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut discovered = vec![false; grid.cell_count()];
    discovered[start_index] = true;

    let mut frontier = VecDeque::from([start_index]);
    let mut goal_reached = false;
    while let Some(current) = frontier.pop_front() {
        if current == goal_index {
            goal_reached = true;
            break;
        }
        for neighbor in grid.open_neighbors(grid.coord_of(current)) {
            let neighbor = grid.ravel_index(neighbor);
            if !discovered[neighbor] {
                discovered[neighbor] = true;
                parents[neighbor] = Some(current);
                frontier.push_back(neighbor);
            }
        }
    }

    if !goal_reached {
        return Vec::new();
    }

    // Walk back from the goal until the start, which has no parent
    let mut path = vec![goal];
    let mut child = goal_index;
    while let Some(parent) = parents[child] {
        path.push(grid.coord_of(parent));
        child = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze, unperfect};
    use rand::{SeedableRng, rngs::StdRng};

    fn open_everything(grid: &mut Grid) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if x + 1 < grid.width() {
                    grid.link((x, y), (x + 1, y));
                }
                if y + 1 < grid.height() {
                    grid.link((x, y), (x, y + 1));
                }
            }
        }
    }

    /// All-pairs shortest hop counts over the open relation.
    fn floyd_warshall(grid: &Grid) -> Vec<Vec<usize>> {
        let n = grid.cell_count();
        let inf = usize::MAX / 4;
        let mut dist = vec![vec![inf; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0;
            for neighbor in grid.open_neighbors(grid.coord_of(i)) {
                row[grid.ravel_index(neighbor)] = 1;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if dist[i][k] + dist[k][j] < dist[i][j] {
                        dist[i][j] = dist[i][k] + dist[k][j];
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn test_open_grid_follows_expansion_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        open_everything(&mut grid);
        let path = solve_bfs(&grid, (0, 0), (2, 2));
        assert_eq!(path.len() - 1, 4);
        assert_eq!(path, vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(solve_bfs(&grid, (1, 1), (1, 1)), vec![(1, 1)]);
    }

    #[test]
    fn test_unreachable_goal_gives_empty_path() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.link((0, 0), (1, 0));
        assert!(solve_bfs(&grid, (0, 0), (2, 0)).is_empty());
        assert!(solve_bfs(&grid, (0, 0), (9, 9)).is_empty());
    }

    #[test]
    fn test_index_zero_can_be_a_parent() {
        // Cell (0, 0) has index 0 and must still be recorded as a parent
        let mut grid = Grid::new(2, 2).unwrap();
        grid.link((0, 1), (0, 0));
        grid.link((0, 0), (1, 0));
        let path = solve_bfs(&grid, (0, 1), (1, 0));
        assert_eq!(path, vec![(0, 1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_path_is_open_and_adjacent() {
        let mut grid = Grid::new(6, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        generate_maze(&mut grid, Generator::Prim, &mut rng, &mut |_, _, _| {});
        let path = solve_bfs(&grid, (0, 5), (5, 0));
        assert_eq!(path.first(), Some(&(0, 5)));
        assert_eq!(path.last(), Some(&(5, 0)));
        for pair in path.windows(2) {
            assert!(grid.is_open_between(pair[0], pair[1]));
        }
    }

    #[test]
    fn test_matches_brute_force_shortest_paths() {
        for generator in Generator::ALL {
            for seed in 0..6 {
                let mut grid = Grid::new(6, 6).unwrap();
                let mut rng = StdRng::seed_from_u64(seed);
                generate_maze(&mut grid, generator, &mut rng, &mut |_, _, _| {});
                unperfect(&mut grid, &mut rng, &mut |_, _, _| {});
                let dist = floyd_warshall(&grid);
                for (start, goal) in [((0, 0), (5, 5)), ((5, 0), (0, 5)), ((2, 3), (4, 1))] {
                    let path = solve_bfs(&grid, start, goal);
                    let expected = dist[grid.ravel_index(start)][grid.ravel_index(goal)];
                    assert_eq!(
                        path.len() - 1,
                        expected,
                        "{generator} seed {seed}: {start:?} -> {goal:?}"
                    );
                }
            }
        }
    }
}
