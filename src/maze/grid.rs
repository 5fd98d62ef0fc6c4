use super::cell::{Cell, Coord, Direction};
use super::error::MazeError;

/// Offsets of the reserved "42" emblem, relative to `(width / 2, height / 2)`.
pub const RESERVED_PATTERN: [(i32, i32); 18] = [
    // "4" and "2" crossbar
    (-1, 0),
    (-2, 0),
    (-3, 0),
    (1, 0),
    (2, 0),
    (3, 0),
    // upper strokes
    (3, -1),
    (3, -2),
    (-3, -1),
    (-3, -2),
    // lower strokes
    (-1, 1),
    (-1, 2),
    (1, 1),
    (1, 2),
    (2, 2),
    (3, 2),
    // top of the "2"
    (1, -2),
    (2, -2),
];

/// Smallest grid the emblem is drawn in.
pub const RESERVED_MIN_WIDTH: u16 = 9;
pub const RESERVED_MIN_HEIGHT: u16 = 7;

/// Arena of cells stored row by row, with precomputed neighbor indices.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Box<[Cell]>,
    /// Neighbor index per cell, one slot per direction (N, E, S, W).
    adjacency: Box<[[Option<usize>; 4]]>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Build a fully walled grid, link adjacency and mark the reserved emblem.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        let mut grid = Grid::build(width, height)?;
        grid.link_adjacency();
        grid.mark_reserved();
        Ok(grid)
    }

    /// Allocate `width * height` enclosed cells without any adjacency.
    pub fn build(width: u16, height: u16) -> Result<Self, MazeError> {
        if width < 1 || height < 1 {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new((x, y))))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let adjacency = vec![[None; 4]; cells.len()].into_boxed_slice();
        Ok(Grid {
            cells,
            adjacency,
            width,
            height,
        })
    }

    /// Register the in-bounds neighbors of every cell. There is no wraparound.
    pub fn link_adjacency(&mut self) {
        for index in 0..self.cells.len() {
            let coord = self.coord_of(index);
            let mut slots = [None; 4];
            for direction in Direction::ALL {
                slots[direction.slot()] = self
                    .step(coord, direction)
                    .map(|neighbor| self.ravel_index(neighbor));
            }
            self.adjacency[index] = slots;
        }
    }

    /// Mark the emblem cells as reserved when the grid is large enough to hold it.
    pub fn mark_reserved(&mut self) {
        if self.width < RESERVED_MIN_WIDTH || self.height < RESERVED_MIN_HEIGHT {
            return;
        }
        let (cx, cy) = ((self.width / 2) as i32, (self.height / 2) as i32);
        for (dx, dy) in RESERVED_PATTERN {
            let index = self.ravel_index(((cx + dx) as u16, (cy + dy) as u16));
            self.cells[index].reserve();
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    pub fn ravel_index(&self, coord: Coord) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        coord.1 as usize * self.width as usize + coord.0 as usize
    }

    pub fn coord_of(&self, index: usize) -> Coord {
        (
            (index % self.width as usize) as u16,
            (index / self.width as usize) as u16,
        )
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// The in-bounds coordinate one step from `coord`, if any.
    pub fn step(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dx, dy) = direction.delta();
        let x = coord.0 as i32 + dx;
        let y = coord.1 as i32 + dy;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some((x as u16, y as u16))
        }
    }

    /// Adjacent cells of `coord` in N, E, S, W order, regardless of walls.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        let slots = self.adjacency[self.ravel_index(coord)];
        Direction::ALL.into_iter().filter_map(move |direction| {
            slots[direction.slot()].map(|index| (direction, self.coord_of(index)))
        })
    }

    pub fn neighbor_count(&self, coord: Coord) -> usize {
        self.adjacency[self.ravel_index(coord)]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Remove the wall between two adjacent cells, on both sides at once.
    /// Returns `false` if the cells are not adjacent or were already linked.
    pub fn link(&mut self, a: Coord, b: Coord) -> bool {
        if !self.is_in_bounds(a) || !self.is_in_bounds(b) {
            return false;
        }
        let Some(direction) = Direction::between(a, b) else {
            return false;
        };
        let (ia, ib) = (self.ravel_index(a), self.ravel_index(b));
        let was_closed = self.cells[ia].has_wall(direction);
        self.cells[ia].destroy_wall(direction);
        self.cells[ib].destroy_wall(direction.opposite());
        was_closed
    }

    /// Whether `coord` can be left towards `direction`. Border walls are never open.
    pub fn is_open(&self, coord: Coord, direction: Direction) -> bool {
        !self[coord].has_wall(direction) && self.step(coord, direction).is_some()
    }

    pub fn is_open_between(&self, a: Coord, b: Coord) -> bool {
        Direction::between(a, b).is_some_and(|direction| self.is_open(a, direction))
    }

    /// Adjacent cells reachable from `coord` without crossing a wall, in N, E, S, W order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors(coord)
            .filter(move |&(direction, _)| !self[coord].has_wall(direction))
            .map(|(_, neighbor)| neighbor)
    }

    /// Number of adjacent pairs with no wall between them.
    pub fn open_pair_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| self.is_open(cell.coord(), direction))
                    .count()
            })
            .sum()
    }

    pub fn reserved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_reserved()).count()
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(coord)]
    }
}

impl std::ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        let index = self.ravel_index(coord);
        &mut self.cells[index]
    }
}
