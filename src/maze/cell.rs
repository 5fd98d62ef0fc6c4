/// Grid coordinate `(x, y)`, with `(0, 0)` in the top left corner.
pub type Coord = (u16, u16);

/// One of the four orthogonal directions a cell can open towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the order neighbors are examined.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Wall bit of this direction in the structure file encoding.
    pub const fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit step `(dx, dy)` of this direction. North points to smaller `y`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Slot of this direction in per-cell adjacency arrays.
    pub(crate) const fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Letter used for path steps in the structure file.
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Direction leading from `from` to the orthogonally adjacent `to`.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let dx = to.0 as i32 - from.0 as i32;
        let dy = to.1 as i32 - from.1 as i32;
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

/// The four wall flags of a cell, packed as `north=1 | east=2 | south=4 | west=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls(u8);

impl Walls {
    pub const ALL: Walls = Walls(0b1111);
    pub const NONE: Walls = Walls(0);

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    /// Number of closed walls.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Raw bitmask, which is also the hex digit written to the structure file.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

/// A single maze cell. Cells are stored in the grid arena and never copied out of it
/// by the algorithms, which address them by coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,
    walls: Walls,
    /// Generation-only flag, reset whenever the grid is rebuilt.
    pub visited: bool,
    reserved: bool,
    /// Whether the cell is currently drawn as part of the solution path.
    pub on_path: bool,
}

impl Cell {
    /// A fully enclosed cell at `coord`.
    pub fn new(coord: Coord) -> Self {
        Cell {
            coord,
            walls: Walls::ALL,
            visited: false,
            reserved: false,
            on_path: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn x(&self) -> u16 {
        self.coord.0
    }

    pub fn y(&self) -> u16 {
        self.coord.1
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction)
    }

    /// Remove one side of a wall. Only the grid calls this, always paired with the
    /// matching side of the neighbor.
    pub(super) fn destroy_wall(&mut self, direction: Direction) {
        self.walls.remove(direction);
    }

    pub fn count_walls(&self) -> u32 {
        self.walls.count()
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    pub(super) fn reserve(&mut self) {
        self.reserved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_enclosed() {
        let cell = Cell::new((3, 4));
        assert_eq!(cell.coord(), (3, 4));
        assert_eq!(cell.walls().bits(), 0xF);
        assert_eq!(cell.count_walls(), 4);
        assert!(!cell.visited && !cell.is_reserved() && !cell.on_path);
    }

    #[test]
    fn test_destroy_wall_clears_only_that_bit() {
        let mut cell = Cell::new((0, 0));
        cell.destroy_wall(Direction::East);
        assert!(!cell.has_wall(Direction::East));
        assert!(cell.has_wall(Direction::North));
        assert_eq!(cell.walls().bits(), 1 | 4 | 8);
        assert_eq!(cell.count_walls(), 3);
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between((1, 1), (1, 0)), Some(Direction::North));
        assert_eq!(Direction::between((1, 1), (2, 1)), Some(Direction::East));
        assert_eq!(Direction::between((1, 1), (1, 2)), Some(Direction::South));
        assert_eq!(Direction::between((1, 1), (0, 1)), Some(Direction::West));
        assert_eq!(Direction::between((1, 1), (2, 2)), None);
        assert_eq!(Direction::between((1, 1), (1, 1)), None);
    }

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }
}
