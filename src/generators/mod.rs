use rand::{SeedableRng, rngs::StdRng};

mod kruskal;
mod prim;
mod recur_backtrack;
mod unperfect;

use kruskal::randomized_kruskal;
use prim::randomized_prim;
use recur_backtrack::recursive_backtrack;
pub use unperfect::unperfect;

use crate::maze::{Coord, Grid};

/// Called after every wall removal with the grid and the two cells that changed.
pub type LinkObserver<'a> = dyn FnMut(&Grid, Coord, Coord) + 'a;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Generator {
    #[default]
    RecurBacktrack,
    Prim,
    Kruskal,
}

impl Generator {
    pub const ALL: [Generator; 3] = [Generator::RecurBacktrack, Generator::Prim, Generator::Kruskal];

    /// Digit identifying the generator in encoded seeds.
    pub fn index(self) -> u8 {
        match self {
            Generator::RecurBacktrack => 0,
            Generator::Prim => 1,
            Generator::Kruskal => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Generator> {
        Generator::ALL.get(index as usize).copied()
    }

    /// The generator `step` positions further in [`Generator::ALL`], wrapping around.
    pub fn cycle(self, step: i32) -> Generator {
        let len = Generator::ALL.len() as i32;
        let index = (self.index() as i32 + step).rem_euclid(len);
        Generator::ALL[index as usize]
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Carve a spanning tree over the non-reserved cells of a freshly built grid.
pub fn generate_maze(
    grid: &mut Grid,
    generator: Generator,
    rng: &mut StdRng,
    on_link: &mut LinkObserver<'_>,
) {
    match generator {
        Generator::RecurBacktrack => recursive_backtrack(grid, rng, on_link),
        Generator::Prim => randomized_prim(grid, rng, on_link),
        Generator::Kruskal => randomized_kruskal(grid, rng, on_link),
    }
}
