pub mod cell;
mod display;
mod error;
pub mod grid;
mod seed;

use std::time::Duration;

use rand::{Rng, rngs::StdRng};

pub use cell::{Cell, Coord, Direction, Walls};
pub use display::{Displayer, MazeView};
pub use error::{Endpoint, MazeError};
pub use grid::Grid;
pub use seed::SeedCode;

use crate::generators::{Generator, generate_maze, get_rng, unperfect};
use crate::solvers::solve_bfs;

/// Pause after each wall removal of an animated generation.
const LINK_ANIMATION_DELAY: Duration = Duration::from_millis(20);
/// Pause after each cell of an animated path toggle.
const PATH_ANIMATION_DELAY: Duration = Duration::from_millis(10);
/// Range of the seed drawn when none is configured.
const RANDOM_SEED_RANGE: std::ops::Range<u64> = 1000..5000;

/// The maze engine: grid, entry and exit, seeded generation and the current solution.
pub struct Maze {
    grid: Grid,
    entry: Coord,
    exit: Coord,
    /// Generator used by the next generation
    generator: Generator,
    /// Seed of the next generation, bumped after every run
    seed: u64,
    /// Seed and generator that produced the current grid
    last_generation: Option<SeedCode>,
    rng: StdRng,
    path: Vec<Coord>,
    path_visible: bool,
}

impl Maze {
    /// Create an ungenerated, fully walled maze.
    ///
    /// Without a seed code a random seed is drawn and recursive backtracking is used.
    /// Fails if a dimension is 0, or if the entry or exit is outside the grid or on the
    /// reserved pattern.
    pub fn new(
        width: u16,
        height: u16,
        entry: Coord,
        exit: Coord,
        seed: Option<SeedCode>,
    ) -> Result<Self, MazeError> {
        let SeedCode { seed, generator } = seed.unwrap_or_else(|| {
            SeedCode::new(
                rand::rng().random_range(RANDOM_SEED_RANGE),
                Generator::default(),
            )
        });
        let grid = Maze::init_grid(width, height, entry, exit)?;
        Ok(Maze {
            grid,
            entry,
            exit,
            generator,
            seed,
            last_generation: None,
            rng: get_rng(Some(seed)),
            path: Vec::new(),
            path_visible: false,
        })
    }

    /// Build a fresh grid and check that both endpoints are usable on it.
    fn init_grid(width: u16, height: u16, entry: Coord, exit: Coord) -> Result<Grid, MazeError> {
        let grid = Grid::new(width, height)?;
        for (endpoint, coord) in [(Endpoint::Entry, entry), (Endpoint::Exit, exit)] {
            if !grid.is_in_bounds(coord) {
                return Err(MazeError::OutOfBounds {
                    endpoint,
                    coord,
                    width,
                    height,
                });
            }
            if grid[coord].is_reserved() {
                return Err(MazeError::ReservedEntryOrExit { endpoint, coord });
            }
        }
        Ok(grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn entry(&self) -> Coord {
        self.entry
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    /// Current shortest path from entry to exit, empty before the first generation.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn path_visible(&self) -> bool {
        self.path_visible
    }

    pub fn generator(&self) -> Generator {
        self.generator
    }

    /// Seed of the next generation.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed and generator of the maze currently in the grid.
    pub fn last_generation(&self) -> Option<SeedCode> {
        self.last_generation
    }

    pub fn set_generator(&mut self, generator: Generator) {
        self.generator = generator;
    }

    /// Move to the next (`step > 0`) or previous generator, wrapping around.
    pub fn switch_generator(&mut self, step: i32) {
        self.generator = self.generator.cycle(step);
    }

    pub fn view(&self) -> MazeView<'_> {
        MazeView {
            grid: &self.grid,
            entry: self.entry,
            exit: self.exit,
            generator: self.generator,
            path_visible: self.path_visible,
        }
    }

    /// Rebuild the grid, carve it with the selected generator and solve it.
    ///
    /// The RNG is reseeded with the current seed, which is then bumped so the next call
    /// produces a different maze. With `animate` every wall removal is drawn as it happens.
    pub fn generate(
        &mut self,
        perfect: bool,
        animate: bool,
        mut display: Option<&mut dyn Displayer>,
    ) -> Result<(), MazeError> {
        self.grid = Maze::init_grid(self.width(), self.height(), self.entry, self.exit)?;
        self.path.clear();
        self.rng = get_rng(Some(self.seed));
        let code = SeedCode::new(self.seed, self.generator);
        self.seed = self.seed.wrapping_add(1);

        if animate && let Some(display) = display.as_deref_mut() {
            display.redraw_all(&self.view())?;
        }

        let (entry, exit, generator, path_visible) =
            (self.entry, self.exit, self.generator, self.path_visible);
        let mut draw_result = Ok(());
        let mut on_link = |grid: &Grid, a: Coord, b: Coord| {
            if !animate || draw_result.is_err() {
                return;
            }
            let Some(display) = display.as_deref_mut() else {
                return;
            };
            let view = MazeView {
                grid,
                entry,
                exit,
                generator,
                path_visible,
            };
            draw_result = display
                .redraw_cell(&view, a)
                .and_then(|_| display.redraw_cell(&view, b));
            std::thread::sleep(LINK_ANIMATION_DELAY);
        };

        generate_maze(&mut self.grid, generator, &mut self.rng, &mut on_link);
        if !perfect {
            unperfect(&mut self.grid, &mut self.rng, &mut on_link);
        }

        // The grid is complete even if drawing failed, so record and solve it first
        self.last_generation = Some(code);
        self.path = solve_bfs(&self.grid, self.entry, self.exit);
        for &coord in &self.path {
            self.grid[coord].on_path = self.path_visible;
        }
        draw_result?;

        tracing::info!(
            "[maze] Generated {}x{} maze with {} (seed {}, perfect: {}), path length {}",
            self.width(),
            self.height(),
            generator,
            code,
            perfect,
            self.path.len().saturating_sub(1)
        );

        if let Some(display) = display {
            display.redraw_all(&self.view())?;
        }
        Ok(())
    }

    /// Move the entry one cell towards `direction` if no wall is in the way.
    ///
    /// Stepping onto the next cell of the known path just drops the first path cell;
    /// any other move solves the maze again. Returns whether the entry moved.
    pub fn move_entry(
        &mut self,
        direction: Direction,
        display: Option<&mut dyn Displayer>,
    ) -> Result<bool, MazeError> {
        if !self.grid.is_open(self.entry, direction) {
            return Ok(false);
        }
        let Some(new_entry) = self.grid.step(self.entry, direction) else {
            return Ok(false);
        };
        let old_entry = std::mem::replace(&mut self.entry, new_entry);

        let old_path = std::mem::take(&mut self.path);
        self.path = if old_path.get(1) == Some(&new_entry) {
            tracing::debug!("[maze] Entry moved along the path to {:?}", new_entry);
            old_path[1..].to_vec()
        } else {
            tracing::debug!("[maze] Entry moved off the path to {:?}, solving again", new_entry);
            solve_bfs(&self.grid, self.entry, self.exit)
        };

        let mut in_new_path = vec![false; self.grid.cell_count()];
        for &coord in &self.path {
            in_new_path[self.grid.ravel_index(coord)] = true;
        }
        let left_path = old_path
            .into_iter()
            .filter(|&coord| !in_new_path[self.grid.ravel_index(coord)])
            .collect::<Vec<_>>();
        for &coord in &left_path {
            self.grid[coord].on_path = false;
        }
        for &coord in &self.path {
            self.grid[coord].on_path = self.path_visible;
        }

        if let Some(display) = display {
            let view = self.view();
            for &coord in &left_path {
                display.redraw_cell(&view, coord)?;
            }
            if self.path_visible {
                for &coord in &self.path {
                    display.redraw_cell(&view, coord)?;
                }
            }
            display.redraw_cell(&view, old_entry)?;
            display.redraw_cell(&view, new_entry)?;
        }
        Ok(true)
    }

    /// Show or hide the solution path, optionally drawing it cell by cell.
    pub fn set_path_visible(
        &mut self,
        visible: bool,
        animate: bool,
        display: Option<&mut dyn Displayer>,
    ) -> Result<(), MazeError> {
        self.path_visible = visible;
        for &coord in &self.path {
            self.grid[coord].on_path = visible;
        }

        if let Some(display) = display {
            let view = self.view();
            for &coord in &self.path {
                display.redraw_cell(&view, coord)?;
                if animate {
                    std::thread::sleep(PATH_ANIMATION_DELAY);
                }
            }
            display.redraw_cell(&view, self.exit)?;
            display.redraw_cell(&view, self.entry)?;
        }
        Ok(())
    }

    pub fn toggle_path(&mut self, display: Option<&mut dyn Displayer>) -> Result<(), MazeError> {
        self.set_path_visible(!self.path_visible, true, display)
    }
}
