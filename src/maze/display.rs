use super::cell::Coord;
use super::grid::Grid;
use crate::generators::Generator;

/// Read-only snapshot of the engine handed to a [`Displayer`].
#[derive(Clone, Copy)]
pub struct MazeView<'a> {
    pub grid: &'a Grid,
    pub entry: Coord,
    pub exit: Coord,
    /// Generator used by the next generation
    pub generator: Generator,
    pub path_visible: bool,
}

/// Something that can draw the maze. The engine only ever talks to this trait.
pub trait Displayer {
    /// Redraw a single cell after its walls or flags changed.
    fn redraw_cell(&mut self, view: &MazeView<'_>, coord: Coord) -> std::io::Result<()>;

    /// Redraw the whole maze.
    fn redraw_all(&mut self, view: &MazeView<'_>) -> std::io::Result<()>;

    /// Show the available user actions.
    fn show_options(&mut self, view: &MazeView<'_>) -> std::io::Result<()>;
}
