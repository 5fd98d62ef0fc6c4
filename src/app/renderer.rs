use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use rand::{rngs::StdRng, seq::IndexedRandom};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    generators::get_rng,
    maze::{Coord, Direction, Displayer, MazeView},
};

/// Colors the renderer picks from.
const PALETTE: [Color; 8] = [
    Color::White,
    Color::Black,
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Yellow,
    Color::Cyan,
];

const BLOCK: &str = "  ";
const ENTRY_GLYPH: &str = "🟩";
const EXIT_GLYPH: &str = "🟥";

/// Part of the picture a color switch applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// Walls, corridors and path
    Maze,
    /// The reserved "42" cells
    Emblem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColorScheme {
    walls: Color,
    maze_back: Color,
    emblem_back: Color,
    path_back: Color,
}

impl ColorScheme {
    fn colors(&self) -> [Color; 4] {
        [self.walls, self.maze_back, self.emblem_back, self.path_back]
    }

    fn random(rng: &mut StdRng) -> Self {
        let picked = PALETTE.choose_multiple(rng, 4).copied().collect::<Vec<_>>();
        ColorScheme {
            walls: picked[0],
            maze_back: picked[1],
            emblem_back: picked[2],
            path_back: picked[3],
        }
    }

    /// Palette colors not used by the scheme.
    fn unused(&self) -> Vec<Color> {
        let used = self.colors();
        PALETTE
            .iter()
            .copied()
            .filter(|color| !used.contains(color))
            .collect()
    }
}

/// What occupies one two-column block of the picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Wall,
    Corridor,
    Emblem,
    Path,
    Entry,
    Exit,
}

/// Draws a maze on the terminal with crossterm.
///
/// A `w x h` maze takes `(2w + 1) x (2h + 1)` blocks of [`Renderer::CELL_WIDTH`] columns:
/// cell `(x, y)` sits at block `(2x + 1, 2y + 1)`, the blocks between two cells show
/// the wall separating them and the remaining corners are always wall.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    colors: ColorScheme,
    rng: StdRng,
    /// Message shown under the options, e.g. after saving a seed
    status: Option<String>,
    seed_file: String,
}

impl Renderer {
    /// Number of terminal columns per block
    pub const CELL_WIDTH: u16 = 2;
    /// Rows below the maze: a blank line, the option lines and the status line
    pub const OPTION_ROWS: u16 = 11;

    pub fn new(seed: Option<u64>, seed_file: impl Into<String>) -> Self {
        let mut rng = get_rng(seed);
        let colors = ColorScheme::random(&mut rng);
        Self {
            stdout: std::io::stdout(),
            colors,
            rng,
            status: None,
            seed_file: seed_file.into(),
        }
    }

    /// Terminal size (columns, rows) needed to show a maze with its options.
    pub fn required_size(width: u16, height: u16) -> (u32, u32) {
        let blocks_x = 2 * width as u32 + 1;
        let blocks_y = 2 * height as u32 + 1;
        (
            blocks_x * Renderer::CELL_WIDTH as u32,
            blocks_y + Renderer::OPTION_ROWS as u32,
        )
    }

    /// Pick new colors for `target` among the colors currently unused.
    pub fn switch_colors(&mut self, target: ColorTarget) {
        let unused = self.colors.unused();
        match target {
            ColorTarget::Maze => {
                let picked = unused.choose_multiple(&mut self.rng, 3).copied().collect::<Vec<_>>();
                if let [walls, maze_back, path_back] = picked[..] {
                    self.colors.walls = walls;
                    self.colors.maze_back = maze_back;
                    self.colors.path_back = path_back;
                }
            }
            ColorTarget::Emblem => {
                if let Some(&color) = unused.choose(&mut self.rng) {
                    self.colors.emblem_back = color;
                }
            }
        }
        tracing::debug!("[renderer] Switched {:?} colors: {:?}", target, self.colors);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Classify the block at picture position `(bx, by)`.
    fn block_at(view: &MazeView<'_>, bx: u16, by: u16) -> Block {
        let grid = view.grid;
        match (bx % 2, by % 2) {
            // Cell center
            (1, 1) => {
                let coord = ((bx - 1) / 2, (by - 1) / 2);
                let cell = &grid[coord];
                if coord == view.entry {
                    Block::Entry
                } else if coord == view.exit {
                    Block::Exit
                } else if cell.is_reserved() {
                    Block::Emblem
                } else if cell.on_path {
                    Block::Path
                } else {
                    Block::Corridor
                }
            }
            // Between a cell and its east neighbor
            (0, 1) if bx > 0 => Renderer::slot_block(view, ((bx - 2) / 2, (by - 1) / 2), Direction::East),
            // Between a cell and its south neighbor
            (1, 0) if by > 0 => Renderer::slot_block(view, ((bx - 1) / 2, (by - 2) / 2), Direction::South),
            _ => Block::Wall,
        }
    }

    fn slot_block(view: &MazeView<'_>, coord: Coord, direction: Direction) -> Block {
        let grid = view.grid;
        let Some(neighbor) = grid.step(coord, direction) else {
            return Block::Wall;
        };
        let (a, b) = (&grid[coord], &grid[neighbor]);
        if a.is_reserved() && b.is_reserved() {
            Block::Emblem
        } else if !grid.is_open(coord, direction) {
            Block::Wall
        } else if a.on_path && b.on_path {
            Block::Path
        } else {
            Block::Corridor
        }
    }

    fn styled(&self, block: Block) -> StyledContent<&'static str> {
        let styled = match block {
            Block::Wall => BLOCK.on(self.colors.walls),
            Block::Corridor => BLOCK.on(self.colors.maze_back),
            Block::Emblem => BLOCK.on(self.colors.emblem_back),
            Block::Path => BLOCK.on(self.colors.path_back),
            Block::Entry => ENTRY_GLYPH.on(self.colors.maze_back),
            Block::Exit => EXIT_GLYPH.on(self.colors.maze_back),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled.content().width(),
                Renderer::CELL_WIDTH as usize,
                "Each block must occupy exactly two character widths."
            );
        }

        styled
    }

    fn queue_block(&mut self, view: &MazeView<'_>, bx: u16, by: u16) -> std::io::Result<()> {
        let styled = self.styled(Renderer::block_at(view, bx, by));
        queue!(
            self.stdout,
            cursor::MoveTo(bx * Renderer::CELL_WIDTH, by),
            style::PrintStyledContent(styled)
        )
    }

    fn option_lines(&self, view: &MazeView<'_>) -> Vec<String> {
        vec![
            "arrows: move the entry".to_string(),
            format!("1/2/3: select the algorithm (current: {})", view.generator),
            "g: generate static maze".to_string(),
            "a: animated maze generation".to_string(),
            "c: change maze colors".to_string(),
            "f: change 42 color".to_string(),
            format!(
                "p: {} the path (BFS)",
                if view.path_visible { "hide" } else { "show" }
            ),
            format!("s: save maze seed to {}", self.seed_file),
            "q: quit".to_string(),
            self.status.clone().unwrap_or_default(),
        ]
    }
}

impl Displayer for Renderer {
    fn redraw_cell(&mut self, view: &MazeView<'_>, coord: Coord) -> std::io::Result<()> {
        let (cx, cy) = (2 * coord.0 + 1, 2 * coord.1 + 1);
        for by in cy - 1..=cy + 1 {
            for bx in cx - 1..=cx + 1 {
                self.queue_block(view, bx, by)?;
            }
        }
        self.stdout.flush()
    }

    fn redraw_all(&mut self, view: &MazeView<'_>) -> std::io::Result<()> {
        self.stdout.queue(terminal::Clear(ClearType::All))?;
        let (blocks_x, blocks_y) = (2 * view.grid.width() + 1, 2 * view.grid.height() + 1);
        for by in 0..blocks_y {
            for bx in 0..blocks_x {
                self.queue_block(view, bx, by)?;
            }
        }
        self.stdout.flush()?;
        self.show_options(view)
    }

    fn show_options(&mut self, view: &MazeView<'_>) -> std::io::Result<()> {
        let (term_width, _) = terminal::size()?;
        let top = 2 * view.grid.height() + 2;
        queue!(
            self.stdout,
            cursor::MoveTo(0, top),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        for (row, line) in self.option_lines(view).iter().enumerate() {
            let (line, _) = line.unicode_truncate(term_width as usize);
            queue!(
                self.stdout,
                cursor::MoveTo(0, top + row as u16),
                style::PrintStyledContent(line.with(Color::Cyan).attribute(Attribute::Bold))
            )?;
        }
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::Generator;
    use crate::maze::Grid;

    fn view(grid: &Grid, entry: Coord, exit: Coord) -> MazeView<'_> {
        MazeView {
            grid,
            entry,
            exit,
            generator: Generator::Prim,
            path_visible: false,
        }
    }

    #[test]
    fn test_blocks_follow_walls() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.link((0, 0), (1, 0));
        let view = view(&grid, (0, 0), (1, 1));

        // Corners and border
        assert_eq!(Renderer::block_at(&view, 0, 0), Block::Wall);
        assert_eq!(Renderer::block_at(&view, 2, 2), Block::Wall);
        assert_eq!(Renderer::block_at(&view, 0, 1), Block::Wall);
        assert_eq!(Renderer::block_at(&view, 4, 3), Block::Wall);
        // Open between (0, 0) and (1, 0), closed between (0, 0) and (0, 1)
        assert_eq!(Renderer::block_at(&view, 2, 1), Block::Corridor);
        assert_eq!(Renderer::block_at(&view, 1, 2), Block::Wall);
        // Cells
        assert_eq!(Renderer::block_at(&view, 1, 1), Block::Entry);
        assert_eq!(Renderer::block_at(&view, 3, 3), Block::Exit);
        assert_eq!(Renderer::block_at(&view, 1, 3), Block::Corridor);
    }

    #[test]
    fn test_path_and_emblem_blocks() {
        let mut grid = Grid::new(9, 7).unwrap();
        grid.link((0, 0), (1, 0));
        grid.link((1, 0), (2, 0));
        for coord in [(0, 0), (1, 0), (2, 0)] {
            grid[coord].on_path = true;
        }
        let view = view(&grid, (0, 0), (8, 6));
        assert_eq!(Renderer::block_at(&view, 3, 1), Block::Path);
        assert_eq!(Renderer::block_at(&view, 4, 1), Block::Path);

        // (1, 2) and (1, 3) belong to the "4" of the emblem
        assert!(grid[(1, 2)].is_reserved() && grid[(1, 3)].is_reserved());
        assert_eq!(Renderer::block_at(&view, 3, 7), Block::Emblem);
        assert_eq!(Renderer::block_at(&view, 3, 6), Block::Emblem);
    }

    #[test]
    fn test_required_size() {
        assert_eq!(Renderer::required_size(3, 2), (14, 5 + Renderer::OPTION_ROWS as u32));
        // No overflow for the largest grids
        assert_eq!(Renderer::required_size(u16::MAX, 1).0, (2 * u16::MAX as u32 + 1) * 2);
    }

    #[test]
    fn test_color_switching_uses_unused_colors() {
        let mut renderer = Renderer::new(Some(7), "seed.txt");
        let before = renderer.colors;
        let unused = before.unused();
        assert_eq!(unused.len(), PALETTE.len() - 4);

        renderer.switch_colors(ColorTarget::Emblem);
        assert!(unused.contains(&renderer.colors.emblem_back));
        assert_eq!(renderer.colors.walls, before.walls);

        let before = renderer.colors;
        let unused = before.unused();
        renderer.switch_colors(ColorTarget::Maze);
        for color in [renderer.colors.walls, renderer.colors.maze_back, renderer.colors.path_back] {
            assert!(unused.contains(&color));
        }
        assert_eq!(renderer.colors.emblem_back, before.emblem_back);
    }

    #[test]
    fn test_blocks_are_two_columns_wide() {
        let renderer = Renderer::new(Some(1), "seed.txt");
        for block in [Block::Wall, Block::Corridor, Block::Emblem, Block::Path, Block::Entry, Block::Exit] {
            let _ = renderer.styled(block);
        }
    }
}
