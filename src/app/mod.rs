mod renderer;

use std::{
    io::{Stdout, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEventKind},
    queue,
    terminal::{self, ClearType},
};
use thiserror::Error;

pub use renderer::{ColorTarget, Renderer};

use crate::{
    config::Config,
    generators::Generator,
    maze::{Direction, Displayer, Maze, MazeError, SeedCode},
    save::{self, DEFAULT_SEED_FILE},
};

/// Seed of the first generation in profiling mode
const PROFILE_SEED: u64 = 1000;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("This window is too small ({actual_width}x{actual_height}), the maze needs {needed_width}x{needed_height}")]
    TerminalTooSmall {
        needed_width: u32,
        needed_height: u32,
        actual_width: u16,
        actual_height: u16,
    },
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserAction {
    /// Move the entry one cell
    Move(Direction),
    /// Use this generator for the next generation
    SelectGenerator(Generator),
    /// Generate a new maze, drawing every step when `animate` is set
    Generate { animate: bool },
    SwitchColors(ColorTarget),
    TogglePath,
    /// Append the current seed code to the seed log
    SaveSeed,
    Quit,
}

impl UserAction {
    fn from_key(code: KeyCode) -> Option<UserAction> {
        let action = match code {
            KeyCode::Up => UserAction::Move(Direction::North),
            KeyCode::Right => UserAction::Move(Direction::East),
            KeyCode::Down => UserAction::Move(Direction::South),
            KeyCode::Left => UserAction::Move(Direction::West),
            KeyCode::Char(c @ '1'..='3') => {
                UserAction::SelectGenerator(Generator::from_index(c as u8 - b'1')?)
            }
            KeyCode::Char('g') => UserAction::Generate { animate: false },
            KeyCode::Char('a') => UserAction::Generate { animate: true },
            KeyCode::Char('c') => UserAction::SwitchColors(ColorTarget::Maze),
            KeyCode::Char('f') => UserAction::SwitchColors(ColorTarget::Emblem),
            KeyCode::Char('p') => UserAction::TogglePath,
            KeyCode::Char('s') => UserAction::SaveSeed,
            KeyCode::Char('q') | KeyCode::Esc => UserAction::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Interactive terminal front end around a [`Maze`].
pub struct App {
    maze: Maze,
    renderer: Renderer,
    perfect: bool,
    output_file: PathBuf,
    seed_file: PathBuf,
}

impl App {
    /// Build the maze described by `config`. Nothing is drawn yet.
    pub fn new(config: Config) -> Result<Self, MazeError> {
        let maze = Maze::new(
            config.width,
            config.height,
            config.entry,
            config.exit,
            config.seed,
        )?;
        let renderer = Renderer::new(Some(maze.seed()), DEFAULT_SEED_FILE);
        Ok(Self {
            maze,
            renderer,
            perfect: config.perfect,
            output_file: config.output_file,
            seed_file: PathBuf::from(DEFAULT_SEED_FILE),
        })
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn check_size(&self) -> Result<(), AppError> {
        let (actual_width, actual_height) = terminal::size()?;
        let (needed_width, needed_height) =
            Renderer::required_size(self.maze.width(), self.maze.height());
        if (actual_width as u32) < needed_width || (actual_height as u32) < needed_height {
            return Err(AppError::TerminalTooSmall {
                needed_width,
                needed_height,
                actual_width,
                actual_height,
            });
        }
        Ok(())
    }

    /// Generate the first maze with animation, then handle key presses until the user quits.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.check_size()?;
        self.generate(true)?;

        loop {
            self.renderer.show_options(&self.maze.view())?;
            let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = UserAction::from_key(code) else {
                continue;
            };
            tracing::debug!("[app] Key {:?} -> {:?}", code, action);
            if !self.handle_action(action)? {
                break;
            }
        }
        tracing::info!("[app] Quit");
        Ok(())
    }

    /// Apply one action. Returns `Ok(false)` when the app should stop.
    fn handle_action(&mut self, action: UserAction) -> Result<bool, AppError> {
        match action {
            UserAction::Move(direction) => {
                self.maze.move_entry(direction, Some(&mut self.renderer))?;
            }
            UserAction::SelectGenerator(generator) => {
                self.maze.set_generator(generator);
            }
            UserAction::Generate { animate } => {
                // The next maze starts with a hidden path
                self.maze.set_path_visible(false, false, None)?;
                self.generate(animate)?;
            }
            UserAction::SwitchColors(target) => {
                self.renderer.switch_colors(target);
                self.renderer.redraw_all(&self.maze.view())?;
            }
            UserAction::TogglePath => {
                self.maze.toggle_path(Some(&mut self.renderer))?;
            }
            UserAction::SaveSeed => match self.maze.last_generation() {
                Some(code) => {
                    save::append_seed(&self.seed_file, code)?;
                    self.renderer.set_status(format!(
                        "Seed {} saved to {}",
                        code,
                        self.seed_file.display()
                    ));
                }
                None => tracing::warn!("[app] Nothing generated yet, no seed to save"),
            },
            UserAction::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Profiling mode: generate and solve mazes without drawing anything.
    /// Returns the total time spent over `iterations` generations.
    pub fn profile(
        width: u16,
        height: u16,
        generator: Generator,
        perfect: bool,
        iterations: usize,
    ) -> Result<Duration, MazeError> {
        let exit = (width.saturating_sub(1), height.saturating_sub(1));
        let mut maze = Maze::new(width, height, (0, 0), exit, Some(SeedCode::new(PROFILE_SEED, generator)))?;
        let start = Instant::now();
        for _ in 0..iterations {
            maze.generate(perfect, false, None)?;
        }
        let elapsed = start.elapsed();
        tracing::info!(
            "[app] Profiled {} {}x{} mazes with {} in {:?}",
            iterations,
            width,
            height,
            generator,
            elapsed
        );
        Ok(elapsed)
    }

    /// Generate a new maze and write its structure file.
    fn generate(&mut self, animate: bool) -> Result<(), AppError> {
        self.maze
            .generate(self.perfect, animate, Some(&mut self.renderer))?;
        save::write_maze(&self.output_file, &self.maze)?;
        Ok(())
    }
}
