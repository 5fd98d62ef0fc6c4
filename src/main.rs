use std::process::ExitCode;

use amazeing::{app::App, config::Config};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "amazeing.log";

/// Log to a file in the temp directory, the terminal belongs to the maze.
/// Set `DEBUG=1` for debug logs.
fn init_tracing() -> WorkerGuard {
    let level = match std::env::var("DEBUG") {
        Ok(value) if value == "1" => Level::DEBUG,
        _ => Level::INFO,
    };
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    guard
}

fn main() -> ExitCode {
    let _guard = init_tracing();

    let mut args = std::env::args();
    args.next();
    let (Some(config_path), None) = (args.next(), args.next()) else {
        eprintln!("Usage: amazeing <config-file>");
        eprintln!("The config file is the only accepted argument.");
        return ExitCode::FAILURE;
    };

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("[main] {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("[main] {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    if let Err(e) = App::setup_terminal(&mut stdout) {
        eprintln!("Error: cannot set up the terminal: {e}");
        return ExitCode::FAILURE;
    }
    let result = app.run();
    if let Err(e) = App::restore_terminal(&mut stdout) {
        eprintln!("Error: cannot restore the terminal: {e}");
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("[main] {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
