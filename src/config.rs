//! Loader for the plain-text `KEY=value` configuration file.
//!
//! ```text
//! # comment
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=4242
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::maze::{Coord, SeedCode};

/// Keys that must be present, and may not be commented out.
pub const MANDATORY_KEYS: [&str; 6] = ["WIDTH", "HEIGHT", "ENTRY", "EXIT", "OUTPUT_FILE", "PERFECT"];
pub const SEED_KEY: &str = "SEED";
const OUTPUT_EXTENSION: &str = ".txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Any problem with the content of the file.
    #[error("{0}")]
    Invalid(String),

    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

/// Validated start parameters of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u16,
    pub height: u16,
    pub entry: Coord,
    pub exit: Coord,
    pub output_file: PathBuf,
    pub perfect: bool,
    /// `None` when `SEED` is absent or empty
    pub seed: Option<SeedCode>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::parse(&source)?;
        tracing::info!("[config] Loaded {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let values = collect_values(source)?;

        for key in MANDATORY_KEYS {
            if !values.contains_key(key) {
                return Err(invalid(format!("Mandatory option {key} was not found!")));
            }
        }

        let width = parse_dimension("WIDTH", values["WIDTH"])?;
        let height = parse_dimension("HEIGHT", values["HEIGHT"])?;

        let entry = parse_coord("ENTRY", values["ENTRY"])?;
        let exit = parse_coord("EXIT", values["EXIT"])?;
        for (name, coord) in [("entry", entry), ("exit", exit)] {
            if coord.0 >= width || coord.1 >= height {
                return Err(invalid(format!(
                    "The {name} {},{} is out of range, it must be inside the {width}x{height} maze",
                    coord.0, coord.1
                )));
            }
        }

        let output_file = values["OUTPUT_FILE"];
        if output_file.len() <= OUTPUT_EXTENSION.len() || !output_file.ends_with(OUTPUT_EXTENSION) {
            return Err(invalid(format!(
                "OUTPUT_FILE must be a valid {OUTPUT_EXTENSION} filename, got '{output_file}'"
            )));
        }

        let perfect = match values["PERFECT"] {
            "True" => true,
            "False" => false,
            other => {
                return Err(invalid(format!(
                    "Only True or False are allowed for PERFECT, got '{other}'"
                )));
            }
        };

        let seed = match values.get(SEED_KEY) {
            None | Some(&"") => None,
            Some(value) => Some(parse_seed(value)?),
        };

        Ok(Config {
            width,
            height,
            entry,
            exit,
            output_file: PathBuf::from(output_file),
            perfect,
            seed,
        })
    }
}

/// Split the file into trimmed key/value pairs, checking comments and line format.
fn collect_values(source: &str) -> Result<HashMap<&str, &str>, ConfigError> {
    let mut values = HashMap::new();
    for (number, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some(key) = MANDATORY_KEYS.iter().find(|&&key| comment.starts_with(key)) {
                return Err(invalid(format!("Cannot comment a mandatory variable: {key}")));
            }
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(invalid(format!(
                "Wrong format on line {}, expected key=value, got '{line}'",
                number + 1
            )));
        };
        let key = key.trim();
        if !MANDATORY_KEYS.contains(&key) && key != SEED_KEY {
            tracing::warn!("[config] Ignoring unknown key '{}' on line {}", key, number + 1);
            continue;
        }
        values.insert(key, value.trim());
    }
    Ok(values)
}

fn parse_dimension(key: &str, value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(format!(
            "'{key}' accepts only numbers between 1 and {}, not '{value}'",
            u16::MAX
        ))),
    }
}

fn parse_coord(key: &str, value: &str) -> Result<Coord, ConfigError> {
    let Some((x, y)) = value.split_once(',') else {
        return Err(invalid(format!(
            "Wrong format for {key}, expected {key}=x,y, got '{value}'"
        )));
    };
    match (x.trim().parse::<u16>(), y.trim().parse::<u16>()) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(invalid(format!(
            "'{key}' accepts only non-negative numbers, not '{value}'"
        ))),
    }
}

fn parse_seed(value: &str) -> Result<SeedCode, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .and_then(SeedCode::decode)
        .ok_or_else(|| {
            invalid(format!(
                "SEED must be an integer greater than {} ending with 0, 1 or 2, got '{value}'",
                SeedCode::MIN_ENCODED_EXCLUSIVE
            ))
        })
}
