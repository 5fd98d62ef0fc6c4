use thiserror::Error;

use super::cell::Coord;

/// Which end of the maze an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Entry,
    Exit,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Entry => write!(f, "entry"),
            Endpoint::Exit => write!(f, "exit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}, both must be at least 1")]
    InvalidDimension { width: u16, height: u16 },

    #[error("the {endpoint} {coord:?} is reserved by the 42 pattern, change its position")]
    ReservedEntryOrExit { endpoint: Endpoint, coord: Coord },

    #[error("the {endpoint} {coord:?} is outside the {width}x{height} maze")]
    OutOfBounds {
        endpoint: Endpoint,
        coord: Coord,
        width: u16,
        height: u16,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
