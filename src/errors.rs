// src/errors.rs
use std::fmt;

use crate::state::GameState;

#[derive(Debug)]
pub enum TowerError {
    /// An operation was called while the game was in a state it does not
    /// accept. This is a programmer error: it is never caught or retried,
    /// it aborts the operation and surfaces to the caller.
    State {
        expected: Vec<GameState>,
        actual: GameState,
    },
    /// A display or audio subsystem could not be brought up. Raised during
    /// `initialize()` so a half-built game context never reaches callers.
    SubsystemInit(String),
    Asset(String),
    Audio(String),
    Io(std::io::Error),
}

impl TowerError {
    pub fn state(expected: &[GameState], actual: GameState) -> Self {
        TowerError::State {
            expected: expected.to_vec(),
            actual,
        }
    }
}

impl fmt::Display for TowerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TowerError::State { expected, actual } => {
                let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
                write!(
                    f,
                    "Expected the game state to be one of [{}], not {}",
                    expected.join(", "),
                    actual
                )
            }
            TowerError::SubsystemInit(msg) => write!(f, "Subsystem Init Error: {}", msg),
            TowerError::Asset(msg) => write!(f, "Asset Error: {}", msg),
            TowerError::Audio(msg) => write!(f, "Audio Error: {}", msg),
            TowerError::Io(err) => write!(f, "IO Error: {}", err),
        }
    }
}

impl std::error::Error for TowerError {}

impl From<std::io::Error> for TowerError {
    fn from(err: std::io::Error) -> Self {
        TowerError::Io(err)
    }
}
