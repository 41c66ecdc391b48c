//! Error types for the turn planner.

use thiserror::Error;

use crate::cell::Cell;

/// Everything that can make a turn or an agent construction fail.
///
/// Illegal move proposals are not errors: the planner filters them out before
/// they are accepted. These variants describe bad configuration or a percept
/// that breaks its own preconditions.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration value out of range
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration document could not be parsed
    #[error("invalid configuration json: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("unknown shape id {0}")]
    UnknownShape(u8),

    /// The 7-bit travel field only has meaning for 0..=100
    #[error("memory byte {byte:#04x} carries travel field {field}, expected 0..=100")]
    InvalidMemory { byte: u8, field: u8 },

    #[error("organism has no occupied cells")]
    EmptyOrganism,

    #[error("reported size {reported} does not match {occupied} occupied cells")]
    SizeMismatch { reported: usize, occupied: usize },

    #[error("periphery cell {0} is not occupied")]
    PeripheryNotOccupied(Cell),

    #[error("movable cell {0} is already occupied")]
    MovableOccupied(Cell),

    #[error("occupancy map has {0} cells, expected 10000")]
    MapSize(usize),

    #[error("coordinate ({row}, {col}) lies outside the map")]
    OutOfBounds { row: u8, col: u8 },

    /// Flat coordinate lists are row/col pairs
    #[error("coordinate list has odd length {0}")]
    OddCoordinates(usize),
}

pub type AgentResult<T> = Result<T, AgentError>;

impl AgentError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
