use thiserror::Error;

use crate::games::ultimate::{Mark, Position};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("cell {position} is already occupied")]
    CellOccupied { position: Position },

    #[error("sub-board is already decided")]
    BoardTerminal,

    #[error("move {position} is not legal in the current position")]
    IllegalMove { position: Position },

    #[error("game is already over")]
    NotInProgress,

    #[error("no legal moves available for {mover}")]
    NoLegalMoves { mover: Mark },

    #[error("AI worker is no longer running")]
    WorkerUnavailable,

    #[error("an AI move is already being calculated")]
    AiRequestPending,

    #[error("session was created without an AI opponent")]
    AiDisabled,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[source] serde_yaml_ng::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Invalid(String),
}
