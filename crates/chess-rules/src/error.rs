//! Error type for rules-engine operations.

use shakmaty::Chess;
use thiserror::Error;

/// Errors reported by a [`RulesEngine`](crate::RulesEngine) handle.
#[derive(Error, Debug)]
pub enum RulesError {
    /// The FEN string could not be parsed.
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// The FEN parsed, but describes a position that cannot occur.
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] Box<shakmaty::PositionError<Chess>>),

    /// The move is not legal in the current position.
    #[error("Illegal move {mv} in position {fen}")]
    IllegalMove {
        /// The rejected move as it was given (SAN or UCI).
        mv: String,
        /// FEN of the position the move was tried in.
        fen: String,
    },

    /// The move text is neither valid SAN nor valid UCI.
    #[error("Unrecognized move notation: {0}")]
    InvalidNotation(String),

    /// `undo_last_move` was called with nothing left to undo.
    #[error("No move to undo")]
    NothingToUndo,

    /// The engine could not complete a probe for a reason of its own.
    #[error("Engine failure: {0}")]
    Engine(String),
}

impl From<shakmaty::PositionError<Chess>> for RulesError {
    fn from(err: shakmaty::PositionError<Chess>) -> Self {
        RulesError::InvalidPosition(Box::new(err))
    }
}
