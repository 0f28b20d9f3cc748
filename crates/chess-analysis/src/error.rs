//! Errors surfaced by the analysis engine.

use chess_rules::RulesError;
use thiserror::Error;

/// Errors that can occur while judging moves.
///
/// A position without legal moves is not an error: rankings come back empty.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The played move is not legal in the position it was played from.
    ///
    /// The engine never substitutes another move; the caller decides whether
    /// to skip the ply or abort the game.
    #[error("Illegal move {mv} at ply {ply} in position {fen}")]
    IllegalMove {
        /// Zero-based ply index.
        ply: usize,
        /// The move as supplied by the game source.
        mv: String,
        /// FEN of the position before the move.
        fen: String,
    },

    /// The rules engine failed while probing a position.
    #[error("Engine probe failed: {0}")]
    EngineProbe(#[from] RulesError),
}

impl AnalysisError {
    /// Returns true if this is an illegal-move error.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, AnalysisError::IllegalMove { .. })
    }
}
