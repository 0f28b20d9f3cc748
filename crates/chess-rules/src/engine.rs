//! The rules-engine abstraction consumed by the analysis crate.
//!
//! Analysis code never mutates a position directly. It borrows a
//! [`RulesEngine`] handle, applies probing moves through a
//! [`Probe`](crate::Probe) and relies on the probe to undo them.

use crate::{Move, Probe, RulesError};
use shakmaty::{Board, Color};

/// A chess rules collaborator with make/undo semantics.
///
/// Implementations must enumerate moves in a stable order: two calls on the
/// same position return the same moves in the same order. Ranking ties are
/// broken by this order.
///
/// # Example
///
/// ```
/// use chess_rules::{ChessBoard, RulesEngine};
///
/// let mut board = ChessBoard::new();
/// let e4 = board.parse_san("e4").unwrap();
/// {
///     let mut probe = board.probe();
///     probe.apply_move(&e4).unwrap();
///     assert_eq!(probe.legal_moves().len(), 20);
/// }
/// // The probe undid e4 when it went out of scope.
/// assert_eq!(board.fen(), ChessBoard::new().fen());
/// ```
pub trait RulesEngine {
    /// Returns every legal move in the current position.
    fn legal_moves(&self) -> Vec<Move>;

    /// Returns the number of legal moves without describing them.
    fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    /// Plays `mv`, which must be legal in the current position.
    ///
    /// Returns the move as described by this position. On error the handle
    /// is left unchanged.
    fn apply_move(&mut self, mv: &Move) -> Result<Move, RulesError>;

    /// Takes back the most recently applied move.
    fn undo_last_move(&mut self) -> Result<Move, RulesError>;

    /// FEN of the current position.
    fn fen(&self) -> String;

    /// The side to move.
    fn side_to_move(&self) -> Color;

    /// Returns true if the side to move is in check.
    fn is_in_check(&self) -> bool;

    /// Piece placement of the current position.
    fn board(&self) -> &Board;

    /// Opens a scope whose moves are undone when it is dropped.
    fn probe(&mut self) -> Probe<'_, Self> {
        Probe::new(self)
    }
}
