//! Chess rules collaborator for move analysis.
//!
//! This crate is the only place that knows how chess is played. It provides:
//! - [`RulesEngine`] - legal-move enumeration with make/undo semantics
//! - [`ChessBoard`] - a `RulesEngine` backed by `shakmaty`
//! - [`Probe`] - scoped make/undo that restores the handle on every exit path
//! - [`Move`] - verbose move values (squares, pieces, SAN)
//! - [`parse_pgn`] / [`read_pgn`] - game-source loading from PGN or bare SAN movetext
//!
//! # Example
//!
//! ```
//! use chess_rules::{ChessBoard, RulesEngine};
//!
//! let mut board = ChessBoard::new();
//! board.play_san("e4").unwrap();
//! board.play_san("e5").unwrap();
//! assert_eq!(board.legal_moves().len(), 29);
//! ```

mod board;
mod engine;
mod error;
mod mov;
mod pgn;
mod probe;

pub use board::{ChessBoard, STARTING_FEN};
pub use engine::RulesEngine;
pub use error::RulesError;
pub use mov::Move;
pub use pgn::{parse_pgn, read_pgn, GameRecord};
pub use probe::Probe;

pub use shakmaty::{Board, Color, Piece, Role, Square};
