//! `shakmaty`-backed rules-engine handle.

use crate::{Move, RulesEngine, RulesError};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{Board, CastlingMode, Chess, Color, EnPassantMode, Position};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A standard-chess position with an undo stack.
///
/// The handle owns the position it was created from plus one entry per
/// applied move, so undo is a pop. Cloning a `ChessBoard` gives an
/// independent handle, which is how parallel workers get their own.
#[derive(Debug, Clone)]
pub struct ChessBoard {
    /// Root position followed by the position after each applied move.
    positions: Vec<Chess>,
    /// Applied moves, as described at the time they were played.
    history: Vec<Move>,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates a handle on the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Creates a handle on an arbitrary position.
    pub fn from_position(position: Chess) -> Self {
        ChessBoard {
            positions: vec![position],
            history: Vec::new(),
        }
    }

    /// Creates a handle from a FEN string.
    ///
    /// # Errors
    ///
    /// [`RulesError::InvalidFen`] if the text is not FEN, and
    /// [`RulesError::InvalidPosition`] if it describes an impossible position.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen.trim().parse()?;
        let position: Chess = fen.into_position(CastlingMode::Standard)?;
        Ok(Self::from_position(position))
    }

    /// The current position.
    pub fn position(&self) -> &Chess {
        // The root entry is never popped.
        &self.positions[self.positions.len() - 1]
    }

    /// Moves applied since the handle was created, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Resolves SAN text (suffixes and annotation glyphs allowed) to a legal move.
    pub fn parse_san(&self, san: &str) -> Result<Move, RulesError> {
        let text = san.trim_end_matches(['!', '?']);
        let parsed: SanPlus = text
            .parse()
            .map_err(|_| RulesError::InvalidNotation(san.to_string()))?;
        let raw = parsed
            .san
            .to_move(self.position())
            .map_err(|_| self.illegal(san))?;
        Ok(self.describe(raw))
    }

    /// Resolves UCI text such as `e2e4` or `e7e8q` to a legal move.
    pub fn parse_uci(&self, uci: &str) -> Result<Move, RulesError> {
        let parsed: UciMove = uci
            .parse()
            .map_err(|_| RulesError::InvalidNotation(uci.to_string()))?;
        let raw = parsed
            .to_move(self.position())
            .map_err(|_| self.illegal(uci))?;
        Ok(self.describe(raw))
    }

    /// Resolves and plays a SAN move.
    pub fn play_san(&mut self, san: &str) -> Result<Move, RulesError> {
        let mv = self.parse_san(san)?;
        self.apply_move(&mv)
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.position().is_checkmate()
    }

    /// Returns true if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        self.position().is_stalemate()
    }

    /// Returns true if the game is over by the rules of the position alone.
    pub fn is_game_over(&self) -> bool {
        self.position().is_game_over()
    }

    fn describe(&self, raw: shakmaty::Move) -> Move {
        let san = SanPlus::from_move(self.position().clone(), raw);
        Move::new(raw, san.to_string())
    }

    fn illegal(&self, mv: &str) -> RulesError {
        RulesError::IllegalMove {
            mv: mv.to_string(),
            fen: self.fen(),
        }
    }
}

impl RulesEngine for ChessBoard {
    fn legal_moves(&self) -> Vec<Move> {
        self.position()
            .legal_moves()
            .into_iter()
            .map(|raw| self.describe(raw))
            .collect()
    }

    fn legal_move_count(&self) -> usize {
        self.position().legal_moves().len()
    }

    fn apply_move(&mut self, mv: &Move) -> Result<Move, RulesError> {
        let raw = mv.raw();
        if !self.position().is_legal(raw) {
            return Err(self.illegal(&mv.san));
        }
        let played = self.describe(raw);
        let mut next = self.position().clone();
        next.play_unchecked(raw);
        self.positions.push(next);
        self.history.push(played.clone());
        Ok(played)
    }

    fn undo_last_move(&mut self) -> Result<Move, RulesError> {
        let undone = self.history.pop().ok_or(RulesError::NothingToUndo)?;
        self.positions.pop();
        Ok(undone)
    }

    fn fen(&self) -> String {
        Fen::from_position(self.position(), EnPassantMode::Legal).to_string()
    }

    fn side_to_move(&self) -> Color {
        self.position().turn()
    }

    fn is_in_check(&self) -> bool {
        self.position().is_check()
    }

    fn board(&self) -> &Board {
        self.position().board()
    }
}
