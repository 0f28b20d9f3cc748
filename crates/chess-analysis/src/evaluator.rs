//! Static position scoring.

use crate::config::EvalWeights;
use crate::Evaluation;
use chess_rules::{ChessBoard, Color, Role, RulesEngine, RulesError, Square};

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Scores a single position from White's point of view.
///
/// The score is the sum of four terms:
///
/// 1. material, using the configured piece values;
/// 2. a bonus per occupied center square, signed by the occupant's color;
/// 3. mobility: the number of legal moves of the side to move, scaled and
///    signed by whose turn it is;
/// 4. a flat "king safety" bonus per side whose king is on the board.
///
/// The king term is a placeholder, not a safety model. The function depends
/// on the position only (no history) and performs no mutation.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    /// Evaluates the current position of `engine`.
    pub fn evaluate<E: RulesEngine + ?Sized>(&self, engine: &E) -> Evaluation {
        let board = engine.board();
        let mut score = Evaluation::ZERO;

        for (_, piece) in board.iter() {
            score += signed(piece.color, self.piece_value(piece.role));
        }

        for square in CENTER {
            if let Some(piece) = board.piece_at(square) {
                score += signed(piece.color, self.weights.center_bonus);
            }
        }

        let mobility = engine.legal_move_count() as f64 * self.weights.mobility_weight;
        score += signed(engine.side_to_move(), mobility);

        for color in [Color::White, Color::Black] {
            if board.king_of(color).is_some() {
                score += signed(color, self.weights.king_safety_bonus);
            }
        }

        score
    }

    /// Evaluates a position given as FEN.
    pub fn evaluate_fen(&self, fen: &str) -> Result<Evaluation, RulesError> {
        let board = ChessBoard::from_fen(fen)?;
        Ok(self.evaluate(&board))
    }

    fn piece_value(&self, role: Role) -> f64 {
        match role {
            Role::Pawn => self.weights.pawn,
            Role::Knight => self.weights.knight,
            Role::Bishop => self.weights.bishop,
            Role::Rook => self.weights.rook,
            Role::Queen => self.weights.queen,
            Role::King => self.weights.king,
        }
    }
}

fn signed(color: Color, value: f64) -> f64 {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}
