//! Greedy principal lines.

use crate::{AnalysisError, Evaluation, MoveRanker, RankedMove};
use chess_rules::{Move, Probe, RulesEngine};
use serde::Serialize;

/// A short continuation starting with one candidate move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// SAN of every move in the line, root move first.
    pub moves: Vec<String>,
    /// White-positive evaluation of the position after the last move.
    pub final_evaluation: Evaluation,
}

/// Extends the top-ranked moves of a position into fixed-depth lines.
///
/// After the root move each side simply plays the ranker's best move. There
/// is no branching, so a line costs `depth` rankings.
#[derive(Debug, Clone, Default)]
pub struct LineGenerator {
    ranker: MoveRanker,
}

impl LineGenerator {
    pub fn new(ranker: MoveRanker) -> Self {
        Self { ranker }
    }

    pub fn ranker(&self) -> &MoveRanker {
        &self.ranker
    }

    /// Ranks the current position and builds up to `max_lines` lines of at
    /// most `depth` moves each, best root first.
    ///
    /// Terminal positions and a zero `depth` produce no lines. The engine is
    /// left as it was found.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EngineProbe`] if the engine fails while probing.
    ///
    /// # Example
    ///
    /// ```
    /// use chess_analysis::LineGenerator;
    /// use chess_rules::ChessBoard;
    ///
    /// let mut board = ChessBoard::new();
    /// let lines = LineGenerator::default().generate_lines(&mut board, 2, 3).unwrap();
    /// assert_eq!(lines.len(), 2);
    /// assert!(lines.iter().all(|line| line.moves.len() <= 3));
    /// ```
    pub fn generate_lines<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
        max_lines: usize,
        depth: usize,
    ) -> Result<Vec<Line>, AnalysisError> {
        let ranking = self.ranker.rank_moves(engine)?;
        self.lines_from_ranking(engine, &ranking, max_lines, depth)
    }

    /// Same as [`Self::generate_lines`] for a ranking the caller already has
    /// for the current position of `engine`.
    pub fn lines_from_ranking<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
        ranking: &[RankedMove],
        max_lines: usize,
        depth: usize,
    ) -> Result<Vec<Line>, AnalysisError> {
        if depth == 0 {
            return Ok(Vec::new());
        }
        ranking
            .iter()
            .take(max_lines)
            .map(|root| self.extend(&mut *engine, &root.mv, depth))
            .collect()
    }

    fn extend<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
        root: &Move,
        depth: usize,
    ) -> Result<Line, AnalysisError> {
        let mut probe = Probe::new(engine);
        let mut moves = Vec::with_capacity(depth);
        moves.push(probe.apply_move(root)?.san);

        while moves.len() < depth {
            let Some(best) = self.ranker.best_move(&mut probe)? else {
                break;
            };
            moves.push(probe.apply_move(&best.mv)?.san);
        }

        let final_evaluation = self.ranker.evaluator().evaluate(&probe);
        tracing::trace!(root = %root, plies = moves.len(), "Extended line");
        Ok(Line {
            moves,
            final_evaluation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::{ChessBoard, STARTING_FEN};

    #[test]
    fn lines_follow_ranking_order() {
        let mut board = ChessBoard::new();
        let generator = LineGenerator::default();
        let ranking = generator.ranker().rank_moves(&mut board).unwrap();
        let lines = generator.generate_lines(&mut board, 2, 3).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].moves[0], ranking[0].mv.san);
        assert_eq!(lines[1].moves[0], ranking[1].mv.san);
        assert!(lines.iter().all(|line| line.moves.len() == 3));
        assert_eq!(board.fen(), STARTING_FEN);
        assert!(board.history().is_empty());
    }

    #[test]
    fn final_evaluation_matches_line_end() {
        let mut board = ChessBoard::new();
        let generator = LineGenerator::default();
        let lines = generator.generate_lines(&mut board, 1, 3).unwrap();

        let mut replay = ChessBoard::new();
        for san in &lines[0].moves {
            replay.play_san(san).unwrap();
        }
        let expected = generator.ranker().evaluator().evaluate(&replay);
        assert_eq!(lines[0].final_evaluation, expected);
    }

    #[test]
    fn line_count_is_capped_by_legal_moves() {
        let mut board = ChessBoard::from_fen("k7/8/8/8/8/8/1q6/K7 w - - 0 1").unwrap();
        let lines = LineGenerator::default().generate_lines(&mut board, 2, 3).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].moves[0], "Kxb2");
        assert!(lines[0].moves.len() <= 3);
    }

    #[test]
    fn line_stops_at_checkmate() {
        let fen = "7k/Q7/6K1/8/8/8/8/8 w - - 0 1";
        let mut board = ChessBoard::from_fen(fen).unwrap();
        let generator = LineGenerator::default();
        let ranking = generator.ranker().rank_moves(&mut board).unwrap();
        let mate: Vec<RankedMove> = ranking
            .into_iter()
            .filter(|r| r.mv.san == "Qg7#")
            .collect();

        let lines = generator.lines_from_ranking(&mut board, &mate, 2, 3).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].moves, vec!["Qg7#".to_string()]);
        // Queen up, Black has no moves.
        assert!((lines[0].final_evaluation.pawns() - 9.0).abs() < 1e-9);
        assert_eq!(board.fen(), fen);
    }

    #[test]
    fn terminal_position_has_no_lines() {
        let mut board = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let lines = LineGenerator::default().generate_lines(&mut board, 2, 3).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn zero_depth_or_lines_is_empty() {
        let mut board = ChessBoard::new();
        let generator = LineGenerator::default();
        assert!(generator.generate_lines(&mut board, 2, 0).unwrap().is_empty());
        assert!(generator.generate_lines(&mut board, 0, 3).unwrap().is_empty());
    }

    #[test]
    fn serializes_moves_and_evaluation() {
        let line = Line {
            moves: vec!["Rxd5".to_string(), "Ke7".to_string()],
            final_evaluation: Evaluation::new(5.5),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["moves"][0], "Rxd5");
        assert_eq!(json["final_evaluation"], 5.5);
    }
}
