//! Judging a single played move.

use crate::config::{AnalysisConfig, LineConfig, QualityThresholds};
use crate::{
    AnalysisError, Evaluation, Evaluator, LineGenerator, MoveJudgement, MoveQuality, MoveRanker,
};
use chess_rules::{Move, RulesEngine};
use tracing::debug;

/// Compares a played move with the best move of its position.
#[derive(Debug, Clone, Default)]
pub struct MoveClassifier {
    lines: LineGenerator,
    thresholds: QualityThresholds,
    line_config: LineConfig,
}

impl MoveClassifier {
    /// Creates a classifier from the evaluation, threshold and line settings.
    pub fn new(config: &AnalysisConfig) -> Self {
        let ranker = MoveRanker::new(Evaluator::new(config.weights.clone()));
        Self {
            lines: LineGenerator::new(ranker),
            thresholds: config.thresholds.clone(),
            line_config: config.lines.clone(),
        }
    }

    pub fn ranker(&self) -> &MoveRanker {
        self.lines.ranker()
    }

    /// Judges `played` in the current position of `engine`.
    ///
    /// `move_index` is the zero-based ply index recorded in the judgement.
    /// Tiers worse than Good carry the top-ranked move and alternate lines
    /// from the same position. The engine is left as it was found, and the
    /// same inputs always give the same judgement.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::IllegalMove`] if `played` is not legal here.
    /// - [`AnalysisError::EngineProbe`] if the engine fails while probing.
    ///
    /// # Example
    ///
    /// ```
    /// use chess_analysis::{MoveClassifier, MoveQuality};
    /// use chess_rules::ChessBoard;
    ///
    /// let mut board = ChessBoard::new();
    /// let e4 = board.parse_san("e4").unwrap();
    /// let judgement = MoveClassifier::default().classify(&mut board, &e4, 0).unwrap();
    /// assert!(judgement.quality <= MoveQuality::Good);
    /// assert!(judgement.suggested_move.is_none());
    /// ```
    pub fn classify<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
        played: &Move,
        move_index: usize,
    ) -> Result<MoveJudgement, AnalysisError> {
        let mover = engine.side_to_move();
        let ranking = self.ranker().rank_moves(engine)?;

        let best_score = match ranking.first() {
            Some(best) => best.score,
            None => self.ranker().evaluator().evaluate(&*engine).for_side(mover),
        };
        let played_score = ranking
            .iter()
            .find(|ranked| ranked.mv.same_move(played))
            .map(|ranked| ranked.score)
            .ok_or_else(|| AnalysisError::IllegalMove {
                ply: move_index,
                mv: played.san.clone(),
                fen: engine.fen(),
            })?;

        let score_gap = (best_score - played_score).max(Evaluation::ZERO);
        let quality = MoveQuality::from_score_gap(score_gap, &self.thresholds);

        let (suggested_move, alternate_lines) = if quality.needs_suggestion() {
            let lines = self.lines.lines_from_ranking(
                engine,
                &ranking,
                self.line_config.max_lines,
                self.line_config.depth,
            )?;
            (ranking.first().map(|best| best.mv.clone()), Some(lines))
        } else {
            (None, None)
        };

        debug!(
            ply = move_index,
            mv = %played,
            %quality,
            gap = %score_gap,
            "Classified move"
        );

        Ok(MoveJudgement {
            ply: move_index,
            mv: played.clone(),
            mover,
            quality,
            score_gap,
            best_score,
            played_score,
            suggested_move,
            alternate_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::{ChessBoard, Color};

    fn classify(fen: &str, san: &str) -> MoveJudgement {
        let mut board = ChessBoard::from_fen(fen).unwrap();
        let played = board.parse_san(san).unwrap();
        let judgement = MoveClassifier::default()
            .classify(&mut board, &played, 0)
            .unwrap();
        assert_eq!(board.fen(), fen);
        judgement
    }

    #[test]
    fn best_move_has_zero_gap() {
        let judgement = classify(chess_rules::STARTING_FEN, "e4");
        assert_eq!(judgement.score_gap, Evaluation::ZERO);
        assert_eq!(judgement.quality, MoveQuality::Brilliant);
        assert_eq!(judgement.best_score, judgement.played_score);
        assert_eq!(judgement.mover, Color::White);
    }

    #[test]
    fn ignoring_free_queen_is_a_blunder() {
        let judgement = classify("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", "Kf1");
        assert_eq!(judgement.quality, MoveQuality::Blunder);
        assert!(judgement.score_gap.pawns() > 3.0);
        assert_eq!(
            judgement.suggested_move.as_ref().map(|m| m.san.as_str()),
            Some("Rxd5")
        );
        let lines = judgement.alternate_lines.expect("lines for a blunder");
        assert!(!lines.is_empty() && lines.len() <= 2);
        assert_eq!(lines[0].moves[0], "Rxd5");
    }

    #[test]
    fn forced_move_is_brilliant() {
        let judgement = classify("k7/8/8/8/8/8/1q6/K7 w - - 0 1", "Kxb2");
        assert_eq!(judgement.score_gap, Evaluation::ZERO);
        assert_eq!(judgement.quality, MoveQuality::Brilliant);
        assert!(judgement.suggested_move.is_none());
    }

    #[test]
    fn black_moves_are_judged_from_black_side() {
        let judgement = classify("4k3/8/8/3r4/8/8/3Q4/7K b - - 0 1", "Ke7");
        assert_eq!(judgement.mover, Color::Black);
        assert!(judgement.quality >= MoveQuality::Mistake);
        assert!(judgement.best_score.pawns() > judgement.played_score.pawns());
    }

    #[test]
    fn move_from_another_position_is_illegal() {
        let other = ChessBoard::new().parse_san("e4").unwrap();
        let mut board = ChessBoard::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let result = MoveClassifier::default().classify(&mut board, &other, 7);
        match result {
            Err(AnalysisError::IllegalMove { ply, mv, .. }) => {
                assert_eq!(ply, 7);
                assert_eq!(mv, "e4");
            }
            other => panic!("Expected IllegalMove, got {:?}", other),
        }
    }

    #[test]
    fn terminal_position_rejects_any_move() {
        let other = ChessBoard::new().parse_san("e4").unwrap();
        let mut board = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = MoveClassifier::default().classify(&mut board, &other, 0);
        assert!(matches!(result, Err(AnalysisError::IllegalMove { .. })));
    }

    #[test]
    fn classification_is_idempotent() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        assert_eq!(classify(fen, "a3"), classify(fen, "a3"));
    }

    #[test]
    fn thresholds_come_from_config() {
        let mut config = AnalysisConfig::default();
        config.thresholds.brilliant = 10.0;
        config.thresholds.good = 20.0;
        config.thresholds.normal = 30.0;
        config.thresholds.inaccuracy = 40.0;
        config.thresholds.mistake = 50.0;
        let mut board = ChessBoard::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let played = board.parse_san("Kf1").unwrap();
        let judgement = MoveClassifier::new(&config)
            .classify(&mut board, &played, 0)
            .unwrap();
        assert_eq!(judgement.quality, MoveQuality::Brilliant);
        assert!(judgement.alternate_lines.is_none());
    }
}
