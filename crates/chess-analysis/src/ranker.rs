//! Candidate-move ranking with a two-ply lookahead.

use crate::{AnalysisError, Evaluation, Evaluator};
use chess_rules::{Move, Probe, RulesEngine};
use serde::Serialize;

/// A legal move and its lookahead score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMove {
    /// The candidate move.
    #[serde(rename = "move")]
    pub mv: Move,
    /// Position value after the opponent's best reply, oriented so that
    /// higher is better for the side to move at the root of the ranking.
    pub score: Evaluation,
}

/// Orders legal moves best-first for the side to move.
///
/// Each candidate is scored by the position it leads to after the
/// opponent's strongest reply, where "strongest" is judged by a single
/// static evaluation. This is a fixed two-ply heuristic: there is no deeper
/// search, no pruning and no iterative deepening, and it should not be
/// mistaken for a minimax engine.
#[derive(Debug, Clone, Default)]
pub struct MoveRanker {
    evaluator: Evaluator,
}

impl MoveRanker {
    pub fn new(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Ranks every legal move of the current position, best first.
    ///
    /// The result has one entry per legal move and is empty when there are
    /// none (checkmate or stalemate). Ties keep the engine's enumeration
    /// order. The engine is restored before this returns, also on error.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EngineProbe`] if the engine fails to apply a move.
    pub fn rank_moves<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
    ) -> Result<Vec<RankedMove>, AnalysisError> {
        let root = engine.side_to_move();
        let candidates = engine.legal_moves();
        let mut ranked = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let mut probe = Probe::new(&mut *engine);
            probe.apply_move(&candidate)?;
            let score = self.after_best_reply(&mut probe)?.for_side(root);
            ranked.push(RankedMove {
                mv: candidate,
                score,
            });
        }

        // `sort_by` is stable, so equal scores keep enumeration order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        tracing::trace!(candidates = ranked.len(), "Ranked moves");
        Ok(ranked)
    }

    /// The best move for the side to move, if any.
    pub fn best_move<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
    ) -> Result<Option<RankedMove>, AnalysisError> {
        Ok(self.rank_moves(engine)?.into_iter().next())
    }

    /// White-positive value of the position after the reply that is best for
    /// the side to move in `engine`, or the position itself without replies.
    fn after_best_reply<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
    ) -> Result<Evaluation, AnalysisError> {
        let replier = engine.side_to_move();
        let replies = engine.legal_moves();
        if replies.is_empty() {
            return Ok(self.evaluator.evaluate(&*engine));
        }

        let mut best: Option<Evaluation> = None;
        for reply in &replies {
            let mut probe = Probe::new(&mut *engine);
            probe.apply_move(reply)?;
            let value = self.evaluator.evaluate(&probe);
            best = match best {
                Some(current) if current.for_side(replier) >= value.for_side(replier) => {
                    Some(current)
                }
                _ => Some(value),
            };
        }
        Ok(best.unwrap_or_else(|| self.evaluator.evaluate(&*engine)))
    }
}
