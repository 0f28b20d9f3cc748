//! Whole-game annotation.
//!
//! This module provides the [`GameAnnotator`], which replays a game and
//! classifies each played move in order.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::classifier::MoveClassifier;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::quality::{GameAnnotation, MoveJudgement};
use chess_rules::{ChessBoard, GameRecord, Move, RulesEngine};

/// Replays games and judges every ply.
#[derive(Debug, Clone)]
pub struct GameAnnotator {
    classifier: MoveClassifier,
    degrade_failed_plies: bool,
}

impl GameAnnotator {
    /// Creates an annotator with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use chess_analysis::{AnalysisConfig, GameAnnotator};
    /// use chess_rules::parse_pgn;
    ///
    /// let annotator = GameAnnotator::new(AnalysisConfig::default());
    /// let game = parse_pgn("1. e4 e5 2. Nf3 *");
    /// let annotation = annotator.annotate(&game).unwrap();
    /// assert_eq!(annotation.judgements.len(), 3);
    /// ```
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            classifier: MoveClassifier::new(&config),
            degrade_failed_plies: config.degrade_failed_plies,
        }
    }

    pub fn classifier(&self) -> &MoveClassifier {
        &self.classifier
    }

    /// Annotates a complete game, one ply after the other.
    ///
    /// For each ply the SAN is resolved in the current position, the move is
    /// classified from the position before it and then played.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::IllegalMove`] for the first move that cannot be
    ///   resolved; nothing after it can be replayed.
    /// - [`AnalysisError::EngineProbe`] if the start position is invalid, or
    ///   if a probe fails and degradation is disabled.
    pub fn annotate(&self, game: &GameRecord) -> Result<GameAnnotation, AnalysisError> {
        let mut board = ChessBoard::from_fen(game.start_fen())?;
        debug!(plies = game.moves.len(), "Annotating game");

        let mut judgements = Vec::with_capacity(game.moves.len());
        for (ply, san) in game.moves.iter().enumerate() {
            let played = resolve(&board, ply, san)?;
            judgements.push(self.judge(&mut board, &played, ply)?);
            board.apply_move(&played)?;
        }

        Ok(GameAnnotation::new(game, judgements))
    }

    /// Same result as [`Self::annotate`], with plies classified in parallel.
    ///
    /// The game is replayed once to collect each ply's position; every
    /// worker then judges its ply on a board of its own.
    ///
    /// # Errors
    ///
    /// Same as [`Self::annotate`]. When several plies fail, the error of the
    /// earliest one is not guaranteed to be the one reported.
    pub fn annotate_parallel(&self, game: &GameRecord) -> Result<GameAnnotation, AnalysisError> {
        let mut board = ChessBoard::from_fen(game.start_fen())?;
        let mut plies = Vec::with_capacity(game.moves.len());
        for (ply, san) in game.moves.iter().enumerate() {
            let played = resolve(&board, ply, san)?;
            plies.push((board.fen(), played.clone()));
            board.apply_move(&played)?;
        }
        debug!(plies = plies.len(), "Annotating game in parallel");

        let judgements = plies
            .par_iter()
            .enumerate()
            .map(|(ply, (fen, played))| -> Result<MoveJudgement, AnalysisError> {
                let mut board = ChessBoard::from_fen(fen)?;
                self.judge(&mut board, played, ply)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GameAnnotation::new(game, judgements))
    }

    fn judge<E: RulesEngine + ?Sized>(
        &self,
        engine: &mut E,
        played: &Move,
        ply: usize,
    ) -> Result<MoveJudgement, AnalysisError> {
        let mover = engine.side_to_move();
        match self.classifier.classify(engine, played, ply) {
            Err(err @ AnalysisError::EngineProbe(_)) if self.degrade_failed_plies => {
                warn!(ply, mv = %played, error = %err, "Probe failed, using neutral judgement");
                Ok(MoveJudgement::neutral(ply, played.clone(), mover))
            }
            result => result,
        }
    }
}

impl Default for GameAnnotator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

fn resolve(board: &ChessBoard, ply: usize, san: &str) -> Result<Move, AnalysisError> {
    board
        .parse_san(san)
        .map_err(|_| AnalysisError::IllegalMove {
            ply,
            mv: san.to_string(),
            fen: board.fen(),
        })
}
