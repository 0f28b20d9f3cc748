//! Heuristic move-quality annotation for chess games.
//!
//! This crate judges every move of a game against the best move a cheap
//! two-ply search can find, and attaches a suggestion and short lines to the
//! weaker ones. It is an annotation aid, not a playing engine.
//!
//! # Overview
//!
//! - [`Evaluator`] - Static position score (material, center, mobility, kings)
//! - [`MoveRanker`] - Orders legal moves by their value after the best reply
//! - [`LineGenerator`] - Greedy fixed-depth continuations of the top moves
//! - [`MoveClassifier`] - Tiers a played move by its gap to the best move
//! - [`GameAnnotator`] - Replays a game and classifies every ply
//!
//! All probing goes through a [`chess_rules::RulesEngine`] handle and is
//! undone before a call returns.
//!
//! # Example
//!
//! ```
//! use chess_analysis::{AnalysisConfig, GameAnnotator, MoveQuality};
//! use chess_rules::GameRecord;
//!
//! let game = GameRecord::new(
//!     Some("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1"),
//!     vec!["Kf1".to_string()],
//! );
//! let annotation = GameAnnotator::new(AnalysisConfig::default()).annotate(&game)?;
//! let judgement = &annotation.judgements[0];
//! assert_eq!(judgement.quality, MoveQuality::Blunder);
//! assert_eq!(judgement.suggested_move.as_ref().unwrap().san, "Rxd5");
//! # Ok::<(), chess_analysis::AnalysisError>(())
//! ```

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod evaluator;
pub mod lines;
pub mod quality;
pub mod ranker;

pub use analyzer::GameAnnotator;
pub use classifier::MoveClassifier;
pub use config::{AnalysisConfig, ConfigError, EvalWeights, LineConfig, QualityThresholds};
pub use error::AnalysisError;
pub use evaluation::Evaluation;
pub use evaluator::Evaluator;
pub use lines::{Line, LineGenerator};
pub use quality::{GameAnnotation, MoveJudgement, MoveQuality, PlayerStats};
pub use ranker::{MoveRanker, RankedMove};
