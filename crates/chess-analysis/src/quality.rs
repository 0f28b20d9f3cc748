//! Move quality tiers, per-ply judgements and game summaries.

use crate::config::QualityThresholds;
use crate::{Evaluation, Line};
use chess_rules::{Color, GameRecord, Move};
use serde::{Serialize, Serializer};
use std::fmt;

/// Classification of a played move by its score gap to the best move.
///
/// Variants are ordered from best to worst, so `quality > MoveQuality::Good`
/// reads as "worse than good".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MoveQuality {
    /// Indistinguishable from the best move.
    Brilliant,
    /// Very small loss.
    Good,
    /// Small loss.
    Normal,
    /// Noticeable loss.
    Inaccuracy,
    /// Significant loss.
    Mistake,
    /// Major loss.
    Blunder,
}

impl MoveQuality {
    /// All tiers, best first.
    pub const ALL: [MoveQuality; 6] = [
        MoveQuality::Brilliant,
        MoveQuality::Good,
        MoveQuality::Normal,
        MoveQuality::Inaccuracy,
        MoveQuality::Mistake,
        MoveQuality::Blunder,
    ];

    /// Maps a non-negative score gap to its tier. Each bound is inclusive.
    pub fn from_score_gap(gap: Evaluation, thresholds: &QualityThresholds) -> Self {
        let gap = gap.pawns();
        if gap <= thresholds.brilliant {
            MoveQuality::Brilliant
        } else if gap <= thresholds.good {
            MoveQuality::Good
        } else if gap <= thresholds.normal {
            MoveQuality::Normal
        } else if gap <= thresholds.inaccuracy {
            MoveQuality::Inaccuracy
        } else if gap <= thresholds.mistake {
            MoveQuality::Mistake
        } else {
            MoveQuality::Blunder
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            MoveQuality::Brilliant => "Brilliant",
            MoveQuality::Good => "Good",
            MoveQuality::Normal => "Normal",
            MoveQuality::Inaccuracy => "Inaccuracy",
            MoveQuality::Mistake => "Mistake",
            MoveQuality::Blunder => "Blunder",
        }
    }

    /// Tiers worse than [`MoveQuality::Good`] get a suggestion and lines.
    pub fn needs_suggestion(self) -> bool {
        self > MoveQuality::Good
    }
}

impl fmt::Display for MoveQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The verdict on one played move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveJudgement {
    /// Zero-based ply index in the game.
    pub ply: usize,
    /// The move that was played.
    #[serde(rename = "move")]
    pub mv: Move,
    /// The side that played it.
    #[serde(serialize_with = "serialize_color")]
    pub mover: Color,
    pub quality: MoveQuality,
    /// `best_score - played_score`, never negative.
    pub score_gap: Evaluation,
    /// Score of the top-ranked move, oriented to the mover.
    pub best_score: Evaluation,
    /// Score of the played move, oriented to the mover.
    pub played_score: Evaluation,
    /// Top-ranked move, for tiers worse than Good.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_move: Option<Move>,
    /// Lines from the position before the move, for tiers worse than Good.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_lines: Option<Vec<Line>>,
}

impl MoveJudgement {
    /// A "Normal, no suggestion" judgement for a ply that could not be probed.
    pub fn neutral(ply: usize, mv: Move, mover: Color) -> Self {
        Self {
            ply,
            mv,
            mover,
            quality: MoveQuality::Normal,
            score_gap: Evaluation::ZERO,
            best_score: Evaluation::ZERO,
            played_score: Evaluation::ZERO,
            suggested_move: None,
            alternate_lines: None,
        }
    }
}

fn serialize_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(match color {
        Color::White => "white",
        Color::Black => "black",
    })
}

/// Statistics for one player's moves in a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    /// Total moves judged.
    pub total_moves: u32,
    pub brilliant: u32,
    pub good: u32,
    pub normal: u32,
    pub inaccuracies: u32,
    pub mistakes: u32,
    pub blunders: u32,
    /// Mean score gap in pawns.
    pub avg_score_gap: f64,
    /// Share of moves rated Normal or better (0-100).
    pub accuracy_percent: f64,
}

impl PlayerStats {
    /// Aggregates judgements, normally those of a single player.
    pub fn from_judgements<'a>(judgements: impl IntoIterator<Item = &'a MoveJudgement>) -> Self {
        let mut stats = Self::default();
        let mut gap_sum = 0.0;
        let mut accurate = 0u32;

        for judgement in judgements {
            stats.total_moves += 1;
            gap_sum += judgement.score_gap.pawns();
            match judgement.quality {
                MoveQuality::Brilliant => stats.brilliant += 1,
                MoveQuality::Good => stats.good += 1,
                MoveQuality::Normal => stats.normal += 1,
                MoveQuality::Inaccuracy => stats.inaccuracies += 1,
                MoveQuality::Mistake => stats.mistakes += 1,
                MoveQuality::Blunder => stats.blunders += 1,
            }
            if judgement.quality <= MoveQuality::Normal {
                accurate += 1;
            }
        }

        if stats.total_moves > 0 {
            let total = f64::from(stats.total_moves);
            stats.avg_score_gap = gap_sum / total;
            stats.accuracy_percent = f64::from(accurate) * 100.0 / total;
        }
        stats
    }

    /// Number of moves in `quality`.
    pub fn count(&self, quality: MoveQuality) -> u32 {
        match quality {
            MoveQuality::Brilliant => self.brilliant,
            MoveQuality::Good => self.good,
            MoveQuality::Normal => self.normal,
            MoveQuality::Inaccuracy => self.inaccuracies,
            MoveQuality::Mistake => self.mistakes,
            MoveQuality::Blunder => self.blunders,
        }
    }
}

/// Every judgement of a game plus per-player statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAnnotation {
    pub white: String,
    pub black: String,
    pub result: String,
    /// Position the game was replayed from.
    pub start_fen: String,
    /// One judgement per ply, in game order.
    pub judgements: Vec<MoveJudgement>,
    pub white_stats: PlayerStats,
    pub black_stats: PlayerStats,
}

impl GameAnnotation {
    /// Assembles the annotation of `game` and computes player statistics.
    pub fn new(game: &GameRecord, judgements: Vec<MoveJudgement>) -> Self {
        let white_stats =
            PlayerStats::from_judgements(judgements.iter().filter(|j| j.mover == Color::White));
        let black_stats =
            PlayerStats::from_judgements(judgements.iter().filter(|j| j.mover == Color::Black));
        Self {
            white: game.white().to_string(),
            black: game.black().to_string(),
            result: game.result().to_string(),
            start_fen: game.start_fen().to_string(),
            judgements,
            white_stats,
            black_stats,
        }
    }

    /// The judgement for a zero-based ply index.
    pub fn judgement(&self, ply: usize) -> Option<&MoveJudgement> {
        self.judgements.get(ply)
    }

    /// Statistics of the player with `color`.
    pub fn stats(&self, color: Color) -> &PlayerStats {
        match color {
            Color::White => &self.white_stats,
            Color::Black => &self.black_stats,
        }
    }
}
