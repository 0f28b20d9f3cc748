//! Plain-text rendering of an annotated game.

use chess_analysis::{GameAnnotation, MoveJudgement, PlayerStats};
use chess_rules::Color;
use std::fmt;

/// Text report: one line per ply, suggestions and lines for weak moves, and
/// a summary per player.
pub struct Report<'a>(pub &'a GameAnnotation);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let annotation = self.0;
        let (first_number, black_first) = move_numbering(&annotation.start_fen);

        writeln!(
            f,
            "{} vs {} ({})",
            annotation.white, annotation.black, annotation.result
        )?;
        writeln!(f)?;

        for judgement in &annotation.judgements {
            let index = judgement.ply + usize::from(black_first);
            let number = first_number + index / 2;
            let prefix = match judgement.mover {
                Color::White => format!("{number}."),
                Color::Black => format!("{number}..."),
            };
            writeln!(
                f,
                "{prefix} {:<8} {} (gap {:.2})",
                judgement.mv.san,
                judgement.quality,
                judgement.score_gap.pawns()
            )?;
            write_suggestion(f, judgement)?;
        }

        writeln!(f)?;
        write_stats(f, "White", &annotation.white, &annotation.white_stats)?;
        write_stats(f, "Black", &annotation.black, &annotation.black_stats)
    }
}

fn write_suggestion(f: &mut fmt::Formatter<'_>, judgement: &MoveJudgement) -> fmt::Result {
    if let Some(best) = &judgement.suggested_move {
        writeln!(f, "    best: {}", best.san)?;
    }
    for line in judgement.alternate_lines.iter().flatten() {
        writeln!(
            f,
            "    line: {}  ({})",
            line.moves.join(" "),
            line.final_evaluation
        )?;
    }
    Ok(())
}

fn write_stats(
    f: &mut fmt::Formatter<'_>,
    side: &str,
    name: &str,
    stats: &PlayerStats,
) -> fmt::Result {
    writeln!(
        f,
        "{side} ({name}): {} moves, accuracy {:.1}%, avg gap {:.2}",
        stats.total_moves, stats.accuracy_percent, stats.avg_score_gap
    )?;
    writeln!(
        f,
        "    brilliant {}, good {}, normal {}, inaccuracies {}, mistakes {}, blunders {}",
        stats.brilliant,
        stats.good,
        stats.normal,
        stats.inaccuracies,
        stats.mistakes,
        stats.blunders
    )
}

/// Full-move number of the first ply and whether Black moves first.
fn move_numbering(fen: &str) -> (usize, bool) {
    let mut fields = fen.split_whitespace().skip(1);
    let black_first = fields.next() == Some("b");
    let number = fields
        .nth(3)
        .and_then(|n| n.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1);
    (number, black_first)
}
