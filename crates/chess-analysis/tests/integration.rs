//! Integration tests for chess-analysis crate.
//!
//! End-to-end scenarios over real positions and games.

use chess_analysis::{
    AnalysisConfig, AnalysisError, Evaluation, GameAnnotator, LineGenerator, MoveClassifier,
    MoveQuality, MoveRanker,
};
use chess_rules::{parse_pgn, ChessBoard, Color, RulesEngine, STARTING_FEN};

const FREE_QUEEN: &str = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";
const FORCED: &str = "k7/8/8/8/8/8/1q6/K7 w - - 0 1";
const CHECKMATE: &str = "7k/6Q1/6K1/8/8/8/8/8 b - - 0 1";
const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

const SCHOLARS_MATE: &str = r#"[Event "Casual game"]
[White "Alice"]
[Black "Bob"]
[Result "1-0"]

1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6?? {Misses the threat} 4. Qxf7# 1-0
"#;

#[test]
fn test_opening_move_is_near_best() {
    let mut board = ChessBoard::new();
    let e4 = board.parse_san("e4").expect("e4 is legal");

    let judgement = MoveClassifier::default()
        .classify(&mut board, &e4, 0)
        .expect("Failed to classify e4");

    assert!(
        matches!(judgement.quality, MoveQuality::Brilliant | MoveQuality::Good),
        "e4 should be near-best, got {:?} (gap {})",
        judgement.quality,
        judgement.score_gap
    );
    assert!(judgement.suggested_move.is_none());
    assert!(judgement.alternate_lines.is_none());
    assert_eq!(board.fen(), STARTING_FEN);
}

#[test]
fn test_ignored_queen_capture_is_blunder() {
    let mut board = ChessBoard::from_fen(FREE_QUEEN).expect("valid FEN");
    let played = board.parse_san("Kf1").expect("Kf1 is legal");

    let judgement = MoveClassifier::default()
        .classify(&mut board, &played, 0)
        .expect("Failed to classify Kf1");

    assert!(judgement.score_gap > Evaluation::new(3.0));
    assert_eq!(judgement.quality, MoveQuality::Blunder);

    let suggestion = judgement.suggested_move.expect("Blunder carries a suggestion");
    assert_eq!(suggestion.san, "Rxd5");
    assert_eq!(suggestion.uci(), "d2d5");

    let lines = judgement.alternate_lines.expect("Blunder carries lines");
    assert!((1..=2).contains(&lines.len()));
    assert!(lines.iter().all(|line| line.moves.len() <= 3));
    assert_eq!(lines[0].moves[0], "Rxd5");
    assert_eq!(board.fen(), FREE_QUEEN);
}

#[test]
fn test_forced_move_is_brilliant() {
    let mut board = ChessBoard::from_fen(FORCED).expect("valid FEN");
    let ranking = MoveRanker::default()
        .rank_moves(&mut board)
        .expect("Failed to rank");
    assert_eq!(ranking.len(), 1);

    let judgement = MoveClassifier::default()
        .classify(&mut board, &ranking[0].mv, 0)
        .expect("Failed to classify forced move");
    assert_eq!(judgement.score_gap, Evaluation::ZERO);
    assert_eq!(judgement.quality, MoveQuality::Brilliant);
}

#[test]
fn test_terminal_positions() {
    for fen in [CHECKMATE, STALEMATE] {
        let mut board = ChessBoard::from_fen(fen).expect("valid FEN");
        assert!(board.is_game_over());
        assert!(MoveRanker::default()
            .rank_moves(&mut board)
            .expect("ranking a terminal position")
            .is_empty());
        assert!(LineGenerator::default()
            .generate_lines(&mut board, 2, 3)
            .expect("lines for a terminal position")
            .is_empty());
    }
}

#[test]
fn test_scholars_mate_game_annotation() {
    let game = parse_pgn(SCHOLARS_MATE);
    assert_eq!(game.moves.len(), 7);

    let annotator = GameAnnotator::new(AnalysisConfig::default());
    let annotation = annotator.annotate(&game).expect("Failed to annotate game");

    assert_eq!(annotation.white, "Alice");
    assert_eq!(annotation.black, "Bob");
    assert_eq!(annotation.result, "1-0");
    assert_eq!(annotation.judgements.len(), 7);
    assert_eq!(annotation.white_stats.total_moves, 4);
    assert_eq!(annotation.black_stats.total_moves, 3);

    let nf6 = annotation.judgement(5).expect("ply 5 exists");
    assert_eq!(nf6.mv.uci(), "g8f6");
    assert_eq!(nf6.mover, Color::Black);
    assert_eq!(annotation.judgement(6).map(|j| j.mv.san.as_str()), Some("Qxf7#"));

    for judgement in &annotation.judgements {
        assert!(judgement.score_gap >= Evaluation::ZERO);
        assert_eq!(
            judgement.suggested_move.is_some(),
            judgement.quality.needs_suggestion()
        );
        assert_eq!(
            judgement.alternate_lines.is_some(),
            judgement.quality.needs_suggestion()
        );
    }

    let parallel = annotator
        .annotate_parallel(&game)
        .expect("Failed to annotate game in parallel");
    assert_eq!(parallel, annotation);
}

#[test]
fn test_annotation_serializes_to_json() {
    let game = parse_pgn("1. e4 e5 2. Ke2 *");
    let annotation = GameAnnotator::default().annotate(&game).expect("annotate");
    let json = serde_json::to_value(&annotation).expect("serializable");

    assert_eq!(json["judgements"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["judgements"][0]["move"]["uci"], "e2e4");
    assert_eq!(json["judgements"][1]["mover"], "black");
    assert!(json["white_stats"]["accuracy_percent"].is_number());
}

#[test]
fn test_illegal_move_stops_annotation() {
    let game = parse_pgn("1. e4 e5 2. Nf3 Nf3 *");
    let result = GameAnnotator::default().annotate(&game);
    match result {
        Err(AnalysisError::IllegalMove { ply, mv, .. }) => {
            assert_eq!(ply, 3);
            assert_eq!(mv, "Nf3");
        }
        other => panic!("Expected IllegalMove, got {:?}", other),
    }
    assert!(GameAnnotator::default().annotate_parallel(&game).is_err());
}

#[test]
fn test_classification_is_idempotent() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";
    let mut board = ChessBoard::from_fen(fen).expect("valid FEN");
    let played = board.parse_san("h6").expect("h6 is legal");
    let classifier = MoveClassifier::default();

    let first = classifier.classify(&mut board, &played, 5).expect("classify");
    let second = classifier.classify(&mut board, &played, 5).expect("classify");
    assert_eq!(first, second);
    assert_eq!(board.fen(), fen);
}

#[test]
fn test_custom_line_shape() {
    let config = AnalysisConfig::from_toml_str("[lines]\nmax_lines = 1\ndepth = 2\n")
        .expect("valid config");
    let mut board = ChessBoard::from_fen(FREE_QUEEN).expect("valid FEN");
    let played = board.parse_san("Kf1").expect("Kf1 is legal");

    let judgement = MoveClassifier::new(&config)
        .classify(&mut board, &played, 0)
        .expect("classify");
    let lines = judgement.alternate_lines.expect("lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].moves.len(), 2);
}
