//! Game-source loading: PGN files and bare SAN movetext.
//!
//! Parsing is done by `pgn-reader`; this module only collects the tag pairs
//! and mainline SAN of the first game. Legality is left to the replay, which
//! knows the position each move is played in.

use crate::board::STARTING_FEN;
use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use std::io::{self, Read};
use std::ops::ControlFlow;

/// A game as supplied by a game source: tags plus mainline SAN moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    /// Tag pairs in file order.
    pub tags: Vec<(String, String)>,
    /// Mainline moves in SAN, in game order.
    pub moves: Vec<String>,
}

impl GameRecord {
    /// Builds a record from a starting FEN (or the standard position) and SAN moves.
    pub fn new(start_fen: Option<&str>, moves: Vec<String>) -> Self {
        let tags = start_fen
            .map(|fen| {
                vec![
                    ("SetUp".to_string(), "1".to_string()),
                    ("FEN".to_string(), fen.to_string()),
                ]
            })
            .unwrap_or_default();
        GameRecord { tags, moves }
    }

    /// Value of the first tag named `key`.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Name of the White player, `"?"` when unknown.
    pub fn white(&self) -> &str {
        self.tag("White").unwrap_or("?")
    }

    /// Name of the Black player, `"?"` when unknown.
    pub fn black(&self) -> &str {
        self.tag("Black").unwrap_or("?")
    }

    /// Game result tag, `"*"` when unknown.
    pub fn result(&self) -> &str {
        self.tag("Result").unwrap_or("*")
    }

    /// The FEN the game starts from.
    pub fn start_fen(&self) -> &str {
        self.tag("FEN").unwrap_or(STARTING_FEN)
    }
}

/// Parses PGN text (or a bare list of SAN moves) into a [`GameRecord`].
///
/// Only the first game in the text is read. Comments, variations, NAGs,
/// annotation glyphs, move numbers and the result token are discarded.
/// Empty input gives an empty record.
///
/// # Example
///
/// ```
/// use chess_rules::parse_pgn;
///
/// let record = parse_pgn("[White \"Morphy\"]\n\n1. e4 e5 {Open game} 2. Nf3 (2. f4) d6 1-0");
/// assert_eq!(record.white(), "Morphy");
/// assert_eq!(record.moves, vec!["e4", "e5", "Nf3", "d6"]);
/// ```
pub fn parse_pgn(text: &str) -> GameRecord {
    // Reading from memory has no I/O failure to report.
    read_pgn(text.as_bytes()).unwrap_or_default()
}

/// Reads the first game from a PGN source such as a file or stdin.
///
/// A source without any game gives an empty record.
///
/// # Errors
///
/// Returns the underlying I/O error if the source cannot be read.
pub fn read_pgn<R: Read>(source: R) -> io::Result<GameRecord> {
    let mut reader = Reader::new(source);
    Ok(reader.read_game(&mut MainlineCollector)?.unwrap_or_default())
}

/// Visitor keeping tags and mainline moves, skipping variations.
struct MainlineCollector;

impl Visitor for MainlineCollector {
    type Tags = Vec<(String, String)>;
    type Movetext = GameRecord;
    type Output = GameRecord;

    fn begin_tags(&mut self) -> ControlFlow<GameRecord, Self::Tags> {
        ControlFlow::Continue(Vec::new())
    }

    fn tag(
        &mut self,
        tags: &mut Self::Tags,
        name: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<GameRecord> {
        tags.push((
            String::from_utf8_lossy(name).into_owned(),
            value.decode_utf8_lossy().into_owned(),
        ));
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: Self::Tags) -> ControlFlow<GameRecord, GameRecord> {
        ControlFlow::Continue(GameRecord {
            tags,
            moves: Vec::new(),
        })
    }

    fn san(&mut self, record: &mut GameRecord, san_plus: SanPlus) -> ControlFlow<GameRecord> {
        record.moves.push(san_plus.to_string());
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _record: &mut GameRecord) -> ControlFlow<GameRecord, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn end_game(&mut self, record: GameRecord) -> GameRecord {
        record
    }
}
