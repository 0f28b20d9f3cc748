//! Verbose move representation.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use shakmaty::uci::UciMove;
use shakmaty::{Role, Square};
use std::fmt;

/// A legal move, described in the context of the position it was generated in.
///
/// Moves are produced by a [`RulesEngine`](crate::RulesEngine) and treated as
/// immutable values afterwards. `from`/`to` follow arrow semantics: for
/// castling they are the king's origin and destination (`e1` to `g1`), not
/// the king-takes-rook encoding used internally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// The moving piece.
    pub role: Role,
    /// Promotion piece, if any.
    pub promotion: Option<Role>,
    /// Captured piece, if any (a pawn for en passant).
    pub captured: Option<Role>,
    /// Standard Algebraic Notation including `+`/`#` suffixes.
    pub san: String,
    raw: shakmaty::Move,
}

impl Move {
    /// Builds the verbose description of `raw` given its SAN text.
    pub(crate) fn new(raw: shakmaty::Move, san: String) -> Self {
        let (from, to) = match UciMove::from_standard(raw) {
            UciMove::Normal { from, to, .. } => (from, to),
            _ => (raw.from().unwrap_or_else(|| raw.to()), raw.to()),
        };
        Move {
            from,
            to,
            role: raw.role(),
            promotion: raw.promotion(),
            captured: raw.capture(),
            san,
            raw,
        }
    }

    /// The underlying `shakmaty` move.
    pub fn raw(&self) -> shakmaty::Move {
        self.raw
    }

    /// UCI notation, e.g. `e2e4`, `e1g1`, `e7e8q`.
    pub fn uci(&self) -> String {
        UciMove::from_standard(self.raw).to_string()
    }

    /// Returns true if this is the same move as `other`, ignoring notation.
    pub fn same_move(&self, other: &Move) -> bool {
        self.raw == other.raw
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.san)
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Move", 6)?;
        state.serialize_field("from", &self.from.to_string())?;
        state.serialize_field("to", &self.to.to_string())?;
        state.serialize_field("uci", &self.uci())?;
        state.serialize_field("san", &self.san)?;
        if let Some(role) = self.promotion {
            state.serialize_field("promotion", &role.char())?;
        } else {
            state.skip_field("promotion")?;
        }
        if let Some(role) = self.captured {
            state.serialize_field("captured", &role.char())?;
        } else {
            state.skip_field("captured")?;
        }
        state.end()
    }
}
