//! Chess position evaluation scalar.

use chess_rules::Color;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A heuristic position score in pawns.
///
/// Positive values favor White unless the value has been oriented to a side
/// with [`Evaluation::for_side`]. There is no fixed bound and no mate score:
/// zero is balanced material with no positional bonus.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluation(f64);

impl Evaluation {
    /// A balanced position.
    pub const ZERO: Evaluation = Evaluation(0.0);

    /// Wraps a score in pawns.
    pub const fn new(pawns: f64) -> Self {
        Evaluation(pawns)
    }

    /// The score in pawns.
    pub const fn pawns(self) -> f64 {
        self.0
    }

    /// Converts a White-positive score to one where positive favors `side`.
    ///
    /// The conversion is its own inverse.
    pub fn for_side(self, side: Color) -> Self {
        match side {
            Color::White => self,
            Color::Black => -self,
        }
    }

    /// Total order usable for sorting (see [`f64::total_cmp`]).
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// The larger of two evaluations.
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl Add for Evaluation {
    type Output = Evaluation;

    fn add(self, rhs: Self) -> Self::Output {
        Evaluation(self.0 + rhs.0)
    }
}

impl AddAssign<f64> for Evaluation {
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}

impl Sub for Evaluation {
    type Output = Evaluation;

    fn sub(self, rhs: Self) -> Self::Output {
        Evaluation(self.0 - rhs.0)
    }
}

impl Neg for Evaluation {
    type Output = Evaluation;

    fn neg(self) -> Self::Output {
        Evaluation(-self.0)
    }
}

impl From<f64> for Evaluation {
    fn from(pawns: f64) -> Self {
        Evaluation(pawns)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_flips_for_black() {
        let eval = Evaluation::new(1.5);
        assert_eq!(eval.for_side(Color::White), eval);
        assert_eq!(eval.for_side(Color::Black), Evaluation::new(-1.5));
        assert_eq!(eval.for_side(Color::Black).for_side(Color::Black), eval);
    }

    #[test]
    fn display_is_signed() {
        assert_eq!(Evaluation::new(0.3).to_string(), "+0.30");
        assert_eq!(Evaluation::new(-2.0).to_string(), "-2.00");
    }

    #[test]
    fn max_clamps_negative_gap() {
        let gap = Evaluation::new(-0.25).max(Evaluation::ZERO);
        assert_eq!(gap, Evaluation::ZERO);
        assert_eq!(Evaluation::new(0.4).max(Evaluation::ZERO), Evaluation::new(0.4));
    }

    #[test]
    fn total_cmp_orders_descending_sort() {
        let mut scores = vec![Evaluation::new(0.1), Evaluation::new(2.0), Evaluation::new(-1.0)];
        scores.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(
            scores,
            vec![Evaluation::new(2.0), Evaluation::new(0.1), Evaluation::new(-1.0)]
        );
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Evaluation::new(1.25)).expect("serializable");
        assert_eq!(json, "1.25");
    }
}
