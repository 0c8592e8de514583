//! Move representation.

use crate::{Color, Piece, PieceCode, Square};
use std::fmt;

/// A chess move: origin, destination and an optional promotion piece.
///
/// The promotion is stored as a full [`PieceCode`], so it already carries the
/// mover's color. Equality compares all three parts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceCode>,
}

impl Move {
    /// Creates a move without promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a promotion move.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceCode) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion code, if this is a promotion.
    #[inline]
    pub const fn promotion(self) -> Option<PieceCode> {
        self.promotion
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        let promo = self
            .promotion
            .and_then(|code| code.piece())
            .map(|piece| piece.letter() as char);
        match promo {
            Some(p) => format!("{}{}{}", self.from, self.to, p),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from UCI notation.
    ///
    /// `mover` colors the promotion piece; the move is not checked against
    /// any position.
    pub fn from_uci(s: &str, mover: Color) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        if s.len() == 4 {
            return Some(Move::new(from, to));
        }
        let piece = match s.as_bytes()[4].to_ascii_lowercase() {
            b'n' => Piece::Knight,
            b'b' => Piece::Bishop,
            b'r' => Piece::Rook,
            b'q' => Piece::Queen,
            _ => return None,
        };
        Some(Move::with_promotion(from, to, PieceCode::new(piece, mover)))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_parts() {
        let m = Move::new(sq("e2"), sq("e4"));
        assert_eq!(m.from(), sq("e2"));
        assert_eq!(m.to(), sq("e4"));
        assert_eq!(m.promotion(), None);
    }

    #[test]
    fn equality_includes_promotion() {
        let queen = Move::with_promotion(
            sq("a7"),
            sq("a8"),
            PieceCode::new(Piece::Queen, Color::White),
        );
        let knight = Move::with_promotion(
            sq("a7"),
            sq("a8"),
            PieceCode::new(Piece::Knight, Color::White),
        );
        assert_ne!(queen, knight);
        assert_ne!(queen, Move::new(sq("a7"), sq("a8")));
        assert_eq!(
            queen,
            Move::with_promotion(
                sq("a7"),
                sq("a8"),
                PieceCode::new(Piece::Queen, Color::White)
            )
        );
    }

    #[test]
    fn move_uci() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Move::new(e2, e4).to_uci(), "e2e4");

        let promo = Move::with_promotion(
            sq("e7"),
            sq("e8"),
            PieceCode::new(Piece::Queen, Color::White),
        );
        assert_eq!(promo.to_uci(), "e7e8q");

        let black_promo = Move::with_promotion(
            sq("b2"),
            sq("b1"),
            PieceCode::new(Piece::Knight, Color::Black),
        );
        assert_eq!(black_promo.to_uci(), "b2b1n");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4", Color::White).unwrap();
        assert_eq!(m, Move::new(sq("e2"), sq("e4")));

        let promo = Move::from_uci("e2e1R", Color::Black).unwrap();
        assert_eq!(
            promo.promotion(),
            Some(PieceCode::new(Piece::Rook, Color::Black))
        );

        assert!(Move::from_uci("invalid", Color::White).is_none());
        assert!(Move::from_uci("e2e9", Color::White).is_none());
        assert!(Move::from_uci("e7e8k", Color::White).is_none());
        assert!(Move::from_uci("e7e8x", Color::White).is_none());
    }

    #[test]
    fn move_from_uci_edge_cases() {
        assert!(Move::from_uci("e2", Color::White).is_none());
        assert!(Move::from_uci("e2e", Color::White).is_none());
        assert!(Move::from_uci("e2e4qq", Color::White).is_none());
        assert!(Move::from_uci("é2e4", Color::White).is_none());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::new(sq("g1"), sq("f3"));
        assert_eq!(format!("{:?}", m), "Move(g1f3)");
        assert_eq!(format!("{}", m), "g1f3");
    }
}
