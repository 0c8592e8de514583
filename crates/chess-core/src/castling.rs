//! Castling rights.

use crate::{Color, Square};
use std::fmt;

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// Home square of the king, shared by both wings.
    pub const fn king_origin(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// Square the king lands on.
    pub const fn king_target(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::Kingside, Color::White) => Square::G1,
            (CastlingSide::Queenside, Color::White) => Square::C1,
            (CastlingSide::Kingside, Color::Black) => Square::G8,
            (CastlingSide::Queenside, Color::Black) => Square::C8,
        }
    }

    /// Home square of the rook on this wing.
    pub const fn rook_origin(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::Kingside, Color::White) => Square::H1,
            (CastlingSide::Queenside, Color::White) => Square::A1,
            (CastlingSide::Kingside, Color::Black) => Square::H8,
            (CastlingSide::Queenside, Color::Black) => Square::A8,
        }
    }

    /// Square the rook lands on.
    pub const fn rook_target(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::Kingside, Color::White) => Square::F1,
            (CastlingSide::Queenside, Color::White) => Square::D1,
            (CastlingSide::Kingside, Color::Black) => Square::F8,
            (CastlingSide::Queenside, Color::Black) => Square::D8,
        }
    }

    /// Returns the wing whose rook starts on `sq`, if any.
    pub fn from_rook_origin(sq: Square, color: Color) -> Option<Self> {
        CastlingSide::ALL
            .into_iter()
            .find(|side| side.rook_origin(color) == sq)
    }
}

/// Castling rights flags.
///
/// Rights are only ever removed after the position is set up; the empty set
/// serializes as the explicit `-` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    const fn flag(color: Color, side: CastlingSide) -> u8 {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastlingSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastlingSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastlingSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if `color` may still castle to `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Removes one right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes both rights of a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastlingSide::Kingside);
        self.remove(color, CastlingSide::Queenside);
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parses the FEN castling field: `-` or any combination of `KQkq`.
    pub fn from_fen_field(field: &str) -> Option<Self> {
        if field.is_empty() {
            return None;
        }
        let mut flags = 0u8;
        for c in field.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                '-' => 0,
                _ => return None,
            };
        }
        Some(CastlingRights(flags))
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the canonical `KQkq` order, or `-` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (flag, c) in [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.0 & flag != 0 {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
