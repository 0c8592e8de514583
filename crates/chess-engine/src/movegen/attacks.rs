//! Square attack detection and piece movement geometry.
//!
//! Directions are `(file_delta, rank_delta)` pairs; a positive rank delta
//! points toward rank 8. Stepping through [`Square::offset`] keeps every
//! walk on the board, so no direction can wrap around an edge.

use crate::Position;
use chess_core::{Color, Piece, PieceCode, Square};

/// Orthogonal directions: north, west, east, south.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (-1, 0), (1, 0), (0, -1)];

/// Diagonal directions: north-west, north-east, south-west, south-east.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

/// All eight neighbours, in board order from the north-west corner.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Queens move along every king direction, without a distance limit.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, 2),
    (1, 2),
    (-2, 1),
    (2, 1),
    (-2, -1),
    (2, -1),
    (-1, -2),
    (1, -2),
];

/// Iterates the squares along a direction, starting next to `from` and
/// stopping at the board edge.
#[inline]
pub(crate) fn ray(from: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(df, dr), move |sq| sq.offset(df, dr))
}

/// Returns the content of the first occupied square along a direction.
#[inline]
fn first_blocker(position: &Position, from: Square, dir: (i8, i8)) -> Option<PieceCode> {
    ray(from, dir)
        .map(|sq| position.piece_at(sq))
        .find(|code| !code.is_empty())
}

/// Returns true if `sq` is attacked by any piece of the opponent of
/// `defender`.
///
/// Attacks are computed geometrically. The square itself may hold anything,
/// and pins or checks against the attacker do not matter.
pub fn is_attacked(position: &Position, sq: Square, defender: Color) -> bool {
    let attacker = defender.opposite();

    let slides_into = |directions: &[(i8, i8)], kind: Piece| {
        directions.iter().any(|&dir| {
            matches!(
                first_blocker(position, sq, dir),
                Some(code) if code.is(kind, attacker) || code.is(Piece::Queen, attacker)
            )
        })
    };
    if slides_into(&ROOK_DIRECTIONS, Piece::Rook) || slides_into(&BISHOP_DIRECTIONS, Piece::Bishop)
    {
        return true;
    }

    let steps_into = |offsets: &[(i8, i8)], kind: Piece| {
        offsets.iter().any(|&(df, dr)| {
            sq.offset(df, dr)
                .is_some_and(|from| position.piece_at(from).is(kind, attacker))
        })
    };
    if steps_into(&KNIGHT_OFFSETS, Piece::Knight) || steps_into(&KING_OFFSETS, Piece::King) {
        return true;
    }

    // An attacking pawn stands one rank ahead of the square, seen from the
    // defender, on an adjacent file.
    let toward_attacker = defender.pawn_direction();
    [-1, 1].into_iter().any(|df| {
        sq.offset(df, toward_attacker)
            .is_some_and(|from| position.piece_at(from).is(Piece::Pawn, attacker))
    })
}
