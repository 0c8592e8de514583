//! Pseudo-legal move generation.
//!
//! Moves obey the movement rules of each piece but may leave the mover's
//! own king in check. Squares are visited in board order (a8 to h1) and each
//! piece emits its moves in a fixed order, so the output is deterministic.

use super::attacks::{
    is_attacked, ray, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
use super::MoveList;
use crate::Position;
use chess_core::{CastlingSide, Color, File, Move, Piece, PieceCode, Square};

/// Generates all pseudo-legal moves for the side to move.
pub fn generate_pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = position.side_to_move();

    for from in Square::ALL {
        let code = position.piece_at(from);
        if !code.is_color(us) {
            continue;
        }
        let Some(piece) = code.piece() else {
            continue;
        };
        match piece {
            Piece::Pawn => generate_pawn_moves(position, from, us, &mut moves),
            Piece::Knight => generate_step_moves(position, from, us, &KNIGHT_OFFSETS, &mut moves),
            Piece::Bishop => generate_slider_moves(position, from, us, &BISHOP_DIRECTIONS, &mut moves),
            Piece::Rook => generate_slider_moves(position, from, us, &ROOK_DIRECTIONS, &mut moves),
            Piece::Queen => generate_slider_moves(position, from, us, &QUEEN_DIRECTIONS, &mut moves),
            Piece::King => {
                generate_step_moves(position, from, us, &KING_OFFSETS, &mut moves);
                generate_castling_moves(position, from, us, &mut moves);
            }
        }
    }

    moves
}

/// Pushes a pawn move, expanding it into the four promotions when it lands
/// on the last rank.
fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, us: Color) {
    if to.rank() == us.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, PieceCode::new(piece, us)));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let them = us.opposite();
    let forward = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(0, forward) {
        if position.piece_at(one).is_empty() {
            push_pawn_move(moves, from, one, us);

            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if position.piece_at(two).is_empty() {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, forward) {
            if position.piece_at(to).is_color(them) {
                push_pawn_move(moves, from, to, us);
            }
        }
    }

    // En passant
    if let Some(ep) = position.en_passant() {
        for df in [-1, 1] {
            if from.offset(df, forward) != Some(ep) {
                continue;
            }
            let victim = ep.offset(0, -forward);
            if victim.is_some_and(|sq| position.piece_at(sq).is(Piece::Pawn, them)) {
                moves.push(Move::new(from, ep));
            }
        }
    }
}

fn generate_step_moves(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if !position.piece_at(to).is_color(us) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

fn generate_slider_moves(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &dir in directions {
        for to in ray(from, dir) {
            let target = position.piece_at(to);
            if target.is_color(us) {
                break;
            }
            moves.push(Move::new(from, to));
            if !target.is_empty() {
                break;
            }
        }
    }
}

fn generate_castling_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let rights = position.castling();
    if from != CastlingSide::king_origin(us)
        || !CastlingSide::ALL.into_iter().any(|side| rights.has(us, side))
        || is_attacked(position, from, us)
    {
        return;
    }

    for side in CastlingSide::ALL {
        if !rights.has(us, side) {
            continue;
        }
        let rook_from = side.rook_origin(us);
        if !position.piece_at(rook_from).is(Piece::Rook, us) {
            continue;
        }

        // The king crosses the rook's landing square on its way to its own.
        let king_path = [side.rook_target(us), side.king_target(us)];
        if king_path
            .iter()
            .any(|&sq| !position.piece_at(sq).is_empty() || is_attacked(position, sq, us))
        {
            continue;
        }
        if side == CastlingSide::Queenside {
            let knight_square = Square::new(File::B, us.back_rank());
            if !position.piece_at(knight_square).is_empty() {
                continue;
            }
        }

        moves.push(Move::new(from, side.king_target(us)));
    }
}
