//! Static position evaluation.
//!
//! Scores are in centipawns from White's point of view. Four independent
//! terms are summed: material, pawn structure, king safety and piece
//! combinations. Pawn structure grows as pieces leave the board; king safety
//! uses its own scale derived from the piece count.

use crate::movegen::{is_attacked, KING_OFFSETS};
use crate::Position;
use chess_core::{Color, File, Piece, Rank, Square};

/// Piece values in centipawns
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

const DOUBLED_PAWN_PENALTY: i32 = 30;
const ISOLATED_PAWN_PENALTY: i32 = 20;
const PASSED_PAWN_BONUS: i32 = 30;
const CENTER_PAWN_BONUS: i32 = 50;
const CENTER_NEIGHBOUR_BONUS: i32 = CENTER_PAWN_BONUS / 2;

const KING_SAFETY_UNIT: i32 = 50;
const BISHOP_PAIR_BONUS: i32 = 40;

const CENTER: [Square; 4] = [
    Square::new(File::D, Rank::R4),
    Square::new(File::E, Rank::R4),
    Square::new(File::D, Rank::R5),
    Square::new(File::E, Rank::R5),
];

/// Per-term evaluation, each term already signed for White.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub material: i32,
    pub pawn_structure: i32,
    pub king_safety: i32,
    pub piece_combination: i32,
}

impl Evaluation {
    /// Sum of all terms.
    pub fn total(&self) -> i32 {
        self.material + self.pawn_structure + self.king_safety + self.piece_combination
    }
}

/// Evaluates the position; positive favours White.
pub fn evaluate(position: &Position) -> i32 {
    evaluate_detailed(position).total()
}

/// Evaluates the position and returns every term separately.
pub fn evaluate_detailed(position: &Position) -> Evaluation {
    let piece_count = position.setup().occupied_count() as i32;

    let evaluation = Evaluation {
        material: material(position),
        pawn_structure: pawn_structure(position) * round_div(32, piece_count),
        king_safety: king_safety(position, KING_SAFETY_UNIT * round_div(piece_count - 2, 30)),
        piece_combination: piece_combination(position),
    };

    tracing::debug!(
        material = evaluation.material,
        pawn_structure = evaluation.pawn_structure,
        king_safety = evaluation.king_safety,
        piece_combination = evaluation.piece_combination,
        total = evaluation.total(),
        "evaluated position"
    );
    evaluation
}

/// Integer division rounding half to even; zero when `den` is zero.
fn round_div(num: i32, den: i32) -> i32 {
    if den == 0 {
        return 0;
    }
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    let q = num.div_euclid(den);
    let twice_rem = 2 * num.rem_euclid(den);
    if twice_rem > den || (twice_rem == den && q % 2 != 0) {
        q + 1
    } else {
        q
    }
}

fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

fn material(position: &Position) -> i32 {
    position
        .setup()
        .board
        .iter()
        .filter_map(|code| Some(sign(code.color()?) * piece_value(code.piece()?)))
        .sum()
}

fn pawns_of(position: &Position, color: Color) -> Vec<Square> {
    Square::ALL
        .into_iter()
        .filter(|&sq| position.piece_at(sq).is(Piece::Pawn, color))
        .collect()
}

/// Raw pawn-structure score before tapering.
fn pawn_structure(position: &Position) -> i32 {
    let mut score = 0;

    for color in Color::ALL {
        let sign = sign(color);
        let ours = pawns_of(position, color);
        let theirs = pawns_of(position, color.opposite());

        let mut per_file = [0i32; 8];
        for sq in &ours {
            per_file[sq.file().index() as usize] += 1;
        }

        // Doubled
        for count in per_file {
            if count > 1 {
                score -= sign * (count - 1) * DOUBLED_PAWN_PENALTY;
            }
        }

        for sq in &ours {
            let file = sq.file().index() as i32;

            // Isolated
            let has_neighbour = [file - 1, file + 1]
                .into_iter()
                .any(|f| (0..8).contains(&f) && per_file[f as usize] > 0);
            if !has_neighbour {
                score -= sign * ISOLATED_PAWN_PENALTY;
            }

            // Passed
            if is_passed(*sq, color, &theirs) {
                score += sign * PASSED_PAWN_BONUS;
            }
        }

        // Center control
        for center in CENTER {
            if position.piece_at(center).is(Piece::Pawn, color) {
                score += sign * CENTER_PAWN_BONUS;
            }
            for df in [-1, 1] {
                if center
                    .offset(df, 0)
                    .is_some_and(|sq| position.piece_at(sq).is(Piece::Pawn, color))
                {
                    score += sign * CENTER_NEIGHBOUR_BONUS;
                }
            }
        }
    }

    score
}

/// A pawn is passed when no enemy pawn on its own or an adjacent file
/// stands on its rank or anywhere ahead of it.
fn is_passed(sq: Square, color: Color, enemy_pawns: &[Square]) -> bool {
    let file = sq.file().index() as i32;
    let rank = sq.rank().index() as i32;
    let forward = color.pawn_direction() as i32;

    !enemy_pawns.iter().any(|enemy| {
        let df = enemy.file().index() as i32 - file;
        let dr = enemy.rank().index() as i32 - rank;
        df.abs() <= 1 && dr * forward >= 0
    })
}

fn king_safety(position: &Position, scale: i32) -> i32 {
    if scale == 0 {
        return 0;
    }

    let mut score = 0;
    for color in Color::ALL {
        let sign = sign(color);
        // A missing king contributes nothing.
        let Ok(king) = position.king_square(color) else {
            continue;
        };

        if king.rank() == color.back_rank() {
            score += sign * scale;
        } else {
            score -= sign * scale;
        }

        if matches!(king.file(), File::D | File::E | File::F) {
            score -= sign * scale;
        }

        for (df, dr) in KING_OFFSETS {
            let Some(adjacent) = king.offset(df, dr) else {
                continue;
            };
            let hostile = position.piece_at(adjacent).is_color(color.opposite());
            if hostile || is_attacked(position, adjacent, color) {
                score -= sign * scale;
            }
        }
    }
    score
}

fn piece_combination(position: &Position) -> i32 {
    Color::ALL
        .into_iter()
        .filter(|&color| position.setup().count(Piece::Bishop, color) >= 2)
        .map(|color| sign(color) * BISHOP_PAIR_BONUS)
        .sum()
}
