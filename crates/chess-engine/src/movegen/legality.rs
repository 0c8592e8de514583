//! Legal move filtering.
//!
//! Each pseudo-legal move is tried on the board itself: the squares it
//! touches are saved, the pieces are moved, the mover's king is looked up
//! again and tested for attack, and the saved squares are written back.

use super::attacks::is_attacked;
use super::pseudo::generate_pseudo_legal_moves;
use super::MoveList;
use crate::{EngineError, Position};
use chess_core::{Color, Move, Piece, PieceCode, Square};

/// Squares overwritten while a move is simulated, with their old contents.
struct Snapshot {
    saved: [(Square, PieceCode); 3],
    len: usize,
}

impl Snapshot {
    fn new() -> Self {
        Snapshot {
            saved: [(Square::A8, PieceCode::EMPTY); 3],
            len: 0,
        }
    }

    fn write(&mut self, position: &mut Position, sq: Square, code: PieceCode) {
        self.saved[self.len] = (sq, position.piece_at(sq));
        self.len += 1;
        position.place(sq, code);
    }

    /// Restores in reverse order, so a square written twice ends up with
    /// its original content.
    fn restore(self, position: &mut Position) {
        for &(sq, code) in self.saved[..self.len].iter().rev() {
            position.place(sq, code);
        }
    }
}

/// Returns true if `m` leaves the mover's king safe.
///
/// The board is restored before this returns, including when the king
/// cannot be found.
pub fn is_legal(position: &mut Position, m: Move) -> Result<bool, EngineError> {
    let us = position.side_to_move();
    let snapshot = simulate(position, m, us);
    let verdict = position
        .king_square(us)
        .map(|king| !is_attacked(position, king, us));
    snapshot.restore(position);
    verdict
}

/// Relocates the moving piece, and lifts a pawn taken en passant.
fn simulate(position: &mut Position, m: Move, us: Color) -> Snapshot {
    let mut snapshot = Snapshot::new();
    let moving = position.piece_at(m.from());

    if moving.is(Piece::Pawn, us) && Some(m.to()) == position.en_passant() {
        if let Some(victim) = m.to().offset(0, -us.pawn_direction()) {
            if position.piece_at(victim).is(Piece::Pawn, us.opposite()) {
                snapshot.write(position, victim, PieceCode::EMPTY);
            }
        }
    }
    snapshot.write(position, m.to(), moving);
    snapshot.write(position, m.from(), PieceCode::EMPTY);
    snapshot
}

/// Generates all legal moves for the side to move.
pub fn generate_legal_moves(position: &mut Position) -> Result<MoveList, EngineError> {
    // Fails early when the mover has no king, even if nothing can move.
    position.king_square(position.side_to_move())?;

    let pseudo = generate_pseudo_legal_moves(position);
    let pseudo_count = pseudo.len();

    let mut legal = MoveList::new();
    for m in pseudo {
        if is_legal(position, m)? {
            legal.push(m);
        }
    }

    tracing::trace!(
        fen = %position.fen(),
        pseudo = pseudo_count,
        legal = legal.len(),
        "filtered moves"
    );
    Ok(legal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal(fen: &str) -> Vec<String> {
        let mut position = Position::from_fen(fen).unwrap();
        generate_legal_moves(&mut position)
            .unwrap()
            .into_iter()
            .map(|m| m.to_uci())
            .collect()
    }

    #[test]
    fn startpos_has_twenty_moves() {
        assert_eq!(legal(chess_core::STARTPOS).len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // The e2 knight is pinned by the e8 rook.
        let moves = legal("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(!moves.iter().any(|m| m.starts_with("e2")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let moves = legal("3r2k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(!moves.contains(&"e1d1".to_string()));
        assert!(!moves.contains(&"e1d2".to_string()));
        assert!(moves.contains(&"e1e2".to_string()));
    }

    #[test]
    fn check_must_be_answered() {
        // Rook on e8 gives check; the king steps off the file or the bishop
        // interposes on e3.
        let moves = legal("4r1k1/8/8/8/8/8/3B4/4K3 w - - 0 1");
        let mut sorted = moves.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["d2e3", "e1d1", "e1f1", "e1f2"]);
    }

    #[test]
    fn capturing_the_checker_is_legal() {
        let moves = legal("6k1/8/8/8/8/8/4q3/3RK3 w - - 0 1");
        assert!(moves.contains(&"e1e2".to_string()));
        assert!(!moves.contains(&"d1d2".to_string()));
    }

    #[test]
    fn horizontally_pinned_en_passant_is_illegal() {
        // Taking on d6 would clear the fifth rank between the h5 rook and
        // the a5 king.
        let moves = legal("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 2");
        assert!(!moves.contains(&"e5d6".to_string()));
        assert!(moves.contains(&"e5e6".to_string()));
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        let mut mate =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(generate_legal_moves(&mut mate).unwrap().is_empty());
        assert!(mate.is_check().unwrap());

        let mut stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(generate_legal_moves(&mut stalemate).unwrap().is_empty());
        assert!(!stalemate.is_check().unwrap());
    }

    #[test]
    fn filtering_restores_the_board() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        let before = position.clone();
        generate_legal_moves(&mut position).unwrap();
        assert_eq!(position, before);
        assert_eq!(position.setup().to_fen(), fen);
    }

    #[test]
    fn en_passant_simulation_restores_victim() {
        let fen = "4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 2";
        let mut position = Position::from_fen(fen).unwrap();
        let m = Move::from_uci("e5d6", Color::White).unwrap();
        assert_eq!(is_legal(&mut position, m), Ok(false));
        assert_eq!(position.setup().to_fen(), fen);
    }

    #[test]
    fn missing_king_is_an_error_and_board_is_restored() {
        let fen = "4k3/8/8/8/8/8/4P3/8 w - - 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        assert_eq!(
            generate_legal_moves(&mut position),
            Err(EngineError::MissingKing(Color::White))
        );
        assert_eq!(position.setup().to_fen(), fen);
    }
}
