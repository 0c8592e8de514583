//! Chess position representation and move application.

use chess_core::{
    CastlingRights, CastlingSide, Color, Move, Piece, PieceCode, Setup, Square,
};
use std::fmt;

use crate::movegen::{self, MoveList};
use crate::{eval, EngineError};

/// Complete chess position state.
///
/// A `Position` owns a mailbox board of 64 [`PieceCode`]s plus the side to
/// move, castling rights, en passant target and move counters. It also caches
/// its own FEN, regenerated after every applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    setup: Setup,
    fen: String,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_setup(Setup::startpos())
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        Ok(Self::from_setup(Setup::from_fen(fen)?))
    }

    /// Wraps already parsed position data.
    pub fn from_setup(setup: Setup) -> Self {
        let fen = setup.to_fen();
        Position { setup, fen }
    }

    /// Returns the cached FEN of the current position.
    #[inline]
    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// Returns the raw position data.
    #[inline]
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Returns the content of a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> PieceCode {
        self.setup.piece_at(sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.setup.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.setup.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.setup.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.setup.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.setup.fullmove_number
    }

    /// Overwrites a square without touching the cached FEN.
    ///
    /// Only the legality filter uses this, and it restores every square it
    /// touches before returning.
    #[inline]
    pub(crate) fn place(&mut self, sq: Square, code: PieceCode) {
        self.setup.set(sq, code);
    }

    /// Locates the king of the given color.
    pub fn king_square(&self, color: Color) -> Result<Square, EngineError> {
        Square::ALL
            .into_iter()
            .find(|&sq| self.piece_at(sq).is(Piece::King, color))
            .ok_or(EngineError::MissingKing(color))
    }

    /// Returns true if the side to move's king is attacked.
    pub fn is_check(&self) -> Result<bool, EngineError> {
        let us = self.side_to_move();
        let king = self.king_square(us)?;
        Ok(movegen::is_attacked(self, king, us))
    }

    /// Returns true if `sq` is attacked by the opponent of `defender`.
    #[inline]
    pub fn is_attacked(&self, sq: Square, defender: Color) -> bool {
        movegen::is_attacked(self, sq, defender)
    }

    /// Returns all legal moves for the side to move.
    ///
    /// The board is temporarily modified while each candidate is tested and
    /// is restored before this returns, on success and on error.
    pub fn legal_moves(&mut self) -> Result<MoveList, EngineError> {
        movegen::generate_legal_moves(self)
    }

    /// Resolves a UCI move string against the legal moves, returning the
    /// matching move if it is legal.
    pub fn find_legal_move(&mut self, uci: &str) -> Result<Option<Move>, EngineError> {
        let Some(m) = Move::from_uci(uci, self.side_to_move()) else {
            return Ok(None);
        };
        let legal = self.legal_moves()?;
        Ok(legal.contains(&m).then_some(m))
    }

    /// Static evaluation in centipawns, positive favouring White.
    pub fn evaluate(&self) -> i32 {
        eval::evaluate(self)
    }

    /// Applies a move in place.
    ///
    /// The move is trusted to be pseudo-legal; only the promotion is checked,
    /// and that check runs before the board changes, so a rejected move leaves
    /// the position untouched.
    pub fn apply_move(&mut self, m: Move) -> Result<(), EngineError> {
        let us = self.side_to_move();
        let them = us.opposite();
        let from = m.from();
        let to = m.to();

        let moving = self.piece_at(from);
        let piece = moving.piece().ok_or(EngineError::EmptySquare(from))?;
        let captured = self.piece_at(to);
        let en_passant_before = self.setup.en_passant;

        if let Some(promotion) = m.promotion() {
            check_promotion(m, piece, promotion, us)?;
        }

        // Relocate, then promote.
        self.setup.set(to, m.promotion().unwrap_or(moving));
        self.setup.set(from, PieceCode::EMPTY);

        // Castling moves the rook as well.
        if piece == Piece::King && from == CastlingSide::king_origin(us) {
            if let Some(side) = CastlingSide::ALL
                .into_iter()
                .find(|side| side.king_target(us) == to)
            {
                let rook_from = side.rook_origin(us);
                let rook = self.piece_at(rook_from);
                self.setup.set(side.rook_target(us), rook);
                self.setup.set(rook_from, PieceCode::EMPTY);
            }
        }

        let mut is_capture = !captured.is_empty();

        // En passant removes the pawn that passed over the target square.
        if piece == Piece::Pawn && Some(to) == en_passant_before {
            if let Some(victim) = to.offset(0, -us.pawn_direction()) {
                if self.piece_at(victim).is(Piece::Pawn, them) {
                    self.setup.set(victim, PieceCode::EMPTY);
                    is_capture = true;
                }
            }
        }

        let castling = &mut self.setup.castling;
        if piece == Piece::King {
            castling.remove_color(us);
        }
        if piece == Piece::Rook {
            if let Some(side) = CastlingSide::from_rook_origin(from, us) {
                castling.remove(us, side);
            }
        }
        if captured.is(Piece::Rook, them) {
            if let Some(side) = CastlingSide::from_rook_origin(to, them) {
                castling.remove(them, side);
            }
        }

        if us == Color::Black {
            self.setup.fullmove_number = self.setup.fullmove_number.saturating_add(1);
        }
        if piece == Piece::Pawn || is_capture {
            self.setup.halfmove_clock = 0;
        } else {
            self.setup.halfmove_clock = self.setup.halfmove_clock.saturating_add(1);
        }

        let rank_distance = to.rank().index().abs_diff(from.rank().index());
        self.setup.en_passant = if piece == Piece::Pawn && rank_distance == 2 {
            from.offset(0, us.pawn_direction())
        } else {
            None
        };

        self.setup.side_to_move = them;
        self.fen = self.setup.to_fen();

        tracing::debug!(mv = %m, fen = %self.fen, "applied move");
        Ok(())
    }
}

fn check_promotion(
    m: Move,
    piece: Piece,
    promotion: PieceCode,
    us: Color,
) -> Result<(), EngineError> {
    let reason = if piece != Piece::Pawn {
        "only pawns promote"
    } else if m.to().rank() != us.promotion_rank() {
        "promotion must land on the last rank"
    } else if !promotion.is_color(us) {
        "promotion piece has the wrong color"
    } else if !matches!(
        promotion.piece(),
        Some(Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)
    ) {
        "pawns promote to queen, rook, bishop or knight"
    } else {
        return Ok(());
    };
    Err(EngineError::IllegalPromotion { mv: m, reason })
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen)
    }
}

impl std::str::FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl From<Setup> for Position {
    fn from(setup: Setup) -> Self {
        Self::from_setup(setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::STARTPOS;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn mv(s: &str, pos: &Position) -> Move {
        Move::from_uci(s, pos.side_to_move()).unwrap()
    }

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.fen(), STARTPOS);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.fen(), fen);
        assert_eq!(pos.to_string(), fen);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            Position::from_fen("8/8/8 w - - 0 1"),
            Err(EngineError::MalformedFen(_))
        ));
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(pos.piece_at(Square::E1), PieceCode::new(Piece::King, Color::White));
        assert_eq!(pos.piece_at(Square::E8), PieceCode::new(Piece::King, Color::Black));
        assert!(pos.piece_at(sq("e4")).is_empty());
    }

    #[test]
    fn king_square() {
        let pos = Position::startpos();
        assert_eq!(pos.king_square(Color::White), Ok(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Ok(Square::E8));

        let kingless = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            kingless.king_square(Color::Black),
            Err(EngineError::MissingKing(Color::Black))
        );
    }

    #[test]
    fn double_push_sets_en_passant() {
        let mut pos = Position::startpos();
        pos.apply_move(mv("e2e4", &pos)).unwrap();
        assert_eq!(pos.en_passant(), Some(sq("e3")));
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(
            pos.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );

        pos.apply_move(mv("c7c5", &pos)).unwrap();
        assert_eq!(pos.en_passant(), Some(sq("c6")));
        assert_eq!(pos.fullmove_number(), 2);

        pos.apply_move(mv("g1f3", &pos)).unwrap();
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 1);
    }

    #[test]
    fn en_passant_capture_removes_pawn() {
        let mut pos =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        pos.apply_move(mv("e5f6", &pos)).unwrap();
        assert!(pos.piece_at(sq("f5")).is_empty());
        assert!(pos.piece_at(sq("e5")).is_empty());
        assert_eq!(pos.piece_at(sq("f6")), PieceCode::new(Piece::Pawn, Color::White));
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 0);
    }

    #[test]
    fn castling_moves_rook() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
        pos.apply_move(Move::new(Square::E1, Square::G1)).unwrap();
        assert_eq!(pos.piece_at(Square::F1), PieceCode::new(Piece::Rook, Color::White));
        assert!(pos.piece_at(Square::H1).is_empty());
        assert_eq!(pos.castling().to_string(), "kq");
        assert_eq!(pos.halfmove_clock(), 4);

        pos.apply_move(Move::new(Square::E8, Square::C8)).unwrap();
        assert_eq!(pos.piece_at(Square::D8), PieceCode::new(Piece::Rook, Color::Black));
        assert!(pos.piece_at(Square::A8).is_empty());
        assert_eq!(pos.castling(), CastlingRights::NONE);
        assert_eq!(pos.fen(), "2kr3r/8/8/8/8/8/8/R4RK1 w - - 5 11");
    }

    #[test]
    fn king_move_clears_both_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        pos.apply_move(Move::new(Square::E1, sq("e2"))).unwrap();
        assert_eq!(pos.castling().to_string(), "kq");
    }

    #[test]
    fn rook_move_clears_one_right() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        pos.apply_move(Move::new(Square::A1, sq("a4"))).unwrap();
        assert_eq!(pos.castling().to_string(), "Kkq");
    }

    #[test]
    fn rook_capture_clears_opponent_right() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        pos.apply_move(Move::new(Square::H1, Square::H8)).unwrap();
        assert_eq!(pos.castling().to_string(), "Qq");
        assert_eq!(pos.halfmove_clock(), 0);
    }

    #[test]
    fn rights_collapse_to_marker() {
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        pos.apply_move(Move::new(Square::H1, sq("h2"))).unwrap();
        assert_eq!(pos.fen(), "4k3/8/8/8/8/8/7R/4K3 b - - 1 1");
    }

    #[test]
    fn promotion_replaces_pawn() {
        let mut pos = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 0").unwrap();
        let m = Move::with_promotion(sq("a7"), Square::A8, PieceCode::new(Piece::Knight, Color::White));
        pos.apply_move(m).unwrap();
        assert_eq!(pos.piece_at(Square::A8), PieceCode::new(Piece::Knight, Color::White));
        assert_eq!(pos.fen(), "N7/8/8/8/8/8/8/k6K b - - 0 0");
    }

    #[test]
    fn promotion_by_non_pawn_is_rejected() {
        let mut pos = Position::from_fen("8/R7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let before = pos.clone();
        let m = Move::with_promotion(sq("a7"), Square::A8, PieceCode::new(Piece::Queen, Color::White));
        assert!(matches!(
            pos.apply_move(m),
            Err(EngineError::IllegalPromotion { .. })
        ));
        assert_eq!(pos, before);
    }

    #[test]
    fn promotion_off_last_rank_is_rejected() {
        let mut pos = Position::from_fen("8/8/P7/8/8/8/8/k6K w - - 0 1").unwrap();
        let m = Move::with_promotion(sq("a6"), sq("a7"), PieceCode::new(Piece::Queen, Color::White));
        assert!(matches!(
            pos.apply_move(m),
            Err(EngineError::IllegalPromotion { .. })
        ));
    }

    #[test]
    fn promotion_to_enemy_color_is_rejected() {
        let mut pos = Position::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let m = Move::with_promotion(sq("a7"), Square::A8, PieceCode::new(Piece::Queen, Color::Black));
        assert!(matches!(
            pos.apply_move(m),
            Err(EngineError::IllegalPromotion { .. })
        ));
    }

    #[test]
    fn move_from_empty_square_is_rejected() {
        let mut pos = Position::startpos();
        assert_eq!(
            pos.apply_move(Move::new(sq("e4"), sq("e5"))),
            Err(EngineError::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn find_legal_move() {
        let mut pos = Position::startpos();
        assert_eq!(
            pos.find_legal_move("e2e4").unwrap(),
            Some(Move::new(sq("e2"), sq("e4")))
        );
        assert_eq!(pos.find_legal_move("e2e5").unwrap(), None);
        assert_eq!(pos.find_legal_move("nonsense").unwrap(), None);
    }

    #[test]
    fn is_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4KR1r w - - 0 1").unwrap();
        assert!(!pos.is_check().unwrap());
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(pos.is_check().unwrap());
    }
}
