//! Attack, check and legality queries on a `Position`.
//!
//! The cached check info of the top state (checkers, pinned pieces, hidden
//! checkers and per-piece checking squares) is computed here after every
//! make/unmake of a move or null move, and read back by the generator and by
//! `gives_check`.

use crate::bitboard::bitboard::BitBoard;
use crate::bitboard::geometry::{are_squares_aligned, line_through, squares_between};
use crate::game_state::chess_rules::{castling_squares, CastlingSquares};
use crate::game_state::chess_types::{Color, Piece, PieceKind, Rank, Square};
use crate::game_state::position::Position;
use crate::moves::bishop_moves::{bishop_attacks, bishop_pseudo_attacks};
use crate::moves::chess_move::{Move, MoveFlag, PromotionKind};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::{rook_attacks, rook_pseudo_attacks};

/// Attack set of a piece kind standing on `square` for the given occupancy.
#[inline]
pub fn piece_attacks(color: Color, kind: PieceKind, square: Square, occupancy: BitBoard) -> BitBoard {
    match kind {
        PieceKind::King => king_attacks(square),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Pawn => pawn_attacks(color, square),
    }
}

impl Position {
    /// Pieces of both colors attacking `square` when the board occupancy is
    /// `occupancy`. Piece locations still come from the real board, so callers
    /// probing a hypothetical occupancy mask out vacated attackers themselves.
    pub fn attackers_to(&self, square: Square, occupancy: BitBoard) -> BitBoard {
        (pawn_attacks(Color::White, square) & self.bitboard_of(Piece::BlackPawn))
            | (pawn_attacks(Color::Black, square) & self.bitboard_of(Piece::WhitePawn))
            | (knight_attacks(square)
                & (self.bitboard_of(Piece::WhiteKnight) | self.bitboard_of(Piece::BlackKnight)))
            | (king_attacks(square)
                & (self.bitboard_of(Piece::WhiteKing) | self.bitboard_of(Piece::BlackKing)))
            | (rook_attacks(square, occupancy)
                & (self.rook_sliders(Color::White) | self.rook_sliders(Color::Black)))
            | (bishop_attacks(square, occupancy)
                & (self.bishop_sliders(Color::White) | self.bishop_sliders(Color::Black)))
    }

    /// True when any piece of `by` attacks `square`.
    #[inline]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        (self.attackers_to(square, self.occupancy()) & self.bitboard_for(by)).is_not_empty()
    }

    /// Recompute the check info of the top state for its side to move.
    pub(crate) fn refresh_check_info(&mut self) {
        let us = self.side_to_move();
        let them = us.opposite();
        let occupancy = self.occupancy();
        let our_king = self.king_square(us);
        let their_king = self.king_square(them);

        let checkers = self.attackers_to(our_king, occupancy) & self.bitboard_for(them);
        let pinned = self.blockers_for(our_king, them, us);
        let hidden_checkers = self.blockers_for(their_king, us, us);

        let mut checking_squares = [BitBoard::EMPTY; Piece::SLOTS];
        let rook_lines = rook_attacks(their_king, occupancy);
        let bishop_lines = bishop_attacks(their_king, occupancy);
        checking_squares[Piece::new(us, PieceKind::Queen).index()] = rook_lines | bishop_lines;
        checking_squares[Piece::new(us, PieceKind::Rook).index()] = rook_lines;
        checking_squares[Piece::new(us, PieceKind::Bishop).index()] = bishop_lines;
        checking_squares[Piece::new(us, PieceKind::Knight).index()] = knight_attacks(their_king);
        checking_squares[Piece::new(us, PieceKind::Pawn).index()] = pawn_attacks(them, their_king);

        let state = self.state_mut();
        state.checkers = checkers;
        state.pinned = pinned;
        state.hidden_checkers = hidden_checkers;
        state.checking_squares = checking_squares;
    }

    /// Pieces of `keep` that are the only blocker between `king` and a slider
    /// of `slider_color` aligned with it.
    fn blockers_for(&self, king: Square, slider_color: Color, keep: Color) -> BitBoard {
        let occupancy = self.occupancy();
        let snipers = (rook_pseudo_attacks(king) & self.rook_sliders(slider_color))
            | (bishop_pseudo_attacks(king) & self.bishop_sliders(slider_color));

        let mut result = BitBoard::EMPTY;
        for sniper in snipers {
            let between = squares_between(king, sniper) & occupancy;
            if !between.more_than_one_bit() {
                result |= between & self.bitboard_for(keep);
            }
        }
        result
    }

    // ------------------------------------------------------------------
    // Move classification
    // ------------------------------------------------------------------

    #[inline]
    pub fn moved_piece(&self, mv: Move) -> Piece {
        self.piece_on(mv.from())
    }

    /// True for en passant and for any move landing on an enemy piece.
    #[inline]
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant_move()
            || (!mv.is_castle_move() && self.their_pieces().is_set(mv.to()))
    }

    #[inline]
    pub fn is_capture_or_promotion(&self, mv: Move) -> bool {
        mv.is_promotion_move() || self.is_capture(mv)
    }

    /// Piece removed by `mv`, `Piece::Empty` for non-captures.
    #[inline]
    pub fn captured_piece(&self, mv: Move) -> Piece {
        if mv.is_en_passant_move() {
            Piece::new(self.side_to_move().opposite(), PieceKind::Pawn)
        } else if mv.is_castle_move() {
            Piece::Empty
        } else {
            self.piece_on(mv.to())
        }
    }

    /// Does the legal move `mv` give check to the opponent?
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let from = mv.from();
        let to = mv.to();
        let piece = self.moved_piece(mv);
        let their_king = self.king_square(us.opposite());
        let state = self.state();

        if state.checking_squares[piece.index()].is_set(to) {
            return true;
        }

        if state.hidden_checkers.is_set(from) && !are_squares_aligned(from, to, their_king) {
            return true;
        }

        match mv.flag() {
            MoveFlag::Normal => false,
            MoveFlag::Promotion => {
                let occupancy = self.occupancy().without(from);
                piece_attacks(us, mv.promotion_kind().piece_kind(), to, occupancy)
                    .is_set(their_king)
            }
            MoveFlag::EnPassant => {
                let captured = to.offset(-us.pawn_push());
                let occupancy = self.occupancy().without(from).without(captured).with(to);
                ((rook_attacks(their_king, occupancy) & self.rook_sliders(us))
                    | (bishop_attacks(their_king, occupancy) & self.bishop_sliders(us)))
                .is_not_empty()
            }
            MoveFlag::Castle => {
                let squares = castling_for_move(us, mv);
                let occupancy = self
                    .occupancy()
                    .without(squares.king_from)
                    .without(squares.rook_from)
                    .with(squares.king_to)
                    .with(squares.rook_to);
                rook_attacks(squares.rook_to, occupancy).is_set(their_king)
            }
        }
    }

    // ------------------------------------------------------------------
    // Legality
    // ------------------------------------------------------------------

    /// Would the king of the side to move be safe on `to` after leaving its
    /// current square?
    #[inline]
    pub(crate) fn is_king_destination_safe(&self, to: Square) -> bool {
        let us = self.side_to_move();
        let occupancy = self.occupancy().without(self.king_square(us));
        (self.attackers_to(to, occupancy) & self.their_pieces()).is_empty()
    }

    /// Pin test for a non-king move of the side to move.
    #[inline]
    pub(crate) fn keeps_pin_line(&self, from: Square, to: Square) -> bool {
        !self.pinned().is_set(from)
            || line_through(from, self.king_square(self.side_to_move())).is_set(to)
    }

    /// King safety after an en-passant capture `from` -> `to`. Two squares
    /// empty at once, so this is decided on the resulting occupancy rather
    /// than by the pin test.
    pub(crate) fn is_en_passant_safe(&self, from: Square, to: Square) -> bool {
        let us = self.side_to_move();
        let captured = to.offset(-us.pawn_push());
        let occupancy = self.occupancy().without(from).without(captured).with(to);
        let attackers = self.attackers_to(self.king_square(us), occupancy)
            & self.their_pieces()
            & !BitBoard::from_square(captured);
        attackers.is_empty()
    }

    /// All castling conditions for one side of the board.
    pub(crate) fn can_castle(&self, king_side: bool) -> bool {
        let us = self.side_to_move();
        let squares = castling_squares(us, king_side);
        if !self.castling_rights().contains(squares.right) || self.is_in_check() {
            return false;
        }
        if self.piece_on(squares.king_from) != Piece::new(us, PieceKind::King)
            || self.piece_on(squares.rook_from) != Piece::new(us, PieceKind::Rook)
        {
            return false;
        }
        let occupancy = self.occupancy();
        if (squares_between(squares.king_from, squares.rook_from) & occupancy).is_not_empty() {
            return false;
        }

        let without_rook = occupancy.without(squares.rook_from);
        let path = squares_between(squares.king_from, squares.king_to).with(squares.king_to);
        path.iter().all(|square| {
            (self.attackers_to(square, without_rook) & self.their_pieces()).is_empty()
        })
    }

    /// Independent legality predicate for an arbitrary packed move.
    pub fn is_move_legal(&self, mv: Move) -> bool {
        if mv.is_none() {
            return false;
        }
        let us = self.side_to_move();
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        if from == to {
            return false;
        }
        if !mv.is_promotion_move() && mv.promotion_kind() != PromotionKind::Queen {
            return false;
        }

        let piece = self.piece_on(from);
        if !piece.is_real() || piece.color() != us {
            return false;
        }
        let target = self.piece_on(to);
        if target.is_real() && (target.color() == us || target.is_king()) {
            return false;
        }

        match mv.flag() {
            MoveFlag::Castle => {
                if !piece.is_king() {
                    return false;
                }
                return [true, false].into_iter().any(|king_side| {
                    let squares = castling_squares(us, king_side);
                    squares.king_from == from && squares.king_to == to && self.can_castle(king_side)
                });
            }
            MoveFlag::EnPassant => {
                return piece.is_pawn()
                    && self.en_passant_square() == Some(to)
                    && pawn_attacks(us, from).is_set(to)
                    && self.piece_on(to.offset(-us.pawn_push())) == Piece::new(them, PieceKind::Pawn)
                    && self.is_en_passant_safe(from, to);
            }
            MoveFlag::Promotion => {
                if !piece.is_pawn() || to.relative_rank(us) != Rank::R8 {
                    return false;
                }
                if !self.is_pawn_step_possible(from, to) {
                    return false;
                }
            }
            MoveFlag::Normal => {
                if piece.is_pawn() {
                    if to.relative_rank(us) == Rank::R8 || !self.is_pawn_step_possible(from, to) {
                        return false;
                    }
                } else if !piece_attacks(us, piece.kind(), from, self.occupancy()).is_set(to) {
                    return false;
                }
            }
        }

        if piece.is_king() {
            return self.is_king_destination_safe(to);
        }

        let checkers = self.checkers();
        if checkers.more_than_one_bit() {
            return false;
        }
        if let Some(checker) = checkers.iter().next() {
            let king = self.king_square(us);
            if to != checker && !squares_between(king, checker).is_set(to) {
                return false;
            }
        }
        self.keeps_pin_line(from, to)
    }

    /// Pawn push or capture geometry, ignoring promotion and king safety.
    fn is_pawn_step_possible(&self, from: Square, to: Square) -> bool {
        let us = self.side_to_move();
        let occupancy = self.occupancy();
        if pawn_attacks(us, from).is_set(to) {
            return self.their_pieces().is_set(to);
        }
        if occupancy.is_set(to) || from.file() != to.file() {
            return false;
        }
        let push = us.pawn_push() as i32;
        let delta = to.index() as i32 - from.index() as i32;
        if delta == push {
            return true;
        }
        delta == 2 * push
            && from.relative_rank(us) == Rank::R2
            && !occupancy.is_set(from.offset(us.pawn_push()))
    }
}

/// Castling geometry of a castle-flagged move by `color`.
#[inline]
pub(crate) fn castling_for_move(color: Color, mv: Move) -> CastlingSquares {
    castling_squares(color, mv.to().file() > mv.from().file())
}

#[cfg(test)]
mod tests {
    use crate::bitboard::bitboard::BitBoard;
    use crate::game_state::chess_types::{Piece, Square};
    use crate::game_state::position::Position;
    use crate::moves::chess_move::{Move, PromotionKind};

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn attackers_include_both_colors() {
        let pos = position("4k3/8/8/3p4/4N3/8/8/4K2R w - - 0 1");
        let attackers = pos.attackers_to(Square::D5, pos.occupancy());
        assert!(!attackers.is_set(Square::E4));
        let on_f6 = pos.attackers_to(Square::F6, pos.occupancy());
        assert!(on_f6.is_set(Square::E4));
        let on_e4 = pos.attackers_to(Square::E4, pos.occupancy());
        assert!(on_e4.is_set(Square::D5));
        assert!(pos.is_square_attacked(Square::H8, crate::game_state::chess_types::Color::White));
    }

    #[test]
    fn pinned_and_hidden_checkers_are_our_pieces() {
        // White knight on e2 is pinned by the e8 rook; the white knight on h4
        // hides the h1 rook's file towards the black king on h8.
        let pos = position("4r2k/8/8/8/7N/8/4N3/4K2R w - - 0 1");
        assert_eq!(pos.pinned(), BitBoard::from_square(Square::E2));
        assert_eq!(pos.hidden_checkers(), BitBoard::from_square(Square::H4));
        assert!(pos.checkers().is_empty());
    }

    #[test]
    fn checkers_are_found_for_the_side_to_move() {
        let pos = position("4k3/8/8/8/8/5n2/8/4K2r w - - 0 1");
        assert_eq!(
            pos.checkers(),
            BitBoard::from_square(Square::F3).with(Square::H1)
        );
        assert!(pos.is_in_check());
    }

    #[test]
    fn classification_of_special_moves() {
        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let ep = Move::en_passant(Square::E5, Square::D6);
        assert!(pos.is_capture(ep));
        assert_eq!(pos.captured_piece(ep), Piece::BlackPawn);
        assert_eq!(pos.moved_piece(ep), Piece::WhitePawn);
        let push = Move::normal(Square::E5, Square::E6);
        assert!(!pos.is_capture_or_promotion(push));

        let promo = position("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let mv = Move::promotion(Square::B7, Square::B8, PromotionKind::Knight);
        assert!(promo.is_capture_or_promotion(mv));
        assert!(!promo.is_capture(mv));
    }

    #[test]
    fn direct_and_discovered_checks() {
        let pos = position("4k3/8/8/8/8/8/4B3/4R1K1 w - - 0 1");
        // Bishop steps off the e-file: discovered check from the rook.
        assert!(pos.gives_check(Move::normal(Square::E2, Square::D3)));
        // Bishop check on the diagonal.
        let pos = position("4k3/8/8/8/8/8/8/3B2K1 w - - 0 1");
        assert!(pos.gives_check(Move::normal(Square::D1, Square::A4)));
        assert!(pos.gives_check(Move::normal(Square::D1, Square::H5)));
        assert!(!pos.gives_check(Move::normal(Square::D1, Square::E2)));
    }

    #[test]
    fn promotion_and_castling_checks() {
        let pos = position("k7/2P5/8/8/8/8/8/6K1 w - - 0 1");
        assert!(pos.gives_check(Move::promotion(Square::C7, Square::C8, PromotionKind::Queen)));
        assert!(pos.gives_check(Move::promotion(Square::C7, Square::C8, PromotionKind::Rook)));
        assert!(!pos.gives_check(Move::promotion(Square::C7, Square::C8, PromotionKind::Bishop)));

        let pos = position("5k2/8/8/8/8/8/8/4K2R w K - 0 1");
        assert!(pos.gives_check(Move::castle(Square::E1, Square::G1)));
    }

    #[test]
    fn en_passant_discovering_the_rank_is_illegal() {
        let pos = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(!pos.is_move_legal(Move::en_passant(Square::E5, Square::D6)));
        let pos = position("8/8/8/K2pP3/8/8/8/7k w - d6 0 1");
        assert!(pos.is_move_legal(Move::en_passant(Square::E5, Square::D6)));
    }

    #[test]
    fn castling_through_attack_is_illegal() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(pos.is_move_legal(Move::castle(Square::E1, Square::G1)));
        assert!(pos.is_move_legal(Move::castle(Square::E1, Square::C1)));

        let pos = position("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1");
        assert!(!pos.is_in_check());
        assert!(!pos.is_move_legal(Move::castle(Square::E1, Square::G1)));
        assert!(pos.is_move_legal(Move::castle(Square::E1, Square::C1)));

        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
        assert!(!pos.is_move_legal(Move::castle(Square::E1, Square::G1)));

        // Queen-side castling only needs d1/c1 safe, b1 may be attacked.
        let pos = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(pos.is_move_legal(Move::castle(Square::E1, Square::C1)));
    }

    #[test]
    fn malformed_packed_moves_are_rejected() {
        let pos = Position::new_game();
        assert!(!pos.is_move_legal(Move::NONE));
        assert!(pos.is_move_legal(Move::normal(Square::E2, Square::E4)));
        assert!(!pos.is_move_legal(Move::normal(Square::E2, Square::E5)));
        assert!(!pos.is_move_legal(Move::new(
            Square::E2,
            Square::E4,
            crate::moves::chess_move::MoveFlag::Normal,
            PromotionKind::Rook
        )));
        assert!(!pos.is_move_legal(Move::normal(Square::E7, Square::E5)));
        assert!(!pos.is_move_legal(Move::normal(Square::F1, Square::C4)));
        assert!(pos.is_move_legal(Move::normal(Square::G1, Square::F3)));
    }
}
