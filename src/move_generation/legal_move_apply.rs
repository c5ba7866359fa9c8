//! Make/unmake of moves and null moves on a `Position`.
//!
//! `make_move` pushes a copy of the top state and edits the copy; board
//! placement changes go through the position's add/remove/move mutators and
//! are mirrored into the hash keys as they happen. `unmake_move` pops the
//! state and replays the same placement changes backwards.

use crate::game_state::chess_rules::{piece_value, CASTLING_RIGHTS_MASK};
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::game_state::position::{signed_piece_value, Position};
use crate::move_generation::legal_move_checks::castling_for_move;
use crate::moves::chess_move::Move;
use crate::moves::pawn_moves::pawn_attacks;

impl Position {
    /// Play the legal move `mv` for the side to move.
    pub fn make_move(&mut self, mv: Move) {
        debug_assert!(!mv.is_none(), "make_move called with the null move");

        let us = self.side_to_move();
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let piece = self.piece_on(from);
        let captured = self.captured_piece(mv);
        debug_assert!(piece.is_real() && piece.color() == us);
        debug_assert!(!captured.is_king());

        let mut next = self.state().clone();
        next.current_move = mv;
        next.captured_piece = Piece::Empty;
        next.ply += 1;
        next.fifty_move_counter += 1;
        next.plies_from_null += 1;

        let mut key = next.key;
        if let Some(ep) = next.en_passant_square.take() {
            key.remove_en_passant(ep);
        }

        if mv.is_castle_move() {
            let squares = castling_for_move(us, mv);
            let rook = Piece::new(us, PieceKind::Rook);
            self.move_piece(piece, squares.king_from, squares.king_to);
            self.move_piece(rook, squares.rook_from, squares.rook_to);
            key.move_piece(piece, squares.king_from, squares.king_to)
                .move_piece(rook, squares.rook_from, squares.rook_to);
        } else {
            if captured.is_real() {
                let captured_square = if mv.is_en_passant_move() {
                    to.offset(-us.pawn_push())
                } else {
                    to
                };
                self.remove_piece(captured, captured_square);
                key.remove_piece(captured, captured_square);
                if captured.is_pawn() {
                    next.pawn_key.remove_piece(captured, captured_square);
                } else {
                    next.non_pawn_material[them.index()] -= piece_value(captured.kind());
                }
                // The removed piece was the last of its kind in count order.
                next.material_key
                    .remove_piece(captured, Square::new(self.piece_count(captured) as u8));
                next.material -= signed_piece_value(captured);
                next.captured_piece = captured;
                next.fifty_move_counter = 0;
            }

            self.move_piece(piece, from, to);
            key.move_piece(piece, from, to);

            if piece.is_pawn() {
                next.fifty_move_counter = 0;
                next.pawn_key.move_piece(piece, from, to);

                if mv.is_promotion_move() {
                    let promoted = Piece::new(us, mv.promotion_kind().piece_kind());
                    self.remove_piece(piece, to);
                    key.remove_piece(piece, to);
                    next.pawn_key.remove_piece(piece, to);
                    next.material_key
                        .remove_piece(piece, Square::new(self.piece_count(piece) as u8));

                    self.add_piece(promoted, to);
                    key.add_piece(promoted, to);
                    next.material_key
                        .add_piece(promoted, Square::new(self.piece_count(promoted) as u8 - 1));

                    next.material += signed_piece_value(promoted) - signed_piece_value(piece);
                    next.non_pawn_material[us.index()] += piece_value(promoted.kind());
                } else if from.index().abs_diff(to.index()) == 16 {
                    let ep = from.offset(us.pawn_push());
                    let their_pawns = self.pieces_of(them, PieceKind::Pawn);
                    if (pawn_attacks(us, ep) & their_pawns).is_not_empty() {
                        next.en_passant_square = Some(ep);
                        key.add_en_passant(ep);
                    }
                }
            }
        }

        let lost = next.castling_rights.intersection(
            CASTLING_RIGHTS_MASK[from.index()].union(CASTLING_RIGHTS_MASK[to.index()]),
        );
        if !lost.is_empty() {
            key.change_castling_rights(lost);
            next.castling_rights = next.castling_rights.without(lost);
        }

        key.change_side();
        next.key = key;
        next.turn = them;

        self.push_state(next);
        self.refresh_check_info();
    }

    /// Take back the last move made with `make_move`.
    pub fn unmake_move(&mut self) {
        let undone = self.pop_state();
        let mv = undone.current_move;
        debug_assert!(!mv.is_none(), "unmake_move after a null move");

        let us = self.side_to_move();
        let from = mv.from();
        let to = mv.to();

        if mv.is_castle_move() {
            let squares = castling_for_move(us, mv);
            let king = Piece::new(us, PieceKind::King);
            let rook = Piece::new(us, PieceKind::Rook);
            self.move_piece(rook, squares.rook_to, squares.rook_from);
            self.move_piece(king, squares.king_to, squares.king_from);
            return;
        }

        if mv.is_promotion_move() {
            let promoted = self.piece_on(to);
            self.remove_piece(promoted, to);
            self.add_piece(Piece::new(us, PieceKind::Pawn), to);
        }

        let piece = self.piece_on(to);
        self.move_piece(piece, to, from);

        let captured = undone.captured_piece;
        if captured.is_real() {
            let captured_square = if mv.is_en_passant_move() {
                to.offset(-us.pawn_push())
            } else {
                to
            };
            self.add_piece(captured, captured_square);
        }
    }

    /// Pass the turn. Not allowed while in check.
    pub fn make_null_move(&mut self) {
        debug_assert!(!self.is_in_check(), "null move while in check");

        let mut next = self.state().clone();
        next.current_move = Move::NONE;
        next.captured_piece = Piece::Empty;
        next.ply += 1;
        next.fifty_move_counter += 1;
        next.plies_from_null = 0;
        if let Some(ep) = next.en_passant_square.take() {
            next.key.remove_en_passant(ep);
        }
        next.key.change_side();
        next.turn = next.turn.opposite();

        log::trace!("null move at ply {}", next.ply);
        self.push_state(next);
        self.refresh_check_info();
    }

    pub fn unmake_null_move(&mut self) {
        let undone = self.pop_state();
        debug_assert!(undone.current_move.is_none(), "unmake_null_move after a real move");
        log::trace!("null move undone at ply {}", undone.ply);
    }
}
