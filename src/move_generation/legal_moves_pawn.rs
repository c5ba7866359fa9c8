//! Pawn generation works set-wise: all pawns of one class are shifted at once
//! and each destination is mapped back to its origin by the shift delta.

use crate::bitboard::bitboard::BitBoard;
use crate::bitboard::geometry::rank_mask;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::Targets;
use crate::move_generation::move_generator::MoveList;
use crate::moves::chess_move::{Move, PromotionKind};
use crate::moves::pawn_moves::pawn_attacks;

pub(crate) fn generate_pawn_moves(position: &Position, targets: &Targets, out: &mut MoveList) {
    let us = position.side_to_move();
    let pawns = position.pieces_of(us, PieceKind::Pawn);
    if pawns.is_empty() {
        return;
    }

    let push = i32::from(us.pawn_push());
    let capture_west = push - 1;
    let capture_east = push + 1;
    let empty = !position.occupancy();
    let theirs = position.their_pieces();

    let seventh = rank_mask(Square::A7.relative_to(us));
    let third = rank_mask(Square::A3.relative_to(us));
    let promoting = pawns & seventh;
    let others = pawns & !seventh;

    // Promotions: pushes then both capture directions.
    if promoting.is_not_empty() {
        let pushes = promoting.shift(push) & empty & targets.promotion_pushes;
        push_promotions(position, pushes, push, out);

        let west = (promoting & !BitBoard::FILE_A).shift(capture_west) & theirs & targets.captures;
        push_promotions(position, west, capture_west, out);
        let east = (promoting & !BitBoard::FILE_H).shift(capture_east) & theirs & targets.captures;
        push_promotions(position, east, capture_east, out);
    }

    // Plain captures.
    let west = (others & !BitBoard::FILE_A).shift(capture_west) & theirs & targets.captures;
    push_pawn_steps(position, west, capture_west, out);
    let east = (others & !BitBoard::FILE_H).shift(capture_east) & theirs & targets.captures;
    push_pawn_steps(position, east, capture_east, out);

    if targets.en_passant {
        if let Some(ep) = position.en_passant_square() {
            for from in pawn_attacks(us.opposite(), ep) & others {
                if position.is_en_passant_safe(from, ep) {
                    out.push(Move::en_passant(from, ep));
                }
            }
        }
    }

    // Single and double pushes.
    let single = others.shift(push) & empty;
    let double = (single & third).shift(push) & empty;
    push_pawn_steps(position, single & targets.quiets, push, out);
    push_pawn_steps(position, double & targets.quiets, 2 * push, out);
}

fn origin(to: Square, delta: i32) -> Square {
    Square::new((to.index() as i32 - delta) as u8)
}

fn push_pawn_steps(position: &Position, destinations: BitBoard, delta: i32, out: &mut MoveList) {
    for to in destinations {
        let from = origin(to, delta);
        if position.keeps_pin_line(from, to) {
            out.push(Move::normal(from, to));
        }
    }
}

fn push_promotions(position: &Position, destinations: BitBoard, delta: i32, out: &mut MoveList) {
    for to in destinations {
        let from = origin(to, delta);
        if position.keeps_pin_line(from, to) {
            for kind in PromotionKind::ALL {
                out.push(Move::promotion(from, to, kind));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::Square;
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_shared::Targets;
    use crate::move_generation::move_generator::{GenerationMode, MoveList};
    use crate::moves::chess_move::{Move, PromotionKind};

    fn pawn_moves(fen: &str, mode: GenerationMode) -> MoveList {
        let pos = Position::from_fen(fen).expect("test FEN should parse");
        let mut out = MoveList::new();
        generate_pawn_moves(&pos, &Targets::for_mode(&pos, mode), &mut out);
        out
    }

    #[test]
    fn start_position_pushes() {
        let quiets = pawn_moves(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            GenerationMode::Quiets,
        );
        assert_eq!(quiets.len(), 16);
        assert!(quiets.contains(Move::normal(Square::E2, Square::E4)));

        let black = pawn_moves(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            GenerationMode::Quiets,
        );
        assert_eq!(black.len(), 16);
        assert!(black.contains(Move::normal(Square::D7, Square::D5)));
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        let quiets = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", GenerationMode::Quiets);
        assert!(quiets.is_empty());
        let captures = pawn_moves("4k3/8/8/8/8/3b4/4P3/4K3 w - - 0 1", GenerationMode::Captures);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].mv, Move::normal(Square::E2, Square::D3));
    }

    #[test]
    fn promotions_belong_to_captures_in_queen_first_order() {
        let fen = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let captures = pawn_moves(fen, GenerationMode::Captures);
        let got: Vec<Move> = captures.iter().collect();
        let mut expected: Vec<Move> = PromotionKind::ALL
            .iter()
            .map(|&kind| Move::promotion(Square::A7, Square::A8, kind))
            .collect();
        expected.extend(
            PromotionKind::ALL
                .iter()
                .map(|&kind| Move::promotion(Square::A7, Square::B8, kind)),
        );
        assert_eq!(got, expected);
        assert!(pawn_moves(fen, GenerationMode::Quiets).is_empty());
    }

    #[test]
    fn en_passant_from_both_sides() {
        let captures = pawn_moves("4k3/8/8/2PpP3/8/8/8/4K3 w - d6 0 1", GenerationMode::Captures);
        assert_eq!(captures.len(), 2);
        assert!(captures.contains(Move::en_passant(Square::C5, Square::D6)));
        assert!(captures.contains(Move::en_passant(Square::E5, Square::D6)));
    }

    #[test]
    fn en_passant_can_evade_a_pawn_check() {
        // The d5 pawn just arrived and checks the e4 king.
        let evasions = pawn_moves(
            "4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1",
            GenerationMode::CaptureEvasions,
        );
        assert_eq!(evasions.len(), 1);
        assert_eq!(evasions[0].mv, Move::en_passant(Square::E5, Square::D6));
    }
}
