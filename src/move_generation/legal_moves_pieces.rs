use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::piece_attacks;
use crate::move_generation::legal_move_shared::Targets;
use crate::move_generation::move_generator::MoveList;
use crate::moves::chess_move::Move;

/// Moves of every queen, rook, bishop or knight of the side to move, captures
/// and quiets as allowed by `targets`.
pub(crate) fn generate_piece_moves(
    position: &Position,
    kind: PieceKind,
    targets: &Targets,
    out: &mut MoveList,
) {
    debug_assert!(!matches!(kind, PieceKind::King | PieceKind::Pawn));

    let us = position.side_to_move();
    let occupancy = position.occupancy();
    let destinations = targets.captures | targets.quiets;
    if destinations.is_empty() {
        return;
    }

    for from in position.bitboard_of(Piece::new(us, kind)) {
        let attacks = piece_attacks(us, kind, from, occupancy) & destinations;
        for to in attacks {
            if position.keeps_pin_line(from, to) {
                out.push(Move::normal(from, to));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_piece_moves;
    use crate::game_state::chess_types::{PieceKind, Square};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_shared::Targets;
    use crate::move_generation::move_generator::{GenerationMode, MoveList};
    use crate::moves::chess_move::Move;

    fn moves(fen: &str, kind: PieceKind, mode: GenerationMode) -> MoveList {
        let pos = Position::from_fen(fen).expect("test FEN should parse");
        let mut out = MoveList::new();
        generate_piece_moves(&pos, kind, &Targets::for_mode(&pos, mode), &mut out);
        out
    }

    #[test]
    fn pinned_slider_stays_on_the_pin_line() {
        // Rook on e2 is pinned along the e-file; it may slide along the file
        // and capture the pinner but not leave the file.
        let fen = "4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1";
        let captures = moves(fen, PieceKind::Rook, GenerationMode::Captures);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].mv, Move::normal(Square::E2, Square::E8));

        let quiets = moves(fen, PieceKind::Rook, GenerationMode::Quiets);
        assert_eq!(quiets.len(), 5);
        assert!(!quiets.contains(Move::normal(Square::E2, Square::D2)));
    }

    #[test]
    fn pinned_knight_never_moves() {
        let fen = "4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1";
        assert!(moves(fen, PieceKind::Knight, GenerationMode::AllMoves).is_empty());
    }

    #[test]
    fn evasions_only_capture_or_block() {
        // The a1 rook checks the e1 king; the knight on c3 can block on d1 or
        // b1, the bishop on b2 captures the checker.
        let fen = "4k3/8/8/8/8/2N5/1B6/r3K3 w - - 0 1";
        let knight = moves(fen, PieceKind::Knight, GenerationMode::QuietEvasions);
        assert_eq!(knight.len(), 2);
        assert!(knight.contains(Move::normal(Square::C3, Square::D1)));
        assert!(knight.contains(Move::normal(Square::C3, Square::B1)));

        let bishop = moves(fen, PieceKind::Bishop, GenerationMode::CaptureEvasions);
        assert_eq!(bishop.len(), 1);
        assert_eq!(bishop[0].mv, Move::normal(Square::B2, Square::A1));
    }
}
