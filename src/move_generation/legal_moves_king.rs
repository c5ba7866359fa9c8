use crate::game_state::chess_rules::castling_squares;
use crate::game_state::chess_types::CastlingRights;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::Targets;
use crate::move_generation::move_generator::MoveList;
use crate::moves::chess_move::Move;
use crate::moves::king_moves::king_attacks;

/// King steps onto `targets.king` squares that are not attacked once the king
/// has left its square.
pub(crate) fn generate_king_moves(position: &Position, targets: &Targets, out: &mut MoveList) {
    let from = position.king_square(position.side_to_move());
    for to in king_attacks(from) & targets.king {
        if position.is_king_destination_safe(to) {
            out.push(Move::normal(from, to));
        }
    }
}

/// King-side then queen-side castling, encoded as the king's two-square step.
pub(crate) fn generate_castling_moves(position: &Position, out: &mut MoveList) {
    let us = position.side_to_move();
    if !position.castling_rights().intersects(CastlingRights::for_color(us)) {
        return;
    }
    for king_side in [true, false] {
        if position.can_castle(king_side) {
            let squares = castling_squares(us, king_side);
            out.push(Move::castle(squares.king_from, squares.king_to));
        }
    }
}
