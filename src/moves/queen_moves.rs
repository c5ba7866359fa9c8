use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RAYS};
use crate::moves::rook_moves::{rook_attacks, ROOK_RAYS};

pub const QUEEN_RAYS: [BitBoard; 64] = generate_queen_rays();

#[inline]
pub fn queen_attacks(square: Square, occupancy: BitBoard) -> BitBoard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

const fn generate_queen_rays() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = BitBoard(BISHOP_RAYS[sq].raw() | ROOK_RAYS[sq].raw());
        sq += 1;
    }

    table
}
