//! Rook attack bitboards.
//!
//! `ROOK_RAYS` is the empty-board pattern; `rook_attacks` scans the four
//! orthogonal rays and stops at, including, the first occupied square.

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::Square;
use crate::moves::sliding_rays::{
    negative_ray_attacks, positive_ray_attacks, EAST, NORTH, SOUTH, WEST,
};

pub const ROOK_RAYS: [BitBoard; 64] = generate_rook_rays();

#[inline]
pub fn rook_attacks(square: Square, occupancy: BitBoard) -> BitBoard {
    positive_ray_attacks(&NORTH, square, occupancy)
        | positive_ray_attacks(&EAST, square, occupancy)
        | negative_ray_attacks(&SOUTH, square, occupancy)
        | negative_ray_attacks(&WEST, square, occupancy)
}

#[inline]
pub const fn rook_pseudo_attacks(square: Square) -> BitBoard {
    ROOK_RAYS[square.index()]
}

const fn generate_rook_rays() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = BitBoard(NORTH[sq] | SOUTH[sq] | EAST[sq] | WEST[sq]);
        sq += 1;
    }

    table
}
