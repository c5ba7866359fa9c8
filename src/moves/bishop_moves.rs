//! Bishop attack bitboards.
//!
//! Same scheme as the rook, over the four diagonal rays.

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::Square;
use crate::moves::sliding_rays::{
    negative_ray_attacks, positive_ray_attacks, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
};

pub const BISHOP_RAYS: [BitBoard; 64] = generate_bishop_rays();

#[inline]
pub fn bishop_attacks(square: Square, occupancy: BitBoard) -> BitBoard {
    positive_ray_attacks(&NORTH_EAST, square, occupancy)
        | positive_ray_attacks(&NORTH_WEST, square, occupancy)
        | negative_ray_attacks(&SOUTH_EAST, square, occupancy)
        | negative_ray_attacks(&SOUTH_WEST, square, occupancy)
}

#[inline]
pub const fn bishop_pseudo_attacks(square: Square) -> BitBoard {
    BISHOP_RAYS[square.index()]
}

const fn generate_bishop_rays() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = BitBoard(NORTH_EAST[sq] | NORTH_WEST[sq] | SOUTH_EAST[sq] | SOUTH_WEST[sq]);
        sq += 1;
    }

    table
}
