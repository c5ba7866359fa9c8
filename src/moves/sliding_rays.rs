//! Direction rays for classical sliding-piece attack scans.
//!
//! Each table holds, per origin square, every square reachable in one
//! direction on an empty board. Occupancy-aware attacks keep the ray up to and
//! including the first blocker by cutting off the blocker's own ray.

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::Square;

pub(crate) const NORTH: [u64; 64] = generate_ray_table(0, 1);
pub(crate) const SOUTH: [u64; 64] = generate_ray_table(0, -1);
pub(crate) const EAST: [u64; 64] = generate_ray_table(1, 0);
pub(crate) const WEST: [u64; 64] = generate_ray_table(-1, 0);
pub(crate) const NORTH_EAST: [u64; 64] = generate_ray_table(1, 1);
pub(crate) const NORTH_WEST: [u64; 64] = generate_ray_table(-1, 1);
pub(crate) const SOUTH_EAST: [u64; 64] = generate_ray_table(1, -1);
pub(crate) const SOUTH_WEST: [u64; 64] = generate_ray_table(-1, -1);

/// Attacks along a ray whose square indices increase (first blocker is the
/// lowest set bit).
#[inline]
pub(crate) fn positive_ray_attacks(rays: &[u64; 64], square: Square, occupancy: BitBoard) -> BitBoard {
    let ray = rays[square.index()];
    let blockers = ray & occupancy.raw();
    if blockers == 0 {
        return BitBoard(ray);
    }
    let first = blockers.trailing_zeros() as usize;
    BitBoard(ray ^ rays[first])
}

/// Attacks along a ray whose square indices decrease (first blocker is the
/// highest set bit).
#[inline]
pub(crate) fn negative_ray_attacks(rays: &[u64; 64], square: Square, occupancy: BitBoard) -> BitBoard {
    let ray = rays[square.index()];
    let blockers = ray & occupancy.raw();
    if blockers == 0 {
        return BitBoard(ray);
    }
    let first = 63 - blockers.leading_zeros() as usize;
    BitBoard(ray ^ rays[first])
}

const fn generate_ray_table(file_step: i32, rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = trace_ray_const(sq as i32, file_step, rank_step);
        sq += 1;
    }

    table
}

const fn trace_ray_const(square: i32, file_step: i32, rank_step: i32) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        attacks |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_lengths_from_a_corner() {
        assert_eq!(NORTH[0].count_ones(), 7);
        assert_eq!(EAST[0].count_ones(), 7);
        assert_eq!(NORTH_EAST[0].count_ones(), 7);
        assert_eq!(SOUTH[0], 0);
        assert_eq!(WEST[0], 0);
    }

    #[test]
    fn blockers_truncate_rays_inclusively() {
        let d4 = Square::D4;
        let occupancy = BitBoard::from_square(Square::D6).with(Square::B4);
        let north = positive_ray_attacks(&NORTH, d4, occupancy);
        assert_eq!(north, BitBoard::from_square(Square::D5).with(Square::D6));
        let west = negative_ray_attacks(&WEST, d4, occupancy);
        assert_eq!(west, BitBoard::from_square(Square::C4).with(Square::B4));
    }
}
