//! King attack bitboard generation utilities.
//!
//! Occupancy-independent, so the whole table is built at compile time.

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::Square;

pub const KING_ATTACKS: [BitBoard; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> BitBoard {
    KING_ATTACKS[square.index()]
}

const fn generate_king_attacks() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file - 1, rank - 1);
        attacks |= set_if_valid(file, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 1);
        attacks |= set_if_valid(file - 1, rank);
        attacks |= set_if_valid(file + 1, rank);
        attacks |= set_if_valid(file - 1, rank + 1);
        attacks |= set_if_valid(file, rank + 1);
        attacks |= set_if_valid(file + 1, rank + 1);

        table[sq] = BitBoard(attacks);
        sq += 1;
    }

    table
}

pub(crate) const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::{king_attacks, KING_ATTACKS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn king_attacks_from_a1_has_three_targets() {
        assert_eq!(KING_ATTACKS[Square::A1.index()].bit_count(), 3);
        assert_eq!(king_attacks(Square::A1).bit_count(), 3);
    }

    #[test]
    fn king_attacks_from_the_centre_has_eight_targets() {
        let attacks = king_attacks(Square::E4);
        assert_eq!(attacks.bit_count(), 8);
        assert!(attacks.is_set(Square::D3));
        assert!(attacks.is_set(Square::F5));
        assert!(!attacks.is_set(Square::E4));
    }
}
