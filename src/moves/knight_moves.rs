use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::Square;
use crate::moves::king_moves::set_if_valid;

pub const KNIGHT_ATTACKS: [BitBoard; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> BitBoard {
    KNIGHT_ATTACKS[square.index()]
}

const fn generate_knight_attacks() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        attacks |= set_if_valid(file + 1, rank + 2);
        attacks |= set_if_valid(file + 2, rank + 1);
        attacks |= set_if_valid(file + 2, rank - 1);
        attacks |= set_if_valid(file + 1, rank - 2);
        attacks |= set_if_valid(file - 1, rank - 2);
        attacks |= set_if_valid(file - 2, rank - 1);
        attacks |= set_if_valid(file - 2, rank + 1);
        attacks |= set_if_valid(file - 1, rank + 2);

        table[sq] = BitBoard(attacks);
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, KNIGHT_ATTACKS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_attacks_from_corners_and_centre() {
        assert_eq!(KNIGHT_ATTACKS[Square::A1.index()].bit_count(), 2);
        assert_eq!(knight_attacks(Square::H8).bit_count(), 2);
        assert_eq!(knight_attacks(Square::D4).bit_count(), 8);
        assert!(knight_attacks(Square::G1).is_set(Square::F3));
        assert!(!knight_attacks(Square::G1).is_set(Square::G3));
    }
}
