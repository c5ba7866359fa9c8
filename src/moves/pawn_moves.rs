use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::{Color, Square};

pub const WHITE_PAWN_ATTACKS: [BitBoard; 64] = generate_white_pawn_attacks();
pub const BLACK_PAWN_ATTACKS: [BitBoard; 64] = generate_black_pawn_attacks();

/// Squares attacked by a `color` pawn standing on `square`.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> BitBoard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

/// All squares attacked by a set of `color` pawns.
#[inline]
pub const fn pawn_attacks_set(color: Color, pawns: BitBoard) -> BitBoard {
    let not_a = !BitBoard::FILE_A.raw();
    let not_h = !BitBoard::FILE_H.raw();
    let bb = pawns.raw();
    match color {
        Color::White => BitBoard(((bb & not_a) << 7) | ((bb & not_h) << 9)),
        Color::Black => BitBoard(((bb & not_a) >> 9) | ((bb & not_h) >> 7)),
    }
}

const fn generate_white_pawn_attacks() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank < 7 {
            if file > 0 {
                attacks |= 1u64 << (sq + 7);
            }
            if file < 7 {
                attacks |= 1u64 << (sq + 9);
            }
        }

        table[sq] = BitBoard(attacks);
        sq += 1;
    }

    table
}

const fn generate_black_pawn_attacks() -> [BitBoard; 64] {
    let mut table = [BitBoard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = sq % 8;
        let rank = sq / 8;
        let mut attacks = 0u64;

        if rank > 0 {
            if file > 0 {
                attacks |= 1u64 << (sq - 9);
            }
            if file < 7 {
                attacks |= 1u64 << (sq - 7);
            }
        }

        table[sq] = BitBoard(attacks);
        sq += 1;
    }

    table
}
