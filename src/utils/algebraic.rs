//! Square conversions for coordinate text (e.g. `e4`).

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::{File, Rank, Square};

/// Parse a two-character coordinate such as `"e4"`.
#[inline]
pub fn algebraic_to_square(text: &str) -> Option<Square> {
    let mut chars = text.chars();
    let file = File::from_char(chars.next()?)?;
    let rank = Rank::from_char(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Square::from_file_rank(file, rank))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Coordinates of every square in `squares`, a1 first.
pub fn bitboard_to_algebraic(squares: BitBoard) -> Vec<String> {
    squares.iter().map(square_to_algebraic).collect()
}
