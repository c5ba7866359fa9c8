//! 64-bit square set.
//!
//! Bit `i` is set exactly when square `i` is a member. Iteration walks set
//! squares lowest index first by clearing the lowest bit each step.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::game_state::chess_types::{File, Rank, Square};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitBoard(pub u64);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);
    pub const FULL: BitBoard = BitBoard(!0);

    pub const RANK_1: BitBoard = BitBoard(0x0000_0000_0000_00FF);
    pub const RANK_8: BitBoard = BitBoard(0xFF00_0000_0000_0000);
    pub const FILE_A: BitBoard = BitBoard(0x0101_0101_0101_0101);
    pub const FILE_H: BitBoard = BitBoard(0x8080_8080_8080_8080);

    #[inline]
    pub const fn new(raw: u64) -> BitBoard {
        BitBoard(raw)
    }

    #[inline]
    pub const fn from_square(square: Square) -> BitBoard {
        debug_assert!(square.is_valid());
        BitBoard(1u64 << square.raw())
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_set(self, square: Square) -> bool {
        self.0 & (1u64 << (square.raw() & 63)) != 0
    }

    #[inline]
    pub const fn is_set_at(self, file: File, rank: Rank) -> bool {
        self.is_set(Square::from_file_rank(file, rank))
    }

    #[inline]
    pub const fn bit_count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn more_than_one_bit(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    #[inline]
    pub const fn exactly_one_bit(self) -> bool {
        self.0 != 0 && !self.more_than_one_bit()
    }

    /// Lowest set square. The set must not be empty.
    #[inline]
    pub const fn first_one(self) -> Square {
        debug_assert!(self.0 != 0, "first_one on an empty bitboard");
        Square::new(self.0.trailing_zeros() as u8)
    }

    /// Highest set square. The set must not be empty.
    #[inline]
    pub const fn last_one(self) -> Square {
        debug_assert!(self.0 != 0, "last_one on an empty bitboard");
        Square::new(63 - self.0.leading_zeros() as u8)
    }

    #[inline]
    pub const fn with(self, square: Square) -> BitBoard {
        BitBoard(self.0 | (1u64 << square.raw()))
    }

    #[inline]
    pub const fn without(self, square: Square) -> BitBoard {
        BitBoard(self.0 & !(1u64 << square.raw()))
    }

    /// Shift by `amount` index steps: positive towards h8, negative towards a1.
    /// Bits leaving the 64-bit range are discarded, and any shift of 64 or more
    /// in either direction yields the empty set.
    #[inline]
    pub const fn shift(self, amount: i32) -> BitBoard {
        if amount >= 64 || amount <= -64 {
            BitBoard::EMPTY
        } else if amount >= 0 {
            BitBoard(self.0 << amount)
        } else {
            BitBoard(self.0 >> -amount)
        }
    }

    #[inline]
    pub fn iter(self) -> BitBoardIter {
        BitBoardIter(self.0)
    }
}

impl BitAnd for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitand(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 & rhs.0)
    }
}

impl BitOr for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitor(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 | rhs.0)
    }
}

impl BitXor for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn bitxor(self, rhs: BitBoard) -> BitBoard {
        BitBoard(self.0 ^ rhs.0)
    }
}

impl Not for BitBoard {
    type Output = BitBoard;

    #[inline]
    fn not(self) -> BitBoard {
        BitBoard(!self.0)
    }
}

impl BitAndAssign for BitBoard {
    #[inline]
    fn bitand_assign(&mut self, rhs: BitBoard) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for BitBoard {
    #[inline]
    fn bitor_assign(&mut self, rhs: BitBoard) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for BitBoard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: BitBoard) {
        self.0 ^= rhs.0;
    }
}

impl From<Square> for BitBoard {
    #[inline]
    fn from(square: Square) -> BitBoard {
        BitBoard::from_square(square)
    }
}

/// Lazy walk over the set squares of a bitboard, lowest first.
#[derive(Debug, Clone)]
pub struct BitBoardIter(u64);

impl Iterator for BitBoardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = Square::new(self.0.trailing_zeros() as u8);
        self.0 &= self.0 - 1;
        Some(square)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitBoardIter {}

impl IntoIterator for BitBoard {
    type Item = Square;
    type IntoIter = BitBoardIter;

    #[inline]
    fn into_iter(self) -> BitBoardIter {
        BitBoardIter(self.0)
    }
}

impl FromIterator<Square> for BitBoard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> BitBoard {
        iter.into_iter()
            .fold(BitBoard::EMPTY, |acc, square| acc.with(square))
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBoard(0x{:016x})", self.0)
    }
}

/// Eight-line diagram, rank 8 first.
impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let ch = if self.is_set_at(file, *rank) { 'X' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BitBoard;
    use crate::game_state::chess_types::{File, Rank, Square};

    const SAMPLES: [u64; 6] = [
        0,
        !0,
        0x0000_0000_0000_FF00,
        0x8100_0000_0000_0081,
        0x1234_5678_9ABC_DEF0,
        0x0F0F_F0F0_0000_0001,
    ];

    #[test]
    fn set_algebra_laws_hold() {
        for a in SAMPLES {
            for b in SAMPLES {
                let (a, b) = (BitBoard(a), BitBoard(b));
                assert_eq!((a & b) | (a ^ b), a | b);
                assert_eq!(a.bit_count() + (!a).bit_count(), 64);
            }
        }
    }

    #[test]
    fn iteration_is_increasing_and_restartable() {
        let bb = BitBoard(0x1234_5678_9ABC_DEF0);
        let first: Vec<Square> = bb.iter().collect();
        let second: Vec<Square> = bb.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), bb.bit_count() as usize);
        assert!(first.windows(2).all(|w| w[0] < w[1]));
        let rebuilt: BitBoard = first.into_iter().collect();
        assert_eq!(rebuilt, bb);
    }

    #[test]
    fn shifting_up_a_rank_discards_the_top_rank() {
        let bb = BitBoard(0xFF00_0000_0000_00FF);
        assert_eq!(bb.shift(8), BitBoard(0x0000_0000_0000_FF00));
        assert_eq!(bb.shift(-8), BitBoard(0x00FF_0000_0000_0000));
        for sq in bb.shift(8) {
            assert_eq!(sq.rank(), Rank::R2);
        }
    }

    #[test]
    fn oversized_shifts_empty_the_set() {
        let bb = BitBoard::from_square(Square::B1);
        assert_eq!(bb.shift(63), BitBoard::EMPTY);
        assert_eq!(bb.shift(64), BitBoard::EMPTY);
        assert_eq!(bb.shift(200), BitBoard::EMPTY);
        assert_eq!(BitBoard::FULL.shift(-64), BitBoard::EMPTY);
        assert_eq!(BitBoard::FULL.shift(-70), BitBoard::EMPTY);
        assert_eq!(BitBoard::from_square(Square::A1).shift(63), BitBoard::from_square(Square::H8));
    }

    #[test]
    fn single_bit_queries() {
        let bb = BitBoard::from_square(Square::E4);
        assert!(bb.is_set(Square::E4));
        assert!(bb.is_set_at(File::E, Rank::R4));
        assert!(!bb.is_set(Square::E5));
        assert!(bb.exactly_one_bit());
        assert!(!bb.more_than_one_bit());
        assert_eq!(bb.first_one(), Square::E4);
        let two = bb.with(Square::A8);
        assert!(two.more_than_one_bit());
        assert_eq!(two.first_one(), Square::E4);
        assert_eq!(two.last_one(), Square::A8);
        assert_eq!(two.without(Square::E4), BitBoard::from_square(Square::A8));
        assert!(BitBoard::EMPTY.is_empty());
        assert!(!BitBoard::EMPTY.exactly_one_bit());
    }
}
