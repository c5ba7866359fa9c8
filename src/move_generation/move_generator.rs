//! Move generation interfaces: generation modes, the bounded move list and
//! the `MoveGenerator` trait implemented by the legal generator.

use std::fmt;
use std::ops::Index;

use crate::game_state::position::Position;
use crate::moves::chess_move::{Move, ScoredMove};

/// Upper bound on legal moves in any reachable chess position (218), rounded
/// up.
pub const MAX_MOVES: usize = 256;

/// Which subset of the legal moves to produce.
///
/// `Captures` and `Quiets` partition the legal moves of a position that is
/// not in check: captures (en passant included) plus every promotion on one
/// side, everything else (castling included) on the other. The two evasion
/// modes split the legal moves of a position in check the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    Captures,
    Quiets,
    /// Quiet moves that give check.
    QuietChecks,
    CaptureEvasions,
    QuietEvasions,
    /// Every legal move, evasions when in check.
    AllMoves,
}

impl GenerationMode {
    #[inline]
    pub const fn is_evasion(self) -> bool {
        matches!(self, GenerationMode::CaptureEvasions | GenerationMode::QuietEvasions)
    }
}

/// Fixed-capacity move buffer filled by the generator.
#[derive(Clone)]
pub struct MoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    #[inline]
    pub fn new() -> Self {
        Self {
            moves: [ScoredMove::default(); MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = ScoredMove::from(mv);
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [ScoredMove] {
        &mut self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().map(|scored| scored.mv)
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().iter().any(|scored| *scored == mv)
    }

    /// Keep only the moves from index `start` onwards that satisfy `keep`,
    /// preserving their order. Moves before `start` are untouched.
    pub fn retain_from<F>(&mut self, start: usize, mut keep: F)
    where
        F: FnMut(Move) -> bool,
    {
        let mut write = start;
        for read in start..self.len {
            let scored = self.moves[read];
            if keep(scored.mv) {
                self.moves[write] = scored;
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Index<usize> for MoveList {
    type Output = ScoredMove;

    #[inline]
    fn index(&self, index: usize) -> &ScoredMove {
        &self.as_slice()[index]
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub trait MoveGenerator {
    /// Append the moves of `mode` for the side to move to `out`.
    fn generate(&self, position: &Position, mode: GenerationMode, out: &mut MoveList);

    fn generate_legal_moves(&self, position: &Position) -> MoveList {
        let mut out = MoveList::new();
        self.generate(position, GenerationMode::AllMoves, &mut out);
        out
    }
}
