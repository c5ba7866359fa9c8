//! Destination masks shared by the per-piece generators.

use crate::bitboard::bitboard::BitBoard;
use crate::bitboard::geometry::squares_between;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::GenerationMode;

/// Where each class of move may land for one generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Targets {
    /// Capture destinations of non-king pieces, pawns included.
    pub captures: BitBoard,
    /// Non-capturing destinations of non-king pieces, non-promoting pushes included.
    pub quiets: BitBoard,
    /// Destinations of non-capturing promotion pushes.
    pub promotion_pushes: BitBoard,
    pub king: BitBoard,
    pub castling: bool,
    pub en_passant: bool,
}

impl Targets {
    const NONE: Targets = Targets {
        captures: BitBoard::EMPTY,
        quiets: BitBoard::EMPTY,
        promotion_pushes: BitBoard::EMPTY,
        king: BitBoard::EMPTY,
        castling: false,
        en_passant: false,
    };

    pub(crate) fn for_mode(position: &Position, mode: GenerationMode) -> Targets {
        let theirs = position.their_pieces();
        let empty = !position.occupancy();
        let checkers = position.checkers();

        if mode.is_evasion() {
            debug_assert!(checkers.is_not_empty(), "evasion generation without checkers");
        } else if mode != GenerationMode::AllMoves {
            debug_assert!(checkers.is_empty(), "{mode:?} generation while in check");
        }

        match mode {
            GenerationMode::Captures => Targets {
                captures: theirs,
                promotion_pushes: empty,
                king: theirs,
                en_passant: true,
                ..Targets::NONE
            },
            GenerationMode::Quiets | GenerationMode::QuietChecks => Targets {
                quiets: empty,
                king: empty,
                castling: true,
                ..Targets::NONE
            },
            GenerationMode::CaptureEvasions => Targets {
                captures: checkers,
                promotion_pushes: Self::blocking_squares(position),
                king: theirs,
                en_passant: true,
                ..Targets::NONE
            },
            GenerationMode::QuietEvasions => Targets {
                quiets: Self::blocking_squares(position),
                king: empty,
                ..Targets::NONE
            },
            GenerationMode::AllMoves => {
                let (captures, quiets) = if checkers.is_empty() {
                    (GenerationMode::Captures, GenerationMode::Quiets)
                } else {
                    (GenerationMode::CaptureEvasions, GenerationMode::QuietEvasions)
                };
                Self::for_mode(position, captures).union(Self::for_mode(position, quiets))
            }
        }
    }

    /// Squares between our king and its single checker.
    fn blocking_squares(position: &Position) -> BitBoard {
        let checkers = position.checkers();
        if checkers.more_than_one_bit() || checkers.is_empty() {
            return BitBoard::EMPTY;
        }
        let king = position.king_square(position.side_to_move());
        squares_between(king, checkers.first_one())
    }

    fn union(self, other: Targets) -> Targets {
        Targets {
            captures: self.captures | other.captures,
            quiets: self.quiets | other.quiets,
            promotion_pushes: self.promotion_pushes | other.promotion_pushes,
            king: self.king | other.king,
            castling: self.castling || other.castling,
            en_passant: self.en_passant || other.en_passant,
        }
    }
}
