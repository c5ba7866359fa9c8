//! Errors used throughout the engine core.
//!
//! Only malformed external input is reported through these types. Broken
//! internal contracts (placing an aggregate slot, first bit of an empty
//! bitboard, evasion generation without checkers) are debug assertions.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

/// Reasons a FEN string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} of the board layout does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character '{0}' in board layout")]
    PieceChar(char),

    #[error("invalid side-to-move field '{0}'")]
    SideToMove(String),

    #[error("invalid castling rights field '{0}'")]
    CastlingRights(String),

    #[error("castling right '{0}' claimed without king and rook on their home squares")]
    CastlingWithoutPieces(char),

    #[error("invalid en-passant field '{0}'")]
    EnPassant(String),

    #[error("invalid {field} counter '{value}'")]
    Counter { field: &'static str, value: String },

    #[error("expected exactly one {0:?} king, found {1}")]
    KingCount(Color, u32),

    #[error("pawn on back rank square {0}")]
    PawnOnBackRank(Square),

    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Reasons coordinate move text cannot be matched to a legal move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveTextError {
    #[error("move text '{0}' must be 4 or 5 characters")]
    Length(String),

    #[error("invalid square '{0}' in move text")]
    Square(String),

    #[error("invalid promotion letter '{0}'")]
    Promotion(char),

    #[error("'{0}' is not a legal move in this position")]
    NotLegal(String),
}

/// Disagreement between incrementally maintained and recomputed data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("square array and piece bitboards disagree on {0}")]
    BoardMismatch(Square),

    #[error("{0:?} aggregate bitboard is not the union of its pieces")]
    AggregateMismatch(Color),

    #[error("occupancy bitboard is not the union of both colors")]
    OccupancyMismatch,

    #[error("expected exactly one {0:?} king")]
    KingCount(Color),

    #[error("incremental position key differs from recomputation")]
    KeyMismatch,

    #[error("incremental pawn key differs from recomputation")]
    PawnKeyMismatch,

    #[error("incremental material key differs from recomputation")]
    MaterialKeyMismatch,

    #[error("incremental material score differs from recomputation")]
    MaterialMismatch,

    #[error("cached check information is stale")]
    CheckInfoMismatch,
}
