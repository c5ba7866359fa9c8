//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals: the standard starting
//! position, material values, and the fixed king/rook squares used by
//! standard (non-960) castling.

use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, Score, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Largest full-move number accepted from FEN. Leaves the ply counter room
/// for any search on top of the parsed position.
pub const MAX_FULLMOVE_NUMBER: u32 = 1 << 20;

/// Largest half-move clock accepted from FEN.
pub const MAX_HALFMOVE_CLOCK: u32 = 2 * MAX_FULLMOVE_NUMBER;

/// Material value of a piece kind. Kings carry no material.
#[inline]
pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::King => Score::new(0, 0),
        PieceKind::Queen => Score::new(1250, 1350),
        PieceKind::Rook => Score::new(600, 650),
        PieceKind::Bishop => Score::new(410, 420),
        PieceKind::Knight => Score::new(390, 400),
        PieceKind::Pawn => Score::new(100, 130),
    }
}

/// Fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    pub right: CastlingRights,
}

/// Castling geometry for `color` on the king or queen side.
#[inline]
pub const fn castling_squares(color: Color, king_side: bool) -> CastlingSquares {
    let (king_to, rook_from, rook_to) = if king_side {
        (Square::G1, Square::H1, Square::F1)
    } else {
        (Square::C1, Square::A1, Square::D1)
    };
    CastlingSquares {
        king_from: Square::E1.relative_to(color),
        king_to: king_to.relative_to(color),
        rook_from: rook_from.relative_to(color),
        rook_to: rook_to.relative_to(color),
        right: CastlingRights::side(color, king_side),
    }
}

/// Rights lost when a piece leaves or arrives on each square.
pub const CASTLING_RIGHTS_MASK: [CastlingRights; 64] = build_castling_rights_mask();

const fn build_castling_rights_mask() -> [CastlingRights; 64] {
    let mut table = [CastlingRights::NONE; 64];
    table[Square::E1.index()] = CastlingRights::for_color(Color::White);
    table[Square::A1.index()] = CastlingRights::WHITE_QUEEN_SIDE;
    table[Square::H1.index()] = CastlingRights::WHITE_KING_SIDE;
    table[Square::E8.index()] = CastlingRights::for_color(Color::Black);
    table[Square::A8.index()] = CastlingRights::BLACK_QUEEN_SIDE;
    table[Square::H8.index()] = CastlingRights::BLACK_KING_SIDE;
    table
}
