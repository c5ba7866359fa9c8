//! Per-ply state snapshot.
//!
//! A `Position` keeps a stack of these. Making a move pushes a copy of the top
//! snapshot and edits it in place; unmaking pops it. Everything the unmake
//! needs (captured piece, the move itself) therefore lives on the snapshot
//! being discarded.

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::{CastlingRights, Color, Piece, Score, Square};
use crate::moves::chess_move::Move;
use crate::search::zobrist::HashKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Side and rights ---
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Incremental hashing ---
    pub key: HashKey,
    pub pawn_key: HashKey,
    pub material_key: HashKey,

    // --- Material, white minus black / per color ---
    pub material: Score,
    pub non_pawn_material: [Score; 2],

    // --- Clocks ---
    pub fifty_move_counter: u32,
    pub plies_from_null: u32,
    pub ply: u32,

    // --- Unmake support ---
    pub captured_piece: Piece,
    pub current_move: Move,

    // --- Check info for the side to move ---
    /// Squares from which each of our piece kinds would attack the enemy king.
    pub checking_squares: [BitBoard; Piece::SLOTS],
    /// Our pieces whose departure uncovers an attack on the enemy king.
    pub hidden_checkers: BitBoard,
    /// Our pieces pinned against our own king.
    pub pinned: BitBoard,
    /// Enemy pieces giving check to our king.
    pub checkers: BitBoard,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            turn: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,

            key: HashKey::default(),
            pawn_key: HashKey::default(),
            material_key: HashKey::default(),

            material: Score::ZERO,
            non_pawn_material: [Score::ZERO; 2],

            fifty_move_counter: 0,
            plies_from_null: 0,
            ply: 0,

            captured_piece: Piece::Empty,
            current_move: Move::NONE,

            checking_squares: [BitBoard::EMPTY; Piece::SLOTS],
            hidden_checkers: BitBoard::EMPTY,
            pinned: BitBoard::EMPTY,
            checkers: BitBoard::EMPTY,
        }
    }
}

impl GameState {
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.checkers.is_not_empty()
    }

    /// FEN full-move number derived from the absolute ply.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.ply / 2 + 1
    }
}
