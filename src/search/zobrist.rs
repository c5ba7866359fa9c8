//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging. Every mutation of a
//! `HashKey` is a plain XOR fold against the tables, so applying the same
//! change twice restores the previous key.

use std::fmt;
use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::chess_types::{CastlingRights, Piece, Square};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[u64; 64]; Piece::SLOTS],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant: [u64; 64],
    exclusion: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

/// Force construction of the random tables.
pub fn init_zobrist() {
    let _ = tables();
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    // Only the twelve real piece slots get keys; aggregates stay zero.
    let mut piece_square = [[0u64; 64]; Piece::SLOTS];
    for piece in Piece::REAL {
        for key in &mut piece_square[piece.index()] {
            *key = rng.next_u64();
        }
    }

    let side_to_move = rng.next_u64();

    let mut single_right = [0u64; 4];
    for key in &mut single_right {
        *key = rng.next_u64();
    }
    let mut castling = [0u64; 16];
    for (subset, key) in castling.iter_mut().enumerate() {
        *key = single_right
            .iter()
            .enumerate()
            .filter(|(bit, _)| subset & (1 << bit) != 0)
            .fold(0, |acc, (_, k)| acc ^ k);
    }

    let mut en_passant = [0u64; 64];
    for key in &mut en_passant {
        *key = rng.next_u64();
    }

    let exclusion = rng.next_u64();

    log::debug!("zobrist tables built from seed {ZOBRIST_SEED:#x}");

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant,
        exclusion,
    }
}

/// Incrementally maintained 64-bit position key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct HashKey(u64);

impl HashKey {
    #[inline]
    pub const fn new(raw: u64) -> HashKey {
        HashKey(raw)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Relocate `piece` from one square to another.
    #[inline]
    pub fn move_piece(&mut self, piece: Piece, from: Square, to: Square) -> &mut Self {
        let table = &tables().piece_square[piece.index()];
        self.0 ^= table[from.index()] ^ table[to.index()];
        self
    }

    #[inline]
    pub fn add_piece(&mut self, piece: Piece, square: Square) -> &mut Self {
        self.0 ^= tables().piece_square[piece.index()][square.index()];
        self
    }

    #[inline]
    pub fn remove_piece(&mut self, piece: Piece, square: Square) -> &mut Self {
        self.add_piece(piece, square)
    }

    #[inline]
    pub fn change_side(&mut self) -> &mut Self {
        self.0 ^= tables().side_to_move;
        self
    }

    #[inline]
    pub fn add_en_passant(&mut self, square: Square) -> &mut Self {
        self.0 ^= tables().en_passant[square.index()];
        self
    }

    #[inline]
    pub fn remove_en_passant(&mut self, square: Square) -> &mut Self {
        self.add_en_passant(square)
    }

    /// Toggle exactly the given castling-right bits.
    #[inline]
    pub fn change_castling_rights(&mut self, changed: CastlingRights) -> &mut Self {
        self.0 ^= castling_key(changed);
        self
    }

    /// Mark the key as belonging to an excluded-move search.
    #[inline]
    pub fn set_exclusion(&mut self) -> &mut Self {
        self.0 ^= tables().exclusion;
        self
    }

    #[inline]
    pub fn remove_exclusion(&mut self) -> &mut Self {
        self.set_exclusion()
    }
}

impl fmt::Debug for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashKey({:#018x})", self.0)
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Key contribution of a castling-right subset.
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    tables().castling[rights.bits() as usize]
}
