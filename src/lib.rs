//! Crate root module declarations for the Plum chess position core.
//!
//! This file exposes the board model (bitboards, geometry, position and its
//! per-ply state stack), incremental hashing, legal move generation with
//! perft, the staged move selector used by search, and the FEN/text utilities
//! so binaries, benches and tests can import stable module paths.

pub mod chess_errors;

pub mod bitboard {
    pub mod bitboard;
    pub mod geometry;
}

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod position;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod chess_move;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding_rays;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub(crate) mod legal_move_shared;
    pub(crate) mod legal_moves_king;
    pub(crate) mod legal_moves_pawn;
    pub(crate) mod legal_moves_pieces;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod move_selector;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

/// Build the process-wide lookup tables (square geometry and hash keys).
///
/// Every table is also built lazily on first use; calling this at startup
/// only moves that cost out of the first query.
pub fn init() {
    bitboard::geometry::init_geometry();
    search::zobrist::init_zobrist();
}
