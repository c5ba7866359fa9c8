//! The mutable board.
//!
//! A `Position` keeps two views of the piece placement in lockstep: a
//! 64-entry square array answering "what is on this square" and sixteen
//! bitboards (indexed by `Piece` slot) answering "where are all the X".
//! Slot 0 of the bitboard array is the occupancy of both colors and slots 7
//! and 15 are the per-color aggregates. Every placement change goes through
//! `add_piece`, `remove_piece` or `move_piece`, which update all views at
//! once and are exact inverses of each other.
//!
//! On top of the board sits the stack of `GameState` snapshots; the top entry
//! describes the current position (side to move, rights, keys, check info).

use crate::bitboard::bitboard::BitBoard;
use crate::chess_errors::{ConsistencyError, FenError};
use crate::game_state::chess_rules::{piece_value, STARTING_POSITION_FEN};
use crate::game_state::chess_types::{CastlingRights, Color, Piece, PieceKind, Score, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_moves;
use crate::move_generation::move_generator::{GenerationMode, MoveList};
use crate::search::zobrist::HashKey;
use crate::utils::fen_generator::{generate_fen, generate_mirrored_fen};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct Position {
    states: Vec<GameState>,
    board: [Piece; 64],
    bitboards: [BitBoard; Piece::SLOTS],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// Empty board, white to move, a single default state on the stack.
    pub fn empty() -> Self {
        Self {
            states: vec![GameState::default()],
            board: [Piece::Empty; 64],
            bitboards: [BitBoard::EMPTY; Piece::SLOTS],
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    /// Parse a FEN string.
    ///
    /// The en-passant field is kept as written even when no pawn can capture
    /// on it, so the FEN renders back unchanged. `make_move` only records the
    /// square when a capture is possible, so such a position hashes
    /// differently from the same position reached by playing the double
    /// push. Parse such a position with `-` in the en-passant field when its
    /// key must match the played one.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    /// Replace this position with the one described by `fen`.
    ///
    /// On failure the position is left untouched; nothing half-parsed is ever
    /// installed.
    pub fn set_up_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = parse_fen(fen)?;
        Ok(())
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// FEN of the color-swapped, vertically mirrored position.
    #[inline]
    pub fn to_symmetric_fen(&self) -> String {
        generate_mirrored_fen(self)
    }

    // ------------------------------------------------------------------
    // State stack
    // ------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> &GameState {
        // The stack is never empty: construction pushes the root state and
        // `pop_state` refuses to remove it.
        &self.states[self.states.len() - 1]
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    #[inline]
    pub(crate) fn push_state(&mut self, state: GameState) {
        self.states.push(state);
    }

    /// Drop the top snapshot and return it.
    #[inline]
    pub(crate) fn pop_state(&mut self) -> GameState {
        assert!(self.states.len() > 1, "unmake with an empty move history");
        self.states.pop().unwrap_or_default()
    }

    /// Snapshot `plies_back` plies below the current one, if recorded.
    #[inline]
    pub fn previous_state(&self, plies_back: usize) -> Option<&GameState> {
        let len = self.states.len();
        if plies_back < len {
            Some(&self.states[len - 1 - plies_back])
        } else {
            None
        }
    }

    /// Number of snapshots on the stack, the root included.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.states.len()
    }

    // ------------------------------------------------------------------
    // Board mutators
    // ------------------------------------------------------------------

    /// Put `piece` on the empty square `square`.
    #[inline]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(piece.is_real(), "placing aggregate slot {piece:?}");
        debug_assert_eq!(self.board[square.index()], Piece::Empty);
        let bit = BitBoard::from_square(square);
        self.board[square.index()] = piece;
        self.bitboards[piece.index()] |= bit;
        self.bitboards[Piece::OCCUPIED.index()] |= bit;
        self.bitboards[Piece::all_of(piece.color()).index()] |= bit;
    }

    /// Take `piece` off `square`.
    #[inline]
    pub(crate) fn remove_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(piece.is_real(), "removing aggregate slot {piece:?}");
        debug_assert_eq!(self.board[square.index()], piece);
        let bit = BitBoard::from_square(square);
        self.board[square.index()] = Piece::Empty;
        self.bitboards[piece.index()] ^= bit;
        self.bitboards[Piece::OCCUPIED.index()] ^= bit;
        self.bitboards[Piece::all_of(piece.color()).index()] ^= bit;
    }

    /// Relocate `piece` from `from` to the empty square `to`.
    #[inline]
    pub(crate) fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        debug_assert!(piece.is_real(), "moving aggregate slot {piece:?}");
        debug_assert_eq!(self.board[from.index()], piece);
        debug_assert_eq!(self.board[to.index()], Piece::Empty);
        let from_to = BitBoard::from_square(from) | BitBoard::from_square(to);
        self.board[from.index()] = Piece::Empty;
        self.board[to.index()] = piece;
        self.bitboards[piece.index()] ^= from_to;
        self.bitboards[Piece::OCCUPIED.index()] ^= from_to;
        self.bitboards[Piece::all_of(piece.color()).index()] ^= from_to;
    }

    // ------------------------------------------------------------------
    // Board queries
    // ------------------------------------------------------------------

    #[inline]
    pub fn piece_on(&self, square: Square) -> Piece {
        self.board[square.index()]
    }

    /// Bitboard stored in `slot`, including the aggregate slots.
    #[inline]
    pub fn bitboard_of(&self, slot: Piece) -> BitBoard {
        self.bitboards[slot.index()]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> BitBoard {
        self.bitboards[Piece::new(color, kind).index()]
    }

    /// Every piece of `side`.
    #[inline]
    pub fn bitboard_for(&self, side: Color) -> BitBoard {
        self.bitboards[Piece::all_of(side).index()]
    }

    #[inline]
    pub fn occupancy(&self) -> BitBoard {
        self.bitboards[Piece::OCCUPIED.index()]
    }

    #[inline]
    pub fn our_pieces(&self) -> BitBoard {
        self.bitboard_for(self.side_to_move())
    }

    #[inline]
    pub fn their_pieces(&self) -> BitBoard {
        self.bitboard_for(self.side_to_move().opposite())
    }

    /// Queens plus rooks of `color`.
    #[inline]
    pub fn rook_sliders(&self, color: Color) -> BitBoard {
        self.pieces_of(color, PieceKind::Rook) | self.pieces_of(color, PieceKind::Queen)
    }

    /// Queens plus bishops of `color`.
    #[inline]
    pub fn bishop_sliders(&self, color: Color) -> BitBoard {
        self.pieces_of(color, PieceKind::Bishop) | self.pieces_of(color, PieceKind::Queen)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, PieceKind::King).first_one()
    }

    #[inline]
    pub fn piece_count(&self, piece: Piece) -> u32 {
        self.bitboards[piece.index()].bit_count()
    }

    // ------------------------------------------------------------------
    // State queries
    // ------------------------------------------------------------------

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state().turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state().castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.state().en_passant_square
    }

    #[inline]
    pub fn key(&self) -> HashKey {
        self.state().key
    }

    #[inline]
    pub fn pawn_key(&self) -> HashKey {
        self.state().pawn_key
    }

    #[inline]
    pub fn material_key(&self) -> HashKey {
        self.state().material_key
    }

    /// Full key with the search-exclusion constant folded in.
    #[inline]
    pub fn exclusion_key(&self) -> HashKey {
        let mut key = self.state().key;
        key.set_exclusion();
        key
    }

    /// Material balance, white minus black.
    #[inline]
    pub fn material(&self) -> Score {
        self.state().material
    }

    #[inline]
    pub fn non_pawn_material(&self, color: Color) -> Score {
        self.state().non_pawn_material[color.index()]
    }

    #[inline]
    pub fn fifty_move_counter(&self) -> u32 {
        self.state().fifty_move_counter
    }

    #[inline]
    pub fn plies_from_null(&self) -> u32 {
        self.state().plies_from_null
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.state().ply
    }

    #[inline]
    pub fn checkers(&self) -> BitBoard {
        self.state().checkers
    }

    #[inline]
    pub fn pinned(&self) -> BitBoard {
        self.state().pinned
    }

    #[inline]
    pub fn hidden_checkers(&self) -> BitBoard {
        self.state().hidden_checkers
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.state().is_in_check()
    }

    // ------------------------------------------------------------------
    // From-scratch derivations
    // ------------------------------------------------------------------

    /// Full key folded over the board, side, rights and en-passant square.
    pub fn compute_key(&self) -> HashKey {
        let mut key = HashKey::default();
        for square in self.occupancy() {
            key.add_piece(self.piece_on(square), square);
        }
        if self.side_to_move() == Color::Black {
            key.change_side();
        }
        key.change_castling_rights(self.castling_rights());
        if let Some(ep) = self.en_passant_square() {
            key.add_en_passant(ep);
        }
        key
    }

    pub fn compute_pawn_key(&self) -> HashKey {
        let mut key = HashKey::default();
        let pawns = self.bitboard_of(Piece::WhitePawn) | self.bitboard_of(Piece::BlackPawn);
        for square in pawns {
            key.add_piece(self.piece_on(square), square);
        }
        key
    }

    /// Material signature: the n-th piece of a kind hashes as if it stood on
    /// square n, so the key depends only on piece counts.
    pub fn compute_material_key(&self) -> HashKey {
        let mut key = HashKey::default();
        for piece in Piece::REAL {
            for count in 0..self.piece_count(piece) {
                key.add_piece(piece, Square::new(count as u8));
            }
        }
        key
    }

    pub fn compute_material(&self) -> (Score, [Score; 2]) {
        let mut material = Score::ZERO;
        let mut non_pawn = [Score::ZERO; 2];
        for square in self.occupancy() {
            let piece = self.piece_on(square);
            material += signed_piece_value(piece);
            if !piece.is_pawn() {
                non_pawn[piece.color().index()] += piece_value(piece.kind());
            }
        }
        (material, non_pawn)
    }

    /// Derive keys, material and check info of the top state from the board.
    pub(crate) fn refresh_derived_state(&mut self) {
        let key = self.compute_key();
        let pawn_key = self.compute_pawn_key();
        let material_key = self.compute_material_key();
        let (material, non_pawn_material) = self.compute_material();

        let state = self.state_mut();
        state.key = key;
        state.pawn_key = pawn_key;
        state.material_key = material_key;
        state.material = material;
        state.non_pawn_material = non_pawn_material;

        self.refresh_check_info();
    }

    /// Verify every incrementally maintained field against a from-scratch
    /// recomputation.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut aggregates = [BitBoard::EMPTY; 2];
        for square in Square::iter() {
            let piece = self.piece_on(square);
            for slot in Piece::REAL {
                let present = self.bitboard_of(slot).is_set(square);
                if present != (slot == piece) {
                    return Err(ConsistencyError::BoardMismatch(square));
                }
            }
            if piece.is_real() {
                aggregates[piece.color().index()] |= BitBoard::from_square(square);
            } else if piece != Piece::Empty {
                return Err(ConsistencyError::BoardMismatch(square));
            }
        }
        for color in Color::ALL {
            if self.bitboard_for(color) != aggregates[color.index()] {
                return Err(ConsistencyError::AggregateMismatch(color));
            }
            if self.pieces_of(color, PieceKind::King).bit_count() != 1 {
                return Err(ConsistencyError::KingCount(color));
            }
        }
        if self.occupancy() != aggregates[0] | aggregates[1] {
            return Err(ConsistencyError::OccupancyMismatch);
        }
        if self.bitboard_of(Piece::Separator).is_not_empty() {
            return Err(ConsistencyError::OccupancyMismatch);
        }

        if self.key() != self.compute_key() {
            return Err(ConsistencyError::KeyMismatch);
        }
        if self.pawn_key() != self.compute_pawn_key() {
            return Err(ConsistencyError::PawnKeyMismatch);
        }
        if self.material_key() != self.compute_material_key() {
            return Err(ConsistencyError::MaterialKeyMismatch);
        }
        let (material, non_pawn) = self.compute_material();
        if self.material() != material || self.state().non_pawn_material != non_pawn {
            return Err(ConsistencyError::MaterialMismatch);
        }

        let mut fresh = self.clone();
        fresh.refresh_check_info();
        let (now, expected) = (self.state(), fresh.state());
        if now.checkers != expected.checkers
            || now.pinned != expected.pinned
            || now.hidden_checkers != expected.hidden_checkers
            || now.checking_squares != expected.checking_squares
        {
            return Err(ConsistencyError::CheckInfoMismatch);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Draw detection
    // ------------------------------------------------------------------

    /// Fifty-move rule, unless the side to move is checkmated.
    pub fn is_fifty_move_draw(&self) -> bool {
        if self.fifty_move_counter() < 100 {
            return false;
        }
        !self.is_in_check() || self.has_legal_moves()
    }

    /// True when the current key already occurred since the last
    /// irreversible move or null move.
    pub fn is_repetition(&self) -> bool {
        let state = self.state();
        let window = state.fifty_move_counter.min(state.plies_from_null) as usize;
        let mut plies_back = 4;
        while plies_back <= window {
            match self.previous_state(plies_back) {
                Some(earlier) if earlier.key == state.key => return true,
                Some(_) => plies_back += 2,
                None => break,
            }
        }
        false
    }

    /// Bare kings, or a single minor piece against a bare king.
    pub fn has_insufficient_material(&self) -> bool {
        let heavy_or_pawn = Color::ALL.iter().any(|&color| {
            (self.pieces_of(color, PieceKind::Pawn)
                | self.pieces_of(color, PieceKind::Rook)
                | self.pieces_of(color, PieceKind::Queen))
            .is_not_empty()
        });
        if heavy_or_pawn {
            return false;
        }
        let minors: u32 = Color::ALL
            .iter()
            .map(|&color| {
                (self.pieces_of(color, PieceKind::Bishop) | self.pieces_of(color, PieceKind::Knight))
                    .bit_count()
            })
            .sum();
        minors <= 1
    }

    /// True when the side to move has at least one legal move.
    pub fn has_legal_moves(&self) -> bool {
        let mut list = MoveList::new();
        generate_moves(self, GenerationMode::AllMoves, &mut list);
        !list.is_empty()
    }
}

/// Material contribution of `piece`, positive for white.
#[inline]
pub(crate) fn signed_piece_value(piece: Piece) -> Score {
    let value = piece_value(piece.kind());
    match piece.color() {
        Color::White => value,
        Color::Black => -value,
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::chess_errors::ConsistencyError;
    use crate::game_state::chess_types::{Color, Piece, PieceKind, Score, Square};
    use crate::moves::chess_move::Move;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn uncapturable_en_passant_from_fen_is_kept_but_changes_the_key() {
        let mut played = Position::new_game();
        played.make_move(Move::normal(Square::E2, Square::E4));
        assert_eq!(played.en_passant_square(), None);

        let written = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = Position::from_fen(written).expect("FEN should parse");
        assert_eq!(parsed.en_passant_square(), Some(Square::E3));
        assert_eq!(parsed.to_fen(), written);
        assert_ne!(parsed.key(), played.key());

        let cleared = Position::from_fen(&played.to_fen()).expect("FEN should parse");
        assert_eq!(cleared.key(), played.key());
    }

    #[test]
    #[test]
    fn mutators_are_exact_inverses() {
        let original = Position::new_game();
        let mut pos = original.clone();
        pos.remove_piece(Piece::WhiteKnight, Square::G1);
        pos.add_piece(Piece::WhiteKnight, Square::F3);
        assert_eq!(pos.piece_on(Square::G1), Piece::Empty);
        assert!(pos.bitboard_for(Color::White).is_set(Square::F3));
        pos.move_piece(Piece::WhiteKnight, Square::F3, Square::G1);

        for slot in 0..Piece::SLOTS {
            let slot = Piece::from_index(slot);
            assert_eq!(pos.bitboard_of(slot), original.bitboard_of(slot), "{slot:?}");
        }
        assert_eq!(pos.to_fen(), original.to_fen());
        pos.check_consistency().expect("board views agree again");
    }

    #[test]
    fn consistency_check_spots_stale_keys() {
        let mut pos = Position::new_game();
        pos.remove_piece(Piece::BlackPawn, Square::A7);
        assert_eq!(pos.check_consistency(), Err(ConsistencyError::KeyMismatch));
    }

    #[test]
    fn queries_on_the_start_position() {
        let pos = Position::new_game();
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(pos.piece_count(Piece::BlackPawn), 8);
        assert_eq!(pos.pieces_of(Color::White, PieceKind::Rook).bit_count(), 2);
        assert_eq!(pos.our_pieces(), pos.bitboard_for(Color::White));
        assert_eq!(pos.their_pieces(), pos.bitboard_for(Color::Black));
        assert_eq!(pos.material(), Score::ZERO);
        assert_eq!(
            pos.non_pawn_material(Color::White),
            pos.non_pawn_material(Color::Black)
        );
        assert_ne!(pos.exclusion_key(), pos.key());
        assert_eq!(pos.history_len(), 1);
        assert!(pos.previous_state(1).is_none());
    }

    #[test]
    fn knight_shuffle_repeats() {
        let mut pos = Position::new_game();
        for (from, to) in [
            (Square::G1, Square::F3),
            (Square::G8, Square::F6),
            (Square::F3, Square::G1),
        ] {
            pos.make_move(Move::normal(from, to));
            assert!(!pos.is_repetition());
        }
        pos.make_move(Move::normal(Square::F6, Square::G8));
        assert!(pos.is_repetition());
        assert_eq!(pos.history_len(), 5);
        assert_eq!(
            pos.previous_state(4).map(|state| state.key),
            Some(Position::new_game().key())
        );

        // A null move cuts the repetition window.
        pos.unmake_move();
        pos.make_null_move();
        assert!(!pos.is_repetition());
    }

    #[test]
    fn fifty_move_rule_yields_to_checkmate() {
        let mut pos = position("4k3/8/8/8/8/8/8/4K2R w - - 99 80");
        assert!(!pos.is_fifty_move_draw());
        pos.make_move(Move::normal(Square::H1, Square::H2));
        assert!(pos.is_fifty_move_draw());

        let mated = position("7k/6Q1/6K1/8/8/8/8/8 b - - 100 80");
        assert!(mated.is_in_check());
        assert!(!mated.has_legal_moves());
        assert!(!mated.is_fifty_move_draw());
    }

    #[test]
    fn insufficient_material() {
        assert!(position("4k3/8/8/8/8/8/8/4K3 w - - 0 1").has_insufficient_material());
        assert!(position("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").has_insufficient_material());
        assert!(!position("4k1n1/8/8/8/8/8/8/4KB2 w - - 0 1").has_insufficient_material());
        assert!(!position("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").has_insufficient_material());
        assert!(!position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").has_insufficient_material());
    }
}
