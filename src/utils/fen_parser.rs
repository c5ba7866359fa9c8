//! FEN-to-Position parser.
//!
//! Builds the board through the regular placement mutators, fills the root
//! snapshot from the text fields and then derives keys, material and check
//! information from scratch. Positions that could not arise in a game of
//! chess (missing kings, pawns on a back rank, a castling right without its
//! king and rook, the side not to move in check) are rejected.

use crate::bitboard::bitboard::BitBoard;
use crate::chess_errors::FenError;
use crate::game_state::chess_rules::{castling_squares, MAX_FULLMOVE_NUMBER, MAX_HALFMOVE_CLOCK};
use crate::game_state::chess_types::{
    CastlingRights, Color, File, Piece, PieceKind, Rank, Square,
};
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    parse_fields(fen).inspect_err(|err| log::debug!("rejected FEN {fen:?}: {err}"))
}

fn parse_fields(fen: &str) -> Result<Position, FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    // The clocks are optional; many tools emit four-field FENs.
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut position = Position::empty();
    parse_board(board_part, &mut position)?;
    validate_placement(&position)?;

    let side = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part, &position)?;
    let en_passant_square = parse_en_passant_square(en_passant_part, &position, side)?;
    let halfmove = parse_counter(halfmove_part, "halfmove clock", 0, MAX_HALFMOVE_CLOCK)?;
    // A fullmove number of 0 is a common slip for 1.
    let fullmove = parse_counter(fullmove_part, "fullmove number", 1, MAX_FULLMOVE_NUMBER)?.max(1);

    let state = position.state_mut();
    state.turn = side;
    state.castling_rights = castling_rights;
    state.en_passant_square = en_passant_square;
    state.fifty_move_counter = halfmove;
    state.plies_from_null = 0;
    state.ply = 2 * (fullmove - 1) + u32::from(side == Color::Black);
    position.refresh_derived_state();

    let them = side.opposite();
    if position.is_square_attacked(position.king_square(them), side) {
        return Err(FenError::OpponentInCheck);
    }

    debug_assert!(position.check_consistency().is_ok());
    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (rank, rank_str) in Rank::ALL.iter().rev().zip(ranks) {
        let width_error = FenError::RankWidth {
            rank: rank.index() + 1,
        };
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(step) = ch.to_digit(10).filter(|step| (1..=8).contains(step)) {
                file += step as usize;
                if file > 8 {
                    return Err(width_error);
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(FenError::PieceChar(ch))?;
            let file_enum = File::from_index(file).ok_or_else(|| width_error.clone())?;
            position.add_piece(piece, Square::from_file_rank(file_enum, *rank));
            file += 1;
        }

        if file != 8 {
            return Err(width_error);
        }
    }

    Ok(())
}

fn validate_placement(position: &Position) -> Result<(), FenError> {
    for color in Color::ALL {
        let kings = position.pieces_of(color, PieceKind::King).bit_count();
        if kings != 1 {
            return Err(FenError::KingCount(color, kings));
        }
    }

    let pawns = position.pieces_of(Color::White, PieceKind::Pawn)
        | position.pieces_of(Color::Black, PieceKind::Pawn);
    let misplaced = pawns & (BitBoard::RANK_1 | BitBoard::RANK_8);
    if misplaced.is_not_empty() {
        return Err(FenError::PawnOnBackRank(misplaced.first_one()));
    }
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str, position: &Position) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        let (color, king_side) = match ch {
            'K' => (Color::White, true),
            'Q' => (Color::White, false),
            'k' => (Color::Black, true),
            'q' => (Color::Black, false),
            _ => return Err(FenError::CastlingRights(castling_part.to_owned())),
        };
        let squares = castling_squares(color, king_side);
        if rights.contains(squares.right) {
            return Err(FenError::CastlingRights(castling_part.to_owned()));
        }
        if position.piece_on(squares.king_from) != Piece::new(color, PieceKind::King)
            || position.piece_on(squares.rook_from) != Piece::new(color, PieceKind::Rook)
        {
            return Err(FenError::CastlingWithoutPieces(ch));
        }
        rights = rights.union(squares.right);
    }

    Ok(rights)
}

/// The target square must lie behind an enemy pawn that could just have made
/// a double push.
fn parse_en_passant_square(
    en_passant_part: &str,
    position: &Position,
    side: Color,
) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let invalid = || FenError::EnPassant(en_passant_part.to_owned());
    let square = algebraic_to_square(en_passant_part).ok_or_else(invalid)?;
    if square.relative_rank(side) != Rank::R6 || position.piece_on(square) != Piece::Empty {
        return Err(invalid());
    }
    let pushed = square.offset(-side.pawn_push());
    if position.piece_on(pushed) != Piece::new(side.opposite(), PieceKind::Pawn) {
        return Err(invalid());
    }
    Ok(Some(square))
}

/// Counters above `max` are rejected so later make/unmake arithmetic on the
/// clocks cannot overflow.
fn parse_counter(
    part: Option<&str>,
    field: &'static str,
    default: u32,
    max: u32,
) -> Result<u32, FenError> {
    let Some(text) = part else {
        return Ok(default);
    };
    text.parse::<u32>()
        .ok()
        .filter(|value| *value <= max)
        .ok_or_else(|| FenError::Counter {
            field,
            value: text.to_owned(),
        })
}
