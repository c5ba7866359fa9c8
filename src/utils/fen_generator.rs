use crate::game_state::chess_types::{CastlingRights, Color, File, Piece, Rank, Square};
use crate::game_state::position::Position;

/// Render `position` as a six-field FEN string.
pub fn generate_fen(position: &Position) -> String {
    let board = generate_board_field(|file, rank| {
        position.piece_on(Square::from_file_rank(file, rank))
    });
    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move_field(position.side_to_move()),
        generate_castling_field(position.castling_rights()),
        generate_en_passant_field(position.en_passant_square()),
        position.fifty_move_counter(),
        position.state().fullmove_number()
    )
}

/// FEN of the color-swapped mirror image: ranks flipped, piece colors, side
/// to move, castling rights and en-passant square swapped to the other side.
/// The mirror has the same game tree as the original.
pub fn generate_mirrored_fen(position: &Position) -> String {
    let board = generate_board_field(|file, rank| {
        let piece = position.piece_on(Square::from_file_rank(file, rank).flip_rank());
        if piece.is_real() {
            piece.opposite()
        } else {
            piece
        }
    });
    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move_field(position.side_to_move().opposite()),
        generate_castling_field(position.castling_rights().swap_colors()),
        generate_en_passant_field(position.en_passant_square().map(Square::flip_rank)),
        position.fifty_move_counter(),
        position.state().fullmove_number()
    )
}

fn generate_board_field(piece_at: impl Fn(File, Rank) -> Piece) -> String {
    let mut out = String::new();

    for rank in Rank::ALL.iter().rev() {
        let mut empty_count = 0u8;

        for file in File::ALL {
            match piece_at(file, *rank).fen_char() {
                Some(ch) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(ch);
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if *rank != Rank::R1 {
            out.push('/');
        }
    }

    out
}

fn side_to_move_field(color: Color) -> &'static str {
    match color {
        Color::White => "w",
        Color::Black => "b",
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CastlingRights::WHITE_KING_SIDE, 'K'),
        (CastlingRights::WHITE_QUEEN_SIDE, 'Q'),
        (CastlingRights::BLACK_KING_SIDE, 'k'),
        (CastlingRights::BLACK_QUEEN_SIDE, 'q'),
    ]
    .into_iter()
    .filter(|(right, _)| rights.contains(*right))
    .map(|(_, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square.map_or_else(|| "-".to_owned(), |square| square.to_string())
}
