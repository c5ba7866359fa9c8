//! Terminal-oriented Unicode board renderer for debugging and diagnostics.

use crate::game_state::chess_types::{Color, File, Piece, PieceKind, Rank, Square};
use crate::game_state::position::Position;

/// Render the board, White at the bottom, followed by the FEN and the
/// position key.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in Rank::ALL.iter().rev() {
        out.push(rank.to_char());
        out.push(' ');

        for file in File::ALL {
            let piece = position.piece_on(Square::from_file_rank(file, *rank));
            out.push(piece_to_unicode(piece).unwrap_or('·'));
            out.push(' ');
        }

        out.push(rank.to_char());
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    out.push_str(&format!("fen: {}\n", position.to_fen()));
    out.push_str(&format!("key: {}", position.key()));

    out
}

fn piece_to_unicode(piece: Piece) -> Option<char> {
    if !piece.is_real() {
        return None;
    }
    Some(match (piece.color(), piece.kind()) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    })
}
