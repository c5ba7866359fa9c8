//! Coordinate move text (`e2e4`, `e7e8q`, castling as `e1g1`).

use crate::chess_errors::MoveTextError;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::{Move, PromotionKind};
use crate::utils::algebraic::algebraic_to_square;

/// Find the legal move of `position` written as `text`.
pub fn parse_move_text(position: &Position, text: &str) -> Result<Move, MoveTextError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return Err(MoveTextError::Length(text.to_owned()));
    }

    let from_text: String = chars[0..2].iter().collect();
    let to_text: String = chars[2..4].iter().collect();
    let from = algebraic_to_square(&from_text).ok_or(MoveTextError::Square(from_text))?;
    let to = algebraic_to_square(&to_text).ok_or(MoveTextError::Square(to_text))?;
    let promotion = match chars.get(4) {
        Some(&ch) => Some(PromotionKind::from_char(ch).ok_or(MoveTextError::Promotion(ch))?),
        None => None,
    };

    LegalMoveGenerator
        .generate_legal_moves(position)
        .iter()
        .find(|mv| {
            mv.from() == from
                && mv.to() == to
                && match promotion {
                    Some(kind) => mv.is_promotion_move() && mv.promotion_kind() == kind,
                    None => !mv.is_promotion_move(),
                }
        })
        .ok_or_else(|| MoveTextError::NotLegal(text.to_owned()))
}

/// Render a sequence of moves as space-separated coordinate text.
pub fn moves_to_text(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| mv.to_coordinate_text())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{moves_to_text, parse_move_text};
    use crate::chess_errors::MoveTextError;
    use crate::game_state::chess_types::Square;
    use crate::game_state::position::Position;
    use crate::moves::chess_move::{Move, PromotionKind};

    #[test]
    fn finds_special_moves_by_text() {
        let pos = Position::from_fen("r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1")
            .expect("test FEN should parse");
        assert_eq!(
            parse_move_text(&pos, "e1g1"),
            Ok(Move::castle(Square::E1, Square::G1))
        );
        assert_eq!(
            parse_move_text(&pos, "e5d6"),
            Ok(Move::en_passant(Square::E5, Square::D6))
        );
        assert_eq!(
            parse_move_text(&pos, "b7a8n"),
            Ok(Move::promotion(Square::B7, Square::A8, PromotionKind::Knight))
        );
    }

    #[test]
    fn rejects_bad_text() {
        let pos = Position::new_game();
        assert_eq!(
            parse_move_text(&pos, "e2"),
            Err(MoveTextError::Length("e2".to_owned()))
        );
        assert_eq!(
            parse_move_text(&pos, "z2e4"),
            Err(MoveTextError::Square("z2".to_owned()))
        );
        assert_eq!(
            parse_move_text(&pos, "e2e4k"),
            Err(MoveTextError::Promotion('k'))
        );
        assert_eq!(
            parse_move_text(&pos, "e2e5"),
            Err(MoveTextError::NotLegal("e2e5".to_owned()))
        );
        assert_eq!(
            parse_move_text(&pos, "e2e4q"),
            Err(MoveTextError::NotLegal("e2e4q".to_owned()))
        );
    }

    #[test]
    fn text_round_trips_through_a_game() {
        let mut pos = Position::new_game();
        let line = "e2e4 c7c5 g1f3 d7d6 f1b5 c8d7 e1g1";
        let mut played = Vec::new();
        for text in line.split(' ') {
            let mv = parse_move_text(&pos, text).expect("line is legal");
            pos.make_move(mv);
            played.push(mv);
        }
        assert_eq!(moves_to_text(&played), line);
        assert!(played.last().is_some_and(|mv| mv.is_castle_move()));
    }
}
