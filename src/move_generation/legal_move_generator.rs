//! Staged legal move generation.
//!
//! Every generated move is legal: pins, king destinations, castling paths and
//! en-passant discoveries are resolved while generating, so no move is ever
//! made and taken back to test it. Moves come out in a fixed piece order
//! (king, queen, rook, bishop, knight, pawns, castling) for reproducibility.

use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::Targets;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::generate_piece_moves;
use crate::move_generation::move_generator::{GenerationMode, MoveGenerator, MoveList};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate(&self, position: &Position, mode: GenerationMode, out: &mut MoveList) {
        generate_moves(position, mode, out);
    }
}

/// Append the legal moves of `mode` for the side to move to `out`.
///
/// Non-evasion modes other than `AllMoves` require a position that is not in
/// check, evasion modes require one that is.
pub fn generate_moves(position: &Position, mode: GenerationMode, out: &mut MoveList) {
    match mode {
        GenerationMode::QuietChecks => {
            let start = out.len();
            generate_with_targets(position, &Targets::for_mode(position, mode), out);
            out.retain_from(start, |mv| position.gives_check(mv));
        }
        _ => generate_with_targets(position, &Targets::for_mode(position, mode), out),
    }
}

fn generate_with_targets(position: &Position, targets: &Targets, out: &mut MoveList) {
    generate_king_moves(position, targets, out);

    // Only the king can answer a double check.
    if position.checkers().more_than_one_bit() {
        return;
    }

    for kind in [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
        generate_piece_moves(position, kind, targets, out);
    }
    generate_pawn_moves(position, targets, out);

    if targets.castling {
        generate_castling_moves(position, out);
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_moves, LegalMoveGenerator};
    use crate::game_state::chess_types::Square;
    use crate::game_state::position::Position;
    use crate::move_generation::move_generator::{GenerationMode, MoveGenerator, MoveList};
    use crate::moves::chess_move::Move;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    const SAMPLE_FENS: [&str; 8] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        KIWIPETE,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1",
        "4k3/8/8/8/8/5n2/8/4K2r w - - 0 1",
    ];

    fn collect(pos: &Position, mode: GenerationMode) -> Vec<Move> {
        let mut out = MoveList::new();
        generate_moves(pos, mode, &mut out);
        out.iter().collect()
    }

    fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
        moves.sort_by_key(|mv| mv.raw());
        moves
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let pos = Position::new_game();
        let moves = LegalMoveGenerator.generate_legal_moves(&pos);
        assert_eq!(moves.len(), 20);
        assert!(collect(&pos, GenerationMode::Captures).is_empty());
        assert_eq!(collect(&pos, GenerationMode::Quiets).len(), 20);
    }

    #[test]
    fn generated_moves_match_the_legality_predicate() {
        for fen in SAMPLE_FENS {
            let pos = Position::from_fen(fen).expect("test FEN should parse");
            let generated = sorted(collect(&pos, GenerationMode::AllMoves));
            let mut no_duplicates = generated.clone();
            no_duplicates.dedup();
            assert_eq!(no_duplicates.len(), generated.len(), "duplicates in {fen}");

            let predicate: Vec<Move> = (0..=u16::MAX)
                .map(Move::from_raw)
                .filter(|&mv| pos.is_move_legal(mv))
                .collect();
            assert_eq!(generated, sorted(predicate), "mismatch in {fen}");
        }
    }

    #[test]
    fn capture_and_quiet_modes_partition_all_moves() {
        for fen in SAMPLE_FENS {
            let pos = Position::from_fen(fen).expect("test FEN should parse");
            let (captures, quiets) = if pos.is_in_check() {
                (GenerationMode::CaptureEvasions, GenerationMode::QuietEvasions)
            } else {
                (GenerationMode::Captures, GenerationMode::Quiets)
            };
            let captures = collect(&pos, captures);
            let quiets = collect(&pos, quiets);
            assert!(captures.iter().all(|&mv| pos.is_capture_or_promotion(mv)));
            assert!(quiets.iter().all(|&mv| !pos.is_capture_or_promotion(mv)));

            let mut union = captures;
            union.extend(quiets);
            assert_eq!(
                sorted(union),
                sorted(collect(&pos, GenerationMode::AllMoves)),
                "partition mismatch in {fen}"
            );
        }
    }

    #[test]
    fn quiet_checks_are_the_checking_quiets() {
        for fen in [KIWIPETE, SAMPLE_FENS[5], SAMPLE_FENS[2]] {
            let pos = Position::from_fen(fen).expect("test FEN should parse");
            let expected: Vec<Move> = collect(&pos, GenerationMode::Quiets)
                .into_iter()
                .filter(|&mv| pos.gives_check(mv))
                .collect();
            assert_eq!(collect(&pos, GenerationMode::QuietChecks), expected);
        }
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let pos = Position::from_fen(SAMPLE_FENS[7]).expect("test FEN should parse");
        assert!(pos.checkers().more_than_one_bit());
        let moves = collect(&pos, GenerationMode::AllMoves);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.from() == Square::E1));
    }

    #[test]
    fn generation_order_is_by_piece() {
        let pos = Position::from_fen(KIWIPETE).expect("test FEN should parse");
        let moves = collect(&pos, GenerationMode::AllMoves);
        assert_eq!(moves.len(), 48);
        assert_eq!(pos.moved_piece(moves[0]).kind(), crate::game_state::chess_types::PieceKind::King);
        assert!(moves.last().is_some_and(|mv| mv.is_castle_move()));
    }
}
