//! Perft: exhaustive move-tree node counts, the correctness oracle for move
//! generation and make/unmake.

use std::thread;

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::position::Position;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::Move;

/// Leaf statistics of a perft run. Every field except `nodes` classifies the
/// moves played at the last ply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub discovery_checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.discovery_checks += rhs.discovery_checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf nodes `depth` plies below `position`.
///
/// The last ply is bulk-counted from the generated list without making the
/// moves. The position is restored before returning.
pub fn perft<G: MoveGenerator>(generator: &G, position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generator.generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves.iter() {
        position.make_move(mv);
        nodes += perft(generator, position, depth - 1);
        position.unmake_move();
    }
    nodes
}

/// Perft with leaf classification. Slower than `perft`: every leaf move is
/// made to inspect the resulting checkers.
pub fn perft_counts<G: MoveGenerator>(generator: &G, position: &mut Position, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
    } else {
        count_leaves(generator, position, depth, &mut counts);
    }
    counts
}

/// Node counts below each root move, in generation order.
pub fn perft_divide<G: MoveGenerator>(generator: &G, position: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    debug_assert!(depth >= 1, "perft_divide needs at least one ply");

    let moves = generator.generate_legal_moves(position);
    let mut result = Vec::with_capacity(moves.len());
    for mv in moves.iter() {
        position.make_move(mv);
        let nodes = perft(generator, position, depth.saturating_sub(1));
        position.unmake_move();
        log::info!("{mv}: {nodes}");
        result.push((mv, nodes));
    }
    result
}

/// `perft` with one worker thread per root move, each on its own copy of the
/// position.
pub fn perft_multi_threaded<G: MoveGenerator + Sync>(generator: &G, position: &Position, depth: u8) -> u64 {
    if depth <= 1 {
        return perft(generator, &mut position.clone(), depth);
    }

    let moves = generator.generate_legal_moves(position);
    thread::scope(|scope| {
        let handles: Vec<_> = moves
            .iter()
            .map(|mv| {
                let mut local = position.clone();
                scope.spawn(move || {
                    local.make_move(mv);
                    perft(generator, &mut local, depth - 1)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .sum()
    })
}

fn count_leaves<G: MoveGenerator>(generator: &G, position: &mut Position, depth: u8, counts: &mut PerftCounts) {
    let moves = generator.generate_legal_moves(position);
    for mv in moves.iter() {
        if depth == 1 {
            record_leaf(generator, position, mv, counts);
        } else {
            position.make_move(mv);
            count_leaves(generator, position, depth - 1, counts);
            position.unmake_move();
        }
    }
}

fn record_leaf<G: MoveGenerator>(generator: &G, position: &mut Position, mv: Move, counts: &mut PerftCounts) {
    let mut leaf = PerftCounts {
        nodes: 1,
        ..PerftCounts::default()
    };
    if position.is_capture(mv) {
        leaf.captures = 1;
    }
    if mv.is_en_passant_move() {
        leaf.en_passant = 1;
    }
    if mv.is_castle_move() {
        leaf.castles = 1;
    }
    if mv.is_promotion_move() {
        leaf.promotions = 1;
    }
    let gives_check = position.gives_check(mv);

    position.make_move(mv);
    let checkers = position.checkers();
    debug_assert_eq!(gives_check, checkers.is_not_empty(), "gives_check disagrees for {mv}");
    if checkers.is_not_empty() {
        leaf.checks = 1;
        if !mv.is_castle_move() && (checkers & !BitBoard::from_square(mv.to())).is_not_empty() {
            leaf.discovery_checks = 1;
        }
        if checkers.more_than_one_bit() {
            leaf.double_checks = 1;
        }
        if generator.generate_legal_moves(position).is_empty() {
            leaf.checkmates = 1;
        }
    }
    position.unmake_move();

    counts.merge(leaf);
}

#[cfg(test)]
mod tests {
    use super::{perft, perft_counts, perft_divide, perft_multi_threaded, PerftCounts};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    const POSITION_6: &str =
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("test FEN should parse")
    }

    fn assert_perft(fen: &str, expected: &[u64]) {
        let mut pos = position(fen);
        let before = pos.to_fen();
        for (depth, &nodes) in expected.iter().enumerate() {
            let depth = depth as u8 + 1;
            assert_eq!(
                perft(&LegalMoveGenerator, &mut pos, depth),
                nodes,
                "perft({depth}) of {fen}"
            );
        }
        assert_eq!(pos.to_fen(), before);
    }

    #[test]
    fn depth_zero_is_a_single_node() {
        let mut pos = Position::new_game();
        assert_eq!(perft(&LegalMoveGenerator, &mut pos, 0), 1);
        assert_eq!(
            perft_counts(&LegalMoveGenerator, &mut pos, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position() {
        assert_perft(START, &[20, 400, 8_902, 197_281]);
    }

    #[test]
    fn kiwipete() {
        assert_perft(KIWIPETE, &[48, 2_039, 97_862]);
    }

    #[test]
    fn rook_and_pawn_endgame() {
        assert_perft(POSITION_3, &[14, 191, 2_812, 43_238]);
    }

    #[test]
    fn promotions_and_pins_for_black() {
        assert_perft(POSITION_4, &[6, 264, 9_467]);
    }

    #[test]
    fn promotion_by_capture_with_castling() {
        assert_perft(POSITION_5, &[44, 1_486, 62_379]);
    }

    #[test]
    fn symmetric_middlegame() {
        assert_perft(POSITION_6, &[46, 2_079, 89_890]);
    }

    #[test]
    fn leaf_statistics_of_the_start_position() {
        let mut pos = position(START);
        let counts = perft_counts(&LegalMoveGenerator, &mut pos, 3);
        assert_eq!(counts.nodes, 8_902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);

        let counts = perft_counts(&LegalMoveGenerator, &mut pos, 4);
        assert_eq!(counts.nodes, 197_281);
        assert_eq!(counts.captures, 1_576);
        assert_eq!(counts.en_passant, 0);
        assert_eq!(counts.castles, 0);
        assert_eq!(counts.checks, 469);
        assert_eq!(counts.checkmates, 8);
    }

    #[test]
    fn leaf_statistics_of_kiwipete() {
        let mut pos = position(KIWIPETE);
        let counts = perft_counts(&LegalMoveGenerator, &mut pos, 2);
        assert_eq!(counts.nodes, 2_039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.promotions, 0);
        assert_eq!(counts.checks, 3);
        assert_eq!(counts.checkmates, 0);

        let counts = perft_counts(&LegalMoveGenerator, &mut pos, 3);
        assert_eq!(counts.nodes, 97_862);
        assert_eq!(counts.captures, 17_102);
        assert_eq!(counts.en_passant, 45);
        assert_eq!(counts.castles, 3_162);
        assert_eq!(counts.promotions, 0);
        assert_eq!(counts.checks, 993);
        assert_eq!(counts.checkmates, 1);
    }

    #[test]
    fn leaf_statistics_of_the_endgame_positions() {
        let mut pos = position(POSITION_3);
        let counts = perft_counts(&LegalMoveGenerator, &mut pos, 4);
        assert_eq!(counts.nodes, 43_238);
        assert_eq!(counts.captures, 3_348);
        assert_eq!(counts.en_passant, 123);
        assert_eq!(counts.castles, 0);
        assert_eq!(counts.promotions, 0);
        assert_eq!(counts.checks, 1_680);
        assert_eq!(counts.checkmates, 17);

        let mut pos = position(POSITION_4);
        let counts = perft_counts(&LegalMoveGenerator, &mut pos, 3);
        assert_eq!(counts.nodes, 9_467);
        assert_eq!(counts.captures, 1_021);
        assert_eq!(counts.en_passant, 4);
        assert_eq!(counts.castles, 0);
        assert_eq!(counts.promotions, 120);
        assert_eq!(counts.checks, 38);
        assert_eq!(counts.checkmates, 22);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut pos = position(KIWIPETE);
        let divide = perft_divide(&LegalMoveGenerator, &mut pos, 2);
        assert_eq!(divide.len(), 48);
        assert_eq!(divide.iter().map(|(_, nodes)| nodes).sum::<u64>(), 2_039);
        let castle = divide
            .iter()
            .find(|(mv, _)| mv.to_coordinate_text() == "e1g1")
            .expect("kiwipete allows short castling");
        assert_eq!(castle.1, 43);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let pos = position(POSITION_5);
        assert_eq!(perft_multi_threaded(&LegalMoveGenerator, &pos, 3), 62_379);
        assert_eq!(perft_multi_threaded(&LegalMoveGenerator, &pos, 1), 44);
    }

    #[test]
    fn mirrored_positions_have_equal_trees() {
        for fen in [KIWIPETE, POSITION_3, POSITION_4, POSITION_5] {
            let mut pos = position(fen);
            let mut mirrored = position(&pos.to_symmetric_fen());
            assert_eq!(
                perft(&LegalMoveGenerator, &mut pos, 3),
                perft(&LegalMoveGenerator, &mut mirrored, 3),
                "mirror of {fen}"
            );
        }
    }

    /// Walk a tree asserting every node's incremental state against a full
    /// recomputation and that unmake restores the parent exactly.
    fn walk_consistent(pos: &mut Position, depth: u8) {
        pos.check_consistency().expect("incremental state should match recomputation");
        if depth == 0 {
            return;
        }
        let before = pos.state().clone();
        let fen = pos.to_fen();
        for mv in LegalMoveGenerator.generate_legal_moves(pos).iter() {
            let checks = pos.gives_check(mv);
            pos.make_move(mv);
            assert_eq!(pos.is_in_check(), checks, "gives_check disagrees for {mv}");
            walk_consistent(pos, depth - 1);
            pos.unmake_move();
            assert_eq!(pos.state(), &before, "state not restored after {mv}");
            assert_eq!(pos.to_fen(), fen);
        }
    }

    #[test]
    fn make_unmake_is_exact_over_perft_trees() {
        for fen in [START, KIWIPETE, POSITION_3, POSITION_4, POSITION_5, POSITION_6] {
            let mut pos = position(fen);
            walk_consistent(&mut pos, 3);
            assert_eq!(pos.to_fen(), fen);
        }
    }
}
