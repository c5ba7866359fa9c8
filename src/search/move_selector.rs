//! Staged move selection for search.
//!
//! A `MoveSelector` hands out the legal moves of one node lazily: the hash
//! move first (after validating it against the position), then captures in
//! MVV/LVA order, then quiet moves. Later stages are generated only if the
//! earlier ones did not cause a cutoff. The selector does not borrow the
//! position, so search can make and unmake moves between calls; every call
//! must pass the same, unchanged node.

use crate::game_state::chess_rules::piece_value;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::generate_moves;
use crate::move_generation::move_generator::{GenerationMode, MoveList};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    MainHash,
    GenerateCaptures,
    Captures,
    GenerateQuiets,
    Quiets,

    EvasionHash,
    GenerateEvasionCaptures,
    EvasionCaptures,
    GenerateEvasionQuiets,
    EvasionQuiets,

    QuiescenceHash,
    GenerateQuiescenceCaptures,
    QuiescenceCaptures,
    GenerateQuietChecks,
    QuietChecks,

    Done,
}

pub struct MoveSelector {
    stage: Stage,
    hash_move: Move,
    with_checks: bool,
    moves: MoveList,
    cursor: usize,
}

impl MoveSelector {
    /// Selector for a full-width search node.
    pub fn new(position: &Position, hash_move: Move) -> Self {
        let hash_move = if position.is_move_legal(hash_move) {
            hash_move
        } else {
            Move::NONE
        };
        let stage = if position.is_in_check() {
            Stage::EvasionHash
        } else {
            Stage::MainHash
        };
        Self::starting_at(stage, hash_move, false)
    }

    /// Selector for a quiescence node: captures and promotions only, followed
    /// by quiet checking moves when `with_checks` is set. In check it yields
    /// every evasion.
    pub fn new_quiescence(position: &Position, hash_move: Move, with_checks: bool) -> Self {
        if position.is_in_check() {
            return Self::new(position, hash_move);
        }
        let usable = position.is_move_legal(hash_move)
            && (position.is_capture_or_promotion(hash_move)
                || (with_checks && position.gives_check(hash_move)));
        let hash_move = if usable { hash_move } else { Move::NONE };
        Self::starting_at(Stage::QuiescenceHash, hash_move, with_checks)
    }

    fn starting_at(stage: Stage, hash_move: Move, with_checks: bool) -> Self {
        Self {
            stage,
            hash_move,
            with_checks,
            moves: MoveList::new(),
            cursor: 0,
        }
    }

    /// Next move to search, `Move::NONE` once the node is exhausted.
    pub fn next_move(&mut self, position: &Position) -> Move {
        loop {
            match self.stage {
                Stage::MainHash | Stage::EvasionHash | Stage::QuiescenceHash => {
                    self.advance();
                    if !self.hash_move.is_none() {
                        return self.hash_move;
                    }
                }
                Stage::GenerateCaptures => self.generate(position, GenerationMode::Captures, true),
                Stage::GenerateQuiets => self.generate(position, GenerationMode::Quiets, false),
                Stage::GenerateEvasionCaptures => {
                    self.generate(position, GenerationMode::CaptureEvasions, true)
                }
                Stage::GenerateEvasionQuiets => {
                    self.generate(position, GenerationMode::QuietEvasions, false)
                }
                Stage::GenerateQuiescenceCaptures => {
                    self.generate(position, GenerationMode::Captures, true)
                }
                Stage::GenerateQuietChecks => {
                    self.generate(position, GenerationMode::QuietChecks, false)
                }
                Stage::Captures | Stage::EvasionCaptures | Stage::QuiescenceCaptures => {
                    match self.pick_best() {
                        Some(mv) if mv == self.hash_move => {}
                        Some(mv) => return mv,
                        None => self.advance(),
                    }
                }
                Stage::Quiets | Stage::EvasionQuiets | Stage::QuietChecks => {
                    match self.pick_next() {
                        Some(mv) if mv == self.hash_move => {}
                        Some(mv) => return mv,
                        None => self.advance(),
                    }
                }
                Stage::Done => return Move::NONE,
            }
        }
    }

    fn advance(&mut self) {
        let next = match self.stage {
            Stage::MainHash => Stage::GenerateCaptures,
            Stage::GenerateCaptures => Stage::Captures,
            Stage::Captures => Stage::GenerateQuiets,
            Stage::GenerateQuiets => Stage::Quiets,
            Stage::Quiets => Stage::Done,

            Stage::EvasionHash => Stage::GenerateEvasionCaptures,
            Stage::GenerateEvasionCaptures => Stage::EvasionCaptures,
            Stage::EvasionCaptures => Stage::GenerateEvasionQuiets,
            Stage::GenerateEvasionQuiets => Stage::EvasionQuiets,
            Stage::EvasionQuiets => Stage::Done,

            Stage::QuiescenceHash => Stage::GenerateQuiescenceCaptures,
            Stage::GenerateQuiescenceCaptures => Stage::QuiescenceCaptures,
            Stage::QuiescenceCaptures if self.with_checks => Stage::GenerateQuietChecks,
            Stage::QuiescenceCaptures => Stage::Done,
            Stage::GenerateQuietChecks => Stage::QuietChecks,
            Stage::QuietChecks => Stage::Done,

            Stage::Done => Stage::Done,
        };
        log::trace!("move selector stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    fn generate(&mut self, position: &Position, mode: GenerationMode, score_captures: bool) {
        self.moves.clear();
        self.cursor = 0;
        generate_moves(position, mode, &mut self.moves);
        if score_captures {
            for scored in self.moves.as_mut_slice() {
                scored.score = capture_order_score(position, scored.mv);
            }
        }
        self.advance();
    }

    /// Highest-scored remaining move; ties keep generation order.
    fn pick_best(&mut self) -> Option<Move> {
        let remaining = &mut self.moves.as_mut_slice()[self.cursor..];
        if remaining.is_empty() {
            return None;
        }
        let mut best = 0;
        for (index, scored) in remaining.iter().enumerate().skip(1) {
            if scored.score > remaining[best].score {
                best = index;
            }
        }
        let mv = remaining[best].mv;
        // Shift instead of swap so equal scores stay in generation order.
        remaining[..=best].rotate_right(1);
        self.cursor += 1;
        Some(mv)
    }

    fn pick_next(&mut self) -> Option<Move> {
        let mv = self.moves.as_slice().get(self.cursor)?.mv;
        self.cursor += 1;
        Some(mv)
    }
}

/// MVV/LVA: most valuable victim first, cheapest attacker among equals.
/// Promotions count the material they add.
fn capture_order_score(position: &Position, mv: Move) -> i32 {
    let captured = position.captured_piece(mv);
    let victim = if captured.is_real() {
        piece_value(captured.kind()).mg
    } else {
        0
    };
    let promotion_gain = if mv.is_promotion_move() {
        piece_value(mv.promotion_kind().piece_kind()).mg - piece_value(PieceKind::Pawn).mg
    } else {
        0
    };
    let attacker = piece_value(position.moved_piece(mv).kind()).mg;
    (victim + promotion_gain) * 16 - attacker
}
