//! Packed 16-bit move representation.
//!
//! Layout: bits 0-5 from-square, bits 6-11 to-square, bits 12-13 promotion
//! kind, bits 14-15 flag. Equality is on the packed bits. The all-zero value
//! is the distinguished "no move". Castling is encoded as the king's own
//! from/to squares.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const PROMOTION_SHIFT: u16 = 12;
const FLAG_SHIFT: u16 = 14;

const SQUARE_MASK: u16 = 0x3F;
const TWO_BIT_MASK: u16 = 0x3;

/// Special-move flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castle = 3,
}

impl MoveFlag {
    pub const ALL: [MoveFlag; 4] = [
        MoveFlag::Normal,
        MoveFlag::Promotion,
        MoveFlag::EnPassant,
        MoveFlag::Castle,
    ];

    #[inline]
    const fn from_bits(bits: u16) -> MoveFlag {
        match bits & TWO_BIT_MASK {
            0 => MoveFlag::Normal,
            1 => MoveFlag::Promotion,
            2 => MoveFlag::EnPassant,
            _ => MoveFlag::Castle,
        }
    }
}

/// Piece a pawn promotes to. Only meaningful with `MoveFlag::Promotion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionKind {
    Queen = 0,
    Rook = 1,
    Bishop = 2,
    Knight = 3,
}

impl PromotionKind {
    /// Most valuable first, which is also generation order.
    pub const ALL: [PromotionKind; 4] = [
        PromotionKind::Queen,
        PromotionKind::Rook,
        PromotionKind::Bishop,
        PromotionKind::Knight,
    ];

    #[inline]
    const fn from_bits(bits: u16) -> PromotionKind {
        match bits & TWO_BIT_MASK {
            0 => PromotionKind::Queen,
            1 => PromotionKind::Rook,
            2 => PromotionKind::Bishop,
            _ => PromotionKind::Knight,
        }
    }

    #[inline]
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            PromotionKind::Queen => PieceKind::Queen,
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Knight => PieceKind::Knight,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PromotionKind::Queen => 'q',
            PromotionKind::Rook => 'r',
            PromotionKind::Bishop => 'b',
            PromotionKind::Knight => 'n',
        }
    }

    pub fn from_char(ch: char) -> Option<PromotionKind> {
        match ch.to_ascii_lowercase() {
            'q' => Some(PromotionKind::Queen),
            'r' => Some(PromotionKind::Rook),
            'b' => Some(PromotionKind::Bishop),
            'n' => Some(PromotionKind::Knight),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    pub const NONE: Move = Move(0);

    /// Full constructor. Pass `PromotionKind::Queen` (all-zero bits) for
    /// non-promotion moves so equal moves pack identically.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag, promotion: PromotionKind) -> Move {
        Move(
            ((from.raw() as u16) << FROM_SHIFT)
                | ((to.raw() as u16) << TO_SHIFT)
                | ((promotion as u16) << PROMOTION_SHIFT)
                | ((flag as u16) << FLAG_SHIFT),
        )
    }

    #[inline]
    pub const fn normal(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveFlag::Normal, PromotionKind::Queen)
    }

    #[inline]
    pub const fn promotion(from: Square, to: Square, kind: PromotionKind) -> Move {
        Move::new(from, to, MoveFlag::Promotion, kind)
    }

    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move::new(from, to, MoveFlag::EnPassant, PromotionKind::Queen)
    }

    #[inline]
    pub const fn castle(king_from: Square, king_to: Square) -> Move {
        Move::new(king_from, king_to, MoveFlag::Castle, PromotionKind::Queen)
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::new(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::new(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits(self.0 >> FLAG_SHIFT)
    }

    #[inline]
    pub const fn promotion_kind(self) -> PromotionKind {
        PromotionKind::from_bits(self.0 >> PROMOTION_SHIFT)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_promotion_move(self) -> bool {
        matches!(self.flag(), MoveFlag::Promotion)
    }

    #[inline]
    pub const fn is_castle_move(self) -> bool {
        matches!(self.flag(), MoveFlag::Castle)
    }

    #[inline]
    pub const fn is_en_passant_move(self) -> bool {
        matches!(self.flag(), MoveFlag::EnPassant)
    }

    /// Coordinate text: `e2e4`, `e7e8q`, or `0000` for the null move.
    pub fn to_coordinate_text(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if self.is_promotion_move() {
            write!(f, "{}", self.promotion_kind().to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.flag())
    }
}

/// A move with an ordering score attached for the move selector.
///
/// The score never takes part in equality: two scored moves are equal when
/// their moves are. Order by `score` explicitly where ranking is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

impl ScoredMove {
    #[inline]
    pub const fn new(mv: Move, score: i32) -> ScoredMove {
        ScoredMove { mv, score }
    }
}

impl PartialEq for ScoredMove {
    #[inline]
    fn eq(&self, other: &ScoredMove) -> bool {
        self.mv == other.mv
    }
}

impl Eq for ScoredMove {}

impl PartialEq<Move> for ScoredMove {
    #[inline]
    fn eq(&self, other: &Move) -> bool {
        self.mv == *other
    }
}

impl std::hash::Hash for ScoredMove {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.mv.hash(state);
    }
}

impl From<Move> for ScoredMove {
    #[inline]
    fn from(mv: Move) -> ScoredMove {
        ScoredMove::new(mv, 0)
    }
}
