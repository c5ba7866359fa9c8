//! Core value types shared by every layer of the engine core.
//!
//! Squares, files, ranks and colors are tiny `Copy` types with fixed index
//! layouts so they can address precomputed tables directly. `Piece` is the
//! sixteen-slot board index used for both the square array and the bitboard
//! array of a `Position`.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Signed step of a single pawn push for this color.
    #[inline]
    pub const fn pawn_push(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }
}

/// Board file, `A` is the queen-side edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<File> {
        if index < 8 {
            Some(File::ALL[index])
        } else {
            None
        }
    }

    pub fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => File::from_index((ch as u8 - b'a') as usize),
            _ => None,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        char::from(b'a' + self as u8)
    }

    /// Files from `self` up to and including `last`.
    pub fn range_to(self, last: File) -> impl Iterator<Item = File> {
        (self.index()..=last.index()).map(|i| File::ALL[i])
    }
}

/// Board rank, `R1` is White's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Rank> {
        if index < 8 {
            Some(Rank::ALL[index])
        } else {
            None
        }
    }

    pub fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Rank::from_index((ch as u8 - b'1') as usize),
            _ => None,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        char::from(b'1' + self as u8)
    }

    /// The rank as seen from `color`'s side of the board.
    #[inline]
    pub const fn relative_to(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => Rank::ALL[7 - self as usize],
        }
    }

    /// Ranks from `self` up to and including `last`.
    pub fn range_to(self, last: Rank) -> impl Iterator<Item = Rank> {
        (self.index()..=last.index()).map(|i| Rank::ALL[i])
    }
}

/// Board square `0..64` (`file + 8 * rank`), or the `NONE` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

macro_rules! named_squares {
    ($($name:ident = $index:expr),* $(,)?) => {
        impl Square {
            $(pub const $name: Square = Square($index);)*
        }
    };
}

named_squares!(
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
);

impl Square {
    pub const NONE: Square = Square(64);
    pub const COUNT: usize = 64;

    #[inline]
    pub const fn new(index: u8) -> Square {
        debug_assert!(index < 64);
        Square(index)
    }

    #[inline]
    pub const fn from_file_rank(file: File, rank: Rank) -> Square {
        Square(file as u8 + 8 * rank as u8)
    }

    /// Build from signed coordinates, `None` when off the board.
    #[inline]
    pub const fn try_from_coords(file: i32, rank: i32) -> Option<Square> {
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square((file + 8 * rank) as u8))
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 < 64
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    /// Checkerboard color of the square; a1 is a dark square.
    #[inline]
    pub const fn color(self) -> Color {
        if ((self.0 & 7) + (self.0 >> 3)) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Square offset by `delta` index steps. The caller guarantees the result
    /// stays on the board.
    #[inline]
    pub const fn offset(self, delta: i8) -> Square {
        let target = self.0 as i16 + delta as i16;
        debug_assert!(target >= 0 && target < 64);
        Square(target as u8)
    }

    /// Vertical mirror (a1 <-> a8).
    #[inline]
    pub const fn flip_rank(self) -> Square {
        Square(self.0 ^ 56)
    }

    /// The square as seen from `color`'s side of the board.
    #[inline]
    pub const fn relative_to(self, color: Color) -> Square {
        match color {
            Color::White => self,
            Color::Black => self.flip_rank(),
        }
    }

    #[inline]
    pub const fn relative_rank(self, color: Color) -> Rank {
        self.rank().relative_to(color)
    }

    /// All 64 squares in increasing index order.
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("-");
        }
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}

/// Colorless piece kind, ordered from most to least valuable mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King = 1,
    Queen = 2,
    Rook = 3,
    Bishop = 4,
    Knight = 5,
    Pawn = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop)
    }

    pub fn fen_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        }
    }

    pub fn from_fen_char(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Sixteen-slot piece index addressing both the square array and the
/// bitboard array of a position.
///
/// Slot 0 doubles as "empty square" in the square array and "all occupied
/// squares" in the bitboard array. Slots 7 and 15 are the per-color
/// aggregates and slot 8 separates the two colors, so adding `SEPARATION`
/// to a white slot yields the matching black slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Empty = 0,
    WhiteKing = 1,
    WhiteQueen = 2,
    WhiteRook = 3,
    WhiteBishop = 4,
    WhiteKnight = 5,
    WhitePawn = 6,
    WhitePieces = 7,
    Separator = 8,
    BlackKing = 9,
    BlackQueen = 10,
    BlackRook = 11,
    BlackBishop = 12,
    BlackKnight = 13,
    BlackPawn = 14,
    BlackPieces = 15,
}

impl Piece {
    pub const SEPARATION: u8 = 8;
    pub const SLOTS: usize = 16;
    /// Bitboard slot holding every occupied square.
    pub const OCCUPIED: Piece = Piece::Empty;

    const BY_INDEX: [Piece; 16] = [
        Piece::Empty,
        Piece::WhiteKing,
        Piece::WhiteQueen,
        Piece::WhiteRook,
        Piece::WhiteBishop,
        Piece::WhiteKnight,
        Piece::WhitePawn,
        Piece::WhitePieces,
        Piece::Separator,
        Piece::BlackKing,
        Piece::BlackQueen,
        Piece::BlackRook,
        Piece::BlackBishop,
        Piece::BlackKnight,
        Piece::BlackPawn,
        Piece::BlackPieces,
    ];

    /// The twelve placeable pieces in slot order.
    pub const REAL: [Piece; 12] = [
        Piece::WhiteKing,
        Piece::WhiteQueen,
        Piece::WhiteRook,
        Piece::WhiteBishop,
        Piece::WhiteKnight,
        Piece::WhitePawn,
        Piece::BlackKing,
        Piece::BlackQueen,
        Piece::BlackRook,
        Piece::BlackBishop,
        Piece::BlackKnight,
        Piece::BlackPawn,
    ];

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        let offset = match color {
            Color::White => 0,
            Color::Black => Piece::SEPARATION,
        };
        Piece::BY_INDEX[(kind as u8 + offset) as usize]
    }

    /// Aggregate slot holding every piece of `color`.
    #[inline]
    pub const fn all_of(color: Color) -> Piece {
        match color {
            Color::White => Piece::WhitePieces,
            Color::Black => Piece::BlackPieces,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Piece {
        Piece::BY_INDEX[index & 15]
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the twelve real piece slots.
    #[inline]
    pub const fn is_real(self) -> bool {
        let i = self as u8 & 7;
        i != 0 && i != 7
    }

    #[inline]
    pub const fn color(self) -> Color {
        if (self as u8) < Piece::SEPARATION {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Colorless kind; only meaningful for real pieces.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        debug_assert!(self.is_real());
        match self as u8 & 7 {
            1 => PieceKind::King,
            2 => PieceKind::Queen,
            3 => PieceKind::Rook,
            4 => PieceKind::Bishop,
            5 => PieceKind::Knight,
            _ => PieceKind::Pawn,
        }
    }

    /// Same kind, other color.
    #[inline]
    pub const fn opposite(self) -> Piece {
        Piece::BY_INDEX[(self as u8 ^ Piece::SEPARATION) as usize]
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        self.is_real() && (self as u8 & 7) == PieceKind::Pawn as u8
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        self.is_real() && (self as u8 & 7) == PieceKind::King as u8
    }

    pub fn fen_char(self) -> Option<char> {
        if !self.is_real() {
            return None;
        }
        let ch = self.kind().fen_char();
        Some(match self.color() {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        })
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }
}

/// Four-bit castling-rights set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KING_SIDE: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEEN_SIDE: CastlingRights = CastlingRights(2);
    pub const BLACK_KING_SIDE: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEEN_SIDE: CastlingRights = CastlingRights(8);
    pub const ALL: CastlingRights = CastlingRights(15);

    /// The four single rights in bit order.
    pub const SINGLE: [CastlingRights; 4] = [
        CastlingRights::WHITE_KING_SIDE,
        CastlingRights::WHITE_QUEEN_SIDE,
        CastlingRights::BLACK_KING_SIDE,
        CastlingRights::BLACK_QUEEN_SIDE,
    ];

    #[inline]
    pub const fn from_bits(bits: u8) -> CastlingRights {
        CastlingRights(bits & 15)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub const fn intersects(self, other: CastlingRights) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn union(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & other.0)
    }

    #[inline]
    pub const fn without(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 & !other.0)
    }

    /// Both rights of one color.
    #[inline]
    pub const fn for_color(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights(3),
            Color::Black => CastlingRights(12),
        }
    }

    /// The right for one side of the board.
    #[inline]
    pub const fn side(color: Color, king_side: bool) -> CastlingRights {
        match (color, king_side) {
            (Color::White, true) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, false) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, true) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, false) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Same rights with the colors exchanged.
    #[inline]
    pub const fn swap_colors(self) -> CastlingRights {
        CastlingRights(((self.0 & 3) << 2) | ((self.0 >> 2) & 3))
    }
}

/// Midgame / endgame score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

impl Score {
    pub const ZERO: Score = Score { mg: 0, eg: 0 };

    #[inline]
    pub const fn new(mg: i32, eg: i32) -> Score {
        Score { mg, eg }
    }
}

impl Add for Score {
    type Output = Score;

    #[inline]
    fn add(self, rhs: Score) -> Score {
        Score::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl Sub for Score {
    type Output = Score;

    #[inline]
    fn sub(self, rhs: Score) -> Score {
        Score::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        Score::new(-self.mg, -self.eg)
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}
