//! Precomputed board geometry.
//!
//! Built once per process behind a `OnceLock` and read-only afterwards:
//! rank/file masks per square, light/dark square masks, Chebyshev distance,
//! and for every ordered square pair the squares strictly between them and
//! the full line through them (both empty when the pair is not aligned).

use std::sync::OnceLock;

use crate::bitboard::bitboard::BitBoard;
use crate::game_state::chess_types::{Color, Square};

const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

struct Geometry {
    rank_mask: [BitBoard; 64],
    file_mask: [BitBoard; 64],
    color_mask: [BitBoard; 2],
    between: Vec<[BitBoard; 64]>,
    line: Vec<[BitBoard; 64]>,
    distance: [[u8; 64]; 64],
}

static GEOMETRY: OnceLock<Geometry> = OnceLock::new();

#[inline]
fn geometry() -> &'static Geometry {
    GEOMETRY.get_or_init(build_geometry)
}

/// Force construction of the geometry tables.
pub fn init_geometry() {
    let _ = geometry();
}

fn build_geometry() -> Geometry {
    let mut rank_mask = [BitBoard::EMPTY; 64];
    let mut file_mask = [BitBoard::EMPTY; 64];
    let mut color_mask = [BitBoard::EMPTY; 2];
    let mut distance = [[0u8; 64]; 64];

    for sq in Square::iter() {
        rank_mask[sq.index()] = BitBoard(BitBoard::RANK_1.raw() << (8 * sq.rank().index()));
        file_mask[sq.index()] = BitBoard(BitBoard::FILE_A.raw() << sq.file().index());
        color_mask[sq.color().index()] |= BitBoard::from_square(sq);

        for other in Square::iter() {
            let df = sq.file().index().abs_diff(other.file().index());
            let dr = sq.rank().index().abs_diff(other.rank().index());
            distance[sq.index()][other.index()] = df.max(dr) as u8;
        }
    }

    let mut between = vec![[BitBoard::EMPTY; 64]; 64];
    let mut line = vec![[BitBoard::EMPTY; 64]; 64];

    for from in Square::iter() {
        for (df, dr) in DIRECTIONS {
            let full_ray = ray(from, df, dr) | ray(from, -df, -dr) | BitBoard::from_square(from);
            let mut walked = BitBoard::EMPTY;
            let mut file = from.file().index() as i32 + df;
            let mut rank = from.rank().index() as i32 + dr;
            while let Some(to) = Square::try_from_coords(file, rank) {
                between[from.index()][to.index()] = walked;
                line[from.index()][to.index()] = full_ray;
                walked |= BitBoard::from_square(to);
                file += df;
                rank += dr;
            }
        }
    }

    log::debug!("board geometry tables built");

    Geometry {
        rank_mask,
        file_mask,
        color_mask,
        between,
        line,
        distance,
    }
}

fn ray(from: Square, df: i32, dr: i32) -> BitBoard {
    let mut out = BitBoard::EMPTY;
    let mut file = from.file().index() as i32 + df;
    let mut rank = from.rank().index() as i32 + dr;
    while let Some(sq) = Square::try_from_coords(file, rank) {
        out |= BitBoard::from_square(sq);
        file += df;
        rank += dr;
    }
    out
}

/// All squares on the rank of `square`.
#[inline]
pub fn rank_mask(square: Square) -> BitBoard {
    geometry().rank_mask[square.index()]
}

/// All squares on the file of `square`.
#[inline]
pub fn file_mask(square: Square) -> BitBoard {
    geometry().file_mask[square.index()]
}

/// Light (`White`) or dark (`Black`) squares.
#[inline]
pub fn color_mask(color: Color) -> BitBoard {
    geometry().color_mask[color.index()]
}

/// Squares strictly between `a` and `b` when aligned, otherwise empty.
#[inline]
pub fn squares_between(a: Square, b: Square) -> BitBoard {
    geometry().between[a.index()][b.index()]
}

/// The whole rank, file or diagonal through `a` and `b`, otherwise empty.
#[inline]
pub fn line_through(a: Square, b: Square) -> BitBoard {
    geometry().line[a.index()][b.index()]
}

/// True when `c` lies on the line through `a` and `b`.
#[inline]
pub fn are_squares_aligned(a: Square, b: Square, c: Square) -> bool {
    line_through(a, b).is_set(c)
}

/// King-step distance between two squares.
#[inline]
pub fn square_distance(a: Square, b: Square) -> u8 {
    geometry().distance[a.index()][b.index()]
}
