//! Per-kind movement rules.
//!
//! Every piece has two disjoint destination sets:
//! - quiet destinations: empty cells it may move to
//! - capture destinations: enemy-occupied cells it may take
//!
//! | kind   | quiet                     | capture                  |
//! |--------|---------------------------|--------------------------|
//! | Stone  | orthogonal step           | diagonal step            |
//! | Knight | L-jump to empty cell      | L-jump onto enemy        |
//! | Bishop | diagonal ray              | first piece on ray       |
//! | Rook   | orthogonal ray            | first piece on ray       |
//! | Queen  | both rays                 | first piece on ray       |
//!
//! Friendly-occupied cells never appear in either set.

use crate::board::{Board, PieceKind, Point, Side};
use crate::constants::{DIAGONAL, KNIGHT_JUMPS, ORTHOGONAL};

/// Legal destinations for one piece.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destinations {
    pub quiet: Vec<Point>,
    pub captures: Vec<Point>,
}

impl Destinations {
    pub fn contains(&self, p: Point) -> bool {
        self.quiet.contains(&p) || self.captures.contains(&p)
    }

    pub fn is_empty(&self) -> bool {
        self.quiet.is_empty() && self.captures.is_empty()
    }

    /// Quiet destinations followed by captures.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.quiet.iter().chain(self.captures.iter()).copied()
    }
}

/// Destinations for the piece on `from`. Empty if `from` holds no piece.
pub fn destinations(board: &Board, from: Point) -> Destinations {
    let mut dest = Destinations::default();
    let Some(me) = board.get(from) else {
        return dest;
    };

    match me.kind {
        PieceKind::Stone => {
            for d in ORTHOGONAL {
                if let Some(to) = board.offset(from, d) {
                    if board.get(to).is_none() {
                        dest.quiet.push(to);
                    }
                }
            }
            for d in DIAGONAL {
                if let Some(to) = board.offset(from, d) {
                    if board.get(to).is_some_and(|t| t.owner != me.owner) {
                        dest.captures.push(to);
                    }
                }
            }
        }
        PieceKind::Knight => {
            for d in KNIGHT_JUMPS {
                if let Some(to) = board.offset(from, d) {
                    match board.get(to) {
                        None => dest.quiet.push(to),
                        Some(t) if t.owner != me.owner => dest.captures.push(to),
                        Some(_) => {}
                    }
                }
            }
        }
        PieceKind::Bishop => slide(board, from, me.owner, &DIAGONAL, &mut dest),
        PieceKind::Rook => slide(board, from, me.owner, &ORTHOGONAL, &mut dest),
        PieceKind::Queen => {
            slide(board, from, me.owner, &ORTHOGONAL, &mut dest);
            slide(board, from, me.owner, &DIAGONAL, &mut dest);
        }
    }
    dest
}

/// Walk each ray until the edge or the first occupied cell.
fn slide(
    board: &Board,
    from: Point,
    owner: Side,
    dirs: &[(isize, isize)],
    dest: &mut Destinations,
) {
    for &d in dirs {
        let mut cur = from;
        while let Some(to) = board.offset(cur, d) {
            match board.get(to) {
                None => dest.quiet.push(to),
                Some(t) => {
                    if t.owner != owner {
                        dest.captures.push(to);
                    }
                    break;
                }
            }
            cur = to;
        }
    }
}

/// Whether `side` may move the piece on `from` to `to` under the movement rules.
pub fn is_legal_move(board: &Board, side: Side, from: Point, to: Point) -> bool {
    match board.get(from) {
        Some(me) if me.owner == side => destinations(board, from).contains(to),
        _ => false,
    }
}
