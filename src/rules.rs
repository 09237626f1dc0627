//! Five-in-a-row detection and cross-capture resolution.
//!
//! Cross-capture: a piece whose four orthogonal neighbors all exist and are
//! all held by the opposite side is removed, and its capture value goes to
//! that side. Victims of one pass are computed from the board as it stood at
//! the start of the pass and removed together. Passes repeat until one
//! finds nothing, so the board handed back is always stable.

use log::trace;

use crate::board::{Board, Piece, Point, Score, Side};
use crate::constants::{AXES, ORTHOGONAL, WIN_LENGTH};

/// The two extreme cells of a winning line.
pub type WinLine = (Point, Point);

/// Check whether the piece of `side` on `at` completes five in a row.
///
/// Axes are scanned in the order vertical, horizontal, down-right,
/// down-left; the first axis with a run of at least five wins and its two
/// end cells are returned, the end lying against the axis direction first.
pub fn five_in_row(board: &Board, at: Point, side: Side) -> Option<WinLine> {
    if !board.get(at).is_some_and(|p| p.owner == side) {
        return None;
    }

    for (dr, dc) in AXES {
        let (forward, fwd_len) = run_end(board, at, side, (dr, dc));
        let (backward, back_len) = run_end(board, at, side, (-dr, -dc));
        if 1 + fwd_len + back_len >= WIN_LENGTH {
            return Some((backward, forward));
        }
    }
    None
}

/// Follow `side`'s pieces from `at` along `dir`; return the last cell reached
/// and how many steps were taken.
fn run_end(board: &Board, at: Point, side: Side, dir: (isize, isize)) -> (Point, usize) {
    let mut end = at;
    let mut len = 0;
    while let Some(next) = board.offset(end, dir) {
        if !board.get(next).is_some_and(|p| p.owner == side) {
            break;
        }
        end = next;
        len += 1;
    }
    (end, len)
}

/// A piece removed by cross-capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub at: Point,
    pub piece: Piece,
    /// Resolver pass (starting at 0) in which the piece fell.
    pub pass: usize,
}

/// Whether the piece on `p` is fully enclosed by enemy pieces.
pub fn is_surrounded(board: &Board, p: Point) -> bool {
    let Some(piece) = board.get(p) else {
        return false;
    };
    let enemy = piece.owner.opposite();
    ORTHOGONAL.iter().all(|&d| {
        board
            .offset(p, d)
            .and_then(|n| board.get(n))
            .is_some_and(|q| q.owner == enemy)
    })
}

/// Remove surrounded pieces until none remain, crediting each capture to
/// the surrounding side. Returns every removal in the order it happened.
///
/// Each pass either removes at least one piece or ends the loop, so the
/// number of passes is bounded by the number of cells.
pub fn resolve_captures(board: &mut Board, score: &mut Score) -> Vec<Capture> {
    let mut removed = Vec::new();
    let max_passes = board.size() * board.size();

    for pass in 0..max_passes {
        let victims: Vec<Point> = board
            .pieces()
            .map(|(p, _)| p)
            .filter(|&p| is_surrounded(board, p))
            .collect();
        if victims.is_empty() {
            break;
        }
        for p in victims {
            if let Some(piece) = board.take(p) {
                score.credit(piece.owner.opposite(), piece.kind.capture_value());
                removed.push(Capture { at: p, piece, pass });
            }
        }
    }

    if !removed.is_empty() {
        trace!("cross-capture removed {} piece(s)", removed.len());
    }
    removed
}
