//! Copy-on-write action simulation.
//!
//! [`simulate`] applies one action to copies of a board and score, resolves
//! cross-captures to a fixed point, and hands the copies back. Inputs are
//! never touched, so counterfactual search can run any number of
//! simulations against the live position.

use crate::action::Action;
use crate::board::{Board, Piece, Point, Score, Side};
use crate::rules::{Capture, WinLine, five_in_row, resolve_captures};

/// Result of simulating one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub board: Board,
    pub score: Score,
    /// Cell the action landed on, or `None` if the action had no legal effect.
    pub last: Option<Point>,
    /// Pieces removed by cross-capture after the action.
    pub captures: Vec<Capture>,
}

impl Outcome {
    fn rejected(board: Board, score: Score) -> Self {
        Self {
            board,
            score,
            last: None,
            captures: Vec::new(),
        }
    }

    /// Whether the action took effect. Rejected outcomes must be discarded.
    pub fn is_legal(&self) -> bool {
        self.last.is_some()
    }

    /// The winning line `side` completed with this action, if any.
    ///
    /// Only the last-touched cell is examined, and only if the acting piece
    /// survived capture resolution.
    pub fn five_for(&self, side: Side) -> Option<WinLine> {
        five_in_row(&self.board, self.last?, side)
    }

    pub fn makes_five(&self, side: Side) -> bool {
        self.five_for(side).is_some()
    }
}

/// Apply `action` for `side` to copies of `board` and `score`.
///
/// - `Place` needs an empty in-bounds target.
/// - `Summon` also needs the kind's cost, which is debited.
/// - `Move` needs one of `side`'s pieces on the source and no friendly piece
///   on the destination. The movement pattern is not re-checked here; an
///   enemy on the destination is captured and its value credited first.
///
/// Every successful action is followed by cross-capture resolution.
pub fn simulate(board: &Board, score: &Score, side: Side, action: &Action) -> Outcome {
    let mut board = board.clone();
    let mut score = *score;

    let last = match *action {
        Action::Place { row, col } => {
            let at = (row, col);
            if !board.is_empty_at(at) {
                return Outcome::rejected(board, score);
            }
            board.put(at, Piece::stone(side));
            at
        }
        Action::Summon { row, col, kind } => {
            let at = (row, col);
            if !board.is_empty_at(at) {
                return Outcome::rejected(board, score);
            }
            match kind.summon_cost() {
                Some(cost) if score.spend(side, cost) => {}
                _ => return Outcome::rejected(board, score),
            }
            board.put(at, Piece::new(side, kind));
            at
        }
        Action::Move {
            from_row,
            from_col,
            to_row,
            to_col,
        } => {
            let from = (from_row, from_col);
            let to = (to_row, to_col);
            let Some(me) = board.get(from).filter(|p| p.owner == side) else {
                return Outcome::rejected(board, score);
            };
            if !board.in_bounds(to) {
                return Outcome::rejected(board, score);
            }
            if let Some(target) = board.get(to) {
                if target.owner == side {
                    return Outcome::rejected(board, score);
                }
                score.credit(side, target.kind.capture_value());
            }
            board.take(from);
            board.put(to, me);
            to
        }
    };

    let captures = resolve_captures(&mut board, &mut score);
    Outcome {
        board,
        score,
        last: Some(last),
        captures,
    }
}
