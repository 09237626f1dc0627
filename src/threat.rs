//! Threat detection: immediate wins and open threes.

use std::collections::BTreeSet;

use crate::action::Action;
use crate::board::{Board, Point, Score, Side};
use crate::candidates::generate;
use crate::constants::{AXES, MAX_CANDIDATES, THREAT_SATURATION};
use crate::simulate::simulate;

/// Count `side`'s actions that win on the spot, stopping at
/// [`THREAT_SATURATION`]. At most [`MAX_CANDIDATES`] actions are simulated.
pub fn count_immediate_wins(
    board: &Board,
    score: &Score,
    side: Side,
    rng: &mut fastrand::Rng,
) -> usize {
    let mut wins = 0;
    for action in generate(board, score, side, rng).iter().take(MAX_CANDIDATES) {
        if simulate(board, score, side, action).makes_five(side) {
            wins += 1;
            if wins >= THREAT_SATURATION {
                break;
            }
        }
    }
    wins
}

/// How many immediate wins the opponent of `me` has in this position.
pub fn count_opponent_immediate_wins(
    board: &Board,
    score: &Score,
    me: Side,
    rng: &mut fastrand::Rng,
) -> usize {
    count_immediate_wins(board, score, me.opposite(), rng)
}

/// First of `candidates` (within the cap) that makes five for `side`.
pub fn find_immediate_win(
    board: &Board,
    score: &Score,
    side: Side,
    candidates: &[Action],
) -> Option<Action> {
    candidates
        .iter()
        .take(MAX_CANDIDATES)
        .find(|a| simulate(board, score, side, a).makes_five(side))
        .copied()
}

/// Extension cells of every open three of `side`.
///
/// An open three is a maximal run of exactly three of `side`'s pieces along
/// one axis whose cells just beyond both ends are on the board and empty.
/// Both extension cells of each such run are returned.
pub fn open_three_ends(board: &Board, side: Side) -> BTreeSet<Point> {
    let mut ends = BTreeSet::new();
    let owned = |p: Point| board.get(p).is_some_and(|q| q.owner == side);

    for (start, _) in board.pieces_of(side) {
        for (dr, dc) in AXES {
            // Only start counting at the first cell of a run.
            if board.offset(start, (-dr, -dc)).is_some_and(owned) {
                continue;
            }
            let mut last = start;
            let mut len = 1;
            while let Some(next) = board.offset(last, (dr, dc)).filter(|&n| owned(n)) {
                last = next;
                len += 1;
            }
            if len != 3 {
                continue;
            }
            let before = board.offset(start, (-dr, -dc)).filter(|&p| board.is_empty_at(p));
            let after = board.offset(last, (dr, dc)).filter(|&p| board.is_empty_at(p));
            if let (Some(a), Some(b)) = (before, after) {
                ends.insert(a);
                ends.insert(b);
            }
        }
    }
    ends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_open_four_gives_two_wins() {
        let mut board = Board::new(15);
        for c in 5..9 {
            board.put((7, c), Piece::stone(Side::Black));
        }
        let mut rng = fastrand::Rng::with_seed(5);
        let wins = count_opponent_immediate_wins(&board, &Score::default(), Side::White, &mut rng);
        assert_eq!(wins, 2);
    }

    #[test]
    fn test_no_threat_on_quiet_board() {
        let mut board = Board::new(15);
        board.put((7, 7), Piece::stone(Side::Black));
        let mut rng = fastrand::Rng::with_seed(5);
        assert_eq!(count_immediate_wins(&board, &Score::default(), Side::Black, &mut rng), 0);
    }

    #[test]
    fn test_count_saturates() {
        // Four separate open fours give eight winning drops.
        let mut board = Board::new(19);
        for row in [1, 5, 9, 13] {
            for c in 5..9 {
                board.put((row, c), Piece::stone(Side::Black));
            }
        }
        let mut rng = fastrand::Rng::with_seed(5);
        let wins = count_immediate_wins(&board, &Score::default(), Side::Black, &mut rng);
        assert_eq!(wins, THREAT_SATURATION);
    }

    #[test]
    fn test_find_immediate_win() {
        let mut board = Board::new(15);
        for c in 0..4 {
            board.put((0, c), Piece::stone(Side::White));
        }
        let candidates = vec![Action::place((5, 5)), Action::place((0, 4))];
        assert_eq!(
            find_immediate_win(&board, &Score::default(), Side::White, &candidates),
            Some(Action::place((0, 4)))
        );
        assert_eq!(
            find_immediate_win(&board, &Score::default(), Side::Black, &candidates),
            None
        );
    }

    #[test]
    fn test_win_past_the_cap_is_not_seen() {
        let mut board = Board::new(19);
        for c in 0..4 {
            board.put((0, c), Piece::stone(Side::White));
        }
        let win = Action::place((0, 4));
        let mut candidates: Vec<Action> = (5..19)
            .flat_map(|r| (0..19).map(move |c| Action::place((r, c))))
            .take(MAX_CANDIDATES)
            .collect();
        assert_eq!(candidates.len(), MAX_CANDIDATES);
        candidates.push(win);
        let score = Score::default();
        assert_eq!(find_immediate_win(&board, &score, Side::White, &candidates), None);

        // One slot earlier it is found.
        candidates.insert(MAX_CANDIDATES - 1, win);
        assert_eq!(find_immediate_win(&board, &score, Side::White, &candidates), Some(win));
    }

    #[test]
    fn test_open_three_ends() {
        let mut board = Board::new(15);
        for c in 5..8 {
            board.put((7, c), Piece::stone(Side::Black));
        }
        let ends = open_three_ends(&board, Side::Black);
        assert_eq!(ends, BTreeSet::from([(7, 4), (7, 8)]));
        assert!(open_three_ends(&board, Side::White).is_empty());
    }

    #[test]
    fn test_blocked_three_is_not_open() {
        let mut board = Board::new(15);
        for c in 5..8 {
            board.put((7, c), Piece::stone(Side::Black));
        }
        board.put((7, 8), Piece::stone(Side::White));
        assert!(open_three_ends(&board, Side::Black).is_empty());
    }

    #[test]
    fn test_three_at_edge_is_not_open() {
        let mut board = Board::new(15);
        for r in 0..3 {
            board.put((r, 4), Piece::stone(Side::Black));
        }
        assert!(open_three_ends(&board, Side::Black).is_empty());
    }

    #[test]
    fn test_four_is_not_a_three() {
        let mut board = Board::new(15);
        for c in 5..9 {
            board.put((7, c), Piece::stone(Side::Black));
        }
        assert!(open_three_ends(&board, Side::Black).is_empty());
    }
}
