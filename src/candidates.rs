//! Candidate action generation.
//!
//! Place and summon targets are restricted to the frontier: empty cells
//! within [`FRONTIER_RADIUS`] of any piece. Moves cover every destination of
//! every piece the acting side owns. The pool is deduplicated and shuffled
//! with the caller's generator; consumers evaluate at most
//! [`MAX_CANDIDATES`](crate::constants::MAX_CANDIDATES) of it.

use std::collections::HashSet;

use crate::action::Action;
use crate::board::{Board, PieceKind, Point, Score, Side};
use crate::constants::FRONTIER_RADIUS;
use crate::movegen::destinations;

/// Empty cells within `radius` (Chebyshev distance) of any piece, in
/// row-major order. Empty when the board has no pieces.
pub fn frontier(board: &Board, radius: usize) -> Vec<Point> {
    let size = board.size();
    let mut near = vec![false; size * size];

    for ((row, col), _) in board.pieces() {
        let rows = row.saturating_sub(radius)..=(row + radius).min(size - 1);
        for r in rows {
            let cols = col.saturating_sub(radius)..=(col + radius).min(size - 1);
            for c in cols {
                near[r * size + c] = true;
            }
        }
    }

    board
        .points()
        .filter(|&(r, c)| near[r * size + c] && board.is_empty_at((r, c)))
        .collect()
}

/// The five-cell cross around the center, used to open on an empty board.
pub fn center_cluster(size: usize) -> Vec<Point> {
    let c = size / 2;
    vec![(c, c), (c, c - 1), (c - 1, c), (c + 1, c), (c, c + 1)]
}

/// Cells open to place and summon: the frontier, or the center cluster when
/// the board is empty.
pub fn drop_targets(board: &Board) -> Vec<Point> {
    if board.is_board_empty() {
        center_cluster(board.size())
    } else {
        frontier(board, FRONTIER_RADIUS)
    }
}

/// Every candidate action for `side`, deduplicated, in shuffled order.
pub fn generate(board: &Board, score: &Score, side: Side, rng: &mut fastrand::Rng) -> Vec<Action> {
    let targets: Vec<Point> = drop_targets(board)
        .into_iter()
        .filter(|&p| board.is_empty_at(p))
        .collect();

    let mut pool = Vec::new();
    pool.extend(targets.iter().map(|&p| Action::place(p)));

    let budget = score.get(side);
    for kind in PieceKind::SUMMONABLE {
        if kind.summon_cost().is_some_and(|cost| budget >= cost) {
            pool.extend(targets.iter().map(|&p| Action::summon(p, kind)));
        }
    }

    for (from, _) in board.pieces_of(side) {
        pool.extend(destinations(board, from).iter().map(|to| Action::moving(from, to)));
    }

    let mut seen = HashSet::with_capacity(pool.len());
    pool.retain(|a| seen.insert(*a));
    rng.shuffle(&mut pool);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_frontier_radius() {
        let mut board = Board::new(9);
        board.put((4, 4), Piece::stone(Side::Black));
        let cells = frontier(&board, 2);
        assert_eq!(cells.len(), 24);
        assert!(cells.contains(&(2, 2)));
        assert!(cells.contains(&(6, 6)));
        assert!(!cells.contains(&(4, 4)));
        assert!(!cells.contains(&(1, 4)));
    }

    #[test]
    fn test_frontier_clips_at_edge() {
        let mut board = Board::new(9);
        board.put((0, 0), Piece::stone(Side::White));
        assert_eq!(frontier(&board, 2).len(), 8);
    }

    #[test]
    fn test_empty_board_frontier_is_empty() {
        assert!(frontier(&Board::new(9), 2).is_empty());
    }

    #[test]
    fn test_empty_board_uses_center_cluster() {
        let board = Board::new(9);
        let mut rng = fastrand::Rng::with_seed(1);
        let mut actions = generate(&board, &Score::default(), Side::Black, &mut rng);
        actions.sort_by_key(|a| a.target());
        let targets: Vec<Point> = actions.iter().map(Action::target).collect();
        assert_eq!(targets, vec![(3, 4), (4, 3), (4, 4), (4, 5), (5, 4)]);
        assert!(actions.iter().all(Action::is_drop));
    }

    #[test]
    fn test_summons_only_when_affordable() {
        let mut board = Board::new(9);
        board.put((4, 4), Piece::stone(Side::Black));
        let mut rng = fastrand::Rng::with_seed(1);

        let poor = generate(&board, &Score::new(3, 0), Side::Black, &mut rng);
        assert!(!poor.iter().any(|a| matches!(a, Action::Summon { .. })));

        let rich = generate(&board, &Score::new(6, 0), Side::Black, &mut rng);
        let kinds: HashSet<PieceKind> = rich
            .iter()
            .filter_map(|a| match a {
                Action::Summon { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            kinds,
            HashSet::from([PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook])
        );
        // 24 frontier cells: place + three summon kinds, plus 4 stone steps.
        assert_eq!(rich.len(), 24 * 4 + 4);
    }

    #[test]
    fn test_moves_only_for_own_pieces() {
        let mut board = Board::new(9);
        board.put((4, 4), Piece::stone(Side::Black));
        board.put((6, 6), Piece::stone(Side::White));
        let mut rng = fastrand::Rng::with_seed(3);
        let actions = generate(&board, &Score::default(), Side::White, &mut rng);
        for a in &actions {
            if let Action::Move { from_row, from_col, .. } = *a {
                assert_eq!((from_row, from_col), (6, 6));
            }
        }
        assert_eq!(actions.iter().filter(|a| !a.is_drop()).count(), 4);
    }

    #[test]
    fn test_no_duplicates() {
        let mut board = Board::new(9);
        board.put((4, 4), Piece::stone(Side::Black));
        board.put((4, 5), Piece::stone(Side::Black));
        let mut rng = fastrand::Rng::with_seed(9);
        let actions = generate(&board, &Score::new(20, 0), Side::Black, &mut rng);
        let unique: HashSet<Action> = actions.iter().copied().collect();
        assert_eq!(unique.len(), actions.len());
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut board = Board::new(9);
        board.put((4, 4), Piece::stone(Side::Black));
        let a = generate(&board, &Score::default(), Side::Black, &mut fastrand::Rng::with_seed(42));
        let b = generate(&board, &Score::default(), Side::Black, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }
}
