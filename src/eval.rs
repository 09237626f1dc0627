//! Static evaluation of a simulated action.
//!
//! The score of an action for the acting side is the sum of:
//! - repetition penalty from the agent's history (negative)
//! - score gained, weighted by [`CAPTURE_GAIN_WEIGHT`]
//! - a summon incentive, for summons only
//! - own line potential minus the opponent's, each weighted
//! - pressure on enemy pieces around the landing cell
//! - cross-capture risk to the landed piece (negative)

use crate::action::Action;
use crate::board::{Board, Point, Score, Side};
use crate::constants::{
    AXES, CAPTURE_GAIN_WEIGHT, LINE_RUN_SCORES, OPP_LINE_WEIGHT, ORTHOGONAL, OWN_LINE_WEIGHT,
    PRESSURE_ADJACENT, PRESSURE_BY_DISTANCE, PRESSURE_FAR, RISK_ONE_FROM_SURROUNDED,
    RISK_SURROUNDED, RISK_TWO_SIDES, SUMMON_BONUS, SUMMON_VALUE_WEIGHT,
};
use crate::history::History;
use crate::simulate::Outcome;

/// Score `action` for `side`, given the score before it and its simulated outcome.
pub fn evaluate(
    before: &Score,
    outcome: &Outcome,
    side: Side,
    action: &Action,
    history: &History,
) -> f64 {
    let board = &outcome.board;
    let mut total = -history.repetition_penalty(action);

    let gained = outcome.score.get(side) as f64 - before.get(side) as f64;
    total += gained * CAPTURE_GAIN_WEIGHT;

    if let Action::Summon { kind, .. } = *action {
        total += SUMMON_BONUS + kind.capture_value() as f64 * SUMMON_VALUE_WEIGHT;
    }

    total += line_potential(board, side) * OWN_LINE_WEIGHT;
    total -= line_potential(board, side.opposite()) * OPP_LINE_WEIGHT;

    let at = action.target();
    total += pressure_bonus(board, side, at);
    total -= capture_risk(board, side, at);
    total
}

/// Sum over every maximal run of two to four of `side`'s pieces on any axis:
/// a base value by length plus a bonus per empty cell just beyond either end.
pub fn line_potential(board: &Board, side: Side) -> f64 {
    let owned = |p: Point| board.get(p).is_some_and(|q| q.owner == side);
    let mut total = 0.0;

    for (start, _) in board.pieces_of(side) {
        for (dr, dc) in AXES {
            if board.offset(start, (-dr, -dc)).is_some_and(owned) {
                continue;
            }
            let mut last = start;
            let mut run = 1;
            while let Some(next) = board.offset(last, (dr, dc)).filter(|&n| owned(n)) {
                last = next;
                run += 1;
            }
            if !(2..=4).contains(&run) {
                continue;
            }
            let open_ends = [
                board.offset(start, (-dr, -dc)),
                board.offset(last, (dr, dc)),
            ]
            .into_iter()
            .flatten()
            .filter(|&p| board.is_empty_at(p))
            .count();
            let (base, per_end) = LINE_RUN_SCORES[run - 2];
            total += base + open_ends as f64 * per_end;
        }
    }
    total
}

/// Reward for landing close to enemy pieces: a tier by Manhattan distance to
/// the nearest one, plus a bonus per orthogonally adjacent enemy.
pub fn pressure_bonus(board: &Board, side: Side, at: Point) -> f64 {
    let nearest = board
        .pieces_of(side.opposite())
        .map(|(p, _)| p.0.abs_diff(at.0) + p.1.abs_diff(at.1))
        .min();

    let mut bonus = match nearest {
        Some(0 | 1) => PRESSURE_BY_DISTANCE[0],
        Some(2) => PRESSURE_BY_DISTANCE[1],
        Some(3) => PRESSURE_BY_DISTANCE[2],
        _ => PRESSURE_FAR,
    };

    for d in ORTHOGONAL {
        if board
            .offset(at, d)
            .and_then(|n| board.get(n))
            .is_some_and(|q| q.owner != side)
        {
            bonus += PRESSURE_ADJACENT;
        }
    }
    bonus
}

/// How exposed `side`'s piece on `at` is to cross-capture. Off-board
/// neighbors are ignored; zero if `at` does not hold `side`'s piece.
pub fn capture_risk(board: &Board, side: Side, at: Point) -> f64 {
    if !board.get(at).is_some_and(|p| p.owner == side) {
        return 0.0;
    }
    let enemy = side.opposite();
    let mut enemies = 0;
    let mut empties = 0;
    for n in ORTHOGONAL.iter().filter_map(|&d| board.offset(at, d)) {
        match board.get(n) {
            None => empties += 1,
            Some(q) if q.owner == enemy => enemies += 1,
            Some(_) => {}
        }
    }

    match (enemies, empties) {
        (3, 1) => RISK_ONE_FROM_SURROUNDED,
        (2, 2) => RISK_TWO_SIDES,
        (4, _) => RISK_SURROUNDED,
        _ => 0.0,
    }
}
