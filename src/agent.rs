//! Move selection.
//!
//! An [`Agent`] plays one side. Each decision runs a priority cascade and
//! returns the first stage that produces an action:
//!
//! 1. **Immediate win**: a candidate that completes five in a row.
//! 2. **Block loss**: if the opponent can win next turn, the candidate that
//!    leaves it no winning reply (best evaluation first), or failing that the
//!    one leaving the fewest.
//! 3. **Block open three**: a drop, then a move, onto an extension cell of
//!    an opponent open three.
//! 4. **Heuristic**: a uniform pick among the best-evaluated candidates.
//!
//! All randomness (candidate order, threat sampling, final tie-break) comes
//! from the agent's own generator, so a seeded agent replays exactly.

use std::fmt;

use log::{debug, trace};

use crate::action::Action;
use crate::board::Side;
use crate::candidates::generate;
use crate::constants::{BLOCK_BONUS, MAX_CANDIDATES, TIE_EPSILON, TIE_SET_CAP};
use crate::eval::evaluate;
use crate::game::GameSnapshot;
use crate::history::History;
use crate::simulate::simulate;
use crate::threat::{count_opponent_immediate_wins, find_immediate_win, open_three_ends};

/// Which stage of the cascade produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ImmediateWin,
    BlockLoss,
    BlockOpenThree,
    Heuristic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ImmediateWin => "immediate-win",
            Stage::BlockLoss => "block-loss",
            Stage::BlockOpenThree => "block-open-three",
            Stage::Heuristic => "heuristic",
        };
        f.write_str(name)
    }
}

/// A chosen action and the stage that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub stage: Stage,
}

/// A decision-maker for one side.
pub struct Agent {
    side: Side,
    rng: fastrand::Rng,
    history: History,
}

impl Agent {
    /// Create an agent seeded from system entropy.
    pub fn new(side: Side) -> Self {
        Self::with_rng(side, fastrand::Rng::new())
    }

    /// Create an agent whose decisions are reproducible for a given seed.
    pub fn with_seed(side: Side, seed: u64) -> Self {
        Self::with_rng(side, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(side: Side, rng: fastrand::Rng) -> Self {
        Self {
            side,
            rng,
            history: History::default(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    /// Restart the random stream.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Forget past choices, e.g. when a new game starts.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The action to play, or `None` when the game is over, it is not this
    /// agent's turn, or nothing is legal.
    pub fn choose_action(&mut self, snap: &GameSnapshot) -> Option<Action> {
        self.decide(snap).map(|d| d.action)
    }

    /// Like [`choose_action`](Self::choose_action), also reporting the stage.
    pub fn decide(&mut self, snap: &GameSnapshot) -> Option<Decision> {
        if snap.game_over || snap.turn != self.side {
            return None;
        }
        let me = self.side;
        let opp = me.opposite();

        let candidates = generate(&snap.board, &snap.score, me, &mut self.rng);
        if candidates.is_empty() {
            return None;
        }
        trace!("{me}: {} candidates", candidates.len());

        let decision = self
            .immediate_win(snap, &candidates)
            .or_else(|| self.block_loss(snap, &candidates))
            .or_else(|| block_open_three(snap, &candidates, opp))
            .or_else(|| self.heuristic_pick(snap, &candidates))?;

        debug!("{me} plays {} ({})", decision.action, decision.stage);
        self.history.push(decision.action);
        Some(decision)
    }

    fn immediate_win(&self, snap: &GameSnapshot, candidates: &[Action]) -> Option<Decision> {
        find_immediate_win(&snap.board, &snap.score, self.side, candidates).map(|action| Decision {
            action,
            stage: Stage::ImmediateWin,
        })
    }

    /// Pick the candidate that best neutralizes the opponent's winning replies.
    ///
    /// Candidates leaving zero replies win, ranked by evaluation (plus
    /// [`BLOCK_BONUS`] when the count actually fell). Otherwise the fallback
    /// minimizes the reply count, then maximizes evaluation, then keeps the
    /// earliest candidate.
    fn block_loss(&mut self, snap: &GameSnapshot, candidates: &[Action]) -> Option<Decision> {
        let me = self.side;
        let before = count_opponent_immediate_wins(&snap.board, &snap.score, me, &mut self.rng);
        if before == 0 {
            return None;
        }
        debug!("{me}: opponent threatens {before} immediate win(s)");

        let mut best_safe: Option<(f64, Action)> = None;
        let mut best_fallback: Option<(usize, f64, Action)> = None;

        for action in candidates.iter().take(MAX_CANDIDATES) {
            let outcome = simulate(&snap.board, &snap.score, me, action);
            if !outcome.is_legal() {
                continue;
            }
            let after =
                count_opponent_immediate_wins(&outcome.board, &outcome.score, me, &mut self.rng);
            let value = evaluate(&snap.score, &outcome, me, action, &self.history);

            if after == 0 {
                let value = if after < before { value + BLOCK_BONUS } else { value };
                if best_safe.is_none_or(|(v, _)| value > v) {
                    best_safe = Some((value, *action));
                }
            } else if best_fallback.is_none_or(|(t, v, _)| after < t || (after == t && value > v)) {
                best_fallback = Some((after, value, *action));
            }
        }

        best_safe
            .map(|(_, action)| action)
            .or(best_fallback.map(|(_, _, action)| action))
            .map(|action| Decision {
                action,
                stage: Stage::BlockLoss,
            })
    }

    /// Evaluate every candidate and pick uniformly among those within
    /// [`TIE_EPSILON`] of the best, keeping at most [`TIE_SET_CAP`].
    fn heuristic_pick(&mut self, snap: &GameSnapshot, candidates: &[Action]) -> Option<Decision> {
        let me = self.side;
        let scored: Vec<(f64, Action)> = candidates
            .iter()
            .take(MAX_CANDIDATES)
            .map(|action| (simulate(&snap.board, &snap.score, me, action), action))
            .filter(|(outcome, _)| outcome.is_legal())
            .map(|(outcome, action)| {
                (evaluate(&snap.score, &outcome, me, action, &self.history), *action)
            })
            .collect();

        let top = best_ties(scored);
        if top.is_empty() {
            return None;
        }
        trace!("{me}: {} tied for best", top.len());
        let action = top[self.rng.usize(..top.len())];
        Some(Decision {
            action,
            stage: Stage::Heuristic,
        })
    }
}

/// Actions scoring within [`TIE_EPSILON`] of the best, best first, at most
/// [`TIE_SET_CAP`] of them. Equal scores keep their input order.
fn best_ties(mut scored: Vec<(f64, Action)>) -> Vec<Action> {
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let Some(&(best, _)) = scored.first() else {
        return Vec::new();
    };
    scored
        .into_iter()
        .take_while(|(v, _)| *v >= best - TIE_EPSILON)
        .take(TIE_SET_CAP)
        .map(|(_, a)| a)
        .collect()
}

/// Land on an open-three extension cell: drops are preferred over moves.
fn block_open_three(snap: &GameSnapshot, candidates: &[Action], opp: Side) -> Option<Decision> {
    let ends = open_three_ends(&snap.board, opp);
    if ends.is_empty() {
        return None;
    }
    let capped = || candidates.iter().take(MAX_CANDIDATES);
    capped()
        .find(|a| a.is_drop() && ends.contains(&a.target()))
        .or_else(|| capped().find(|a| !a.is_drop() && ends.contains(&a.target())))
        .map(|&action| Decision {
            action,
            stage: Stage::BlockOpenThree,
        })
}
