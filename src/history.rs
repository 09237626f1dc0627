//! Bounded record of an agent's recent choices.

use std::collections::VecDeque;

use crate::action::Action;
use crate::constants::{HISTORY_CAPACITY, REPETITION_PENALTY, REPETITION_WINDOW};

/// The most recent actions chosen by one agent, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    actions: VecDeque<Action>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an action, dropping the oldest entry once full.
    pub fn push(&mut self, action: Action) {
        if self.capacity == 0 {
            return;
        }
        if self.actions.len() == self.capacity {
            self.actions.pop_front();
        }
        self.actions.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Most recent first.
    pub fn recent(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().rev()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Penalty for choosing `action` again: every match among the last
    /// [`REPETITION_WINDOW`] entries adds `REPETITION_PENALTY / rank`, where
    /// the most recent entry has rank 1.
    pub fn repetition_penalty(&self, action: &Action) -> f64 {
        self.recent()
            .take(REPETITION_WINDOW)
            .enumerate()
            .filter(|(_, a)| *a == action)
            .map(|(i, _)| REPETITION_PENALTY / (i + 1) as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded() {
        let mut h = History::with_capacity(3);
        for c in 0..5 {
            h.push(Action::place((0, c)));
        }
        assert_eq!(h.len(), 3);
        let recent: Vec<Action> = h.recent().copied().collect();
        assert_eq!(
            recent,
            vec![Action::place((0, 4)), Action::place((0, 3)), Action::place((0, 2))]
        );
    }

    #[test]
    fn test_default_capacity() {
        let mut h = History::default();
        for c in 0..50 {
            h.push(Action::place((c / 10, c % 10)));
        }
        assert_eq!(h.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_penalty_decays_with_age() {
        let a = Action::moving((1, 1), (1, 2));
        let b = Action::moving((1, 2), (1, 1));
        let mut h = History::default();
        assert_eq!(h.repetition_penalty(&a), 0.0);

        h.push(a);
        h.push(b);
        // a is now second most recent.
        assert_eq!(h.repetition_penalty(&a), REPETITION_PENALTY / 2.0);
        assert_eq!(h.repetition_penalty(&b), REPETITION_PENALTY);

        h.push(a);
        assert_eq!(
            h.repetition_penalty(&a),
            REPETITION_PENALTY + REPETITION_PENALTY / 3.0
        );
    }

    #[test]
    fn test_penalty_window() {
        let a = Action::place((9, 9));
        let mut h = History::default();
        h.push(a);
        for c in 0..REPETITION_WINDOW {
            h.push(Action::place((0, c)));
        }
        assert_eq!(h.repetition_penalty(&a), 0.0);
    }
}
