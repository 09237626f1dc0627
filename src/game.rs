//! Game state: the snapshot handed to agents and a reference game loop.
//!
//! [`Game`] is a minimal orchestrator: Black moves first, sides alternate,
//! and the first side to complete five in a row wins. Opening negotiations
//! are left to whoever owns the game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::Action;
use crate::board::{Board, Piece, Point, Score, Side};
use crate::movegen::is_legal_move;
use crate::rules::WinLine;
use crate::simulate::simulate;

/// Read-only view of a game at decision time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    #[serde(default)]
    pub score: Score,
    pub turn: Side,
    #[serde(default)]
    pub game_over: bool,
}

impl GameSnapshot {
    /// Empty board of `size`, Black to move.
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            score: Score::default(),
            turn: Side::Black,
            game_over: false,
        }
    }
}

/// Why [`Game::apply`] refused an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("the game is over")]
    GameOver,
    #[error("point is off the board")]
    OutOfBounds,
    #[error("point is not empty")]
    Occupied,
    #[error("a {0:?} cannot be summoned")]
    NotSummonable(crate::board::PieceKind),
    #[error("not enough score: need {need}, have {have}")]
    CannotAfford { need: u32, have: u32 },
    #[error("no piece of the side to move on the source point")]
    NotYourPiece,
    #[error("the piece cannot move there")]
    IllegalDestination,
}

/// What an applied action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub side: Side,
    pub action: Action,
    /// Pieces removed by cross-capture.
    pub captured: Vec<(Point, Piece)>,
    /// Set when the action won the game.
    pub win_line: Option<WinLine>,
}

/// A live game.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: Score,
    turn: Side,
    winner: Option<Side>,
    win_line: Option<WinLine>,
    last_action: Option<Action>,
    moves: usize,
    /// Set on a win, or when restored from a finished snapshot.
    finished: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::with_board(Board::default())
    }
}

impl Game {
    pub fn new(size: usize) -> Self {
        Self::with_board(Board::new(size))
    }

    /// Start from an arbitrary position, Black to move.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            score: Score::default(),
            turn: Side::Black,
            winner: None,
            win_line: None,
            last_action: None,
            moves: 0,
            finished: false,
        }
    }

    /// Resume from a snapshot. A finished snapshot stays finished, though
    /// its winner is unknown.
    pub fn from_snapshot(snap: GameSnapshot) -> Self {
        Self {
            board: snap.board,
            score: snap.score,
            turn: snap.turn,
            winner: None,
            win_line: None,
            last_action: None,
            moves: 0,
            finished: snap.game_over,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn win_line(&self) -> Option<WinLine> {
        self.win_line
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Number of actions applied so far.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_over(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            score: self.score,
            turn: self.turn,
            game_over: self.is_over(),
        }
    }

    /// Check `action` for the side to move without applying it.
    pub fn validate(&self, action: &Action) -> Result<(), IllegalAction> {
        if self.is_over() {
            return Err(IllegalAction::GameOver);
        }
        let side = self.turn;
        match *action {
            Action::Place { row, col } => self.check_drop_target((row, col)),
            Action::Summon { row, col, kind } => {
                self.check_drop_target((row, col))?;
                let need = kind.summon_cost().ok_or(IllegalAction::NotSummonable(kind))?;
                let have = self.score.get(side);
                if have < need {
                    return Err(IllegalAction::CannotAfford { need, have });
                }
                Ok(())
            }
            Action::Move {
                from_row,
                from_col,
                to_row,
                to_col,
            } => {
                let (from, to) = ((from_row, from_col), (to_row, to_col));
                if !self.board.in_bounds(from) || !self.board.in_bounds(to) {
                    return Err(IllegalAction::OutOfBounds);
                }
                if !self.board.get(from).is_some_and(|p| p.owner == side) {
                    return Err(IllegalAction::NotYourPiece);
                }
                if !is_legal_move(&self.board, side, from, to) {
                    return Err(IllegalAction::IllegalDestination);
                }
                Ok(())
            }
        }
    }

    fn check_drop_target(&self, p: Point) -> Result<(), IllegalAction> {
        if !self.board.in_bounds(p) {
            Err(IllegalAction::OutOfBounds)
        } else if !self.board.is_empty_at(p) {
            Err(IllegalAction::Occupied)
        } else {
            Ok(())
        }
    }

    /// Apply `action` for the side to move, resolve captures, check for a
    /// win, and pass the turn if the game goes on.
    pub fn apply(&mut self, action: Action) -> Result<Applied, IllegalAction> {
        self.validate(&action)?;
        let side = self.turn;

        let outcome = simulate(&self.board, &self.score, side, &action);
        let win_line = outcome.five_for(side);
        let captured = outcome.captures.iter().map(|c| (c.at, c.piece)).collect();

        self.board = outcome.board;
        self.score = outcome.score;
        self.last_action = Some(action);
        self.moves += 1;

        if win_line.is_some() {
            self.finished = true;
            self.winner = Some(side);
            self.win_line = win_line;
        } else {
            self.turn = side.opposite();
        }

        Ok(Applied {
            side,
            action,
            captured,
            win_line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new(15);
        assert_eq!(game.turn(), Side::Black);
        game.apply(Action::place((7, 7))).unwrap();
        assert_eq!(game.turn(), Side::White);
        game.apply(Action::place((7, 8))).unwrap();
        assert_eq!(game.turn(), Side::Black);
        assert_eq!(game.moves(), 2);
        assert_eq!(game.last_action(), Some(Action::place((7, 8))));
    }

    #[test]
    fn test_rejections() {
        let mut game = Game::new(15);
        game.apply(Action::place((7, 7))).unwrap();
        assert_eq!(game.apply(Action::place((7, 7))), Err(IllegalAction::Occupied));
        assert_eq!(game.apply(Action::place((15, 0))), Err(IllegalAction::OutOfBounds));
        assert_eq!(
            game.apply(Action::summon((1, 1), PieceKind::Knight)),
            Err(IllegalAction::CannotAfford { need: 4, have: 0 })
        );
        assert_eq!(
            game.apply(Action::moving((7, 7), (7, 8))),
            Err(IllegalAction::NotYourPiece)
        );
        assert_eq!(game.turn(), Side::White);
    }

    #[test]
    fn test_move_must_follow_pattern() {
        let mut game = Game::new(15);
        game.apply(Action::place((7, 7))).unwrap();
        game.apply(Action::place((0, 0))).unwrap();
        // A stone cannot step diagonally onto an empty cell.
        assert_eq!(
            game.apply(Action::moving((7, 7), (8, 8))),
            Err(IllegalAction::IllegalDestination)
        );
        assert!(game.apply(Action::moving((7, 7), (8, 7))).is_ok());
    }

    #[test]
    fn test_five_ends_game() {
        let mut game = Game::new(15);
        for c in 0..4 {
            game.apply(Action::place((0, c))).unwrap();
            game.apply(Action::place((5, c))).unwrap();
        }
        let applied = game.apply(Action::place((0, 4))).unwrap();
        assert_eq!(applied.win_line, Some(((0, 0), (0, 4))));
        assert_eq!(game.winner(), Some(Side::Black));
        assert_eq!(game.turn(), Side::Black);
        assert!(game.snapshot().game_over);
        assert_eq!(game.apply(Action::place((9, 9))), Err(IllegalAction::GameOver));
    }

    #[test]
    fn test_finished_snapshot_stays_finished() {
        let mut snap = GameSnapshot::new(15);
        snap.game_over = true;
        let mut game = Game::from_snapshot(snap.clone());
        assert!(game.is_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.snapshot(), snap);
        assert_eq!(game.apply(Action::place((7, 7))), Err(IllegalAction::GameOver));
        assert!(game.board().is_board_empty());
    }

    #[test]
    fn test_live_snapshot_resumes() {
        let mut snap = GameSnapshot::new(15);
        snap.board.put((7, 7), Piece::stone(Side::Black));
        snap.turn = Side::White;
        let mut game = Game::from_snapshot(snap.clone());
        assert!(!game.is_over());
        assert_eq!(game.snapshot(), snap);
        game.apply(Action::place((7, 8))).unwrap();
        assert_eq!(game.turn(), Side::Black);
    }

    #[test]
    fn test_captures_reported() {
        let mut board = Board::new(15);
        board.put((4, 4), Piece::stone(Side::White));
        for p in [(3, 4), (5, 4), (4, 3)] {
            board.put(p, Piece::stone(Side::Black));
        }
        let mut game = Game::with_board(board);
        let applied = game.apply(Action::place((4, 5))).unwrap();
        assert_eq!(applied.captured, vec![((4, 4), Piece::stone(Side::White))]);
        assert_eq!(game.score().black, 1);
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = Game::new(15);
        game.apply(Action::place((7, 7))).unwrap();
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game.snapshot());
        assert_eq!(back.turn, Side::White);
    }
}
