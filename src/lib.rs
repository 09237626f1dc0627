//! HyperChess: a five-in-a-row game with chess pieces, and an agent to play it.
//!
//! Sides drop stones or summon chess pieces (paid for with capture points)
//! onto a square board, or move pieces already there. A piece orthogonally
//! enclosed by enemy pieces is captured. The first side with five of its
//! own pieces in a line wins.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and agent tuning parameters
//! - [`board`] - Board, sides, pieces, and score
//! - [`action`] - Actions and their text notation
//! - [`movegen`] - Per-kind movement rules
//! - [`rules`] - Five-in-a-row detection and cross-capture
//! - [`simulate`] - Applying an action to a copy of the position
//! - [`candidates`] - Candidate actions near existing pieces
//! - [`threat`] - Immediate wins and open threes
//! - [`history`] - An agent's recent choices
//! - [`eval`] - Heuristic evaluation
//! - [`agent`] - The decision policy
//! - [`game`] - Snapshots and a reference game loop
//! - [`protocol`] - Text protocol server
//!
//! ## Example
//!
//! ```
//! use hyperchess::agent::Agent;
//! use hyperchess::board::Side;
//! use hyperchess::game::Game;
//!
//! let mut game = Game::new(15);
//! let mut black = Agent::with_seed(Side::Black, 7);
//!
//! let action = black.choose_action(&game.snapshot()).unwrap();
//! game.apply(action).unwrap();
//! println!("Black played {action}");
//! ```

pub mod action;
pub mod agent;
pub mod board;
pub mod candidates;
pub mod constants;
pub mod eval;
pub mod game;
pub mod history;
pub mod movegen;
pub mod protocol;
pub mod rules;
pub mod simulate;
pub mod threat;

pub use action::{Action, ParseError};
pub use agent::{Agent, Decision, Stage};
pub use board::{Board, Piece, PieceKind, Point, Score, Side};
pub use game::{Game, GameSnapshot, IllegalAction};
