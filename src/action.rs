//! Actions and their text notation.
//!
//! | action | notation | meaning                                   |
//! |--------|----------|-------------------------------------------|
//! | place  | `D4`     | put a Stone on D4                         |
//! | summon | `N@D4`   | pay the Knight's cost and put one on D4   |
//! | move   | `D4-E5`  | move the piece on D4 to E5 (may capture)  |
//!
//! Columns are letters starting at `A` and skipping `I`; rows count from 1
//! at the top of the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{PieceKind, Point, str_point};

/// Errors produced while parsing notation or snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid coordinate '{0}'")]
    Coord(String),
    #[error("invalid action '{0}'")]
    Action(String),
    #[error("unknown piece letter '{0}'")]
    PieceLetter(char),
    #[error("'{0}' cannot be summoned")]
    NotSummonable(char),
    #[error("invalid side '{0}'")]
    Side(String),
    #[error("board of size {size} cannot hold {cells} cells")]
    BoardShape { size: usize, cells: usize },
}

/// One thing a side can do on its turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Create a Stone on an empty cell.
    Place { row: usize, col: usize },
    /// Pay for and create a non-Stone piece on an empty cell.
    Summon { row: usize, col: usize, kind: PieceKind },
    /// Relocate one of the acting side's pieces, capturing an enemy occupant.
    Move {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },
}

impl Action {
    pub fn place((row, col): Point) -> Self {
        Action::Place { row, col }
    }

    pub fn summon((row, col): Point, kind: PieceKind) -> Self {
        Action::Summon { row, col, kind }
    }

    pub fn moving((from_row, from_col): Point, (to_row, to_col): Point) -> Self {
        Action::Move {
            from_row,
            from_col,
            to_row,
            to_col,
        }
    }

    /// The cell this action lands on.
    pub fn target(&self) -> Point {
        match *self {
            Action::Place { row, col } | Action::Summon { row, col, .. } => (row, col),
            Action::Move { to_row, to_col, .. } => (to_row, to_col),
        }
    }

    /// True for actions that create a piece (Place and Summon).
    pub fn is_drop(&self) -> bool {
        !matches!(self, Action::Move { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Action::Place { row, col } => write!(f, "{}", str_point((row, col))),
            Action::Summon { row, col, kind } => {
                write!(f, "{}@{}", kind.letter(), str_point((row, col)))
            }
            Action::Move {
                from_row,
                from_col,
                to_row,
                to_col,
            } => write!(
                f,
                "{}-{}",
                str_point((from_row, from_col)),
                str_point((to_row, to_col))
            ),
        }
    }
}

/// Parse a coordinate such as `D4` or `t19` into `(row, col)`.
///
/// The result is not bounds-checked against any board.
pub fn parse_point(s: &str) -> Result<Point, ParseError> {
    let err = || ParseError::Coord(s.to_string());
    let mut chars = s.trim().chars();
    let letter = chars.next().ok_or_else(err)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return Err(err());
    }
    let mut col = (letter as u8 - b'A') as usize;
    if letter > 'I' {
        col -= 1;
    }

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let row: usize = digits.parse().map_err(|_| err())?;
    if row == 0 {
        return Err(err());
    }
    Ok((row - 1, col))
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((kind, cell)) = s.split_once('@') {
            let mut letters = kind.chars();
            let (Some(letter), None) = (letters.next(), letters.next()) else {
                return Err(ParseError::Action(s.to_string()));
            };
            let kind = PieceKind::from_letter(letter).ok_or(ParseError::PieceLetter(letter))?;
            if kind.summon_cost().is_none() {
                return Err(ParseError::NotSummonable(letter));
            }
            return Ok(Action::summon(parse_point(cell)?, kind));
        }
        if let Some((from, to)) = s.split_once('-') {
            return Ok(Action::moving(parse_point(from)?, parse_point(to)?));
        }
        parse_point(s)
            .map(Action::place)
            .map_err(|_| ParseError::Action(s.to_string()))
    }
}
