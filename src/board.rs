//! Board model: sides, piece kinds, the grid, and the score pool.
//!
//! The board is a square grid of cells indexed by `(row, col)` with row 0 at
//! the top. Every cell is either empty (`None`) or holds one [`Piece`].
//! Coordinates that fall outside the grid are rejected, never wrapped.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::action::ParseError;
use crate::constants::{BOARD_SIZE, CAPTURE_VALUE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, SUMMON_COST};

/// A cell coordinate as `(row, col)`.
pub type Point = (usize, usize);

/// One of the two players. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Black, Side::White];

    pub fn opposite(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Side::Black),
            "white" | "w" => Ok(Side::White),
            _ => Err(ParseError::Side(s.to_string())),
        }
    }
}

/// The five piece kinds. All of them count toward five-in-a-row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Stone,
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PieceKind {
    /// Kinds that can be summoned, in generation order.
    pub const SUMMONABLE: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Score paid to summon this kind. Stones are placed, never summoned.
    pub fn summon_cost(self) -> Option<u32> {
        match self {
            PieceKind::Stone => None,
            PieceKind::Knight => Some(SUMMON_COST[0]),
            PieceKind::Bishop => Some(SUMMON_COST[1]),
            PieceKind::Rook => Some(SUMMON_COST[2]),
            PieceKind::Queen => Some(SUMMON_COST[3]),
        }
    }

    /// Score credited to whoever captures a piece of this kind.
    pub fn capture_value(self) -> u32 {
        match self {
            PieceKind::Stone => CAPTURE_VALUE[0],
            PieceKind::Knight => CAPTURE_VALUE[1],
            PieceKind::Bishop => CAPTURE_VALUE[2],
            PieceKind::Rook => CAPTURE_VALUE[3],
            PieceKind::Queen => CAPTURE_VALUE[4],
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::Stone => 'S',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'S' => Some(PieceKind::Stone),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

/// A piece on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(owner: Side, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    pub fn stone(owner: Side) -> Self {
        Self::new(owner, PieceKind::Stone)
    }
}

/// Square grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    size: usize,
    cells: Vec<Option<Piece>>,
}

/// Wire shape of a board; validated on the way in.
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    size: usize,
    cells: Vec<Option<Piece>>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = ParseError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&repr.size)
            || repr.cells.len() != repr.size * repr.size
        {
            return Err(ParseError::BoardShape {
                size: repr.size,
                cells: repr.cells.len(),
            });
        }
        Ok(Board {
            size: repr.size,
            cells: repr.cells,
        })
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            size: board.size,
            cells: board.cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_SIZE)
    }
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// If `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {size} out of range"
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// The piece at `p`, or `None` if the cell is empty or off the board.
    pub fn get(&self, p: Point) -> Option<Piece> {
        if !self.in_bounds(p) {
            return None;
        }
        self.cells[self.idx(p)]
    }

    pub fn is_empty_at(&self, p: Point) -> bool {
        self.in_bounds(p) && self.cells[self.idx(p)].is_none()
    }

    /// Put a piece on `p`, returning whatever was there. Off-board writes are ignored.
    pub fn put(&mut self, p: Point, piece: Piece) -> Option<Piece> {
        if !self.in_bounds(p) {
            return None;
        }
        let i = self.idx(p);
        self.cells[i].replace(piece)
    }

    /// Empty `p`, returning the piece that was there.
    pub fn take(&mut self, p: Point) -> Option<Piece> {
        if !self.in_bounds(p) {
            return None;
        }
        let i = self.idx(p);
        self.cells[i].take()
    }

    /// Step from `p` by `(dr, dc)`, or `None` if that leaves the board.
    pub fn offset(&self, (row, col): Point, (dr, dc): (isize, isize)) -> Option<Point> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.in_bounds((r, c)).then_some((r, c))
    }

    /// All coordinates in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        (0..s).flat_map(move |r| (0..s).map(move |c| (r, c)))
    }

    /// All occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Piece)> + '_ {
        self.points()
            .filter_map(move |p| self.cells[self.idx(p)].map(|piece| (p, piece)))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Point, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == side)
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Column letter for `col`. Letters skip `I`, as on a Go board.
pub fn col_label(col: usize) -> char {
    let c = b'A' + col as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

/// Render a point in action notation, e.g. `D4` (rows count from 1 at the top).
pub fn str_point((row, col): Point) -> String {
    format!("{}{}", col_label(col), row + 1)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{} ", col_label(col))?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                let ch = match self.get((row, col)) {
                    Some(Piece { owner: Side::Black, kind }) => kind.letter(),
                    Some(Piece { owner: Side::White, kind }) => kind.letter().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-side score pool: capture tally and summon currency.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn new(black: u32, white: u32) -> Self {
        Self { black, white }
    }

    pub fn get(&self, side: Side) -> u32 {
        self[side]
    }

    fn slot(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::Black => &mut self.black,
            Side::White => &mut self.white,
        }
    }

    pub fn credit(&mut self, side: Side, amount: u32) {
        let slot = self.slot(side);
        *slot = slot.saturating_add(amount);
    }

    /// Debit `cost` from `side`. Refuses (returns `false`) rather than going negative.
    pub fn spend(&mut self, side: Side, cost: u32) -> bool {
        let slot = self.slot(side);
        match slot.checked_sub(cost) {
            Some(rest) => {
                *slot = rest;
                true
            }
            None => false,
        }
    }
}

impl Index<Side> for Score {
    type Output = u32;

    fn index(&self, side: Side) -> &u32 {
        match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for side in Side::ALL {
            assert_ne!(side, side.opposite());
            assert_eq!(side, side.opposite().opposite());
        }
    }

    #[test]
    fn test_out_of_range_access_rejected() {
        let mut board = Board::new(9);
        assert_eq!(board.get((9, 0)), None);
        assert_eq!(board.get((0, 9)), None);
        assert!(!board.is_empty_at((9, 9)));
        assert_eq!(board.put((9, 3), Piece::stone(Side::Black)), None);
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board.offset((0, 0), (-1, 0)), None);
        assert_eq!(board.offset((8, 8), (0, 1)), None);
        assert_eq!(board.offset((4, 4), (-2, 1)), Some((2, 5)));
    }

    #[test]
    fn test_put_and_take() {
        let mut board = Board::new(9);
        let knight = Piece::new(Side::White, PieceKind::Knight);
        assert_eq!(board.put((3, 3), knight), None);
        assert_eq!(board.get((3, 3)), Some(knight));
        assert_eq!(board.pieces_of(Side::White).count(), 1);
        assert_eq!(board.pieces_of(Side::Black).count(), 0);
        assert_eq!(board.take((3, 3)), Some(knight));
        assert!(board.is_board_empty());
    }

    #[test]
    fn test_score_never_negative() {
        let mut score = Score::new(5, 0);
        assert!(!score.spend(Side::Black, 6));
        assert_eq!(score.get(Side::Black), 5);
        assert!(score.spend(Side::Black, 4));
        assert_eq!(score[Side::Black], 1);
        assert!(!score.spend(Side::White, 1));
        score.credit(Side::White, 9);
        assert_eq!(score[Side::White], 9);
    }

    #[test]
    fn test_rule_tables() {
        assert_eq!(PieceKind::Stone.summon_cost(), None);
        assert_eq!(PieceKind::Queen.summon_cost(), Some(10));
        assert_eq!(PieceKind::Stone.capture_value(), 1);
        assert_eq!(PieceKind::Rook.capture_value(), 5);
        for kind in PieceKind::SUMMONABLE {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
    }

    #[test]
    fn test_col_label_skips_i() {
        assert_eq!(col_label(7), 'H');
        assert_eq!(col_label(8), 'J');
        assert_eq!(str_point((3, 2)), "C4");
    }

    #[test]
    fn test_board_display() {
        let mut board = Board::new(5);
        board.put((0, 0), Piece::stone(Side::Black));
        board.put((1, 1), Piece::new(Side::White, PieceKind::Queen));
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].trim(), "A B C D E");
        assert!(lines[1].ends_with("S . . . . "));
        assert!(lines[2].ends_with(". q . . . "));
    }

    #[test]
    fn test_board_json_shape_validated() {
        let mut board = Board::new(5);
        board.put((2, 2), Piece::stone(Side::Black));
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        let bad = r#"{"size":5,"cells":[null,null]}"#;
        assert!(serde_json::from_str::<Board>(bad).is_err());
    }
}
