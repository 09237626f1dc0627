//! Constants for board dimensions, search limits, and heuristic weights.
//!
//! This module contains all the tuning knobs of the engine. The rule tables
//! (summon costs and capture values) are indexed through
//! [`PieceKind`](crate::board::PieceKind) accessors rather than read directly.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board19x19` (default): 19x19 board
//! - `board15x15`: 15x15 board
//!
//! To compile for a specific board size:
//! ```sh
//! cargo build                                              # 19x19 (default)
//! cargo build --no-default-features --features board15x15  # 15x15
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
#[cfg(feature = "board19x19")]
pub const BOARD_SIZE: usize = 19;

#[cfg(feature = "board15x15")]
pub const BOARD_SIZE: usize = 15;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board19x19", feature = "board15x15"))]
compile_error!("Cannot enable both 'board19x19' and 'board15x15' features at the same time");

#[cfg(not(any(feature = "board19x19", feature = "board15x15")))]
compile_error!("Must enable exactly one board size feature: 'board19x19' or 'board15x15'");

/// Smallest board accepted by [`Board::new`](crate::board::Board::new).
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest board accepted; column letters run out past this.
pub const MAX_BOARD_SIZE: usize = 25;

/// Number of contiguous pieces needed to win.
pub const WIN_LENGTH: usize = 5;

// =============================================================================
// Rule Tables
// =============================================================================

/// Summon cost for Knight, Bishop, Rook, Queen (in that order).
pub const SUMMON_COST: [u32; 4] = [4, 4, 6, 10];

/// Capture value for Stone, Knight, Bishop, Rook, Queen (in that order).
pub const CAPTURE_VALUE: [u32; 5] = [1, 3, 3, 5, 9];

// =============================================================================
// Search Limits
// =============================================================================

/// Empty cells within this Chebyshev distance of a piece are candidate targets.
pub const FRONTIER_RADIUS: usize = 2;

/// Maximum number of candidates evaluated from any candidate list.
pub const MAX_CANDIDATES: usize = 260;

/// Threat counting stops once this many winning replies are found.
pub const THREAT_SATURATION: usize = 6;

/// Number of chosen actions remembered by an agent.
pub const HISTORY_CAPACITY: usize = 40;

/// How many of the most recent actions the repetition penalty looks at.
pub const REPETITION_WINDOW: usize = 8;

/// Scores within this distance of the best are considered tied.
pub const TIE_EPSILON: f64 = 1e-6;

/// Maximum size of the tie set the final random pick draws from.
pub const TIE_SET_CAP: usize = 10;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Penalty for repeating the most recent action (divided by recency rank).
pub const REPETITION_PENALTY: f64 = 9.0;

/// Weight of score gained by the acting side.
pub const CAPTURE_GAIN_WEIGHT: f64 = 7.0;

/// Flat bonus for any summon.
pub const SUMMON_BONUS: f64 = 7.0;

/// Summon bonus per point of the summoned kind's capture value.
pub const SUMMON_VALUE_WEIGHT: f64 = 0.7;

/// Multiplier on the acting side's own line potential.
pub const OWN_LINE_WEIGHT: f64 = 2.2;

/// Multiplier on the opponent's line potential (subtracted).
pub const OPP_LINE_WEIGHT: f64 = 2.0;

/// Line potential (base, per open end) for runs of 2, 3 and 4.
pub const LINE_RUN_SCORES: [(f64, f64); 3] = [(4.0, 2.0), (10.0, 4.0), (25.0, 6.0)];

/// Pressure bonus by Manhattan distance to the nearest enemy (1, 2, 3).
pub const PRESSURE_BY_DISTANCE: [f64; 3] = [6.0, 3.0, 1.0];

/// Pressure applied when no enemy is within distance 3.
pub const PRESSURE_FAR: f64 = -0.5;

/// Bonus per orthogonally adjacent enemy piece.
pub const PRESSURE_ADJACENT: f64 = 2.0;

/// Risk when three neighbors are enemies and the fourth is empty.
pub const RISK_ONE_FROM_SURROUNDED: f64 = 6.5;

/// Risk when two neighbors are enemies and two are empty.
pub const RISK_TWO_SIDES: f64 = 2.0;

/// Risk when all four neighbors are enemies.
pub const RISK_SURROUNDED: f64 = 9.0;

/// Bonus for a blocking move that lowers the opponent's winning replies.
pub const BLOCK_BONUS: f64 = 60.0;

// =============================================================================
// Directions
// =============================================================================

/// Orthogonal offsets (row, col): North, South, West, East.
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal offsets (row, col): NW, NE, SW, SE.
pub const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Knight jumps.
pub const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Line axes in scan order: vertical, horizontal, down-right, down-left.
pub const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
