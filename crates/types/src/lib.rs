//! Core types module - shared data structures and constants
//!
//! This module defines the value types passed between the grid engine, the
//! input collaborator, the renderer and the best-score store. Everything here
//! is plain data with no external dependencies.
//!
//! # Grid
//!
//! - **Size**: 4x4 cells (indexed `[row][col]`, row 0 at the top)
//! - **Empty cell**: `0`
//! - **Tiles**: powers of two, starting at 2
//!
//! # Spawning
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TILES` | 2 | Tiles placed on a fresh grid |
//! | `SPAWN_TWO_PROBABILITY` | 0.9 | Chance a spawned tile is a 2 (otherwise 4) |
//! | `WIN_TILE` | 2048 | Merge result that wins the game |
//!
//! # Examples
//!
//! ```
//! use space_2048_types::{Direction, GameAction, GameStatus, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//!
//! // Actions wrap directions
//! assert_eq!(GameAction::from_str("up"), Some(GameAction::Move(Direction::Up)));
//!
//! assert!(GameStatus::Won.is_terminal());
//! assert_eq!(GRID_SIZE, 4);
//! ```

/// Grid dimension (4 rows x 4 columns)
pub const GRID_SIZE: usize = 4;

/// Tile value that wins the game when produced by a merge
pub const WIN_TILE: u32 = 2048;

/// Number of tiles placed on a fresh grid
pub const INITIAL_TILES: usize = 2;

/// Probability that a spawned tile is a 2 (a 4 otherwise)
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Minimum dominant-axis displacement for a swipe, in device-independent units
pub const DEFAULT_SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Key under which the best score is persisted
pub const BEST_SCORE_KEY: &str = "space2048Best";

/// Returns true for values that may appear on a grid as a tile (2, 4, 8, ...).
#[inline]
pub fn is_tile_value(v: u32) -> bool {
    v >= 2 && v.is_power_of_two()
}


/// The four sliding directions
///
/// A move in a direction pushes every tile toward that edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use space_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("DOWN"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for left/right, which operate on rows.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when the line must be reversed so movement runs toward index 0.
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Actions a player (or any external driver) can request from a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile in the given direction
    Move(Direction),
    /// Throw away the current grid and start over (best score is kept)
    NewGame,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Accepts a direction name or `"new"` / `"newgame"` / `"restart"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use space_2048_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("right"), Some(GameAction::Move(Direction::Right)));
    /// assert_eq!(GameAction::from_str("newGame"), Some(GameAction::NewGame));
    /// assert_eq!(GameAction::from_str("undo"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(dir) = Direction::from_str(s) {
            return Some(GameAction::Move(dir));
        }
        match s.to_lowercase().as_str() {
            "new" | "newgame" | "restart" => Some(GameAction::NewGame),
            _ => None,
        }
    }
}

/// Session lifecycle
///
/// - **Playing**: moves are accepted
/// - **Won**: a merge produced the win tile; the grid is frozen
/// - **Lost**: the grid is full and nothing can merge
///
/// Transitions are one-way out of `Playing`; only a new game resets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}
