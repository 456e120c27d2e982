//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the grid transition rules and the session that drives
//! them. It has **no dependencies** on terminals, files or input devices:
//!
//! - **Deterministic**: same seed (or scripted uniforms) produces identical games
//! - **Testable**: every rule is a plain function over a `Copy` grid
//! - **Portable**: runs the same under the terminal UI, a test or any other host
//! - **Allocation free**: moves work on fixed-size arrays
//!
//! # Module Structure
//!
//! - [`grid`]: N x N tile grid, line compaction, moves, spawning, stuck detection
//! - [`rng`]: injectable uniform source used for spawning
//! - [`session`]: score, best score, win/loss lifecycle and the best-score port
//! - [`shared`]: mutex-guarded session for multi-threaded hosts
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Game Rules
//!
//! - **Slide**: every tile moves as far as it can in the chosen direction
//! - **Merge**: two equal tiles meeting merge into one of double value, once per move
//! - **Score**: each merge adds the merged value
//! - **Spawn**: after every move that changed the grid, a 2 (90%) or 4 (10%)
//!   appears in a random empty cell
//! - **Win**: a merge produces the target tile (2048 by default); the grid then freezes
//! - **Loss**: the grid is full and no two neighbours are equal
//!
//! # Example
//!
//! ```
//! use space_2048_core::{GameSession, Grid, MemoryStore, ScriptedRng};
//! use space_2048_types::{Direction, GameStatus};
//!
//! let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//! let mut session = GameSession::with_grid(grid, ScriptedRng::new(vec![0.0]), MemoryStore::new());
//!
//! assert!(session.apply_move(Direction::Left));
//! assert_eq!(session.score(), 4);
//! assert_eq!(session.status(), GameStatus::Playing);
//! ```

pub mod grid;
pub mod rng;
pub mod session;
pub mod shared;
pub mod snapshot;

pub use space_2048_types as types;

// Re-export commonly used types for convenience
pub use grid::{compact_line, Grid, LineCompaction, MoveOutcome, SpawnedTile};
pub use rng::{ScriptedRng, SeededRng, TileRng};
pub use session::{BestScoreStore, GameSession, MemoryStore};
pub use shared::SharedSession;
pub use snapshot::SessionSnapshot;
