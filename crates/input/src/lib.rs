//! Terminal input module (engine-facing).
//!
//! This module is independent of any rendering code. It turns raw terminal
//! events into the closed set of [`crate::types::GameAction`]s:
//!
//! - [`map`]: keyboard (arrow keys, WASD, new game, quit)
//! - [`gesture`]: swipe recognition, fed either with touch points or with
//!   crossterm mouse drags

pub mod gesture;
pub mod map;

pub use space_2048_types as types;

pub use gesture::{swipe_direction, Point, SwipeTracker};
pub use map::{handle_key_event, should_quit};
