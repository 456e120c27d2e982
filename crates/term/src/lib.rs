//! Terminal front end for Space 2048.
//!
//! Rendering goes through a small framebuffer rather than a widget toolkit:
//! [`GameView`] draws a [`SessionSnapshot`](crate::core::SessionSnapshot) into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes it with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod tiles;

pub use space_2048_core as core;
pub use space_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
pub use tiles::{tile_theme, TileTheme, TILE_THEMES, UNKNOWN_TILE};
