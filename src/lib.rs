//! Space 2048 (workspace facade crate).
//!
//! Re-exports the per-concern crates under `crates/` as
//! `space_2048::{core,input,store,term,types}` and holds the pieces only the
//! terminal binary needs: configuration and logging setup.

pub mod config;
pub mod logging;

pub use space_2048_core as core;
pub use space_2048_input as input;
pub use space_2048_store as store;
pub use space_2048_term as term;
pub use space_2048_types as types;
