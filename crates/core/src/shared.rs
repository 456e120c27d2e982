//! Shared session handle for hosts that deliver input from several threads.
//!
//! Every call takes the lock for the full transition, so moves never
//! interleave. A poisoned lock is recovered: a transition either finished or
//! never started mutating, so the state behind it is always consistent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::rng::TileRng;
use crate::session::{BestScoreStore, GameSession};
use crate::snapshot::SessionSnapshot;
use crate::types::{Direction, GameAction};

#[derive(Debug)]
pub struct SharedSession<R, S> {
    inner: Arc<Mutex<GameSession<R, S>>>,
}

impl<R, S> Clone for SharedSession<R, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: TileRng, S: BestScoreStore> SharedSession<R, S> {
    pub fn new(session: GameSession<R, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameSession<R, S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apply_move(&self, direction: Direction) -> bool {
        self.lock().apply_move(direction)
    }

    pub fn apply_action(&self, action: GameAction) -> bool {
        self.lock().apply_action(action)
    }

    pub fn new_game(&self) {
        self.lock().new_game();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the session
    pub fn with<T>(&self, f: impl FnOnce(&mut GameSession<R, S>) -> T) -> T {
        f(&mut self.lock())
    }
}
