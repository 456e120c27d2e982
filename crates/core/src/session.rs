//! Session module - one player's game from new game to win or loss
//!
//! [`GameSession`] owns the grid, the score, the best score and the status, and
//! is the only thing that mutates them. It drives the pure [`Grid`] transition
//! rules and pushes best-score increases out through a [`BestScoreStore`].

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::grid::Grid;
use crate::rng::TileRng;
use crate::snapshot::SessionSnapshot;
use crate::types::{Direction, GameAction, GameStatus, WIN_TILE};

/// Persistence port for the best score.
///
/// `load` is called once when a session is created and must never fail:
/// implementations return 0 for anything missing or unreadable. `save` is
/// called on every best-score increase.
pub trait BestScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, best: u32) -> Result<()>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, best: u32) -> Result<()> {
        (**self).save(best)
    }
}

/// In-memory store that records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
    writes: Vec<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a best score from an earlier session
    pub fn with_best(best: u32) -> Self {
        Self {
            best,
            writes: Vec::new(),
        }
    }

    /// Every value passed to `save`, oldest first
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.best = best;
        self.writes.push(best);
        Ok(())
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession<R, S> {
    grid: Grid,
    score: u32,
    best_score: u32,
    status: GameStatus,
    moves: u32,
    target: u32,
    rng: R,
    store: S,
}

impl<R: TileRng, S: BestScoreStore> GameSession<R, S> {
    /// Create a session with the classic 2048 target and start a game
    pub fn new(rng: R, store: S) -> Self {
        Self::with_target(rng, store, WIN_TILE)
    }

    /// Create a session that is won by producing `target`
    pub fn with_target(rng: R, store: S, target: u32) -> Self {
        let mut session = Self::unstarted(rng, store, target);
        session.new_game();
        session
    }

    /// Create a session that continues from an existing grid.
    ///
    /// Score and move count start at zero. A grid that is already stuck starts
    /// out lost.
    pub fn with_grid(grid: Grid, rng: R, store: S) -> Self {
        let mut session = Self::unstarted(rng, store, WIN_TILE);
        session.grid = grid;
        if !grid.can_move() {
            session.status = GameStatus::Lost;
        }
        session
    }

    fn unstarted(rng: R, store: S, target: u32) -> Self {
        debug_assert!(
            target >= 4 && target.is_power_of_two(),
            "target must be a reachable tile value, got {target}"
        );
        let best_score = store.load();
        Self {
            grid: Grid::new(),
            score: 0,
            best_score,
            status: GameStatus::Playing,
            moves: 0,
            target,
            rng,
            store,
        }
    }

    /// Start over with a fresh grid. The best score is kept.
    pub fn new_game(&mut self) {
        self.grid = Grid::initialize(&mut self.rng);
        self.score = 0;
        self.moves = 0;
        self.status = GameStatus::Playing;
        info!(best_score = self.best_score, "new game");
    }

    /// Slide the grid in `direction`.
    ///
    /// Returns true if the session changed. Nothing happens once the game is
    /// won or lost, or when the move would not shift any tile.
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        let outcome = self.grid.apply_move(direction, self.target);
        if !outcome.moved {
            debug!(direction = direction.as_str(), "move ignored, grid unchanged");
            return false;
        }

        self.grid = outcome.grid;
        self.score = self.score.saturating_add(outcome.score_delta);
        self.moves += 1;

        if self.score > self.best_score {
            self.best_score = self.score;
            if let Err(err) = self.store.save(self.best_score) {
                warn!(best_score = self.best_score, "failed to persist best score: {err:#}");
            }
        }

        if outcome.reached_target {
            self.status = GameStatus::Won;
            info!(score = self.score, moves = self.moves, "target tile reached");
        }

        let spawned = self.grid.spawn_tile(&mut self.rng);

        if self.status == GameStatus::Playing && !self.grid.can_move() {
            self.status = GameStatus::Lost;
            info!(score = self.score, moves = self.moves, "no moves left");
        }

        debug!(
            direction = direction.as_str(),
            score_delta = outcome.score_delta,
            score = self.score,
            spawned = ?spawned,
            "move applied"
        );
        true
    }

    /// Apply an action from the input layer
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => self.apply_move(direction),
            GameAction::NewGame => {
                self.new_game();
                true
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.grid = *self.grid.rows();
        out.score = self.score;
        out.best_score = self.best_score;
        out.status = self.status;
        out.moves = self.moves;
        out.highest_tile = self.grid.highest_tile();
        out.target = self.target;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snap = SessionSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SeededRng};

    fn session_with(rows: [[u32; 4]; 4]) -> GameSession<ScriptedRng, MemoryStore> {
        // Always pick the first empty cell and spawn a 2.
        GameSession::with_grid(
            Grid::from_rows(rows),
            ScriptedRng::new(vec![0.0, 0.0]),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_new_session_starts_playing_with_two_tiles() {
        let session = GameSession::new(SeededRng::new(1), MemoryStore::with_best(500));
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best_score(), 500);
        assert_eq!(session.grid().empty_count(), 14);
    }

    #[test]
    fn test_merge_scores_and_spawns() {
        let mut session = session_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(session.apply_move(Direction::Left));

        assert_eq!(session.score(), 4);
        assert_eq!(session.moves(), 1);
        // Merged tile at (0,0); first empty cell (0,1) receives the spawn.
        assert_eq!(session.grid().row(0), [4, 2, 0, 0]);
        assert_eq!(session.grid().empty_count(), 14);
    }

    #[test]
    fn test_noop_move_leaves_state_untouched() {
        let mut session = session_with([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = session.snapshot();

        assert!(!session.apply_move(Direction::Left));
        assert!(!session.apply_move(Direction::Left));
        assert_eq!(session.snapshot(), before);
        assert!(session.store().writes().is_empty());
    }

    #[test]
    fn test_best_score_advances_and_is_persisted() {
        let mut session = session_with([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
        assert!(session.apply_move(Direction::Left));
        assert_eq!(session.score(), 12);
        assert_eq!(session.best_score(), 12);
        assert_eq!(session.store().writes(), &[12]);
    }

    #[test]
    fn test_win_freezes_session() {
        let mut session = session_with([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(session.apply_move(Direction::Left));
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.grid().get(0, 0), Some(2048));

        let frozen = session.snapshot();
        for dir in Direction::ALL {
            assert!(!session.apply_move(dir));
        }
        assert_eq!(session.snapshot(), frozen);
    }

    #[test]
    fn test_winning_move_that_jams_the_board_stays_won() {
        let mut session = session_with([
            [1024, 1024, 8, 16],
            [4, 2, 4, 8],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(session.apply_move(Direction::Left));
        // The spawn fills the only hole at (0,3) and nothing can merge.
        assert_eq!(session.grid().row(0), [2048, 8, 16, 2]);
        assert!(!session.grid().can_move());
        assert_eq!(session.status(), GameStatus::Won);
    }

    #[test]
    fn test_loss_after_spawn_fills_grid() {
        // Sliding row 3 left opens one cell, and the spawn closes the board again.
        let mut session = session_with([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [0, 8, 16, 32]]);
        assert!(session.apply_move(Direction::Left));
        // Row 3 becomes [8, 16, 32, 0]; the spawned 2 lands at (3,3).
        assert_eq!(session.grid().row(3), [8, 16, 32, 2]);
        assert_eq!(session.status(), GameStatus::Lost);

        assert!(!session.apply_move(Direction::Up));
    }

    #[test]
    fn test_new_game_resets_but_keeps_best() {
        let mut session = session_with([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        session.apply_move(Direction::Left);
        assert_eq!(session.status(), GameStatus::Won);

        assert!(session.apply_action(GameAction::NewGame));
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.best_score(), 2048);
        assert_eq!(session.grid().empty_count(), 14);
    }

    #[test]
    fn test_with_grid_detects_stuck_board() {
        let session = session_with([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(session.status(), GameStatus::Lost);
    }

    #[test]
    fn test_custom_target() {
        let mut session = GameSession::with_target(
            ScriptedRng::new(vec![0.0]),
            MemoryStore::new(),
            4,
        );
        // A script of zeros fills the first empty cells with 2s.
        assert_eq!(session.grid().row(0), [2, 2, 0, 0]);
        assert!(session.apply_move(Direction::Left));
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.target(), 4);
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = session_with([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        session.apply_move(Direction::Left);
        let snap = session.snapshot();
        assert_eq!(snap.grid, *session.grid().rows());
        assert_eq!(snap.score, 4);
        assert_eq!(snap.best_score, 4);
        assert_eq!(snap.moves, 1);
        assert_eq!(snap.highest_tile, 4);
        assert!(snap.playable());
    }

    struct FailingStore;

    impl BestScoreStore for FailingStore {
        fn load(&self) -> u32 {
            0
        }

        fn save(&mut self, _best: u32) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[test]
    fn test_store_failure_does_not_block_the_game() {
        let mut session = GameSession::with_grid(
            Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
            ScriptedRng::new(vec![0.0]),
            FailingStore,
        );
        assert!(session.apply_move(Direction::Left));
        assert_eq!(session.best_score(), 4);
    }
}
