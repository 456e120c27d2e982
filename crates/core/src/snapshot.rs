use crate::types::{GameStatus, GRID_SIZE, WIN_TILE};

/// Read-only view of a session, handed to renderers after every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub grid: [[u32; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub status: GameStatus,
    /// Successful moves in the current game.
    pub moves: u32,
    pub highest_tile: u32,
    pub target: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u32; GRID_SIZE]; GRID_SIZE];
        self.score = 0;
        self.best_score = 0;
        self.status = GameStatus::Playing;
        self.moves = 0;
        self.highest_tile = 0;
        self.target = WIN_TILE;
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[0u32; GRID_SIZE]; GRID_SIZE],
            score: 0,
            best_score: 0,
            status: GameStatus::Playing,
            moves: 0,
            highest_tile: 0,
            target: WIN_TILE,
        };
        s.clear();
        s
    }
}
