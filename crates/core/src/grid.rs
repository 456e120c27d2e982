//! Grid module - the tile grid and its transition rules
//!
//! The grid is an N x N matrix of tile values (N = 4 for a regular game).
//! `0` marks an empty cell; every other value is a power of two >= 2.
//! Coordinates are `(row, col)` with row 0 at the top and col 0 at the left.
//!
//! Everything in here is pure except [`Grid::spawn_tile`], which draws from an
//! injected [`TileRng`].

use arrayvec::ArrayVec;

use crate::rng::TileRng;
use crate::types::{is_tile_value, Direction, GRID_SIZE, INITIAL_TILES, SPAWN_TWO_PROBABILITY};

/// Result of compacting one line toward index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCompaction<const N: usize> {
    /// The compacted line, zero padded on the right.
    pub line: [u32; N],
    /// Sum of every value created by a merge.
    pub score_delta: u32,
    /// Values created by merges, in scan order.
    pub merges: ArrayVec<u32, N>,
}

/// Slide and merge a single line toward index 0.
///
/// Zeros are dropped (keeping order), then one left-to-right pass merges each
/// pair of equal neighbours into a tile of double value. A freshly merged tile
/// is never looked at again, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` and
/// `[4, 2, 2, 0]` becomes `[4, 4, 0, 0]`, never `[8, ...]`.
///
/// # Examples
///
/// ```
/// use space_2048_core::compact_line;
///
/// let out = compact_line([2, 0, 2, 2]);
/// assert_eq!(out.line, [4, 2, 0, 0]);
/// assert_eq!(out.score_delta, 4);
/// ```
pub fn compact_line<const N: usize>(line: [u32; N]) -> LineCompaction<N> {
    let dense: ArrayVec<u32, N> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut out = [0u32; N];
    let mut merges = ArrayVec::new();
    let mut score_delta = 0u32;
    let mut write = 0usize;
    let mut read = 0usize;

    while read < dense.len() {
        let value = dense[read];
        if read + 1 < dense.len() && dense[read + 1] == value {
            let merged = value << 1;
            out[write] = merged;
            score_delta = score_delta.saturating_add(merged);
            merges.push(merged);
            read += 2;
        } else {
            out[write] = value;
            read += 1;
        }
        write += 1;
    }

    LineCompaction {
        line: out,
        score_delta,
        merges,
    }
}

/// Outcome of sliding a whole grid in one direction.
///
/// No tile is spawned; that is left to the caller and only when `moved` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome<const N: usize = GRID_SIZE> {
    pub grid: Grid<N>,
    pub score_delta: u32,
    /// False when no tile shifted or merged; `grid` then equals the input.
    pub moved: bool,
    /// True when some merge produced exactly the target value.
    pub reached_target: bool,
}

/// A tile placed by [`Grid::spawn_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedTile {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Square tile grid, `N` x `N`, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<const N: usize = GRID_SIZE> {
    cells: [[u32; N]; N],
}

impl<const N: usize> Default for Grid<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<[[u32; N]; N]> for Grid<N> {
    fn from(rows: [[u32; N]; N]) -> Self {
        Self::from_rows(rows)
    }
}

impl<const N: usize> Grid<N> {
    /// Create an empty grid
    pub fn new() -> Self {
        Self {
            cells: [[0; N]; N],
        }
    }

    /// Create a grid from explicit rows.
    ///
    /// Every cell must be 0 or a power of two >= 2 (checked in debug builds).
    pub fn from_rows(rows: [[u32; N]; N]) -> Self {
        let grid = Self { cells: rows };
        grid.debug_check();
        grid
    }

    /// Create a fresh game grid: empty, then two spawned tiles.
    pub fn initialize<R: TileRng + ?Sized>(rng: &mut R) -> Self {
        let mut grid = Self::new();
        for _ in 0..INITIAL_TILES {
            grid.spawn_tile(rng);
        }
        grid
    }

    /// Grid dimension
    pub fn size(&self) -> usize {
        N
    }

    pub fn rows(&self) -> &[[u32; N]; N] {
        &self.cells
    }

    /// Get the value at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Set the value at `(row, col)`.
    /// Returns false if out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> bool {
        debug_assert!(
            value == 0 || is_tile_value(value),
            "tile value {value} is not a power of two"
        );
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Copy of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= N`.
    pub fn row(&self, row: usize) -> [u32; N] {
        self.cells[row]
    }

    /// Copy of one column, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `col >= N`.
    pub fn column(&self, col: usize) -> [u32; N] {
        std::array::from_fn(|row| self.cells[row][col])
    }

    fn set_column(&mut self, col: usize, values: [u32; N]) {
        for (row, value) in values.into_iter().enumerate() {
            self.cells[row][col] = value;
        }
    }

    /// Empty cell coordinates in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, v)| **v == 0)
                .map(move |(col, _)| (row, col))
        })
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }

    /// Largest tile on the grid (0 for an empty grid)
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values
    pub fn sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    /// Place one tile in a uniformly chosen empty cell.
    ///
    /// The value is 2 with probability 0.9 and 4 otherwise. Does nothing and
    /// returns `None` when the grid is full.
    pub fn spawn_tile<R: TileRng + ?Sized>(&mut self, rng: &mut R) -> Option<SpawnedTile> {
        let count = self.empty_count();
        if count == 0 {
            return None;
        }

        let pick = ((rng.next_uniform() * count as f64) as usize).min(count - 1);
        let (row, col) = self.empty_cells().nth(pick)?;
        let value = if rng.next_uniform() < SPAWN_TWO_PROBABILITY {
            2
        } else {
            4
        };
        self.cells[row][col] = value;
        Some(SpawnedTile { row, col, value })
    }

    /// Slide every line of the grid in `direction`.
    ///
    /// Rows are used for left/right and columns for up/down. Lines moving
    /// right or down are reversed before compaction and reversed back after.
    pub fn apply_move(&self, direction: Direction, target: u32) -> MoveOutcome<N> {
        let mut next = *self;
        let mut score_delta = 0u32;
        let mut moved = false;
        let mut reached_target = false;

        for i in 0..N {
            let original = if direction.is_horizontal() {
                self.row(i)
            } else {
                self.column(i)
            };

            let mut oriented = original;
            if direction.is_reversed() {
                oriented.reverse();
            }
            let compacted = compact_line(oriented);
            let mut result = compacted.line;
            if direction.is_reversed() {
                result.reverse();
            }

            moved |= result != original;
            score_delta = score_delta.saturating_add(compacted.score_delta);
            reached_target |= compacted.merges.contains(&target);

            if direction.is_horizontal() {
                next.cells[i] = result;
            } else {
                next.set_column(i, result);
            }
        }

        next.debug_check();
        MoveOutcome {
            grid: next,
            score_delta,
            moved,
            reached_target,
        }
    }

    /// True if any cell is empty or has an equal right/lower neighbour.
    pub fn can_move(&self) -> bool {
        for row in 0..N {
            for col in 0..N {
                let v = self.cells[row][col];
                if v == 0 {
                    return true;
                }
                if col + 1 < N && v == self.cells[row][col + 1] {
                    return true;
                }
                if row + 1 < N && v == self.cells[row + 1][col] {
                    return true;
                }
            }
        }
        false
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.cells
                .iter()
                .flatten()
                .all(|&v| v == 0 || is_tile_value(v)),
            "grid holds a value that is not a power of two: {:?}",
            self.cells
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SeededRng};
    use crate::types::WIN_TILE;

    #[test]
    fn test_compact_line_basic_merge() {
        let out = compact_line([2, 2, 0, 0]);
        assert_eq!(out.line, [4, 0, 0, 0]);
        assert_eq!(out.score_delta, 4);
        assert_eq!(out.merges.as_slice(), &[4]);
    }

    #[test]
    fn test_compact_line_single_pass_no_rescan() {
        let out = compact_line([2, 0, 2, 2]);
        assert_eq!(out.line, [4, 2, 0, 0]);
        assert_eq!(out.score_delta, 4);

        let out = compact_line([4, 2, 2, 0]);
        assert_eq!(out.line, [4, 4, 0, 0]);
        assert_eq!(out.score_delta, 4);
    }

    #[test]
    fn test_compact_line_two_pairs() {
        let out = compact_line([2, 2, 2, 2]);
        assert_eq!(out.line, [4, 4, 0, 0]);
        assert_eq!(out.score_delta, 8);
        assert_eq!(out.merges.as_slice(), &[4, 4]);
    }

    #[test]
    fn test_compact_line_slides_without_merge() {
        let out = compact_line([0, 2, 0, 4]);
        assert_eq!(out.line, [2, 4, 0, 0]);
        assert_eq!(out.score_delta, 0);
        assert!(out.merges.is_empty());
    }

    #[test]
    fn test_compact_line_idempotent_on_output() {
        for line in [[2, 4, 8, 16], [4, 0, 0, 0], [8, 2, 0, 0], [0, 0, 0, 0]] {
            let once = compact_line(line);
            let twice = compact_line(once.line);
            assert_eq!(twice.line, once.line);
            assert_eq!(twice.score_delta, 0);
        }
    }

    #[test]
    fn test_compact_line_not_idempotent_on_fresh_pair() {
        // The two 4s are only adjacent after the first pass; each tile merges once per move.
        let once = compact_line([2, 2, 4, 0]);
        assert_eq!(once.line, [4, 4, 0, 0]);
        let twice = compact_line(once.line);
        assert_eq!(twice.line, [8, 0, 0, 0]);
        assert_eq!(twice.score_delta, 8);
    }

    #[test]
    fn test_apply_move_left_right() {
        let grid = Grid::from_rows([[2, 2, 0, 0], [0, 0, 0, 0], [0, 4, 0, 4], [8, 0, 0, 0]]);

        let left = grid.apply_move(Direction::Left, WIN_TILE);
        assert!(left.moved);
        assert_eq!(left.score_delta, 12);
        assert_eq!(
            left.grid.rows(),
            &[[4, 0, 0, 0], [0, 0, 0, 0], [8, 0, 0, 0], [8, 0, 0, 0]]
        );

        let right = grid.apply_move(Direction::Right, WIN_TILE);
        assert_eq!(
            right.grid.rows(),
            &[[0, 0, 0, 4], [0, 0, 0, 0], [0, 0, 0, 8], [0, 0, 0, 8]]
        );
    }

    #[test]
    fn test_apply_move_right_merges_from_the_far_edge() {
        let grid = Grid::from_rows([[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        let out = grid.apply_move(Direction::Right, WIN_TILE);
        assert_eq!(out.grid.row(0), [0, 0, 2, 4]);
    }

    #[test]
    fn test_apply_move_up_down() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 2]]);

        let up = grid.apply_move(Direction::Up, WIN_TILE);
        assert_eq!(up.grid.column(0), [4, 4, 0, 0]);
        assert_eq!(up.grid.column(3), [2, 0, 0, 0]);
        assert_eq!(up.score_delta, 4);

        let down = grid.apply_move(Direction::Down, WIN_TILE);
        assert_eq!(down.grid.column(0), [0, 0, 4, 4]);
        assert_eq!(down.grid.column(3), [0, 0, 0, 2]);
        assert!(!down.reached_target);
    }

    #[test]
    fn test_apply_move_unchanged_grid() {
        let grid = Grid::from_rows([[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]]);
        let out = grid.apply_move(Direction::Left, WIN_TILE);
        assert!(!out.moved);
        assert_eq!(out.grid, grid);
        assert_eq!(out.score_delta, 0);
    }

    #[test]
    fn test_apply_move_reaches_target() {
        let grid = Grid::from_rows([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let out = grid.apply_move(Direction::Left, WIN_TILE);
        assert!(out.reached_target);
        assert_eq!(out.grid.row(0), [2048, 0, 0, 0]);
        assert_eq!(out.score_delta, 2048);
    }

    #[test]
    fn test_apply_move_existing_target_tile_is_not_a_new_win() {
        let grid = Grid::from_rows([[0, 2048, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let out = grid.apply_move(Direction::Left, WIN_TILE);
        assert!(out.moved);
        assert!(!out.reached_target);
    }

    #[test]
    fn test_can_move() {
        assert!(Grid::<4>::new().can_move());

        let checkerboard = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!checkerboard.can_move());

        let horizontal_pair = Grid::from_rows([[2, 2, 8, 4], [4, 8, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(horizontal_pair.can_move());

        let vertical_pair = Grid::from_rows([[2, 4, 2, 4], [4, 8, 4, 2], [2, 8, 2, 4], [4, 2, 4, 2]]);
        assert!(vertical_pair.can_move());
    }

    #[test]
    fn test_spawn_tile_uses_injected_uniforms() {
        let mut grid = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        // 15 empty cells: 0.5 * 15 = 7.5 -> index 7 -> (2, 0). 0.95 >= 0.9 -> a 4.
        let mut rng = ScriptedRng::new(vec![0.5, 0.95]);
        let spawned = grid.spawn_tile(&mut rng).unwrap();
        assert_eq!(spawned, SpawnedTile { row: 2, col: 0, value: 4 });
        assert_eq!(grid.get(2, 0), Some(4));
    }

    #[test]
    fn test_spawn_tile_full_grid_is_noop() {
        let mut grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let before = grid;
        let mut rng = SeededRng::new(7);
        assert_eq!(grid.spawn_tile(&mut rng), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_initialize_places_two_small_tiles() {
        let mut rng = SeededRng::new(42);
        let grid = Grid::<4>::initialize(&mut rng);
        let tiles: Vec<u32> = grid.rows().iter().flatten().copied().filter(|&v| v != 0).collect();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|&v| v == 2 || v == 4));
    }

    #[test]
    fn test_generic_size() {
        let grid = Grid::from_rows([[2, 2, 2], [0, 0, 0], [4, 0, 4]]);
        let out = grid.apply_move(Direction::Left, WIN_TILE);
        assert_eq!(out.grid.rows(), &[[4, 2, 0], [0, 0, 0], [8, 0, 0]]);
        assert_eq!(out.grid.size(), 3);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::<4>::new();
        assert!(grid.set(3, 3, 8));
        assert_eq!(grid.get(3, 3), Some(8));
        assert!(!grid.set(4, 0, 2));
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.highest_tile(), 8);
        assert_eq!(grid.empty_count(), 15);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not a power of two")]
    fn test_from_rows_rejects_non_tile_values() {
        let _ = Grid::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not a power of two")]
    fn test_set_rejects_non_tile_values() {
        let mut grid = Grid::<4>::new();
        grid.set(0, 0, 6);
    }
}
