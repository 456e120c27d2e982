//! RNG module - injectable randomness for tile spawning
//!
//! Tile spawning is the only random part of the game. The grid draws from a
//! [`TileRng`], which yields uniforms in `[0, 1)`:
//!
//! - [`SeededRng`]: `rand`'s `StdRng`, seeded once per process (or per test)
//! - [`ScriptedRng`]: replays a fixed list of uniforms for exact assertions

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait TileRng {
    fn next_uniform(&mut self) -> f64;
}

impl<T: TileRng + ?Sized> TileRng for &mut T {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

impl<T: TileRng + ?Sized> TileRng for Box<T> {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Seedable generator backed by `StdRng`
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
    seed: Option<u64>,
}

impl SeededRng {
    /// Create a deterministic generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// The seed this generator was built from, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl TileRng for SeededRng {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of uniforms, wrapping around at the end.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: Vec<f64>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, pos: 0 }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl TileRng for ScriptedRng {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
