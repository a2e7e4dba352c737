//! Random sampling for the spawner
//!
//! Everything random in a run flows through [`RandomSource`], so a seeded
//! source replays the exact same obstacle sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform integer draws
pub trait RandomSource {
    /// Uniform integer in `[0, n)`. Returns 0 when `n == 0`.
    fn uniform_int(&mut self, n: u32) -> u32;
}

/// Seeded PCG source used by every real run
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }
}

/// Pick from an ordered `(cumulative_threshold, value)` table.
///
/// Draws `uniform_int(100)` and returns the first entry whose threshold
/// exceeds the draw. A draw past every threshold is a valid "nothing" result.
pub fn weighted_choice<R, T>(rng: &mut R, table: &[(u32, T)]) -> Option<T>
where
    R: RandomSource + ?Sized,
    T: Copy,
{
    let draw = rng.uniform_int(100);
    table
        .iter()
        .find(|(threshold, _)| *threshold > draw)
        .map(|&(_, value)| value)
}

/// Sample one value from a small discrete set.
///
/// Single-member sets return their value without consuming a draw.
pub fn sample<R>(rng: &mut R, set: &[f32]) -> Option<f32>
where
    R: RandomSource + ?Sized,
{
    match set {
        [] => None,
        [only] => Some(*only),
        _ => {
            let index = rng.uniform_int(set.len() as u32) as usize;
            set.get(index).copied()
        }
    }
}

/// Replays a fixed list of draws (tests only). Draws are taken modulo `n`;
/// once the script runs out every draw is 0.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.draws.pop_front().unwrap_or(0) % n
    }
}
