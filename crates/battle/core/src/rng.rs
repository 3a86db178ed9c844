//! RNG oracle for deterministic random number generation.
//!
//! Turn order, enemy move selection, and flee resolution all draw through
//! this trait so a battle is fully replayable: given the same session seed
//! and the same inputs, every roll is identical. Tests inject fixed oracles
//! to force specific orders and flee results.

/// Deterministic random source: same seed in, same value out.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        (self.next_u32(seed) % sides) + 1
    }

    /// Fair coin flip.
    fn coin_flip(&self, seed: u64) -> bool {
        self.next_u32(seed) % 2 == 0
    }

    /// Random index into a collection of `len` elements.
    ///
    /// `len` must be non-zero; callers validate emptiness first.
    fn pick_index(&self, seed: u64, len: usize) -> usize {
        (self.next_u32(seed) as usize) % len
    }
}

/// PCG random number generator (PCG-XSH-RR variant).
///
/// Small state, fast, and statistically solid; produces 32-bit output from
/// 64-bit state. Stateless as implemented here: each call derives one value
/// from the seed it is handed, which keeps the oracle `&self` and shareable.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Compute a per-decision seed from session entropy sources.
///
/// `nonce` increments for every random decision in a session and `context`
/// distinguishes multiple rolls inside the same decision, so no two draws
/// ever share a seed.
pub fn compute_seed(session_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = session_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step (SplitMix64 finalizer constants)
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
