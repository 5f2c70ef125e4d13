//! Seeded random source for every roll in the simulation.
//!
//! Damage variance, ability-choice rolls and boss telegraph chances all draw
//! from one [`GameRng`] threaded through the engine, so a seed fully
//! determines a playthrough.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Game random number generator wrapping `ChaCha8Rng`.
///
/// Serialized as the seed plus the stream position, so a restored generator
/// continues exactly where the saved one stopped.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RngSnapshot {
    seed: u64,
    word_pos: u128,
}

#[cfg(feature = "serde")]
impl serde::Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RngSnapshot {
            seed: self.seed,
            word_pos: self.word_pos(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let snapshot = RngSnapshot::deserialize(deserializer)?;
        Ok(GameRng::resume(snapshot.seed, snapshot.word_pos))
    }
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Rebuilds the generator for `seed`, fast-forwarded to `word_pos`.
    pub fn resume(seed: u64, word_pos: u128) -> Self {
        let mut rng = Self::new(seed);
        rng.rng.set_word_pos(word_pos);
        rng
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Position in the key stream, counted in 32-bit words.
    pub fn word_pos(&self) -> u128 {
        self.rng.get_word_pos()
    }

    /// Uniform value in `min..=max`. Returns `min` when the range is empty.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform value in `0..n`. Returns 0 if n is 0.
    pub fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns true with probability percent/100.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }

    /// Choose a random element from a slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len() as u32) as usize])
        }
    }
}
