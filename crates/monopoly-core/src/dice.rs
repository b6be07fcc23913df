//! Dice and every other source of randomness in a game.
//!
//! All rolls, coin flips and shuffles go through one seedable `Dice` so a
//! game can be replayed from its seed. Rolls and flips can also be loaded
//! ahead of time; loaded values are consumed before the RNG is consulted.

use rand::prelude::*;
use std::collections::VecDeque;

/// Two six-sided dice plus a fair coin
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
    loaded_rolls: VecDeque<(u8, u8)>,
    loaded_flips: VecDeque<bool>,
}

impl Dice {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            loaded_rolls: VecDeque::new(),
            loaded_flips: VecDeque::new(),
        }
    }

    /// Queue rolls to be returned before any random ones
    pub fn load(&mut self, rolls: impl IntoIterator<Item = (u8, u8)>) {
        self.loaded_rolls.extend(rolls);
    }

    /// Queue coin flips to be returned before any random ones
    pub fn load_flips(&mut self, flips: impl IntoIterator<Item = bool>) {
        self.loaded_flips.extend(flips);
    }

    /// Roll two dice
    pub fn roll(&mut self) -> (u8, u8) {
        if let Some(roll) = self.loaded_rolls.pop_front() {
            return roll;
        }
        (self.rng.gen_range(1..=6), self.rng.gen_range(1..=6))
    }

    /// Sum of a fresh roll
    pub fn roll_total(&mut self) -> u32 {
        let (a, b) = self.roll();
        (a + b) as u32
    }

    /// Fair coin flip
    pub fn coin_flip(&mut self) -> bool {
        if let Some(flip) = self.loaded_flips.pop_front() {
            return flip;
        }
        self.rng.gen_bool(0.5)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::from_entropy()
    }
}
