use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Algorithm used to scramble the tiles.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleAlgorithm {
    /// Single pass over every position, swapping it with a uniformly random
    /// position unless the two coincide.
    ///
    /// This is not exactly uniform: some permutations are more likely than
    /// others.
    #[default]
    SwapIfDifferent,
    /// Fisher-Yates shuffle, which is exactly uniform.
    Uniform,
}
impl ShuffleAlgorithm {
    /// Permutes `items` in place.
    pub fn shuffle<T, G: Rng>(self, items: &mut [T], rng: &mut G) {
        let n = items.len();
        if n < 2 {
            return;
        }
        match self {
            ShuffleAlgorithm::SwapIfDifferent => {
                for i in 0..n {
                    let j = rng.random_range(0..n);
                    if i != j {
                        items.swap(i, j);
                    }
                }
            }
            ShuffleAlgorithm::Uniform => items.shuffle(rng),
        }
    }
}
