//! Difficulty tiers and learning weights.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Suit;

/// AI difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    /// Plays as hard, medium, or easy depending on its record.
    Adaptive,
    /// Picks a strategy by weights that `learn` adjusts.
    Learning,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Adaptive,
        Difficulty::Learning,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Adaptive => "Adaptive",
            Difficulty::Learning => "Learning",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy categories the learning tier chooses between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    PlayRun,
    PlayHigh,
    PlayLow,
}

/// Probabilities for the learning tier.
///
/// `play_run` is the chance of playing the longest run when one exists;
/// otherwise `play_high` is the chance of the highest single over the
/// lowest. `suits` weight the Change Suit pick, in `Suit::ALL` order.
/// Weights are not normalized and may drift outside `[0, 1]` under
/// `learn`; they are clamped when used as probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    pub play_run: f64,
    pub play_high: f64,
    pub play_low: f64,
    pub suits: [f64; 4],
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            play_run: 0.5,
            play_high: 0.5,
            play_low: 0.5,
            suits: [0.25; 4],
        }
    }
}

impl StrategyWeights {
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::PlayRun => self.play_run,
            Strategy::PlayHigh => self.play_high,
            Strategy::PlayLow => self.play_low,
        }
    }

    pub fn adjust(&mut self, strategy: Strategy, delta: f64) {
        let weight = match strategy {
            Strategy::PlayRun => &mut self.play_run,
            Strategy::PlayHigh => &mut self.play_high,
            Strategy::PlayLow => &mut self.play_low,
        };
        *weight += delta;
    }

    #[must_use]
    pub fn suit(&self, suit: Suit) -> f64 {
        self.suits[suit.index()]
    }

    #[must_use]
    pub fn with_suit(mut self, suit: Suit, weight: f64) -> Self {
        self.suits[suit.index()] = weight;
        self
    }
}
