//! Match configuration.
//!
//! Everything a match needs before the first card is dealt: deck count,
//! hand size, who sits at the table, the special-effect registry, and the
//! RNG seed. A validated config is treated as immutable for the match.
//!
//! ## Example
//!
//! ```
//! use rust_shed::ai::Difficulty;
//! use rust_shed::core::MatchConfig;
//!
//! let config = MatchConfig::default()
//!     .with_decks(2)
//!     .with_hand_size(5)
//!     .with_humans(0)
//!     .with_ai(Difficulty::Hard)
//!     .with_ai(Difficulty::Learning)
//!     .with_seed(42);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.seat_count(), 3);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::ai::Difficulty;
use crate::cards::SpecialEffectRegistry;

pub const MAX_DECKS: usize = 4;
pub const MAX_HAND_SIZE: usize = 10;
pub const MAX_HUMANS: usize = 10;
pub const MAX_AIS: usize = 10;

/// Who occupies a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatConfig {
    Human,
    Ai(Difficulty),
}

/// Whether the match driver feeds match outcomes into learning AIs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum LearningFeedback {
    /// `learn` is only ever called by the embedding application.
    #[default]
    Manual,
    /// At match end, learning AIs receive `win` or `loss` as reward.
    MatchOutcome { win: f64, loss: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub deck_count: usize,
    pub hand_size: usize,
    /// Human seats come first, then AI seats, in turn order.
    pub seats: Vec<SeatConfig>,
    pub effects: SpecialEffectRegistry,
    /// Draw pile size at or below which the discard pile is folded back in
    /// at the start of a turn.
    pub reshuffle_threshold: usize,
    /// Node budget for the combination-run search on one turn.
    pub run_search_limit: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub learning_feedback: LearningFeedback,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            deck_count: 1,
            hand_size: 7,
            seats: vec![SeatConfig::Human, SeatConfig::Ai(Difficulty::Medium)],
            effects: SpecialEffectRegistry::standard(),
            reshuffle_threshold: 18,
            run_search_limit: 50_000,
            seed: None,
            learning_feedback: LearningFeedback::Manual,
        }
    }
}

impl MatchConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| ConfigError::Json {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_decks(mut self, deck_count: usize) -> Self {
        self.deck_count = deck_count;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Replace the human seats with `count` humans, keeping AI seats.
    #[must_use]
    pub fn with_humans(mut self, count: usize) -> Self {
        self.seats.retain(|s| matches!(s, SeatConfig::Ai(_)));
        let humans = std::iter::repeat(SeatConfig::Human).take(count);
        self.seats.splice(0..0, humans);
        self
    }

    /// Append an AI seat.
    #[must_use]
    pub fn with_ai(mut self, difficulty: Difficulty) -> Self {
        self.seats.push(SeatConfig::Ai(difficulty));
        self
    }

    /// Replace all AI seats.
    #[must_use]
    pub fn with_ais(mut self, difficulties: &[Difficulty]) -> Self {
        self.seats.retain(|s| *s == SeatConfig::Human);
        self.seats
            .extend(difficulties.iter().map(|&d| SeatConfig::Ai(d)));
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: SpecialEffectRegistry) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_run_search_limit(mut self, limit: usize) -> Self {
        self.run_search_limit = limit;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_learning_feedback(mut self, feedback: LearningFeedback) -> Self {
        self.learning_feedback = feedback;
        self
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn human_count(&self) -> usize {
        self.seats.iter().filter(|s| **s == SeatConfig::Human).count()
    }

    #[must_use]
    pub fn ai_count(&self) -> usize {
        self.seat_count() - self.human_count()
    }

    /// Total cards in play: 52 per deck.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck_count * 52
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DECKS).contains(&self.deck_count) {
            return Err(ConfigError::DeckCount(self.deck_count));
        }
        if !(1..=MAX_HAND_SIZE).contains(&self.hand_size) {
            return Err(ConfigError::HandSize(self.hand_size));
        }
        if self.human_count() > MAX_HUMANS {
            return Err(ConfigError::TooManyHumans(self.human_count()));
        }
        if self.ai_count() > MAX_AIS {
            return Err(ConfigError::TooManyAis(self.ai_count()));
        }
        if self.seat_count() < 2 {
            return Err(ConfigError::TooFewSeats(self.seat_count()));
        }

        // every hand plus the starting top card
        let needed = self.seat_count() * self.hand_size + 1;
        if needed > self.total_cards() {
            return Err(ConfigError::DealExceedsDeck {
                needed,
                available: self.total_cards(),
            });
        }
        Ok(())
    }
}
