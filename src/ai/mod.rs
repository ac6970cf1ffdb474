//! AI opponents.
//!
//! `AiPlayer` holds one tier's policy plus everything it learns across
//! turns and matches: ranks seen played, each seat's action histogram by
//! hand size, strategy weights, and a performance score.

mod model;
mod player;
mod strategy;

pub use model::{CardCounter, OpponentModel};
pub use player::{AiPlayer, BLUFF_CHANCE, COUNT_THRESHOLD, RELABEL_THRESHOLD};
pub use strategy::{Difficulty, Strategy, StrategyWeights};
