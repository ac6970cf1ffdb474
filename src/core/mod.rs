//! Core engine types: seats, state, decisions, RNG, configuration, errors.
//!
//! Nothing in here knows how cards are matched or how effects resolve;
//! those live in `rules` and `effects` and mutate `MatchState` through its
//! methods.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{LearningFeedback, MatchConfig, SeatConfig};
pub use action::{ActionKind, Decision, PickupDecision, TurnRecord, TurnReport};
pub use state::{Direction, MatchState};
pub use error::{ConfigError, MatchError, TurnError};
