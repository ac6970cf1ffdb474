//! # rust-shed
//!
//! Rule engine for a multi-player shedding card game: match the top card
//! by suit or rank (Aces always play), chain cards into runs, and empty
//! your hand first. Special cards push pick-up stacks, skip seats, reverse
//! play, grant extra turns, cancel stacks, or change the suit.
//!
//! ## Design Principles
//!
//! 1. **Explicit configuration**: the special-effect registry and match
//!    parameters are values handed to the engine, immutable once a match
//!    starts.
//!
//! 2. **Deterministic**: move lists are sorted and deduplicated, and every
//!    random choice goes through a seeded `GameRng`. The same seed replays
//!    the same match.
//!
//! 3. **Closed seats**: a seat is a human (driven by a caller-supplied
//!    `HumanInput`) or an AI tier. The engine asks both the same questions.
//!
//! ## Modules
//!
//! - `cards`: ranks, suits, cards, runs, and the special-effect registry
//! - `core`: seats, match state, decisions, RNG, configuration, errors
//! - `zones`: the table (draw pile, discard pile, hands, top card)
//! - `effects`: effect kinds and the effect resolver
//! - `rules`: legal-move generation and the per-turn engine
//! - `ai`: AI tiers and what they learn
//! - `seats`: human and AI seats behind one interface
//! - `games`: the match driver

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod effects;
pub mod ai;
pub mod seats;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng,
    MatchConfig, SeatConfig, LearningFeedback,
    ActionKind, Decision, PickupDecision, TurnReport, TurnRecord,
    Direction, MatchState,
    ConfigError, TurnError, MatchError,
};

pub use crate::cards::{Card, Rank, Suit, Run, SpecialEffectRegistry, EffectKey};

pub use crate::zones::{Table, TopCard};

pub use crate::effects::{EffectKind, EffectResolver, Resolution, SuitChooser};

pub use crate::rules::{MoveGenerator, LegalMoves, PickupOptions, TurnEngine, TurnPhase};

pub use crate::ai::{AiPlayer, Difficulty, StrategyWeights};

pub use crate::seats::{Player, HumanInput, HumanSeat, Prompt, DecisionContext};

pub use crate::games::shedding::{Match, MatchBuilder, MatchOutcome, MatchStats, MatchView};
