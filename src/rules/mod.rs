//! Game rules: what may be played, and how one turn runs.
//!
//! - `MoveGenerator` lists legal singles, runs, and pick-up responses
//! - `TurnEngine` drives one seat through one pass of a turn
//!
//! Both borrow the match's `SpecialEffectRegistry` and never mutate it.

pub mod engine;
pub mod moves;

pub use engine::{TurnContext, TurnEngine, TurnPhase};
pub use moves::{LegalMoves, MoveGenerator, PickupOptions, DEFAULT_SEARCH_LIMIT};
