//! Seats: who sits at the table and how each kind is asked for a choice.
//!
//! `Player` is a closed variant. AI seats answer from their policy; human
//! seats answer through a `HumanInput` supplied by the caller.

mod human;
mod player;

pub use human::{HumanInput, HumanSeat, Prompt, ScriptedInput, MAX_ATTEMPTS};
pub use player::{DecisionContext, Player, SeatSuitChooser};
