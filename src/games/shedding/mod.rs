//! The shedding game: one match from deal to winner.
//!
//! Each seat's turn runs in this order:
//!
//! 1. Fold the discard pile back in if the draw pile is low
//! 2. Settle a pending win: confirmed if the pending winner is up again
//!    or the seat to act holds no pick-up or Cancel card
//! 3. Run the turn engine, again for every Cover
//! 4. Show the reports to every AI and to the statistics
//! 5. Pass play on, skipping seats that owe missed turns

mod game;
mod stats;
mod view;

pub use game::{Match, MatchBuilder, MatchOutcome};
pub use stats::{MatchStats, PlayerStats};
pub use view::MatchView;
