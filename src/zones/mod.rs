//! Card locations.
//!
//! ## Key Types
//!
//! - `Table`: draw pile, discard pile, per-seat hands, top card
//! - `TopCard`: the physical top card and the face plays must match
//!
//! Hands are private to their seat; presentation code reads them through
//! `games::shedding::MatchView`.

pub mod piles;

pub use piles::{Table, TopCard};
