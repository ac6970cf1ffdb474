//! Card model and special-effect registry.
//!
//! ## Key Types
//!
//! - `Rank`, `Suit`: totally ordered, `Rank` cyclic for runs
//! - `Card`: immutable (rank, suit) value
//! - `Run`: ordered cards played as one action
//! - `SpecialEffectRegistry`: exact-card or rank binding to an `EffectKind`

pub mod card;
pub mod registry;

pub use card::{Card, Rank, Run, Suit};
pub use registry::{EffectBinding, EffectKey, SpecialEffectRegistry};
