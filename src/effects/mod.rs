//! Special effects and their resolution.
//!
//! - `EffectKind`: the seven effects a card can be bound to
//! - `Resolution`: applied effect plus the new top-card face
//! - `EffectResolver`: applies effects to `MatchState`
//! - `SuitChooser`: asked for a suit when Change Suit resolves
//!
//! The resolver reads the registry and writes only match state. Hands and
//! piles are untouched.

mod effect;
mod resolver;

pub use effect::{EffectKind, LastEffect, Resolution};
pub use resolver::{EffectResolver, SuitChooser};
