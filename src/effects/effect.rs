//! Special-effect kinds and resolution results.
//!
//! An `EffectKind` is what a registered card does when played. The
//! resolver reports back a `Resolution` carrying the effect that was
//! actually applied (if any) and the card that now sits on top.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The seven configurable card effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Adds 2 to the pick-up stack.
    PickUpTwo,
    /// Adds 5 to the pick-up stack.
    PickUpFive,
    /// The next player (per card) in turn direction misses a turn.
    MissTurn,
    /// The player who played it takes another turn immediately.
    Cover,
    /// Clears a pending pick-up stack.
    Cancel,
    /// Flips the turn direction.
    Reverse,
    /// The player names the suit of the new top card.
    ChangeSuit,
}

impl EffectKind {
    /// All effects in configuration-menu order.
    pub const ALL: [EffectKind; 7] = [
        EffectKind::PickUpTwo,
        EffectKind::PickUpFive,
        EffectKind::MissTurn,
        EffectKind::Cover,
        EffectKind::Cancel,
        EffectKind::Reverse,
        EffectKind::ChangeSuit,
    ];

    /// Whether this effect adds to the pick-up stack.
    #[must_use]
    pub const fn is_pickup(self) -> bool {
        matches!(self, EffectKind::PickUpTwo | EffectKind::PickUpFive)
    }

    /// Cards added to the pick-up stack (0 for non-pick-up effects).
    #[must_use]
    pub const fn pickup_amount(self) -> u32 {
        match self {
            EffectKind::PickUpTwo => 2,
            EffectKind::PickUpFive => 5,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::PickUpTwo => "Pick Up Two",
            EffectKind::PickUpFive => "Pick Up Five",
            EffectKind::MissTurn => "Miss a Turn",
            EffectKind::Cover => "Cover",
            EffectKind::Cancel => "Cancel",
            EffectKind::Reverse => "Reverse",
            EffectKind::ChangeSuit => "Change Suit",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The most recent stack-relevant effect, consulted only by Cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastEffect {
    PickUp,
    Cover,
}

/// Outcome of resolving one card or one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Effect that was applied last, or `None` for a plain card.
    pub effect: Option<EffectKind>,
    /// Face of the new top card. Differs from the played card only after
    /// a suit change.
    pub top: Card,
}

impl Resolution {
    #[must_use]
    pub fn plain(top: Card) -> Self {
        Self { effect: None, top }
    }

    #[must_use]
    pub fn applied(effect: EffectKind, top: Card) -> Self {
        Self {
            effect: Some(effect),
            top,
        }
    }

    /// Whether the play grants the acting player another turn.
    #[must_use]
    pub fn grants_extra_turn(&self) -> bool {
        self.effect == Some(EffectKind::Cover)
    }
}
