//! Special-effect registry.
//!
//! Maps either an exact card or a bare rank to an `EffectKind`. Exact-card
//! bindings win over rank bindings. The registry is configured before a
//! match and handed to the match by value; nothing mutates it afterwards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::effects::EffectKind;

/// Lookup key: a rank, optionally narrowed to one suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectKey {
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
}

impl EffectKey {
    #[must_use]
    pub const fn rank(rank: Rank) -> Self {
        Self { rank, suit: None }
    }

    #[must_use]
    pub const fn card(card: Card) -> Self {
        Self {
            rank: card.rank,
            suit: Some(card.suit),
        }
    }
}

/// One serialized registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBinding {
    #[serde(flatten)]
    pub key: EffectKey,
    pub effect: EffectKind,
}

/// Registry of special-effect bindings.
///
/// ## Example
///
/// ```
/// use rust_shed::cards::{Card, Rank, SpecialEffectRegistry, Suit};
/// use rust_shed::effects::EffectKind;
///
/// let registry = SpecialEffectRegistry::new()
///     .with_rank(Rank::Jack, EffectKind::PickUpFive)
///     .with_card(Card::new(Rank::Jack, Suit::Hearts), EffectKind::Cancel);
///
/// assert_eq!(registry.effect_of(Card::new(Rank::Jack, Suit::Hearts)), Some(EffectKind::Cancel));
/// assert_eq!(registry.effect_of(Card::new(Rank::Jack, Suit::Clubs)), Some(EffectKind::PickUpFive));
/// assert_eq!(registry.effect_of(Card::new(Rank::Five, Suit::Clubs)), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<EffectBinding>", into = "Vec<EffectBinding>")]
pub struct SpecialEffectRegistry {
    bindings: FxHashMap<EffectKey, EffectKind>,
}

impl SpecialEffectRegistry {
    /// An empty registry: every card is plain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock assignment used when nothing is reconfigured.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_rank(Rank::Two, EffectKind::PickUpTwo)
            .with_card(Card::new(Rank::Jack, Suit::Clubs), EffectKind::PickUpFive)
            .with_card(Card::new(Rank::Jack, Suit::Spades), EffectKind::PickUpFive)
            .with_rank(Rank::Eight, EffectKind::MissTurn)
            .with_rank(Rank::Queen, EffectKind::Cover)
            .with_card(Card::new(Rank::Jack, Suit::Hearts), EffectKind::Cancel)
            .with_card(Card::new(Rank::Jack, Suit::Diamonds), EffectKind::Cancel)
            .with_rank(Rank::King, EffectKind::Reverse)
            .with_rank(Rank::Ace, EffectKind::ChangeSuit)
    }

    /// Bind every card of `rank` to `effect`.
    #[must_use]
    pub fn with_rank(mut self, rank: Rank, effect: EffectKind) -> Self {
        self.bind(EffectKey::rank(rank), effect);
        self
    }

    /// Bind one exact card to `effect`.
    #[must_use]
    pub fn with_card(mut self, card: Card, effect: EffectKind) -> Self {
        self.bind(EffectKey::card(card), effect);
        self
    }

    /// Insert or replace a binding. Returns the previous effect for the key.
    pub fn bind(&mut self, key: EffectKey, effect: EffectKind) -> Option<EffectKind> {
        self.bindings.insert(key, effect)
    }

    /// Remove a binding.
    pub fn unbind(&mut self, key: EffectKey) -> Option<EffectKind> {
        self.bindings.remove(&key)
    }

    /// Effect of `card`: exact binding first, then rank binding.
    #[must_use]
    pub fn effect_of(&self, card: Card) -> Option<EffectKind> {
        self.bindings
            .get(&EffectKey::card(card))
            .or_else(|| self.bindings.get(&EffectKey::rank(card.rank)))
            .copied()
    }

    #[must_use]
    pub fn is_pickup(&self, card: Card) -> bool {
        self.effect_of(card).is_some_and(EffectKind::is_pickup)
    }

    #[must_use]
    pub fn is_cancel(&self, card: Card) -> bool {
        self.effect_of(card) == Some(EffectKind::Cancel)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings sorted by key, for display and serialization.
    #[must_use]
    pub fn bindings(&self) -> Vec<EffectBinding> {
        let mut out: Vec<_> = self
            .bindings
            .iter()
            .map(|(&key, &effect)| EffectBinding { key, effect })
            .collect();
        out.sort_by_key(|b| (b.key.rank, b.key.suit));
        out
    }

    /// Card label with its effect appended, e.g. `2 of Hearts[Pick Up Two]`.
    #[must_use]
    pub fn annotate(&self, card: Card) -> String {
        match self.effect_of(card) {
            Some(effect) => format!("{card}[{effect}]"),
            None => card.to_string(),
        }
    }
}

impl From<Vec<EffectBinding>> for SpecialEffectRegistry {
    fn from(bindings: Vec<EffectBinding>) -> Self {
        Self {
            bindings: bindings.into_iter().map(|b| (b.key, b.effect)).collect(),
        }
    }
}

impl From<SpecialEffectRegistry> for Vec<EffectBinding> {
    fn from(registry: SpecialEffectRegistry) -> Self {
        registry.bindings()
    }
}
