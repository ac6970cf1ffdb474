//! Card value types: ranks, suits, cards, and runs.
//!
//! Ranks are ordered `2 < 3 < ... < 10 < Jack < Queen < King < Ace` and
//! wrap cyclically for run adjacency (`Ace` is followed by `2`). Suits are
//! ordered Hearts, Diamonds, Clubs, Spades. Both orders are total, so
//! `Card` and `Run` sort deterministically.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One of the 13 card ranks, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position in ascending order (`Two` = 0, `Ace` = 12).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The next rank up, wrapping `Ace` to `Two`.
    #[must_use]
    pub const fn next(self) -> Rank {
        Self::ALL[(self.index() + 1) % 13]
    }

    /// The next rank down, wrapping `Two` to `Ace`.
    #[must_use]
    pub const fn prev(self) -> Rank {
        Self::ALL[(self.index() + 12) % 13]
    }

    /// Low ranks (2 through 6) push the card-count score up.
    #[must_use]
    pub const fn is_low(self) -> bool {
        self.index() <= Rank::Six.index()
    }

    /// High ranks (10 through Ace) push the card-count score down.
    #[must_use]
    pub const fn is_high(self) -> bool {
        self.index() >= Rank::Ten.index()
    }

    /// Display name used in card labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in menu order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable playing card.
///
/// Ordering is by rank, then suit, which is also the display order for
/// sorted hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Whether this card may be played on `top` as a single.
    ///
    /// Aces are always playable; otherwise suit or rank must match.
    #[must_use]
    pub fn plays_on(self, top: Card) -> bool {
        self.rank == Rank::Ace || self.suit == top.suit || self.rank == top.rank
    }

    /// The same-suit card one rank up (cyclic).
    #[must_use]
    pub const fn successor(self) -> Card {
        Card::new(self.rank.next(), self.suit)
    }

    /// The same-suit card one rank down (cyclic).
    #[must_use]
    pub const fn predecessor(self) -> Card {
        Card::new(self.rank.prev(), self.suit)
    }

    /// Whether `other` can follow this card inside a run: same rank, or
    /// cyclically adjacent rank in the same suit.
    #[must_use]
    pub fn links_to(self, other: Card) -> bool {
        self.rank == other.rank
            || (self.suit == other.suit
                && (other.rank == self.rank.next() || other.rank == self.rank.prev()))
    }

    /// One standard 52-card deck in rank-major order.
    pub fn standard_deck() -> impl Iterator<Item = Card> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

/// An ordered sequence of cards played together in one action.
///
/// Runs of four or fewer cards stay inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Run(SmallVec<[Card; 4]>);

impl Run {
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    #[must_use]
    pub fn from_slice(cards: &[Card]) -> Self {
        Self(SmallVec::from_slice(cards))
    }

    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    /// The same cards in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    /// First card played; must be a legal single against the top card.
    #[must_use]
    pub fn head(&self) -> Option<Card> {
        self.0.first().copied()
    }

    /// Last card played; becomes the new top card.
    #[must_use]
    pub fn tail(&self) -> Option<Card> {
        self.0.last().copied()
    }
}

impl Deref for Run {
    type Target = [Card];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Card> for Run {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
