//! The physical table: draw pile, discard pile, hands, and the top card.
//!
//! `Table` owns every card in play. Cards only move between its
//! collections, so the total is constant for the life of a match:
//!
//! ```text
//! draw pile + discard pile + all hands + 1 (top card) = 52 x deck count
//! ```
//!
//! A Change Suit play keeps the physical Ace on top while the effective
//! face carries the chosen suit; only the physical card ever moves to the
//! discard pile.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::core::{ConfigError, GameRng, PlayerId, PlayerMap, TurnError};

/// The card on top of the discard pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCard {
    /// The card actually lying there.
    pub physical: Card,
    /// What new plays must match.
    pub face: Card,
}

impl TopCard {
    #[must_use]
    pub const fn new(card: Card) -> Self {
        Self {
            physical: card,
            face: card,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Front is the next card drawn.
    draw_pile: VecDeque<Card>,
    discard_pile: Vec<Card>,
    hands: PlayerMap<Vec<Card>>,
    top: TopCard,
}

impl Table {
    /// Shuffle `deck_count` decks, deal `hand_size` cards to each seat in
    /// seat order, and turn the next card face up.
    pub fn deal(
        deck_count: usize,
        seat_count: usize,
        hand_size: usize,
        rng: &mut GameRng,
    ) -> Result<Self, ConfigError> {
        let mut deck: Vec<Card> = (0..deck_count).flat_map(|_| Card::standard_deck()).collect();
        let needed = seat_count * hand_size + 1;
        if needed > deck.len() {
            return Err(ConfigError::DealExceedsDeck {
                needed,
                available: deck.len(),
            });
        }
        rng.shuffle(&mut deck);

        let mut cards = deck.into_iter();
        let hands = PlayerMap::new(seat_count, |_| cards.by_ref().take(hand_size).collect());
        let top = cards.next().ok_or(ConfigError::DealExceedsDeck {
            needed,
            available: needed - 1,
        })?;

        Ok(Self {
            draw_pile: cards.collect(),
            discard_pile: Vec::new(),
            hands,
            top: TopCard::new(top),
        })
    }

    /// Assemble a table from explicit contents.
    #[must_use]
    pub fn from_parts(hands: Vec<Vec<Card>>, top: Card, draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile: draw_pile.into(),
            discard_pile,
            hands: PlayerMap::from(hands),
            top: TopCard::new(top),
        }
    }

    #[must_use]
    pub fn top(&self) -> TopCard {
        self.top
    }

    /// The card new plays are matched against.
    #[must_use]
    pub fn top_face(&self) -> Card {
        self.top.face
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.hands.get(player).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn hand_sizes(&self) -> PlayerMap<usize> {
        self.hands.map(|_, h| h.len())
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Every card on the table, which never changes during a match.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len() + self.hands.values().map(Vec::len).sum::<usize>() + 1
    }

    /// Seats other than `actor` still holding cards.
    #[must_use]
    pub fn active_opponents(&self, actor: PlayerId) -> usize {
        self.hands
            .iter()
            .filter(|(p, h)| *p != actor && !h.is_empty())
            .count()
    }

    /// Draw one card into `player`'s hand, folding the discard pile back
    /// in when the draw pile is empty.
    pub fn draw(&mut self, player: PlayerId, rng: &mut GameRng) -> Result<Card, TurnError> {
        if self.hands.get(player).is_none() {
            return Err(TurnError::UnknownSeat(player));
        }
        if self.draw_pile.is_empty() {
            self.reshuffle(rng);
        }
        let card = self.draw_pile.pop_front().ok_or(TurnError::ResourceExhausted)?;
        self.hands[player].push(card);
        Ok(card)
    }

    /// Draw up to `count` cards, stopping early when both piles run out.
    pub fn draw_many(&mut self, player: PlayerId, count: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw(player, rng) {
                Ok(card) => drawn.push(card),
                Err(_) => break,
            }
        }
        drawn
    }

    /// Move the discard pile into the draw pile and shuffle. The top card
    /// stays put. Returns how many cards moved.
    pub fn reshuffle(&mut self, rng: &mut GameRng) -> usize {
        let moved = self.discard_pile.len();
        if moved == 0 {
            return 0;
        }
        let mut pile: Vec<Card> = self.draw_pile.drain(..).collect();
        pile.append(&mut self.discard_pile);
        rng.shuffle(&mut pile);
        self.draw_pile = pile.into();
        debug!(moved, draw_pile = self.draw_pile.len(), "discard pile reshuffled");
        moved
    }

    /// Reshuffle if the draw pile has dropped to `threshold` or below.
    pub fn reshuffle_ahead(&mut self, threshold: usize, rng: &mut GameRng) -> bool {
        self.draw_pile.len() <= threshold && self.reshuffle(rng) > 0
    }

    /// Remove one copy of each card from `player`'s hand. Nothing is
    /// removed unless every card is present.
    pub fn take_from_hand(&mut self, player: PlayerId, cards: &[Card]) -> Result<(), TurnError> {
        let Some(hand) = self.hands.get_mut(player) else {
            return match cards.first() {
                Some(&card) => Err(TurnError::CardNotInHand { player, card }),
                None => Ok(()),
            };
        };

        let mut remaining = hand.clone();
        for &card in cards {
            let pos = remaining
                .iter()
                .position(|&c| c == card)
                .ok_or(TurnError::CardNotInHand { player, card })?;
            remaining.swap_remove(pos);
        }

        // remove in place to keep the original order of what stays
        for &card in cards {
            if let Some(pos) = hand.iter().position(|&c| c == card) {
                hand.remove(pos);
            }
        }
        Ok(())
    }

    /// Put played cards on the table. All but the last go to the discard
    /// pile along with the old top card; the last becomes the new top with
    /// the given face.
    pub fn place(&mut self, played: &[Card], face: Card) {
        let Some((&last, rest)) = played.split_last() else {
            return;
        };
        self.discard_pile.push(self.top.physical);
        self.discard_pile.extend_from_slice(rest);
        self.top = TopCard {
            physical: last,
            face,
        };
    }
}
