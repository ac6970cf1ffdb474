//! Legal-move generation.
//!
//! Given a hand and the top card's face, `MoveGenerator` lists every legal
//! single, every legal run, and (while a pick-up stack is pending) every
//! legal pick-up response. All outputs are deduplicated and sorted, so the
//! same inputs always produce the same lists in the same order.
//!
//! ## Runs
//!
//! Three families are enumerated from each legal single `S` as head:
//!
//! - **Consecutive**: `S, S+1, S+2, ...` or `S, S-1, S-2, ...` within
//!   `S`'s suit, wrapping Ace to 2
//! - **Rank match**: `S` followed by every other held card of its rank
//! - **Combination**: any path where each step is to a same-rank card or
//!   to a cyclically adjacent card of the same suit; recorded forwards and
//!   reversed
//!
//! A run never holds the same card twice and never starts with a card that
//! is not itself a legal single.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use tracing::warn;

use crate::cards::{Card, Run, SpecialEffectRegistry};

/// Default cap on combination-search nodes per call, shared across heads.
pub const DEFAULT_SEARCH_LIMIT: usize = 50_000;

/// Legal plays for one normal turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    pub singles: Vec<Card>,
    pub runs: Vec<Run>,
}

impl LegalMoves {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.runs.is_empty()
    }
}

/// Legal answers to a pending pick-up stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickupOptions {
    /// Runs of two or more pick-up cards, longest first.
    pub runs: Vec<Run>,
    /// Single pick-up cards followed by Cancel cards.
    pub cards: Vec<Card>,
}

impl PickupOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty() && self.cards.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MoveGenerator<'a> {
    registry: &'a SpecialEffectRegistry,
    search_limit: usize,
}

impl<'a> MoveGenerator<'a> {
    #[must_use]
    pub fn new(registry: &'a SpecialEffectRegistry) -> Self {
        Self {
            registry,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    #[must_use]
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// Cards in `hand` playable on `top`: Aces, same suit, or same rank.
    #[must_use]
    pub fn legal_singles(hand: &[Card], top: Card) -> Vec<Card> {
        hand.iter()
            .copied()
            .filter(|c| c.plays_on(top))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Singles and runs for a normal turn.
    #[must_use]
    pub fn legal_moves(&self, hand: &[Card], top: Card) -> LegalMoves {
        let singles = Self::legal_singles(hand, top);
        let runs = self.legal_runs(hand, &singles);
        LegalMoves { singles, runs }
    }

    /// Runs of two or more cards headed by one of `singles`.
    ///
    /// Consecutive and rank-match runs are always complete. Only the
    /// combination search is bounded: each head gets an even share of what
    /// is left of the limit, and whatever a head leaves unspent carries over
    /// to the heads after it.
    #[must_use]
    pub fn legal_runs(&self, hand: &[Card], singles: &[Card]) -> Vec<Run> {
        let held: BTreeSet<Card> = hand.iter().copied().collect();
        let max_len = hand.len();
        let heads: BTreeSet<Card> = singles.iter().copied().filter(|c| held.contains(c)).collect();
        let mut runs = BTreeSet::new();

        for &head in &heads {
            consecutive_runs(head, &held, max_len, Card::successor, &mut runs);
            consecutive_runs(head, &held, max_len, Card::predecessor, &mut runs);

            let mut rank_match = Run::new();
            rank_match.push(head);
            for &card in held.iter().filter(|c| c.rank == head.rank && **c != head) {
                rank_match.push(card);
            }
            if rank_match.len() > 1 && rank_match.len() <= max_len {
                runs.insert(rank_match);
            }
        }

        let mut remaining = self.search_limit;
        let mut truncated = false;
        for (i, &head) in heads.iter().enumerate() {
            let share = remaining / (heads.len() - i);
            let mut budget = share;
            if !combination_runs(head, &held, max_len, &mut budget, &mut runs) {
                truncated = true;
            }
            remaining -= share - budget;
        }
        if truncated {
            warn!(limit = self.search_limit, hand = hand.len(), "run search truncated");
        }

        runs.into_iter()
            .filter(|run| run.head().is_some_and(|h| heads.contains(&h)))
            .collect()
    }

    /// Combinations of two or more pick-up cards from `hand`, sorted by
    /// descending length and then lexicographically.
    #[must_use]
    pub fn pickup_runs(&self, hand: &[Card]) -> Vec<Run> {
        let mut pickups: Vec<Card> = hand.iter().copied().filter(|&c| self.registry.is_pickup(c)).collect();
        pickups.sort_unstable();

        // distinct cards with multiplicity; duplicate copies are interchangeable
        let mut groups: Vec<(Card, usize)> = Vec::new();
        for card in pickups {
            match groups.last_mut() {
                Some((last, n)) if *last == card => *n += 1,
                _ => groups.push((card, 1)),
            }
        }

        let mut runs = Vec::new();
        let mut counts = vec![0usize; groups.len()];
        loop {
            let total: usize = counts.iter().sum();
            if total >= 2 {
                runs.push(
                    groups
                        .iter()
                        .zip(&counts)
                        .flat_map(|(&(card, _), &n)| std::iter::repeat(card).take(n))
                        .collect::<Run>(),
                );
            }

            // odometer over 0..=multiplicity per group
            let mut i = 0;
            while i < groups.len() && counts[i] == groups[i].1 {
                counts[i] = 0;
                i += 1;
            }
            if i == groups.len() {
                break;
            }
            counts[i] += 1;
        }

        runs.sort_by(|a, b| (Reverse(a.len()), a).cmp(&(Reverse(b.len()), b)));
        runs
    }

    /// Distinct single pick-up cards, then distinct Cancel cards.
    #[must_use]
    pub fn pickup_cards(&self, hand: &[Card]) -> Vec<Card> {
        let pickups: BTreeSet<Card> = hand.iter().copied().filter(|&c| self.registry.is_pickup(c)).collect();
        let cancels: BTreeSet<Card> = hand.iter().copied().filter(|&c| self.registry.is_cancel(c)).collect();
        pickups.into_iter().chain(cancels).collect()
    }

    #[must_use]
    pub fn pickup_options(&self, hand: &[Card]) -> PickupOptions {
        PickupOptions {
            runs: self.pickup_runs(hand),
            cards: self.pickup_cards(hand),
        }
    }

    /// Whether `hand` holds anything that answers a pick-up stack.
    #[must_use]
    pub fn can_answer_pickup(&self, hand: &[Card]) -> bool {
        hand.iter()
            .any(|&c| self.registry.is_pickup(c) || self.registry.is_cancel(c))
    }
}

fn consecutive_runs(
    head: Card,
    held: &BTreeSet<Card>,
    max_len: usize,
    step: fn(Card) -> Card,
    out: &mut BTreeSet<Run>,
) {
    let mut run = Run::new();
    run.push(head);
    let mut current = head;
    while run.len() < max_len {
        let next = step(current);
        if !held.contains(&next) || run.contains(&next) {
            break;
        }
        run.push(next);
        current = next;
        out.insert(run.clone());
    }
}

/// Depth-first search over linked cards with an explicit stack. Returns
/// `false` once `budget` is spent.
fn combination_runs(
    head: Card,
    held: &BTreeSet<Card>,
    max_len: usize,
    budget: &mut usize,
    out: &mut BTreeSet<Run>,
) -> bool {
    let mut stack = vec![Run::from_slice(&[head])];

    while let Some(path) = stack.pop() {
        if *budget == 0 {
            return false;
        }
        *budget -= 1;

        if path.len() > 1 {
            out.insert(path.reversed());
            out.insert(path.clone());
        }
        if path.len() >= max_len {
            continue;
        }
        let Some(last) = path.tail() else {
            continue;
        };

        let same_rank = held.iter().copied().filter(|c| c.rank == last.rank && *c != last);
        let adjacent = [last.successor(), last.predecessor()]
            .into_iter()
            .filter(|c| held.contains(c));
        let extensions: Vec<Card> = same_rank.chain(adjacent).filter(|c| !path.contains(c)).collect();

        // reversed so the first extension is explored first
        for card in extensions.into_iter().rev() {
            let mut next = path.clone();
            next.push(card);
            stack.push(next);
        }
    }
    true
}
