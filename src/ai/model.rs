//! What an AI remembers about the table: ranks seen played, and a
//! histogram of each seat's actions keyed by hand size.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Rank;
use crate::core::{ActionKind, PlayerId};

/// Counts of ranks seen played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCounter {
    seen: FxHashMap<Rank, u32>,
}

impl CardCounter {
    pub fn record(&mut self, rank: Rank) {
        *self.seen.entry(rank).or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, rank: Rank) -> u32 {
        self.seen.get(&rank).copied().unwrap_or(0)
    }

    /// Low ranks seen minus high ranks seen. Positive means the remaining
    /// deck is rich in high cards.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.seen
            .iter()
            .map(|(rank, &n)| {
                if rank.is_low() {
                    i64::from(n)
                } else if rank.is_high() {
                    -i64::from(n)
                } else {
                    0
                }
            })
            .sum()
    }
}

/// Per-seat action histograms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentModel {
    history: FxHashMap<PlayerId, FxHashMap<usize, FxHashMap<ActionKind, u32>>>,
}

impl OpponentModel {
    pub fn record(&mut self, player: PlayerId, hand_size: usize, action: ActionKind) {
        *self
            .history
            .entry(player)
            .or_default()
            .entry(hand_size)
            .or_default()
            .entry(action)
            .or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, player: PlayerId, hand_size: usize, action: ActionKind) -> u32 {
        self.history
            .get(&player)
            .and_then(|by_size| by_size.get(&hand_size))
            .and_then(|hist| hist.get(&action))
            .copied()
            .unwrap_or(0)
    }

    /// Most frequent action for `player` at `hand_size`. Ties go to the
    /// lowest `ActionKind`.
    #[must_use]
    pub fn predict(&self, player: PlayerId, hand_size: usize) -> Option<ActionKind> {
        let hist = self.history.get(&player)?.get(&hand_size)?;
        hist.iter()
            .max_by(|(ka, na), (kb, nb)| na.cmp(nb).then_with(|| kb.cmp(ka)))
            .map(|(&kind, _)| kind)
    }
}
