//! Per-match statistics, fed from turn reports. The engine never reads
//! these back.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, PlayerId, PlayerMap, TurnReport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub cards_drawn: usize,
    pub singles_played: u32,
    pub runs_played: u32,
    pub longest_run: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    players: PlayerMap<PlayerStats>,
    actions: FxHashMap<ActionKind, u32>,
}

impl MatchStats {
    #[must_use]
    pub fn new(seat_count: usize) -> Self {
        Self {
            players: PlayerMap::with_default(seat_count),
            actions: FxHashMap::default(),
        }
    }

    pub fn record(&mut self, report: &TurnReport) {
        *self.actions.entry(report.action).or_insert(0) += 1;
        let Some(stats) = self.players.get_mut(report.player) else {
            return;
        };

        stats.cards_drawn += report.drawn.len();
        match report.played.len() {
            0 => {}
            1 => stats.singles_played += 1,
            n => {
                stats.runs_played += 1;
                stats.longest_run = stats.longest_run.max(n);
            }
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> PlayerStats {
        self.players.get(player).copied().unwrap_or_default()
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerStats)> {
        self.players.iter()
    }

    /// Times `kind` was reported, across all seats.
    #[must_use]
    pub fn action_count(&self, kind: ActionKind) -> u32 {
        self.actions.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_cards_drawn(&self) -> usize {
        self.players.values().map(|s| s.cards_drawn).sum()
    }

    #[must_use]
    pub fn longest_run(&self) -> usize {
        self.players.values().map(|s| s.longest_run).max().unwrap_or(0)
    }

    /// Seats that played the match's longest run. Empty when no run was
    /// played.
    #[must_use]
    pub fn longest_run_players(&self) -> Vec<PlayerId> {
        let longest = self.longest_run();
        if longest == 0 {
            return Vec::new();
        }
        self.players
            .iter()
            .filter(|(_, s)| s.longest_run == longest)
            .map(|(p, _)| p)
            .collect()
    }
}
