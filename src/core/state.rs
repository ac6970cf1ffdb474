//! Mutable match state shared by the turn engine and the effect resolver.
//!
//! ## MatchState
//!
//! - Turn order, current position, and direction
//! - Pick-up stack and the last stack-relevant effect
//! - Missed turns owed per seat
//! - Pending winner (a seat that emptied its hand with a pick-up play)
//! - The transient extra-turn flag raised by Cover
//!
//! Cards are not here; see `zones::Table`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::player::{PlayerId, PlayerMap};
use crate::effects::LastEffect;

/// Turn direction over the seat order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Position `steps` seats away from `index` in this direction.
    #[must_use]
    pub const fn step(self, index: usize, steps: usize, len: usize) -> usize {
        let steps = steps % len;
        match self {
            Direction::Clockwise => (index + steps) % len,
            Direction::CounterClockwise => (index + len - steps) % len,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter-clockwise",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    turn_order: Vec<PlayerId>,
    current_index: usize,
    direction: Direction,
    pick_up_stack: u32,
    /// Only Cancel reads this.
    pub last_effect: Option<LastEffect>,
    missed_turns: PlayerMap<u32>,
    pub potential_winner: Option<PlayerId>,
    /// Raised by Cover; consumed by the match driver before advancing.
    pub extra_turn: bool,
}

impl MatchState {
    /// Fresh state for seats `0..seat_count`, seat 0 to act.
    #[must_use]
    pub fn new(seat_count: usize) -> Self {
        Self {
            turn_order: PlayerId::all(seat_count).collect(),
            current_index: 0,
            direction: Direction::Clockwise,
            pick_up_stack: 0,
            last_effect: None,
            missed_turns: PlayerMap::with_default(seat_count),
            potential_winner: None,
            extra_turn: false,
        }
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.turn_order.len()
    }

    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_order[self.current_index]
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.flipped();
        debug!(direction = self.direction.name(), "direction reversed");
    }

    #[must_use]
    pub fn pick_up_stack(&self) -> u32 {
        self.pick_up_stack
    }

    /// Grow the stack and remember that a pick-up is pending.
    pub fn add_pickup(&mut self, amount: u32) {
        self.pick_up_stack = self.pick_up_stack.saturating_add(amount);
        self.last_effect = Some(LastEffect::PickUp);
    }

    /// Zero the stack. Used by Cancel and by the draw response.
    pub fn clear_pickup(&mut self) {
        self.pick_up_stack = 0;
        self.last_effect = None;
    }

    #[must_use]
    pub fn missed_turns(&self, player: PlayerId) -> u32 {
        self.missed_turns.get(player).copied().unwrap_or(0)
    }

    /// The `count` seats following `actor` in the current direction each
    /// owe one more missed turn.
    pub fn apply_missed_turns(&mut self, actor: PlayerId, count: u32) {
        let len = self.seat_count();
        let Some(origin) = self.position_of(actor) else {
            return;
        };
        for i in 1..=count as usize {
            let target = self.turn_order[self.direction.step(origin, i, len)];
            if let Some(owed) = self.missed_turns.get_mut(target) {
                *owed += 1;
                debug!(%target, owed = *owed, "missed turn owed");
            }
        }
    }

    /// Advance to the next seat, consuming one owed missed turn from each
    /// seat passed over. Returns the seat that now acts.
    pub fn next_player(&mut self) -> PlayerId {
        let len = self.seat_count();
        loop {
            self.current_index = self.direction.step(self.current_index, 1, len);
            let player = self.turn_order[self.current_index];
            match self.missed_turns.get_mut(player) {
                Some(owed) if *owed > 0 => {
                    *owed -= 1;
                    debug!(%player, remaining = *owed, "turn missed");
                }
                _ => return player,
            }
        }
    }

    /// Who `next_player` would return, without changing anything.
    #[must_use]
    pub fn upcoming_player(&self) -> PlayerId {
        let len = self.seat_count();
        let mut owed: Vec<u32> = self.turn_order.iter().map(|&p| self.missed_turns(p)).collect();
        let mut index = self.current_index;
        loop {
            index = self.direction.step(index, 1, len);
            if owed[index] > 0 {
                owed[index] -= 1;
            } else {
                return self.turn_order[index];
            }
        }
    }

    /// Clear and return the extra-turn flag.
    pub fn take_extra_turn(&mut self) -> bool {
        std::mem::take(&mut self.extra_turn)
    }

    /// Seats starting at the current one, in the current direction.
    #[must_use]
    pub fn turn_order_view(&self) -> Vec<PlayerId> {
        let len = self.seat_count();
        (0..len)
            .map(|i| self.turn_order[self.direction.step(self.current_index, i, len)])
            .collect()
    }

    fn position_of(&self, player: PlayerId) -> Option<usize> {
        self.turn_order.iter().position(|&p| p == player)
    }
}
