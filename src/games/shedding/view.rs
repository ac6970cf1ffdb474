//! Read-only snapshot for a presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, SpecialEffectRegistry};
use crate::core::{Direction, MatchState, PlayerId};
use crate::zones::Table;

/// What `player` may see at this moment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub player: PlayerId,
    /// Effective top card.
    pub top: Card,
    /// Sorted by rank, then suit.
    pub hand: Vec<Card>,
    /// `hand`, rendered with effect annotations.
    pub annotated_hand: Vec<String>,
    /// Starting with the seat to act, in play direction.
    pub turn_order: Vec<PlayerId>,
    pub direction: Direction,
    pub pick_up_stack: u32,
    pub hand_sizes: Vec<(PlayerId, usize)>,
    pub draw_pile: usize,
}

impl MatchView {
    pub(crate) fn capture(
        player: PlayerId,
        table: &Table,
        state: &MatchState,
        registry: &SpecialEffectRegistry,
    ) -> Self {
        let mut hand = table.hand(player).to_vec();
        hand.sort_unstable();
        let annotated_hand = hand.iter().map(|&c| registry.annotate(c)).collect();

        Self {
            player,
            top: table.top_face(),
            hand,
            annotated_hand,
            turn_order: state.turn_order_view(),
            direction: state.direction(),
            pick_up_stack: state.pick_up_stack(),
            hand_sizes: table.hand_sizes().iter().map(|(p, &n)| (p, n)).collect(),
            draw_pile: table.draw_pile_len(),
        }
    }
}

impl fmt::Display for MatchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top card: {}", self.top)?;
        if self.pick_up_stack > 0 {
            writeln!(f, "Pick-up stack: {}", self.pick_up_stack)?;
        }
        for (i, card) in self.annotated_hand.iter().enumerate() {
            writeln!(f, "{}. {card}", i + 1)?;
        }
        let order: Vec<String> = self.turn_order.iter().map(ToString::to_string).collect();
        write!(f, "Turn order ({}): {}", self.direction.name(), order.join(" -> "))
    }
}
