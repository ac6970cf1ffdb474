//! The closed set of seat kinds and what they are shown when asked to act.

use std::fmt;

use crate::ai::AiPlayer;
use crate::cards::{Card, Suit};
use crate::core::{Decision, GameRng, PickupDecision, PlayerId, PlayerMap, TurnError};
use crate::effects::SuitChooser;
use crate::rules::{LegalMoves, PickupOptions};

use super::human::HumanSeat;

/// Public information available to a seat when it decides.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub player: PlayerId,
    /// Effective top card (after any Change Suit).
    pub top: Card,
    pub hand: &'a [Card],
    pub hand_sizes: &'a PlayerMap<usize>,
    /// Seat that acts after this one if nothing changes the order.
    pub upcoming: PlayerId,
    pub pick_up_stack: u32,
}

impl DecisionContext<'_> {
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.hand_sizes.get(player).copied().unwrap_or(0)
    }
}

#[derive(Debug)]
pub enum Player {
    Human(HumanSeat),
    Ai(AiPlayer),
}

impl Player {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Player::Human(seat) => seat.name(),
            Player::Ai(ai) => ai.name(),
        }
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self, Player::Human(_))
    }

    #[must_use]
    pub fn as_ai(&self) -> Option<&AiPlayer> {
        match self {
            Player::Ai(ai) => Some(ai),
            Player::Human(_) => None,
        }
    }

    pub fn as_ai_mut(&mut self) -> Option<&mut AiPlayer> {
        match self {
            Player::Ai(ai) => Some(ai),
            Player::Human(_) => None,
        }
    }

    /// Normal-turn choice. Only a human seat can fail, after its input
    /// stops producing usable answers.
    pub fn decide(
        &mut self,
        moves: &LegalMoves,
        ctx: &DecisionContext<'_>,
        rng: &mut GameRng,
    ) -> Result<Decision, TurnError> {
        match self {
            Player::Human(seat) => seat.decide(ctx.player, moves),
            Player::Ai(ai) => Ok(ai.decide(moves, ctx, rng)),
        }
    }

    pub fn respond_to_pickup(
        &mut self,
        options: &PickupOptions,
        ctx: &DecisionContext<'_>,
    ) -> Result<PickupDecision, TurnError> {
        match self {
            Player::Human(seat) => seat.respond_to_pickup(ctx.player, ctx.pick_up_stack, options),
            Player::Ai(ai) => Ok(ai.respond_to_pickup(options)),
        }
    }

    pub fn choose_suit(&mut self, player: PlayerId, hand: &[Card], rng: &mut GameRng) -> Suit {
        match self {
            Player::Human(seat) => seat.choose_suit(player, hand, rng),
            Player::Ai(ai) => ai.choose_suit(hand, rng),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human(seat) => f.write_str(seat.name()),
            Player::Ai(ai) => write!(f, "{ai}"),
        }
    }
}

impl From<AiPlayer> for Player {
    fn from(ai: AiPlayer) -> Self {
        Player::Ai(ai)
    }
}

impl From<HumanSeat> for Player {
    fn from(seat: HumanSeat) -> Self {
        Player::Human(seat)
    }
}

/// Routes Change Suit prompts from the resolver to the acting seat.
pub struct SeatSuitChooser<'p> {
    pub player: PlayerId,
    pub seat: &'p mut Player,
    pub rng: &'p mut GameRng,
}

impl SuitChooser for SeatSuitChooser<'_> {
    fn choose_suit(&mut self, hand: &[Card]) -> Suit {
        self.seat.choose_suit(self.player, hand, self.rng)
    }
}
