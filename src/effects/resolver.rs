//! Effect resolution.
//!
//! The `EffectResolver` looks up what a played card or run does in the
//! match's registry and applies it to `MatchState`. It never touches hands
//! or piles: removing played cards and placing the new top card is the
//! caller's job.
//!
//! ## Runs
//!
//! Only the trailing cards sharing the last card's rank are inspected.
//! Within that suffix:
//!
//! - Miss a Turn cards are counted and applied once with the total
//! - Cover and Cancel apply at most once each
//! - Pick-up and Reverse cards apply once per card
//! - Only the last Change Suit card is honored, after everything else

use tracing::debug;

use crate::cards::{Card, SpecialEffectRegistry, Suit};
use crate::core::{MatchState, PlayerId};

use super::{EffectKind, LastEffect, Resolution};

/// Supplies the suit named by a Change Suit play.
pub trait SuitChooser {
    /// `hand` is the acting seat's hand after the played cards left it.
    fn choose_suit(&mut self, hand: &[Card]) -> Suit;
}

impl<F> SuitChooser for F
where
    F: FnMut(&[Card]) -> Suit,
{
    fn choose_suit(&mut self, hand: &[Card]) -> Suit {
        self(hand)
    }
}

/// Applies registered effects to match state.
#[derive(Clone, Copy, Debug)]
pub struct EffectResolver<'a> {
    registry: &'a SpecialEffectRegistry,
}

impl<'a> EffectResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a SpecialEffectRegistry) -> Self {
        Self { registry }
    }

    /// Resolve one played card.
    pub fn resolve_card(
        &self,
        card: Card,
        actor: PlayerId,
        state: &mut MatchState,
        hand: &[Card],
        chooser: &mut dyn SuitChooser,
    ) -> Resolution {
        match self.registry.effect_of(card) {
            Some(effect) => self.apply(effect, card, actor, state, hand, chooser),
            None => Resolution::plain(card),
        }
    }

    /// Resolve a run. `None` only for an empty run.
    pub fn resolve_run(
        &self,
        run: &[Card],
        actor: PlayerId,
        state: &mut MatchState,
        hand: &[Card],
        chooser: &mut dyn SuitChooser,
    ) -> Option<Resolution> {
        let last = *run.last()?;
        let suffix_start = run
            .iter()
            .rposition(|c| c.rank != last.rank)
            .map_or(0, |i| i + 1);

        let mut result = Resolution::plain(last);
        let mut missed = 0u32;
        let mut covered = false;
        let mut cancelled = false;
        let mut change_suit = None;

        for &card in &run[suffix_start..] {
            let Some(effect) = self.registry.effect_of(card) else {
                continue;
            };
            match effect {
                EffectKind::MissTurn => missed += 1,
                EffectKind::ChangeSuit => change_suit = Some(card),
                EffectKind::Cover if covered => {}
                EffectKind::Cancel if cancelled => {}
                _ => {
                    covered |= effect == EffectKind::Cover;
                    cancelled |= effect == EffectKind::Cancel;
                    result = self.apply(effect, card, actor, state, hand, chooser);
                }
            }
        }

        if missed > 0 {
            state.apply_missed_turns(actor, missed);
            debug!(%actor, count = missed, "miss a turn applied from run");
            result = Resolution::applied(EffectKind::MissTurn, last);
        }

        if let Some(card) = change_suit {
            result = self.apply(EffectKind::ChangeSuit, card, actor, state, hand, chooser);
        }

        Some(result)
    }

    fn apply(
        &self,
        effect: EffectKind,
        card: Card,
        actor: PlayerId,
        state: &mut MatchState,
        hand: &[Card],
        chooser: &mut dyn SuitChooser,
    ) -> Resolution {
        match effect {
            EffectKind::PickUpTwo | EffectKind::PickUpFive => {
                state.add_pickup(effect.pickup_amount());
                debug!(%actor, stack = state.pick_up_stack(), "pick-up stack grew");
            }
            EffectKind::MissTurn => state.apply_missed_turns(actor, 1),
            EffectKind::Cover => {
                state.last_effect = Some(LastEffect::Cover);
                state.extra_turn = true;
                debug!(%actor, "cover grants another turn");
            }
            EffectKind::Cancel => {
                if state.last_effect == Some(LastEffect::PickUp) {
                    state.clear_pickup();
                    debug!(%actor, "pick-up stack cancelled");
                }
                state.last_effect = None;
            }
            EffectKind::Reverse => state.reverse(),
            EffectKind::ChangeSuit => {
                let suit = chooser.choose_suit(hand);
                debug!(%actor, %suit, "suit changed");
                return Resolution::applied(effect, Card::new(card.rank, suit));
            }
        }
        Resolution::applied(effect, card)
    }
}
