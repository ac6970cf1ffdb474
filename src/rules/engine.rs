//! Per-turn state machine.
//!
//! One `TurnEngine::take_turn` call runs one seat through one pass:
//!
//! ```text
//!   pick-up stack > 0 ──► AwaitingPickupResponse ──┐
//!                                                  ├──► Resolved
//!   otherwise ─────────► AwaitingAction ───────────┘
//! ```
//!
//! The call never advances the turn. A Cover play raises
//! `MatchState::extra_turn`, and the match driver calls `take_turn` again
//! for the same seat before moving on.
//!
//! ## Emptying the hand
//!
//! Judged on the effect of the last card played:
//!
//! - Miss a Turn: a win if two or more opponents still hold cards,
//!   otherwise draw one and play on
//! - pick-up: the win is pending until the next seat responds
//! - Cover: draw one, no win, no extra turn
//! - anything else: a win
//!
//! Errors inside a turn never escape: an exhausted table becomes a `Skip`
//! report and anything else becomes an `Error` report.

use tracing::{debug, info, warn};

use crate::cards::{Card, Run, SpecialEffectRegistry};
use crate::core::{
    ActionKind, Decision, GameRng, MatchState, PickupDecision, PlayerId, TurnError, TurnReport,
};
use crate::effects::{EffectKind, EffectResolver, Resolution};
use crate::seats::{DecisionContext, Player, SeatSuitChooser};
use crate::zones::Table;

use super::moves::MoveGenerator;

/// Where a turn is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    AwaitingPickupResponse,
    AwaitingAction,
    Resolved,
}

impl TurnPhase {
    /// Phase a seat enters when its turn starts.
    #[must_use]
    pub fn entry(state: &MatchState) -> Self {
        if state.pick_up_stack() > 0 {
            TurnPhase::AwaitingPickupResponse
        } else {
            TurnPhase::AwaitingAction
        }
    }
}

/// The mutable pieces one turn works on.
pub struct TurnContext<'t> {
    pub table: &'t mut Table,
    pub state: &'t mut MatchState,
    pub rng: &'t mut GameRng,
}

#[derive(Clone, Copy, Debug)]
pub struct TurnEngine<'a> {
    registry: &'a SpecialEffectRegistry,
    moves: MoveGenerator<'a>,
    resolver: EffectResolver<'a>,
}

impl<'a> TurnEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a SpecialEffectRegistry) -> Self {
        Self {
            registry,
            moves: MoveGenerator::new(registry),
            resolver: EffectResolver::new(registry),
        }
    }

    #[must_use]
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.moves = self.moves.with_search_limit(limit);
        self
    }

    #[must_use]
    pub fn moves(&self) -> &MoveGenerator<'a> {
        &self.moves
    }

    /// Run one pass of `actor`'s turn to `Resolved`.
    pub fn take_turn(&self, actor: PlayerId, seat: &mut Player, cx: &mut TurnContext<'_>) -> TurnReport {
        let phase = TurnPhase::entry(cx.state);
        debug!(%actor, ?phase, stack = cx.state.pick_up_stack(), "turn started");

        let result = match phase {
            TurnPhase::AwaitingPickupResponse => self.respond_to_pickup(actor, seat, cx),
            _ => self.act(actor, seat, cx),
        };

        match result {
            Ok(report) => {
                debug!(%actor, action = %report.action, phase = ?TurnPhase::Resolved, "turn resolved");
                report
            }
            Err(TurnError::ResourceExhausted) => {
                debug!(%actor, "nothing left to draw, turn skipped");
                TurnReport::new(actor, ActionKind::Skip)
            }
            Err(err) => {
                warn!(%actor, %err, "turn abandoned");
                TurnReport::new(actor, ActionKind::Error)
            }
        }
    }

    fn respond_to_pickup(
        &self,
        actor: PlayerId,
        seat: &mut Player,
        cx: &mut TurnContext<'_>,
    ) -> Result<TurnReport, TurnError> {
        let hand = cx.table.hand(actor).to_vec();
        let options = self.moves.pickup_options(&hand);

        let decision = if options.is_empty() {
            PickupDecision::DrawStack
        } else {
            let sizes = cx.table.hand_sizes();
            let ctx = DecisionContext {
                player: actor,
                top: cx.table.top_face(),
                hand: &hand,
                hand_sizes: &sizes,
                upcoming: cx.state.upcoming_player(),
                pick_up_stack: cx.state.pick_up_stack(),
            };
            seat.respond_to_pickup(&options, &ctx)?
        };

        match decision {
            PickupDecision::PlayRun(i) => match options.runs.get(i) {
                Some(run) => self.play_pickup_run(actor, run, seat, cx),
                None => {
                    warn!(%actor, index = i, available = options.runs.len(), "pick-up run index out of range, drawing");
                    self.draw_stack(actor, cx)
                }
            },
            PickupDecision::PlayCard(i) => match options.cards.get(i) {
                Some(&card) => self.play_pickup_card(actor, card, seat, cx),
                None => {
                    warn!(%actor, index = i, available = options.cards.len(), "pick-up card index out of range, drawing");
                    self.draw_stack(actor, cx)
                }
            },
            PickupDecision::DrawStack => self.draw_stack(actor, cx),
        }
    }

    fn draw_stack(&self, actor: PlayerId, cx: &mut TurnContext<'_>) -> Result<TurnReport, TurnError> {
        let owed = cx.state.pick_up_stack() as usize;
        let drawn = cx.table.draw_many(actor, owed, cx.rng);
        cx.state.clear_pickup();
        debug!(%actor, owed, drawn = drawn.len(), "pick-up stack drawn");

        if drawn.is_empty() {
            return Err(TurnError::ResourceExhausted);
        }
        Ok(TurnReport::new(actor, ActionKind::Draw).with_drawn(drawn))
    }

    /// Pick-up runs resolve card by card.
    fn play_pickup_run(
        &self,
        actor: PlayerId,
        run: &Run,
        seat: &mut Player,
        cx: &mut TurnContext<'_>,
    ) -> Result<TurnReport, TurnError> {
        if run.is_empty() {
            return Err(TurnError::EmptyRun(actor));
        }
        cx.table.take_from_hand(actor, run)?;
        let hand = cx.table.hand(actor).to_vec();
        let mut chooser = SeatSuitChooser {
            player: actor,
            seat,
            rng: &mut *cx.rng,
        };

        let mut resolution = None;
        for &card in run.iter() {
            resolution = Some(self.resolver.resolve_card(card, actor, cx.state, &hand, &mut chooser));
        }
        let Some(resolution) = resolution else {
            return Err(TurnError::EmptyRun(actor));
        };
        cx.table.place(run, resolution.top);

        let mut report = TurnReport::new(actor, ActionKind::Run)
            .with_played(run.clone())
            .with_effect(resolution.effect);
        if hand.is_empty() {
            self.set_pending_win(actor, &mut report, cx.state);
        }
        report.extra_turn = cx.state.extra_turn;
        Ok(report)
    }

    fn play_pickup_card(
        &self,
        actor: PlayerId,
        card: Card,
        seat: &mut Player,
        cx: &mut TurnContext<'_>,
    ) -> Result<TurnReport, TurnError> {
        cx.table.take_from_hand(actor, &[card])?;
        let hand = cx.table.hand(actor).to_vec();
        let mut chooser = SeatSuitChooser {
            player: actor,
            seat,
            rng: &mut *cx.rng,
        };
        let resolution = self.resolver.resolve_card(card, actor, cx.state, &hand, &mut chooser);
        cx.table.place(&[card], resolution.top);

        let mut report = TurnReport::new(actor, ActionKind::Single)
            .with_played(Run::from_slice(&[card]))
            .with_effect(resolution.effect);
        if hand.is_empty() {
            if self.registry.is_cancel(card) {
                info!(%actor, "won by cancelling the pick-up stack");
                report.action = ActionKind::Win;
            } else {
                self.set_pending_win(actor, &mut report, cx.state);
            }
        }
        report.extra_turn = cx.state.extra_turn;
        Ok(report)
    }

    fn act(&self, actor: PlayerId, seat: &mut Player, cx: &mut TurnContext<'_>) -> Result<TurnReport, TurnError> {
        let hand = cx.table.hand(actor).to_vec();
        let top = cx.table.top_face();
        let moves = self.moves.legal_moves(&hand, top);

        if moves.is_empty() {
            debug!(%actor, %top, "no legal play, drawing");
            return self.draw_one(actor, cx);
        }

        let sizes = cx.table.hand_sizes();
        let ctx = DecisionContext {
            player: actor,
            top,
            hand: &hand,
            hand_sizes: &sizes,
            upcoming: cx.state.upcoming_player(),
            pick_up_stack: cx.state.pick_up_stack(),
        };

        match seat.decide(&moves, &ctx, cx.rng)? {
            Decision::Draw => self.draw_one(actor, cx),
            Decision::PlaySingle(i) => match moves.singles.get(i) {
                Some(&card) => {
                    let played = Run::from_slice(&[card]);
                    self.play(actor, played, ActionKind::Single, seat, cx)
                }
                None => {
                    warn!(%actor, index = i, available = moves.singles.len(), "single index out of range, drawing");
                    self.draw_one(actor, cx)
                }
            },
            Decision::PlayRun(i) => match moves.runs.get(i) {
                Some(run) => self.play(actor, run.clone(), ActionKind::Run, seat, cx),
                None => {
                    warn!(%actor, index = i, available = moves.runs.len(), "run index out of range, drawing");
                    self.draw_one(actor, cx)
                }
            },
        }
    }

    fn draw_one(&self, actor: PlayerId, cx: &mut TurnContext<'_>) -> Result<TurnReport, TurnError> {
        let card = cx.table.draw(actor, cx.rng)?;
        Ok(TurnReport::new(actor, ActionKind::Draw).with_drawn(vec![card]))
    }

    fn play(
        &self,
        actor: PlayerId,
        played: Run,
        action: ActionKind,
        seat: &mut Player,
        cx: &mut TurnContext<'_>,
    ) -> Result<TurnReport, TurnError> {
        cx.table.take_from_hand(actor, &played)?;
        let hand = cx.table.hand(actor).to_vec();

        let resolution = {
            let mut chooser = SeatSuitChooser {
                player: actor,
                seat,
                rng: &mut *cx.rng,
            };
            match &*played {
                [card] => Some(self.resolver.resolve_card(*card, actor, cx.state, &hand, &mut chooser)),
                cards => self.resolver.resolve_run(cards, actor, cx.state, &hand, &mut chooser),
            }
        };
        let Some(Resolution { effect, top }) = resolution else {
            return Ok(TurnReport::new(actor, action));
        };
        cx.table.place(&played, top);
        debug!(%actor, played = %played, top = %top, ?effect, "cards played");

        let last_effect = played.last().and_then(|&c| self.registry.effect_of(c));
        let mut report = TurnReport::new(actor, action).with_played(played).with_effect(effect);

        if hand.is_empty() {
            match last_effect {
                Some(EffectKind::MissTurn) if cx.table.active_opponents(actor) < 2 => {
                    debug!(%actor, "last card was miss a turn with one opponent left, drawing");
                    report.drawn = self.draw_one(actor, cx)?.drawn;
                }
                Some(effect) if effect.is_pickup() => self.set_pending_win(actor, &mut report, cx.state),
                Some(EffectKind::Cover) => {
                    debug!(%actor, "cover cannot finish a hand, drawing");
                    cx.state.extra_turn = false;
                    report.drawn = self.draw_one(actor, cx)?.drawn;
                }
                _ => {
                    info!(%actor, "hand emptied, match won");
                    report.action = ActionKind::Win;
                }
            }
        }

        report.extra_turn = cx.state.extra_turn;
        Ok(report)
    }

    fn set_pending_win(&self, actor: PlayerId, report: &mut TurnReport, state: &mut MatchState) {
        info!(%actor, stack = state.pick_up_stack(), "hand emptied on a pick-up, win pending");
        state.potential_winner = Some(actor);
        report.pending_win = true;
    }
}
