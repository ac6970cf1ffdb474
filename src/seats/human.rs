//! Human seats.
//!
//! The engine never reads a terminal. A `HumanInput` is handed a `Prompt`
//! describing N enumerated options and answers with a number in `1..=N`,
//! or `None` to go back where the prompt allows it. Anything else is
//! rejected and the prompt is repeated, up to `MAX_ATTEMPTS` times.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};

use crate::cards::{Card, Run, Suit};
use crate::core::{Decision, GameRng, PickupDecision, PlayerId, TurnError};
use crate::rules::{LegalMoves, PickupOptions};

/// Prompts before a human seat's turn is abandoned.
pub const MAX_ATTEMPTS: usize = 64;

/// What the seat is being asked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// 1 = play a single, 2 = play a run, 3 = draw.
    Action { can_single: bool, can_run: bool },
    /// Pick one of the legal singles. Going back is allowed.
    Single(&'a [Card]),
    /// Pick one of the legal runs. Going back is allowed.
    Run(&'a [Run]),
    /// 1 = draw the stack, 2 = play a pick-up run, 3 = play a pick-up or
    /// Cancel card.
    PickupResponse {
        stack: u32,
        can_run: bool,
        can_card: bool,
    },
    PickupRun(&'a [Run]),
    PickupCard(&'a [Card]),
    /// 1..=4 in `Suit::ALL` order. `hand` is what is left after the play.
    Suit(&'a [Card]),
}

impl Prompt<'_> {
    /// Whether `None` means "back to the previous menu" here.
    #[must_use]
    pub fn allows_back(&self) -> bool {
        matches!(
            self,
            Prompt::Single(_) | Prompt::Run(_) | Prompt::PickupRun(_) | Prompt::PickupCard(_)
        )
    }
}

/// Source of human choices.
pub trait HumanInput {
    /// A number in `1..=options`, or `None` to go back.
    fn select(&mut self, prompt: &Prompt<'_>, options: usize) -> Option<usize>;
}

impl<F> HumanInput for F
where
    F: FnMut(&Prompt<'_>, usize) -> Option<usize>,
{
    fn select(&mut self, prompt: &Prompt<'_>, options: usize) -> Option<usize> {
        self(prompt, options)
    }
}

/// Replays a fixed list of answers; `None` once it runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<Option<usize>>,
}

impl ScriptedInput {
    pub fn new(answers: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl HumanInput for ScriptedInput {
    fn select(&mut self, _prompt: &Prompt<'_>, _options: usize) -> Option<usize> {
        self.answers.pop_front().flatten()
    }
}

/// A seat driven by a `HumanInput`.
pub struct HumanSeat {
    name: String,
    input: Box<dyn HumanInput>,
}

impl fmt::Debug for HumanSeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumanSeat").field("name", &self.name).finish_non_exhaustive()
    }
}

enum Answer {
    Pick(usize),
    Back,
}

impl HumanSeat {
    pub fn new(name: impl Into<String>, input: Box<dyn HumanInput>) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normal-turn menu. Choosing a class with no candidates re-prompts.
    pub fn decide(&mut self, player: PlayerId, moves: &LegalMoves) -> Result<Decision, TurnError> {
        let menu = Prompt::Action {
            can_single: !moves.singles.is_empty(),
            can_run: !moves.runs.is_empty(),
        };
        let mut attempts = 0;
        loop {
            let Answer::Pick(choice) = self.ask(player, &menu, 3, &mut attempts)? else {
                continue;
            };
            let picked = match choice {
                1 if !moves.singles.is_empty() => self
                    .pick(player, &Prompt::Single(&moves.singles), moves.singles.len(), &mut attempts)?
                    .map(Decision::PlaySingle),
                2 if !moves.runs.is_empty() => self
                    .pick(player, &Prompt::Run(&moves.runs), moves.runs.len(), &mut attempts)?
                    .map(Decision::PlayRun),
                3 => Some(Decision::Draw),
                _ => {
                    debug!(%player, choice, "no candidates for that action");
                    None
                }
            };
            if let Some(decision) = picked {
                return Ok(decision);
            }
        }
    }

    /// Pick-up response menu.
    pub fn respond_to_pickup(
        &mut self,
        player: PlayerId,
        stack: u32,
        options: &PickupOptions,
    ) -> Result<PickupDecision, TurnError> {
        let menu = Prompt::PickupResponse {
            stack,
            can_run: !options.runs.is_empty(),
            can_card: !options.cards.is_empty(),
        };
        let mut attempts = 0;
        loop {
            let Answer::Pick(choice) = self.ask(player, &menu, 3, &mut attempts)? else {
                continue;
            };
            let picked = match choice {
                1 => Some(PickupDecision::DrawStack),
                2 if !options.runs.is_empty() => self
                    .pick(player, &Prompt::PickupRun(&options.runs), options.runs.len(), &mut attempts)?
                    .map(PickupDecision::PlayRun),
                3 if !options.cards.is_empty() => self
                    .pick(player, &Prompt::PickupCard(&options.cards), options.cards.len(), &mut attempts)?
                    .map(PickupDecision::PlayCard),
                _ => None,
            };
            if let Some(decision) = picked {
                return Ok(decision);
            }
        }
    }

    /// Suit for a Change Suit play. Falls back to a random suit when the
    /// input keeps failing.
    pub fn choose_suit(&mut self, player: PlayerId, hand: &[Card], rng: &mut GameRng) -> Suit {
        let prompt = Prompt::Suit(hand);
        let mut attempts = 0;
        loop {
            match self.ask(player, &prompt, Suit::ALL.len(), &mut attempts) {
                Ok(Answer::Pick(i)) => return Suit::ALL[i],
                Ok(Answer::Back) => {}
                Err(err) => {
                    warn!(%player, %err, "suit prompt abandoned, choosing at random");
                    return Suit::ALL[rng.gen_range_usize(0..Suit::ALL.len())];
                }
            }
        }
    }

    /// Sub-menu pick: `Some(index)` or `None` to go back.
    fn pick(
        &mut self,
        player: PlayerId,
        prompt: &Prompt<'_>,
        options: usize,
        attempts: &mut usize,
    ) -> Result<Option<usize>, TurnError> {
        loop {
            match self.ask(player, prompt, options, attempts)? {
                Answer::Pick(i) => return Ok(Some(i)),
                Answer::Back if prompt.allows_back() => return Ok(None),
                Answer::Back => {}
            }
        }
    }

    /// One prompt. Returns a 0-based index; out-of-range answers count
    /// against `attempts` and come back as `Back`.
    fn ask(
        &mut self,
        player: PlayerId,
        prompt: &Prompt<'_>,
        options: usize,
        attempts: &mut usize,
    ) -> Result<Answer, TurnError> {
        if *attempts >= MAX_ATTEMPTS {
            return Err(TurnError::InvalidSelection {
                player,
                index: 0,
                available: options,
            });
        }
        *attempts += 1;

        match self.input.select(prompt, options) {
            Some(n) if (1..=options).contains(&n) => Ok(Answer::Pick(n - 1)),
            None if prompt.allows_back() => Ok(Answer::Back),
            answer => {
                debug!(%player, ?answer, options, "selection rejected");
                Ok(Answer::Back)
            }
        }
    }
}
