//! AI seat: decision policies per difficulty tier plus the state they
//! learn from.
//!
//! ## Tiers
//!
//! - **Easy**: random run if any, else random single, else draw
//! - **Medium**: longest run, else highest single, else draw
//! - **Hard**: occasional bluff; otherwise reads the card-count score and
//!   the upcoming seat's predicted action before falling back to medium
//!   play that saves Aces
//! - **Adaptive**: hard when winning, easy when losing, medium when even
//! - **Learning**: weighted choice between run, high single, low single
//!
//! Policies only ever return indices into the lists they were given. An
//! empty list is never chosen from.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{CardCounter, OpponentModel};
use super::strategy::{Difficulty, Strategy, StrategyWeights};
use crate::cards::{Card, Rank, Run, Suit};
use crate::core::{ActionKind, Decision, GameRng, PickupDecision, TurnReport};
use crate::rules::{LegalMoves, PickupOptions};
use crate::seats::DecisionContext;

/// Chance per decision that the hard tier plays a random move.
pub const BLUFF_CHANCE: f64 = 0.1;

/// Card-count score beyond which the hard tier switches to high or low
/// singles.
pub const COUNT_THRESHOLD: i64 = 5;

/// Performance score beyond which an adaptive AI is relabelled.
pub const RELABEL_THRESHOLD: i32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiPlayer {
    name: String,
    difficulty: Difficulty,
    /// Shown next to the name. Adaptive AIs relabel themselves after each
    /// result; the policy stays adaptive.
    label: Difficulty,
    performance_score: i32,
    cards_seen: CardCounter,
    weights: StrategyWeights,
    last_action: Option<Strategy>,
    model: OpponentModel,
}

impl AiPlayer {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
            label: difficulty,
            performance_score: 0,
            cards_seen: CardCounter::default(),
            weights: StrategyWeights::default(),
            last_action: None,
            model: OpponentModel::default(),
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: StrategyWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_performance_score(mut self, score: i32) -> Self {
        self.performance_score = score;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn label(&self) -> Difficulty {
        self.label
    }

    #[must_use]
    pub fn performance_score(&self) -> i32 {
        self.performance_score
    }

    #[must_use]
    pub fn weights(&self) -> &StrategyWeights {
        &self.weights
    }

    #[must_use]
    pub fn last_action(&self) -> Option<Strategy> {
        self.last_action
    }

    #[must_use]
    pub fn cards_seen(&self) -> &CardCounter {
        &self.cards_seen
    }

    #[must_use]
    pub fn model(&self) -> &OpponentModel {
        &self.model
    }

    /// Pick a normal-turn action.
    pub fn decide(&mut self, moves: &LegalMoves, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Decision {
        let decision = match self.difficulty {
            Difficulty::Easy => play_easy(moves, rng),
            Difficulty::Medium => play_medium(moves),
            Difficulty::Hard => self.play_hard(moves, ctx, rng),
            Difficulty::Adaptive => match self.performance_score.signum() {
                1 => self.play_hard(moves, ctx, rng),
                -1 => play_easy(moves, rng),
                _ => play_medium(moves),
            },
            Difficulty::Learning => self.play_learning(moves, rng),
        };
        debug!(ai = %self, ?decision, "ai decided");
        decision
    }

    /// Answer a pending pick-up stack: first pick-up run (the longest),
    /// else the first pick-up or Cancel card, else draw.
    pub fn respond_to_pickup(&mut self, options: &PickupOptions) -> PickupDecision {
        if !options.runs.is_empty() {
            PickupDecision::PlayRun(0)
        } else if !options.cards.is_empty() {
            PickupDecision::PlayCard(0)
        } else {
            PickupDecision::DrawStack
        }
    }

    /// Suit for a Change Suit play, given the hand left after playing.
    pub fn choose_suit(&mut self, hand: &[Card], rng: &mut GameRng) -> Suit {
        let random = |rng: &mut GameRng| Suit::ALL[rng.gen_range_usize(0..Suit::ALL.len())];
        if hand.is_empty() {
            return random(rng);
        }

        let mut counts = [0usize; 4];
        for card in hand {
            counts[card.suit.index()] += 1;
        }
        let most = counts.iter().copied().max().unwrap_or(0);

        match self.difficulty {
            Difficulty::Easy => random(rng),
            Difficulty::Medium => Suit::ALL
                .into_iter()
                .find(|s| counts[s.index()] == most)
                .unwrap_or(Suit::Hearts),
            Difficulty::Hard | Difficulty::Adaptive => {
                let best: Vec<Suit> = Suit::ALL.into_iter().filter(|s| counts[s.index()] == most).collect();
                rng.choose(&best).copied().unwrap_or_else(|| random(rng))
            }
            Difficulty::Learning => match rng.choose_weighted(&self.weights.suits) {
                Some(i) => Suit::ALL[i],
                None => random(rng),
            },
        }
    }

    /// Record another seat's (or this seat's own) completed action.
    pub fn observe(&mut self, report: &TurnReport, hand_size_after: usize) {
        self.model.record(report.player, hand_size_after, report.action);
        for card in report.played.iter() {
            self.cards_seen.record(card.rank);
        }
    }

    /// Match result: adjusts the performance score by one and relabels
    /// adaptive AIs.
    pub fn record_result(&mut self, won: bool) {
        self.performance_score += if won { 1 } else { -1 };
        if self.difficulty == Difficulty::Adaptive {
            self.label = if self.performance_score > RELABEL_THRESHOLD {
                Difficulty::Hard
            } else if self.performance_score < -RELABEL_THRESHOLD {
                Difficulty::Easy
            } else {
                Difficulty::Medium
            };
        }
    }

    /// Reinforce the strategy chosen most recently by the learning tier.
    pub fn learn(&mut self, reward: f64) {
        if let Some(strategy) = self.last_action {
            self.weights.adjust(strategy, reward);
            debug!(ai = %self, ?strategy, reward, "strategy weight adjusted");
        }
    }

    fn play_hard(&mut self, moves: &LegalMoves, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Decision {
        if rng.chance(BLUFF_CHANCE) {
            return bluff(moves, rng);
        }

        let score = self.cards_seen.score();
        let predicted = self
            .model
            .predict(ctx.upcoming, ctx.hand_size(ctx.upcoming));
        let singles = &moves.singles;

        if ctx.hand.len() == 1 && !singles.is_empty() {
            Decision::PlaySingle(0)
        } else if score > COUNT_THRESHOLD && !singles.is_empty() {
            highest_single(singles)
        } else if score < -COUNT_THRESHOLD {
            lowest_single(singles).unwrap_or(Decision::Draw)
        } else if predicted == Some(ActionKind::Run) && !singles.is_empty() {
            highest_single(singles)
        } else if let Some(i) = longest_run(&moves.runs) {
            Decision::PlayRun(i)
        } else if !singles.is_empty() {
            let non_ace = first_max_by_key(singles, |c| (c.rank != Rank::Ace).then_some(c.rank));
            match non_ace {
                Some(i) if singles[i].rank != Rank::Ace => Decision::PlaySingle(i),
                _ => Decision::PlaySingle(0),
            }
        } else {
            Decision::Draw
        }
    }

    fn play_learning(&mut self, moves: &LegalMoves, rng: &mut GameRng) -> Decision {
        if let Some(i) = longest_run(&moves.runs) {
            if rng.chance(self.weights.play_run) {
                self.last_action = Some(Strategy::PlayRun);
                return Decision::PlayRun(i);
            }
        }
        if moves.singles.is_empty() {
            self.last_action = None;
            return Decision::Draw;
        }
        if rng.chance(self.weights.play_high) {
            self.last_action = Some(Strategy::PlayHigh);
            highest_single(&moves.singles)
        } else {
            self.last_action = Some(Strategy::PlayLow);
            lowest_single(&moves.singles).unwrap_or(Decision::Draw)
        }
    }
}

impl std::fmt::Display for AiPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.label)
    }
}

fn play_easy(moves: &LegalMoves, rng: &mut GameRng) -> Decision {
    if !moves.runs.is_empty() {
        Decision::PlayRun(rng.gen_range_usize(0..moves.runs.len()))
    } else if !moves.singles.is_empty() {
        Decision::PlaySingle(rng.gen_range_usize(0..moves.singles.len()))
    } else {
        Decision::Draw
    }
}

fn play_medium(moves: &LegalMoves) -> Decision {
    if let Some(i) = longest_run(&moves.runs) {
        Decision::PlayRun(i)
    } else if !moves.singles.is_empty() {
        highest_single(&moves.singles)
    } else {
        Decision::Draw
    }
}

/// Random single if any, else random run, else draw.
fn bluff(moves: &LegalMoves, rng: &mut GameRng) -> Decision {
    if !moves.singles.is_empty() {
        Decision::PlaySingle(rng.gen_range_usize(0..moves.singles.len()))
    } else if !moves.runs.is_empty() {
        Decision::PlayRun(rng.gen_range_usize(0..moves.runs.len()))
    } else {
        Decision::Draw
    }
}

fn longest_run(runs: &[Run]) -> Option<usize> {
    first_max_by_key(runs, |r| r.len())
}

/// Highest rank; callers guarantee `singles` is non-empty.
fn highest_single(singles: &[Card]) -> Decision {
    first_max_by_key(singles, |c| c.rank).map_or(Decision::Draw, Decision::PlaySingle)
}

fn lowest_single(singles: &[Card]) -> Option<Decision> {
    first_max_by_key(singles, |c| std::cmp::Reverse(c.rank)).map(Decision::PlaySingle)
}

/// Index of the first element with the greatest key. `Iterator::max_by_key`
/// returns the last one on ties.
fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        if best.as_ref().map_or(true, |(_, b)| k > *b) {
            best = Some((i, k));
        }
    }
    best.map(|(i, _)| i)
}
