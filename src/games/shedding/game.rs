//! Single-match driver.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::{AiPlayer, Difficulty};
use crate::core::{
    ActionKind, ConfigError, GameRng, LearningFeedback, MatchConfig, MatchError, MatchState, PlayerId, PlayerMap,
    SeatConfig, TurnRecord, TurnReport,
};
use crate::rules::{MoveGenerator, TurnContext, TurnEngine};
use crate::seats::{HumanInput, HumanSeat, Player};
use crate::zones::Table;

use super::stats::MatchStats;
use super::view::MatchView;

/// How a finished match ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: PlayerId,
    pub winner_name: String,
    pub turns: u32,
    pub stats: MatchStats,
}

/// Builder for a `Match`.
///
/// Human seats need one `HumanInput` each, in seat order. AI seats are
/// created from the config unless trained players are supplied.
pub struct MatchBuilder {
    config: MatchConfig,
    inputs: Vec<Box<dyn HumanInput>>,
    ai_players: Vec<AiPlayer>,
}

impl MatchBuilder {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            inputs: Vec::new(),
            ai_players: Vec::new(),
        }
    }

    /// Input for the next human seat.
    pub fn human_input(mut self, input: Box<dyn HumanInput>) -> Self {
        self.inputs.push(input);
        self
    }

    /// Existing AI players for the AI seats, in order. Their difficulty
    /// overrides the config; seats left over get fresh players.
    pub fn ai_players(mut self, players: impl IntoIterator<Item = AiPlayer>) -> Self {
        self.ai_players.extend(players);
        self
    }

    /// Validate, seat everyone, and deal.
    pub fn build(self) -> Result<Match, ConfigError> {
        let MatchBuilder {
            config,
            inputs,
            ai_players,
        } = self;
        config.validate()?;
        if inputs.len() != config.human_count() {
            return Err(ConfigError::MissingHumanInput(inputs.len()));
        }

        let mut inputs = inputs.into_iter();
        let mut trained = ai_players.into_iter();
        let mut humans = 0;
        let mut ais = 0;
        let mut seats = Vec::with_capacity(config.seat_count());
        for seat in &config.seats {
            match *seat {
                SeatConfig::Human => {
                    humans += 1;
                    let input = inputs.next().ok_or(ConfigError::MissingHumanInput(humans - 1))?;
                    seats.push(Player::Human(HumanSeat::new(format!("PLAYER {humans}"), input)));
                }
                SeatConfig::Ai(difficulty) => {
                    ais += 1;
                    let ai = trained
                        .next()
                        .unwrap_or_else(|| AiPlayer::new(format!("AI PLAYER {ais}"), difficulty));
                    seats.push(Player::Ai(ai));
                }
            }
        }

        let root = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let mut deal_rng = root.for_context("deal");
        let table = Table::deal(config.deck_count, seats.len(), config.hand_size, &mut deal_rng)?;
        info!(
            seats = seats.len(),
            decks = config.deck_count,
            seed = root.seed(),
            top = %table.top_face(),
            "match dealt"
        );

        Ok(Match {
            state: MatchState::new(seats.len()),
            stats: MatchStats::new(seats.len()),
            seats: PlayerMap::from(seats),
            table,
            rng: root.for_context("play"),
            history: Vector::new(),
            turn: 0,
            winner: None,
            config,
        })
    }
}

/// One match from deal to winner.
///
/// `play_turn` runs one seat's whole turn, including Cover re-entries and
/// pending-win resolution; `run` repeats it until someone wins.
///
/// ## Example
///
/// ```
/// use rust_shed::ai::Difficulty;
/// use rust_shed::core::MatchConfig;
/// use rust_shed::games::shedding::MatchBuilder;
///
/// let config = MatchConfig::default()
///     .with_humans(0)
///     .with_ais(&[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard])
///     .with_seed(7);
/// let mut game = MatchBuilder::new(config).build().unwrap();
///
/// let outcome = game.run(10_000).unwrap();
/// assert_eq!(game.winner(), Some(outcome.winner));
/// assert_eq!(game.table().total_cards(), 52);
/// ```
pub struct Match {
    config: MatchConfig,
    seats: PlayerMap<Player>,
    table: Table,
    state: MatchState,
    rng: GameRng,
    history: Vector<TurnRecord>,
    stats: MatchStats,
    turn: u32,
    winner: Option<PlayerId>,
}

impl Match {
    /// Seat the table directly, bypassing the deal. Useful for replaying a
    /// known position.
    pub fn from_position(
        config: MatchConfig,
        seats: Vec<Player>,
        table: Table,
        state: MatchState,
        seed: u64,
    ) -> Self {
        let seat_count = seats.len();
        Self {
            config,
            seats: PlayerMap::from(seats),
            table,
            state,
            rng: GameRng::new(seed).for_context("play"),
            history: Vector::new(),
            stats: MatchStats::new(seat_count),
            turn: 0,
            winner: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    #[must_use]
    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn seat(&self, player: PlayerId) -> Option<&Player> {
        self.seats.get(player)
    }

    pub fn seats(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.seats.iter()
    }

    /// Mutable access to an AI seat, e.g. to call `learn`.
    pub fn ai_mut(&mut self, player: PlayerId) -> Option<&mut AiPlayer> {
        self.seats.get_mut(player).and_then(Player::as_ai_mut)
    }

    /// The AI players, for carrying what they learned into another match.
    pub fn into_ai_players(self) -> Vec<AiPlayer> {
        self.seats
            .values()
            .filter_map(Player::as_ai)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn view(&self, player: PlayerId) -> MatchView {
        MatchView::capture(player, &self.table, &self.state, &self.config.effects)
    }

    /// Play until someone wins or `max_turns` turns have been played.
    pub fn run(&mut self, max_turns: u32) -> Result<MatchOutcome, MatchError> {
        loop {
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
            if self.turn >= max_turns {
                return Err(MatchError::TurnLimitReached(max_turns));
            }
            self.play_turn()?;
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let winner = self.winner?;
        Some(MatchOutcome {
            winner,
            winner_name: self.seats.get(winner).map(|p| p.name().to_string()).unwrap_or_default(),
            turns: self.turn,
            stats: self.stats.clone(),
        })
    }

    /// Run the current seat's turn and pass play on. Returns the reports
    /// produced, in order.
    pub fn play_turn(&mut self) -> Result<Vec<TurnReport>, MatchError> {
        if let Some(winner) = self.winner {
            return Err(MatchError::AlreadyFinished(winner));
        }
        self.turn += 1;
        let actor = self.state.current_player();

        if self
            .table
            .reshuffle_ahead(self.config.reshuffle_threshold, &mut self.rng)
        {
            debug!(turn = self.turn, draw_pile = self.table.draw_pile_len(), "reshuffled ahead of turn");
        }

        let pending = self.state.potential_winner;
        if let Some(pending) = pending {
            let can_answer = MoveGenerator::new(&self.config.effects).can_answer_pickup(self.table.hand(actor));
            if pending == actor || !can_answer {
                return Ok(vec![self.confirm_win(pending, 0)]);
            }
        }

        let mut reports = Vec::new();
        let mut sequence = 0;
        loop {
            let report = {
                let engine = TurnEngine::new(&self.config.effects).with_search_limit(self.config.run_search_limit);
                let mut cx = TurnContext {
                    table: &mut self.table,
                    state: &mut self.state,
                    rng: &mut self.rng,
                };
                engine.take_turn(actor, &mut self.seats[actor], &mut cx)
            };
            self.record(report.clone(), sequence);
            reports.push(report);

            if reports.last().is_some_and(TurnReport::is_win) {
                self.finish(actor);
                return Ok(reports);
            }
            if !self.state.take_extra_turn() {
                break;
            }
            sequence += 1;
        }

        if let Some(pending) = pending {
            let registry = &self.config.effects;
            let answered = reports
                .first()
                .is_some_and(|r| r.played.iter().any(|&c| registry.is_pickup(c) || registry.is_cancel(c)));
            if !answered {
                reports.push(self.confirm_win(pending, sequence + 1));
                return Ok(reports);
            }
            if self.state.potential_winner == Some(pending) {
                debug!(%pending, responder = %actor, "pending win answered");
                self.state.potential_winner = None;
            }
        }

        let next = self.state.next_player();
        debug!(turn = self.turn, %next, "turn passed");
        Ok(reports)
    }

    fn confirm_win(&mut self, winner: PlayerId, sequence: u32) -> TurnReport {
        info!(%winner, turn = self.turn, "pending win confirmed");
        let report = TurnReport::new(winner, ActionKind::Win);
        self.record(report.clone(), sequence);
        self.finish(winner);
        report
    }

    /// Store a report and let every AI see it.
    fn record(&mut self, report: TurnReport, sequence: u32) {
        let hand_size = self.table.hand(report.player).len();
        for ai in self.seats.values_mut().filter_map(Player::as_ai_mut) {
            ai.observe(&report, hand_size);
        }
        self.stats.record(&report);
        self.history.push_back(TurnRecord {
            turn: self.turn,
            sequence,
            report,
        });
    }

    fn finish(&mut self, winner: PlayerId) {
        self.winner = Some(winner);
        self.state.potential_winner = None;

        let feedback = self.config.learning_feedback;
        for (player, seat) in self.seats.iter_mut() {
            let Some(ai) = seat.as_ai_mut() else {
                continue;
            };
            let won = player == winner;
            ai.record_result(won);
            if let (LearningFeedback::MatchOutcome { win, loss }, Difficulty::Learning) = (feedback, ai.difficulty()) {
                ai.learn(if won { win } else { loss });
            }
        }

        let name = self.seats.get(winner).map(Player::name).unwrap_or_default();
        info!(%winner, name, turns = self.turn, "match won");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::seats::ScriptedInput;

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn ai_config(ais: &[Difficulty]) -> MatchConfig {
        MatchConfig::default().with_humans(0).with_ais(ais).with_seed(11)
    }

    #[test]
    fn test_build_requires_inputs() {
        let err = MatchBuilder::new(MatchConfig::default().with_seed(1)).build().err();
        assert_eq!(err, Some(ConfigError::MissingHumanInput(0)));

        let game = MatchBuilder::new(MatchConfig::default().with_seed(1))
            .human_input(Box::new(ScriptedInput::default()))
            .build()
            .unwrap();
        assert!(game.seat(PlayerId::new(0)).unwrap().is_human());
        assert_eq!(game.seat(PlayerId::new(1)).unwrap().name(), "AI PLAYER 1");
    }

    #[test]
    fn test_deal_conserves_cards() {
        let game = MatchBuilder::new(ai_config(&[Difficulty::Easy, Difficulty::Hard]).with_decks(2))
            .build()
            .unwrap();
        assert_eq!(game.table().total_cards(), 104);
        assert_eq!(game.table().hand(PlayerId::new(1)).len(), 7);
    }

    #[test]
    fn test_turn_advances_and_records() {
        let mut game = MatchBuilder::new(ai_config(&[Difficulty::Medium, Difficulty::Medium]))
            .build()
            .unwrap();
        let reports = game.play_turn().unwrap();

        assert!(!reports.is_empty());
        assert_eq!(reports[0].player, PlayerId::new(0));
        assert_eq!(game.history().len(), reports.len());
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_run_to_completion() {
        let mut game = MatchBuilder::new(ai_config(&[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]))
            .build()
            .unwrap();
        let outcome = game.run(5_000).unwrap();

        assert_eq!(game.winner(), Some(outcome.winner));
        assert_eq!(game.table().total_cards(), 52);
        assert!(matches!(game.play_turn(), Err(MatchError::AlreadyFinished(_))));

        let scores: Vec<i32> = game
            .seats()
            .filter_map(|(_, p)| p.as_ai())
            .map(AiPlayer::performance_score)
            .collect();
        assert_eq!(scores.iter().filter(|&&s| s == 1).count(), 1);
        assert_eq!(scores.iter().filter(|&&s| s == -1).count(), 2);
    }

    #[test]
    fn test_pending_win_confirmed_when_unanswerable() {
        let config = ai_config(&[Difficulty::Medium, Difficulty::Medium]);
        let seats = vec![
            AiPlayer::new("A", Difficulty::Medium).into(),
            AiPlayer::new("B", Difficulty::Medium).into(),
        ];
        let table = Table::from_parts(
            vec![vec![c(Rank::Two, Suit::Hearts)], vec![c(Rank::Nine, Suit::Clubs)]],
            c(Rank::Five, Suit::Hearts),
            vec![c(Rank::Four, Suit::Spades); 5],
            vec![],
        );
        let mut game = Match::from_position(config, seats, table, MatchState::new(2), 3);

        let first = game.play_turn().unwrap();
        assert!(first[0].pending_win);
        assert_eq!(game.winner(), None);

        let second = game.play_turn().unwrap();
        assert_eq!(second, vec![TurnReport::new(PlayerId::new(0), ActionKind::Win)]);
        assert_eq!(game.winner(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_pending_win_answered() {
        let config = ai_config(&[Difficulty::Medium, Difficulty::Medium]);
        let seats = vec![
            AiPlayer::new("A", Difficulty::Medium).into(),
            AiPlayer::new("B", Difficulty::Medium).into(),
        ];
        let table = Table::from_parts(
            vec![
                vec![c(Rank::Two, Suit::Hearts)],
                vec![c(Rank::Two, Suit::Clubs), c(Rank::Nine, Suit::Clubs)],
            ],
            c(Rank::Five, Suit::Hearts),
            vec![c(Rank::Four, Suit::Spades); 10],
            vec![],
        );
        let mut game = Match::from_position(config, seats, table, MatchState::new(2), 3);

        game.play_turn().unwrap();
        let answer = game.play_turn().unwrap();

        assert_eq!(answer[0].played.len(), 1);
        assert_eq!(game.state().potential_winner, None);
        assert_eq!(game.state().pick_up_stack(), 4);
        assert_eq!(game.winner(), None);

        // seat 0 has nothing left to answer with and must draw the stack
        let drawn = game.play_turn().unwrap();
        assert_eq!(drawn[0].action, ActionKind::Draw);
        assert_eq!(drawn[0].drawn.len(), 4);
    }

    #[test]
    fn test_learning_feedback_applied() {
        let config = ai_config(&[Difficulty::Learning, Difficulty::Learning])
            .with_learning_feedback(LearningFeedback::MatchOutcome { win: 1.0, loss: -1.0 });
        let mut game = MatchBuilder::new(config).build().unwrap();
        game.run(5_000).unwrap();

        let changed = game
            .seats()
            .filter_map(|(_, p)| p.as_ai())
            .filter(|ai| ai.last_action().is_some())
            .all(|ai| {
                let w = ai.weights();
                w.play_run != 0.5 || w.play_high != 0.5 || w.play_low != 0.5
            });
        assert!(changed);
    }
}
