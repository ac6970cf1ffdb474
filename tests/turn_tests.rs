//! Turn engine tests: the pick-up response, the action menu, and the
//! special cases for emptying a hand.

use rust_shed::ai::{AiPlayer, Difficulty};
use rust_shed::cards::{Card, Rank, Run, SpecialEffectRegistry, Suit};
use rust_shed::core::{ActionKind, GameRng, MatchState, PlayerId};
use rust_shed::effects::EffectKind;
use rust_shed::rules::{MoveGenerator, TurnContext, TurnEngine};
use rust_shed::seats::{HumanSeat, Player, Prompt, ScriptedInput};
use rust_shed::zones::Table;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn medium() -> Player {
    AiPlayer::new("AI", Difficulty::Medium).into()
}

fn scripted(answers: &[Option<usize>]) -> Player {
    HumanSeat::new("PLAYER 1", Box::new(ScriptedInput::new(answers.to_vec()))).into()
}

fn opponents(n: usize) -> Vec<Vec<Card>> {
    (0..n).map(|_| vec![c(Rank::Nine, Suit::Clubs), c(Rank::Ten, Suit::Clubs)]).collect()
}

fn draw_pile(n: usize) -> Vec<Card> {
    vec![c(Rank::Four, Suit::Spades); n]
}

// =============================================================================
// Emptying the hand
// =============================================================================

/// A last-card Miss a Turn wins with two opponents still holding cards.
#[test]
fn test_last_card_miss_turn_wins() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Eight, Suit::Hearts)]];
    hands.extend(opponents(2));
    let mut table = Table::from_parts(hands, c(Rank::Five, Suit::Hearts), draw_pile(5), vec![]);
    let mut state = MatchState::new(3);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let report = engine.take_turn(PlayerId::new(0), &mut medium(), &mut cx);

    assert!(report.is_win());
    assert_eq!(report.effect, Some(EffectKind::MissTurn));
    assert!(table.hand(PlayerId::new(0)).is_empty());
}

/// With one opponent left the same play draws a card instead of winning.
#[test]
fn test_last_card_miss_turn_one_opponent_draws() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Eight, Suit::Hearts)]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Five, Suit::Hearts), draw_pile(5), vec![]);
    let mut state = MatchState::new(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let report = engine.take_turn(PlayerId::new(0), &mut medium(), &mut cx);

    assert_eq!(report.action, ActionKind::Single);
    assert_eq!(report.drawn.len(), 1);
    assert_eq!(table.hand(PlayerId::new(0)).len(), 1);
}

/// A last-card Cover forces a draw and grants neither a win nor a turn.
#[test]
fn test_last_card_cover_draws() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Queen, Suit::Clubs)]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Queen, Suit::Spades), draw_pile(5), vec![]);
    let mut state = MatchState::new(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let report = engine.take_turn(PlayerId::new(0), &mut medium(), &mut cx);

    assert!(!report.is_win());
    assert!(!report.extra_turn);
    assert_eq!(report.drawn, vec![c(Rank::Four, Suit::Spades)]);
    assert_eq!(table.hand(PlayerId::new(0)).len(), 1);
    assert!(!state.extra_turn);
}

/// A run ending on a pick-up card leaves the win pending.
#[test]
fn test_last_run_pickup_pending() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Three, Suit::Hearts), c(Rank::Two, Suit::Hearts)]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Five, Suit::Hearts), draw_pile(5), vec![]);
    let mut state = MatchState::new(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    // run menu, first run: 3 -> 2 of Hearts
    let mut seat = scripted(&[Some(2), Some(2)]);
    let report = engine.take_turn(PlayerId::new(0), &mut seat, &mut cx);

    assert_eq!(report.action, ActionKind::Run);
    assert_eq!(
        report.played,
        Run::from_slice(&[c(Rank::Three, Suit::Hearts), c(Rank::Two, Suit::Hearts)])
    );
    assert!(report.pending_win);
    assert_eq!(state.potential_winner, Some(PlayerId::new(0)));
    assert_eq!(state.pick_up_stack(), 2);
}

// =============================================================================
// Pick-up response
// =============================================================================

/// Two PickUpTwo cards offer the pair as a run; drawing takes exactly the
/// stack and clears it.
#[test]
fn test_pickup_draw_response() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let two_h = c(Rank::Two, Suit::Hearts);
    let two_d = c(Rank::Two, Suit::Diamonds);
    let hand = vec![two_h, two_d, c(Rank::Nine, Suit::Spades)];

    let generator = MoveGenerator::new(&registry);
    assert_eq!(generator.pickup_runs(&hand), vec![Run::from_slice(&[two_h, two_d])]);

    let mut hands = vec![hand];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Two, Suit::Clubs), draw_pile(6), vec![]);
    let mut state = MatchState::new(2);
    state.add_pickup(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let mut seat = scripted(&[Some(1)]);
    let report = engine.take_turn(PlayerId::new(0), &mut seat, &mut cx);

    assert_eq!(report.action, ActionKind::Draw);
    assert_eq!(report.drawn.len(), 2);
    assert_eq!(table.hand(PlayerId::new(0)).len(), 5);
    assert_eq!(state.pick_up_stack(), 0);
}

/// Without an answer the stack is drawn automatically.
#[test]
fn test_pickup_forced_draw() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Nine, Suit::Spades)]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Jack, Suit::Clubs), draw_pile(3), vec![]);
    let mut state = MatchState::new(2);
    state.add_pickup(5);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    // seat would fail if asked
    let mut seat = scripted(&[]);
    let report = engine.take_turn(PlayerId::new(0), &mut seat, &mut cx);

    // only three cards were left anywhere
    assert_eq!(report.action, ActionKind::Draw);
    assert_eq!(report.drawn.len(), 3);
    assert_eq!(state.pick_up_stack(), 0);
}

/// Playing a pick-up run adds every card to the stack.
#[test]
fn test_pickup_run_response() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![
        c(Rank::Two, Suit::Hearts),
        c(Rank::Jack, Suit::Spades),
        c(Rank::Six, Suit::Diamonds),
    ]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Two, Suit::Clubs), draw_pile(3), vec![]);
    let mut state = MatchState::new(2);
    state.add_pickup(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let report = engine.take_turn(PlayerId::new(0), &mut medium(), &mut cx);

    assert_eq!(report.action, ActionKind::Run);
    assert_eq!(report.played.len(), 2);
    assert_eq!(state.pick_up_stack(), 9);
    assert_eq!(table.top().physical, c(Rank::Jack, Suit::Spades));
    assert_eq!(table.discard_pile_len(), 2);
}

// =============================================================================
// Action menu
// =============================================================================

/// A human can back out of a sub-menu and draw instead.
#[test]
fn test_human_back_then_draw() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Five, Suit::Clubs), c(Rank::Nine, Suit::Hearts)]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Five, Suit::Hearts), draw_pile(3), vec![]);
    let mut state = MatchState::new(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let mut seat = scripted(&[Some(1), None, Some(3)]);
    let report = engine.take_turn(PlayerId::new(0), &mut seat, &mut cx);

    assert_eq!(report.action, ActionKind::Draw);
    assert_eq!(table.hand(PlayerId::new(0)).len(), 3);
}

/// A human Change Suit play asks for the suit after the card leaves the
/// hand.
#[test]
fn test_human_change_suit() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);
    let mut hands = vec![vec![c(Rank::Ace, Suit::Hearts), c(Rank::Nine, Suit::Diamonds)]];
    hands.extend(opponents(1));
    let mut table = Table::from_parts(hands, c(Rank::Five, Suit::Clubs), draw_pile(3), vec![]);
    let mut state = MatchState::new(2);
    let mut rng = GameRng::new(1);
    let mut cx = TurnContext {
        table: &mut table,
        state: &mut state,
        rng: &mut rng,
    };

    let input = |prompt: &Prompt<'_>, _: usize| match prompt {
        Prompt::Action { .. } => Some(1),
        Prompt::Single(_) => Some(1),
        Prompt::Suit(hand) => {
            assert_eq!(hand.len(), 1);
            Some(2)
        }
        _ => None,
    };
    let mut seat: Player = HumanSeat::new("PLAYER 1", Box::new(input)).into();
    let report = engine.take_turn(PlayerId::new(0), &mut seat, &mut cx);

    assert_eq!(report.effect, Some(EffectKind::ChangeSuit));
    assert_eq!(table.top_face(), c(Rank::Ace, Suit::Diamonds));
    assert_eq!(table.top().physical, c(Rank::Ace, Suit::Hearts));
}

/// An AI seat never produces an out-of-range selection over many turns.
#[test]
fn test_ai_turns_never_error() {
    let registry = SpecialEffectRegistry::standard();
    let engine = TurnEngine::new(&registry);

    for difficulty in Difficulty::ALL {
        let mut rng = GameRng::new(9);
        let mut deal_rng = rng.for_context("deal");
        let mut table = Table::deal(1, 3, 7, &mut deal_rng).unwrap();
        let mut state = MatchState::new(3);
        let mut seats: Vec<Player> = (0..3).map(|_| AiPlayer::new("AI", difficulty).into()).collect();

        for _ in 0..60 {
            let actor = state.current_player();
            let mut cx = TurnContext {
                table: &mut table,
                state: &mut state,
                rng: &mut rng,
            };
            let report = engine.take_turn(actor, &mut seats[actor.index()], &mut cx);
            assert_ne!(report.action, ActionKind::Error);
            if report.is_win() || report.pending_win {
                break;
            }
            if !state.take_extra_turn() {
                state.next_player();
            }
            assert_eq!(table.total_cards(), 52);
        }
    }
}
