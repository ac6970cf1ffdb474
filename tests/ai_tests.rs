//! AI tier tests through the public seat interface.

use rust_shed::ai::{AiPlayer, Difficulty, Strategy, StrategyWeights};
use rust_shed::cards::{Card, Rank, Run, Suit};
use rust_shed::core::{ActionKind, Decision, GameRng, PlayerId, PlayerMap, TurnReport};
use rust_shed::rules::LegalMoves;
use rust_shed::seats::DecisionContext;

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn legal() -> LegalMoves {
    LegalMoves {
        singles: vec![
            c(Rank::Four, Suit::Hearts),
            c(Rank::Five, Suit::Hearts),
            c(Rank::Queen, Suit::Hearts),
        ],
        runs: vec![
            Run::from_slice(&[c(Rank::Four, Suit::Hearts), c(Rank::Five, Suit::Hearts)]),
            Run::from_slice(&[c(Rank::Five, Suit::Hearts), c(Rank::Four, Suit::Hearts)]),
        ],
    }
}

fn context<'a>(hand: &'a [Card], sizes: &'a PlayerMap<usize>) -> DecisionContext<'a> {
    DecisionContext {
        player: PlayerId::new(0),
        top: c(Rank::Nine, Suit::Hearts),
        hand,
        hand_sizes: sizes,
        upcoming: PlayerId::new(1),
        pick_up_stack: 0,
    }
}

// =============================================================================
// Tier policies
// =============================================================================

/// Every tier returns an index inside the lists it was given.
#[test]
fn test_decisions_in_range() {
    let hand = legal().singles;
    let sizes = PlayerMap::from(vec![3, 4]);
    let moves = legal();
    let mut rng = GameRng::new(77);

    for difficulty in Difficulty::ALL {
        let mut ai = AiPlayer::new("AI", difficulty);
        for _ in 0..100 {
            match ai.decide(&moves, &context(&hand, &sizes), &mut rng) {
                Decision::PlaySingle(i) => assert!(i < moves.singles.len()),
                Decision::PlayRun(i) => assert!(i < moves.runs.len()),
                Decision::Draw => panic!("{difficulty} drew with legal moves"),
            }
        }
    }
}

/// With nothing legal every tier draws.
#[test]
fn test_no_moves_draws() {
    let sizes = PlayerMap::from(vec![3, 4]);
    let mut rng = GameRng::new(1);

    for difficulty in Difficulty::ALL {
        let mut ai = AiPlayer::new("AI", difficulty);
        let decision = ai.decide(&LegalMoves::default(), &context(&[], &sizes), &mut rng);
        assert_eq!(decision, Decision::Draw);
    }
}

/// Seeing many low cards makes the hard tier lead its highest single.
#[test]
fn test_hard_reads_card_count() {
    let mut ai = AiPlayer::new("AI", Difficulty::Hard);
    let lows = Run::from_slice(&[c(Rank::Two, Suit::Clubs); 6]);
    ai.observe(&TurnReport::new(PlayerId::new(1), ActionKind::Run).with_played(lows), 2);
    assert_eq!(ai.cards_seen().score(), 6);

    let hand = legal().singles;
    let sizes = PlayerMap::from(vec![3, 4]);
    let mut rng = GameRng::new(3);
    let highest = (0..100)
        .filter(|_| ai.decide(&legal(), &context(&hand, &sizes), &mut rng) == Decision::PlaySingle(2))
        .count();
    assert!(highest >= 75, "queen led {highest} times");
}

/// Learning weights steer the choice and `learn` reinforces it.
#[test]
fn test_learning_reinforcement() {
    let weights = StrategyWeights {
        play_run: 0.0,
        play_high: 1.0,
        ..StrategyWeights::default()
    };
    let mut ai = AiPlayer::new("AI", Difficulty::Learning).with_weights(weights);
    let hand = legal().singles;
    let sizes = PlayerMap::from(vec![3, 4]);
    let mut rng = GameRng::new(5);

    assert_eq!(ai.decide(&legal(), &context(&hand, &sizes), &mut rng), Decision::PlaySingle(2));
    assert_eq!(ai.last_action(), Some(Strategy::PlayHigh));

    ai.learn(-0.5);
    assert!((ai.weights().play_high - 0.5).abs() < 1e-9);
}

// =============================================================================
// Results
// =============================================================================

/// Adaptive AIs follow their record: even plays medium, winning relabels.
#[test]
fn test_adaptive_record() {
    let mut ai = AiPlayer::new("AI PLAYER 1", Difficulty::Adaptive);
    assert_eq!(ai.label(), Difficulty::Adaptive);

    ai.record_result(false);
    assert_eq!(ai.label(), Difficulty::Medium);
    for _ in 0..4 {
        ai.record_result(false);
    }
    assert_eq!(ai.performance_score(), -5);
    assert_eq!(ai.label(), Difficulty::Easy);
    assert_eq!(ai.to_string(), "AI PLAYER 1[Easy]");
}

/// Suit choice follows the hand for medium and is random for easy.
#[test]
fn test_suit_choice() {
    let hand = [
        c(Rank::Two, Suit::Diamonds),
        c(Rank::Three, Suit::Diamonds),
        c(Rank::Four, Suit::Spades),
    ];
    let mut rng = GameRng::new(13);

    let mut medium = AiPlayer::new("AI", Difficulty::Medium);
    let mut hard = AiPlayer::new("AI", Difficulty::Hard);
    assert_eq!(medium.choose_suit(&hand, &mut rng), Suit::Diamonds);
    assert_eq!(hard.choose_suit(&hand, &mut rng), Suit::Diamonds);

    let mut easy = AiPlayer::new("AI", Difficulty::Easy);
    let picks: std::collections::HashSet<Suit> = (0..60).map(|_| easy.choose_suit(&hand, &mut rng)).collect();
    assert_eq!(picks.len(), 4);
}
