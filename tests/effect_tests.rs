//! Effect resolution tests against `MatchState`.

use proptest::prelude::*;
use rust_shed::cards::{Card, Rank, Run, SpecialEffectRegistry, Suit};
use rust_shed::core::{Direction, MatchState, PlayerId};
use rust_shed::effects::{EffectKind, EffectResolver};

fn c(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn clubs(_: &[Card]) -> Suit {
    Suit::Clubs
}

// =============================================================================
// Single cards
// =============================================================================

/// Exact-card bindings beat rank bindings.
#[test]
fn test_exact_binding_wins() {
    let registry = SpecialEffectRegistry::new()
        .with_rank(Rank::Jack, EffectKind::Reverse)
        .with_card(c(Rank::Jack, Suit::Spades), EffectKind::PickUpFive);
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(3);
    let actor = PlayerId::new(0);

    let result = resolver.resolve_card(c(Rank::Jack, Suit::Spades), actor, &mut state, &[], &mut clubs);
    assert_eq!(result.effect, Some(EffectKind::PickUpFive));
    assert_eq!(state.direction(), Direction::Clockwise);

    let result = resolver.resolve_card(c(Rank::Jack, Suit::Hearts), actor, &mut state, &[], &mut clubs);
    assert_eq!(result.effect, Some(EffectKind::Reverse));
    assert_eq!(state.direction(), Direction::CounterClockwise);
}

/// Change Suit keeps the rank and takes the chooser's suit.
#[test]
fn test_change_suit_face() {
    let registry = SpecialEffectRegistry::standard();
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(2);

    let result = resolver.resolve_card(c(Rank::Ace, Suit::Hearts), PlayerId::new(1), &mut state, &[], &mut clubs);
    assert_eq!(result.top, c(Rank::Ace, Suit::Clubs));
    assert_eq!(result.effect, Some(EffectKind::ChangeSuit));
}

/// Miss a Turn stacks on a seat that already owes one.
#[test]
fn test_missed_turns_accumulate() {
    let registry = SpecialEffectRegistry::standard();
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(3);
    let actor = PlayerId::new(0);

    resolver.resolve_card(c(Rank::Eight, Suit::Hearts), actor, &mut state, &[], &mut clubs);
    resolver.resolve_card(c(Rank::Eight, Suit::Clubs), actor, &mut state, &[], &mut clubs);

    assert_eq!(state.missed_turns(PlayerId::new(1)), 2);
    assert_eq!(state.next_player(), PlayerId::new(2));
    assert_eq!(state.next_player(), PlayerId::new(0));
    assert_eq!(state.next_player(), PlayerId::new(2));
}

// =============================================================================
// Runs
// =============================================================================

/// Only the trailing same-rank cards are inspected.
#[test]
fn test_run_checks_trailing_suffix_only() {
    let registry = SpecialEffectRegistry::standard();
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(3);

    let played = Run::from_slice(&[
        c(Rank::Two, Suit::Hearts),
        c(Rank::Three, Suit::Hearts),
        c(Rank::Three, Suit::Clubs),
    ]);
    let result = resolver
        .resolve_run(&played, PlayerId::new(0), &mut state, &[], &mut clubs)
        .unwrap();

    assert_eq!(result.effect, None);
    assert_eq!(state.pick_up_stack(), 0);
    assert_eq!(result.top, c(Rank::Three, Suit::Clubs));
}

/// A run of eights sums its missed turns over successive seats.
#[test]
fn test_run_of_eights() {
    let registry = SpecialEffectRegistry::standard();
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(4);

    let played = Run::from_slice(&[c(Rank::Eight, Suit::Hearts), c(Rank::Eight, Suit::Spades)]);
    let result = resolver
        .resolve_run(&played, PlayerId::new(0), &mut state, &[], &mut clubs)
        .unwrap();

    assert_eq!(result.effect, Some(EffectKind::MissTurn));
    assert_eq!(state.missed_turns(PlayerId::new(1)), 1);
    assert_eq!(state.missed_turns(PlayerId::new(2)), 1);
    assert_eq!(state.next_player(), PlayerId::new(3));
}

/// Pick-up cards in the suffix each add to the stack.
#[test]
fn test_run_of_twos() {
    let registry = SpecialEffectRegistry::standard();
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(2);

    let played = Run::from_slice(&[
        c(Rank::Two, Suit::Hearts),
        c(Rank::Two, Suit::Diamonds),
        c(Rank::Two, Suit::Clubs),
    ]);
    resolver.resolve_run(&played, PlayerId::new(0), &mut state, &[], &mut clubs);
    assert_eq!(state.pick_up_stack(), 6);
}

/// Empty runs resolve to nothing.
#[test]
fn test_empty_run() {
    let registry = SpecialEffectRegistry::standard();
    let resolver = EffectResolver::new(&registry);
    let mut state = MatchState::new(2);
    assert!(resolver
        .resolve_run(&[], PlayerId::new(0), &mut state, &[], &mut clubs)
        .is_none());
}

// =============================================================================
// Properties
// =============================================================================

fn arb_card() -> impl Strategy<Value = Card> {
    (0..13usize, 0..4usize).prop_map(|(r, s)| Card::new(Rank::ALL[r], Suit::ALL[s]))
}

proptest! {
    /// The stack only grows by pick-up amounts and only drops to zero.
    #[test]
    fn pickup_stack_monotone(cards in prop::collection::vec(arb_card(), 1..40)) {
        let registry = SpecialEffectRegistry::standard();
        let resolver = EffectResolver::new(&registry);
        let mut state = MatchState::new(4);

        for (i, card) in cards.into_iter().enumerate() {
            let before = state.pick_up_stack();
            let actor = PlayerId::new((i % 4) as u8);
            let result = resolver.resolve_card(card, actor, &mut state, &[], &mut clubs);
            let after = state.pick_up_stack();

            match result.effect {
                Some(effect) if effect.is_pickup() => prop_assert_eq!(after, before + effect.pickup_amount()),
                Some(EffectKind::Cancel) => prop_assert!(after == 0 || after == before),
                _ => prop_assert_eq!(after, before),
            }
        }
    }

    /// Cover never moves the turn; two Reverses restore the direction.
    #[test]
    fn cover_and_reverse_keep_turn(seats in 2usize..8, steps in 0usize..10) {
        let registry = SpecialEffectRegistry::standard();
        let resolver = EffectResolver::new(&registry);
        let mut state = MatchState::new(seats);
        for _ in 0..steps {
            state.next_player();
        }
        let actor = state.current_player();
        let index = state.current_index();
        let direction = state.direction();

        resolver.resolve_card(c(Rank::Queen, Suit::Hearts), actor, &mut state, &[], &mut clubs);
        prop_assert_eq!(state.current_index(), index);
        prop_assert!(state.take_extra_turn());

        resolver.resolve_card(c(Rank::King, Suit::Hearts), actor, &mut state, &[], &mut clubs);
        resolver.resolve_card(c(Rank::King, Suit::Spades), actor, &mut state, &[], &mut clubs);
        prop_assert_eq!(state.direction(), direction);
        prop_assert_eq!(state.current_index(), index);
    }
}
