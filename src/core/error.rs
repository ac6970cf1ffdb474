//! Error types.
//!
//! `ConfigError` rejects a match before it starts. `TurnError` is internal
//! to a single turn and is always converted into a turn report (`Skip` or
//! `Error`) at the turn boundary. `MatchError` is what the match driver
//! returns to callers.

use thiserror::Error;

use crate::cards::Card;

use super::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deck count must be between 1 and 4, got {0}")]
    DeckCount(usize),
    #[error("hand size must be between 1 and 10, got {0}")]
    HandSize(usize),
    #[error("at most 10 human seats are allowed, got {0}")]
    TooManyHumans(usize),
    #[error("at most 10 AI seats are allowed, got {0}")]
    TooManyAis(usize),
    #[error("a match needs at least 2 seats, got {0}")]
    TooFewSeats(usize),
    #[error("dealing {needed} cards needs more than the {available} in the deck")]
    DealExceedsDeck { needed: usize, available: usize },
    #[error("human seats were configured but {0} input sources were supplied")]
    MissingHumanInput(usize),
    /// `message` is serde_json's own text, which already names the position.
    #[error("invalid configuration JSON: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("{player} selected option {index} of {available}")]
    InvalidSelection {
        player: PlayerId,
        index: usize,
        available: usize,
    },
    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { player: PlayerId, card: Card },
    #[error("{0} has no seat at this table")]
    UnknownSeat(PlayerId),
    #[error("{0} chose a run with no cards")]
    EmptyRun(PlayerId),
    #[error("draw pile and discard pile are both empty")]
    ResourceExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("no winner after {0} turns")]
    TurnLimitReached(u32),
    #[error("match already won by {0}")]
    AlreadyFinished(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_error_messages() {
        let err = TurnError::CardNotInHand {
            player: PlayerId::new(1),
            card: Card::new(Rank::Two, Suit::Clubs),
        };
        assert_eq!(err.to_string(), "2 of Clubs is not in Seat 1's hand");

        let err = ConfigError::DealExceedsDeck {
            needed: 60,
            available: 52,
        };
        assert!(err.to_string().contains("60"));

        assert_eq!(MatchError::TurnLimitReached(500).to_string(), "no winner after 500 turns");
    }
}
