//! Decisions, turn outcomes, and history records.
//!
//! A seat answers each prompt with a `Decision` (normal turn) or a
//! `PickupDecision` (pending pick-up stack). The engine turns that into a
//! `TurnReport`, which the match driver stores as a `TurnRecord` and feeds
//! to statistics and AI observers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Card, Run};
use crate::effects::EffectKind;

/// What a turn resolved to. This is the tag the statistics layer and the
/// AI opponent models consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Draw,
    Single,
    Run,
    Skip,
    Win,
    Error,
}

impl ActionKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Draw => "draw",
            ActionKind::Single => "single",
            ActionKind::Run => "run",
            ActionKind::Skip => "skip",
            ActionKind::Win => "win",
            ActionKind::Error => "error",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Choice made on a normal turn. Indices refer to the legal-move lists
/// handed to the seat, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    PlaySingle(usize),
    PlayRun(usize),
    Draw,
}

/// Choice made while a pick-up stack is pending.
///
/// `PlayCard` indexes the combined list of pick-up cards followed by
/// Cancel cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupDecision {
    DrawStack,
    PlayRun(usize),
    PlayCard(usize),
}

/// Result of one engine call for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: PlayerId,
    pub action: ActionKind,
    /// Cards that left the hand, in play order. Empty for draws.
    pub played: Run,
    /// Cards that entered the hand this call.
    pub drawn: Vec<Card>,
    /// Effect applied by the play, if any.
    pub effect: Option<EffectKind>,
    /// The same seat acts again before the turn passes.
    pub extra_turn: bool,
    /// The seat emptied its hand with a pick-up play; the win waits on
    /// the next seat's response.
    pub pending_win: bool,
}

impl TurnReport {
    #[must_use]
    pub fn new(player: PlayerId, action: ActionKind) -> Self {
        Self {
            player,
            action,
            played: Run::new(),
            drawn: Vec::new(),
            effect: None,
            extra_turn: false,
            pending_win: false,
        }
    }

    #[must_use]
    pub fn with_played(mut self, played: Run) -> Self {
        self.played = played;
        self
    }

    #[must_use]
    pub fn with_drawn(mut self, drawn: Vec<Card>) -> Self {
        self.drawn = drawn;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Option<EffectKind>) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.action == ActionKind::Win
    }
}

/// A report stamped with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number, starting at 1. Extra turns share their seat's number.
    pub turn: u32,
    /// Engine call within the turn, starting at 0.
    pub sequence: u32,
    pub report: TurnReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_report_builder() {
        let card = Card::new(Rank::Two, Suit::Hearts);
        let report = TurnReport::new(PlayerId::new(0), ActionKind::Single)
            .with_played(Run::from_slice(&[card]))
            .with_effect(Some(EffectKind::PickUpTwo));

        assert_eq!(report.played.len(), 1);
        assert_eq!(report.effect, Some(EffectKind::PickUpTwo));
        assert!(report.drawn.is_empty());
        assert!(!report.is_win());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(ActionKind::Run.to_string(), "run");
        assert_eq!(ActionKind::Skip.to_string(), "skip");
    }

    #[test]
    fn test_record_serialization() {
        let record = TurnRecord {
            turn: 3,
            sequence: 1,
            report: TurnReport::new(PlayerId::new(2), ActionKind::Draw)
                .with_drawn(vec![Card::new(Rank::Nine, Suit::Spades)]),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: TurnRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
