//! AI player trait definition.

use std::fmt;

use crate::domain::player_view::PlayerPerspective;
use crate::domain::{Card, Suit};

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// AI found no legal option to choose from
    NoLegalOption(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::NoLegalOption(msg) => write!(f, "AI has no legal option: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// Intended trump-selection operation, identical in shape to what a human
/// message produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrumpDecision {
    /// Round 1: order the turned card up.
    OrderUp,
    /// Round 2: name a suit.
    Name(Suit),
    Pass,
}

/// Trait for AI players.
///
/// Implementations receive the game state visible to one seat and must choose
/// a legal action; legality comes from the same helpers the engine enforces
/// (`PlayerPerspective::legal_plays`, `nameable_suits`), so a conforming
/// implementation never produces an operation the engine would reject.
pub trait AiPlayer: Send + Sync {
    /// Round 1 or 2 trump call for the seat on turn.
    fn choose_trump_call(&self, view: &PlayerPerspective) -> Result<TrumpDecision, AiError>;

    /// Whether the maker plays the round alone.
    fn choose_going_alone(&self, view: &PlayerPerspective) -> Result<bool, AiError>;

    /// Dealer's discard from the six-card hand.
    fn choose_discard(&self, view: &PlayerPerspective) -> Result<Card, AiError>;

    /// Card to play into the current trick.
    fn choose_play(&self, view: &PlayerPerspective) -> Result<Card, AiError>;
}
