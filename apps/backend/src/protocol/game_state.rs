//! Per-recipient game state payload.
//!
//! One `GameStateView` is built per connected player after every mutation.
//! It carries the recipient's own hand and only public facts about everyone
//! else; other hands appear solely as `hand_size`.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{Card, Suit};

/// Public roster entry. Never contains cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    pub position: u8,
    pub is_ai: bool,
    pub is_connected: bool,
    pub hand_size: usize,
}

/// The trick on the table: ordered (player id, card) pairs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrickView {
    pub cards: Vec<(String, Card)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

/// Append-only, human-readable log entry for auditability and UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    pub text: String,
}

impl EventEntry {
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            at: OffsetDateTime::now_utc(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateView {
    pub room_code: String,
    pub phase: String,
    /// Recipient identity and seat.
    pub player_id: String,
    pub player_position: u8,
    pub players: Vec<PlayerInfo>,
    /// Recipient's own cards. Other players only ever see `hand_size`.
    pub hand: Vec<Card>,
    pub dealer_index: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trump_suit: Option<Suit>,
    /// The turned card, present only while face up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trump_card: Option<Card>,
    pub trump_selection_round: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trump_selection_player_index: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_player_index: Option<u8>,
    pub current_trick: TrickView,
    pub completed_tricks_count: u8,
    pub team_scores: [u8; 2],
    pub team_tricks: [u8; 2],
    /// Identity of the player who ordered up or named trump.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trump_maker: Option<String>,
    pub going_alone: bool,
    pub events: Vec<EventEntry>,
}
