//! Tagged message types exchanged with clients.
//!
//! Both directions are closed sum types: adding a message kind is a
//! compile-time-checked change, and the manager dispatches by exhaustive
//! matching rather than inspecting a dynamic type field.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Suit};
use crate::protocol::game_state::GameStateView;

/// Trump-selection action carried by `ClientMsg::TrumpSelection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrumpActionMsg {
    OrderUp,
    Pass,
    NameTrump,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateRoom {
        player_name: String,
    },
    JoinRoom {
        room_code: String,
        player_name: String,
    },
    LeaveRoom,
    CheckReconnection,
    GetGameState,
    TrumpSelection {
        action: TrumpActionMsg,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suit: Option<Suit>,
    },
    GoingAlone {
        going_alone: bool,
    },
    PlayCard {
        card: Card,
    },
    DiscardCard {
        card: Card,
    },
    AddAiPlayer,
    StartGame,
    NewGame,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    RoomCreated {
        success: bool,
        room_code: String,
    },
    RoomJoined {
        success: bool,
        room_code: String,
    },
    LeftRoom {
        success: bool,
    },
    GameState {
        game_state: GameStateView,
    },
    Reconnected {
        game_state: GameStateView,
    },
    PlayerReconnected {
        player_name: String,
    },
    PlayerDisconnected {
        player_name: String,
    },
    NoReconnectionAvailable,
}
