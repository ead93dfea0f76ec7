//! Room-lifecycle errors surfaced by the session manager.

use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("room is full")]
    RoomFull,
    #[error("room not found")]
    RoomNotFound,
    #[error("player is not in a room")]
    NotInRoom,
    #[error("no reconnection available")]
    ReconnectionUnavailable,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RoomError {
    /// Short human-readable reason, suitable for a player-facing event entry.
    pub fn reason(&self) -> String {
        match self {
            RoomError::Domain(err) => err.reason().to_string(),
            other => other.to_string(),
        }
    }
}
