//! Engine-level error type used across the domain and room layers.
//!
//! This error type is transport-agnostic. The session manager recovers every
//! variant locally: a rejected action never tears down a room or leaks to
//! other participants.

use thiserror::Error;

/// An action attempted by the wrong actor or in the wrong phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalActionKind {
    PhaseMismatch,
    OutOfTurn,
    NotDealer,
    NotMaker,
    SeatSittingOut,
}

/// An in-turn action that breaks a game rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleViolationKind {
    MustFollowSuit,
    CardNotInHand,
    TurnedDownSuit,
    DealerMustName,
    MissingSuit,
    AloneAlreadyDecided,
    AloneWindowClosed,
    NeedFourPlayers,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("illegal action ({kind:?}): {detail}")]
    IllegalAction {
        kind: IllegalActionKind,
        detail: String,
    },
    #[error("rule violation ({kind:?}): {detail}")]
    RuleViolation {
        kind: RuleViolationKind,
        detail: String,
    },
}

impl DomainError {
    pub fn illegal(kind: IllegalActionKind, detail: impl Into<String>) -> Self {
        Self::IllegalAction {
            kind,
            detail: detail.into(),
        }
    }

    pub fn rule(kind: RuleViolationKind, detail: impl Into<String>) -> Self {
        Self::RuleViolation {
            kind,
            detail: detail.into(),
        }
    }

    /// Short human-readable reason, suitable for a player-facing event entry.
    pub fn reason(&self) -> &str {
        match self {
            DomainError::IllegalAction { detail, .. } => detail,
            DomainError::RuleViolation { detail, .. } => detail,
        }
    }
}
