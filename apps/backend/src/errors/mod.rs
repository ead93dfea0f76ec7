pub mod domain;
pub mod room;

pub use domain::{DomainError, IllegalActionKind, RuleViolationKind};
pub use room::RoomError;
