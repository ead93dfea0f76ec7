//! Session/room layer: the room registry, per-room state, and the session
//! manager that multiplexes rooms behind the message contract.

pub mod manager;
pub mod registry;
pub mod room;

#[cfg(test)]
mod tests_manager;

pub use manager::SessionManager;
pub use registry::RoomRegistry;
pub use room::{PlayerId, Room};
