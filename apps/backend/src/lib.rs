#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod domain;
pub mod errors;
pub mod protocol;
pub mod rooms;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use errors::domain::DomainError;
pub use errors::room::RoomError;
pub use protocol::messages::{ClientMsg, ServerMsg};
pub use rooms::manager::SessionManager;
pub use rooms::registry::RoomRegistry;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
