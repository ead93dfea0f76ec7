//! Message-level contract between the core and the transport adapter.

pub mod game_state;
pub mod messages;

pub use game_state::{EventEntry, GameStateView, PlayerInfo, TrickView};
pub use messages::{ClientMsg, ServerMsg, TrumpActionMsg};
