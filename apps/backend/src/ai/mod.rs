//! AI player module - automated decisions for unfilled seats.
//!
//! An AI never touches engine state: it is handed the same read-only
//! perspective a human client sees and returns an intended operation, which
//! the session manager feeds through the validated engine entry points.

mod heuristic;
mod trait_def;

pub use heuristic::Heuristic;
pub use trait_def::{AiError, AiPlayer, TrumpDecision};

/// Display names for AI seats, assigned in join order.
pub const AI_NAMES: [&str; 4] = ["Ada", "Bob", "Clara", "Dave"];

/// Pick a display name not yet used at the table.
pub fn ai_display_name(taken: &[String]) -> String {
    for name in AI_NAMES {
        if !taken.iter().any(|t| t == name) {
            return name.to_string();
        }
    }
    // Four AI seats exhaust the roster; anything past that is a caller bug
    // but gets a stable fallback.
    format!("Bot {}", taken.len() + 1)
}
