//! Domain layer: pure game engine types and operations.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod player_view;
pub mod scoring;
pub mod state;
pub mod tricks;
pub mod trump_selection;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, card_value, effective_suit, is_left_bower, is_trump};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::deal;
pub use player_view::{perspective, PlayerPerspective};
pub use state::{GameState, Phase, Seat};
