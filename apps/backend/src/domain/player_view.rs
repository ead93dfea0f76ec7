//! Read-only, per-seat perspective over the engine state.
//!
//! This is the snapshot handed to decision-makers: the seat's own hand plus
//! everything public. No other hand is reachable from it, so an AI acting on
//! a `PlayerPerspective` sees exactly what a human client would.

use crate::domain::state::{GameState, Phase, Seat};
use crate::domain::tricks::legal_cards;
use crate::domain::{Card, Suit};

#[derive(Debug, Clone)]
pub struct PlayerPerspective {
    pub seat: Seat,
    pub hand: Vec<Card>,
    pub dealer: Seat,
    pub trump: Option<Suit>,
    /// Face-up turned card, present only during selection round 1.
    pub turned_card: Option<Card>,
    /// Suit unavailable in selection round 2.
    pub turned_down: Option<Suit>,
    pub selection_round: u8,
    /// Ordered plays of the trick in progress.
    pub trick_plays: Vec<(Seat, Card)>,
    pub team_tricks: [u8; 2],
    pub maker: Option<Seat>,
    pub alone: Option<bool>,
}

impl PlayerPerspective {
    pub fn is_dealer(&self) -> bool {
        self.seat == self.dealer
    }

    /// Legal cards for this seat right now, by the same follow-suit rule the
    /// engine enforces.
    pub fn legal_plays(&self) -> Vec<Card> {
        let Some(trump) = self.trump else {
            return Vec::new();
        };
        let first = self.trick_plays.first().map(|&(_, c)| c);
        legal_cards(&self.hand, first, trump)
    }

    /// Suits that may be named in selection round 2.
    pub fn nameable_suits(&self) -> Vec<Suit> {
        Suit::ALL
            .into_iter()
            .filter(|&s| self.turned_down != Some(s))
            .collect()
    }
}

/// Extract a seat's view of the game.
pub fn perspective(state: &GameState, seat: Seat) -> PlayerPerspective {
    let turned_card = match state.phase {
        Phase::TrumpSelection { round: 1 } => state.round.turned_card,
        _ => None,
    };
    PlayerPerspective {
        seat,
        hand: state.hands[seat as usize].clone(),
        dealer: state.round.dealer,
        trump: state.round.trump,
        turned_card,
        turned_down: state.round.turned_down,
        selection_round: state.round.selection_round,
        // A resolved trick still on display is not part of anyone's decision.
        trick_plays: if state.round.trick.winner.is_some() {
            Vec::new()
        } else {
            state.round.trick.plays.clone()
        },
        team_tricks: state.round.team_tricks,
        maker: state.round.maker,
        alone: state.round.alone,
    }
}
