//! Trick play: follow-suit legality, card plays, and trick resolution.

use crate::domain::cards_logic::{card_beats, effective_suit, hand_has_effective_suit};
use crate::domain::state::{
    next_active_seat, team_of, GameState, Phase, RoundState, Seat, TrickState, TRICKS_PER_ROUND,
};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, IllegalActionKind, RuleViolationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether this play completed the trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Whether this was the round's final trick (phase is now RoundComplete).
    pub round_completed: bool,
}

/// Cards a hand may legally play against an optional first card of the trick.
///
/// The one follow-suit rule shared by the engine and the AI: if the hand can
/// follow the led card's effective suit it must, otherwise anything goes. The
/// left bower follows (and leads) as trump.
pub fn legal_cards(hand: &[Card], first_play: Option<Card>, trump: Suit) -> Vec<Card> {
    if let Some(first) = first_play {
        let lead = effective_suit(first, trump);
        if hand_has_effective_suit(hand, lead, trump) {
            let mut v: Vec<Card> = hand
                .iter()
                .copied()
                .filter(|&c| effective_suit(c, trump) == lead)
                .collect();
            v.sort();
            return v;
        }
    }
    let mut any = hand.to_vec();
    any.sort();
    any
}

/// Compute legal cards for a seat, independent of turn enforcement.
pub fn legal_moves(state: &GameState, who: Seat) -> Vec<Card> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    let Some(trump) = state.round.trump else {
        return Vec::new();
    };
    let first = state.round.trick_first_play();
    legal_cards(&state.hands[who as usize], first, trump)
}

/// Play a card into the current trick, enforcing turn, suit-following, and
/// phase. Resolves the trick when the last active player has contributed and
/// moves to `RoundComplete` after the fifth trick.
pub fn play_card(state: &mut GameState, who: Seat, card: Card) -> Result<PlayCardResult, DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "not in trick play",
        ));
    }
    if state.round.sitting_out == Some(who) {
        return Err(DomainError::illegal(
            IllegalActionKind::SeatSittingOut,
            "seat is sitting out this round",
        ));
    }
    if state.turn != Some(who) {
        return Err(DomainError::illegal(
            IllegalActionKind::OutOfTurn,
            "not your turn",
        ));
    }

    let pos_opt = state.hands[who as usize].iter().position(|&c| c == card);
    let Some(pos) = pos_opt else {
        return Err(DomainError::rule(
            RuleViolationKind::CardNotInHand,
            "card not in hand",
        ));
    };

    if !legal_moves(state, who).contains(&card) {
        return Err(DomainError::rule(
            RuleViolationKind::MustFollowSuit,
            "must follow suit",
        ));
    }

    // A resolved trick stays on the table for display; the next lead clears it.
    if state.round.trick.winner.is_some() {
        state.round.trick = TrickState::default();
    }
    if state.round.trick.plays.is_empty() {
        state.round.trick.leader = Some(who);
    }

    let removed = state.hands[who as usize].remove(pos);
    state.round.trick.plays.push((who, removed));

    let active = state.round.active_players();
    if state.round.trick.plays.len() < active {
        state.turn = Some(next_active_seat(who, state.round.sitting_out));
        return Ok(PlayCardResult {
            trick_completed: false,
            trick_winner: None,
            round_completed: false,
        });
    }

    // Resolve completed trick
    let mut result = PlayCardResult {
        trick_completed: true,
        trick_winner: None,
        round_completed: false,
    };
    if let Some(winner) = resolve_current_trick(&state.round) {
        state.round.team_tricks[team_of(winner)] += 1;
        state.round.trick.winner = Some(winner);
        state.turn = Some(winner);
        result.trick_winner = Some(winner);
    } else {
        debug_assert!(false, "complete trick failed to resolve a winner");
    }

    state.round.completed_tricks += 1;

    if state.round.completed_tricks >= TRICKS_PER_ROUND {
        state.phase = Phase::RoundComplete;
        state.turn = None;
        result.round_completed = true;
    }

    Ok(result)
}

/// Resolve the current trick winner if complete.
///
/// Lead suit is the effective suit of the first card played; the left bower
/// both leads as and follows trump.
pub fn resolve_current_trick(round: &RoundState) -> Option<Seat> {
    if round.trick.plays.len() < round.active_players() {
        return None;
    }
    let trump = round.trump?;
    let (_, first) = *round.trick.plays.first()?;
    let lead = effective_suit(first, trump);

    let mut best_idx = 0usize;
    for i in 1..round.trick.plays.len() {
        let (_, card_i) = round.trick.plays[i];
        let (_, card_best) = round.trick.plays[best_idx];
        if card_beats(card_i, card_best, trump, lead) {
            best_idx = i;
        }
    }
    Some(round.trick.plays[best_idx].0)
}
