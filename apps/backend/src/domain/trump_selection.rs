//! Trump selection (two bidding rounds), dealer discard, and going alone.

use crate::domain::dealing::HAND_SIZE;
use crate::domain::state::{next_active_seat, next_seat, partner_of, GameState, Phase, Seat};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, IllegalActionKind, RuleViolationKind};

/// What a trump-selection action did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Round 1: turned card ordered up; the dealer now holds six cards and
    /// must discard.
    TrumpOrdered { trump: Suit },
    /// Round 2: a suit named; play begins immediately.
    TrumpNamed { trump: Suit },
    /// Actor passed; selection moves to the next seat.
    Passed,
    /// All four passed in round 1; the turned card is face down and round 2
    /// begins left of the dealer.
    RoundTwoStarted,
}

/// Round-1 decision over the turned card: order it up, or pass.
pub fn order_up_or_pass(
    state: &mut GameState,
    who: Seat,
    order_up: bool,
) -> Result<SelectionOutcome, DomainError> {
    if state.phase != (Phase::TrumpSelection { round: 1 }) {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "not in trump selection round 1",
        ));
    }
    if state.round.selection_turn != who {
        return Err(DomainError::illegal(
            IllegalActionKind::OutOfTurn,
            "not your turn to order up or pass",
        ));
    }

    let Some(turned) = state.round.turned_card else {
        debug_assert!(false, "round 1 selection without a turned card");
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "no turned card",
        ));
    };

    if order_up {
        let dealer = state.round.dealer;
        state.round.trump = Some(turned.suit);
        state.round.maker = Some(who);
        state.round.turned_card = None;
        let dealer_hand = &mut state.hands[dealer as usize];
        dealer_hand.push(turned);
        dealer_hand.sort();
        state.phase = Phase::DealerDiscard;
        state.turn = Some(dealer);
        return Ok(SelectionOutcome::TrumpOrdered { trump: turned.suit });
    }

    state.round.passes += 1;
    if state.round.passes == 4 {
        // Turned card goes face down; its suit is off the table for round 2.
        state.round.turned_card = None;
        state.round.turned_down = Some(turned.suit);
        state.round.selection_round = 2;
        state.round.selection_turn = next_seat(state.round.dealer);
        state.round.passes = 0;
        state.phase = Phase::TrumpSelection { round: 2 };
        return Ok(SelectionOutcome::RoundTwoStarted);
    }
    state.round.selection_turn = next_seat(who);
    Ok(SelectionOutcome::Passed)
}

/// Round-2 decision: name any suit other than the turned-down one, or pass.
/// The dealer may not pass once the other three have.
pub fn name_trump_or_pass(
    state: &mut GameState,
    who: Seat,
    suit: Option<Suit>,
) -> Result<SelectionOutcome, DomainError> {
    if state.phase != (Phase::TrumpSelection { round: 2 }) {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "not in trump selection round 2",
        ));
    }
    if state.round.selection_turn != who {
        return Err(DomainError::illegal(
            IllegalActionKind::OutOfTurn,
            "not your turn to name trump or pass",
        ));
    }

    match suit {
        Some(named) => {
            if state.round.turned_down == Some(named) {
                return Err(DomainError::rule(
                    RuleViolationKind::TurnedDownSuit,
                    "cannot name the turned-down suit",
                ));
            }
            state.round.trump = Some(named);
            state.round.maker = Some(who);
            state.phase = Phase::Playing;
            state.turn = Some(next_seat(state.round.dealer));
            Ok(SelectionOutcome::TrumpNamed { trump: named })
        }
        None => {
            if who == state.round.dealer {
                // Screw the dealer: with three passes in, naming is mandatory.
                return Err(DomainError::rule(
                    RuleViolationKind::DealerMustName,
                    "dealer must name a suit",
                ));
            }
            state.round.passes += 1;
            state.round.selection_turn = next_seat(who);
            Ok(SelectionOutcome::Passed)
        }
    }
}

/// Dealer sheds the sixth card after picking up the turned card.
pub fn dealer_discard(state: &mut GameState, who: Seat, card: Card) -> Result<(), DomainError> {
    if state.phase != Phase::DealerDiscard {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "no discard is pending",
        ));
    }
    if who != state.round.dealer {
        return Err(DomainError::illegal(
            IllegalActionKind::NotDealer,
            "only the dealer discards",
        ));
    }

    let hand = &mut state.hands[who as usize];
    debug_assert_eq!(hand.len(), HAND_SIZE + 1, "dealer must hold six cards");
    let Some(pos) = hand.iter().position(|&c| c == card) else {
        return Err(DomainError::rule(
            RuleViolationKind::CardNotInHand,
            "card not in hand",
        ));
    };
    hand.remove(pos);

    state.phase = Phase::Playing;
    let leader = next_active_seat(state.round.dealer, state.round.sitting_out);
    state.turn = Some(leader);
    Ok(())
}

/// Maker's one-time going-alone declaration, allowed until the first card of
/// the round is played. Going alone sits the partner out for the round.
pub fn declare_going_alone(
    state: &mut GameState,
    who: Seat,
    alone: bool,
) -> Result<(), DomainError> {
    if !matches!(state.phase, Phase::DealerDiscard | Phase::Playing) {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "trump has not been decided",
        ));
    }
    if state.round.maker != Some(who) {
        return Err(DomainError::illegal(
            IllegalActionKind::NotMaker,
            "only the trump maker may declare going alone",
        ));
    }
    if state.round.alone.is_some() {
        return Err(DomainError::rule(
            RuleViolationKind::AloneAlreadyDecided,
            "going alone already decided",
        ));
    }
    if state.round.any_card_played() {
        return Err(DomainError::rule(
            RuleViolationKind::AloneWindowClosed,
            "cards have already been played",
        ));
    }

    state.round.alone = Some(alone);
    if alone {
        let partner = partner_of(who);
        state.round.sitting_out = Some(partner);
        // If the partner was about to lead, the seat after them leads instead.
        if state.phase == Phase::Playing && state.turn == Some(partner) {
            state.turn = Some(next_seat(partner));
        }
    }
    Ok(())
}
