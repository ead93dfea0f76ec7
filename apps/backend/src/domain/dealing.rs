//! Deck construction and the deal operation.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::state::{next_seat, nth_from, GameState, Phase, RoundState, PLAYERS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, IllegalActionKind};

/// A euchre deck: nine through ace of each suit.
pub const DECK_SIZE: usize = 24;
pub const HAND_SIZE: usize = 5;

/// Generate the full 24-card deck in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
}

/// Shuffle and deal the next round.
///
/// Deals five cards to each seat clockwise starting left of the dealer, turns
/// the next card face up, and buries the remaining three. Transitions
/// `Dealing → TrumpSelection(round 1)` with the selection turn left of the
/// dealer. Deterministic for a given seed.
pub fn deal(state: &mut GameState, seed: u64) -> Result<(), DomainError> {
    if state.phase != Phase::Dealing {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            "not ready to deal",
        ));
    }

    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);

    let dealer = state.round.dealer;
    let mut cards = deck.into_iter();
    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for _ in 0..HAND_SIZE {
        for k in 0..PLAYERS as u8 {
            let seat = nth_from(next_seat(dealer), k);
            // full_deck always covers 4 * HAND_SIZE + kitty
            if let Some(card) = cards.next() {
                hands[seat as usize].push(card);
            }
        }
    }
    for hand in &mut hands {
        hand.sort();
    }
    state.hands = hands;

    let mut round = RoundState::new(dealer);
    round.turned_card = cards.next();
    debug_assert!(round.turned_card.is_some(), "deck exhausted before kitty");
    state.round = round;
    state.turn = None;
    state.phase = Phase::TrumpSelection { round: 1 };
    Ok(())
}
