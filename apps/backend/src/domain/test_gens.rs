//! Proptest strategies for domain tests.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::state::Seat;
use crate::domain::{Card, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

/// Four distinct deck cards played by seats 0..=3 in seat order.
pub fn complete_trick() -> impl Strategy<Value = Vec<(Seat, Card)>> {
    proptest::sample::subsequence(full_deck(), 4)
        .prop_shuffle()
        .prop_map(|cards| {
            cards
                .into_iter()
                .enumerate()
                .map(|(i, c)| (i as Seat, c))
                .collect()
        })
}
