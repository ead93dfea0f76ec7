//! Property-based tests for trick resolution, checked against an
//! independently written oracle.

use proptest::prelude::*;

use crate::domain::cards_logic::{effective_suit, is_left_bower, is_right_bower};
use crate::domain::dealing::{deal, full_deck};
use crate::domain::state::{GameState, RoundState, Seat};
use crate::domain::test_gens;
use crate::domain::tricks::resolve_current_trick;
use crate::domain::{Card, Suit};

/// Oracle: rank the trick by explicit rule cascade rather than the engine's
/// ordinal function. Right bower, left bower, trump by face rank, led suit by
/// face rank, everything else loses.
fn oracle_winner(plays: &[(Seat, Card)], trump: Suit) -> Seat {
    let lead = effective_suit(plays[0].1, trump);
    let class = |c: Card| -> (u8, u8) {
        if is_right_bower(c, trump) {
            (4, 0)
        } else if is_left_bower(c, trump) {
            (3, 0)
        } else if c.suit == trump {
            (2, c.rank.face_value())
        } else if c.suit == lead {
            (1, c.rank.face_value())
        } else {
            (0, 0)
        }
    };
    plays
        .iter()
        .max_by_key(|&&(_, c)| class(c))
        .expect("non-empty trick")
        .0
}

fn round_with_trick(plays: Vec<(Seat, Card)>, trump: Suit) -> RoundState {
    let mut round = RoundState::new(0);
    round.trump = Some(trump);
    round.trick.leader = plays.first().map(|&(s, _)| s);
    round.trick.plays = plays;
    round
}

proptest! {
    /// The engine's winner always matches the oracle.
    #[test]
    fn prop_winner_matches_oracle(
        plays in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let expected = oracle_winner(&plays, trump);
        let round = round_with_trick(plays, trump);
        prop_assert_eq!(resolve_current_trick(&round), Some(expected));
    }

    /// When no trump is present in the trick, the highest card of the led
    /// suit wins.
    #[test]
    fn prop_lead_suit_wins_without_trump(
        plays in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let lead = effective_suit(plays[0].1, trump);
        let any_trump = plays.iter().any(|&(_, c)| effective_suit(c, trump) == trump);
        prop_assume!(!any_trump);

        let winner = {
            let round = round_with_trick(plays.clone(), trump);
            resolve_current_trick(&round).unwrap()
        };
        let winner_card = plays.iter().find(|&&(s, _)| s == winner).unwrap().1;
        prop_assert_eq!(winner_card.suit, lead);
        for (_, c) in plays.iter().filter(|&&(_, c)| c.suit == lead) {
            prop_assert!(winner_card.rank >= c.rank);
        }
    }

    /// When trump is present, a trump card wins.
    #[test]
    fn prop_trump_wins_when_played(
        plays in test_gens::complete_trick(),
        trump in test_gens::suit(),
    ) {
        let any_trump = plays.iter().any(|&(_, c)| effective_suit(c, trump) == trump);
        prop_assume!(any_trump);

        let winner = {
            let round = round_with_trick(plays.clone(), trump);
            resolve_current_trick(&round).unwrap()
        };
        let winner_card = plays.iter().find(|&&(s, _)| s == winner).unwrap().1;
        prop_assert_eq!(effective_suit(winner_card, trump), trump);
    }

    /// Every deal partitions the deck: 4 hands of 5 distinct cards plus a
    /// turned card, all drawn from the 24-card deck without repetition.
    #[test]
    fn prop_deal_partitions_deck(seed in any::<u64>(), dealer in 0u8..4) {
        let mut state = GameState::new();
        state.begin(4).unwrap();
        state.round.dealer = dealer;
        deal(&mut state, seed).unwrap();

        let deck = full_deck();
        let mut seen = std::collections::HashSet::new();
        for hand in &state.hands {
            prop_assert_eq!(hand.len(), 5);
            for card in hand {
                prop_assert!(deck.contains(card));
                prop_assert!(seen.insert(*card), "card dealt twice: {}", card);
            }
        }
        let turned = state.round.turned_card.unwrap();
        prop_assert!(seen.insert(turned));
        prop_assert_eq!(seen.len(), 21);
    }
}
