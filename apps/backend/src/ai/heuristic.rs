//! Heuristic — the deterministic house AI.
//!
//! One tier only: fixed thresholds, no RNG, no per-seat tuning. Decisions
//! stay legal by construction because every choice is drawn from the same
//! legality helpers the engine enforces.

use crate::ai::{AiError, AiPlayer, TrumpDecision};
use crate::domain::cards_logic::{
    card_value, effective_suit, is_left_bower, is_right_bower, is_trump,
};
use crate::domain::player_view::PlayerPerspective;
use crate::domain::{Card, Rank, Suit};

/// Minimum hand score to order the turned card up in round 1.
const ORDER_UP_THRESHOLD: f32 = 0.35;
/// Minimum hand score to name a suit in round 2 (non-dealer).
const NAME_TRUMP_THRESHOLD: f32 = 0.40;
/// Minimum hand score to play alone.
const GO_ALONE_THRESHOLD: f32 = 0.75;
/// The dealer calls slightly lighter in round 1: passing hands them nothing.
const DEALER_BONUS: f32 = 0.10;

#[derive(Debug, Clone, Copy, Default)]
pub struct Heuristic;

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";

    pub fn new() -> Self {
        Self
    }

    /// Hand strength for a candidate trump suit, 0.0..=1.0.
    ///
    /// Bowers dominate, trump length and off-suit aces fill in the rest.
    fn hand_score(hand: &[Card], trump: Suit) -> f32 {
        let mut score = 0.0;
        let mut trump_count = 0u8;
        let mut off_aces = 0u8;

        for &card in hand {
            if is_trump(card, trump) {
                trump_count += 1;
                if is_right_bower(card, trump) {
                    score += 0.25;
                } else if is_left_bower(card, trump) {
                    score += 0.20;
                } else if card.rank == Rank::Ace {
                    score += 0.15;
                } else {
                    score += 0.08;
                }
            } else if card.rank == Rank::Ace {
                off_aces += 1;
                score += 0.05;
            }
        }

        if trump_count >= 3 {
            score += 0.15;
        } else if trump_count >= 2 {
            score += 0.08;
        }
        score += off_aces as f32 * 0.03;

        score.min(1.0)
    }

    /// Best nameable suit by hand score, ties broken by suit order.
    fn best_suit(view: &PlayerPerspective) -> Option<(Suit, f32)> {
        let mut best: Option<(Suit, f32)> = None;
        for suit in view.nameable_suits() {
            let score = Self::hand_score(&view.hand, suit);
            match best {
                None => best = Some((suit, score)),
                Some((_, bs)) if score > bs => best = Some((suit, score)),
                _ => {}
            }
        }
        best
    }

    /// Deterministic lowest card: face rank first, suit order as tie-break.
    fn lowest_by_face(cards: &[Card]) -> Option<Card> {
        cards
            .iter()
            .copied()
            .min_by_key(|c| (c.rank.face_value(), c.suit))
    }

    /// Card currently winning the trick, if any card has been played.
    fn current_winner(view: &PlayerPerspective, trump: Suit) -> Option<Card> {
        let (_, first) = *view.trick_plays.first()?;
        let lead = effective_suit(first, trump);
        let mut winner = first;
        for &(_, card) in &view.trick_plays[1..] {
            if card_value(card, trump, lead) > card_value(winner, trump, lead) {
                winner = card;
            }
        }
        Some(winner)
    }

    /// An off-suit singleton worth leading to create a void, lowest first.
    fn singleton_offsuit(hand: &[Card], trump: Suit) -> Option<Card> {
        let mut singles: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|&c| {
                !is_trump(c, trump)
                    && hand
                        .iter()
                        .filter(|&&o| effective_suit(o, trump) == c.suit)
                        .count()
                        == 1
            })
            .collect();
        singles.sort_by_key(|c| (c.rank.face_value(), c.suit));
        singles.first().copied()
    }

    fn choose_lead(legal: &[Card], trump: Suit) -> Card {
        // A boss trump draws out opposing trump at no risk.
        if let Some(&right) = legal.iter().find(|&&c| is_right_bower(c, trump)) {
            return right;
        }
        if let Some(single) = Self::singleton_offsuit(legal, trump) {
            return single;
        }
        // Otherwise lead the strongest off-suit card, keeping trump back.
        let off: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|&c| !is_trump(c, trump))
            .collect();
        if let Some(&best) = off
            .iter()
            .max_by_key(|c| (c.rank.face_value(), std::cmp::Reverse(c.suit)))
        {
            return best;
        }
        // All trump: lead the biggest.
        legal
            .iter()
            .copied()
            .max_by_key(|&c| card_value(c, trump, trump))
            .unwrap_or(legal[0])
    }

    fn choose_follow(view: &PlayerPerspective, legal: &[Card], trump: Suit) -> Card {
        let first = view.trick_plays[0].1;
        let lead = effective_suit(first, trump);
        let winner = Self::current_winner(view, trump);

        if let Some(winning) = winner {
            let winners: Vec<Card> = legal
                .iter()
                .copied()
                .filter(|&c| card_value(c, trump, lead) > card_value(winning, trump, lead))
                .collect();
            if let Some(&best) = winners.iter().max_by_key(|&&c| card_value(c, trump, lead)) {
                return best;
            }
        }

        // Cannot win: shed the cheapest legal card.
        legal
            .iter()
            .copied()
            .min_by_key(|&c| (card_value(c, trump, lead), c.rank.face_value(), c.suit))
            .unwrap_or(legal[0])
    }
}

impl AiPlayer for Heuristic {
    fn choose_trump_call(&self, view: &PlayerPerspective) -> Result<TrumpDecision, AiError> {
        match view.selection_round {
            1 => {
                let Some(turned) = view.turned_card else {
                    return Err(AiError::Internal(
                        "round 1 call without a turned card".into(),
                    ));
                };
                let mut threshold = ORDER_UP_THRESHOLD;
                if view.is_dealer() {
                    threshold -= DEALER_BONUS;
                }
                if Self::hand_score(&view.hand, turned.suit) >= threshold {
                    Ok(TrumpDecision::OrderUp)
                } else {
                    Ok(TrumpDecision::Pass)
                }
            }
            2 => {
                let Some((suit, score)) = Self::best_suit(view) else {
                    return Err(AiError::NoLegalOption("no nameable suit".into()));
                };
                // Stuck dealer has no pass available.
                if view.is_dealer() || score >= NAME_TRUMP_THRESHOLD {
                    Ok(TrumpDecision::Name(suit))
                } else {
                    Ok(TrumpDecision::Pass)
                }
            }
            round => Err(AiError::Internal(format!(
                "unexpected selection round {round}"
            ))),
        }
    }

    fn choose_going_alone(&self, view: &PlayerPerspective) -> Result<bool, AiError> {
        let Some(trump) = view.trump else {
            return Err(AiError::Internal("going-alone call without trump".into()));
        };
        let has_right = view.hand.iter().any(|&c| is_right_bower(c, trump));
        let has_left = view.hand.iter().any(|&c| is_left_bower(c, trump));
        let trump_count = view.hand.iter().filter(|&&c| is_trump(c, trump)).count();

        if has_right && has_left && trump_count >= 3 {
            return Ok(true);
        }
        Ok(Self::hand_score(&view.hand, trump) >= GO_ALONE_THRESHOLD)
    }

    fn choose_discard(&self, view: &PlayerPerspective) -> Result<Card, AiError> {
        let Some(trump) = view.trump else {
            return Err(AiError::Internal("discard without trump".into()));
        };
        let non_trump: Vec<Card> = view
            .hand
            .iter()
            .copied()
            .filter(|&c| !is_trump(c, trump))
            .collect();
        if let Some(card) = Self::lowest_by_face(&non_trump) {
            return Ok(card);
        }
        // All trump: shed the weakest one.
        view.hand
            .iter()
            .copied()
            .min_by_key(|&c| card_value(c, trump, trump))
            .ok_or_else(|| AiError::NoLegalOption("empty hand at discard".into()))
    }

    fn choose_play(&self, view: &PlayerPerspective) -> Result<Card, AiError> {
        let Some(trump) = view.trump else {
            return Err(AiError::Internal("card play without trump".into()));
        };
        let legal = view.legal_plays();
        if legal.is_empty() {
            return Err(AiError::NoLegalOption("no legal card to play".into()));
        }

        if view.trick_plays.is_empty() {
            Ok(Self::choose_lead(&legal, trump))
        } else {
            Ok(Self::choose_follow(view, &legal, trump))
        }
    }
}
