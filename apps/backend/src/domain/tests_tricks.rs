use crate::domain::state::{GameState, Phase, Seat};
use crate::domain::tricks::{legal_moves, play_card, resolve_current_trick};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, IllegalActionKind, RuleViolationKind};

fn card(rank: Rank, suit: Suit) -> Card {
    Card { suit, rank }
}

/// A playing-phase state with explicit hands, trump, and leader.
fn playing_state(hands: [Vec<Card>; 4], trump: Suit, leader: Seat) -> GameState {
    let mut state = GameState::new();
    state.hands = hands;
    state.phase = Phase::Playing;
    state.round.dealer = (leader + 3) % 4;
    state.round.trump = Some(trump);
    state.round.maker = Some(leader);
    state.turn = Some(leader);
    state
}

#[test]
fn must_follow_suit_when_possible() {
    // Seat 1 holds two hearts; leading card is a heart; the off-suit play is
    // rejected and nothing changes.
    let hands = [
        vec![card(Rank::Nine, Suit::Hearts), card(Rank::Ace, Suit::Clubs)],
        vec![
            card(Rank::King, Suit::Hearts),
            card(Rank::Queen, Suit::Hearts),
            card(Rank::Ace, Suit::Diamonds),
        ],
        vec![card(Rank::Ten, Suit::Spades)],
        vec![card(Rank::Jack, Suit::Clubs)],
    ];
    let mut state = playing_state(hands, Suit::Spades, 0);

    play_card(&mut state, 0, card(Rank::Nine, Suit::Hearts)).unwrap();

    let before_hand = state.hands[1].clone();
    let before_plays = state.round.trick.plays.clone();
    let err = play_card(&mut state, 1, card(Rank::Ace, Suit::Diamonds)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::RuleViolation {
            kind: RuleViolationKind::MustFollowSuit,
            ..
        }
    ));
    assert_eq!(state.hands[1], before_hand);
    assert_eq!(state.round.trick.plays, before_plays);

    // Legal set is exactly the two hearts.
    let legal = legal_moves(&state, 1);
    assert_eq!(legal.len(), 2);
    assert!(legal.iter().all(|c| c.suit == Suit::Hearts));
}

#[test]
fn left_bower_wins_against_led_trump() {
    // Trump hearts; the nine of hearts is led; the jack of diamonds is the
    // left bower and takes the trick over everything but the right bower.
    let hands = [
        vec![card(Rank::Nine, Suit::Hearts)],
        vec![card(Rank::Jack, Suit::Diamonds)],
        vec![card(Rank::Ace, Suit::Hearts)],
        vec![card(Rank::Ten, Suit::Clubs)],
    ];
    let mut state = playing_state(hands, Suit::Hearts, 0);

    play_card(&mut state, 0, card(Rank::Nine, Suit::Hearts)).unwrap();
    // Left bower follows hearts legally.
    play_card(&mut state, 1, card(Rank::Jack, Suit::Diamonds)).unwrap();
    play_card(&mut state, 2, card(Rank::Ace, Suit::Hearts)).unwrap();
    let result = play_card(&mut state, 3, card(Rank::Ten, Suit::Clubs)).unwrap();

    assert!(result.trick_completed);
    assert_eq!(result.trick_winner, Some(1));
    assert_eq!(state.round.team_tricks, [0, 1]);
    // The resolved trick stays visible; the winner is on turn to lead next.
    assert_eq!(state.round.trick.winner, Some(1));
    assert_eq!(state.round.trick.plays.len(), 4);
    assert_eq!(state.turn, Some(1));
}

#[test]
fn off_turn_and_unknown_cards_are_rejected() {
    let hands = [
        vec![card(Rank::Nine, Suit::Clubs)],
        vec![card(Rank::Ten, Suit::Clubs)],
        vec![card(Rank::Jack, Suit::Spades)],
        vec![card(Rank::Queen, Suit::Clubs)],
    ];
    let mut state = playing_state(hands, Suit::Diamonds, 0);

    let err = play_card(&mut state, 2, card(Rank::Jack, Suit::Spades)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::IllegalAction {
            kind: IllegalActionKind::OutOfTurn,
            ..
        }
    ));

    let err = play_card(&mut state, 0, card(Rank::Ace, Suit::Clubs)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::RuleViolation {
            kind: RuleViolationKind::CardNotInHand,
            ..
        }
    ));
}

#[test]
fn going_alone_tricks_complete_with_three_cards() {
    // Maker 0 goes alone; seat 2 sits out and contributes nothing.
    let hands = [
        vec![card(Rank::Ace, Suit::Spades)],
        vec![card(Rank::Nine, Suit::Diamonds)],
        vec![card(Rank::King, Suit::Hearts)],
        vec![card(Rank::Ten, Suit::Diamonds)],
    ];
    let mut state = playing_state(hands, Suit::Spades, 0);
    state.round.alone = Some(true);
    state.round.sitting_out = Some(2);

    play_card(&mut state, 0, card(Rank::Ace, Suit::Spades)).unwrap();
    play_card(&mut state, 1, card(Rank::Nine, Suit::Diamonds)).unwrap();

    // The sitting-out partner has no turn.
    assert_eq!(state.turn, Some(3));
    let err = play_card(&mut state, 2, card(Rank::King, Suit::Hearts)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::IllegalAction {
            kind: IllegalActionKind::SeatSittingOut,
            ..
        }
    ));

    let result = play_card(&mut state, 3, card(Rank::Ten, Suit::Diamonds)).unwrap();
    assert!(result.trick_completed);
    assert_eq!(result.trick_winner, Some(0));
    // The partner's card stays in hand.
    assert_eq!(state.hands[2].len(), 1);
}

#[test]
fn fifth_trick_completes_the_round() {
    let mut state = playing_state(Default::default(), Suit::Clubs, 0);
    state.round.completed_tricks = 4;
    state.round.team_tricks = [2, 2];
    // One-card hands for the last trick.
    state.hands = [
        vec![card(Rank::Ace, Suit::Clubs)],
        vec![card(Rank::Nine, Suit::Hearts)],
        vec![card(Rank::Ten, Suit::Hearts)],
        vec![card(Rank::Jack, Suit::Hearts)],
    ];

    for (seat, c) in [
        (0, card(Rank::Ace, Suit::Clubs)),
        (1, card(Rank::Nine, Suit::Hearts)),
        (2, card(Rank::Ten, Suit::Hearts)),
        (3, card(Rank::Jack, Suit::Hearts)),
    ] {
        play_card(&mut state, seat, c).unwrap();
    }

    assert_eq!(state.phase, Phase::RoundComplete);
    assert_eq!(state.round.completed_tricks, 5);
    assert_eq!(state.round.team_tricks, [3, 2]);
    assert_eq!(state.turn, None);

    // No further plays are accepted.
    let err = play_card(&mut state, 0, card(Rank::Ace, Suit::Clubs)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::IllegalAction {
            kind: IllegalActionKind::PhaseMismatch,
            ..
        }
    ));
}

#[test]
fn resolve_requires_a_full_trick() {
    let mut state = playing_state(
        [
            vec![card(Rank::Nine, Suit::Clubs)],
            vec![card(Rank::Ten, Suit::Clubs)],
            Vec::new(),
            Vec::new(),
        ],
        Suit::Spades,
        0,
    );
    play_card(&mut state, 0, card(Rank::Nine, Suit::Clubs)).unwrap();
    assert_eq!(resolve_current_trick(&state.round), None);
}
