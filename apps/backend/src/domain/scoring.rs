//! Round scoring and end-of-round transitions.

use crate::domain::state::{
    next_seat, team_of, GameState, Phase, RoundState, TRICKS_PER_ROUND, WINNING_SCORE,
};

/// Points awarded for a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScore {
    /// Team that scored.
    pub team: usize,
    pub points: u8,
    /// True when the defenders scored because the makers fell short.
    pub euchred: bool,
    /// True when the score reached the winning threshold.
    pub game_over: bool,
}

/// Apply scoring for the finished round, then either end the game or rotate
/// the dealer and re-enter Dealing for the next round.
///
/// Guarded no-op outside `RoundComplete`, so scoring can only apply once.
pub fn complete_round(state: &mut GameState) -> Option<RoundScore> {
    if state.phase != Phase::RoundComplete {
        return None;
    }

    let tricks_sum: u8 = state.round.team_tricks.iter().sum();
    debug_assert_eq!(tricks_sum, TRICKS_PER_ROUND, "trick counts must sum to 5");
    if tricks_sum != TRICKS_PER_ROUND {
        return None;
    }

    let Some(maker) = state.round.maker else {
        debug_assert!(false, "round completed without a trump maker");
        return None;
    };

    let makers = team_of(maker);
    let maker_tricks = state.round.team_tricks[makers];
    let alone = state.round.alone == Some(true);

    let (team, points, euchred) = if maker_tricks >= 3 {
        let points = if maker_tricks == TRICKS_PER_ROUND {
            if alone {
                4
            } else {
                2
            }
        } else {
            1
        };
        (makers, points, false)
    } else {
        // Euchred: defenders collect two.
        (1 - makers, 2, true)
    };

    state.team_scores[team] += points;
    let game_over = state.team_scores[team] >= WINNING_SCORE;

    if game_over {
        state.phase = Phase::GameComplete;
        state.turn = None;
    } else {
        let next_dealer = next_seat(state.round.dealer);
        state.hands = Default::default();
        state.round = RoundState::new(next_dealer);
        state.turn = None;
        state.phase = Phase::Dealing;
    }

    Some(RoundScore {
        team,
        points,
        euchred,
        game_over,
    })
}
