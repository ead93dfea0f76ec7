use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, IllegalActionKind, RuleViolationKind};

pub type Seat = u8; // 0..=3

pub const PLAYERS: usize = 4;
pub const TRICKS_PER_ROUND: u8 = 5;
pub const WINNING_SCORE: u8 = 10;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Room open, fewer than four seats filled.
    WaitingForPlayers,
    /// Four seats filled; waiting for the shuffle/deal of the next round.
    Dealing,
    /// Two-pass bidding over the turned card; `round` is 1 or 2.
    TrumpSelection { round: u8 },
    /// Dealer picked up the turned card and must shed back to five.
    DealerDiscard,
    /// Trick play.
    Playing,
    /// Five tricks resolved; scoring pending.
    RoundComplete,
    /// A team reached the winning score. Terminal.
    GameComplete,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::WaitingForPlayers => "waiting_for_players",
            Phase::Dealing => "dealing",
            Phase::TrumpSelection { .. } => "trump_selection",
            Phase::DealerDiscard => "dealer_discard",
            Phase::Playing => "playing",
            Phase::RoundComplete => "round_complete",
            Phase::GameComplete => "game_complete",
        }
    }
}

/// The trick currently on the table.
///
/// Invariant: `plays.len()` never exceeds the number of active players; the
/// winner is set only once the trick is full. A resolved trick stays on the
/// table for display until the next lead replaces it.
#[derive(Debug, Clone, Default)]
pub struct TrickState {
    /// Ordered plays (who, card).
    pub plays: Vec<(Seat, Card)>,
    /// Player who led the first card of this trick.
    pub leader: Option<Seat>,
    /// Winner, present only when the trick is complete.
    pub winner: Option<Seat>,
}

/// Per-round state: trump selection, the trick in progress, and tallies.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Dealer seat for this round.
    pub dealer: Seat,
    /// Trump for this round, once selected.
    pub trump: Option<Suit>,
    /// The face-up turned card; cleared when picked up or turned down.
    pub turned_card: Option<Card>,
    /// Suit of the turned-down card; may not be named in selection round 2.
    pub turned_down: Option<Suit>,
    /// Player who ordered up or named trump.
    pub maker: Option<Seat>,
    /// Maker's going-alone decision; None until declared.
    pub alone: Option<bool>,
    /// Maker's partner when going alone; excluded from trick play.
    pub sitting_out: Option<Seat>,
    /// Trump selection round (1 or 2).
    pub selection_round: u8,
    /// Whose turn it is in the selection order.
    pub selection_turn: Seat,
    /// Passes so far within the current selection round.
    pub passes: u8,
    /// Current trick.
    pub trick: TrickState,
    /// Resolved tricks so far this round (0..=5).
    pub completed_tricks: u8,
    /// Tricks won per team this round. Invariant: sums to at most 5.
    pub team_tricks: [u8; 2],
}

impl RoundState {
    pub fn new(dealer: Seat) -> Self {
        Self {
            dealer,
            trump: None,
            turned_card: None,
            turned_down: None,
            maker: None,
            alone: None,
            sitting_out: None,
            selection_round: 1,
            selection_turn: next_seat(dealer),
            passes: 0,
            trick: TrickState::default(),
            completed_tricks: 0,
            team_tricks: [0, 0],
        }
    }

    /// Players taking part in tricks: 3 when the maker goes alone, else 4.
    pub fn active_players(&self) -> usize {
        if self.sitting_out.is_some() {
            3
        } else {
            PLAYERS
        }
    }

    /// True once any card of the round has been played.
    pub fn any_card_played(&self) -> bool {
        self.completed_tricks > 0 || !self.trick.plays.is_empty()
    }

    /// First card of the trick in progress; None when a fresh trick is about
    /// to be led (including when a resolved trick is still on display).
    pub fn trick_first_play(&self) -> Option<Card> {
        if self.trick.winner.is_some() {
            return None;
        }
        self.trick.plays.first().map(|&(_, c)| c)
    }
}

/// Entire game container, sufficient for pure engine operations.
///
/// The engine owns this exclusively; the room layer only invokes the
/// validated operations and reads snapshots for view building.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    /// Players' hands, indexed by seat.
    pub hands: [Vec<Card>; PLAYERS],
    /// Seat expected to act in Playing (None elsewhere).
    pub turn: Option<Seat>,
    /// Cumulative team scores; positions {0,2} are team 0, {1,3} team 1.
    pub team_scores: [u8; 2],
    pub round: RoundState,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::WaitingForPlayers,
            hands: Default::default(),
            turn: None,
            team_scores: [0, 0],
            round: RoundState::new(0),
        }
    }

    /// Leave the lobby and enter dealing. Fails unless exactly four players
    /// are seated.
    pub fn begin(&mut self, seated_players: usize) -> Result<(), DomainError> {
        if self.phase != Phase::WaitingForPlayers {
            return Err(DomainError::illegal(
                IllegalActionKind::PhaseMismatch,
                "game already started",
            ));
        }
        if seated_players != PLAYERS {
            return Err(DomainError::rule(
                RuleViolationKind::NeedFourPlayers,
                format!("need 4 seated players, have {seated_players}"),
            ));
        }
        self.phase = Phase::Dealing;
        Ok(())
    }

    /// Start over after a finished game: scores reset, dealer rotates one
    /// seat past the final round's dealer, and dealing begins immediately.
    pub fn reset_for_new_game(&mut self) -> Result<(), DomainError> {
        if self.phase != Phase::GameComplete {
            return Err(DomainError::illegal(
                IllegalActionKind::PhaseMismatch,
                "game is not complete",
            ));
        }
        let next_dealer = next_seat(self.round.dealer);
        self.hands = Default::default();
        self.turn = None;
        self.team_scores = [0, 0];
        self.round = RoundState::new(next_dealer);
        self.phase = Phase::Dealing;
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(4)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    seat_offset(start, n as i8)
}

/// Fixed partner pairing: 0↔2, 1↔3.
#[inline]
pub fn partner_of(seat: Seat) -> Seat {
    seat_offset(seat, 2)
}

/// Team index for a seat: {0,2} → 0, {1,3} → 1.
#[inline]
pub fn team_of(seat: Seat) -> usize {
    (seat % 2) as usize
}

/// Next seat clockwise, skipping a sitting-out partner if any.
#[inline]
pub fn next_active_seat(seat: Seat, sitting_out: Option<Seat>) -> Seat {
    let mut s = next_seat(seat);
    if Some(s) == sitting_out {
        s = next_seat(s);
    }
    s
}
