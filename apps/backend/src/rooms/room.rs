//! One room: a seat roster, one game engine instance, and its event log.
//!
//! All of it lives behind a single async mutex, which is the per-room
//! single-writer discipline: at most one mutation is ever in flight against
//! a room's engine, and view builders always observe a fully applied state.

use tokio::sync::Mutex;

use crate::domain::state::{GameState, Phase, Seat, PLAYERS};
use crate::errors::room::RoomError;
use crate::protocol::game_state::{EventEntry, GameStateView, PlayerInfo, TrickView};

/// Durable player identity, independent of any connection.
pub type PlayerId = String;

#[derive(Debug, Clone)]
pub struct PlayerSlot {
    pub id: PlayerId,
    pub name: String,
    pub seat: Seat,
    pub is_ai: bool,
    pub connected: bool,
}

pub struct Room {
    code: String,
    pub(crate) inner: Mutex<RoomInner>,
}

impl Room {
    pub fn new(code: String) -> Self {
        Self {
            code,
            inner: Mutex::new(RoomInner::new()),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Mutable room state; owned by the room mutex.
pub struct RoomInner {
    pub game: GameState,
    /// Seats in position order (seat k at index k while the roster is full).
    pub seats: Vec<PlayerSlot>,
    /// Append-only human-readable log, shared by every view.
    pub events: Vec<EventEntry>,
    /// Bumped on every applied mutation; lets delayed tasks detect that they
    /// were superseded before they took the lock.
    pub mutation_seq: u64,
}

impl RoomInner {
    fn new() -> Self {
        Self {
            game: GameState::new(),
            seats: Vec::with_capacity(PLAYERS),
            events: Vec::new(),
            mutation_seq: 0,
        }
    }

    pub fn slot(&self, id: &str) -> Option<&PlayerSlot> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn slot_mut(&mut self, id: &str) -> Option<&mut PlayerSlot> {
        self.seats.iter_mut().find(|s| s.id == id)
    }

    pub fn slot_at_seat(&self, seat: Seat) -> Option<&PlayerSlot> {
        self.seats.iter().find(|s| s.seat == seat)
    }

    pub fn seat_of(&self, id: &str) -> Option<Seat> {
        self.slot(id).map(|s| s.seat)
    }

    pub fn display_name(&self, seat: Seat) -> String {
        self.slot_at_seat(seat)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("seat {seat}"))
    }

    pub fn connected_humans(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| !s.is_ai && s.connected)
            .count()
    }

    pub fn human_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_ai).count()
    }

    pub fn log_event(&mut self, text: impl Into<String>) {
        self.events.push(EventEntry::now(text));
    }

    /// Seat a player in the next free position.
    pub fn add_player(
        &mut self,
        id: PlayerId,
        name: String,
        is_ai: bool,
    ) -> Result<Seat, RoomError> {
        if self.seats.len() >= PLAYERS {
            return Err(RoomError::RoomFull);
        }
        let seat = self.seats.len() as Seat;
        self.seats.push(PlayerSlot {
            id,
            name,
            seat,
            is_ai,
            connected: true,
        });
        Ok(seat)
    }

    /// Remove a player's slot. Before the game starts the remaining seats are
    /// renumbered to stay contiguous; mid-game the seat is simply vacated.
    pub fn remove_player(&mut self, id: &str) -> Option<PlayerSlot> {
        let idx = self.seats.iter().position(|s| s.id == id)?;
        let removed = self.seats.remove(idx);
        if self.game.phase == Phase::WaitingForPlayers {
            for (i, slot) in self.seats.iter_mut().enumerate() {
                slot.seat = i as Seat;
            }
        }
        Some(removed)
    }

    fn id_of_seat(&self, seat: Seat) -> String {
        self.slot_at_seat(seat)
            .map(|s| s.id.clone())
            .unwrap_or_else(|| seat.to_string())
    }

    /// Build the personalized state payload for one recipient.
    ///
    /// Only the viewer's own hand is included; every other hand appears as a
    /// count. Returns None for identities not seated in this room.
    pub fn view_for(&self, room_code: &str, viewer: &str) -> Option<GameStateView> {
        let me = self.slot(viewer)?;
        let game = &self.game;

        let players = self
            .seats
            .iter()
            .map(|s| PlayerInfo {
                id: s.id.clone(),
                name: s.name.clone(),
                position: s.seat,
                is_ai: s.is_ai,
                is_connected: s.connected,
                hand_size: game.hands[s.seat as usize].len(),
            })
            .collect();

        let trick = &game.round.trick;
        let current_trick = TrickView {
            cards: trick
                .plays
                .iter()
                .map(|&(seat, card)| (self.id_of_seat(seat), card))
                .collect(),
            leader: trick.leader.map(|s| self.id_of_seat(s)),
            winner: trick.winner.map(|s| self.id_of_seat(s)),
        };

        let selection_turn = match game.phase {
            Phase::TrumpSelection { .. } => Some(game.round.selection_turn),
            _ => None,
        };

        Some(GameStateView {
            room_code: room_code.to_string(),
            phase: game.phase.as_str().to_string(),
            player_id: me.id.clone(),
            player_position: me.seat,
            players,
            hand: game.hands[me.seat as usize].clone(),
            dealer_index: game.round.dealer,
            trump_suit: game.round.trump,
            trump_card: game.round.turned_card,
            trump_selection_round: game.round.selection_round,
            trump_selection_player_index: selection_turn,
            current_player_index: game.turn,
            current_trick,
            completed_tricks_count: game.round.completed_tricks,
            team_scores: game.team_scores,
            team_tricks: game.round.team_tricks,
            trump_maker: game.round.maker.map(|s| self.id_of_seat(s)),
            going_alone: game.round.alone == Some(true),
            events: self.events.clone(),
        })
    }
}
