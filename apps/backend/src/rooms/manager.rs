//! Session manager: routes inbound player messages to rooms, serializes
//! mutations per room, broadcasts personalized views, and drives AI seats.
//!
//! Concurrency contract: rooms are independent; within one room every
//! mutation goes through the room mutex. AI turns are scheduled with an
//! artificial delay but re-validate, under the lock, that no other mutation
//! superseded them (mutation sequence check) before acting, and the engine's
//! own turn check backstops any remaining race.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex as SyncMutex;
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::ai::{ai_display_name, AiPlayer, Heuristic, TrumpDecision};
use crate::domain::player_view::perspective;
use crate::domain::scoring::complete_round;
use crate::domain::state::{partner_of, Phase, Seat};
use crate::domain::trump_selection::{
    dealer_discard, declare_going_alone, name_trump_or_pass, order_up_or_pass, SelectionOutcome,
};
use crate::domain::{dealing, tricks, Card, Suit};
use crate::errors::domain::{DomainError, RuleViolationKind};
use crate::protocol::game_state::EventEntry;
use crate::protocol::messages::{ClientMsg, ServerMsg, TrumpActionMsg};
use crate::rooms::registry::RoomRegistry;
use crate::rooms::room::{PlayerId, Room, RoomInner};

/// Pacing delay before an AI seat acts; emulates a human taking their turn.
const DEFAULT_AI_DELAY: Duration = Duration::from_millis(1500);

struct PendingAiTask {
    seq: u64,
    handle: JoinHandle<()>,
}

/// Engine-bound operations, identical in shape for humans and AI.
enum EngineAction {
    Trump {
        action: TrumpActionMsg,
        suit: Option<Suit>,
    },
    Alone(bool),
    Play(Card),
    Discard(Card),
}

#[derive(Debug, Clone, Copy)]
enum AiActionKind {
    TrumpCall,
    Discard,
    Play,
}

pub struct SessionManager {
    registry: Arc<RoomRegistry>,
    /// Live outbound channels, keyed by durable identity. A missing entry
    /// just means the player is currently disconnected.
    connections: DashMap<PlayerId, UnboundedSender<ServerMsg>>,
    ai: Arc<dyn AiPlayer>,
    ai_delay: Duration,
    /// One cancellable scheduled AI task per room, superseded on any newer
    /// mutation of that room.
    pending_ai: SyncMutex<HashMap<String, PendingAiTask>>,
}

impl SessionManager {
    pub fn new() -> Arc<Self> {
        Self::with_options(
            Arc::new(RoomRegistry::new()),
            Arc::new(Heuristic::new()),
            DEFAULT_AI_DELAY,
        )
    }

    /// Construct with an explicit registry, AI implementation, and AI pacing
    /// delay. Tests pass an isolated registry and a zero delay.
    pub fn with_options(
        registry: Arc<RoomRegistry>,
        ai: Arc<dyn AiPlayer>,
        ai_delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            registry,
            connections: DashMap::new(),
            ai,
            ai_delay,
            pending_ai: SyncMutex::new(HashMap::new()),
        })
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Register the outbound channel for a connected player.
    pub fn attach(&self, player: &str, sender: UnboundedSender<ServerMsg>) {
        self.connections.insert(player.to_string(), sender);
        info!(player, "connection attached");
    }

    /// Connection dropped. The seat is kept and marked disconnected; the
    /// round continues and the identity may reconnect later.
    pub async fn detach(self: &Arc<Self>, player: &str) {
        self.connections.remove(player);
        let Some(room) = self.registry.room_of_player(player) else {
            info!(player, "connection detached (no room)");
            return;
        };

        let mut inner = room.inner.lock().await;
        if let Some(slot) = inner.slot_mut(player) {
            if slot.connected {
                slot.connected = false;
                let name = slot.name.clone();
                info!(player, room = room.code(), "player disconnected");
                inner.log_event(format!("{name} disconnected"));
                self.notify_others(
                    &inner,
                    player,
                    ServerMsg::PlayerDisconnected { player_name: name },
                );
                self.finalize(&room, &mut inner);
            }
        }
        if should_teardown(&inner) {
            self.teardown_room(&room, &inner);
        }
    }

    /// Parse and dispatch a raw inbound frame. Malformed payloads are a
    /// protocol error: logged and dropped, the connection stays open.
    pub async fn handle_text(self: &Arc<Self>, player: &str, raw: &str) {
        match serde_json::from_str::<ClientMsg>(raw) {
            Ok(msg) => self.handle_message(player, msg).await,
            Err(err) => {
                warn!(player, error = %err, "dropping malformed client message");
            }
        }
    }

    /// Dispatch one inbound message for a durable identity.
    pub async fn handle_message(self: &Arc<Self>, player: &str, msg: ClientMsg) {
        match msg {
            ClientMsg::CreateRoom { player_name } => self.create_room(player, player_name).await,
            ClientMsg::JoinRoom {
                room_code,
                player_name,
            } => self.join_room(player, room_code, player_name).await,
            ClientMsg::LeaveRoom => self.leave_room(player).await,
            ClientMsg::CheckReconnection => self.check_reconnection(player).await,
            ClientMsg::GetGameState => self.get_game_state(player).await,
            ClientMsg::TrumpSelection { action, suit } => {
                self.engine_action(player, EngineAction::Trump { action, suit })
                    .await
            }
            ClientMsg::GoingAlone { going_alone } => {
                self.engine_action(player, EngineAction::Alone(going_alone))
                    .await
            }
            ClientMsg::PlayCard { card } => {
                self.engine_action(player, EngineAction::Play(card)).await
            }
            ClientMsg::DiscardCard { card } => {
                self.engine_action(player, EngineAction::Discard(card)).await
            }
            ClientMsg::AddAiPlayer => self.add_ai_player(player).await,
            ClientMsg::StartGame => self.start_game(player).await,
            ClientMsg::NewGame => self.new_game(player).await,
        }
    }

    // ---- room lifecycle -------------------------------------------------

    async fn create_room(self: &Arc<Self>, player: &str, player_name: String) {
        // A creator still seated elsewhere implicitly leaves that room.
        self.leave_current_room(player).await;

        let room = self.registry.create_room();
        let mut inner = room.inner.lock().await;
        if let Err(err) = inner.add_player(player.to_string(), player_name.clone(), false) {
            debug_assert!(false, "fresh room rejected its creator: {err}");
            self.send_to(
                player,
                ServerMsg::RoomCreated {
                    success: false,
                    room_code: room.code().to_string(),
                },
            );
            return;
        }
        self.registry
            .bind_player(player.to_string(), room.code().to_string());
        info!(player, room = room.code(), "room created");
        inner.log_event(format!("{player_name} created the room"));
        self.send_to(
            player,
            ServerMsg::RoomCreated {
                success: true,
                room_code: room.code().to_string(),
            },
        );
        self.finalize(&room, &mut inner);
    }

    async fn join_room(self: &Arc<Self>, player: &str, room_code: String, player_name: String) {
        let code = room_code.to_ascii_uppercase();
        let Some(room) = self.registry.room(&code) else {
            self.send_to(
                player,
                ServerMsg::RoomJoined {
                    success: false,
                    room_code: code,
                },
            );
            return;
        };

        // Seated in a different room: leave it before joining this one.
        if let Some(current) = self.registry.room_of_player(player) {
            if current.code() != code {
                self.leave_current_room(player).await;
            }
        }

        let mut inner = room.inner.lock().await;
        if let Some(slot) = inner.slot_mut(player) {
            // Already seated here; joining again is idempotent.
            slot.connected = true;
            self.send_to(
                player,
                ServerMsg::RoomJoined {
                    success: true,
                    room_code: code,
                },
            );
            self.finalize(&room, &mut inner);
            return;
        }

        match inner.add_player(player.to_string(), player_name.clone(), false) {
            Ok(_) => {
                self.registry.bind_player(player.to_string(), code.clone());
                info!(player, room = %code, "player joined");
                inner.log_event(format!("{player_name} joined"));
                self.send_to(
                    player,
                    ServerMsg::RoomJoined {
                        success: true,
                        room_code: code,
                    },
                );
                self.finalize(&room, &mut inner);
            }
            Err(err) => {
                debug!(player, room = %code, error = %err, "join rejected");
                self.send_to(
                    player,
                    ServerMsg::RoomJoined {
                        success: false,
                        room_code: code,
                    },
                );
            }
        }
    }

    async fn leave_room(self: &Arc<Self>, player: &str) {
        let left = self.leave_current_room(player).await;
        self.send_to(player, ServerMsg::LeftRoom { success: left });
    }

    /// Remove the player from whatever room they are bound to.
    async fn leave_current_room(self: &Arc<Self>, player: &str) -> bool {
        let Some(room) = self.registry.room_of_player(player) else {
            return false;
        };
        self.registry.unbind_player(player);

        let mut inner = room.inner.lock().await;
        let Some(removed) = inner.remove_player(player) else {
            return false;
        };
        info!(player, room = room.code(), "player left");
        inner.log_event(format!("{} left the room", removed.name));

        if inner.human_count() == 0 {
            // Last human is gone; AI-only rooms are reclaimed immediately.
            self.teardown_room(&room, &inner);
            return true;
        }
        self.finalize(&room, &mut inner);
        true
    }

    async fn check_reconnection(self: &Arc<Self>, player: &str) {
        let Some(room) = self.registry.room_of_player(player) else {
            self.send_to(player, ServerMsg::NoReconnectionAvailable);
            return;
        };

        let mut inner = room.inner.lock().await;
        let in_progress = !matches!(
            inner.game.phase,
            Phase::WaitingForPlayers | Phase::GameComplete
        );
        if !in_progress {
            drop(inner);
            self.send_to(player, ServerMsg::NoReconnectionAvailable);
            return;
        }
        let Some(slot) = inner.slot_mut(player) else {
            drop(inner);
            self.send_to(player, ServerMsg::NoReconnectionAvailable);
            return;
        };
        let was_connected = slot.connected;
        slot.connected = true;
        let name = slot.name.clone();

        if !was_connected {
            info!(player, room = room.code(), "player reconnected");
            inner.log_event(format!("{name} reconnected"));
        }

        if let Some(view) = inner.view_for(room.code(), player) {
            self.send_to(player, ServerMsg::Reconnected { game_state: view });
        }

        // Idempotence: a second check_reconnection for an already-connected
        // identity re-sends the view but must not re-broadcast.
        if !was_connected {
            self.notify_others(
                &inner,
                player,
                ServerMsg::PlayerReconnected { player_name: name },
            );
            self.finalize(&room, &mut inner);
        }
    }

    async fn get_game_state(&self, player: &str) {
        let Some(room) = self.registry.room_of_player(player) else {
            debug!(player, "state requested outside any room");
            return;
        };
        let inner = room.inner.lock().await;
        if let Some(view) = inner.view_for(room.code(), player) {
            self.send_to(player, ServerMsg::GameState { game_state: view });
        }
    }

    async fn add_ai_player(self: &Arc<Self>, player: &str) {
        let Some(room) = self.registry.room_of_player(player) else {
            warn!(player, "add_ai_player outside any room");
            return;
        };
        let mut inner = room.inner.lock().await;
        if inner.slot(player).is_none() {
            return;
        }

        let taken: Vec<String> = inner.seats.iter().map(|s| s.name.clone()).collect();
        let name = ai_display_name(&taken);
        let ai_id = format!("ai-{}", Uuid::new_v4());
        match inner.add_player(ai_id, name.clone(), true) {
            Ok(_) => {
                inner.log_event(format!("{name} (AI) joined"));
                self.finalize(&room, &mut inner);
            }
            Err(err) => {
                debug!(player, room = room.code(), error = %err, "add AI rejected");
                self.reject(&room, &inner, player, &err.reason());
            }
        }
    }

    async fn start_game(self: &Arc<Self>, player: &str) {
        let Some(room) = self.registry.room_of_player(player) else {
            warn!(player, "start_game outside any room");
            return;
        };
        let mut inner = room.inner.lock().await;
        if inner.slot(player).is_none() {
            return;
        }

        let seated = inner.seats.len();
        match inner.game.begin(seated) {
            Ok(()) => {
                info!(room = room.code(), "game started");
                inner.log_event("Game started");
                start_next_deal(&mut inner, next_seed());
                self.finalize(&room, &mut inner);
            }
            Err(err) => self.reject(&room, &inner, player, err.reason()),
        }
    }

    async fn new_game(self: &Arc<Self>, player: &str) {
        let Some(room) = self.registry.room_of_player(player) else {
            warn!(player, "new_game outside any room");
            return;
        };
        let mut inner = room.inner.lock().await;
        if inner.slot(player).is_none() {
            return;
        }

        match inner.game.reset_for_new_game() {
            Ok(()) => {
                info!(room = room.code(), "new game started");
                inner.log_event("New game started");
                start_next_deal(&mut inner, next_seed());
                self.finalize(&room, &mut inner);
            }
            Err(err) => self.reject(&room, &inner, player, err.reason()),
        }
    }

    // ---- engine actions -------------------------------------------------

    async fn engine_action(self: &Arc<Self>, player: &str, action: EngineAction) {
        let Some(room) = self.registry.room_of_player(player) else {
            warn!(player, "game action outside any room");
            return;
        };
        let mut inner = room.inner.lock().await;
        let Some(seat) = inner.seat_of(player) else {
            warn!(player, room = room.code(), "game action from unseated identity");
            return;
        };

        let result = match action {
            EngineAction::Trump { action, suit } => {
                apply_trump_action(&mut inner, seat, action, suit)
            }
            EngineAction::Alone(alone) => apply_going_alone(&mut inner, seat, alone),
            EngineAction::Play(card) => apply_play(&mut inner, seat, card, next_seed()),
            EngineAction::Discard(card) => apply_discard(&mut inner, seat, card),
        };

        match result {
            Ok(()) => self.finalize(&room, &mut inner),
            Err(err) => {
                debug!(player, room = room.code(), error = %err, "action rejected");
                self.reject(&room, &inner, player, err.reason());
            }
        }
    }

    // ---- AI scheduling --------------------------------------------------

    /// If the pending actor is an AI seat, schedule its move after the pacing
    /// delay, superseding any previously scheduled task for this room.
    fn schedule_ai_if_needed(self: &Arc<Self>, room: &Arc<Room>, inner: &RoomInner) {
        let code = room.code().to_string();
        let Some((seat, _)) = pending_actor(inner) else {
            self.cancel_pending_ai(&code);
            return;
        };
        let is_ai = inner.slot_at_seat(seat).map(|s| s.is_ai).unwrap_or(false);
        if !is_ai {
            self.cancel_pending_ai(&code);
            return;
        }

        let seq = inner.mutation_seq;
        let mgr = Arc::clone(self);
        let room_task = Arc::clone(room);
        let handle = tokio::spawn(async move {
            if !mgr.ai_delay.is_zero() {
                tokio::time::sleep(mgr.ai_delay).await;
            }
            mgr.run_ai_turn(room_task, seq).await;
        });

        let mut pending = self.pending_ai.lock();
        if let Some(prev) = pending.insert(code, PendingAiTask { seq, handle }) {
            prev.handle.abort();
        }
    }

    fn cancel_pending_ai(&self, code: &str) {
        if let Some(task) = self.pending_ai.lock().remove(code) {
            task.handle.abort();
        }
    }

    async fn run_ai_turn(self: Arc<Self>, room: Arc<Room>, expect_seq: u64) {
        let mut inner = room.inner.lock().await;

        // This task is no longer pending once it runs; forget the entry so a
        // follow-up schedule does not abort the running task.
        {
            let mut pending = self.pending_ai.lock();
            if pending.get(room.code()).map(|t| t.seq) == Some(expect_seq) {
                pending.remove(room.code());
            }
        }

        if inner.mutation_seq != expect_seq {
            // Superseded by a mutation that won the room lock first.
            return;
        }
        let Some((seat, kind)) = pending_actor(&inner) else {
            return;
        };
        if !inner.slot_at_seat(seat).map(|s| s.is_ai).unwrap_or(false) {
            return;
        }

        match self.perform_ai_action(&mut inner, seat, kind) {
            Ok(()) => self.finalize(&room, &mut inner),
            Err(detail) => {
                // A conforming AI never reaches here: it draws every choice
                // from the same legality helpers the engine enforces.
                error!(seat, room = room.code(), detail = %detail, "AI action failed");
                debug_assert!(false, "AI action failed: {detail}");
            }
        }
    }

    fn perform_ai_action(
        &self,
        inner: &mut RoomInner,
        seat: Seat,
        kind: AiActionKind,
    ) -> Result<(), String> {
        let view = perspective(&inner.game, seat);
        match kind {
            AiActionKind::TrumpCall => {
                let decision = self
                    .ai
                    .choose_trump_call(&view)
                    .map_err(|e| e.to_string())?;
                let made_trump = match decision {
                    TrumpDecision::OrderUp => {
                        apply_trump_action(inner, seat, TrumpActionMsg::OrderUp, None)
                            .map_err(|e| e.to_string())?;
                        true
                    }
                    TrumpDecision::Name(suit) => {
                        apply_trump_action(inner, seat, TrumpActionMsg::NameTrump, Some(suit))
                            .map_err(|e| e.to_string())?;
                        true
                    }
                    TrumpDecision::Pass => {
                        apply_trump_action(inner, seat, TrumpActionMsg::Pass, None)
                            .map_err(|e| e.to_string())?;
                        false
                    }
                };
                if made_trump {
                    // The new maker settles going alone immediately, while
                    // the declaration window is open.
                    let fresh = perspective(&inner.game, seat);
                    let alone = match self.ai.choose_going_alone(&fresh) {
                        Ok(alone) => alone,
                        Err(err) => {
                            warn!(seat, error = %err, "going-alone choice failed; staying with partner");
                            false
                        }
                    };
                    apply_going_alone(inner, seat, alone).map_err(|e| e.to_string())?;
                }
                Ok(())
            }
            AiActionKind::Discard => {
                let card = self.ai.choose_discard(&view).map_err(|e| e.to_string())?;
                apply_discard(inner, seat, card).map_err(|e| e.to_string())
            }
            AiActionKind::Play => {
                let card = self.ai.choose_play(&view).map_err(|e| e.to_string())?;
                apply_play(inner, seat, card, next_seed()).map_err(|e| e.to_string())
            }
        }
    }

    // ---- plumbing -------------------------------------------------------

    fn send_to(&self, player: &str, msg: ServerMsg) {
        if let Some(tx) = self.connections.get(player) {
            if tx.send(msg).is_err() {
                debug!(player, "outbound channel closed; dropping message");
            }
        }
    }

    /// Push every connected human their personalized view.
    fn broadcast_views(&self, room: &Room, inner: &RoomInner) {
        for slot in &inner.seats {
            if slot.is_ai || !slot.connected {
                continue;
            }
            if let Some(view) = inner.view_for(room.code(), &slot.id) {
                self.send_to(&slot.id, ServerMsg::GameState { game_state: view });
            }
        }
    }

    fn notify_others(&self, inner: &RoomInner, except: &str, msg: ServerMsg) {
        for slot in &inner.seats {
            if slot.is_ai || !slot.connected || slot.id == except {
                continue;
            }
            self.send_to(&slot.id, msg.clone());
        }
    }

    /// Post-mutation bookkeeping: bump the sequence, rebuild and push every
    /// view, then line up the next AI move if one is due.
    fn finalize(self: &Arc<Self>, room: &Arc<Room>, inner: &mut RoomInner) {
        inner.mutation_seq += 1;
        self.broadcast_views(room, inner);
        self.schedule_ai_if_needed(room, inner);
    }

    /// Rejected action: the offender alone gets the authoritative state back,
    /// with an explanatory entry appended to their copy of the log. No other
    /// player hears about it and nothing changes.
    fn reject(&self, room: &Room, inner: &RoomInner, player: &str, reason: &str) {
        if let Some(mut view) = inner.view_for(room.code(), player) {
            view.events
                .push(EventEntry::now(format!("Action rejected: {reason}")));
            self.send_to(player, ServerMsg::GameState { game_state: view });
        }
    }

    fn teardown_room(&self, room: &Room, inner: &RoomInner) {
        for slot in &inner.seats {
            self.registry.unbind_player(&slot.id);
        }
        self.registry.remove_room(room.code());
        self.cancel_pending_ai(room.code());
        info!(room = room.code(), "room reclaimed");
    }
}

/// Seat expected to produce the next engine operation, if any.
fn pending_actor(inner: &RoomInner) -> Option<(Seat, AiActionKind)> {
    match inner.game.phase {
        Phase::TrumpSelection { .. } => {
            Some((inner.game.round.selection_turn, AiActionKind::TrumpCall))
        }
        Phase::DealerDiscard => Some((inner.game.round.dealer, AiActionKind::Discard)),
        Phase::Playing => inner.game.turn.map(|seat| (seat, AiActionKind::Play)),
        _ => None,
    }
}

/// Teardown rule: nobody connected and nothing worth reconnecting to.
fn should_teardown(inner: &RoomInner) -> bool {
    inner.connected_humans() == 0
        && matches!(
            inner.game.phase,
            Phase::WaitingForPlayers | Phase::GameComplete
        )
}

fn next_seed() -> u64 {
    rand::rng().random()
}

// ---- engine application + event logging ---------------------------------

fn apply_trump_action(
    inner: &mut RoomInner,
    seat: Seat,
    action: TrumpActionMsg,
    suit: Option<Suit>,
) -> Result<(), DomainError> {
    let outcome = match action {
        TrumpActionMsg::OrderUp => order_up_or_pass(&mut inner.game, seat, true)?,
        TrumpActionMsg::NameTrump => {
            let Some(named) = suit else {
                return Err(DomainError::rule(
                    RuleViolationKind::MissingSuit,
                    "name_trump requires a suit",
                ));
            };
            name_trump_or_pass(&mut inner.game, seat, Some(named))?
        }
        TrumpActionMsg::Pass => match inner.game.phase {
            Phase::TrumpSelection { round: 2 } => name_trump_or_pass(&mut inner.game, seat, None)?,
            _ => order_up_or_pass(&mut inner.game, seat, false)?,
        },
    };

    let name = inner.display_name(seat);
    match outcome {
        SelectionOutcome::TrumpOrdered { trump } => {
            inner.log_event(format!("{name} ordered up {trump}"));
            let dealer = inner.display_name(inner.game.round.dealer);
            inner.log_event(format!("{dealer} picks up the card and must discard"));
        }
        SelectionOutcome::TrumpNamed { trump } => {
            inner.log_event(format!("{name} named {trump} trump"));
        }
        SelectionOutcome::Passed => inner.log_event(format!("{name} passed")),
        SelectionOutcome::RoundTwoStarted => {
            inner.log_event(format!("{name} passed"));
            inner.log_event("All four passed; the card is turned down");
        }
    }
    Ok(())
}

fn apply_going_alone(inner: &mut RoomInner, seat: Seat, alone: bool) -> Result<(), DomainError> {
    declare_going_alone(&mut inner.game, seat, alone)?;
    let name = inner.display_name(seat);
    if alone {
        let partner = inner.display_name(partner_of(seat));
        inner.log_event(format!("{name} is going alone; {partner} sits out"));
    } else {
        inner.log_event(format!("{name} plays with their partner"));
    }
    Ok(())
}

fn apply_discard(inner: &mut RoomInner, seat: Seat, card: Card) -> Result<(), DomainError> {
    dealer_discard(&mut inner.game, seat, card)?;
    // The discarded card is buried; the event deliberately omits it.
    let name = inner.display_name(seat);
    inner.log_event(format!("{name} discarded"));
    Ok(())
}

fn apply_play(
    inner: &mut RoomInner,
    seat: Seat,
    card: Card,
    next_round_seed: u64,
) -> Result<(), DomainError> {
    let result = tricks::play_card(&mut inner.game, seat, card)?;
    let name = inner.display_name(seat);
    inner.log_event(format!("{name} played {card}"));

    if let Some(winner) = result.trick_winner {
        let winner_name = inner.display_name(winner);
        inner.log_event(format!("{winner_name} won the trick"));
    }

    if result.round_completed {
        if let Some(score) = complete_round(&mut inner.game) {
            let team = format!("Team {}", score.team + 1);
            if score.euchred {
                inner.log_event(format!("Euchred! {team} scores {} points", score.points));
            } else if score.points == 1 {
                inner.log_event(format!("{team} scores 1 point"));
            } else {
                inner.log_event(format!("{team} scores {} points", score.points));
            }
            if score.game_over {
                inner.log_event(format!("Game over: {team} wins"));
            } else {
                start_next_deal(inner, next_round_seed);
            }
        }
    }
    Ok(())
}

fn start_next_deal(inner: &mut RoomInner, seed: u64) {
    if let Err(err) = dealing::deal(&mut inner.game, seed) {
        // Only reachable through a phase-transition bug.
        error!(error = %err, "failed to deal the next round");
        debug_assert!(false, "deal failed: {err}");
        return;
    }
    let dealer = inner.display_name(inner.game.round.dealer);
    match inner.game.round.turned_card {
        Some(turned) => inner.log_event(format!("{dealer} deals; {turned} is turned up")),
        None => inner.log_event(format!("{dealer} deals")),
    }
}
