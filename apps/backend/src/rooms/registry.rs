//! Concurrent room table and durable-identity index.
//!
//! The registry is the only process-wide mutable structure. Both maps are
//! sharded (`DashMap`), so room creation and lookups never block unrelated
//! rooms. It is a plain injectable value: tests construct isolated instances
//! instead of sharing ambient global state.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::rooms::room::{PlayerId, Room};
use crate::utils::room_code::generate_room_code;

#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Room>>,
    /// Durable identity → room code. O(1) reconnection lookups.
    players: DashMap<PlayerId, String>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room under a freshly allocated code, unique among live rooms.
    pub fn create_room(&self) -> Arc<Room> {
        loop {
            let code = generate_room_code();
            match self.rooms.entry(code.clone()) {
                Entry::Vacant(slot) => {
                    let room = Arc::new(Room::new(code));
                    slot.insert(Arc::clone(&room));
                    return room;
                }
                // Code collision with a live room: draw again.
                Entry::Occupied(_) => continue,
            }
        }
    }

    pub fn room(&self, code: &str) -> Option<Arc<Room>> {
        self.rooms.get(code).map(|r| Arc::clone(&r))
    }

    /// Resolve a durable identity to the room it is seated in.
    pub fn room_of_player(&self, player: &str) -> Option<Arc<Room>> {
        let code = self.players.get(player)?.clone();
        self.room(&code)
    }

    pub fn bind_player(&self, player: PlayerId, code: String) {
        self.players.insert(player, code);
    }

    pub fn unbind_player(&self, player: &str) {
        self.players.remove(player);
    }

    pub fn remove_room(&self, code: &str) -> Option<Arc<Room>> {
        self.rooms.remove(code).map(|(_, room)| room)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
