//! Room code generation.
//!
//! Room codes are 6-character strings drawn from the uppercase alphanumeric
//! alphabet. Uniqueness among live rooms is enforced at allocation time by
//! the room registry, not here.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in a room code.
pub const ROOM_CODE_LEN: usize = 6;

/// Generate a random room code.
///
/// Collisions are possible (and handled by the caller retrying against the
/// registry); the space of 36^6 codes makes them rare in practice.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();

    let mut s = String::with_capacity(ROOM_CODE_LEN);
    for _ in 0..ROOM_CODE_LEN {
        let idx = rng.random_range(0..ALPHABET.len());
        s.push(ALPHABET[idx] as char);
    }
    s
}
