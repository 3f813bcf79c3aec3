//! Room code generation
//!
//! Room ids are short join codes typed by players, so the alphabet excludes
//! ambiguous characters (I, O, 0, 1). Uniqueness is enforced by the
//! persistence collaborator; this module supplies the generator and the
//! bounded retry against a caller-provided taken check.

use rand::Rng;

/// Characters allowed in a room code
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Room code length
pub const ROOM_CODE_LEN: usize = 6;

/// Maximum generation attempts before giving up on a unique code
pub const MAX_CODE_ATTEMPTS: u32 = 10;

/// Room code errors
#[derive(Debug, thiserror::Error)]
pub enum RoomCodeError {
    #[error("Failed to generate unique room code after {0} attempts")]
    Exhausted(u32),
}

/// Generate a random room code
pub fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Generate a room code not rejected by `is_taken`, retrying up to
/// [`MAX_CODE_ATTEMPTS`] times
pub fn allocate_room_code<R, F>(rng: &mut R, is_taken: F) -> Result<String, RoomCodeError>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_room_code(rng);
        if !is_taken(&code) {
            return Ok(code);
        }
    }
    Err(RoomCodeError::Exhausted(MAX_CODE_ATTEMPTS))
}
