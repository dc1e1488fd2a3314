use crate::common::{ID_ALPHABET, ID_LENGTH};
use uuid::Uuid;

/// Generates a short random document id.
///
/// The id is a UUID v4 rendered in base-58 and left-padded to a fixed width of
/// 22 characters, so ids are URL-safe and free of look-alike characters
/// (`0`, `O`, `I`, `l`).
///
/// # Examples
///
/// ```rust
/// use doc_collection::common::new_id;
///
/// let id = new_id();
/// assert_eq!(id.len(), 22);
/// assert_ne!(id, new_id());
/// ```
pub fn new_id() -> String {
    encode_base58(Uuid::new_v4().as_u128())
}

fn encode_base58(mut value: u128) -> String {
    let base = ID_ALPHABET.len() as u128;
    let mut digits = Vec::with_capacity(ID_LENGTH);
    while value > 0 {
        digits.push(ID_ALPHABET[(value % base) as usize]);
        value /= base;
    }
    while digits.len() < ID_LENGTH {
        digits.push(ID_ALPHABET[0]);
    }
    digits.reverse();
    // every byte comes from the ASCII alphabet
    digits.into_iter().map(char::from).collect()
}
