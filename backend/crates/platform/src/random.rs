//! Random Code Generation

use rand::{Rng, rngs::OsRng};

/// Digits followed by upper-case ASCII letters
pub const UPPERCASE_ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Digits, upper-case and lower-case ASCII letters
pub const ALPHANUMERIC: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generate a random string of `len` characters drawn uniformly from `alphabet`
///
/// `alphabet` must be non-empty ASCII.
pub fn random_string(len: usize, alphabet: &[u8]) -> String {
    debug_assert!(!alphabet.is_empty() && alphabet.is_ascii());
    let mut rng = OsRng;
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Generate an upper-case alphanumeric code (`[0-9A-Z]{len}`)
pub fn random_code(len: usize) -> String {
    random_string(len, UPPERCASE_ALPHANUMERIC)
}
