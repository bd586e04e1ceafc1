//! String-level activation code operations.
//!
//! These functions work on plain strings and never fail: `format` degrades to
//! identity on malformed input and `unformat` is a best-effort normalizer.
//! Callers that need a checked value go through [`crate::ActivationCode`].

use rand::Rng;

/// Symbols a code is drawn from, `[A-Z0-9]`.
pub const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in the raw (storage) form.
pub const CODE_LENGTH: usize = 9;

/// Size of one hyphen-separated group in the display form.
pub const GROUP_SIZE: usize = 3;

const SEPARATOR: char = '-';

/// Generates a raw code from the thread-local RNG.
///
/// The RNG is not cryptographically secure; codes identify configurations,
/// they are not meant to be unguessable secrets.
pub fn generate() -> String {
    generate_with(&mut rand::thread_rng())
}

/// Generates a raw code by sampling every character uniformly from [`ALPHABET`].
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns `true` iff `code` is exactly 9 characters of `[A-Z0-9]`.
///
/// No normalization happens first: hyphens or lowercase letters make it invalid.
pub fn is_valid(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

/// Inserts hyphens after the 3rd and 6th characters of a 9-character code.
///
/// Inputs of any other character count are returned unchanged.
pub fn format(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() != CODE_LENGTH {
        return code.to_string();
    }

    chars
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Removes every hyphen and upper-cases the rest. Does not validate the result.
pub fn unformat(display: &str) -> String {
    display
        .chars()
        .filter(|c| *c != SEPARATOR)
        .collect::<String>()
        .to_uppercase()
}
