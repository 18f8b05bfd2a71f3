//! Short code generation.
//!
//! Codes are the positional base-62 encoding of the creation instant in
//! nanoseconds since the Unix epoch. They are short, URL-safe, and sort by
//! length and then lexicographically in creation order.
//!
//! No uniqueness check is made here. Two codes generated within the same
//! nanosecond are equal; the store's unique constraint rejects the second one.

use chrono::{DateTime, Utc};

/// Digit alphabet: `0-9`, then `A-Z`, then `a-z`.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u128 = ALPHABET.len() as u128;

/// Encodes `value` in base 62 without leading zeros.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode_base62(0), "0");
/// assert_eq!(encode_base62(61), "z");
/// assert_eq!(encode_base62(62), "10");
/// ```
pub fn encode_base62(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(22);
    while value > 0 {
        digits.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base-62 string produced by [`encode_base62`].
///
/// Returns `None` for empty input, characters outside the alphabet, or
/// values that overflow `u128`.
pub fn decode_base62(code: &str) -> Option<u128> {
    if code.is_empty() {
        return None;
    }

    code.bytes().try_fold(0u128, |acc, byte| {
        let digit = digit_value(byte)?;
        acc.checked_mul(BASE)?.checked_add(u128::from(digit))
    })
}

fn digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        b'a'..=b'z' => Some(byte - b'a' + 36),
        _ => None,
    }
}

/// Returns the code for a given instant.
///
/// Instants before the Unix epoch clamp to zero.
pub fn code_for_instant(instant: DateTime<Utc>) -> String {
    let nanos = i128::from(instant.timestamp()) * 1_000_000_000
        + i128::from(instant.timestamp_subsec_nanos());

    encode_base62(u128::try_from(nanos).unwrap_or(0))
}

/// Generates a code from the current time.
pub fn generate_code() -> String {
    code_for_instant(Utc::now())
}
