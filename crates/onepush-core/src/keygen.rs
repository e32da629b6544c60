//! Application key generation helpers

use rand::Rng;

/// Alphabet used for generated keys.
pub const BASE62_CHARS: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of a generated application key.
pub const APP_KEY_LEN: usize = 16;

/// Random string of `length` characters drawn from [`BASE62_CHARS`].
pub fn random_string(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| BASE62_CHARS[rng.random_range(0..BASE62_CHARS.len())] as char)
        .collect()
}

/// Generate a fresh application key.
pub fn new_app_key() -> String {
    random_string(APP_KEY_LEN)
}

/// Encode `number` in base62 over [`BASE62_CHARS`]. Zero encodes as the empty
/// string.
pub fn to_base62(mut number: u64) -> String {
    let mut digits = Vec::new();
    while number > 0 {
        digits.push(BASE62_CHARS[(number % 62) as usize]);
        number /= 62;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
