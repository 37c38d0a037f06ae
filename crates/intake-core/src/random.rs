//! Fixed-charset random string generation.

use rand::Rng;

/// Characters random strings are drawn from.
pub const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+";

/// Returns a random string of `len` characters drawn from [`CHARSET`].
///
/// Uses the thread-local generator, so concurrent callers never contend on
/// shared state.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
