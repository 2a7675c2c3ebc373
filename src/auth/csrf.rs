use rand::Rng;

/// Generate a fresh CSRF token (32 random bytes, hex-encoded).
pub fn issue_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Verify a submitted CSRF token against the session's token.
///
/// Compares in constant time so the token cannot be guessed character by
/// character from response timing.
pub fn verify_token(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
