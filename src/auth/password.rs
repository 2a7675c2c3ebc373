use sha2::{Digest, Sha512};

/// Hash a password with the site-wide fixed salt: hex(sha512(password + salt)).
///
/// Stored password hashes were produced with this exact construction, so the
/// salt must never change once users exist.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
