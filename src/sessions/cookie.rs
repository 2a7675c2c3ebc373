use crate::auth::csrf::verify_token;
use axum::http::HeaderMap;
use sha2::{Digest, Sha512};

pub const SESSION_COOKIE: &str = "dojo_session";

/// Signature over the token with the configured session secret. The store is
/// server-side, so the signature only has to stop forged or truncated cookie
/// values from probing the store.
fn sign(token: &str, secret: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(token.as_bytes());
    hasher.update(b".");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cookie value: "{token}.{signature}".
pub fn cookie_value(token: &str, secret: &str) -> String {
    format!("{}.{}", token, sign(token, secret))
}

/// Full Set-Cookie header value with the session attributes.
pub fn set_cookie(token: &str, secret: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        cookie_value(token, secret),
        max_age_secs
    )
}

/// Set-Cookie header value that expires the session cookie.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", SESSION_COOKIE)
}

/// Extract and verify the session token from the request's Cookie header.
/// Returns None when the cookie is absent, malformed, or wrongly signed.
pub fn session_token(headers: &HeaderMap, secret: &str) -> Option<String> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

    let value = cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })?;

    let (token, signature) = value.split_once('.')?;
    if token.is_empty() || !verify_token(signature, &sign(token, secret)) {
        return None;
    }

    Some(token.to_string())
}
