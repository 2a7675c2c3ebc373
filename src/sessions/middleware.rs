use crate::core::state::AppState;
use crate::db;
use crate::models::user::SessionUser;
use crate::sessions::cookie;
use crate::utils::time::current_timestamp;
use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// The session token attached to every request by [`session_middleware`].
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// The authenticated user for this request, if any. Present only when the
/// session holds a user whose record was re-fetched successfully.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

/// Per-request session step.
///
/// Ensures every request has a live session (creating one when the cookie is
/// absent, expired, or wrongly signed), refreshes the session's user copy
/// from storage so privilege changes take effect on the next request, and
/// re-issues the cookie on the way out for sliding expiry.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let now = current_timestamp();
    let secret = &state.config.session.secret;

    let token = match cookie::session_token(request.headers(), secret) {
        Some(token) if state.sessions.touch(&token, now) => token,
        _ => state.sessions.create(now),
    };

    if let Some(session_user) = state.sessions.user(&token) {
        match db::users::find_by_nickname(&state.db, &session_user.nickname).await {
            Ok(Some(user)) => {
                let refreshed = SessionUser::from(user);
                state.sessions.set_user(&token, refreshed.clone());
                request.extensions_mut().insert(CurrentUser(refreshed));
            }
            Ok(None) => {
                debug!(
                    nickname = %session_user.nickname,
                    "Session user no longer exists, proceeding unauthenticated"
                );
            }
            Err(err) => {
                warn!(
                    error = %err,
                    "Failed to refresh session user, proceeding unauthenticated"
                );
            }
        }
    }

    request.extensions_mut().insert(SessionToken(token.clone()));

    let mut response = next.run(request).await;

    // A handler may have destroyed the session (logout); expire the cookie
    // in that case instead of re-issuing a dead token.
    let header = if state.sessions.contains(&token) {
        cookie::set_cookie(&token, secret, state.sessions.duration_secs())
    } else {
        cookie::clear_cookie()
    };

    if let Ok(value) = HeaderValue::from_str(&header) {
        response.headers_mut().append(SET_COOKIE, value);
    }

    response
}

/// Guarded-route wrapper: anything without an authenticated user is sent to
/// the login page. Makes no distinction between "expired" and "never logged
/// in".
pub async fn require_login(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Redirect::to("/login").into_response();
    }
    next.run(request).await
}
