use crate::auth::{csrf, password};
use crate::core::error::SiteError;
use crate::core::state::AppState;
use crate::db;
use crate::models::order::{LoginForm, LoginPage};
use crate::models::user::{SessionUser, User};
use crate::sessions::middleware::{CurrentUser, SessionToken};
use axum::{
    extract::State,
    response::{IntoResponse, Json, Redirect, Response},
    Extension, Form,
};
use std::sync::Arc;
use tracing::{info, warn};

/// GET /login
///
/// Returns the login form data. If the session currently holds a user, it is
/// reset first (user and basket cleared, CSRF token rotated), matching the
/// behavior of revisiting the login page while logged in.
pub async fn login_form_handler(
    State(state): State<Arc<AppState>>,
    user: Option<Extension<CurrentUser>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<LoginPage>, SiteError> {
    let csrf_token = if user.is_some() || state.sessions.user(&token).is_some() {
        state.sessions.reset(&token)
    } else {
        state.sessions.csrf_token(&token)
    }
    .ok_or(SiteError::NotFound)?;

    Ok(Json(LoginPage {
        csrf_token,
        error: None,
    }))
}

/// What a login attempt resolves to once the credentials have been checked
/// against storage.
#[derive(Debug)]
pub enum LoginOutcome {
    /// No row matched the nickname/hash pair.
    UnknownUser,
    /// Credentials matched, but the account is not a mentor.
    NotAMentor(User),
    /// Credentials matched a mentor account.
    Mentor(User),
}

impl LoginOutcome {
    /// The message shown on the re-rendered form, or None when the login
    /// succeeds.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            LoginOutcome::UnknownUser => Some("Username or Password not found."),
            LoginOutcome::NotAMentor(_) => Some("Only mentors can login!"),
            LoginOutcome::Mentor(_) => None,
        }
    }
}

/// Classifies the result of the credential lookup. Kept separate from the
/// handler so the mentor gate can be exercised without a live database.
pub fn login_outcome(user: Option<User>) -> LoginOutcome {
    match user {
        None => LoginOutcome::UnknownUser,
        Some(user) if !user.is_mentor() => LoginOutcome::NotAMentor(user),
        Some(user) => LoginOutcome::Mentor(user),
    }
}

/// POST /login
///
/// Verifies the salted password hash, gates on the Mentor user type, and on
/// success stores the user in the session and redirects to /mentor. Failures
/// re-render the form data with an explicit message; storage errors map to a
/// user-safe response instead of leaking to the client.
pub async fn login_submit_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<LoginForm>,
) -> Result<Response, SiteError> {
    let expected = state.sessions.csrf_token(&token).ok_or(SiteError::CsrfMismatch)?;
    if !csrf::verify_token(&form.csrf, &expected) {
        return Err(SiteError::CsrfMismatch);
    }

    let hash = password::hash_password(&form.password, &state.config.auth.password_salt);
    let user = db::users::login(&state.db, &form.nick_name, &hash).await?;

    let outcome = login_outcome(user);
    if let Some(message) = outcome.error_message() {
        match &outcome {
            LoginOutcome::UnknownUser => {
                info!(nickname = %form.nick_name, "Login rejected: unknown user or wrong password");
            }
            LoginOutcome::NotAMentor(user) => {
                warn!(
                    nickname = %user.nickname,
                    user_type = %user.user_type,
                    "Login rejected: not a mentor"
                );
            }
            LoginOutcome::Mentor(_) => {}
        }
        return Ok(Json(LoginPage {
            csrf_token: expected,
            error: Some(message.to_string()),
        })
        .into_response());
    }

    if let LoginOutcome::Mentor(user) = outcome {
        info!(nickname = %user.nickname, "Mentor logged in");
        state.sessions.set_user(&token, SessionUser::from(user));
    }
    Ok(Redirect::to("/mentor").into_response())
}

/// GET /mentor/logout
///
/// Destroys the session entirely; the session middleware expires the cookie
/// when it sees the token is gone.
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Redirect {
    state.sessions.destroy(&token);
    Redirect::to("/")
}
