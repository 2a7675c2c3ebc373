// HTTP routes configuration

use crate::core::state::AppState;
use crate::sessions::middleware::{require_login, session_middleware};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Mentor routes sit behind the login gate.
    let mentor = Router::new()
        .route("/mentor", get(crate::handlers::mentor::dashboard_handler))
        .route("/mentor/register", get(crate::handlers::mentor::register_handler))
        .layer(middleware::from_fn(require_login));

    Router::new()
        // Public pages
        .route("/", get(crate::handlers::pages::index_handler))
        .route("/subscribe", get(crate::handlers::pages::subscribe_handler))
        .route("/contact-us", get(crate::handlers::pages::contact_us_handler))
        .route("/faq", get(crate::handlers::pages::faq_handler))
        .route("/resources", get(crate::handlers::pages::resources_handler))
        .route("/members", get(crate::handlers::pages::members_handler))
        .route("/health", get(crate::handlers::health::health_handler))

        // Login / logout
        .route(
            "/login",
            get(crate::handlers::auth::login_form_handler)
                .post(crate::handlers::auth::login_submit_handler),
        )
        .route("/mentor/logout", get(crate::handlers::auth::logout_handler))

        // Merchandise basket and ordering
        .route("/merchandise", get(crate::handlers::merchandise::view_handler))
        .route("/merchandise/add", post(crate::handlers::merchandise::add_handler))
        .route(
            "/merchandise/remove/{item}",
            post(crate::handlers::merchandise::remove_handler),
        )
        .route("/merchandise/order", post(crate::handlers::merchandise::order_handler))

        .merge(mentor)

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        // Session step wraps everything, including the login gate.
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            session_middleware,
        ))
        .with_state(state)
}
