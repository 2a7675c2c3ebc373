use crate::core::error::SiteError;
use crate::core::state::AppState;
use crate::db::attendance;
use crate::models::attendance::MemberActivity;
use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Data a purely informational page would hand to its template.
#[derive(Debug, Serialize)]
pub struct StaticPage {
    pub page: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MembersPage {
    pub users: Vec<MemberActivity>,
}

/// GET / (calendar events are out of scope, so the index carries no data)
pub async fn index_handler() -> Json<StaticPage> {
    Json(StaticPage {
        page: "index",
        title: "Horsham Coder Dojo",
    })
}

/// GET /subscribe
pub async fn subscribe_handler() -> Json<StaticPage> {
    Json(StaticPage {
        page: "subscribe",
        title: "Subscribe",
    })
}

/// GET /contact-us
pub async fn contact_us_handler() -> Json<StaticPage> {
    Json(StaticPage {
        page: "contact-us",
        title: "Contact Us",
    })
}

/// GET /faq
pub async fn faq_handler() -> Json<StaticPage> {
    Json(StaticPage {
        page: "faq",
        title: "FAQ",
    })
}

/// GET /resources
pub async fn resources_handler() -> Json<StaticPage> {
    Json(StaticPage {
        page: "resources",
        title: "Resources",
    })
}

/// GET /members
///
/// Public member listing: the same joined activity records the register view
/// uses.
pub async fn members_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MembersPage>, SiteError> {
    let today = Utc::now().date_naive();
    let users = attendance::member_activity(&state.db, today).await?;

    Ok(Json(MembersPage { users }))
}
