use crate::core::error::SiteError;
use crate::core::state::AppState;
use crate::db::attendance;
use crate::models::attendance::{Dashboard, MemberActivity};
use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct RegisterPage {
    pub users: Vec<MemberActivity>,
}

/// GET /mentor
///
/// Dashboard data: the member-activity join bucketed by user type, plus the
/// attendance leaderboard, fetched concurrently. On storage failure the
/// dashboard degrades to an empty render with the error logged.
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    let today = Utc::now().date_naive();

    let dashboard = match tokio::try_join!(
        attendance::member_activity(&state.db, today),
        attendance::top_scores(&state.db),
    ) {
        Ok((activity, top_scores)) => Dashboard {
            attendance: attendance::bucket_by_type(&activity),
            top_scores,
        },
        Err(err) => {
            error!(error = %err, "Error getting attendance data, rendering empty dashboard");
            Dashboard::default()
        }
    };

    Json(dashboard)
}

/// GET /mentor/register
///
/// The member-activity listing for the register view. Unlike the dashboard
/// this surfaces storage failures as the typed user-safe error.
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RegisterPage>, SiteError> {
    let today = Utc::now().date_naive();
    let users = attendance::member_activity(&state.db, today).await?;

    Ok(Json(RegisterPage { users }))
}
