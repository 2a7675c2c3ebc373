use crate::core::error::SiteError;
use axum::response::Response;

/// 404 for anything the router doesn't know.
pub async fn fallback_handler() -> Response {
    use axum::response::IntoResponse;

    SiteError::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_fallback_returns_404() {
        let response = fallback_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
