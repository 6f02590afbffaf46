//! Authentication middleware
//!
//! Optional bearer-key protection for the API surface. With no key
//! configured every request passes, which keeps local development and
//! mock mode friction-free.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::server::AppState;

/// API key authentication middleware for `/api` routes
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()));

    if api_key_matches(provided.as_deref(), state.config.api.key.as_deref()) {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

/// Key comparison: no configured key allows everything.
fn api_key_matches(provided: Option<&str>, expected: Option<&str>) -> bool {
    match (provided, expected) {
        (_, None) => true,
        (Some(p), Some(e)) => p == e,
        (None, Some(_)) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_matches_without_configured_key() {
        assert!(api_key_matches(None, None));
        assert!(api_key_matches(Some("any"), None));
    }

    #[test]
    fn test_api_key_matches_with_configured_key() {
        assert!(!api_key_matches(None, Some("secret")));
        assert!(!api_key_matches(Some("wrong"), Some("secret")));
        assert!(api_key_matches(Some("secret"), Some("secret")));
    }
}
