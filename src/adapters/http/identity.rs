//! Authenticated identity extraction.
//!
//! The external identity provider fronts this service and attaches the
//! resolved identity to every authorized request as `X-User-Id` and
//! `X-User-Role` headers. The core trusts these unconditionally; requests
//! without them are rejected before any handler runs.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::domain::access::Role;
use crate::domain::foundation::UserId;

use super::error::ErrorResponse;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Header carrying the authenticated role.
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// Authenticated requester identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<UserId>().ok())
                .ok_or(AuthenticationRequired)?;

            let role = parts
                .headers
                .get(USER_ROLE_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<Role>().ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { user_id, role })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    async fn extract(id: Option<&str>, role: Option<&str>) -> Result<AuthenticatedUser, ()> {
        let mut builder = Request::builder().uri("/");
        if let Some(id) = id {
            builder = builder.header(USER_ID_HEADER, id);
        }
        if let Some(role) = role {
            builder = builder.header(USER_ROLE_HEADER, role);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .map_err(|_| ())
    }

    #[tokio::test]
    async fn valid_headers_extract_identity() {
        let id = UserId::new().to_string();
        let user = extract(Some(&id), Some("admin")).await.unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.user_id.to_string(), id);
    }

    #[tokio::test]
    async fn missing_id_is_rejected() {
        assert!(extract(None, Some("user")).await.is_err());
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        assert!(extract(Some("not-a-uuid"), Some("user")).await.is_err());
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let id = UserId::new().to_string();
        assert!(extract(Some(&id), Some("superuser")).await.is_err());
    }
}
