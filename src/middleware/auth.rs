use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::db::models::UserRole;

/// Identity verified by the upstream gateway. The gateway terminates the JWT
/// and forwards the claims as headers; this service trusts them as-is.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
        };

        let id = header("x-user-id")
            .ok_or(AuthError::MissingIdentity)?
            .parse::<Uuid>()
            .map_err(|_| AuthError::MalformedUserId)?;

        let email = header("x-user-email")
            .ok_or(AuthError::MissingIdentity)?
            .to_string();

        let role = match header("x-user-role").ok_or(AuthError::MissingIdentity)? {
            "ADMIN" => UserRole::Admin,
            "VENDOR" => UserRole::Vendor,
            "CUSTOMER" => UserRole::Customer,
            _ => return Err(AuthError::UnknownRole),
        };

        Ok(AuthUser { id, email, role })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingIdentity,
    MalformedUserId,
    UnknownRole,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingIdentity => {
                (StatusCode::UNAUTHORIZED, "Missing identity headers")
            }
            AuthError::MalformedUserId => {
                (StatusCode::UNAUTHORIZED, "Malformed x-user-id header")
            }
            AuthError::UnknownRole => (StatusCode::UNAUTHORIZED, "Unknown x-user-role header"),
        };

        tracing::warn!("Request authentication failed: {:?}", self);
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(builder: axum::http::request::Builder) -> Result<AuthUser, AuthError> {
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_verified_identity() {
        let id = Uuid::new_v4();
        let user = extract(
            Request::builder()
                .header("x-user-id", id.to_string())
                .header("x-user-email", "buyer@example.com")
                .header("x-user-role", "CUSTOMER"),
        )
        .await
        .expect("identity should extract");

        assert_eq!(user.id, id);
        assert_eq!(user.email, "buyer@example.com");
        assert_eq!(user.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn rejects_missing_headers() {
        let result = extract(Request::builder()).await;
        assert!(matches!(result, Err(AuthError::MissingIdentity)));
    }

    #[tokio::test]
    async fn rejects_malformed_user_id() {
        let result = extract(
            Request::builder()
                .header("x-user-id", "not-a-uuid")
                .header("x-user-email", "buyer@example.com")
                .header("x-user-role", "CUSTOMER"),
        )
        .await;
        assert!(matches!(result, Err(AuthError::MalformedUserId)));
    }

    #[tokio::test]
    async fn rejects_unknown_role() {
        let result = extract(
            Request::builder()
                .header("x-user-id", Uuid::new_v4().to_string())
                .header("x-user-email", "buyer@example.com")
                .header("x-user-role", "SUPERUSER"),
        )
        .await;
        assert!(matches!(result, Err(AuthError::UnknownRole)));
    }
}
