use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Uniform envelope returned by every business endpoint. The HTTP status
/// mirrors the `status` field; business failures (404/400/401 outcomes)
/// travel inside the envelope with `success = false` and `data = null`.
#[derive(Debug, Serialize)]
pub struct ServiceReturn<T> {
    pub status: u16,
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ServiceReturn<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 201,
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceReturn<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_envelope_carries_data() {
        let envelope = ServiceReturn::created("Order placed successfully", 42);
        assert_eq!(envelope.status, 201);
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(42));
    }

    #[test]
    fn failure_envelope_has_no_data() {
        let envelope = ServiceReturn::<()>::failure(404, "Order not found");
        assert_eq!(envelope.status, 404);
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn envelope_status_becomes_http_status() {
        let response = ServiceReturn::ok("ok", "payload").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = ServiceReturn::<()>::failure(401, "nope").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn failure_serializes_data_as_null() {
        let envelope = ServiceReturn::<String>::failure(400, "Account blocked");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], 400);
    }
}
