//! The uniform response envelope.
//!
//! Every API response, success or error, is wrapped in
//! `{status, message, data}`. Handlers build responses through
//! [`ApiResponse`] so the shape never drifts between modules.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

pub struct ApiResponse;

impl ApiResponse {
    /// A `200 OK` success envelope.
    pub fn success<T: Serialize>(data: T, message: &str) -> Response {
        Self::success_with_status(data, message, StatusCode::OK)
    }

    pub fn success_with_status<T: Serialize>(
        data: T,
        message: &str,
        status: StatusCode,
    ) -> Response {
        let body = Json(json!({
            "status": "success",
            "message": message,
            "data": data
        }));
        (status, body).into_response()
    }

    /// An error envelope. `data` is usually `Value::Null` or an empty array,
    /// mirroring whichever the endpoint historically returned.
    pub fn error<T: Serialize>(data: T, message: &str, status: StatusCode) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": message,
            "data": data
        }));
        (status, body).into_response()
    }
}
