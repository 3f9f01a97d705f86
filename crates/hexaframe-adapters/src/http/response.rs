//! Wire-level response produced by an endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl JsonResponse {
    pub const fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// 200 response for a mapped use-case output.
    ///
    /// Objects are sent verbatim; anything else is wrapped as
    /// `{"data": value}`.
    pub fn success(mapped: Value) -> Self {
        let body = match mapped {
            Value::Object(map) => Value::Object(map),
            other => {
                let mut wrapped = Map::new();
                wrapped.insert("data".into(), other);
                Value::Object(wrapped)
            }
        };
        Self::new(StatusCode::OK, body)
    }
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
