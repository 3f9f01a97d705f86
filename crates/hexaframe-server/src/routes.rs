//! Route table for the demo server.

use std::{any::Any, sync::Arc};

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hexaframe_adapters::http::{
    AdapterError, Endpoint, ErrorBody, ErrorEnvelope, UseCaseHandle, build_router,
};
use hexaframe_core::ports::{ClockPort, LoggerPort, UuidPort};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

use crate::use_cases::{AddOne, AsyncAddOne, CurrentTime};

/// Ports shared by the routes.
#[derive(Clone)]
pub struct Ports {
    pub clock: Arc<dyn ClockPort>,
    pub ids: Arc<dyn UuidPort>,
    pub logger: Arc<dyn LoggerPort>,
}

pub fn router(ports: &Ports) -> Result<Router, AdapterError> {
    let add_one = Endpoint::builder("/add-one", "post")
        .use_case(UseCaseHandle::blocking(AddOne))
        .build()?
        .into_router();

    let logger = Arc::clone(&ports.logger);
    let add_one_async = Endpoint::builder("/add-one/async", "post")
        .use_case_factory(move || UseCaseHandle::suspending(AsyncAddOne::new(Arc::clone(&logger))))
        .build()?
        .into_router();

    let time = Endpoint::builder("/time", "get")
        .use_case(UseCaseHandle::blocking(CurrentTime::new(
            Arc::clone(&ports.clock),
            Arc::clone(&ports.ids),
        )))
        .input_parser(|_| Ok(()))
        .build()?
        .into_router();

    Ok(with_defect_handling(build_router([
        add_one,
        add_one_async,
        time,
    ])))
}

/// Panics inside a use case become an opaque 500 instead of a dropped
/// connection. The panic payload is logged, never sent to the client.
pub fn with_defect_handling(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(defect_response))
        .layer(TraceLayer::new_for_http())
}

fn defect_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "Use case panicked");

    let envelope = ErrorEnvelope {
        error: ErrorBody {
            code: "internal_error".into(),
            message: "Internal server error".into(),
            details: None,
        },
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}
