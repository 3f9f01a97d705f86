//! HTTP transport adapter (axum).
//!
//! Binds a use case to a route: the request payload goes through the input
//! parser, the use case runs, and the outcome becomes a [`JsonResponse`]:
//!
//! - `Ok`: the mapped output, verbatim when it is an object, otherwise
//!   `{"data": value}`, with status 200.
//! - `Err`: `{"error": {"code", "message", "details"}}` with the status from
//!   the [`ErrorTable`] (or a custom error mapper).

mod endpoint;
mod error_mapping;
mod response;

pub use endpoint::{
    AdapterError, Endpoint, EndpointBuilder, ErrorMapper, InputParser, Method, OutputMapper,
    Payload, UseCaseFactory, UseCaseHandle, build_router,
};
pub use error_mapping::{
    ErrorBody, ErrorEnvelope, ErrorMapping, ErrorMatch, ErrorTable, default_error_mapper,
};
pub use response::JsonResponse;
