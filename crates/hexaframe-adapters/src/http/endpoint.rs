//! Binding a use case to an HTTP route.
//!
//! ```rust,no_run
//! use hexaframe_adapters::http::{Endpoint, Payload, UseCaseHandle};
//! use hexaframe_core::prelude::*;
//!
//! struct Echo;
//!
//! impl UseCase for Echo {
//!     type Input = Payload;
//!     type Output = Payload;
//!
//!     fn perform(&self, input: Payload) -> HexaResult<Payload> {
//!         Ok(input)
//!     }
//! }
//!
//! let router: axum::Router = Endpoint::builder("/echo", "post")
//!     .use_case(UseCaseHandle::blocking(Echo))
//!     .build()?
//!     .into_router();
//! # Ok::<(), hexaframe_adapters::http::AdapterError>(())
//! ```

use std::{fmt, str::FromStr, sync::Arc};

use axum::{Router, body::Bytes, routing::MethodFilter};
use hexaframe_core::{
    error::{HexaError, HexaResult},
    outcome::Outcome,
    serialize::ToSerializable,
    use_case::{AsyncUseCase, UseCase, UseCaseOutcome},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, instrument};

use super::{JsonResponse, default_error_mapper};

/// Generic key/value request payload.
pub type Payload = Map<String, Value>;

/// Converts the request payload into the use-case input.
pub type InputParser<I> = Arc<dyn Fn(Payload) -> HexaResult<I> + Send + Sync>;

/// Converts the use-case output into a JSON value.
pub type OutputMapper<O> = Arc<dyn Fn(O) -> HexaResult<Value> + Send + Sync>;

/// Converts a failure into a response.
pub type ErrorMapper = Arc<dyn Fn(&HexaError) -> JsonResponse + Send + Sync>;

/// Produces a fresh use case per request.
pub type UseCaseFactory<I, O> = Arc<dyn Fn() -> UseCaseHandle<I, O> + Send + Sync>;

/// Configuration errors, raised by [`EndpointBuilder::build`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Provide exactly one of 'use_case' or 'use_case_factory' (got neither)")]
    MissingUseCase,

    #[error("Provide exactly one of 'use_case' or 'use_case_factory' (got both)")]
    ConflictingUseCase,

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Route path must start with '/': {0:?}")]
    InvalidPath(String),
}

// ============================================================================
// Method
// ============================================================================

/// Supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    const fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
            Self::Put => MethodFilter::PUT,
            Self::Patch => MethodFilter::PATCH,
            Self::Delete => MethodFilter::DELETE,
        }
    }
}

impl FromStr for Method {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(AdapterError::UnsupportedMethod(s.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Use-case handle
// ============================================================================

/// A blocking or suspend-capable use case behind a shared pointer.
///
/// Instance state is shared by every request that uses the same handle and
/// is not synchronised by the adapter; prefer a factory for stateful use
/// cases.
pub enum UseCaseHandle<I, O> {
    Blocking(Arc<dyn UseCase<Input = I, Output = O>>),
    Suspending(Arc<dyn AsyncUseCase<Input = I, Output = O>>),
}

impl<I, O> Clone for UseCaseHandle<I, O> {
    fn clone(&self) -> Self {
        match self {
            Self::Blocking(uc) => Self::Blocking(Arc::clone(uc)),
            Self::Suspending(uc) => Self::Suspending(Arc::clone(uc)),
        }
    }
}

impl<I, O> fmt::Debug for UseCaseHandle<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocking(_) => f.write_str("UseCaseHandle::Blocking"),
            Self::Suspending(_) => f.write_str("UseCaseHandle::Suspending"),
        }
    }
}

impl<I, O> UseCaseHandle<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    pub fn blocking<U>(use_case: U) -> Self
    where
        U: UseCase<Input = I, Output = O> + 'static,
    {
        Self::Blocking(Arc::new(use_case))
    }

    pub fn suspending<U>(use_case: U) -> Self
    where
        U: AsyncUseCase<Input = I, Output = O> + 'static,
    {
        Self::Suspending(Arc::new(use_case))
    }

    /// Run the lifecycle, awaiting only for suspend-capable use cases.
    pub async fn execute(&self, input: I) -> UseCaseOutcome<O> {
        match self {
            Self::Blocking(uc) => uc.execute(input),
            Self::Suspending(uc) => uc.execute(input).await,
        }
    }
}

enum UseCaseSource<I, O> {
    Instance(UseCaseHandle<I, O>),
    Factory(UseCaseFactory<I, O>),
}

// ============================================================================
// Builder
// ============================================================================

/// Collects endpoint configuration; validated by [`build`](Self::build).
pub struct EndpointBuilder<I, O> {
    path: String,
    method: String,
    use_case: Option<UseCaseHandle<I, O>>,
    factory: Option<UseCaseFactory<I, O>>,
    input_parser: Option<InputParser<I>>,
    output_mapper: Option<OutputMapper<O>>,
    error_mapper: Option<ErrorMapper>,
}

impl<I, O> EndpointBuilder<I, O>
where
    I: DeserializeOwned + Send + Sync + 'static,
    O: Serialize + Send + Sync + 'static,
{
    /// Share one use-case instance across all requests.
    #[must_use]
    pub fn use_case(mut self, handle: UseCaseHandle<I, O>) -> Self {
        self.use_case = Some(handle);
        self
    }

    /// Create a fresh use case for every request.
    #[must_use]
    pub fn use_case_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> UseCaseHandle<I, O> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Defaults to deserializing the payload object into `I`.
    #[must_use]
    pub fn input_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(Payload) -> HexaResult<I> + Send + Sync + 'static,
    {
        self.input_parser = Some(Arc::new(parser));
        self
    }

    /// Defaults to [`ToSerializable`].
    #[must_use]
    pub fn output_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(O) -> HexaResult<Value> + Send + Sync + 'static,
    {
        self.output_mapper = Some(Arc::new(mapper));
        self
    }

    /// Defaults to [`default_error_mapper`].
    #[must_use]
    pub fn error_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&HexaError) -> JsonResponse + Send + Sync + 'static,
    {
        self.error_mapper = Some(Arc::new(mapper));
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// [`AdapterError`] if the method is unsupported, the path is not
    /// absolute, or not exactly one of `use_case` / `use_case_factory` was
    /// given.
    pub fn build(self) -> Result<Endpoint<I, O>, AdapterError> {
        let source = match (self.use_case, self.factory) {
            (Some(handle), None) => UseCaseSource::Instance(handle),
            (None, Some(factory)) => UseCaseSource::Factory(factory),
            (None, None) => return Err(AdapterError::MissingUseCase),
            (Some(_), Some(_)) => return Err(AdapterError::ConflictingUseCase),
        };

        let method: Method = self.method.parse()?;

        if !self.path.starts_with('/') {
            return Err(AdapterError::InvalidPath(self.path));
        }

        let input_parser: InputParser<I> = match self.input_parser {
            Some(parser) => parser,
            None => Arc::new(deserialize_payload::<I>),
        };
        let output_mapper: OutputMapper<O> = match self.output_mapper {
            Some(mapper) => mapper,
            None => Arc::new(|output: O| output.to_serializable()),
        };
        let error_mapper: ErrorMapper = match self.error_mapper {
            Some(mapper) => mapper,
            None => Arc::new(default_error_mapper),
        };

        Ok(Endpoint {
            path: self.path,
            method,
            source,
            input_parser,
            output_mapper,
            error_mapper,
        })
    }
}

fn deserialize_payload<I: DeserializeOwned>(payload: Payload) -> HexaResult<I> {
    serde_json::from_value(Value::Object(payload)).map_err(|e| {
        HexaError::validation("request payload does not match the expected input")
            .with_detail("reason", e.to_string())
    })
}

// ============================================================================
// Endpoint
// ============================================================================

/// A validated route: parses the payload, runs the use case and maps the
/// outcome to a [`JsonResponse`].
pub struct Endpoint<I, O> {
    path: String,
    method: Method,
    source: UseCaseSource<I, O>,
    input_parser: InputParser<I>,
    output_mapper: OutputMapper<O>,
    error_mapper: ErrorMapper,
}

impl<I, O> Clone for Endpoint<I, O> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            method: self.method,
            source: match &self.source {
                UseCaseSource::Instance(handle) => UseCaseSource::Instance(handle.clone()),
                UseCaseSource::Factory(factory) => UseCaseSource::Factory(Arc::clone(factory)),
            },
            input_parser: Arc::clone(&self.input_parser),
            output_mapper: Arc::clone(&self.output_mapper),
            error_mapper: Arc::clone(&self.error_mapper),
        }
    }
}

impl<I, O> fmt::Debug for Endpoint<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

impl<I, O> Endpoint<I, O> {
    /// Start configuring an endpoint. `method` is validated by `build`.
    pub fn builder(path: impl Into<String>, method: impl Into<String>) -> EndpointBuilder<I, O> {
        EndpointBuilder {
            path: path.into(),
            method: method.into(),
            use_case: None,
            factory: None,
            input_parser: None,
            output_mapper: None,
            error_mapper: None,
        }
    }
}

impl<I, O> Endpoint<I, O>
where
    I: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn method(&self) -> Method {
        self.method
    }

    fn resolve(&self) -> UseCaseHandle<I, O> {
        match &self.source {
            UseCaseSource::Instance(handle) => handle.clone(),
            UseCaseSource::Factory(factory) => factory(),
        }
    }

    /// Handle one request payload.
    #[instrument(skip_all, fields(method = %self.method, path = %self.path))]
    pub async fn handle(&self, payload: Payload) -> JsonResponse {
        let use_case = self.resolve();

        let input = match (self.input_parser)(payload) {
            Ok(input) => input,
            Err(err) => return self.fail(&err),
        };

        match use_case.execute(input).await {
            Outcome::Ok(output) => match (self.output_mapper)(output) {
                Ok(mapped) => JsonResponse::success(mapped),
                Err(err) => self.fail(&err),
            },
            Outcome::Err(err) => self.fail(&err),
        }
    }

    /// Handle a raw request body. An empty or `null` body is treated as `{}`.
    pub async fn handle_body(&self, body: &[u8]) -> JsonResponse {
        match parse_body(body) {
            Ok(payload) => self.handle(payload).await,
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&self, err: &HexaError) -> JsonResponse {
        let response = (self.error_mapper)(err);
        if response.status.is_server_error() {
            error!(status = %response.status, error = %err, "Request failed");
        } else {
            debug!(status = %response.status, error = %err, "Request rejected");
        }
        response
    }

    /// Register this endpoint on a fresh router.
    pub fn into_router<S>(self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let path = self.path.clone();
        let filter = self.method.filter();
        let endpoint = Arc::new(self);

        let handler = move |body: Bytes| {
            let endpoint = Arc::clone(&endpoint);
            async move { endpoint.handle_body(&body).await }
        };

        Router::new().route(&path, axum::routing::on(filter, handler))
    }
}

fn parse_body(body: &[u8]) -> HexaResult<Payload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }
    let not_an_object = |reason: String| {
        HexaError::validation("request body must be a JSON object").with_detail("reason", reason)
    };
    match serde_json::from_slice::<Value>(body).map_err(|e| not_an_object(e.to_string()))? {
        Value::Null => Ok(Payload::new()),
        Value::Object(map) => Ok(map),
        _ => Err(not_an_object("expected an object".into())),
    }
}

/// Merge several endpoint routers into one.
pub fn build_router<S, R>(routers: R) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    R: IntoIterator<Item = Router<S>>,
{
    routers.into_iter().fold(Router::new(), Router::merge)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::http::StatusCode;
    use hexaframe_core::async_trait;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    struct AddOne;

    impl UseCase for AddOne {
        type Input = Payload;
        type Output = Payload;

        fn validate(&self, input: &Payload) -> HexaResult<()> {
            match input.get("value") {
                None => Err(HexaError::validation("missing 'value'")),
                Some(v) if !v.is_i64() => Err(HexaError::validation("'value' must be int")),
                Some(_) => Ok(()),
            }
        }

        fn perform(&self, input: Payload) -> HexaResult<Payload> {
            let v = input.get("value").and_then(Value::as_i64).unwrap_or_default();
            if v == 41 {
                return Err(HexaError::conflict_with("no 42s allowed"));
            }
            let mut out = Payload::new();
            out.insert("result".into(), json!(v + 1));
            Ok(out)
        }
    }

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => Payload::new(),
        }
    }

    fn add_one() -> Endpoint<Payload, Payload> {
        Endpoint::builder("/add-one", "post")
            .use_case(UseCaseHandle::blocking(AddOne))
            .build()
            .unwrap()
    }

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("POST".parse::<Method>(), Ok(Method::Post));
        assert_eq!("delete".parse::<Method>(), Ok(Method::Delete));
        assert_eq!(
            "options".parse::<Method>(),
            Err(AdapterError::UnsupportedMethod("options".into()))
        );
    }

    #[test]
    fn build_requires_exactly_one_source() {
        let neither = Endpoint::<Payload, Payload>::builder("/x", "get").build();
        assert_eq!(neither.unwrap_err(), AdapterError::MissingUseCase);

        let both = Endpoint::builder("/x", "get")
            .use_case(UseCaseHandle::blocking(AddOne))
            .use_case_factory(|| UseCaseHandle::blocking(AddOne))
            .build();
        assert_eq!(both.unwrap_err(), AdapterError::ConflictingUseCase);
    }

    #[test]
    fn build_rejects_unsupported_method_and_relative_path() {
        let err = Endpoint::builder("/x", "head")
            .use_case(UseCaseHandle::blocking(AddOne))
            .build()
            .unwrap_err();
        assert_eq!(err, AdapterError::UnsupportedMethod("head".into()));

        let err = Endpoint::builder("x", "get")
            .use_case(UseCaseHandle::blocking(AddOne))
            .build()
            .unwrap_err();
        assert_eq!(err, AdapterError::InvalidPath("x".into()));
    }

    #[tokio::test]
    async fn success_body_is_verbatim() {
        let res = add_one().handle(payload(json!({"value": 1}))).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({"result": 2}));
    }

    #[tokio::test]
    async fn conflict_maps_to_409() {
        let res = add_one().handle(payload(json!({"value": 41}))).await;
        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(
            res.body,
            json!({"error": {"code": "conflict", "message": "no 42s allowed", "details": null}})
        );
    }

    #[tokio::test]
    async fn missing_field_maps_to_422() {
        let res = add_one().handle(Payload::new()).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn empty_and_malformed_bodies() {
        let res = add_one().handle_body(b"  ").await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["error"]["message"], "missing 'value'");

        let res = add_one().handle_body(b"[1, 2]").await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["error"]["message"], "request body must be a JSON object");
        assert_eq!(res.body["error"]["details"]["reason"], "expected an object");
    }

    #[tokio::test]
    async fn null_body_is_an_empty_payload() {
        assert_eq!(parse_body(b"null"), Ok(Payload::new()));
        assert_eq!(parse_body(b" null\n"), Ok(Payload::new()));

        let res = add_one().handle_body(b"null").await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body["error"]["message"], "missing 'value'");

        let res = add_one().handle_body(br#"{"value": 1}"#).await;
        assert_eq!(res.body, json!({"result": 2}));
    }

    #[derive(Deserialize)]
    struct Typed {
        value: i64,
    }

    struct Double;

    impl UseCase for Double {
        type Input = Typed;
        type Output = i64;

        fn perform(&self, input: Typed) -> HexaResult<i64> {
            Ok(input.value * 2)
        }
    }

    #[tokio::test]
    async fn default_parser_deserializes_and_scalars_are_wrapped() {
        let endpoint = Endpoint::builder("/double", "post")
            .use_case(UseCaseHandle::blocking(Double))
            .build()
            .unwrap();

        let res = endpoint.handle(payload(json!({"value": 21}))).await;
        assert_eq!(res.body, json!({"data": 42}));

        let res = endpoint.handle(payload(json!({"value": "x"}))).await;
        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.body["error"]["details"]["reason"].is_string());
    }

    #[tokio::test]
    async fn custom_parser_mapper_and_error_mapper() {
        let endpoint = Endpoint::builder("/double", "put")
            .use_case(UseCaseHandle::blocking(Double))
            .input_parser(|p: Payload| {
                let value = p
                    .get("n")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| HexaError::validation("n required"))?;
                Ok(Typed { value })
            })
            .output_mapper(|out: i64| Ok(json!({"doubled": out})))
            .error_mapper(|err| JsonResponse::new(StatusCode::IM_A_TEAPOT, json!({"oops": err.code()})))
            .build()
            .unwrap();

        let res = endpoint.handle(payload(json!({"n": 4}))).await;
        assert_eq!(res.body, json!({"doubled": 8}));

        let res = endpoint.handle(Payload::new()).await;
        assert_eq!(res.status, StatusCode::IM_A_TEAPOT);
        assert_eq!(res.body, json!({"oops": "validation_error"}));
    }

    #[tokio::test]
    async fn output_mapper_faults_go_through_error_mapper() {
        let endpoint = Endpoint::builder("/double", "post")
            .use_case(UseCaseHandle::blocking(Double))
            .output_mapper(|_| Err(HexaError::infra("serialization_error", "nope")))
            .build()
            .unwrap();
        let res = endpoint.handle(payload(json!({"value": 1}))).await;
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    static CREATED: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    #[async_trait]
    impl AsyncUseCase for Counted {
        type Input = Payload;
        type Output = usize;

        async fn perform(&self, _input: Payload) -> HexaResult<usize> {
            Ok(CREATED.load(Ordering::SeqCst))
        }
    }

    #[tokio::test]
    async fn factory_builds_a_fresh_use_case_per_request() {
        let endpoint = Endpoint::builder("/count", "get")
            .use_case_factory(|| {
                CREATED.fetch_add(1, Ordering::SeqCst);
                UseCaseHandle::suspending(Counted)
            })
            .build()
            .unwrap();

        let before = CREATED.load(Ordering::SeqCst);
        endpoint.handle(Payload::new()).await;
        endpoint.handle(Payload::new()).await;
        assert_eq!(CREATED.load(Ordering::SeqCst), before + 2);
    }
}
