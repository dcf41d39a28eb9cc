//! Middleware attaching a request-scoped correlation identifier.
//!
//! Each incoming request receives a UUID stored in task-local storage for
//! correlation across logs and error responses, echoed back in a
//! `Request-Id` response header.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`CorrelationId::scope`] when spawning new tasks to keep the active
//! identifier in scope.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::future::Future;
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

task_local! {
    static CORRELATION_ID: CorrelationId;
}

/// Response header carrying the correlation identifier.
pub const REQUEST_ID_HEADER: &str = "request-id";

/// Per-request correlation identifier exposed via task-local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the current identifier if one is in scope.
    pub fn current() -> Option<Self> {
        CORRELATION_ID.try_with(|id| *id).ok()
    }

    /// Execute the provided future with the supplied identifier in scope.
    pub async fn scope<Fut>(id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CORRELATION_ID.scope(id, fut).await
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Middleware placing a [`CorrelationId`] in scope for every request and
/// adding the `Request-Id` header to the response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use zooadmin::Correlate;
///
/// let app = App::new().wrap(Correlate);
/// ```
#[derive(Clone)]
pub struct Correlate;

impl<S, B> Transform<S, ServiceRequest> for Correlate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelateMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlate`].
pub struct CorrelateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = CorrelationId::generate();
        let fut = self.service.call(req);
        Box::pin(CorrelationId::scope(id, async move {
            let mut res = fut.await?;
            stamp_response(res.response_mut().headers_mut(), id);
            Ok(res)
        }))
    }
}

/// Write the identifier into the response headers.
///
/// UUID text is always a valid header value; a failure here means the
/// identifier changed shape, so it is logged rather than bubbled up.
fn stamp_response(headers: &mut HeaderMap, id: CorrelationId) {
    match HeaderValue::from_str(&id.to_string()) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        Err(encode_error) => {
            error!(
                error = %encode_error,
                request_id = %id,
                "failed to encode request id header"
            );
        }
    }
}
