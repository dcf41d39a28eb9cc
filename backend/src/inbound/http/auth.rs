//! Bearer-token authentication for HTTP handlers.
//!
//! Handlers take [`AuthenticatedAccount`] as an extractor argument; the
//! token is verified before the handler body runs, so an invalid, expired,
//! or missing token rejects the request with `401` up front.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::Error;
use crate::domain::token::Claims;
use crate::inbound::http::state::HttpState;

/// Verified claims of the requesting account.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub Claims);

impl FromRequest for AuthenticatedAccount {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedAccount, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state missing"))?;
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let raw = header_value
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("expected bearer token"))?;

    state
        .signer
        .verify(token)
        .map(AuthenticatedAccount)
        .map_err(|verify_error| {
            warn!(error = %verify_error, "bearer token rejected");
            Error::unauthorized("invalid or expired token")
        })
}
