//! HTTP adapter.
//!
//! Routes, extractors, state, and the error envelope for the admin API.
//! Handlers stay thin; domain services behind [`state::HttpState`] carry the
//! behaviour.

pub mod auth;
pub mod error;
pub mod reports;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;
use utoipa::OpenApi as _;

use crate::doc::ApiDoc;

pub use error::ApiResult;
pub use state::HttpState;

async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

/// Register every route on the service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json))
        .service(
            web::scope("/user")
                .service(users::register)
                .service(users::profile)
                .service(users::list)
                .service(users::view)
                .service(users::edit)
                .service(users::change_password),
        )
        .service(reports::medical_history)
        .service(reports::medical_history_names)
        .service(reports::observation_reports);
}
