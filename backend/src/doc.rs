//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the admin API. It
//! registers every HTTP endpoint, the account and joined-row schemas, and
//! the bearer-token security scheme. The document is served from
//! `GET /api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::records::{HealthReport, JoinedRow, ObservationTask};
use crate::domain::{Account, Error, ErrorCode};
use crate::inbound::http::users::{ChangePasswordRequest, EditProfileRequest, RegisterRequest};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /user/register."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the admin API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Zoo admin backend API",
        description = "Staff accounts plus joined medical-history and observation views.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::profile,
        crate::inbound::http::users::list,
        crate::inbound::http::users::view,
        crate::inbound::http::users::edit,
        crate::inbound::http::users::change_password,
        crate::inbound::http::reports::medical_history,
        crate::inbound::http::reports::medical_history_names,
        crate::inbound::http::reports::observation_reports,
    ),
    components(schemas(
        Account,
        RegisterRequest,
        EditProfileRequest,
        ChangePasswordRequest,
        JoinedRow<HealthReport>,
        JoinedRow<ObservationTask>,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "accounts", description = "Staff account registration and upkeep"),
        (name = "medical-history", description = "Health reports joined with reference names"),
        (name = "observation-reports", description = "Observation tasks joined with reference names")
    )
)]
pub struct ApiDoc;
