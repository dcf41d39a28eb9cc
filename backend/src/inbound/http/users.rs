//! Account endpoints.
//!
//! Registration and password changes respond with plain-text bodies; the
//! admin front end displays them verbatim. Profile reads return the account
//! document without its password hash.

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::account::{ProfileUpdate, Registration};
use crate::inbound::http::auth::AuthenticatedAccount;
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration payload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub contact: String,
    pub username: String,
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            last_name: request.last_name,
            first_name: request.first_name,
            email: request.email,
            contact: request.contact,
            username: request.username,
            password: Zeroizing::new(request.password),
        }
    }
}

/// Profile edit payload. Absent fields are left untouched.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditProfileRequest {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub contact_num: Option<String>,
    pub username: Option<String>,
}

impl From<EditProfileRequest> for ProfileUpdate {
    fn from(request: EditProfileRequest) -> Self {
        Self {
            last_name: request.last_name,
            first_name: request.first_name,
            email: request.email,
            contact_num: request.contact_num,
            username: request.username,
        }
    }
}

/// Password change payload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[schema(value_type = String)]
    pub new_password: Zeroizing<String>,
}

/// Register a staff account and return a session token.
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created; body is the session token", body = String),
        (status = 400, description = "Email already registered"),
        (status = 500, description = "Registration failed"),
    ),
    tag = "accounts"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let token = state.credentials.register(body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().body(token))
}

/// Profile of the authenticated account.
#[utoipa::path(
    get,
    path = "/user/",
    responses(
        (status = 200, description = "Account behind the bearer token", body = crate::domain::Account),
        (status = 401, description = "Missing, invalid, or expired token"),
    ),
    security(("bearer_token" = [])),
    tag = "accounts"
)]
#[get("/")]
pub async fn profile(
    state: web::Data<HttpState>,
    auth: AuthenticatedAccount,
) -> ApiResult<HttpResponse> {
    let account = state.credentials.profile(auth.0.account_id).await?;
    Ok(HttpResponse::Ok().json(account))
}

/// All staff accounts, ordered by staff number.
#[utoipa::path(
    get,
    path = "/user/view",
    responses(
        (status = 200, description = "Registered accounts", body = [crate::domain::Account]),
    ),
    tag = "accounts"
)]
#[get("/view")]
pub async fn list(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let accounts = state.credentials.list_accounts().await?;
    Ok(HttpResponse::Ok().json(accounts))
}

/// A single staff account by identifier.
#[utoipa::path(
    get,
    path = "/user/view/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Matching account", body = crate::domain::Account),
        (status = 404, description = "No account with that identifier"),
    ),
    tag = "accounts"
)]
#[get("/view/{id}")]
pub async fn view(state: web::Data<HttpState>, id: web::Path<Uuid>) -> ApiResult<HttpResponse> {
    let account = state.credentials.account(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(account))
}

/// Update profile fields on an account.
#[utoipa::path(
    put,
    path = "/user/edit/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = String),
        (status = 404, description = "No account with that identifier"),
    ),
    tag = "accounts"
)]
#[put("/edit/{id}")]
pub async fn edit(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    body: web::Json<EditProfileRequest>,
) -> ApiResult<HttpResponse> {
    state
        .credentials
        .edit_profile(id.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().body("Account updated successfully"))
}

/// Replace an account's password.
#[utoipa::path(
    put,
    path = "/user/change-password/{id}",
    params(("id" = Uuid, Path, description = "Account identifier")),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = String),
        (status = 404, description = "No account with that identifier"),
    ),
    tag = "accounts"
)]
#[put("/change-password/{id}")]
pub async fn change_password(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    body: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    state
        .credentials
        .change_password(id.into_inner(), request.new_password)
        .await?;
    Ok(HttpResponse::Ok().body("Password changed successfully"))
}
