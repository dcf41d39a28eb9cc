//! Joined report endpoints.
//!
//! Each view fetches the primary records from the registry, joins animal
//! and staff names onto them, and optionally narrows the rows to animals
//! whose name contains the `animal` query parameter.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::domain::ports::ReferenceLookupError;
use crate::domain::records::{HealthReport, JoinedRow, ObservationTask, PrimaryRecord};
use crate::domain::search::{build_index, search};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;

/// Optional animal-name filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AnimalQuery {
    /// Case-insensitive substring matched against the joined animal name.
    pub animal: Option<String>,
}

fn batch_error(source: ReferenceLookupError) -> Error {
    tracing::error!(error = %source, "registry batch fetch failed");
    Error::internal("registry unavailable")
}

async fn joined<R>(
    state: &HttpState,
    records: Vec<R>,
    query: &AnimalQuery,
) -> Vec<JoinedRow<R>>
where
    R: PrimaryRecord,
{
    let rows = state.aggregator.aggregate(records).await;
    match query.animal.as_deref() {
        Some(needle) if !needle.is_empty() => search(&rows, needle),
        _ => rows,
    }
}

/// Health reports joined with animal and staff names.
#[utoipa::path(
    get,
    path = "/medical-history/view",
    params(AnimalQuery),
    responses(
        (status = 200, description = "Joined health-report rows", body = [JoinedRow<HealthReport>]),
        (status = 500, description = "Registry unavailable"),
    ),
    tag = "medical-history"
)]
#[get("/medical-history/view")]
pub async fn medical_history(
    state: web::Data<HttpState>,
    query: web::Query<AnimalQuery>,
) -> ApiResult<HttpResponse> {
    let records = state.records.health_reports().await.map_err(batch_error)?;
    let rows = joined(&state, records, &query).await;
    Ok(HttpResponse::Ok().json(rows))
}

/// Distinct lower-cased animal names across all health reports.
///
/// Feeds the search box's suggestion list, so the set reflects joined rows
/// only; reports whose animal could not be resolved contribute nothing.
#[utoipa::path(
    get,
    path = "/medical-history/names",
    responses(
        (status = 200, description = "Sorted distinct animal names", body = [String]),
        (status = 500, description = "Registry unavailable"),
    ),
    tag = "medical-history"
)]
#[get("/medical-history/names")]
pub async fn medical_history_names(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state.records.health_reports().await.map_err(batch_error)?;
    let rows = state.aggregator.aggregate(records).await;
    Ok(HttpResponse::Ok().json(build_index(&rows)))
}

/// Observation tasks joined with animal and staff names.
#[utoipa::path(
    get,
    path = "/observation-report/view",
    params(AnimalQuery),
    responses(
        (status = 200, description = "Joined observation-task rows", body = [JoinedRow<ObservationTask>]),
        (status = 500, description = "Registry unavailable"),
    ),
    tag = "observation-reports"
)]
#[get("/observation-report/view")]
pub async fn observation_reports(
    state: web::Data<HttpState>,
    query: web::Query<AnimalQuery>,
) -> ApiResult<HttpResponse> {
    let records = state
        .records
        .observation_tasks()
        .await
        .map_err(batch_error)?;
    let rows = joined(&state, records, &query).await;
    Ok(HttpResponse::Ok().json(rows))
}
