//! Primary records and the reference data they are joined with.
//!
//! Field names mirror the wire contract of the records and reference
//! services (`_id`, `animalID`, `staffID`), so these types deserialise the
//! service payloads directly and serialise rows the presentation layer can
//! render without renaming.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::dates;

/// Animal reference datum resolved during aggregation. Immutable here; the
/// animal store owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub animal_name: String,
}

/// Staff reference datum resolved during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub last_name: String,
    pub first_name: String,
}

impl StaffRef {
    /// Display name in the fixed `"<lastName>, <firstName>"` form.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// A record type the aggregator can join against animal and staff references.
pub trait PrimaryRecord: Clone + Send + Sync {
    /// Foreign reference to the animal store.
    fn animal_id(&self) -> &str;
    /// Foreign reference to the staff store.
    fn staff_id(&self) -> &str;
}

/// Health report as served by the records service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "animalID")]
    pub animal_id: String,
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub health_description: String,
    #[serde(with = "dates::display_date")]
    #[schema(value_type = String, example = "05 Mar 2024")]
    pub next_checkup_date: NaiveDate,
    pub medication: String,
    pub vaccine_status: String,
}

impl PrimaryRecord for HealthReport {
    fn animal_id(&self) -> &str {
        &self.animal_id
    }

    fn staff_id(&self) -> &str {
        &self.staff_id
    }
}

/// Observation task as served by the records service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObservationTask {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "animalID")]
    pub animal_id: String,
    #[serde(rename = "staffID")]
    pub staff_id: String,
    pub report_description: String,
    #[serde(with = "dates::display_date")]
    #[schema(value_type = String, example = "05 Mar 2024")]
    pub date_reported: NaiveDate,
}

impl PrimaryRecord for ObservationTask {
    fn animal_id(&self) -> &str {
        &self.animal_id
    }

    fn staff_id(&self) -> &str {
        &self.staff_id
    }
}

/// A primary record enriched with resolved display names.
///
/// ## Invariants
/// - Exists only when both references resolved; partial joins are dropped by
///   the aggregator, never rendered with placeholders.
/// - `index` is the record's 1-based position in the aggregation input. It is
///   positional display state, recomputed on every refresh and never
///   persisted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRow<R> {
    #[serde(rename = "id")]
    pub index: usize,
    pub animal_name: String,
    pub staff_name: String,
    #[serde(flatten)]
    pub record: R,
}
