//! Reqwest-backed client for the records and reference services.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain records. The services
//! store dates as ISO timestamps, so wire DTOs decode those and convert into
//! the domain types, which carry plain dates.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::ports::{RecordStore, ReferenceLookupError, ReferenceStore};
use crate::domain::records::{AnimalRef, HealthReport, ObservationTask, StaffRef};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client resolving animal/staff references and record listings.
pub struct RegistryHttpClient {
    client: Client,
    base: Url,
}

impl RegistryHttpClient {
    /// Build a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    ///
    /// Timeouts surface as ordinary lookup failures; the aggregator applies
    /// no timeout of its own.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    async fn get_json<T>(
        &self,
        path: &str,
        kind: &'static str,
        id: Option<&str>,
    ) -> Result<T, ReferenceLookupError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|join_error| ReferenceLookupError::transport(join_error.to_string()))?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND
            && let Some(missing) = id
        {
            return Err(ReferenceLookupError::not_found(kind, missing));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }

        serde_json::from_slice(&body).map_err(|decode_error| {
            ReferenceLookupError::decode(format!("invalid {kind} payload: {decode_error}"))
        })
    }
}

#[async_trait]
impl ReferenceStore for RegistryHttpClient {
    async fn animal(&self, id: &str) -> Result<AnimalRef, ReferenceLookupError> {
        self.get_json(&format!("animal/view/{id}"), "animal", Some(id))
            .await
    }

    async fn staff(&self, id: &str) -> Result<StaffRef, ReferenceLookupError> {
        self.get_json(&format!("user/view/{id}"), "staff", Some(id))
            .await
    }

    async fn list_animals(&self) -> Result<Vec<AnimalRef>, ReferenceLookupError> {
        self.get_json("animal/view", "animal list", None).await
    }

    async fn list_staff(&self) -> Result<Vec<StaffRef>, ReferenceLookupError> {
        self.get_json("user/view", "staff list", None).await
    }
}

#[async_trait]
impl RecordStore for RegistryHttpClient {
    async fn health_reports(&self) -> Result<Vec<HealthReport>, ReferenceLookupError> {
        let reports: Vec<HealthReportDto> = self
            .get_json("health-report/view", "health report list", None)
            .await?;
        Ok(reports.into_iter().map(HealthReportDto::into_domain).collect())
    }

    async fn observation_tasks(&self) -> Result<Vec<ObservationTask>, ReferenceLookupError> {
        let tasks: Vec<ObservationTaskDto> = self
            .get_json("observation-report/view", "observation report list", None)
            .await?;
        Ok(tasks.into_iter().map(ObservationTaskDto::into_domain).collect())
    }
}

/// Wire shape of a stored health report; dates arrive as ISO timestamps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthReportDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "animalID")]
    animal_id: String,
    #[serde(rename = "staffID")]
    staff_id: String,
    health_description: String,
    next_checkup_date: StoredDate,
    medication: String,
    vaccine_status: String,
}

impl HealthReportDto {
    fn into_domain(self) -> HealthReport {
        HealthReport {
            id: self.id,
            animal_id: self.animal_id,
            staff_id: self.staff_id,
            health_description: self.health_description,
            next_checkup_date: self.next_checkup_date.into_date(),
            medication: self.medication,
            vaccine_status: self.vaccine_status,
        }
    }
}

/// Wire shape of a stored observation task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationTaskDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "animalID")]
    animal_id: String,
    #[serde(rename = "staffID")]
    staff_id: String,
    report_description: String,
    date_reported: StoredDate,
}

impl ObservationTaskDto {
    fn into_domain(self) -> ObservationTask {
        ObservationTask {
            id: self.id,
            animal_id: self.animal_id,
            staff_id: self.staff_id,
            report_description: self.report_description,
            date_reported: self.date_reported.into_date(),
        }
    }
}

/// Stored dates are either full ISO timestamps or bare dates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDate {
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
}

impl StoredDate {
    fn into_date(self) -> NaiveDate {
        match self {
            Self::Timestamp(timestamp) => timestamp.date_naive(),
            Self::Date(date) => date,
        }
    }
}

fn map_transport_error(transport_error: reqwest::Error) -> ReferenceLookupError {
    ReferenceLookupError::transport(transport_error.to_string())
}

fn status_error(status: StatusCode, body: &[u8]) -> ReferenceLookupError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    ReferenceLookupError::transport(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
