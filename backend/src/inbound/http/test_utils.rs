//! Shared fixtures for HTTP handler tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::credentials::CredentialService;
use crate::domain::ports::{RecordStore, ReferenceLookupError, ReferenceStore};
use crate::domain::records::{AnimalRef, HealthReport, ObservationTask, StaffRef};
use crate::domain::token::TokenSigner;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryAccounts, InMemoryCounter};

pub const TEST_SECRET: &str = "test-secret";

/// Stub registry covering both reference and record lookups.
#[derive(Default)]
pub struct StubRegistry {
    pub animals: HashMap<String, AnimalRef>,
    pub staff: HashMap<String, StaffRef>,
    pub reports: Vec<HealthReport>,
    pub tasks: Vec<ObservationTask>,
}

impl StubRegistry {
    pub fn with_animal(mut self, id: &str, name: &str) -> Self {
        self.animals.insert(
            id.to_owned(),
            AnimalRef {
                id: id.to_owned(),
                animal_name: name.to_owned(),
            },
        );
        self
    }

    pub fn with_staff(mut self, id: &str, last: &str, first: &str) -> Self {
        self.staff.insert(
            id.to_owned(),
            StaffRef {
                id: id.to_owned(),
                last_name: last.to_owned(),
                first_name: first.to_owned(),
            },
        );
        self
    }

    pub fn with_report(mut self, id: &str, animal_id: &str, staff_id: &str) -> Self {
        self.reports.push(HealthReport {
            id: id.to_owned(),
            animal_id: animal_id.to_owned(),
            staff_id: staff_id.to_owned(),
            health_description: "limping on left paw".to_owned(),
            next_checkup_date: NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"),
            medication: "ibuprofen".to_owned(),
            vaccine_status: "complete".to_owned(),
        });
        self
    }

    pub fn with_task(mut self, id: &str, animal_id: &str, staff_id: &str) -> Self {
        self.tasks.push(ObservationTask {
            id: id.to_owned(),
            animal_id: animal_id.to_owned(),
            staff_id: staff_id.to_owned(),
            report_description: "restless overnight".to_owned(),
            date_reported: NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"),
        });
        self
    }
}

#[async_trait]
impl ReferenceStore for StubRegistry {
    async fn animal(&self, id: &str) -> Result<AnimalRef, ReferenceLookupError> {
        self.animals
            .get(id)
            .cloned()
            .ok_or_else(|| ReferenceLookupError::not_found("animal", id))
    }

    async fn staff(&self, id: &str) -> Result<StaffRef, ReferenceLookupError> {
        self.staff
            .get(id)
            .cloned()
            .ok_or_else(|| ReferenceLookupError::not_found("staff", id))
    }

    async fn list_animals(&self) -> Result<Vec<AnimalRef>, ReferenceLookupError> {
        Ok(self.animals.values().cloned().collect())
    }

    async fn list_staff(&self) -> Result<Vec<StaffRef>, ReferenceLookupError> {
        Ok(self.staff.values().cloned().collect())
    }
}

#[async_trait]
impl RecordStore for StubRegistry {
    async fn health_reports(&self) -> Result<Vec<HealthReport>, ReferenceLookupError> {
        Ok(self.reports.clone())
    }

    async fn observation_tasks(&self) -> Result<Vec<ObservationTask>, ReferenceLookupError> {
        Ok(self.tasks.clone())
    }
}

/// State over in-memory adapters and the given stub registry.
pub fn state_with(registry: StubRegistry) -> HttpState {
    let registry = Arc::new(registry);
    let signer = TokenSigner::new(TEST_SECRET);
    let credentials = CredentialService::new(
        Arc::new(InMemoryAccounts::default()),
        Arc::new(InMemoryCounter::default()),
        signer.clone(),
    );
    HttpState::new(credentials, registry.clone(), registry, signer)
}

/// State with an empty stub registry.
pub fn test_state() -> HttpState {
    state_with(StubRegistry::default())
}
