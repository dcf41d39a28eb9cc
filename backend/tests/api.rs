//! End-to-end tests for the admin API over in-memory adapters.
//!
//! These exercise the real Actix handlers and middleware with deterministic
//! stub stores standing in for the records registry.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};

use zooadmin::Correlate;
use zooadmin::domain::credentials::CredentialService;
use zooadmin::domain::ports::{RecordStore, ReferenceLookupError, ReferenceStore};
use zooadmin::domain::records::{AnimalRef, HealthReport, ObservationTask, StaffRef};
use zooadmin::domain::token::TokenSigner;
use zooadmin::inbound::http::{self, HttpState};
use zooadmin::outbound::{InMemoryAccounts, InMemoryCounter};

const SECRET: &str = "integration-secret";

// ---------------------------------------------------------------------------
// Test doubles for the records registry
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FixedRegistry {
    animals: HashMap<String, AnimalRef>,
    staff: HashMap<String, StaffRef>,
    reports: Vec<HealthReport>,
    tasks: Vec<ObservationTask>,
}

impl FixedRegistry {
    fn seeded() -> Self {
        let mut registry = Self::default();
        for (id, name) in [("a1", "Luna"), ("a2", "Maximus"), ("a3", "Pip")] {
            registry.animals.insert(
                id.to_owned(),
                AnimalRef {
                    id: id.to_owned(),
                    animal_name: name.to_owned(),
                },
            );
        }
        for (id, last, first) in [("s1", "Doe", "Jane"), ("s2", "Lee", "Sam")] {
            registry.staff.insert(
                id.to_owned(),
                StaffRef {
                    id: id.to_owned(),
                    last_name: last.to_owned(),
                    first_name: first.to_owned(),
                },
            );
        }
        registry.reports = vec![
            health_report("hr1", "a1", "s1"),
            health_report("hr2", "a2", "s2"),
            // Unresolvable staff member: the row must be dropped, not padded.
            health_report("hr3", "a3", "gone"),
        ];
        registry.tasks = vec![ObservationTask {
            id: "ot1".to_owned(),
            animal_id: "a2".to_owned(),
            staff_id: "s1".to_owned(),
            report_description: "pacing the north fence".to_owned(),
            date_reported: NaiveDate::from_ymd_opt(2024, 7, 19).unwrap_or_default(),
        }];
        registry
    }
}

fn health_report(id: &str, animal_id: &str, staff_id: &str) -> HealthReport {
    HealthReport {
        id: id.to_owned(),
        animal_id: animal_id.to_owned(),
        staff_id: staff_id.to_owned(),
        health_description: "routine exam".to_owned(),
        next_checkup_date: NaiveDate::from_ymd_opt(2024, 7, 19).unwrap_or_default(),
        medication: "none".to_owned(),
        vaccine_status: "complete".to_owned(),
    }
}

#[async_trait]
impl ReferenceStore for FixedRegistry {
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
impl RecordStore for FixedRegistry {
    async fn health_reports(&self) -> Result<Vec<HealthReport>, ReferenceLookupError> {
        Ok(self.reports.clone())
    }

    async fn observation_tasks(&self) -> Result<Vec<ObservationTask>, ReferenceLookupError> {
        Ok(self.tasks.clone())
    }
}

/// Failing registry for error-path tests.
struct DownRegistry;

#[async_trait]
impl ReferenceStore for DownRegistry {
    async fn animal(&self, _id: &str) -> Result<AnimalRef, ReferenceLookupError> {
        Err(ReferenceLookupError::transport("connection refused"))
    }

    async fn staff(&self, _id: &str) -> Result<StaffRef, ReferenceLookupError> {
        Err(ReferenceLookupError::transport("connection refused"))
    }

    async fn list_animals(&self) -> Result<Vec<AnimalRef>, ReferenceLookupError> {
        Err(ReferenceLookupError::transport("connection refused"))
    }

    async fn list_staff(&self) -> Result<Vec<StaffRef>, ReferenceLookupError> {
        Err(ReferenceLookupError::transport("connection refused"))
    }
}

#[async_trait]
impl RecordStore for DownRegistry {
    async fn health_reports(&self) -> Result<Vec<HealthReport>, ReferenceLookupError> {
        Err(ReferenceLookupError::transport("connection refused"))
    }

    async fn observation_tasks(&self) -> Result<Vec<ObservationTask>, ReferenceLookupError> {
        Err(ReferenceLookupError::transport("connection refused"))
    }
}

// ---------------------------------------------------------------------------
// App assembly
// ---------------------------------------------------------------------------

fn state_over<S>(registry: S) -> HttpState
where
    S: ReferenceStore + RecordStore + 'static,
{
    let registry = Arc::new(registry);
    let signer = TokenSigner::new(SECRET);
    let credentials = CredentialService::new(
        Arc::new(InMemoryAccounts::default()),
        Arc::new(InMemoryCounter::default()),
        signer.clone(),
    );
    HttpState::new(credentials, registry.clone(), registry, signer)
}

macro_rules! app_over {
    ($registry:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state_over($registry)))
                .wrap(Correlate)
                .configure(http::configure),
        )
        .await
    };
}

async fn register(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> String {
    let request = test::TestRequest::post()
        .uri("/user/register")
        .set_json(json!({
            "lastName": "Doe",
            "firstName": "Jane",
            "email": email,
            "contact": "0123456789",
            "username": email.split('@').next().unwrap_or(email),
            "password": "hunter2!",
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = test::read_body(response).await;
    String::from_utf8_lossy(&bytes).into_owned()
}

// ---------------------------------------------------------------------------
// Account flow
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn registration_token_grants_profile_access() {
    let app = app_over!(FixedRegistry::seeded());

    let token = register(&app, "jane@zoo.example").await;
    let request = test::TestRequest::get()
        .uri("/user/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let profile: Value = test::read_body_json(response).await;
    assert_eq!(profile.get("email").and_then(Value::as_str), Some("jane@zoo.example"));
    assert_eq!(profile.get("staffId").and_then(Value::as_u64), Some(1));
    assert!(profile.get("passwordHash").is_none());
}

#[actix_web::test]
async fn second_registration_with_same_email_is_rejected() {
    let app = app_over!(FixedRegistry::seeded());

    register(&app, "jane@zoo.example").await;
    let request = test::TestRequest::post()
        .uri("/user/register")
        .set_json(json!({
            "lastName": "Doe",
            "firstName": "Janet",
            "email": "jane@zoo.example",
            "contact": "0123456789",
            "username": "jdoe2",
            "password": "other-pass",
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(response).await;
    assert_eq!(error.get("code").and_then(Value::as_str), Some("duplicate_email"));
}

#[actix_web::test]
async fn staff_ids_count_up_across_registrations() {
    let app = app_over!(FixedRegistry::seeded());

    register(&app, "one@zoo.example").await;
    register(&app, "two@zoo.example").await;
    register(&app, "three@zoo.example").await;

    let request = test::TestRequest::get().uri("/user/view").to_request();
    let rows: Value = test::call_and_read_body_json(&app, request).await;
    let staff_ids: Vec<u64> = rows
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|row| row.get("staffId").and_then(Value::as_u64))
        .collect();
    assert_eq!(staff_ids, vec![1, 2, 3]);
}

#[actix_web::test]
async fn changed_password_still_answers_in_plain_text() {
    let app = app_over!(FixedRegistry::seeded());

    let token = register(&app, "jane@zoo.example").await;
    let claims = TokenSigner::new(SECRET).verify(&token).expect("token verifies");

    let request = test::TestRequest::put()
        .uri(&format!("/user/change-password/{}", claims.account_id))
        .set_json(json!({ "newPassword": "a-new-one" }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&test::read_body(response).await[..], b"Password changed successfully");

    // The token predates the change and stays valid; expiry is the only
    // revocation.
    let request = test::TestRequest::get()
        .uri("/user/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn responses_echo_a_request_id_header() {
    let app = app_over!(FixedRegistry::seeded());

    let request = test::TestRequest::get().uri("/user/view").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("request-id"));
}

// ---------------------------------------------------------------------------
// Joined report views
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn medical_history_drops_rows_with_missing_references() {
    let app = app_over!(FixedRegistry::seeded());

    let request = test::TestRequest::get()
        .uri("/medical-history/view")
        .to_request();
    let rows: Value = test::call_and_read_body_json(&app, request).await;
    let rows = rows.as_array().expect("array body");

    // hr3 references an unknown staff member and must not appear.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("animalName").and_then(Value::as_str), Some("Luna"));
    assert_eq!(rows[0].get("staffName").and_then(Value::as_str), Some("Doe, Jane"));
    assert_eq!(rows[0].get("id").and_then(Value::as_u64), Some(1));
    assert_eq!(rows[1].get("id").and_then(Value::as_u64), Some(2));
    assert_eq!(
        rows[0].get("nextCheckupDate").and_then(Value::as_str),
        Some("19 Jul 2024")
    );
}

#[actix_web::test]
async fn animal_query_narrows_by_substring() {
    let app = app_over!(FixedRegistry::seeded());

    let request = test::TestRequest::get()
        .uri("/medical-history/view?animal=max")
        .to_request();
    let rows: Value = test::call_and_read_body_json(&app, request).await;
    let rows = rows.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("animalName").and_then(Value::as_str), Some("Maximus"));
}

#[actix_web::test]
async fn names_index_covers_only_joined_rows() {
    let app = app_over!(FixedRegistry::seeded());

    let request = test::TestRequest::get()
        .uri("/medical-history/names")
        .to_request();
    let names: Value = test::call_and_read_body_json(&app, request).await;
    // Pip's report lost its staff reference, so pip is absent.
    assert_eq!(names, json!(["luna", "maximus"]));
}

#[actix_web::test]
async fn observation_view_joins_the_same_way() {
    let app = app_over!(FixedRegistry::seeded());

    let request = test::TestRequest::get()
        .uri("/observation-report/view")
        .to_request();
    let rows: Value = test::call_and_read_body_json(&app, request).await;
    let rows = rows.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("animalName").and_then(Value::as_str), Some("Maximus"));
    assert_eq!(rows[0].get("dateReported").and_then(Value::as_str), Some("19 Jul 2024"));
}

#[actix_web::test]
async fn registry_outage_surfaces_as_redacted_500() {
    let app = app_over!(DownRegistry);

    let request = test::TestRequest::get()
        .uri("/medical-history/view")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: Value = test::read_body_json(response).await;
    assert_eq!(error.get("code").and_then(Value::as_str), Some("internal_error"));
    assert_eq!(
        error.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
}

// ---------------------------------------------------------------------------
// OpenAPI document
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn openapi_document_is_served() {
    let app = app_over!(FixedRegistry::seeded());

    let request = test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc: Value = test::read_body_json(response).await;
    assert!(doc.pointer("/paths/~1user~1register").is_some());
    assert!(doc.pointer("/paths/~1medical-history~1view").is_some());
}
