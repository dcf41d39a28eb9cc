//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the records/reference services and the account store). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::account::{Account, ProfileUpdate};
use super::records::{AnimalRef, HealthReport, ObservationTask, StaffRef};

/// Errors surfaced by reference and record lookups.
///
/// Lookups fail independently per call; the aggregator treats every variant
/// the same way and drops the affected record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceLookupError {
    /// The referenced entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    /// Transport failure, including timeouts, reaching the service.
    #[error("reference lookup transport failed: {message}")]
    Transport { message: String },
    /// The service answered with a payload that did not decode.
    #[error("reference payload decoding failed: {message}")]
    Decode { message: String },
}

impl ReferenceLookupError {
    /// Helper for missing entities.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Helper for transport failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for decoding failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Single-record and list lookups against the animal and staff services.
///
/// No batch endpoint is assumed; each call fails independently.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Fetch one animal reference by identifier.
    async fn animal(&self, id: &str) -> Result<AnimalRef, ReferenceLookupError>;

    /// Fetch one staff reference by identifier.
    async fn staff(&self, id: &str) -> Result<StaffRef, ReferenceLookupError>;

    /// List animal references for selection inputs.
    async fn list_animals(&self) -> Result<Vec<AnimalRef>, ReferenceLookupError>;

    /// List staff references for selection inputs.
    async fn list_staff(&self) -> Result<Vec<StaffRef>, ReferenceLookupError>;
}

/// Primary-record listings consumed by the aggregator.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All health reports currently on record.
    async fn health_reports(&self) -> Result<Vec<HealthReport>, ReferenceLookupError>;

    /// All observation tasks currently on record.
    async fn observation_tasks(&self) -> Result<Vec<ObservationTask>, ReferenceLookupError>;
}

/// Persistence errors raised by [`AccountRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountPersistenceError {
    /// An account with this email already exists. Adapters must enforce
    /// this inside `insert`; the service's pre-check is an optimisation only.
    #[error("an account already exists for email {email}")]
    DuplicateEmail { email: String },
    /// The account does not exist.
    #[error("account {id} not found")]
    NotFound { id: Uuid },
    /// Query or mutation failed during execution.
    #[error("account repository query failed: {message}")]
    Query { message: String },
}

impl AccountPersistenceError {
    /// Helper for uniqueness violations.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for staff accounts.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account, enforcing email uniqueness at the storage
    /// layer.
    async fn insert(&self, account: Account) -> Result<(), AccountPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountPersistenceError>;

    /// Fetch an account by email.
    async fn find_by_email(&self, email: &str)
    -> Result<Option<Account>, AccountPersistenceError>;

    /// List all accounts ordered by staff number.
    async fn list(&self) -> Result<Vec<Account>, AccountPersistenceError>;

    /// Apply a profile edit. Fails with `NotFound` when the account is
    /// missing.
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), AccountPersistenceError>;

    /// Overwrite the stored password hash. Fails with `NotFound` when the
    /// account is missing.
    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> Result<(), AccountPersistenceError>;
}

/// Errors raised by the shared sequence counter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    /// The counter backend failed or is unreachable.
    #[error("sequence {sequence} failed: {message}")]
    Backend { sequence: String, message: String },
}

impl CounterError {
    /// Helper for backend failures.
    pub fn backend(sequence: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            sequence: sequence.into(),
            message: message.into(),
        }
    }
}

/// Monotonic shared counter scoped to a named sequence.
///
/// Implementations must use an atomic increment primitive. A read-then-write
/// pair would hand out duplicate values under concurrent registration.
#[async_trait]
pub trait SequenceCounter: Send + Sync {
    /// Obtain the next value of the named sequence.
    async fn next_value(&self, sequence: &str) -> Result<u32, CounterError>;
}
