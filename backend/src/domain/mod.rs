//! Domain entities, services, and ports.
//!
//! Purpose: hold the behaviour with real invariants — the join/aggregation
//! pipeline, the in-memory search engine, and the credential service —
//! behind ports so adapters stay interchangeable. Inbound adapters map the
//! domain [`Error`] to their own envelopes.

pub mod account;
pub mod aggregate;
pub mod credentials;
pub mod dates;
pub mod error;
pub mod ports;
pub mod records;
pub mod search;
pub mod token;

pub use self::account::{Account, ProfileUpdate, Registration};
pub use self::aggregate::ReportAggregator;
pub use self::credentials::CredentialService;
pub use self::error::{Error, ErrorCode};
pub use self::records::{AnimalRef, HealthReport, JoinedRow, ObservationTask, PrimaryRecord, StaffRef};
pub use self::token::{Claims, TokenSigner};
