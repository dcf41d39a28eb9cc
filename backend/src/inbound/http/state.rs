//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain services and ports, and stay testable with stub adapters.

use std::sync::Arc;

use crate::domain::aggregate::ReportAggregator;
use crate::domain::credentials::CredentialService;
use crate::domain::ports::{RecordStore, ReferenceStore};
use crate::domain::token::TokenSigner;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<CredentialService>,
    pub aggregator: ReportAggregator,
    pub records: Arc<dyn RecordStore>,
    pub references: Arc<dyn ReferenceStore>,
    pub signer: TokenSigner,
}

impl HttpState {
    /// Wire the state from its adapters and the token signer.
    pub fn new(
        credentials: CredentialService,
        records: Arc<dyn RecordStore>,
        references: Arc<dyn ReferenceStore>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            credentials: Arc::new(credentials),
            aggregator: ReportAggregator::new(Arc::clone(&references)),
            records,
            references,
            signer,
        }
    }
}
