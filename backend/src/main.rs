//! Backend entry-point: wires the HTTP routes, adapters, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
use uuid::Uuid;

use zooadmin::Correlate;
use zooadmin::domain::credentials::CredentialService;
use zooadmin::domain::token::TokenSigner;
use zooadmin::inbound::http::{self, HttpState};
use zooadmin::outbound::{InMemoryAccounts, InMemoryCounter, RegistryHttpClient};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind = env::var("ZOOADMIN_BIND").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let records_base = env::var("RECORDS_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:5000/".into());
    let records_base = Url::parse(&records_base)
        .map_err(|e| std::io::Error::other(format!("invalid RECORDS_BASE_URL: {e}")))?;

    let secret = match env::var("JWTSECRET") {
        Ok(value) if !value.is_empty() => value,
        _ => {
            if cfg!(debug_assertions) {
                warn!("JWTSECRET unset; using an ephemeral secret (dev only)");
                Uuid::new_v4().to_string()
            } else {
                return Err(std::io::Error::other("JWTSECRET must be set"));
            }
        }
    };

    let registry = Arc::new(
        RegistryHttpClient::new(records_base)
            .map_err(|e| std::io::Error::other(format!("registry client: {e}")))?,
    );
    let signer = TokenSigner::new(secret);
    let credentials = CredentialService::new(
        Arc::new(InMemoryAccounts::default()),
        Arc::new(InMemoryCounter::default()),
        signer.clone(),
    );
    let state = web::Data::new(HttpState::new(
        credentials,
        registry.clone(),
        registry,
        signer,
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Correlate)
            .configure(http::configure)
    })
    .bind(bind.as_str())?
    .run()
    .await
}
