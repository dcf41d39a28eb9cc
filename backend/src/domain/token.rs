//! Stateless bearer tokens for the credential service.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Account;

/// Token lifetime. Tokens are not persisted; expiry is the only revocation.
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Signed claim set embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier, named `_id` on the wire for parity with stored
    /// account documents.
    #[serde(rename = "_id")]
    pub account_id: Uuid,
    pub username: String,
    pub email: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// HMAC token mint/verify around the server-held secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
}

impl TokenSigner {
    /// Create a signer over the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Mint a token for the account, expiring in [`TOKEN_TTL_SECONDS`].
    ///
    /// # Errors
    ///
    /// Returns a [`jsonwebtoken::errors::Error`] when signing fails.
    pub fn mint(&self, account: &Account) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            account_id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            exp: Utc::now().timestamp() + TOKEN_TTL_SECONDS,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns a [`jsonwebtoken::errors::Error`] for tampered, mis-signed,
    /// or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}
