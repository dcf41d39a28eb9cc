//! Account registration, authentication tokens, and profile maintenance.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::account::{Account, ProfileUpdate, Registration};
use super::error::Error;
use super::ports::{AccountPersistenceError, AccountRepository, SequenceCounter};
use super::token::TokenSigner;

/// Fixed bcrypt cost factor for stored credentials.
pub const BCRYPT_COST: u32 = 10;

/// Name of the shared sequence assigning staff numbers.
pub const STAFF_ID_SEQUENCE: &str = "userAccounts";

/// Registration, password, and profile operations over the account store.
#[derive(Clone)]
pub struct CredentialService {
    accounts: Arc<dyn AccountRepository>,
    counter: Arc<dyn SequenceCounter>,
    signer: TokenSigner,
}

impl CredentialService {
    /// Create a service over the given adapters.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        counter: Arc<dyn SequenceCounter>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            accounts,
            counter,
            signer,
        }
    }

    /// Register a new account and return its bearer token.
    ///
    /// The duplicate-email pre-check runs before the counter increment so a
    /// rejected registration consumes no staff number and performs no
    /// insert. The repository's own uniqueness enforcement remains the
    /// authoritative guard against registrations racing past the pre-check.
    ///
    /// # Errors
    ///
    /// `DuplicateEmail` when the email is taken, `InternalError` on
    /// persistence or signing failure.
    pub async fn register(&self, registration: Registration) -> Result<String, Error> {
        let existing = self
            .accounts
            .find_by_email(&registration.email)
            .await
            .map_err(internal_persistence_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_email("User already exists with this email"));
        }

        let staff_id = self
            .counter
            .next_value(STAFF_ID_SEQUENCE)
            .await
            .map_err(|counter_error| {
                error!(error = %counter_error, "staff id sequence failed");
                Error::internal("staff id sequence failed")
            })?;

        let password_hash = hash_password(&registration.password)?;
        let account = Account {
            id: Uuid::new_v4(),
            staff_id,
            last_name: registration.last_name,
            first_name: registration.first_name,
            email: registration.email,
            contact_num: registration.contact,
            username: registration.username,
            password_hash,
        };

        match self.accounts.insert(account.clone()).await {
            Ok(()) => {}
            Err(AccountPersistenceError::DuplicateEmail { .. }) => {
                return Err(Error::duplicate_email("User already exists with this email"));
            }
            Err(other) => return Err(internal_persistence_error(other)),
        }

        self.signer.mint(&account).map_err(|sign_error| {
            error!(error = %sign_error, "token signing failed");
            Error::internal("token signing failed")
        })
    }

    /// Overwrite an account's password hash with a hash of the new
    /// plaintext.
    ///
    /// No old-password verification is performed before the overwrite; this
    /// mirrors the deployed admin workflow and is flagged as a
    /// security-review item rather than silently tightened here.
    ///
    /// # Errors
    ///
    /// `NotFound` when the account is missing, `InternalError` on hashing
    /// or persistence failure.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        new_password: Zeroizing<String>,
    ) -> Result<(), Error> {
        let password_hash = hash_password(&new_password)?;
        match self
            .accounts
            .update_password_hash(account_id, password_hash)
            .await
        {
            Ok(()) => Ok(()),
            Err(AccountPersistenceError::NotFound { .. }) => {
                Err(Error::not_found("account not found"))
            }
            Err(other) => Err(internal_persistence_error(other)),
        }
    }

    /// Fetch an account for its owner.
    ///
    /// # Errors
    ///
    /// `NotFound` when the account is missing.
    pub async fn profile(&self, account_id: Uuid) -> Result<Account, Error> {
        self.accounts
            .find_by_id(account_id)
            .await
            .map_err(internal_persistence_error)?
            .ok_or_else(|| Error::not_found("account not found"))
    }

    /// Apply a profile edit. The update type cannot carry password or staff
    /// number, so neither is ever touched here.
    ///
    /// # Errors
    ///
    /// `NotFound` when the account is missing.
    pub async fn edit_profile(&self, account_id: Uuid, update: ProfileUpdate) -> Result<(), Error> {
        match self.accounts.update_profile(account_id, update).await {
            Ok(()) => Ok(()),
            Err(AccountPersistenceError::NotFound { .. }) => {
                Err(Error::not_found("account not found"))
            }
            Err(other) => Err(internal_persistence_error(other)),
        }
    }

    /// All accounts, for staff selection inputs and reference lookups.
    ///
    /// # Errors
    ///
    /// `InternalError` on persistence failure.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.accounts
            .list()
            .await
            .map_err(internal_persistence_error)
    }

    /// Fetch one account by identifier for reference lookups.
    ///
    /// # Errors
    ///
    /// `NotFound` when the account is missing.
    pub async fn account(&self, account_id: Uuid) -> Result<Account, Error> {
        self.profile(account_id).await
    }
}

fn hash_password(plaintext: &str) -> Result<String, Error> {
    // The plaintext stays inside this call; only the hash escapes.
    bcrypt::hash(plaintext, BCRYPT_COST).map_err(|hash_error| {
        error!(error = %hash_error, "password hashing failed");
        Error::internal("password hashing failed")
    })
}

fn internal_persistence_error(persistence_error: AccountPersistenceError) -> Error {
    error!(error = %persistence_error, "account repository failure");
    Error::internal("account repository failure")
}
