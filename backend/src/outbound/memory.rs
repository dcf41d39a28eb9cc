//! In-memory persistence adapters.
//!
//! The account store is an opaque collaborator as far as the domain is
//! concerned; this adapter keeps the whole collection behind one mutex so
//! the uniqueness check and the insert happen in a single critical section,
//! which is the storage-layer guarantee the registration flow relies on.
//! Database-backed adapters must provide the same two properties: a unique
//! index on email, and an atomic increment for sequences.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::account::{Account, ProfileUpdate};
use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, CounterError, SequenceCounter,
};

/// Mutex-guarded account collection with a unique-email constraint.
#[derive(Default)]
pub struct InMemoryAccounts {
    store: Mutex<HashMap<Uuid, Account>>,
}

impl InMemoryAccounts {
    fn locked(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Account>>, AccountPersistenceError> {
        self.store
            .lock()
            .map_err(|_| AccountPersistenceError::query("account store poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn insert(&self, account: Account) -> Result<(), AccountPersistenceError> {
        let mut guard = self.locked()?;
        // Uniqueness check and insert share the critical section, so two
        // racing registrations cannot both pass the check.
        if guard
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(AccountPersistenceError::duplicate_email(account.email));
        }
        guard.insert(account.id, account);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self.locked()?.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self
            .locked()?
            .values()
            .find(|account| account.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, AccountPersistenceError> {
        let mut accounts: Vec<Account> = self.locked()?.values().cloned().collect();
        accounts.sort_by_key(|account| account.staff_id);
        Ok(accounts)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), AccountPersistenceError> {
        let mut guard = self.locked()?;
        let account = guard
            .get_mut(&id)
            .ok_or(AccountPersistenceError::NotFound { id })?;
        account.apply_profile(update);
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> Result<(), AccountPersistenceError> {
        let mut guard = self.locked()?;
        let account = guard
            .get_mut(&id)
            .ok_or(AccountPersistenceError::NotFound { id })?;
        account.password_hash = password_hash;
        Ok(())
    }
}

/// Named sequences backed by atomic counters.
///
/// `next_value` is a fetch-add on the sequence's atomic, never a
/// read-then-write pair, so concurrent callers always receive distinct
/// values.
#[derive(Default)]
pub struct InMemoryCounter {
    sequences: Mutex<HashMap<String, Arc<AtomicU32>>>,
}

#[async_trait]
impl SequenceCounter for InMemoryCounter {
    async fn next_value(&self, sequence: &str) -> Result<u32, CounterError> {
        let counter = {
            let mut guard = self
                .sequences
                .lock()
                .map_err(|_| CounterError::backend(sequence, "sequence table poisoned"))?;
            Arc::clone(guard.entry(sequence.to_owned()).or_default())
        };
        Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
