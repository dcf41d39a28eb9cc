//! Staff account aggregate.
//!
//! Serialisation follows the account store's wire contract (`_id`,
//! camelCase fields) so `GET /user/view` payloads double as staff reference
//! data for aggregating peers. The password hash is never serialised.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A registered staff account.
///
/// ## Invariants
/// - `staff_id` is assigned once from the shared sequence and never
///   reassigned.
/// - `email` is unique across the account collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Sequential staff number from the `userAccounts` sequence.
    pub staff_id: u32,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub contact_num: String,
    pub username: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
}

/// Input to [`crate::domain::credentials::CredentialService::register`].
///
/// Carries the plaintext password; it is hashed during registration and
/// wiped when the registration is dropped.
#[derive(Debug)]
pub struct Registration {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub contact: String,
    pub username: String,
    pub password: zeroize::Zeroizing<String>,
}

/// Editable profile fields.
///
/// Password and staff number are deliberately absent, so a profile edit can
/// never touch them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub contact_num: Option<String>,
    pub username: Option<String>,
}

impl Account {
    /// Apply an edit, leaving absent fields untouched.
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            last_name,
            first_name,
            email,
            contact_num,
            username,
        } = update;
        if let Some(value) = last_name {
            self.last_name = value;
        }
        if let Some(value) = first_name {
            self.first_name = value;
        }
        if let Some(value) = email {
            self.email = value;
        }
        if let Some(value) = contact_num {
            self.contact_num = value;
        }
        if let Some(value) = username {
            self.username = value;
        }
    }
}
