use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account that logs in with its email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
    /// Token embedded in the verification link. Assigned once, never rotated.
    pub verification_uuid: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional account fields accepted at creation time.
///
/// Unset fields keep the account defaults: active, not staff, not verified,
/// not superuser, empty names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl User {
    /// Create a new user with default flags.
    pub fn new(
        id: Uuid,
        email: String,
        password_hash: String,
        verification_uuid: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            full_name: None,
            is_staff: false,
            is_active: true,
            is_verified: false,
            is_superuser: false,
            verification_uuid,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy every field that was set in `fields` onto the user.
    pub fn apply(&mut self, fields: UserFields) {
        if let Some(first_name) = fields.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = fields.last_name {
            self.last_name = last_name;
        }
        if fields.full_name.is_some() {
            self.full_name = fields.full_name;
        }
        if let Some(is_staff) = fields.is_staff {
            self.is_staff = is_staff;
        }
        if let Some(is_active) = fields.is_active {
            self.is_active = is_active;
        }
        if let Some(is_verified) = fields.is_verified {
            self.is_verified = is_verified;
        }
        if let Some(is_superuser) = fields.is_superuser {
            self.is_superuser = is_superuser;
        }
    }

    pub fn short_name(&self) -> &str {
        &self.first_name
    }

    /// First and last name separated by a comma.
    pub fn display_full_name(&self) -> String {
        format!("{}, {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// Canonicalize an email address for storage and lookup.
///
/// Surrounding whitespace is removed and the domain part is lowercased.
/// The local part is case-sensitive and kept as is. Input without an `@`
/// is returned unchanged.
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Email with the local part masked, for log output.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next();
            match first {
                Some(c) if local.chars().count() > 1 => format!("{c}***@{domain}"),
                _ => format!("***@{domain}"),
            }
        }
        None => "***".to_string(),
    }
}
