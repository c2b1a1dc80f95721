use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Account entity - a registered author.
///
/// Only the salted hash of the credential is ever held here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with generated ID and timestamps.
    pub fn new(name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored credential.
    pub fn rotate_credential(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// Trim a display name and check its length.
pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(DomainError::validation(format!(
            "Name must be between {} and {} characters",
            NAME_MIN_LEN, NAME_MAX_LEN
        )));
    }
    Ok(name.to_string())
}

pub fn validate_password(raw: &str) -> Result<(), DomainError> {
    if raw.chars().count() < PASSWORD_MIN_LEN {
        return Err(DomainError::validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(normalize_name("  alice ").unwrap(), "alice");
    }

    #[test]
    fn test_normalize_name_rejects_bad_lengths() {
        assert!(matches!(normalize_name("a"), Err(DomainError::Validation(_))));
        assert!(matches!(normalize_name("   "), Err(DomainError::Validation(_))));
        assert!(normalize_name(&"x".repeat(NAME_MAX_LEN)).is_ok());
        assert!(normalize_name(&"x".repeat(NAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_password_min_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }

    #[test]
    fn test_rotate_credential_keeps_identity() {
        let mut account = Account::new("alice".into(), "old".into());
        let id = account.id;
        let created = account.created_at;

        account.rotate_credential("new".into());

        assert_eq!(account.id, id);
        assert_eq!(account.created_at, created);
        assert_eq!(account.password_hash, "new");
        assert!(account.updated_at >= created);
    }
}
