use std::sync::Arc;

use uuid::Uuid;

use super::or_not_found;
use crate::domain::{Account, normalize_name, validate_password};
use crate::error::DomainError;
use crate::ports::{AccountRepository, BaseRepository, PasswordService};

// Verified against when the account name is unknown, so a miss costs the
// same as a wrong password.
const TIMING_DUMMY_PASSWORD: &str = "quill-timing-dummy-password";

/// Registration and credential verification.
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    passwords: Arc<dyn PasswordService>,
    dummy_hash: Arc<str>,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, DomainError> {
        let dummy_hash = passwords.hash(TIMING_DUMMY_PASSWORD)?.into();
        Ok(Self {
            accounts,
            passwords,
            dummy_hash,
        })
    }

    /// Register a new account. Only the password hash is stored.
    pub async fn register(&self, name: &str, password: &str) -> Result<Account, DomainError> {
        let name = normalize_name(name)?;
        validate_password(password)?;

        if self.accounts.find_by_name(&name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Name '{}' is already taken",
                name
            )));
        }

        let password_hash = self.passwords.hash(password)?;
        // A concurrent registration can still win the race; the unique
        // constraint then surfaces as a Conflict.
        let account = self.accounts.insert(Account::new(name, password_hash)).await?;

        tracing::info!(account_id = %account.id, name = %account.name, "Account registered");
        Ok(account)
    }

    /// Check a name/password pair and return the matching account.
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<Account, DomainError> {
        let name = name.trim();

        let Some(account) = self.accounts.find_by_name(name).await? else {
            let _ = self.passwords.verify(password, &self.dummy_hash);
            tracing::debug!(name, "Login attempt for unknown account");
            return Err(DomainError::Unauthorized);
        };

        if !self.passwords.verify(password, &account.password_hash)? {
            tracing::debug!(account_id = %account.id, "Login attempt with wrong password");
            return Err(DomainError::Unauthorized);
        }

        Ok(account)
    }

    /// Rotate the credential of an account after re-checking the current one.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        validate_password(new_password)?;

        let mut account = self.find(account_id).await?;
        if !self.passwords.verify(current_password, &account.password_hash)? {
            return Err(DomainError::Unauthorized);
        }

        account.rotate_credential(self.passwords.hash(new_password)?);
        self.accounts
            .update(account)
            .await
            .map_err(or_not_found("Account", account_id))?;

        tracing::info!(%account_id, "Password changed");
        Ok(())
    }

    pub async fn find(&self, account_id: Uuid) -> Result<Account, DomainError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account", account_id))
    }
}
