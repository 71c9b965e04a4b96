//! # Credentials
//!
//! The shop has exactly one login, seeded at startup. Passwords are
//! compared as stored; this is a shared counter password, not user auth.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::DbError;
use crate::service::ServiceResult;
use crate::store::Store;
use partsdesk_core::validation::validate_new_password;
use partsdesk_core::{CoreError, Credential};

#[derive(Clone)]
pub struct Credentials {
    store: Arc<dyn Store>,
    /// The account change-password applies to.
    username: String,
}

impl Credentials {
    pub fn new(store: Arc<dyn Store>, username: impl Into<String>) -> Self {
        Credentials {
            store,
            username: username.into(),
        }
    }

    /// Creates the login with `password` unless it already exists.
    pub async fn ensure_default(&self, password: &str) -> ServiceResult<()> {
        let created = self
            .store
            .ensure_credential(&Credential::new(self.username.as_str(), password))
            .await?;

        if created {
            info!(username = %self.username, "Default login created");
        }
        Ok(())
    }

    /// Succeeds only on an exact username and password match.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<()> {
        match self.store.find_credential(username).await? {
            Some(credential) if credential.matches(username, password) => {
                info!(username, "Login succeeded");
                Ok(())
            }
            _ => {
                warn!(username, "Login failed");
                Err(CoreError::AuthFailed.into())
            }
        }
    }

    /// Replaces the password after checking the old one.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ServiceResult<()> {
        validate_new_password(new_password)?;

        let credential = self
            .store
            .find_credential(&self.username)
            .await?
            .ok_or_else(|| DbError::not_found("User", &self.username))?;

        if credential.password != old_password {
            warn!(username = %self.username, "Password change refused: wrong old password");
            return Err(CoreError::AuthFailed.into());
        }

        self.store.set_password(&self.username, new_password).await?;
        info!(username = %self.username, "Password changed");
        Ok(())
    }
}
