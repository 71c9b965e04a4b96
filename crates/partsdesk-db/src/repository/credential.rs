//! # Credential Repository
//!
//! The `users` table holds the shop's single shared login.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use partsdesk_core::Credential;

/// Repository for the login record.
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    pool: SqlitePool,
}

impl CredentialRepository {
    /// Creates a new CredentialRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CredentialRepository { pool }
    }

    pub async fn find(&self, username: &str) -> DbResult<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            "SELECT username, password FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credential)
    }

    /// Inserts the credential if the username is free. Returns true if inserted.
    pub async fn ensure(&self, credential: &Credential) -> DbResult<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO users (username, password) VALUES (?1, ?2)")
            .bind(&credential.username)
            .bind(&credential.password)
            .execute(&self.pool)
            .await?;

        let inserted = result.rows_affected() == 1;
        debug!(username = %credential.username, inserted, "Ensured credential");
        Ok(inserted)
    }

    pub async fn set_password(&self, username: &str, password: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET password = ?2 WHERE username = ?1")
            .bind(username)
            .bind(password)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", username));
        }

        debug!(username, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use partsdesk_core::Credential;

    #[tokio::test]
    async fn test_ensure_is_insert_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.credentials();

        assert!(repo.ensure(&Credential::new("admin", "123456")).await.unwrap());
        assert!(!repo.ensure(&Credential::new("admin", "other")).await.unwrap());

        let found = repo.find("admin").await.unwrap().unwrap();
        assert_eq!(found.password, "123456");
        assert!(repo.find("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_password() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.credentials();
        repo.ensure(&Credential::new("admin", "123456")).await.unwrap();

        repo.set_password("admin", "s3cret").await.unwrap();
        assert_eq!(repo.find("admin").await.unwrap().unwrap().password, "s3cret");
        assert!(repo.set_password("nobody", "x").await.unwrap_err().is_not_found());
    }
}
