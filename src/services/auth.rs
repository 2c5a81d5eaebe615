//! Admin authentication service (session-backed)
//!
//! Login verifies the argon2 password hash and creates a server-side
//! session row; the opaque token handed to the client is stored only as a
//! sha-256 hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin::{Admin, AdminContext},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate an admin and open a session; returns the bearer token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, Admin)> {
        let admin = self
            .repository
            .admins
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&admin.password_hash, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        // Opportunistic housekeeping: sessions past their expiry are dead weight
        let now = Utc::now();
        self.repository.admins.delete_expired_sessions(now).await?;

        let token = generate_token();
        let expires_at = now + Duration::hours(self.config.session_ttl_hours as i64);

        self.repository
            .admins
            .create_session(admin.id, &hash_token(&token), expires_at)
            .await?;

        Ok((token, admin))
    }

    /// Resolve a bearer token to the admin identity behind it
    pub async fn validate_token(&self, token: &str) -> AppResult<AdminContext> {
        let session = self
            .repository
            .admins
            .get_session(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid or expired session".to_string()))?;

        if session.is_expired(Utc::now()) {
            self.repository
                .admins
                .delete_session(&session.token_hash)
                .await?;
            return Err(AppError::Authentication(
                "Invalid or expired session".to_string(),
            ));
        }

        let admin = self.repository.admins.get_by_id(session.admin_id).await?;

        Ok(AdminContext {
            admin_id: admin.id,
            username: admin.username,
        })
    }

    /// Close the session behind a bearer token
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.repository
            .admins
            .delete_session(&hash_token(token))
            .await
    }

    /// Get admin by ID
    pub async fn get_admin(&self, id: i32) -> AppResult<Admin> {
        self.repository.admins.get_by_id(id).await
    }

    /// Create the default admin account when none exists yet
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        if self.repository.admins.count().await? > 0 {
            return Ok(());
        }

        let hash = self.hash_password(&self.config.default_admin_password)?;
        self.repository
            .admins
            .create(&self.config.default_admin_username, &hash, Some("Administrator"))
            .await?;

        tracing::warn!(
            "Created default admin account '{}'; change its password",
            self.config.default_admin_username
        );
        Ok(())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against its stored hash
    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Opaque session token: 32 random bytes, hex-encoded
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Sha-256 hex digest of a session token, the only form stored at rest
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_hash_is_stable_and_opaque() {
        let token = "2b7e1516-28ae-d2a6-abf7-158809cf4f3c";
        let h1 = hash_token(token);
        let h2 = hash_token(token);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert_ne!(h1, token);
        assert_ne!(hash_token("other"), h1);
    }
}
