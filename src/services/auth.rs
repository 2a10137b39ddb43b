//! Admin authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::admin::AdminClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    password_hash: String,
}

impl AuthService {
    /// Uses `admin_password_hash` when configured, otherwise hashes
    /// `admin_password` so the plain value is not kept around.
    pub fn new(mut config: AuthConfig) -> AppResult<Self> {
        let password_hash = match (config.admin_password_hash.take(), config.admin_password.take()) {
            (Some(hash), _) => {
                PasswordHash::new(&hash)
                    .map_err(|e| AppError::Internal(format!("Invalid admin password hash: {}", e)))?;
                hash
            }
            (None, Some(password)) => hash_password(&password)?,
            (None, None) => {
                return Err(AppError::Internal(
                    "No admin password or password hash configured".to_string(),
                ))
            }
        };

        Ok(Self {
            config,
            password_hash,
        })
    }

    /// Check admin credentials and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let password_ok = self.verify_password(password)?;
        if username != self.config.admin_username || !password_ok {
            tracing::warn!(username, "Rejected admin login");
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: username.to_string(),
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        tracing::info!(username, "Admin logged in");
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Validate a bearer token
    pub fn verify_token(&self, token: &str) -> AppResult<AdminClaims> {
        AdminClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }

    /// Session lifetime in seconds
    pub fn token_lifetime_secs(&self) -> i64 {
        self.config.jwt_expiration_hours as i64 * 3600
    }

    fn verify_password(&self, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_expiration_hours: 1,
            admin_username: "admin".into(),
            admin_password: Some("password".into()),
            admin_password_hash: None,
        }
    }

    #[tokio::test]
    async fn valid_credentials_issue_verifiable_token() {
        let auth = AuthService::new(config()).unwrap();
        let token = auth.login("admin", "password").await.unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn wrong_password_or_username_is_rejected() {
        let auth = AuthService::new(config()).unwrap();
        assert!(matches!(
            auth.login("admin", "nope").await,
            Err(AppError::Authentication(_))
        ));
        assert!(matches!(
            auth.login("root", "password").await,
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn preconfigured_hash_is_used() {
        let hash = hash_password("s3cret").unwrap();
        let mut cfg = config();
        cfg.admin_password = None;
        cfg.admin_password_hash = Some(hash);
        let auth = AuthService::new(cfg).unwrap();
        assert!(auth.verify_password("s3cret").unwrap());
        assert!(!auth.verify_password("password").unwrap());
    }

    #[test]
    fn missing_credentials_fail_startup() {
        let mut cfg = config();
        cfg.admin_password = None;
        assert!(matches!(AuthService::new(cfg), Err(AppError::Internal(_))));

        let mut cfg = config();
        cfg.admin_password_hash = Some("not-a-phc-string".into());
        assert!(matches!(AuthService::new(cfg), Err(AppError::Internal(_))));
    }

    #[test]
    fn garbage_token_is_unauthenticated() {
        let auth = AuthService::new(config()).unwrap();
        assert!(matches!(
            auth.verify_token("not.a.token"),
            Err(AppError::Authentication(_))
        ));
    }
}
