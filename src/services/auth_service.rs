use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::auth::jwt::{self, TokenError};
use crate::config::jwt::JwtSettings;
use crate::db::{RepositoryError, UserRepository};
use crate::error::AppError;
use crate::models::user::{User, UserRole};
use crate::utils::password::{burn_verification, hash_password_with_cost, timing_equalizer, verify_password};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password are deliberately the same variant.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user with this email already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("password hashing failed: {0}")]
    PasswordHashing(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid email or password".to_string()),
            AuthError::UserAlreadyExists => AppError::Conflict("User with this email already exists".to_string()),
            AuthError::UserNotFound => AppError::NotFound("User not found".to_string()),
            AuthError::Token(TokenError::Expired | TokenError::Malformed) => {
                AppError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::Token(e @ TokenError::Signing(_)) => AppError::Internal(e.to_string()),
            AuthError::PasswordHashing(detail) => AppError::Internal(detail),
            AuthError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Credential checks, registration and token issuing.
pub struct AuthService<S> {
    store: Arc<S>,
    jwt_settings: Arc<JwtSettings>,
    hash_cost: u32,
    timing_equalizer: Option<String>,
}

impl<S> AuthService<S>
where
    S: UserRepository + Send + Sync + 'static,
{
    /// Hashes the timing equalizer up front so the first unknown-email login
    /// costs the same as every later one.
    pub fn new(store: Arc<S>, jwt_settings: Arc<JwtSettings>, hash_cost: u32) -> Self {
        let timing_equalizer = match timing_equalizer(hash_cost) {
            Ok(equalizer) => Some(equalizer),
            Err(e) => {
                tracing::warn!("Failed to prepare timing equalizer hash: {}", e);
                None
            }
        };

        Self { store, jwt_settings, hash_cost, timing_equalizer }
    }

    /// Look the user up and check the password. Both failure causes surface
    /// as `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let user = self.store.find_user_by_email(email.trim()).await?;
        let candidate = password.expose_secret().to_string();

        let Some(user) = user else {
            if let Some(equalizer) = self.timing_equalizer.clone() {
                run_blocking(move || burn_verification(&candidate, &equalizer)).await?;
            }
            tracing::info!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.expose_secret().to_string();
        let matches = run_blocking(move || verify_password(&candidate, &stored_hash)).await?;
        if !matches {
            tracing::info!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        Ok(jwt::issue_token(user, &self.jwt_settings)?)
    }

    /// Authenticate and hand out a fresh session token.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(String, User), AuthError> {
        let user = self.authenticate(email, password).await?;
        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((token, user))
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
        role: UserRole,
    ) -> Result<User, AuthError> {
        let email = email.trim();
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let plain = password.expose_secret().to_string();
        let cost = self.hash_cost;
        let password_hash = run_blocking(move || hash_password_with_cost(&plain, cost))
            .await?
            .map_err(|e| AuthError::PasswordHashing(e.to_string()))?;

        let user = User::new(name.trim().to_string(), email.to_string(), password_hash, role);
        match self.store.create_user(&user).await {
            Ok(()) => {}
            // Lost a race with a concurrent registration for the same email.
            Err(RepositoryError::Conflict(_)) => return Err(AuthError::UserAlreadyExists),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, role = %user.role, "Registered user");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AuthError> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Create the configured admin account unless it already exists.
    /// Returns whether an account was created.
    pub async fn ensure_default_admin(&self, email: &str, password: &SecretString) -> Result<bool, AuthError> {
        match self.register("Administrator", email, password, UserRole::Admin).await {
            Ok(_) => {
                tracing::info!("Default admin account created");
                Ok(true)
            }
            Err(AuthError::UserAlreadyExists) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// bcrypt is CPU bound; keep it off the async workers.
async fn run_blocking<F, T>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::PasswordHashing(e.to_string()))
}
