use crate::models::user::{normalize_email, User};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::password::{HashError, PasswordHasher};
use std::sync::Arc;

/// Minimum password length in UTF-16 code units, matching browser `length`.
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const DEFAULT_LIST_LIMIT: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Password too weak (minimum 6 characters)")]
    WeakPassword,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(#[from] HashError),
    #[error("Repository error: {0}")]
    RepositoryError(RepositoryError),
}

impl From<RepositoryError> for UserServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists => UserServiceError::EmailTaken,
            other => UserServiceError::RepositoryError(other),
        }
    }
}

pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Registers a new account. Checks run in order: presence, password
    /// length, then email availability.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        let email = normalize_email(&request.email);

        if email.is_empty() || request.password.is_empty() {
            return Err(UserServiceError::MissingCredentials);
        }

        self.validate_password(&request.password)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserServiceError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&request.password).await?;

        // The unique index still guards against a concurrent registration
        Ok(self.repository.create_user(&email, &password_hash).await?)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(&normalize_email(email)).await?)
    }

    /// Oldest first. The limit is clamped to at least one, since MongoDB reads
    /// zero as unlimited and a negative value as a single batch.
    pub async fn list_users(&self, limit: Option<i64>) -> Result<Vec<User>, UserServiceError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);
        Ok(self.repository.list_users(Some(limit)).await?)
    }

    fn validate_password(&self, password: &str) -> Result<(), UserServiceError> {
        if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
            return Err(UserServiceError::WeakPassword);
        }
        Ok(())
    }
}
