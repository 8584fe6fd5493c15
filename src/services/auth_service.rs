use crate::models::user::{normalize_email, User};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenIssuer;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A successful login: the account and the token issued for it.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repository,
            hasher,
            token_issuer,
        }
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<User, AuthServiceError> {
        let email = normalize_email(&request.email);

        if email.is_empty() || request.password.is_empty() {
            return Err(AuthServiceError::MissingCredentials);
        }

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !self.hasher.verify(&request.password, &user.password_hash).await {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AuthServiceError> {
        let user = self.authenticate(request).await?;
        let token = self.token_issuer.issue(&user);
        Ok(LoginOutcome { user, token })
    }
}
