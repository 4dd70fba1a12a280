use std::sync::Arc;

use async_trait::async_trait;
use auth::IssuedToken;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::user::models::AccessTokenCommand;
use crate::domain::user::models::HardDeleteUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::IdentityService;
use crate::user::ports::UserRepository;

/// Domain service implementation for identity operations.
///
/// Owns the registration, token-exchange, and hard-deletion workflows over an
/// injected repository. Hashing and verification run on the blocking thread
/// pool: they are deliberately memory- and CPU-expensive, and requests must be
/// able to hash in parallel without stalling the async executor.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_issuer: Arc<TokenIssuer>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// All configuration (cost parameters, signing key, TTL) is already baked
    /// into the hasher and issuer; the service itself holds no settings.
    pub fn new(
        repository: Arc<R>,
        password_hasher: Arc<PasswordHasher>,
        token_issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| UserError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(|e| UserError::Internal(format!("Password verification failed: {}", e)))
    }
}

#[async_trait]
impl<R> IdentityService for UserService<R>
where
    R: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<RegisteredUser, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            email_verified: false,
            password_hash,
            verification_code: None,
            verification_code_expires_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let registered = RegisteredUser::from(&user);
        self.repository.insert(user).await?;

        tracing::info!(user_id = %registered.id, "user registered");
        Ok(registered)
    }

    async fn request_access_token(
        &self,
        command: AccessTokenCommand,
    ) -> Result<IssuedToken, UserError> {
        let user = self
            .repository
            .find_by_email(&command.username)
            .await
            .map_err(|e| {
                if matches!(e, UserError::NotFoundByEmail(_)) {
                    // Kept distinct from a password mismatch for diagnostics;
                    // the HTTP boundary presents both identically.
                    tracing::debug!("token exchange rejected: unknown email");
                }
                e
            })?;

        let valid = self
            .verify_password(command.password, user.password_hash.clone())
            .await?;
        if !valid {
            tracing::debug!(user_id = %user.id, "token exchange rejected: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        let issued = self
            .token_issuer
            .issue(&user.id.to_string())
            .map_err(|e| UserError::Internal(format!("Token signing failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "access token issued");
        Ok(issued)
    }

    async fn hard_delete_user(&self, command: HardDeleteUserCommand) -> Result<(), UserError> {
        let user = self.repository.find_by_id(&command.id).await?;

        let valid = self
            .verify_password(command.password, user.password_hash.clone())
            .await?;
        if !valid {
            tracing::debug!(user_id = %user.id, "hard deletion rejected: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        self.repository.hard_delete_by_id(&command.id).await?;

        tracing::info!(user_id = %command.id, "user hard-deleted");
        Ok(())
    }
}
