use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::user::models::AccessTokenCommand;
use crate::domain::user::models::HardDeleteUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for identity domain operations.
#[async_trait]
pub trait IdentityService: Send + Sync + 'static {
    /// Create a new account with a uniquely owned email.
    ///
    /// # Returns
    /// The created account with the password hash stripped
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - Email is already registered
    /// * `Internal` - Hashing or persistence failed
    async fn register(&self, command: RegisterUserCommand) -> Result<RegisteredUser, UserError>;

    /// Exchange email + password credentials for a signed bearer token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Verification, signing, or persistence failed
    async fn request_access_token(
        &self,
        command: AccessTokenCommand,
    ) -> Result<IssuedToken, UserError>;

    /// Irreversibly remove an account after re-verifying its password.
    ///
    /// Not idempotent: repeating a successful deletion yields
    /// `NotFoundById`.
    ///
    /// # Errors
    /// * `NotFoundById` - No account with this ID
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Verification or persistence failed
    async fn hard_delete_user(&self, command: HardDeleteUserCommand) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Exactly the four operations the domain needs. Implementations translate
/// their storage errors into `UserError` kinds at this boundary; raw driver
/// errors never propagate upward.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyInUse` - Unique constraint violation on the email
    /// * `Internal` - Any other persistence failure
    async fn insert(&self, user: User) -> Result<(), UserError>;

    /// Retrieve a user by email (exact, case-sensitive match).
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `Internal` - Persistence failure
    async fn find_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `NotFoundById` - No user with this ID
    /// * `Internal` - Persistence failure
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError>;

    /// Physically remove a user row. Removing an absent row is not an error.
    ///
    /// # Errors
    /// * `Internal` - Persistence failure
    async fn hard_delete_by_id(&self, id: &UserId) -> Result<(), UserError>;
}
