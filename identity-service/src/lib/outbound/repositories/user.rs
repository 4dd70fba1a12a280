use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const INSERT_USER: &str = r#"
INSERT INTO users (
    id, email, email_verified, password_hash,
    verification_code, verification_code_expires_at,
    created_at, updated_at, deleted_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
"#;

const SELECT_BY_EMAIL: &str = r#"
SELECT id, email, email_verified, password_hash,
       verification_code, verification_code_expires_at,
       created_at, updated_at, deleted_at
FROM users
WHERE email = $1
"#;

const SELECT_BY_ID: &str = r#"
SELECT id, email, email_verified, password_hash,
       verification_code, verification_code_expires_at,
       created_at, updated_at, deleted_at
FROM users
WHERE id = $1
"#;

const DELETE_BY_ID: &str = r#"
DELETE FROM users
WHERE id = $1
"#;

/// Postgres adapter for the `UserRepository` port.
///
/// Every query runs under the configured statement timeout so a stalled
/// backend surfaces as an internal failure instead of hanging the request.
pub struct PostgresUserRepository {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    email_verified: bool,
    password_hash: String,
    verification_code: Option<String>,
    verification_code_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            email_verified: row.email_verified,
            password_hash: row.password_hash,
            verification_code: row.verification_code,
            verification_code_expires_at: row.verification_code_expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

fn timed_out(operation: &str) -> UserError {
    tracing::warn!(operation, "database query timed out");
    UserError::Internal(format!("database query timed out: {}", operation))
}

fn db_failure(operation: &str, e: sqlx::Error) -> UserError {
    tracing::warn!(operation, error = %e, "database query failed");
    UserError::Internal(format!("database query failed: {}", operation))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: User) -> Result<(), UserError> {
        let query = sqlx::query(INSERT_USER)
            .bind(user.id.0)
            .bind(user.email.as_str())
            .bind(user.email_verified)
            .bind(&user.password_hash)
            .bind(&user.verification_code)
            .bind(user.verification_code_expires_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.deleted_at);

        tokio::time::timeout(self.statement_timeout, query.execute(&self.pool))
            .await
            .map_err(|_| timed_out("insert"))?
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some("users_email_key")
                    {
                        return UserError::EmailAlreadyInUse(user.email.as_str().to_string());
                    }
                }
                db_failure("insert", e)
            })?;

        tracing::info!(user_id = %user.id, "inserted new user");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UserError> {
        let query = sqlx::query_as::<_, UserRow>(SELECT_BY_EMAIL).bind(email);

        let row = tokio::time::timeout(self.statement_timeout, query.fetch_optional(&self.pool))
            .await
            .map_err(|_| timed_out("find_by_email"))?
            .map_err(|e| db_failure("find_by_email", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(UserError::NotFoundByEmail(email.to_string())),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserError> {
        let query = sqlx::query_as::<_, UserRow>(SELECT_BY_ID).bind(id.0);

        let row = tokio::time::timeout(self.statement_timeout, query.fetch_optional(&self.pool))
            .await
            .map_err(|_| timed_out("find_by_id"))?
            .map_err(|e| db_failure("find_by_id", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(UserError::NotFoundById(id.to_string())),
        }
    }

    async fn hard_delete_by_id(&self, id: &UserId) -> Result<(), UserError> {
        let query = sqlx::query(DELETE_BY_ID).bind(id.0);

        let result = tokio::time::timeout(self.statement_timeout, query.execute(&self.pool))
            .await
            .map_err(|_| timed_out("hard_delete_by_id"))?
            .map_err(|e| db_failure("hard_delete_by_id", e))?;

        // Deleting an absent row is not a repository error; the workflow's
        // preceding lookup is what reports missing users
        tracing::info!(
            user_id = %id,
            rows_affected = result.rows_affected(),
            "hard-deleted user"
        );
        Ok(())
    }
}
