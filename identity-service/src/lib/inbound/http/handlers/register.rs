use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::IdentityService;
use crate::user::ports::UserRepository;

pub async fn register<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<(StatusCode, Json<RegisterResponseData>), ApiError> {
    let command = body.try_into_command()?;

    let registered = state
        .identity_service
        .register(command)
        .await
        .map_err(ApiError::from)?;

    state.counters.record_user_registered();

    Ok((StatusCode::CREATED, Json((&registered).into())))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterUserCommand, ApiError> {
        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::BadRequest(format!("Invalid email: {}", e)))?;

        if self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Field 'password' cannot be an empty string.".to_string(),
            ));
        }

        Ok(RegisterUserCommand::new(email, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&RegisteredUser> for RegisterResponseData {
    fn from(user: &RegisteredUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
