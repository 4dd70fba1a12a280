use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::AccessTokenCommand;
use crate::inbound::http::router::AppState;
use crate::user::ports::IdentityService;
use crate::user::ports::UserRepository;

/// OAuth2-style password grant: form-encoded request, JSON response.
pub async fn request_access_token<R: UserRepository>(
    State(state): State<AppState<R>>,
    Form(body): Form<AccessTokenRequestBody>,
) -> Result<Json<AccessTokenResponseData>, ApiError> {
    let command = body.try_into_command()?;

    let issued = state
        .identity_service
        .request_access_token(command)
        .await
        .map_err(ApiError::from)?;

    state.counters.record_token_issued();

    Ok(Json(AccessTokenResponseData {
        access_token: issued.access_token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
    }))
}

/// HTTP request body for the token endpoint
/// (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTokenRequestBody {
    #[serde(default)]
    grant_type: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl AccessTokenRequestBody {
    fn try_into_command(self) -> Result<AccessTokenCommand, ApiError> {
        if self.grant_type != "password" {
            return Err(ApiError::BadRequest(
                "grant_type must be password".to_string(),
            ));
        }

        if self.username.is_empty() {
            return Err(ApiError::BadRequest(
                "username must not be empty".to_string(),
            ));
        }

        if self.password.is_empty() {
            return Err(ApiError::BadRequest(
                "password must not be empty".to_string(),
            ));
        }

        Ok(AccessTokenCommand::new(self.username, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
