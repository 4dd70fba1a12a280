use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::guard;
use crate::domain::user::models::HardDeleteUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;
use crate::user::ports::IdentityService;
use crate::user::ports::UserRepository;

pub async fn delete_user<R: UserRepository>(
    State(state): State<AppState<R>>,
    Extension(subject): Extension<AuthenticatedSubject>,
    Path(id): Path<String>,
    Json(body): Json<DeleteUserRequestBody>,
) -> Result<StatusCode, ApiError> {
    let target = UserId::from_string(&id)
        .map_err(|_| ApiError::BadRequest("User ID must be a valid UUID.".to_string()))?;

    // Ownership gate: the token subject must be the account being deleted
    guard::ensure_owner(&subject.claims.sub, &target)?;

    if body.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Field 'password' cannot be an empty string.".to_string(),
        ));
    }

    state
        .identity_service
        .hard_delete_user(HardDeleteUserCommand::new(target, body.password))
        .await
        .map_err(ApiError::from)?;

    state.counters.record_user_deleted();

    Ok(StatusCode::NO_CONTENT)
}

/// HTTP request body for account deletion (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteUserRequestBody {
    password: String,
}
