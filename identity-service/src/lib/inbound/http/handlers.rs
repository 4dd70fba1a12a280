use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::guard::OwnershipError;
use crate::user::errors::UserError;

pub mod delete_user;
pub mod register;
pub mod token;

const INTERNAL_ERROR_MESSAGE: &str =
    "The server encountered an unexpected condition that prevented it from fulfilling the request.";

/// HTTP-facing error with a fixed status mapping.
///
/// Construction from `UserError` already applies the boundary policy:
/// credential failures are indistinguishable from unknown accounts, and
/// internal detail never reaches the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidEmail(_) | UserError::InvalidUserId(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::EmailAlreadyInUse(_) => {
                ApiError::Conflict("There is already an user with provided email.".to_string())
            }
            // One externally observable response for both causes, so the
            // endpoint cannot be used to probe which emails are registered
            UserError::NotFoundByEmail(_) | UserError::InvalidCredentials => {
                ApiError::BadRequest("Invalid credentials.".to_string())
            }
            UserError::NotFoundById(_) => {
                ApiError::NotFound("Could not find any user with provided ID.".to_string())
            }
            UserError::Internal(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<OwnershipError> for ApiError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::MalformedSubject(_) => {
                ApiError::BadRequest("Bearer token subject is not a valid UUID.".to_string())
            }
            OwnershipError::NotOwner => ApiError::Forbidden(
                "You are not allowed to request deletion of another user.".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_failures_collapse_to_one_response() {
        let unknown = ApiError::from(UserError::NotFoundByEmail("a@x.com".to_string()));
        let mismatch = ApiError::from(UserError::InvalidCredentials);
        assert_eq!(unknown, mismatch);
    }

    #[test]
    fn test_email_conflict_maps_to_conflict() {
        let err = ApiError::from(UserError::EmailAlreadyInUse("a@x.com".to_string()));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_internal_detail_is_not_echoed() {
        let err = ApiError::from(UserError::Internal("pg: connection refused".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ownership_mapping() {
        assert!(matches!(
            ApiError::from(OwnershipError::MalformedSubject("bad".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(OwnershipError::NotOwner),
            ApiError::Forbidden(_)
        ));
    }
}
