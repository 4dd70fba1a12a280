use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::models::UserId;

/// Error for ownership checks.
///
/// A subject that cannot be parsed is a malformed request; a subject that
/// parses but names someone else is a forbidden one. Callers map the two to
/// different HTTP statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("Subject claim is not a valid UUID: {0}")]
    MalformedSubject(String),

    #[error("Subject does not own the target resource")]
    NotOwner,
}

/// Authorize a destructive action iff the authenticated subject owns the
/// target resource.
///
/// The comparison is exact equality over canonical UUID values. No roles,
/// groups, or delegation.
pub fn ensure_owner(subject: &str, target: &UserId) -> Result<(), OwnershipError> {
    let subject =
        Uuid::parse_str(subject).map_err(|e| OwnershipError::MalformedSubject(e.to_string()))?;

    if subject == target.0 {
        Ok(())
    } else {
        Err(OwnershipError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_authorized() {
        let id = UserId::new();
        assert_eq!(ensure_owner(&id.to_string(), &id), Ok(()));
    }

    #[test]
    fn test_other_subject_is_forbidden() {
        let target = UserId::new();
        let other = UserId::new();
        assert_eq!(
            ensure_owner(&other.to_string(), &target),
            Err(OwnershipError::NotOwner)
        );
    }

    #[test]
    fn test_uppercase_subject_still_matches() {
        // UUID comparison is over canonical values, not strings
        let id = UserId::new();
        let uppercase = id.to_string().to_uppercase();
        assert_eq!(ensure_owner(&uppercase, &id), Ok(()));
    }

    #[test]
    fn test_malformed_subject_is_distinct_from_mismatch() {
        let target = UserId::new();

        for subject in ["", "not-a-uuid", "1234", "794defc3-109a-4c6f"] {
            match ensure_owner(subject, &target) {
                Err(OwnershipError::MalformedSubject(_)) => {}
                other => panic!("expected MalformedSubject, got {:?}", other),
            }
        }
    }
}
