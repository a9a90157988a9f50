//! Typed failures returned by the user and group operations.

use serde_json::json;

use super::ports::RepositoryError;
use super::{Error, GroupValidationError, UserValidationError};

/// Failure kinds surfaced by [`super::ports::UserOperations`] and
/// [`super::ports::GroupOperations`].
///
/// Validation, referential and not-found failures are caller errors and are
/// never retried. Storage failures pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    #[error("invalid user input: {0}")]
    InvalidUserInput(#[source] UserValidationError),
    #[error("invalid group input: {0}")]
    InvalidGroupInput(#[source] GroupValidationError),
    /// A group referenced one or more users that do not exist.
    #[error("invalid user ids")]
    InvalidUserIds,
    #[error("user not found")]
    UserNotFound,
    #[error("group not found")]
    GroupNotFound,
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl OperationError {
    /// Stable snake_case identifier for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUserInput(_) => "invalid_user_input",
            Self::InvalidGroupInput(_) => "invalid_group_input",
            Self::InvalidUserIds => "invalid_user_ids",
            Self::UserNotFound => "user_not_found",
            Self::GroupNotFound => "group_not_found",
            Self::Storage(_) => "storage",
        }
    }
}

impl From<UserValidationError> for OperationError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUserInput(value)
    }
}

impl From<GroupValidationError> for OperationError {
    fn from(value: GroupValidationError) -> Self {
        Self::InvalidGroupInput(value)
    }
}

impl From<OperationError> for Error {
    fn from(value: OperationError) -> Self {
        let details = json!({ "kind": value.kind() });
        match value {
            OperationError::InvalidUserInput(_)
            | OperationError::InvalidGroupInput(_)
            | OperationError::InvalidUserIds => {
                Self::invalid_request(value.to_string()).with_details(details)
            }
            OperationError::UserNotFound | OperationError::GroupNotFound => {
                Self::not_found(value.to_string()).with_details(details)
            }
            OperationError::Storage(source) => Self::internal(source.to_string()),
        }
    }
}
