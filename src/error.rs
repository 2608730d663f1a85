use crate::model::Id;
use serde::Serialize;

/// Machine-checkable failure category reported alongside every error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    InconsistentRequest,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("user with id {{{0}}} not found")]
    UserNotFound(Id),

    #[error("item with id {{{0}}} not found")]
    ItemNotFound(Id),

    #[error("items {item_ids:?} do not belong to user with id {{{user_id}}}")]
    InconsistentRequest { user_id: Id, item_ids: Vec<Id> },

    #[error("item with id {{{0}}} appears more than once in the update")]
    DuplicateItemUpdate(Id),

    /// Failure reported by the storage collaborator, passed through as-is
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn empty_user_name() -> Self {
        Self::InvalidArgument("user name can't be empty".to_string())
    }

    pub fn invalid_age() -> Self {
        Self::InvalidArgument("user age must be a positive integer".to_string())
    }

    pub fn invalid_user_type() -> Self {
        Self::InvalidArgument("invalid user type".to_string())
    }

    pub fn empty_item_name() -> Self {
        Self::InvalidArgument("item name can't be empty".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ServiceError::UserNotFound(_) | ServiceError::ItemNotFound(_) => ErrorKind::NotFound,
            ServiceError::InconsistentRequest { .. } | ServiceError::DuplicateItemUpdate(_) => {
                ErrorKind::InconsistentRequest
            }
            ServiceError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
