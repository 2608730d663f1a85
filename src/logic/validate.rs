use crate::error::{ServiceError, ServiceResult};
use crate::model::{CreateItemRequest, CreateUserRequest, UpdateUserRequest, UserType};

/// Request checks that must pass before anything is written
pub struct RequestValidator;

impl RequestValidator {
    /// Validate a user create, including every nested item create.
    ///
    /// Items are checked here too so a bad child name cannot leave a parent
    /// row behind.
    pub fn validate_create_user(request: &CreateUserRequest) -> ServiceResult<()> {
        if request.name.is_empty() {
            return Err(ServiceError::empty_user_name());
        }
        if request.age <= 0 {
            return Err(ServiceError::invalid_age());
        }
        if request.user_type == UserType::Invalid {
            return Err(ServiceError::invalid_user_type());
        }
        for item in &request.items {
            Self::validate_create_item(item)?;
        }
        Ok(())
    }

    pub fn validate_create_item(request: &CreateItemRequest) -> ServiceResult<()> {
        if request.name.is_empty() {
            return Err(ServiceError::empty_item_name());
        }
        Ok(())
    }

    /// Zero still means "leave age alone"; only negative ages are rejected
    pub fn validate_update_user(request: &UpdateUserRequest) -> ServiceResult<()> {
        if matches!(request.age, Some(age) if age < 0) {
            return Err(ServiceError::invalid_age());
        }
        Ok(())
    }
}
