use crate::dtos::NewUserDto;
use crate::error::{ServiceError, ServiceResult};
use crate::models::NewUser;

/// Validates a create-user body.
pub fn validate_new_user(dto: NewUserDto) -> ServiceResult<NewUser> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    match (non_empty(dto.name), non_empty(dto.email)) {
        (Some(name), Some(email)) => Ok(NewUser { name, email }),
        _ => Err(ServiceError::Validation(
            "name and email are required".to_string(),
        )),
    }
}
