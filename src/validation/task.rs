use serde_json::Value;

use crate::dtos::NewTaskDto;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewTask, TaskStatus};

const REQUIRED_FIELDS: &str = "title and userId are required";

/// Validates a create-task body and turns it into a row ready to insert.
///
/// Only the shape is checked here; whether the user exists is decided by the
/// dependency validator afterwards.
pub fn validate_new_task(dto: NewTaskDto) -> ServiceResult<NewTask> {
    let title = dto
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ServiceError::Validation(REQUIRED_FIELDS.to_string()))?;

    let raw_user_id = match dto.user_id {
        None | Some(Value::Null) => {
            return Err(ServiceError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Some(v) => v,
    };

    let user_id = resolve_user_id(&raw_user_id).ok_or_else(|| {
        ServiceError::Validation("userId must be a positive integer".to_string())
    })?;

    Ok(NewTask {
        title,
        description: dto.description,
        status: TaskStatus::Pending,
        user_id,
    })
}

/// Resolve a JSON number or numeric string to a positive user identifier.
pub fn resolve_user_id(value: &Value) -> Option<i32> {
    let id = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }?;
    (id > 0).then_some(id)
}

/// Membership check only: every known status is accepted from every other.
pub fn parse_status(value: Option<&Value>) -> ServiceResult<TaskStatus> {
    match value {
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(ServiceError::InvalidStatus(other.to_string())),
        None => Err(ServiceError::InvalidStatus(String::new())),
    }
}
