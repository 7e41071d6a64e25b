//! Input shape checks for identifiers and request bodies.
//!
//! Everything here is pure: no store access, no network. Failures are
//! reported as client input errors.

mod task;
mod user;

use crate::error::{ServiceError, ServiceResult};

pub use task::{parse_status, resolve_user_id, validate_new_task};
pub use user::validate_new_user;

/// Parse a path or query identifier.
///
/// The whole string must be an integer: `12abc` is rejected, not read as 12.
pub fn parse_id(raw: &str) -> ServiceResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| ServiceError::InvalidId(raw.to_string()))
}
