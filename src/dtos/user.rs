use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input DTO for `POST /users`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewUserDto {
    pub name: Option<String>,
    pub email: Option<String>,
}
