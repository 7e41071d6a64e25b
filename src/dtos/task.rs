use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input DTO for `POST /tasks`.
///
/// Fields are optional at the wire level so that missing values surface as a
/// client input error rather than a body parse failure.
///
/// ## Example
/// ```json
/// { "title": "write report", "description": "first draft", "userId": 42 }
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskDto {
    /// Required, non-empty.
    pub title: Option<String>,
    pub description: Option<String>,
    /// Identifier of a user in the user service. A JSON number or a numeric
    /// string; must be a positive integer.
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<serde_json::Value>,
}

/// Input DTO for `PUT /tasks/{id}`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskDto {
    /// One of `pending`, `in_progress`, `completed`. Anything else, including
    /// non-string values, is rejected with 400.
    #[schema(value_type = Option<String>)]
    pub status: Option<serde_json::Value>,
}
