use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Filter parameters for `GET /tasks`.
#[derive(Debug, Serialize, Deserialize, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskFilterDto {
    /// Only return tasks owned by this user. Must be an integer.
    pub user_id: Option<String>,
}
