//! Async Diesel queries and schema reconciliation.
//!
//! Functions take a plain `&mut AsyncPgConnection` so they can run on a pooled
//! connection or on the one-off connection opened during bootstrap.

mod schema_sync;
mod task_crud;
mod user_crud;

pub(crate) type DbError = crate::error::ServiceError;

pub use schema_sync::reconcile_schema;
pub(crate) use task_crud::{find_task_by_id, insert_task, list_tasks, update_task_status};
pub(crate) use user_crud::{find_user_by_id, insert_user, list_users};
