//! Persistence seams for the two services.
//!
//! Handlers and the task lifecycle only see these traits. `PgStore` is the
//! production adapter; `MemoryStore` backs the HTTP tests.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{NewTask, NewUser, Task, TaskStatus, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Task persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task and returns it with its assigned identifier.
    async fn insert_task(&self, new_task: NewTask) -> ServiceResult<Task>;

    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: i32) -> ServiceResult<Option<Task>>;

    /// All tasks, or only those owned by `owner`, in identifier order.
    async fn list_tasks(&self, owner: Option<i32>) -> ServiceResult<Vec<Task>>;

    /// Overwrites the status. Setting the current status again leaves the
    /// task untouched. Returns `None` when the task does not exist.
    async fn set_task_status(&self, id: i32, status: TaskStatus) -> ServiceResult<Option<Task>>;
}

/// User persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, new_user: NewUser) -> ServiceResult<User>;

    async fn find_user(&self, id: i32) -> ServiceResult<Option<User>>;

    async fn list_users(&self) -> ServiceResult<Vec<User>>;
}
