//! Task creation and status changes.
//!
//! A task is persisted only after its owning user passed the remote
//! existence check. That check is a point-in-time read: nothing re-validates
//! the reference later, and deleting the user does not touch its tasks.

use std::sync::Arc;

use crate::dependency::UserValidator;
use crate::dtos::{NewTaskDto, UpdateTaskDto};
use crate::error::{ServiceError, ServiceResult};
use crate::models::Task;
use crate::store::TaskStore;
use crate::{metrics, validation};

#[derive(Clone)]
pub struct TaskLifecycle {
    store: Arc<dyn TaskStore>,
    users: Arc<dyn UserValidator>,
}

impl TaskLifecycle {
    pub fn new(store: Arc<dyn TaskStore>, users: Arc<dyn UserValidator>) -> Self {
        Self { store, users }
    }

    /// Validate the body, check the owner exists, then persist as `pending`.
    pub async fn create(&self, dto: NewTaskDto) -> ServiceResult<Task> {
        let new_task = validation::validate_new_task(dto)?;

        if !self.users.user_exists(new_task.user_id).await {
            log::info!(
                "Rejecting task {:?}: user {} does not exist",
                new_task.title,
                new_task.user_id
            );
            return Err(ServiceError::UserDoesNotExist(new_task.user_id));
        }

        let task = self.store.insert_task(new_task).await?;
        metrics::record_task_created();
        log::info!("Created task {} for user {}", task.id, task.user_id);
        Ok(task)
    }

    /// Overwrite the status of an existing task.
    ///
    /// The status is checked before the id so that an unknown status is
    /// always a 400, whatever the id.
    pub async fn update_status(&self, raw_id: &str, dto: UpdateTaskDto) -> ServiceResult<Task> {
        let status = validation::parse_status(dto.status.as_ref())?;
        let id = validation::parse_id(raw_id)?;

        let task = self
            .store
            .set_task_status(id, status)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))?;

        metrics::record_status_update(status.as_str());
        log::info!("Task {} status set to {}", task.id, status);
        Ok(task)
    }

    pub async fn get(&self, raw_id: &str) -> ServiceResult<Task> {
        let id = validation::parse_id(raw_id)?;
        self.store
            .find_task(id)
            .await?
            .ok_or(ServiceError::TaskNotFound(id))
    }

    /// All tasks, or those owned by `raw_user_id` when given. An empty value
    /// means no filter.
    pub async fn list(&self, raw_user_id: Option<&str>) -> ServiceResult<Vec<Task>> {
        let owner = match raw_user_id.filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(validation::parse_id(raw).map_err(|_| {
                ServiceError::Validation("invalid user_id".to_string())
            })?),
            None => None,
        };
        self.store.list_tasks(owner).await
    }
}
