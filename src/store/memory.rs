//! In-memory store for HTTP and lifecycle tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::ServiceResult;
use crate::models::{NewTask, NewUser, Task, TaskStatus, User};

use super::{TaskStore, UserStore};

/// Thread-safe in-memory store. Identifiers start at 1, like a serial column.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: BTreeMap<i32, Task>,
    users: BTreeMap<i32, User>,
    last_task_id: i32,
    last_user_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks.
    pub async fn task_count(&self) -> usize {
        self.state.read().await.tasks.len()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, new_task: NewTask) -> ServiceResult<Task> {
        let mut state = self.state.write().await;
        state.last_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: state.last_task_id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            user_id: new_task.user_id,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_task(&self, id: i32) -> ServiceResult<Option<Task>> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, owner: Option<i32>) -> ServiceResult<Vec<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .values()
            .filter(|t| owner.is_none_or(|owner| t.user_id == owner))
            .cloned()
            .collect())
    }

    async fn set_task_status(&self, id: i32, status: TaskStatus) -> ServiceResult<Option<Task>> {
        let mut state = self.state.write().await;
        Ok(state.tasks.get_mut(&id).map(|task| {
            if task.status != status {
                task.status = status;
                task.updated_at = Utc::now();
            }
            task.clone()
        }))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let mut state = self.state.write().await;
        state.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.last_user_id,
            name: new_user.name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> ServiceResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }
}
