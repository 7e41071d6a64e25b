use async_trait::async_trait;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewTask, NewUser, Task, TaskStatus, User};
use crate::{Conn, DbPool, db};

use super::{TaskStore, UserStore};

/// Postgres-backed store over the shared connection pool.
///
/// Connections are acquired once per call with no retry; a pool timeout
/// surfaces as a 500 for that request only.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> ServiceResult<Conn<'_>> {
        self.pool
            .get()
            .await
            .map_err(|e| ServiceError::Pool(e.to_string()))
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, new_task: NewTask) -> ServiceResult<Task> {
        let mut conn = self.conn().await?;
        db::insert_task(&mut conn, &new_task).await
    }

    async fn find_task(&self, id: i32) -> ServiceResult<Option<Task>> {
        let mut conn = self.conn().await?;
        db::find_task_by_id(&mut conn, id).await
    }

    async fn list_tasks(&self, owner: Option<i32>) -> ServiceResult<Vec<Task>> {
        let mut conn = self.conn().await?;
        db::list_tasks(&mut conn, owner).await
    }

    async fn set_task_status(&self, id: i32, status: TaskStatus) -> ServiceResult<Option<Task>> {
        let mut conn = self.conn().await?;
        db::update_task_status(&mut conn, id, status).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let mut conn = self.conn().await?;
        db::insert_user(&mut conn, &new_user).await
    }

    async fn find_user(&self, id: i32) -> ServiceResult<Option<User>> {
        let mut conn = self.conn().await?;
        db::find_user_by_id(&mut conn, id).await
    }

    async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let mut conn = self.conn().await?;
        db::list_users(&mut conn).await
    }
}
