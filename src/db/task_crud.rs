use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::{NewTask, Task, TaskStatus};

use super::DbError;

/// Insert a task and return it with its assigned id and timestamps.
pub(crate) async fn insert_task(
    conn: &mut AsyncPgConnection,
    new_task: &NewTask,
) -> Result<Task, DbError> {
    use crate::schema::tasks::dsl::tasks;

    let task = diesel::insert_into(tasks)
        .values(new_task)
        .returning(Task::as_returning())
        .get_result(conn)
        .await?;

    Ok(task)
}

/// Find a task by id. Returns None if the task doesn't exist.
pub(crate) async fn find_task_by_id(
    conn: &mut AsyncPgConnection,
    task_id: i32,
) -> Result<Option<Task>, DbError> {
    use crate::schema::tasks::dsl::*;

    let task = tasks
        .find(task_id)
        .select(Task::as_select())
        .first(conn)
        .await
        .optional()?;

    Ok(task)
}

/// List tasks in id order, optionally restricted to one owner.
pub(crate) async fn list_tasks(
    conn: &mut AsyncPgConnection,
    owner: Option<i32>,
) -> Result<Vec<Task>, DbError> {
    use crate::schema::tasks::dsl::*;

    let rows = match owner {
        Some(owner) => {
            tasks
                .filter(user_id.eq(owner))
                .order(id.asc())
                .select(Task::as_select())
                .load(conn)
                .await?
        }
        None => {
            tasks
                .order(id.asc())
                .select(Task::as_select())
                .load(conn)
                .await?
        }
    };

    Ok(rows)
}

/// Overwrite the status of a task. Returns None when no row has this id.
///
/// Writing the current status again touches nothing, `updated_at` included.
pub(crate) async fn update_task_status(
    conn: &mut AsyncPgConnection,
    task_id: i32,
    new_status: TaskStatus,
) -> Result<Option<Task>, DbError> {
    use crate::schema::tasks::dsl::*;
    use diesel::dsl::now;

    let updated = diesel::update(tasks.find(task_id).filter(status.ne(new_status)))
        .set((status.eq(new_status), updated_at.eq(now)))
        .returning(Task::as_returning())
        .get_result(conn)
        .await
        .optional()?;

    match updated {
        Some(task) => Ok(Some(task)),
        // unchanged or missing
        None => find_task_by_id(conn, task_id).await,
    }
}
