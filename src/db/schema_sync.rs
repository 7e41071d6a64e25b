//! Create-if-absent schema reconciliation run once per process at startup.
//!
//! Every statement is idempotent and non-destructive: existing tables, types
//! and rows are left untouched.

use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::config::ServiceKind;

use super::DbError;

const TASK_SCHEMA: &[&str] = &[
    // Postgres has no CREATE TYPE IF NOT EXISTS
    r#"DO $$
BEGIN
    CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END
$$"#,
    r#"CREATE TABLE IF NOT EXISTS tasks (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    status task_status NOT NULL DEFAULT 'pending',
    user_id INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#,
    "CREATE INDEX IF NOT EXISTS tasks_user_id_idx ON tasks (user_id)",
];

const USER_SCHEMA: &[&str] = &[r#"CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#];

/// DDL owned by the given service.
pub(crate) fn statements_for(service: ServiceKind) -> &'static [&'static str] {
    match service {
        ServiceKind::Tasks => TASK_SCHEMA,
        ServiceKind::Users => USER_SCHEMA,
    }
}

/// Ensure the tables used by `service` exist.
pub async fn reconcile_schema(
    conn: &mut AsyncPgConnection,
    service: ServiceKind,
) -> Result<(), DbError> {
    for statement in statements_for(service) {
        diesel::sql_query(*statement).execute(conn).await?;
    }
    log::info!("Schema reconciled for {}", service.name());
    Ok(())
}
