pub mod bootstrap;
pub mod config;
pub mod db;
pub mod dependency;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod schema;
pub mod store;
pub mod validation;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, PoolError, bb8};

use crate::config::Config;

/// Short-hand for the database pool type to use throughout the app.
pub type DbPool = bb8::Pool<AsyncPgConnection>;

pub type Conn<'a> = bb8::PooledConnection<'a, AsyncPgConnection>;

/// Build the request-serving pool. Called once the startup sequence has
/// reached the database, so the first checkout is not expected to fail.
pub async fn initialize_db_pool(config: &Config) -> Result<DbPool, PoolError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.database_url);
    DbPool::builder()
        .max_size(config.pool.max_size)
        .connection_timeout(config.pool.connection_timeout)
        .build(manager)
        .await
}
