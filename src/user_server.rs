//! User service.
//!
//! Same startup sequence as the task service, then serves `/users`. Its
//! `GET /users/{id}` is what the task service calls to check owners.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use actix_web_prometheus::PrometheusMetricsBuilder;
use taskboard::{
    bootstrap,
    config::{Config, ServiceKind},
    handlers::{self, UserState},
    initialize_db_pool, metrics,
    store::PgStore,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env(ServiceKind::Users) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    metrics::init_metrics();

    if let Err(e) = bootstrap::connect_with_retry(&config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }

    let pool = initialize_db_pool(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = UserState {
        users: Arc::new(PgStore::new(pool)),
    };

    let prometheus = PrometheusMetricsBuilder::new("user_service")
        .registry(metrics::REGISTRY.clone())
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "starting {} at http://0.0.0.0:{}",
        config.service.name(),
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(prometheus.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure_user_routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
