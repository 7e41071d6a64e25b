//! Task service.
//!
//! Reaches its database first (bounded attempts, fixed delay), then serves
//! `/tasks`. Creating a task asks the user service whether the owner exists.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use actix_web_prometheus::PrometheusMetricsBuilder;
use taskboard::{
    bootstrap,
    config::{Config, ServiceKind},
    dependency::HttpUserValidator,
    handlers::{self, TaskState},
    initialize_db_pool,
    lifecycle::TaskLifecycle,
    metrics,
    store::PgStore,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        log::warn!("A rustls crypto provider was already installed");
    }

    let config = match Config::from_env(ServiceKind::Tasks) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    metrics::init_metrics();

    let user_service_url = config
        .user_service_url()
        .map_err(std::io::Error::other)?
        .to_string();
    let validator = HttpUserValidator::new(user_service_url.clone(), config.dependency.timeout)
        .map_err(std::io::Error::other)?;
    log::info!("Checking task owners against {}", user_service_url);

    if let Err(e) = bootstrap::connect_with_retry(&config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }

    // initialize DB pool outside of `HttpServer::new` so that it is shared across all workers
    let pool = initialize_db_pool(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = TaskState {
        lifecycle: TaskLifecycle::new(Arc::new(PgStore::new(pool)), Arc::new(validator)),
    };

    let prometheus = PrometheusMetricsBuilder::new("task_service")
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
            .configure(handlers::configure_task_routes)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
