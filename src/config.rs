//! Service configuration management.
//!
//! Provides typed configuration loaded from environment variables with validation.
//! Both binaries share the same loader; [`ServiceKind`] selects the defaults and
//! requirements that differ between them.

use std::time::Duration;

/// Which of the two services is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Tasks,
    Users,
}

impl ServiceKind {
    /// Port used when `PORT` is not set.
    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Tasks => 3000,
            ServiceKind::Users => 3001,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Tasks => "task-service",
            ServiceKind::Users => "user-service",
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceKind,

    /// PostgreSQL database connection URL
    pub database_url: String,

    /// Server port to bind to
    pub port: u16,

    /// Database connection pool settings
    pub pool: PoolConfig,

    /// Startup connection retry settings
    pub bootstrap: BootstrapConfig,

    /// Remote user-service settings (only used by the task service)
    pub dependency: DependencyConfig,
}

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// Connection acquisition timeout
    pub connection_timeout: Duration,
}

/// Startup connectivity retry configuration.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Attempts before giving up and exiting
    pub max_attempts: u32,

    /// Fixed wait between two attempts
    pub retry_delay: Duration,
}

/// Configuration of the outbound user existence check.
#[derive(Debug, Clone)]
pub struct DependencyConfig {
    /// Users collection URL, e.g. `http://user-service:3001/users`
    pub user_service_url: Option<String>,

    /// Upper bound for a single existence check
    pub timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            retry_delay: Duration::from_millis(3000),
        }
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            user_service_url: None,
            timeout: Duration::from_millis(5000),
        }
    }
}

/// Configuration loading error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration error for '{}': {}",
            self.field, self.message
        )
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Database location, one of:
    /// - `DATABASE_URL`: PostgreSQL connection string
    /// - `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and optional `DB_PORT` (default: 5432)
    ///
    /// Optional environment variables:
    /// - `PORT`: Server port (default: 3000 for tasks, 3001 for users)
    /// - `POOL_MAX_SIZE`: Max pool connections (default: 10)
    /// - `POOL_TIMEOUT_SECS`: Pool acquisition timeout (default: 30)
    /// - `BOOTSTRAP_MAX_ATTEMPTS`: Startup connection attempts (default: 10)
    /// - `BOOTSTRAP_RETRY_DELAY_MS`: Delay between attempts in ms (default: 3000)
    /// - `USER_SERVICE_URL`: Users collection URL, required by the task service
    /// - `USER_SERVICE_TIMEOUT_MS`: Existence check timeout in ms (default: 5000)
    pub fn from_env(service: ServiceKind) -> Result<Self, ConfigError> {
        let database_url = database_url_from_env()?;

        let port = parse_env_or("PORT", service.default_port())?;

        let pool = PoolConfig {
            max_size: parse_env_or("POOL_MAX_SIZE", 10)?,
            connection_timeout: Duration::from_secs(parse_env_or("POOL_TIMEOUT_SECS", 30)?),
        };

        let bootstrap = BootstrapConfig {
            max_attempts: parse_env_or("BOOTSTRAP_MAX_ATTEMPTS", 10)?,
            retry_delay: Duration::from_millis(parse_env_or("BOOTSTRAP_RETRY_DELAY_MS", 3000)?),
        };

        let dependency = DependencyConfig {
            user_service_url: std::env::var("USER_SERVICE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string()),
            timeout: Duration::from_millis(parse_env_or("USER_SERVICE_TIMEOUT_MS", 5000)?),
        };

        let config = Self {
            service,
            database_url,
            port,
            pool,
            bootstrap,
            dependency,
        };

        config.validate()?;
        Ok(config)
    }

    /// Users collection URL; only present when configured.
    pub fn user_service_url(&self) -> Result<&str, ConfigError> {
        self.dependency
            .user_service_url
            .as_deref()
            .ok_or_else(|| ConfigError {
                field: "USER_SERVICE_URL".to_string(),
                message: "Required environment variable not set".to_string(),
            })
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.is_empty() {
            return Err(ConfigError {
                field: "DATABASE_URL".to_string(),
                message: "Cannot be empty".to_string(),
            });
        }

        if self.pool.max_size == 0 {
            return Err(ConfigError {
                field: "POOL_MAX_SIZE".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.bootstrap.max_attempts == 0 {
            return Err(ConfigError {
                field: "BOOTSTRAP_MAX_ATTEMPTS".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.service == ServiceKind::Tasks {
            let url = self.user_service_url()?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError {
                    field: "USER_SERVICE_URL".to_string(),
                    message: "Must start with http:// or https://".to_string(),
                });
            }
        }

        if self.dependency.timeout.is_zero() {
            return Err(ConfigError {
                field: "USER_SERVICE_TIMEOUT_MS".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Read `DATABASE_URL`, or compose one from the discrete `DB_*` variables.
fn database_url_from_env() -> Result<String, ConfigError> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }

    let required = |name: &str| {
        std::env::var(name).map_err(|_| ConfigError {
            field: name.to_string(),
            message: "Required when DATABASE_URL is not set".to_string(),
        })
    };

    let host = required("DB_HOST")?;
    let user = required("DB_USER")?;
    let password = required("DB_PASSWORD")?;
    let name = required("DB_NAME")?;
    let port: u16 = parse_env_or("DB_PORT", 5432)?;

    Ok(compose_database_url(&host, port, &user, &password, &name))
}

pub(crate) fn compose_database_url(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    name: &str,
) -> String {
    format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
}

/// Parse an environment variable or return a default value.
fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(val) => val.parse().map_err(|_| ConfigError {
            field: name.to_string(),
            message: format!("Invalid value '{}', expected a valid number", val),
        }),
        Err(_) => Ok(default),
    }
}
