//! Startup connectivity sequence.
//!
//! Before a service accepts traffic it must reach its database. A [`Prober`]
//! performs one attempt; the [`BootstrapSequencer`] drives it with a bounded
//! number of strictly sequential attempts separated by a fixed delay. Once an
//! attempt succeeds the sequence is over for the life of the process. When
//! the attempts run out the caller is expected to exit with a non-zero status.

use std::time::Duration;

use async_trait::async_trait;
use diesel_async::{AsyncConnection, AsyncPgConnection};
use thiserror::Error;

use crate::config::{BootstrapConfig, Config, ServiceKind};
use crate::{db, metrics};

/// Why a single attempt failed.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("schema reconciliation failed: {0}")]
    Schema(#[from] crate::error::ServiceError),
}

/// Terminal failure of the whole sequence.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("database unreachable after {attempts} attempts, last error: {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

/// One connectivity attempt against the backing store.
///
/// `probe` takes `&mut self`, so a sequencer can never have two attempts in
/// flight.
#[async_trait]
pub trait Prober: Send {
    async fn probe(&mut self) -> Result<(), ProbeError>;
}

/// Attempt ceiling and the fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&BootstrapConfig::default())
    }
}

impl From<&BootstrapConfig> for RetryPolicy {
    fn from(config: &BootstrapConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay)
    }
}

/// Sequencer state. `Probing(n)` holds the zero-based index of the attempt
/// about to run; `Connected` and `FailedPermanently` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    NotStarted,
    Probing(u32),
    Connected,
    FailedPermanently,
}

impl BootstrapState {
    /// Transition after an attempt finished. `NotStarted` always moves to the
    /// first attempt; terminal states never move.
    pub fn next(self, succeeded: bool, max_attempts: u32) -> BootstrapState {
        match self {
            BootstrapState::NotStarted => BootstrapState::Probing(0),
            BootstrapState::Probing(_) if succeeded => BootstrapState::Connected,
            BootstrapState::Probing(n) if n + 1 < max_attempts => BootstrapState::Probing(n + 1),
            BootstrapState::Probing(_) => BootstrapState::FailedPermanently,
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BootstrapState::Connected | BootstrapState::FailedPermanently
        )
    }
}

/// Drives a [`Prober`] until it succeeds or the policy is exhausted.
pub struct BootstrapSequencer<P> {
    prober: P,
    policy: RetryPolicy,
    state: BootstrapState,
    attempts: u32,
}

impl<P: Prober> BootstrapSequencer<P> {
    pub fn new(prober: P, policy: RetryPolicy) -> Self {
        Self {
            prober,
            policy,
            state: BootstrapState::NotStarted,
            attempts: 0,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Attempts made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Run the sequence to a terminal state.
    ///
    /// Returns the number of attempts used on success. Once terminal, calling
    /// it again reports the same outcome without probing.
    pub async fn run(&mut self) -> Result<u32, BootstrapError> {
        let max = self.policy.max_attempts();
        let mut last_error = String::new();

        if self.state == BootstrapState::NotStarted {
            self.state = self.state.next(false, max);
        }

        while let BootstrapState::Probing(attempt) = self.state {
            log::info!(
                "Connecting to database (attempt {}/{})",
                attempt + 1,
                max
            );

            let succeeded = match self.prober.probe().await {
                Ok(()) => {
                    metrics::record_bootstrap_attempt("success");
                    true
                }
                Err(e) => {
                    log::error!("Database connection attempt {} failed: {}", attempt + 1, e);
                    metrics::record_bootstrap_attempt("failure");
                    last_error = e.to_string();
                    false
                }
            };

            self.attempts = attempt + 1;
            self.state = self.state.next(succeeded, max);

            if let BootstrapState::Probing(_) = self.state {
                tokio::time::sleep(self.policy.retry_delay()).await;
            }
        }

        if self.state == BootstrapState::Connected {
            log::info!("Database connected after {} attempt(s)", self.attempts);
            return Ok(self.attempts);
        }

        log::error!(
            "Database connection failed after {} attempts, giving up",
            self.attempts
        );
        Err(BootstrapError::Exhausted {
            attempts: self.attempts,
            last_error,
        })
    }
}

/// Opens a fresh Postgres connection and reconciles the service's schema on it.
pub struct PgProber {
    database_url: String,
    service: ServiceKind,
}

impl PgProber {
    pub fn new(database_url: impl Into<String>, service: ServiceKind) -> Self {
        Self {
            database_url: database_url.into(),
            service,
        }
    }
}

#[async_trait]
impl Prober for PgProber {
    async fn probe(&mut self) -> Result<(), ProbeError> {
        let mut conn = AsyncPgConnection::establish(&self.database_url).await?;
        db::reconcile_schema(&mut conn, self.service).await?;
        Ok(())
    }
}

/// Run the startup sequence for `config.service` against `config.database_url`.
pub async fn connect_with_retry(config: &Config) -> Result<u32, BootstrapError> {
    let prober = PgProber::new(config.database_url.clone(), config.service);
    let mut sequencer = BootstrapSequencer::new(prober, RetryPolicy::from(&config.bootstrap));
    sequencer.run().await
}
