//! Remote existence check for users referenced by tasks.
//!
//! The check is fail-closed: only an exact `200 OK` from the user service
//! means the user exists. Any other status, a redirect, a transport error or
//! a timeout is reported as "does not exist". The reason is logged and then
//! discarded; callers only ever see a boolean.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::metrics;

/// Outcome of one lookup against the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup {
    Exists,
    /// Definitely absent or could not be determined.
    Absent,
}

impl UserLookup {
    pub fn exists(self) -> bool {
        self == UserLookup::Exists
    }

    fn label(self) -> &'static str {
        match self {
            UserLookup::Exists => "exists",
            UserLookup::Absent => "absent",
        }
    }
}

/// Existence check consumed by the task lifecycle.
#[async_trait]
pub trait UserValidator: Send + Sync {
    /// Never fails; ambiguity collapses to `false`.
    async fn user_exists(&self, user_id: i32) -> bool;
}

/// Checks users with `GET <base_url>/<id>` on the user service.
#[derive(Debug, Clone)]
pub struct HttpUserValidator {
    base_url: String,
    http: reqwest::Client,
}

impl HttpUserValidator {
    /// `base_url` is the users collection, e.g. `http://user-service:3001/users`.
    ///
    /// `timeout` bounds the whole request, connect included. Redirects are
    /// not followed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self::with_http_client(base_url, http))
    }

    /// Use a preconfigured client, e.g. one with custom TLS settings.
    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base_url: base,
            http,
        }
    }

    pub fn user_url(&self, user_id: i32) -> String {
        format!("{}/{}", self.base_url, user_id)
    }

    /// Single-shot lookup, no retry.
    pub async fn lookup(&self, user_id: i32) -> UserLookup {
        let url = self.user_url(user_id);
        let started = Instant::now();

        let outcome = match self.http.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                log::debug!("User {} exists ({})", user_id, url);
                UserLookup::Exists
            }
            Ok(response) => {
                log::warn!(
                    "User {} treated as absent: user service answered {}",
                    user_id,
                    response.status()
                );
                UserLookup::Absent
            }
            Err(e) => {
                log::warn!(
                    "User {} treated as absent: request to {} failed: {}",
                    user_id,
                    url,
                    e
                );
                UserLookup::Absent
            }
        };

        metrics::record_user_check(outcome.label(), started.elapsed().as_secs_f64());
        outcome
    }
}

#[async_trait]
impl UserValidator for HttpUserValidator {
    async fn user_exists(&self, user_id: i32) -> bool {
        self.lookup(user_id).await.exists()
    }
}
