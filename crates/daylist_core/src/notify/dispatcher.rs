//! Push dispatcher seam and HTTP implementation.
//!
//! # Responsibility
//! - Define the async dispatch contract used by the session.
//! - POST payloads to the push relay over HTTPS.
//!
//! # Invariants
//! - Every dispatch call resolves exactly once with `Ok` or `DispatchError`.
//! - Dispatch never touches task list state.

use crate::notify::message::PushMessage;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::time::Duration;

/// Public push relay endpoint.
pub const DEFAULT_PUSH_ENDPOINT: &str = "https://exp.host/--/api/v2/push/send";
/// Environment override for the relay endpoint.
pub const PUSH_ENDPOINT_ENV: &str = "DAYLIST_PUSH_ENDPOINT";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Notification send failure. Non-fatal: logged and reported only.
#[derive(Debug)]
pub enum DispatchError {
    /// Client construction, connect, timeout or body read failed.
    Transport(reqwest::Error),
    /// Relay answered with a non-success HTTP status.
    Status(u16),
    /// Relay accepted the request but rejected the message.
    Rejected(String),
    /// Configured endpoint is not an absolute http(s) URL.
    InvalidEndpoint(String),
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "push transport failed: {err}"),
            Self::Status(code) => write!(f, "push relay returned HTTP {code}"),
            Self::Rejected(message) => write!(f, "push relay rejected message: {message}"),
            Self::InvalidEndpoint(endpoint) => write!(f, "invalid push endpoint `{endpoint}`"),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Async sender for push payloads.
#[async_trait]
pub trait PushDispatcher: Send + Sync {
    async fn dispatch(&self, message: &PushMessage) -> Result<(), DispatchError>;
}

/// Relay connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PUSH_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DispatchConfig {
    /// Reads `DAYLIST_PUSH_ENDPOINT`, falling back to the public relay.
    pub fn from_env() -> Self {
        Self::with_endpoint_override(std::env::var(PUSH_ENDPOINT_ENV).ok().as_deref())
    }

    fn with_endpoint_override(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => Self {
                endpoint: endpoint.to_string(),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    data: Option<RelayTicket>,
    #[serde(default)]
    errors: Vec<RelayError>,
}

#[derive(Debug, Deserialize)]
struct RelayTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelayError {
    message: String,
}

/// `PushDispatcher` that POSTs JSON to the push relay.
#[derive(Debug, Clone)]
pub struct HttpPushDispatcher {
    client: Client,
    endpoint: String,
}

impl HttpPushDispatcher {
    /// Builds a dispatcher with its own HTTP client.
    ///
    /// Loopback endpoints (local relay during development) bypass any
    /// system proxy.
    ///
    /// # Errors
    /// - `InvalidEndpoint` when the endpoint is not an http(s) URL.
    /// - `Transport` when the HTTP client cannot be constructed.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        let url = Url::parse(&config.endpoint)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| DispatchError::InvalidEndpoint(config.endpoint.clone()))?;

        let mut builder = Client::builder().timeout(config.timeout);
        if is_loopback(&url) {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PushDispatcher for HttpPushDispatcher {
    async fn dispatch(&self, message: &PushMessage) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=push_dispatch module=notify status=error http_status={} task_id={}",
                status.as_u16(),
                message.data.task_id
            );
            return Err(DispatchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        check_relay_body(&body)?;
        debug!(
            "event=push_dispatch module=notify status=ok task_id={}",
            message.data.task_id
        );
        Ok(())
    }
}

fn is_loopback(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|addr| addr.is_loopback())
}

/// Maps relay-level rejections inside a 2xx body to `Rejected`.
///
/// Bodies that do not parse are treated as accepted; the HTTP status already
/// signalled success.
fn check_relay_body(body: &str) -> Result<(), DispatchError> {
    let Ok(parsed) = serde_json::from_str::<RelayResponse>(body) else {
        return Ok(());
    };
    if let Some(first) = parsed.errors.into_iter().next() {
        return Err(DispatchError::Rejected(first.message));
    }
    match parsed.data {
        Some(ticket) if ticket.status == "error" => Err(DispatchError::Rejected(
            ticket.message.unwrap_or_else(|| "unknown relay error".to_string()),
        )),
        _ => Ok(()),
    }
}
