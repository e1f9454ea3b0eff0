// API client module: a small blocking HTTP client for the Pastery paste
// endpoint. One invocation builds one `PasteRequest` and sends it once;
// there are no retries.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::config::Config;
use crate::error::UploadError;

const USER_AGENT: &str = concat!("bakeit/", env!("CARGO_PKG_VERSION"));

/// The bytes of a paste. Content that failed UTF-8 decoding is carried
/// as `Raw` and sent exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteBody {
    Text(String),
    Raw(Vec<u8>),
}

impl PasteBody {
    pub fn len(&self) -> usize {
        match self {
            PasteBody::Text(text) => text.len(),
            PasteBody::Raw(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            PasteBody::Text(text) => text.into_bytes(),
            PasteBody::Raw(bytes) => bytes,
        }
    }
}

/// Parameters of one upload. Optional fields that are `None` are left out
/// of the request entirely so Pastery applies its own defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct PasteRequest {
    pub api_key: String,
    pub content: PasteBody,
    pub title: Option<String>,
    /// Highlighter name, passed through unchecked.
    pub language: Option<String>,
    /// Minutes until the paste expires.
    pub duration: Option<i64>,
    pub max_views: Option<i64>,
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for PasteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasteRequest")
            .field("api_key", &"<redacted>")
            .field("content_len", &self.content.len())
            .field("title", &self.title)
            .field("language", &self.language)
            .field("duration", &self.duration)
            .field("max_views", &self.max_views)
            .finish()
    }
}

impl PasteRequest {
    pub fn new(api_key: impl Into<String>, content: PasteBody) -> Self {
        PasteRequest {
            api_key: api_key.into(),
            content,
            title: None,
            language: None,
            duration: None,
            max_views: None,
        }
    }

    /// Query parameters in the order they are sent. Absent and empty
    /// optional values are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("api_key", self.api_key.clone())];
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("title", title.to_string()));
        }
        if let Some(language) = self.language.as_deref().filter(|l| !l.is_empty()) {
            pairs.push(("language", language.to_string()));
        }
        if let Some(duration) = self.duration {
            pairs.push(("duration", duration.to_string()));
        }
        if let Some(max_views) = self.max_views {
            pairs.push(("max_views", max_views.to_string()));
        }
        pairs
    }
}

/// Pick the paste duration: the `--duration` flag, then the configured
/// default, then nothing (Pastery's own default).
///
/// Values are not range checked here; Pastery validates them.
pub fn resolve_duration(flag: Option<i64>, configured: Option<i64>) -> Option<i64> {
    flag.or(configured)
}

/// `Ok(url)` on success, otherwise why the paste was not created.
pub type PasteResult = std::result::Result<String, UploadError>;

/// Turn a Pastery reply into a paste URL or an error.
///
/// An `error_msg` in the body is Pastery refusing the paste, whatever the
/// status. A non-2xx reply without one, or a 2xx reply without a `url`, is
/// reported as a transport failure.
pub fn interpret_response(status: StatusCode, body: &str) -> PasteResult {
    let reply = serde_json::from_str::<Value>(body).ok();

    if let Some(reply) = &reply {
        let message = reply
            .get("error_msg")
            .or_else(|| reply.get("error"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty());
        if let Some(message) = message {
            return Err(UploadError::Rejected(message.to_string()));
        }
    }

    if !status.is_success() {
        return Err(UploadError::Transport(format!(
            "Pastery returned HTTP {}",
            status
        )));
    }

    reply
        .as_ref()
        .and_then(|r| r.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            UploadError::Transport("malformed response from Pastery: no paste URL".to_string())
        })
}

fn transport_error(err: reqwest::Error) -> UploadError {
    let message = if err.is_timeout() {
        "timed out waiting for Pastery".to_string()
    } else if err.is_connect() {
        format!("could not connect to Pastery: {}", err)
    } else {
        format!("request to Pastery failed: {}", err)
    };
    UploadError::Transport(message)
}

/// Blocking client bound to one Pastery endpoint.
#[derive(Clone)]
pub struct PasteryClient {
    client: Client,
    endpoint: Url,
}

impl PasteryClient {
    /// Build a client from the loaded configuration. A `timeout` in the
    /// config bounds the whole request.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid Pastery API URL '{}'", config.api_url))?;
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(PasteryClient { client, endpoint })
    }

    /// Endpoint with the request's parameters appended as the query string.
    pub fn request_url(&self, request: &PasteRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        url
    }

    /// POST the paste. The request is consumed: it is sent exactly once.
    pub fn upload(&self, request: PasteRequest) -> PasteResult {
        let url = self.request_url(&request);
        tracing::debug!(endpoint = %self.endpoint, ?request, "uploading paste");

        let res = self
            .client
            .post(url)
            .body(request.content.into_bytes())
            .send()
            .map_err(transport_error)?;

        let status = res.status();
        let body = res.text().map_err(|e| {
            UploadError::Transport(format!("failed to read response from Pastery: {}", e))
        })?;
        tracing::debug!(%status, body_len = body.len(), "Pastery replied");
        interpret_response(status, &body)
    }
}
