//! Webex Messages API client.
//!
//! Posts a single Markdown message to a room. Delivery is best effort: there
//! is no retry, and every failure (rejection or transport error) is logged and
//! handed back as a [`DeliveryOutcome`] instead of an error.

use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use buildnotify_shared::{NotifyError, Result};

/// User-Agent string for notification requests.
const USER_AGENT: &str = concat!("buildnotify/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// JSON body of `POST /v1/messages`.
#[derive(Debug, Serialize)]
pub struct MessagePayload<'a> {
    /// Target room.
    #[serde(rename = "roomId")]
    pub room_id: &'a str,
    /// Message text in Webex-flavoured Markdown.
    pub markdown: &'a str,
}

// ---------------------------------------------------------------------------
// DeliveryOutcome
// ---------------------------------------------------------------------------

/// What happened to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The API accepted the message (2xx).
    Delivered { status: u16 },
    /// The API answered with a non-success status.
    Rejected { status: u16, body: String },
    /// The request never got a response.
    Failed { reason: String },
}

impl DeliveryOutcome {
    /// Whether the message reached the room.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl std::fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered { status } => {
                write!(f, "Webex notification sent, status code: {status}.")
            }
            Self::Rejected { status, body } => write!(
                f,
                "Webex notification failed, status code: {status}, response: {body}."
            ),
            Self::Failed { reason } => write!(f, "Webex notification failed: {reason}."),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Authenticated client for one messages endpoint.
#[derive(Debug, Clone)]
pub struct WebexClient {
    http: Client,
    api_url: String,
    token: String,
}

impl WebexClient {
    /// Build a client posting to `api_url` with `token` as bearer credential.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NotifyError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    /// Post `markdown` to `room_id`. Never fails; see [`DeliveryOutcome`].
    #[instrument(skip_all, fields(url = %self.api_url, len = markdown.len()))]
    pub async fn post_markdown(&self, room_id: &str, markdown: &str) -> DeliveryOutcome {
        if self.token.is_empty() {
            warn!("webex token is empty, the request will most likely be rejected");
        }
        if room_id.is_empty() {
            warn!("webex room id is empty");
        }

        let payload = MessagePayload { room_id, markdown };

        let outcome = match self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    DeliveryOutcome::Delivered {
                        status: status.as_u16(),
                    }
                } else {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
                    DeliveryOutcome::Rejected {
                        status: status.as_u16(),
                        body,
                    }
                }
            }
            Err(e) => DeliveryOutcome::Failed {
                reason: e.to_string(),
            },
        };

        match &outcome {
            DeliveryOutcome::Delivered { status } => info!(status, "notification delivered"),
            DeliveryOutcome::Rejected { status, .. } => error!(status, "{outcome}"),
            DeliveryOutcome::Failed { .. } => error!("{outcome}"),
        }

        outcome
    }
}
