//! Server-sent events transport for the chat stream endpoint.
//!
//! Each [`ChatTransport::open`] call spawns one task that owns the HTTP
//! connection. Frames are forwarded to the subscription as they arrive; the
//! task stops as soon as the subscription is closed or a terminal event has
//! been delivered.

use crate::api::client::endpoint_url;
use crate::api::error::{ApiError, Result};
use crate::api::protocol::CHAT_STREAM_PATH;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use nutrichat_application::{
    ChatRequest, ChatTransport, GatewayError, StreamSender, StreamSubscription,
};
use nutrichat_domain::StreamEvent;
use nutrichat_domain::util::truncate_str;
use reqwest::{Client, header};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

/// Chat transport backed by `GET {base_url}/chat_stream`
#[derive(Debug, Clone)]
pub struct SseChatTransport {
    client: Client,
    base_url: String,
    idle_timeout: Duration,
}

impl SseChatTransport {
    /// The client must not carry a total request timeout, since a stream
    /// may legitimately run longer than any single request. Connecting and
    /// waiting for response headers are bounded by `idle_timeout`.
    pub fn new(base_url: impl Into<String>, idle_timeout: Duration) -> Result<Self> {
        let client = Client::builder().connect_timeout(idle_timeout).build()?;
        Ok(Self::with_client(client, base_url, idle_timeout))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, idle_timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            idle_timeout,
        }
    }

    fn build_request(&self, request: &ChatRequest) -> Result<reqwest::RequestBuilder> {
        let url = endpoint_url(&self.base_url, CHAT_STREAM_PATH)?;
        let history = serde_json::to_string(&request.history)?;
        Ok(self
            .client
            .get(url)
            .header(header::ACCEPT, "text/event-stream")
            .query(&[
                ("question", request.question.content()),
                ("history", history.as_str()),
            ]))
    }
}

impl ChatTransport for SseChatTransport {
    fn open(&self, request: ChatRequest) -> std::result::Result<StreamSubscription, GatewayError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| ApiError::NoRuntime)?;
        let builder = self.build_request(&request)?;
        let idle_timeout = self.idle_timeout;

        let (tx, subscription) = StreamSubscription::channel();
        let cancel = tx.cancellation_token();

        debug!(
            "Opening chat stream ({} history turns)",
            request.history.len()
        );

        handle.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Chat stream closed by consumer");
                }
                _ = pump(builder, &tx, idle_timeout) => {}
            }
        });

        Ok(subscription)
    }
}

async fn pump(builder: reqwest::RequestBuilder, tx: &StreamSender, idle_timeout: Duration) {
    let response = match timeout(idle_timeout, builder.send()).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            warn!("Chat stream request failed: {}", e);
            tx.send(StreamEvent::Error(e.to_string())).await;
            return;
        }
        Err(_) => {
            let message = timeout_message("waiting for response headers", idle_timeout);
            warn!("{}", message);
            tx.send(StreamEvent::Error(message)).await;
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = format!("Unexpected status {}: {}", status, truncate_str(&body, 200));
        warn!("{}", message);
        tx.send(StreamEvent::Error(message)).await;
        return;
    }

    forward_frames(response.bytes_stream(), tx, idle_timeout).await;
}

fn timeout_message(stage: &str, idle_timeout: Duration) -> String {
    format!("SSE stream timeout after {:?} {}", idle_timeout, stage)
}

/// Decode an SSE byte stream and forward each frame to `tx`.
///
/// Only unnamed and `message` events carry reply data; other named events
/// (keepalives and the like) are skipped. Stops after the first terminal
/// event. A stream that ends or fails before the sentinel produces an
/// `Error` event, as does one that stays silent for longer than
/// `idle_timeout`.
pub async fn forward_frames<S, B, E>(body: S, tx: &StreamSender, idle_timeout: Duration)
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let stream = body.eventsource();
    tokio::pin!(stream);

    loop {
        let event = match timeout(idle_timeout, stream.next()).await {
            Ok(Some(Ok(sse))) => {
                if !sse.event.is_empty() && sse.event != "message" {
                    trace!("Skipping SSE event '{}'", sse.event);
                    continue;
                }
                trace!("Chat SSE: {:?}", sse.data);
                StreamEvent::from_frame(&sse.data)
            }
            Ok(None) => {
                StreamEvent::Error("SSE stream closed before response completed".to_string())
            }
            Ok(Some(Err(e))) => StreamEvent::Error(format!("SSE stream error: {}", e)),
            Err(_) => StreamEvent::Error(timeout_message("waiting for data", idle_timeout)),
        };

        let terminal = event.is_terminal();
        if let StreamEvent::Error(message) = &event {
            warn!("{}", message);
        }
        if !tx.send(event).await || terminal {
            return;
        }
    }
}
