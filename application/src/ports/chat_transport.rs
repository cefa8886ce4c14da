//! Chat transport port
//!
//! Defines how the application opens a streaming reply from the backend.
//! Adapters push [`StreamEvent`]s through a [`StreamSender`]; the
//! [`StreamController`](crate::use_cases::stream_chat::StreamController)
//! consumes them through the paired [`StreamSubscription`].

use nutrichat_domain::{Question, StreamEvent, WireTurn};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Buffer size for subscription channels.
pub const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Errors that can occur while talking to the backend service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,
}

/// One chat stream request: the question plus everything said so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub question: Question,
    pub history: Vec<WireTurn>,
}

impl ChatRequest {
    pub fn new(question: Question, history: Vec<WireTurn>) -> Self {
        Self { question, history }
    }
}

/// Producer half of a subscription, owned by the transport adapter.
#[derive(Debug, Clone)]
pub struct StreamSender {
    tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
}

impl StreamSender {
    /// Deliver an event. Returns `false` once the subscription is closed.
    pub async fn send(&self, event: StreamEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.tx.send(event).await.is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.is_closed()
    }

    /// Resolves when the consumer closes the subscription.
    pub async fn closed(&self) {
        self.cancel.cancelled().await
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Handle to one open push stream.
///
/// Yields zero or more `Token` events followed by one terminal event, then
/// nothing. After [`close`](Self::close) no further event is yielded, even
/// if the producer had already queued some.
#[derive(Debug)]
pub struct StreamSubscription {
    rx: mpsc::Receiver<StreamEvent>,
    cancel: CancellationToken,
    closed: bool,
}

impl StreamSubscription {
    /// Create a connected sender/subscription pair.
    pub fn channel() -> (StreamSender, StreamSubscription) {
        Self::with_capacity(STREAM_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (StreamSender, StreamSubscription) {
        let (tx, rx) = mpsc::channel(capacity);
        let cancel = CancellationToken::new();
        (
            StreamSender {
                tx,
                cancel: cancel.clone(),
            },
            StreamSubscription {
                rx,
                cancel,
                closed: false,
            },
        )
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once closed, or if the producer went away without a
    /// terminal event. A terminal event closes the subscription.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        if self.closed {
            return None;
        }
        let event = self.rx.recv().await;
        match &event {
            Some(e) if e.is_terminal() => self.close(),
            None => self.close(),
            _ => {}
        }
        event
    }

    /// Close the stream and release the connection. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.cancel.cancel();
        self.rx.close();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Consume the stream and collect all tokens into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.next().await {
            match event {
                StreamEvent::Token(chunk) => full_text.push_str(&chunk),
                StreamEvent::Done => return Ok(full_text),
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }
        Err(GatewayError::TransportClosed)
    }
}

impl Drop for StreamSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Opens streaming chat replies.
///
/// Implementations must start delivering events without blocking the
/// caller, typically by spawning a task that owns the connection and
/// stops as soon as the subscription is closed.
pub trait ChatTransport: Send + Sync {
    fn open(&self, request: ChatRequest) -> Result<StreamSubscription, GatewayError>;
}
