//! Stream Controller use case.
//!
//! Drives one chat session through its streaming exchanges:
//!
//! ```text
//! Idle --submit(q)--> Streaming --Token--> Streaming
//!                     Streaming --Done---> Idle   (turn finalized)
//!                     Streaming --Error--> Idle   (partial text or fallback)
//!                     Streaming --cancel-> Idle   (partial turn discarded)
//! ```
//!
//! At most one subscription is open per controller. Events are tagged with
//! the [`SubscriptionId`] they came from and anything from a closed
//! subscription is dropped without touching the session.

use crate::config::ChatBehavior;
use crate::ports::chat_transport::{ChatRequest, ChatTransport, GatewayError, StreamSubscription};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use nutrichat_domain::util::truncate_str;
use nutrichat_domain::{ChatSession, Question, StreamEvent, SubscriptionId, Turn};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasons a submission is rejected before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("A reply is still streaming")]
    Busy,
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Streaming(SubscriptionId),
}

/// What applying one event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamProgress {
    /// A token was appended to the streaming turn.
    Token(String),
    /// The sentinel arrived and the turn was finalized.
    Finished(Turn),
    /// The transport failed; the turn was finalized with partial text or
    /// the fallback message.
    Failed(Turn),
}

impl StreamProgress {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StreamProgress::Token(_))
    }
}

struct ActiveStream {
    id: SubscriptionId,
    subscription: StreamSubscription,
}

/// Owns a [`ChatSession`] and its single transport subscription.
pub struct StreamController {
    transport: Arc<dyn ChatTransport>,
    conversation_logger: Arc<dyn ConversationLogger>,
    behavior: ChatBehavior,
    session: ChatSession,
    active: Option<ActiveStream>,
    next_id: SubscriptionId,
}

impl StreamController {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            conversation_logger: Arc::new(NoConversationLogger),
            behavior: ChatBehavior::default(),
            session: ChatSession::new(),
            active: None,
            next_id: SubscriptionId::first(),
        }
    }

    pub fn with_behavior(mut self, behavior: ChatBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Replace the session with seeded turns. Cancels any open stream first.
    pub fn with_seed(mut self, seed: impl IntoIterator<Item = Turn>) -> Self {
        self.cancel();
        self.session = ChatSession::seeded(seed);
        self
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn behavior(&self) -> &ChatBehavior {
        &self.behavior
    }

    pub fn state(&self) -> StreamState {
        match &self.active {
            Some(active) => StreamState::Streaming(active.id),
            None => StreamState::Idle,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.active.is_some() || self.session.is_streaming()
    }

    /// Start an exchange.
    ///
    /// On success the user turn and an empty streaming turn are in the
    /// session and the returned subscription is open. If the transport
    /// cannot even be opened, the exchange is finalized right away with the
    /// fallback message and the controller is back to `Idle`.
    pub fn submit(&mut self, question: &str) -> Result<SubscriptionId, SubmitError> {
        let question = Question::try_new(question).ok_or(SubmitError::EmptyQuestion)?;
        if self.is_streaming() {
            debug!("Rejecting submission while streaming");
            return Err(SubmitError::Busy);
        }

        // Question is non-blank and nothing streams, so these cannot fail.
        if self.session.append_user_turn(question.content()).is_err()
            || self.session.begin_streaming_turn().is_err()
        {
            return Err(SubmitError::Busy);
        }
        // History covers everything up to and including the new question,
        // but not the empty streaming turn.
        let history: Vec<_> = self
            .session
            .turns()
            .filter(|turn| !turn.is_streaming())
            .map(Turn::to_wire)
            .collect();

        let id = self.next_id;
        self.next_id = id.next();

        info!(
            "Opening chat stream {} ({} turns of history): {}",
            id,
            history.len(),
            truncate_str(question.content(), 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "chat_question",
            serde_json::json!({
                "subscription": id.get(),
                "question": question.content(),
                "history_len": history.len(),
            }),
        ));

        match self.transport.open(ChatRequest::new(question, history)) {
            Ok(subscription) => {
                self.active = Some(ActiveStream { id, subscription });
            }
            Err(e) => {
                self.fail_streaming_turn(id, &e.to_string());
            }
        }
        Ok(id)
    }

    /// Apply one event from subscription `id`.
    ///
    /// Returns `None` if the event is stale (its subscription is no longer
    /// the active one), in which case nothing changes.
    pub fn deliver(&mut self, id: SubscriptionId, event: StreamEvent) -> Option<StreamProgress> {
        match &self.active {
            Some(active) if active.id == id => {}
            _ => {
                debug!("Ignoring stale event from {}: {:?}", id, event);
                return None;
            }
        }

        match event {
            StreamEvent::Token(text) => {
                self.session.append_token(&text);
                Some(StreamProgress::Token(text))
            }
            StreamEvent::Done => {
                self.release();
                let turn = self.session.finalize_streaming_turn().ok()?.clone();
                info!("Chat stream {} completed ({} bytes)", id, turn.content.len());
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_reply",
                    serde_json::json!({
                        "subscription": id.get(),
                        "bytes": turn.content.len(),
                        "text": turn.content,
                    }),
                ));
                Some(StreamProgress::Finished(turn))
            }
            StreamEvent::Error(cause) => {
                self.release();
                self.fail_streaming_turn(id, &cause).map(StreamProgress::Failed)
            }
        }
    }

    /// Wait for the next event of the active subscription and apply it.
    ///
    /// Returns `None` when idle. A subscription that ends without a
    /// terminal event counts as a transport failure.
    pub async fn next_event(&mut self) -> Option<StreamProgress> {
        let active = self.active.as_mut()?;
        let id = active.id;
        let event = active.subscription.next().await.unwrap_or_else(|| {
            StreamEvent::Error(GatewayError::TransportClosed.to_string())
        });
        self.deliver(id, event)
    }

    /// Drive the active exchange to its end, reporting each token.
    ///
    /// Returns the finalized turn, or `None` if nothing was streaming.
    pub async fn run_to_completion(&mut self, mut on_token: impl FnMut(&str)) -> Option<Turn> {
        while let Some(progress) = self.next_event().await {
            match progress {
                StreamProgress::Token(text) => on_token(&text),
                StreamProgress::Finished(turn) | StreamProgress::Failed(turn) => {
                    return Some(turn);
                }
            }
        }
        None
    }

    /// Close the open subscription and drop the partial reply.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        let had_stream = self.active.is_some();
        if let Some(id) = self.release() {
            info!("Chat stream {} cancelled", id);
            self.conversation_logger.log(ConversationEvent::new(
                "chat_stream_cancelled",
                serde_json::json!({ "subscription": id.get() }),
            ));
        }
        let had_turn = self.session.discard_streaming_turn().is_some();
        had_stream || had_turn
    }

    /// Tear the surface down: cancel, then clear the conversation.
    pub fn close(&mut self) {
        self.cancel();
        self.session.reset();
    }

    /// Cancel whatever is open, clear the session and start over with a
    /// prompt whose reply comes from a single request/response call.
    ///
    /// The reply is shown as a streaming turn while `reply` is pending and
    /// finalized with its text, or with `fallback` if it fails.
    pub async fn seed_with<F>(&mut self, prompt: &str, reply: F, fallback: &str) -> Turn
    where
        F: Future<Output = Result<String, GatewayError>>,
    {
        self.close();
        // The session is empty after close(), so only a blank prompt can fail here.
        if let Err(e) = self.session.append_user_turn(prompt) {
            debug!("Seed prompt not recorded: {}", e);
        }
        if let Err(e) = self.session.begin_streaming_turn() {
            debug!("Seed placeholder not opened: {}", e);
        }

        let text = match reply.await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Seed reply was empty, using fallback");
                fallback.to_string()
            }
            Err(e) => {
                warn!("Seed reply failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_seed_error",
                    serde_json::json!({ "error": e.to_string() }),
                ));
                fallback.to_string()
            }
        };

        self.session.append_token(&text);
        match self.session.finalize_streaming_turn() {
            Ok(turn) => turn.clone(),
            Err(e) => {
                debug!("Seed reply not recorded: {}", e);
                Turn::assistant(text)
            }
        }
    }

    fn release(&mut self) -> Option<SubscriptionId> {
        let mut active = self.active.take()?;
        active.subscription.close();
        Some(active.id)
    }

    fn fail_streaming_turn(&mut self, id: SubscriptionId, cause: &str) -> Option<Turn> {
        warn!("Chat stream {} failed: {}", id, cause);
        let partial = self.session.streaming_content().map_or(0, str::len);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_stream_error",
            serde_json::json!({
                "subscription": id.get(),
                "error": cause,
                "partial_bytes": partial,
            }),
        ));
        let fallback = self.behavior.stream_fallback.clone();
        self.session
            .finalize_streaming_turn_or(&fallback)
            .ok()
            .cloned()
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_transport::StreamSender;
    use nutrichat_domain::{Role, WireRole};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    /// Transport whose streams are fed by the test.
    #[derive(Default)]
    struct ScriptedTransport {
        requests: Mutex<Vec<ChatRequest>>,
        senders: Mutex<Vec<StreamSender>>,
        fail_open: bool,
    }

    impl ScriptedTransport {
        fn failing() -> Self {
            Self {
                fail_open: true,
                ..Default::default()
            }
        }

        fn open_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn sender(&self, index: usize) -> StreamSender {
            self.senders.lock().unwrap()[index].clone()
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl ChatTransport for ScriptedTransport {
        fn open(&self, request: ChatRequest) -> Result<StreamSubscription, GatewayError> {
            self.requests.lock().unwrap().push(request);
            if self.fail_open {
                return Err(GatewayError::ConnectionError("refused".to_string()));
            }
            let (tx, sub) = StreamSubscription::channel();
            self.senders.lock().unwrap().push(tx);
            Ok(sub)
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl RecordingLogger {
        fn types(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn controller() -> (Arc<ScriptedTransport>, StreamController) {
        let transport = Arc::new(ScriptedTransport::default());
        let controller = StreamController::new(transport.clone());
        (transport, controller)
    }

    fn streaming_turns(controller: &StreamController) -> usize {
        controller
            .session()
            .turns()
            .filter(|t| t.role == Role::Streaming)
            .count()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn completion_finalizes_assistant_turn() {
        let (transport, mut controller) = controller();
        controller.submit("Apa kabar?").unwrap();
        assert!(matches!(controller.state(), StreamState::Streaming(_)));

        let tx = transport.sender(0);
        for frame in ["Halo", " dunia", "[DONE]"] {
            assert!(tx.send(StreamEvent::from_frame(frame)).await);
        }

        let mut seen = Vec::new();
        let turn = controller
            .run_to_completion(|t| seen.push(t.to_string()))
            .await
            .unwrap();
        assert_eq!(seen, vec!["Halo", " dunia"]);
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "Halo dunia");
        assert_eq!(controller.state(), StreamState::Idle);
        assert!(!controller.session().is_streaming());
        assert_eq!(controller.session().len(), 2);
    }

    #[tokio::test]
    async fn tokens_are_concatenated_without_separators() {
        let (transport, mut controller) = controller();
        controller.submit("Resep telur?").unwrap();
        let tx = transport.sender(0);
        for token in ["Bahan", "-bahan:", " 2 butir"] {
            tx.send(StreamEvent::Token(token.to_string())).await;
        }
        tx.send(StreamEvent::Done).await;

        let turn = controller.run_to_completion(|_| {}).await.unwrap();
        assert_eq!(turn.content, "Bahan-bahan: 2 butir");
    }

    #[test]
    fn blank_questions_are_rejected_without_network() {
        let (transport, mut controller) = controller();
        assert_eq!(controller.submit(""), Err(SubmitError::EmptyQuestion));
        assert_eq!(controller.submit("   "), Err(SubmitError::EmptyQuestion));
        assert!(controller.session().is_empty());
        assert_eq!(controller.state(), StreamState::Idle);
        assert_eq!(transport.open_count(), 0);
    }

    #[tokio::test]
    async fn submit_while_streaming_is_busy() {
        let (transport, mut controller) = controller();
        controller.submit("first question").unwrap();
        assert_eq!(
            controller.submit("second question"),
            Err(SubmitError::Busy)
        );
        assert_eq!(transport.open_count(), 1);
        let user_turns = controller
            .session()
            .turns()
            .filter(|t| t.role == Role::User)
            .count();
        assert_eq!(user_turns, 1);
        assert_eq!(streaming_turns(&controller), 1);
    }

    #[tokio::test]
    async fn error_without_tokens_uses_fallback() {
        let transport = Arc::new(ScriptedTransport::default());
        let behavior = ChatBehavior::default().with_stream_fallback("Resep tidak tersedia saat ini.");
        let logger = Arc::new(RecordingLogger::default());
        let mut controller = StreamController::new(transport.clone())
            .with_behavior(behavior)
            .with_conversation_logger(logger.clone());

        controller.submit("Resep rendang?").unwrap();
        transport
            .sender(0)
            .send(StreamEvent::Error("connection reset".to_string()))
            .await;

        let turn = match controller.next_event().await {
            Some(StreamProgress::Failed(turn)) => turn,
            other => panic!("expected failure, got {other:?}"),
        };
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "Resep tidak tersedia saat ini.");
        assert_eq!(controller.state(), StreamState::Idle);
        assert!(logger.types().contains(&"chat_stream_error"));
    }

    #[tokio::test]
    async fn error_after_tokens_keeps_partial_text() {
        let (transport, mut controller) = controller();
        controller.submit("Resep soto?").unwrap();
        let tx = transport.sender(0);
        tx.send(StreamEvent::Token("Siapkan ayam".to_string())).await;
        tx.send(StreamEvent::Error("malformed frame".to_string())).await;

        let turn = controller.run_to_completion(|_| {}).await.unwrap();
        assert_eq!(turn.content, "Siapkan ayam");
    }

    #[tokio::test]
    async fn producer_vanishing_counts_as_failure() {
        let (transport, mut controller) = controller();
        controller.submit("Halo?").unwrap();
        drop(transport.senders.lock().unwrap().pop());

        let progress = controller.next_event().await.unwrap();
        assert!(matches!(progress, StreamProgress::Failed(_)));
        assert_eq!(
            controller.session().last().unwrap().content,
            crate::config::chat_behavior::DEFAULT_STREAM_FALLBACK
        );
    }

    #[tokio::test]
    async fn session_stays_usable_after_failure() {
        let (transport, mut controller) = controller();
        controller.submit("pertama").unwrap();
        transport
            .sender(0)
            .send(StreamEvent::Error("boom".to_string()))
            .await;
        controller.run_to_completion(|_| {}).await;

        controller.submit("kedua").unwrap();
        assert_eq!(transport.open_count(), 2);
        let request = transport.last_request();
        assert_eq!(request.question.content(), "kedua");
        // user, assistant (fallback), user
        assert_eq!(request.history.len(), 3);
        assert_eq!(request.history[1].role, WireRole::Assistant);
    }

    #[test]
    fn history_includes_question_but_not_streaming_turn() {
        let transport = Arc::new(ScriptedTransport::default());
        let mut controller = StreamController::new(transport.clone())
            .with_seed([Turn::user("Resep?"), Turn::assistant("Rebus air.")]);

        controller.submit("Berapa lama?").unwrap();
        let request = transport.last_request();
        let roles: Vec<_> = request.history.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![WireRole::User, WireRole::Assistant, WireRole::User]
        );
        assert_eq!(request.history[2].content, "Berapa lama?");
        assert!(controller.is_streaming());
    }

    #[tokio::test]
    async fn events_after_cancel_are_ignored() {
        let (transport, mut controller) = controller();
        let id = controller.submit("Halo").unwrap();
        let tx = transport.sender(0);
        tx.send(StreamEvent::Token("sebagian".to_string())).await;
        controller.next_event().await;

        assert!(controller.cancel());
        assert_eq!(controller.state(), StreamState::Idle);
        assert_eq!(streaming_turns(&controller), 0);
        let before: Vec<Turn> = controller.session().turns().cloned().collect();

        // The producer can no longer push anything.
        assert!(!tx.send(StreamEvent::Token("late".to_string())).await);
        // Events already in flight for the old id are dropped.
        assert_eq!(
            controller.deliver(id, StreamEvent::Token("late".to_string())),
            None
        );
        assert_eq!(controller.deliver(id, StreamEvent::Done), None);
        assert_eq!(controller.next_event().await, None);

        let after: Vec<Turn> = controller.session().turns().cloned().collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn stale_id_is_ignored_while_new_stream_runs() {
        let (transport, mut controller) = controller();
        let old = controller.submit("pertama").unwrap();
        controller.cancel();
        let new = controller.submit("kedua").unwrap();
        assert_ne!(old, new);

        assert_eq!(
            controller.deliver(old, StreamEvent::Token("basi".to_string())),
            None
        );
        assert_eq!(controller.session().streaming_content(), Some(""));

        transport
            .sender(1)
            .send(StreamEvent::Token("segar".to_string()))
            .await;
        controller.next_event().await;
        assert_eq!(controller.session().streaming_content(), Some("segar"));
    }

    #[tokio::test]
    async fn close_resets_and_closes_subscription() {
        let (transport, mut controller) = controller();
        controller.submit("Halo").unwrap();
        let tx = transport.sender(0);
        controller.close();
        assert!(controller.session().is_empty());
        assert!(tx.is_closed());
        assert!(!controller.cancel());
    }

    #[test]
    fn open_failure_recovers_with_fallback() {
        let transport = Arc::new(ScriptedTransport::failing());
        let mut controller = StreamController::new(transport.clone());
        controller.submit("Halo").unwrap();
        assert_eq!(controller.state(), StreamState::Idle);
        let last = controller.session().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, crate::config::chat_behavior::DEFAULT_STREAM_FALLBACK);
    }

    #[tokio::test]
    async fn seed_with_success_and_failure() {
        let (transport, mut controller) = controller();
        controller.submit("lama").unwrap();

        let turn = controller
            .seed_with("Tolong berikan resep.", async { Ok("Rebus 10 menit.".to_string()) }, "gagal")
            .await;
        assert_eq!(turn.content, "Rebus 10 menit.");
        assert!(transport.sender(0).is_closed());
        let roles: Vec<_> = controller.session().turns().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);

        let turn = controller
            .seed_with(
                "Tolong berikan resep.",
                async { Err(GatewayError::Timeout) },
                "Gagal mendapatkan resep.",
            )
            .await;
        assert_eq!(turn.content, "Gagal mendapatkan resep.");
        assert_eq!(controller.session().len(), 2);
        assert!(!controller.is_streaming());
    }

    #[tokio::test]
    async fn seed_with_blank_prompt_keeps_only_reply() {
        let (_transport, mut controller) = controller();
        let turn = controller
            .seed_with("   ", async { Ok("Tumis bawang.".to_string()) }, "gagal")
            .await;
        assert_eq!(turn.content, "Tumis bawang.");
        let turns: Vec<Turn> = controller.session().turns().cloned().collect();
        assert_eq!(turns, vec![Turn::assistant("Tumis bawang.")]);
        assert!(!controller.is_streaming());
    }

    #[test]
    fn finished_progress_is_terminal() {
        assert!(StreamProgress::Finished(Turn::assistant("x")).is_terminal());
        assert!(!StreamProgress::Token("x".to_string()).is_terminal());
    }
}
