//! A chat session: routes user input to text generation or the image tracker
//! and keeps the transcript, counters and persisted history in step.

use crate::history::ChatHistory;
use crate::store::{LocalStore, HISTORY_KEY};
use crate::tracker::RequestTracker;
use crate::types::{ChatMessage, RequestId, Role};
use crate::usage::UsageCounters;
use crate::{Error, GenerationClient, ProviderId, ProviderKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Prefix that turns a message into an image request.
pub const IMAGE_COMMAND: &str = "/image";

/// Reply recorded when text generation fails.
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

/// Result of handling one line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank input, nothing happened.
    Ignored,
    /// The text provider answered.
    Replied(String),
    /// An image request was admitted by the tracker.
    ImageRequested(RequestId),
    /// Text generation failed; the fixed error reply was recorded.
    Failed(String),
}

pub struct ChatSession {
    client: Arc<GenerationClient>,
    tracker: RequestTracker,
    text_model: ProviderId,
    history: ChatHistory,
    counters: UsageCounters,
    store: Option<LocalStore>,
    auto_scroll: bool,
}

impl ChatSession {
    /// Create a session using `gpt` for text and `tracker` for images.
    pub fn new(client: Arc<GenerationClient>, tracker: RequestTracker) -> Self {
        Self {
            client,
            tracker,
            text_model: ProviderId::Gpt,
            history: ChatHistory::new(),
            counters: UsageCounters::new(ProviderId::Gpt),
            store: None,
            auto_scroll: true,
        }
    }

    /// Attach a store and load any saved transcript from it.
    pub fn with_store(mut self, store: LocalStore) -> Result<Self, Error> {
        if let Some(saved) = store.get::<ChatHistory>(HISTORY_KEY)? {
            info!(messages = saved.len(), "restored chat history");
            self.counters = saved.stats(self.text_model);
            self.history = saved;
        }
        self.store = Some(store);
        Ok(self)
    }

    /// Handle one line of user input.
    pub async fn send(&mut self, input: &str) -> Result<Outcome, Error> {
        let message = input.trim();
        if message.is_empty() {
            return Ok(Outcome::Ignored);
        }

        if let Some(prompt) = parse_image_command(message) {
            if prompt.is_empty() {
                return Ok(Outcome::Ignored);
            }
            let id = self.tracker.submit(prompt)?;
            return Ok(Outcome::ImageRequested(id));
        }

        self.record(ChatMessage::user(message))?;

        debug!(model = %self.text_model, "sending chat message");
        match self.client.generate(message, self.text_model).await {
            Ok(reply) => {
                self.record(ChatMessage::ai(reply.clone()))?;
                Ok(Outcome::Replied(reply))
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.record(ChatMessage::ai(ERROR_REPLY))?;
                Ok(Outcome::Failed(ERROR_REPLY.to_string()))
            }
        }
    }

    /// Select the text provider. Image providers are rejected.
    pub fn set_text_model(&mut self, provider: ProviderId) -> Result<(), Error> {
        if provider.kind() != ProviderKind::Text {
            return Err(Error::invalid_provider(format!(
                "'{provider}' is not a text provider"
            )));
        }
        self.text_model = provider;
        self.counters.set_pricing(provider);
        Ok(())
    }

    pub fn text_model(&self) -> ProviderId {
        self.text_model
    }

    /// Drop the transcript, reset counters and forget the saved history.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.history.clear();
        self.counters.reset();
        if let Some(store) = self.store.as_mut() {
            store.remove(HISTORY_KEY)?;
        }
        Ok(())
    }

    /// Flip auto-scroll and return the new setting.
    pub fn toggle_auto_scroll(&mut self) -> bool {
        self.auto_scroll = !self.auto_scroll;
        self.auto_scroll
    }

    pub fn auto_scroll_label(&self) -> String {
        format!("Auto-scroll: {}", if self.auto_scroll { "ON" } else { "OFF" })
    }

    pub fn search(&self, term: &str) -> Vec<&ChatMessage> {
        self.history.search(term)
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn counters(&self) -> &UsageCounters {
        &self.counters
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    fn record(&mut self, message: ChatMessage) -> Result<(), Error> {
        self.counters.add_message(&message.content, message.role);
        self.history.push(message);
        if let Some(store) = self.store.as_mut() {
            store.set(HISTORY_KEY, &self.history)?;
        }
        Ok(())
    }

    pub fn message_count(&self, role: Role) -> usize {
        self.history.count_by_role(role)
    }
}

/// Prompt of an `/image` command, or `None` for ordinary input.
///
/// The command must stand alone or be followed by whitespace, so `/images`
/// is sent to the text model like any other message. A bare `/image`
/// yields an empty prompt, which [`ChatSession::send`] ignores instead of
/// submitting an empty generation.
pub fn parse_image_command(message: &str) -> Option<&str> {
    let rest = message.strip_prefix(IMAGE_COMMAND)?;
    if rest.is_empty() {
        return Some("");
    }
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
