//! Chat session
//!
//! Ordered, append-only transcript between the customer and the purchasing
//! assistant. Submitting a message appends the user turn immediately, issues
//! exactly one completion request, and appends either the returned text or a
//! fixed fallback reply. No retry, no cancellation; a failed call never
//! escapes the session.

pub mod gemini;
pub mod prompt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::CreditAccount;
use crate::domain::catalog::Catalog;
use crate::domain::events::{ChatEvent, DomainEvent};

pub use gemini::{CompletionClient, CompletionError, CompletionRequest, GeminiClient};

/// Reply substituted whenever the completion call fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I could not reach the assistant service right now. Please try again later.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Serialized as `model`, the completion service's name for it.
    #[serde(rename = "model")]
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), role, text: text.into() }
    }
}

/// Submission state. `&mut self` on [`ChatSession::send`] means a second
/// submission cannot be issued while one is in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    state: ChatState,
    events: Vec<DomainEvent>,
}

impl ChatSession {
    /// Start a transcript with the welcome turn addressed to the customer.
    pub fn for_account(account: &CreditAccount) -> Self {
        let mut session = Self::default();
        session.push(ChatMessage::new(
            Role::Assistant,
            format!(
                "Hello {}! I am your purchasing assistant. I can help you find \
                 products, check specifications or suggest items for your company. \
                 How can I help today?",
                account.first_name()
            ),
        ));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] { &self.messages }
    pub fn state(&self) -> &ChatState { &self.state }
    pub fn is_awaiting(&self) -> bool { self.state == ChatState::AwaitingResponse }

    /// Submit a user message and wait for the assistant turn.
    ///
    /// Blank input is a no-op. The user turn is appended before the call is
    /// issued; on any completion error the fixed fallback reply is appended
    /// instead of the model text and the error is only logged.
    pub async fn send<C: CompletionClient>(
        &mut self,
        client: &C,
        catalog: &Catalog,
        account: &CreditAccount,
        input: &str,
    ) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        // History excludes the turn being submitted; it travels separately.
        let history = self.messages.clone();
        self.push(ChatMessage::new(Role::User, text));
        self.state = ChatState::AwaitingResponse;

        let request = CompletionRequest {
            system_instruction: prompt::system_instruction(catalog, account),
            history,
            message: text.to_string(),
        };

        let reply = match client.complete(&request).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(error = %err, "completion call failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        self.push(ChatMessage::new(Role::Assistant, reply));
        self.state = ChatState::Idle;
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }

    fn push(&mut self, message: ChatMessage) {
        self.events.push(DomainEvent::Chat(ChatEvent::MessageAppended {
            message_id: message.id.clone(),
            role: message.role.label().to_string(),
        }));
        self.messages.push(message);
    }
}
