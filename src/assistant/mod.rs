//! Boundary to an external generative-text assistant.
//!
//! This module builds request bodies and parses replies. The network hop is
//! supplied by the caller through [`ChatTransport`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::AssistantError;

pub const GREETING: &str = "Hello! I'm your AI Financial Assistant. How can I help you today?";
pub const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";
pub const SUGGESTIONS: [&str; 4] = [
    "How can I save more money?",
    "Help me create a budget",
    "Investment advice",
    "Tax saving tips",
];

/// Wraps a user question in the financial-assistant instructions.
pub fn build_prompt(message: &str) -> String {
    format!(
        "You are a financial assistant helping users with Spendr, a personal finance management \
         app. The user asks: {}. Focus your response on financial advice, budgeting, \
         investments, or tax planning as appropriate. Keep responses concise and practical.",
        message.trim()
    )
}

/// `{"contents":[{"parts":[{"text": prompt}]}]}`
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Pulls `candidates[0].content.parts[0].text` out of a reply body.
pub fn extract_reply(body: &str) -> Result<String, AssistantError> {
    let value: Value = serde_json::from_str(body)?;
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AssistantError::UnexpectedFormat)
}

/// Sends a request body somewhere and returns the raw reply body.
pub trait ChatTransport {
    fn send(&mut self, request: &Value) -> Result<String, AssistantError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

/// Conversation state plus the transport used to reach the assistant.
pub struct Assistant<T> {
    transport: T,
    history: Vec<ChatMessage>,
}

impl<T: ChatTransport> Assistant<T> {
    pub fn new(transport: T) -> Self {
        let mut assistant = Self {
            transport,
            history: Vec::new(),
        };
        assistant.push(Sender::Bot, GREETING);
        assistant
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Sends a question. Blank input is ignored.
    ///
    /// On failure the apology is appended to the history and the error is
    /// returned so the caller can offer a retry.
    pub fn ask(&mut self, message: &str) -> Result<Option<String>, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(None);
        }
        self.push(Sender::User, message);

        let request = request_body(&build_prompt(message));
        let reply = self
            .transport
            .send(&request)
            .and_then(|body| extract_reply(&body));

        match reply {
            Ok(text) => {
                debug!(chars = text.len(), "assistant replied");
                self.push(Sender::Bot, &text);
                Ok(Some(text))
            }
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                self.push(Sender::Bot, APOLOGY);
                Err(err)
            }
        }
    }

    fn push(&mut self, sender: Sender, text: &str) {
        self.history.push(ChatMessage {
            sender,
            text: text.to_string(),
            sent_at: chrono::Utc::now(),
        });
    }
}
