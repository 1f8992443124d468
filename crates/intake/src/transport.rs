use async_trait::async_trait;
use dua_protocol::ChatId;
use thiserror::Error;

/// Reference to a message that carries selectable options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHandle {
    pub chat: ChatId,
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableOption {
    pub label: String,
    pub payload: String,
}

impl SelectableOption {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Buttons to show under a message. Arrangement into rows is up to the
/// transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    pub choices: Vec<SelectableOption>,
    pub navigation: Vec<SelectableOption>,
    pub done: Option<SelectableOption>,
}

impl OptionSet {
    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.choices
            .iter()
            .chain(self.navigation.iter())
            .chain(self.done.iter())
            .map(|option| option.payload.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery to {chat} failed: {reason}")]
pub struct DeliveryError {
    pub chat: ChatId,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(chat: ChatId, reason: impl Into<String>) -> Self {
        Self {
            chat,
            reason: reason.into(),
        }
    }
}

/// Outbound side of the chat transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn render_options(
        &self,
        chat: ChatId,
        prompt: &str,
        options: &OptionSet,
    ) -> Result<MessageHandle, DeliveryError>;

    async fn update_options(
        &self,
        handle: &MessageHandle,
        options: &OptionSet,
    ) -> Result<(), DeliveryError>;

    async fn send_text(&self, chat: ChatId, body: &str) -> Result<(), DeliveryError>;
}
