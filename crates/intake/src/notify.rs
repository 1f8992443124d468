use dua_protocol::{ChatId, Subject};

use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub chat: ChatId,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    Failed(String),
    /// No destination configured.
    Skipped,
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryStatus::Delivered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub private: DeliveryStatus,
    pub broadcast: DeliveryStatus,
}

/// Builds and sends the two confirmations of a commit: a private one with
/// the full identity and an anonymised one for the shared channel.
#[derive(Debug, Clone, Default)]
pub struct NotificationDispatcher {
    broadcast: Option<ChatId>,
}

impl NotificationDispatcher {
    pub fn new(broadcast: Option<ChatId>) -> Self {
        Self { broadcast }
    }

    pub fn broadcast_destination(&self) -> Option<ChatId> {
        self.broadcast
    }

    pub fn compose_private(&self, subject: &Subject, topics: &[String]) -> Notification {
        Notification {
            chat: subject.identity_id.private_chat(),
            body: format!(
                "Dear {} {} ({}), you will be included in our dua for:\n\n{}",
                subject.gender,
                subject.name,
                subject.father_name,
                bullet_list(topics)
            ),
        }
    }

    /// Gender only; name and father's name never leave the private chat.
    pub fn compose_broadcast(&self, subject: &Subject, topics: &[String]) -> Option<Notification> {
        let chat = self.broadcast?;
        Some(Notification {
            chat,
            body: format!(
                "Dear {}, you will be included in our dua for:\n\n{}",
                subject.gender,
                bullet_list(topics)
            ),
        })
    }

    /// Send both messages. Each failure is logged and reported on its own;
    /// neither blocks the other and nothing is retried.
    pub async fn dispatch<T: Transport + ?Sized>(
        &self,
        transport: &T,
        subject: &Subject,
        topics: &[String],
    ) -> DeliveryReport {
        let private = deliver(transport, self.compose_private(subject, topics), "private").await;
        let broadcast = match self.compose_broadcast(subject, topics) {
            Some(notification) => deliver(transport, notification, "broadcast").await,
            None => DeliveryStatus::Skipped,
        };
        DeliveryReport { private, broadcast }
    }
}

async fn deliver<T: Transport + ?Sized>(
    transport: &T,
    notification: Notification,
    kind: &str,
) -> DeliveryStatus {
    match transport
        .send_text(notification.chat, &notification.body)
        .await
    {
        Ok(()) => DeliveryStatus::Delivered,
        Err(err) => {
            log::warn!("Failed to send {kind} message: {err}");
            DeliveryStatus::Failed(err.reason)
        }
    }
}

fn bullet_list(topics: &[String]) -> String {
    topics
        .iter()
        .map(|topic| format!("• {topic}"))
        .collect::<Vec<_>>()
        .join("\n")
}
