use dua_protocol::IdentityId;
use std::collections::HashMap;

use crate::machine::Conversation;

/// Live conversations keyed by identity.
///
/// A conversation is only kept while it is in an active state; reaching Idle
/// again or Cancelled drops it, and the next event starts from a fresh Idle.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    conversations: HashMap<IdentityId, Conversation>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the conversation out for the duration of one event.
    pub fn checkout(&mut self, identity: IdentityId) -> Conversation {
        self.conversations
            .remove(&identity)
            .unwrap_or_else(|| Conversation::new(identity))
    }

    pub fn checkin(&mut self, conversation: Conversation) {
        if conversation.state().is_active() {
            self.conversations
                .insert(conversation.identity(), conversation);
        }
    }

    pub fn get(&self, identity: IdentityId) -> Option<&Conversation> {
        self.conversations.get(&identity)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
