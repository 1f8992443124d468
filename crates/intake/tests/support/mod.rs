#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dua_catalog::TopicCatalog;
use dua_intake::{
    Clock, DeliveryError, IntakePolicy, IntakeService, MessageHandle, NotificationDispatcher,
    OptionSet, Transport,
};
use dua_protocol::{ChatId, Gender, IdentityId, IntakeEvent};
use dua_store::RecordStore;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub const BROADCAST: ChatId = ChatId(-1_000_777);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Options {
        chat: ChatId,
        prompt: String,
        options: OptionSet,
    },
    Update {
        handle: MessageHandle,
        options: OptionSet,
    },
    Text {
        chat: ChatId,
        body: String,
    },
}

/// Transport double that records everything and can be told to fail
/// deliveries to particular chats.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    failing: Mutex<HashSet<ChatId>>,
    next_message_id: Mutex<i64>,
}

impl RecordingTransport {
    pub fn fail_chat(&self, chat: ChatId) {
        self.failing.lock().unwrap().insert(chat);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn texts_to(&self, chat: ChatId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text { chat: to, body } if to == chat => Some(body),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(MessageHandle, OptionSet)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Update { handle, options } => Some((handle, options)),
                _ => None,
            })
            .collect()
    }

    fn check(&self, chat: ChatId) -> Result<(), DeliveryError> {
        if self.failing.lock().unwrap().contains(&chat) {
            return Err(DeliveryError::new(chat, "chat not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn render_options(
        &self,
        chat: ChatId,
        prompt: &str,
        options: &OptionSet,
    ) -> Result<MessageHandle, DeliveryError> {
        self.check(chat)?;
        self.sent.lock().unwrap().push(Sent::Options {
            chat,
            prompt: prompt.to_string(),
            options: options.clone(),
        });
        let mut next = self.next_message_id.lock().unwrap();
        *next += 1;
        Ok(MessageHandle {
            chat,
            message_id: *next,
        })
    }

    async fn update_options(
        &self,
        handle: &MessageHandle,
        options: &OptionSet,
    ) -> Result<(), DeliveryError> {
        self.check(handle.chat)?;
        self.sent.lock().unwrap().push(Sent::Update {
            handle: handle.clone(),
            options: options.clone(),
        });
        Ok(())
    }

    async fn send_text(&self, chat: ChatId, body: &str) -> Result<(), DeliveryError> {
        self.check(chat)?;
        self.sent.lock().unwrap().push(Sent::Text {
            chat,
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(at),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub struct Harness {
    pub service: IntakeService<RecordingTransport>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(store: RecordStore) -> Self {
        Self::with_policy(store, IntakePolicy::default())
    }

    pub fn with_policy(store: RecordStore, policy: IntakePolicy) -> Self {
        let clock = Arc::new(ManualClock::new(epoch()));
        let service = IntakeService::new(
            Arc::new(TopicCatalog::builtin()),
            policy,
            store,
            RecordingTransport::default(),
            NotificationDispatcher::new(Some(BROADCAST)),
        )
        .unwrap()
        .with_clock(clock.clone());
        Self { service, clock }
    }

    pub fn transport(&self) -> &RecordingTransport {
        self.service.transport()
    }

    /// Walk an identity up to the topic picker.
    pub async fn reach_topics(&mut self, who: IdentityId, gender: Gender, name: &str, father: &str) {
        for event in [
            IntakeEvent::BeginSignup,
            IntakeEvent::GenderChoice(gender),
            IntakeEvent::FreeText(name.to_string()),
            IntakeEvent::FreeText(father.to_string()),
        ] {
            self.service.handle(who, event).await;
        }
    }

    /// Full sign-up picking the given short labels, in order.
    pub async fn sign_up(
        &mut self,
        who: IdentityId,
        gender: Gender,
        name: &str,
        father: &str,
        labels: &[&str],
    ) -> dua_intake::HandleOutcome {
        self.reach_topics(who, gender, name, father).await;
        for label in labels {
            let page = self.page_of(label);
            self.service.handle(who, IntakeEvent::PageNav(page)).await;
            self.service
                .handle(who, IntakeEvent::Toggle(label.to_string()))
                .await;
        }
        self.service.handle(who, IntakeEvent::Commit).await
    }

    pub fn topic_text(&self, label: &str) -> String {
        self.service.catalog().resolve(label).unwrap().text.clone()
    }

    fn page_of(&self, label: &str) -> i64 {
        let catalog = self.service.catalog();
        let index = catalog
            .entries()
            .iter()
            .position(|entry| entry.label == label)
            .unwrap();
        (index / catalog.page_size()) as i64
    }
}
