use dua_catalog::TopicCatalog;
use dua_protocol::{ChatId, IdentityId, IntakeEvent};
use dua_store::RecordStore;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::machine::{Conversation, Effect, IntakeState, Rejection, Submission};
use crate::notify::{DeliveryReport, NotificationDispatcher};
use crate::policy::IntakePolicy;
use crate::procedures::{commit_submission, remove_submission, CommitReport, RemovalOutcome};
use crate::sessions::SessionRegistry;
use crate::texts::{self, gender_options, menu_options, picker_options};
use crate::transport::{OptionSet, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Saved {
        report: CommitReport,
        delivery: DeliveryReport,
    },
    /// Nothing was written; the conversation is back at the topic picker.
    SaveFailed(String),
}

/// What handling one event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleOutcome {
    pub state: IntakeState,
    pub rejection: Option<Rejection>,
    pub commit: Option<CommitOutcome>,
    pub removal: Option<RemovalOutcome>,
}

/// Drives conversations: feeds events through the state machine and
/// carries out the resulting effects.
pub struct IntakeService<T: Transport> {
    catalog: Arc<TopicCatalog>,
    policy: IntakePolicy,
    store: RecordStore,
    transport: T,
    dispatcher: NotificationDispatcher,
    sessions: SessionRegistry,
    clock: Box<dyn Clock>,
}

impl<T: Transport> IntakeService<T> {
    pub fn new(
        catalog: Arc<TopicCatalog>,
        policy: IntakePolicy,
        store: RecordStore,
        transport: T,
        dispatcher: NotificationDispatcher,
    ) -> Result<Self> {
        policy.validate()?;
        Ok(Self {
            catalog,
            policy,
            store,
            transport,
            dispatcher,
            sessions: SessionRegistry::new(),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub async fn handle(&mut self, identity: IdentityId, event: IntakeEvent) -> HandleOutcome {
        let mut conversation = self.sessions.checkout(identity);
        let snapshot = conversation.clone();
        let kind = event.kind();

        let transition = conversation.apply(event, &self.catalog, &self.policy);
        if let Some(rejection) = &transition.rejection {
            log::debug!("{identity}: {kind} rejected: {rejection}");
        }

        let mut outcome = HandleOutcome {
            state: conversation.state(),
            rejection: transition.rejection,
            commit: None,
            removal: None,
        };

        for effect in transition.effects {
            self.execute(&mut conversation, &snapshot, effect, &mut outcome)
                .await;
        }

        outcome.state = conversation.state();
        log::debug!("{identity}: {kind} -> {}", outcome.state);
        self.sessions.checkin(conversation);
        outcome
    }

    async fn execute(
        &self,
        conversation: &mut Conversation,
        snapshot: &Conversation,
        effect: Effect,
        outcome: &mut HandleOutcome,
    ) {
        let chat = conversation.identity().private_chat();
        match effect {
            Effect::ShowMenu => self.render(chat, texts::MENU_PROMPT, &menu_options()).await,
            Effect::PromptGender => {
                self.render(chat, texts::GENDER_PROMPT, &gender_options())
                    .await
            }
            Effect::PromptName => self.say(chat, texts::NAME_PROMPT).await,
            Effect::PromptFatherName => self.say(chat, texts::FATHER_NAME_PROMPT).await,
            Effect::RenderPicker(page) => {
                self.show_picker(conversation, &picker_options(&page)).await;
            }
            Effect::UpdatePicker(page) => {
                let options = picker_options(&page);
                match conversation.picker().cloned() {
                    Some(handle) => {
                        if let Err(err) = self.transport.update_options(&handle, &options).await {
                            log::warn!("Failed to update topic picker: {err}");
                        }
                    }
                    None => self.show_picker(conversation, &options).await,
                }
            }
            Effect::Commit(submission) => {
                let result = self.commit(chat, &submission).await;
                if matches!(result, CommitOutcome::SaveFailed(_)) {
                    *conversation = snapshot.clone();
                }
                outcome.commit = Some(result);
            }
            Effect::Remove => {
                outcome.removal = self.remove(chat, conversation.identity()).await;
            }
            Effect::Notify(notice) => self.say(chat, notice.text()).await,
        }
    }

    async fn commit(&self, chat: ChatId, submission: &Submission) -> CommitOutcome {
        let now = self.clock.now();
        match commit_submission(&self.store, submission, now, &self.policy) {
            Ok(report) => {
                self.say(chat, texts::SAVED).await;
                let delivery = self
                    .dispatcher
                    .dispatch(&self.transport, &submission.subject, &submission.topics)
                    .await;
                CommitOutcome::Saved { report, delivery }
            }
            Err(err) => {
                log::error!(
                    "Failed to save submission for {}: {err}",
                    submission.subject.identity_id
                );
                self.say(chat, texts::SAVE_FAILED).await;
                CommitOutcome::SaveFailed(err.to_string())
            }
        }
    }

    async fn remove(&self, chat: ChatId, identity: IdentityId) -> Option<RemovalOutcome> {
        match remove_submission(&self.store, identity) {
            Ok(outcome) => {
                let reply = match outcome {
                    RemovalOutcome::Removed { .. } => texts::REMOVED,
                    RemovalOutcome::NothingToRemove => texts::NOTHING_TO_REMOVE,
                };
                self.say(chat, reply).await;
                Some(outcome)
            }
            Err(err) => {
                log::error!("Failed to remove entry for {identity}: {err}");
                self.say(chat, texts::REMOVE_FAILED).await;
                None
            }
        }
    }

    async fn show_picker(&self, conversation: &mut Conversation, options: &OptionSet) {
        let chat = conversation.identity().private_chat();
        match self
            .transport
            .render_options(chat, texts::PICKER_PROMPT, options)
            .await
        {
            Ok(handle) => conversation.attach_picker(handle),
            Err(err) => log::warn!("Failed to show topic picker: {err}"),
        }
    }

    async fn render(&self, chat: ChatId, prompt: &str, options: &OptionSet) {
        if let Err(err) = self.transport.render_options(chat, prompt, options).await {
            log::warn!("Failed to send options: {err}");
        }
    }

    async fn say(&self, chat: ChatId, body: &str) {
        if let Err(err) = self.transport.send_text(chat, body).await {
            log::warn!("Failed to send message: {err}");
        }
    }
}
