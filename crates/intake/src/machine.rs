use dua_catalog::{CatalogPage, SelectionState, TopicCatalog};
use dua_protocol::{Gender, IdentityId, IntakeEvent, Subject};
use std::fmt;
use thiserror::Error;

use crate::policy::IntakePolicy;
use crate::texts;
use crate::transport::MessageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeState {
    Idle,
    AwaitGender,
    AwaitName,
    AwaitFatherName,
    AwaitTopics,
    Cancelled,
}

impl IntakeState {
    pub const fn as_str(self) -> &'static str {
        match self {
            IntakeState::Idle => "idle",
            IntakeState::AwaitGender => "await_gender",
            IntakeState::AwaitName => "await_name",
            IntakeState::AwaitFatherName => "await_father_name",
            IntakeState::AwaitTopics => "await_topics",
            IntakeState::Cancelled => "cancelled",
        }
    }

    /// States that hold per-conversation data worth keeping between events.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            IntakeState::AwaitGender
                | IntakeState::AwaitName
                | IntakeState::AwaitFatherName
                | IntakeState::AwaitTopics
        )
    }
}

impl fmt::Display for IntakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSubject {
    pub gender: Option<Gender>,
    pub name: Option<String>,
    pub father_name: Option<String>,
}

impl PendingSubject {
    fn complete(&self, identity_id: IdentityId) -> Option<Subject> {
        Some(Subject {
            identity_id,
            gender: self.gender?,
            name: self.name.clone()?,
            father_name: self.father_name.clone()?,
        })
    }
}

/// A finished selection ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub subject: Subject,
    /// Full topic texts in the order they were picked.
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SelectionRequired,
    Cancelled,
}

impl Notice {
    pub fn text(self) -> &'static str {
        match self {
            Notice::SelectionRequired => texts::SELECTION_REQUIRED,
            Notice::Cancelled => texts::CANCELLED,
        }
    }
}

/// Work the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowMenu,
    PromptGender,
    PromptName,
    PromptFatherName,
    RenderPicker(CatalogPage),
    UpdatePicker(CatalogPage),
    Commit(Submission),
    Remove,
    Notify(Notice),
}

/// Events that were recognised but could not be applied. None of these
/// change the conversation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("page {requested} is outside the catalog")]
    InvalidPage { requested: i64 },

    #[error("commit requires at least one topic")]
    EmptySelection,

    #[error("unknown payload: {0}")]
    UnknownPayload(String),

    #[error("{event} is not accepted in {state}")]
    Ignored {
        state: IntakeState,
        event: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub effects: Vec<Effect>,
    pub rejection: Option<Rejection>,
}

impl Transition {
    fn effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            rejection: None,
        }
    }

    fn rejected(rejection: Rejection) -> Self {
        Self {
            effects: Vec::new(),
            rejection: Some(rejection),
        }
    }

    fn rejected_with(effect: Effect, rejection: Rejection) -> Self {
        Self {
            effects: vec![effect],
            rejection: Some(rejection),
        }
    }
}

/// Per-identity conversation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    identity: IdentityId,
    state: IntakeState,
    pending: PendingSubject,
    selection: Option<SelectionState>,
    picker: Option<MessageHandle>,
}

impl Conversation {
    pub fn new(identity: IdentityId) -> Self {
        Self {
            identity,
            state: IntakeState::Idle,
            pending: PendingSubject::default(),
            selection: None,
            picker: None,
        }
    }

    pub fn identity(&self) -> IdentityId {
        self.identity
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn pending(&self) -> &PendingSubject {
        &self.pending
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    pub fn picker(&self) -> Option<&MessageHandle> {
        self.picker.as_ref()
    }

    /// Remember where the topic picker was rendered so later pages edit it.
    pub fn attach_picker(&mut self, handle: MessageHandle) {
        self.picker = Some(handle);
    }

    /// Apply one event. Never fails: unusable input comes back as a
    /// [`Rejection`] with the conversation unchanged.
    pub fn apply(
        &mut self,
        event: IntakeEvent,
        catalog: &TopicCatalog,
        policy: &IntakePolicy,
    ) -> Transition {
        if self.state == IntakeState::Cancelled {
            return self.ignore(&event);
        }

        match event {
            IntakeEvent::Cancel => {
                self.reset(IntakeState::Cancelled);
                return Transition::effect(Effect::Notify(Notice::Cancelled));
            }
            IntakeEvent::Start => return Transition::effect(Effect::ShowMenu),
            _ => {}
        }

        match self.state {
            IntakeState::Idle => self.on_idle(event),
            IntakeState::AwaitGender => self.on_await_gender(event),
            IntakeState::AwaitName => self.on_await_name(event),
            IntakeState::AwaitFatherName => self.on_await_father_name(event, catalog),
            IntakeState::AwaitTopics => self.on_await_topics(event, catalog, policy),
            IntakeState::Cancelled => self.ignore(&event),
        }
    }

    fn on_idle(&mut self, event: IntakeEvent) -> Transition {
        match event {
            IntakeEvent::BeginSignup => {
                self.reset(IntakeState::AwaitGender);
                Transition::effect(Effect::PromptGender)
            }
            IntakeEvent::Remove => Transition::effect(Effect::Remove),
            other => self.ignore(&other),
        }
    }

    fn on_await_gender(&mut self, event: IntakeEvent) -> Transition {
        match event {
            IntakeEvent::GenderChoice(gender) => {
                self.pending.gender = Some(gender);
                self.state = IntakeState::AwaitName;
                Transition::effect(Effect::PromptName)
            }
            other => self.ignore(&other),
        }
    }

    fn on_await_name(&mut self, event: IntakeEvent) -> Transition {
        match event {
            IntakeEvent::FreeText(name) => {
                self.pending.name = Some(name);
                self.state = IntakeState::AwaitFatherName;
                Transition::effect(Effect::PromptFatherName)
            }
            other => self.ignore(&other),
        }
    }

    fn on_await_father_name(&mut self, event: IntakeEvent, catalog: &TopicCatalog) -> Transition {
        let father_name = match event {
            IntakeEvent::FreeText(text) => text,
            other => return self.ignore(&other),
        };

        let selection = SelectionState::new();
        // page 0 always exists, even for an empty catalog
        let Ok(page) = catalog.page(&selection, 0) else {
            return self.ignore(&IntakeEvent::FreeText(father_name));
        };
        self.pending.father_name = Some(father_name);
        self.selection = Some(selection);
        self.picker = None;
        self.state = IntakeState::AwaitTopics;
        Transition::effect(Effect::RenderPicker(page))
    }

    fn on_await_topics(
        &mut self,
        event: IntakeEvent,
        catalog: &TopicCatalog,
        policy: &IntakePolicy,
    ) -> Transition {
        let Some(selection) = self.selection.as_mut() else {
            return self.ignore(&event);
        };

        match event {
            IntakeEvent::PageNav(requested) => match catalog.page(selection, requested) {
                Ok(page) => {
                    selection.show(&page);
                    Transition::effect(Effect::UpdatePicker(page))
                }
                Err(_) => Transition::rejected(Rejection::InvalidPage { requested }),
            },
            IntakeEvent::Toggle(label) => {
                let Some(entry) = catalog.resolve(&label) else {
                    return Transition::rejected(Rejection::UnknownPayload(label));
                };
                selection.toggle(&entry.text);
                match catalog.page(selection, selection.current_page() as i64) {
                    Ok(page) => Transition::effect(Effect::UpdatePicker(page)),
                    Err(_) => Transition::default(),
                }
            }
            IntakeEvent::Commit => {
                if selection.is_empty() && policy.require_selection {
                    return Transition::rejected_with(
                        Effect::Notify(Notice::SelectionRequired),
                        Rejection::EmptySelection,
                    );
                }
                let Some(subject) = self.pending.complete(self.identity) else {
                    return self.ignore(&IntakeEvent::Commit);
                };
                let topics = selection.chosen().to_vec();
                self.reset(IntakeState::Idle);
                Transition::effect(Effect::Commit(Submission { subject, topics }))
            }
            IntakeEvent::GenderChoice(gender) => {
                Transition::rejected(Rejection::UnknownPayload(gender.as_str().to_string()))
            }
            other => self.ignore(&other),
        }
    }

    fn reset(&mut self, state: IntakeState) {
        self.state = state;
        self.pending = PendingSubject::default();
        self.selection = None;
        self.picker = None;
    }

    fn ignore(&self, event: &IntakeEvent) -> Transition {
        Transition::rejected(Rejection::Ignored {
            state: self.state,
            event: event.kind(),
        })
    }
}
