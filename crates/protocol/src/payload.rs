use crate::error::{ProtocolError, Result};
use crate::event::IntakeEvent;
use crate::subject::Gender;

/// Telegram caps `callback_data` at 64 bytes.
pub const MAX_PAYLOAD_BYTES: usize = 64;

const SIGNUP: &str = "signup";
const REMOVE: &str = "remove";
const DONE: &str = "DONE";
const CANCEL: &str = "CANCEL";
const PAGE_PREFIX: &str = "PAGE_";

/// Button payloads as they travel through the transport.
///
/// Anything that is not a reserved word is a topic label; whether the label
/// exists is decided later against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    Signup,
    Remove,
    Gender(Gender),
    Page(i64),
    Done,
    Cancel,
    Topic(String),
}

impl CallbackPayload {
    pub fn parse(raw: &str) -> Self {
        match raw {
            SIGNUP => return CallbackPayload::Signup,
            REMOVE => return CallbackPayload::Remove,
            DONE => return CallbackPayload::Done,
            CANCEL => return CallbackPayload::Cancel,
            _ => {}
        }
        if let Ok(gender) = raw.parse::<Gender>() {
            return CallbackPayload::Gender(gender);
        }
        if let Some(page) = raw
            .strip_prefix(PAGE_PREFIX)
            .and_then(|rest| rest.parse::<i64>().ok())
        {
            return CallbackPayload::Page(page);
        }
        CallbackPayload::Topic(raw.to_string())
    }

    pub fn encode(&self) -> String {
        match self {
            CallbackPayload::Signup => SIGNUP.to_string(),
            CallbackPayload::Remove => REMOVE.to_string(),
            CallbackPayload::Gender(gender) => gender.as_str().to_string(),
            CallbackPayload::Page(page) => format!("{PAGE_PREFIX}{page}"),
            CallbackPayload::Done => DONE.to_string(),
            CallbackPayload::Cancel => CANCEL.to_string(),
            CallbackPayload::Topic(label) => label.clone(),
        }
    }

    pub fn into_event(self) -> IntakeEvent {
        match self {
            CallbackPayload::Signup => IntakeEvent::BeginSignup,
            CallbackPayload::Remove => IntakeEvent::Remove,
            CallbackPayload::Gender(gender) => IntakeEvent::GenderChoice(gender),
            CallbackPayload::Page(page) => IntakeEvent::PageNav(page),
            CallbackPayload::Done => IntakeEvent::Commit,
            CallbackPayload::Cancel => IntakeEvent::Cancel,
            CallbackPayload::Topic(label) => IntakeEvent::Toggle(label),
        }
    }

    /// Checks that a topic label can be used as a button payload verbatim.
    pub fn validate_topic_label(label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(ProtocolError::EmptyPayload);
        }
        if label.len() > MAX_PAYLOAD_BYTES {
            return Err(ProtocolError::PayloadTooLong {
                len: label.len(),
                max: MAX_PAYLOAD_BYTES,
            });
        }
        Ok(())
    }
}

/// True when `raw` would decode to something other than a topic label.
pub fn is_reserved_payload(raw: &str) -> bool {
    !matches!(CallbackPayload::parse(raw), CallbackPayload::Topic(_))
}
