//! # Dua Protocol
//!
//! Types shared by every layer of the intake bot: who is talking
//! ([`IdentityId`]), where messages go ([`ChatId`]), what a submitter tells us
//! about themselves ([`Subject`]) and which inbound events drive a
//! conversation ([`IntakeEvent`]).
//!
//! Button callbacks travel as short strings; [`CallbackPayload`] is the single
//! place that knows their wire shape.

mod error;
mod event;
mod identity;
mod payload;
mod subject;

pub use error::{ProtocolError, Result};
pub use event::IntakeEvent;
pub use identity::{ChatId, IdentityId};
pub use payload::{is_reserved_payload, CallbackPayload, MAX_PAYLOAD_BYTES};
pub use subject::{Gender, Subject};
