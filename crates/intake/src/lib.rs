//! # Dua Intake
//!
//! The conversation engine behind the bot.
//!
//! ## Flow
//!
//! ```text
//! Idle ──signup──> AwaitGender ──Brother|Sister──> AwaitName ──text──> AwaitFatherName
//!                                                                        │ text
//!                                                                        v
//!                 Idle <──────────────── commit ───────────────────── AwaitTopics ⟲ page / toggle
//!
//! any state ──cancel──> Cancelled
//! ```
//!
//! [`Conversation::apply`] is a pure transition returning [`Effect`]s;
//! [`IntakeService`] executes them against a [`Transport`] and the
//! [`dua_store::RecordStore`].
//!
//! ## Concurrency
//!
//! [`IntakeService::handle`] takes `&mut self`, so events are processed one at
//! a time. Store writes additionally go through the store's exclusive lock.

mod clock;
mod error;
mod machine;
mod notify;
mod policy;
mod procedures;
mod service;
mod sessions;
mod texts;
mod transport;

pub use clock::{Clock, SystemClock};
pub use error::{IntakeError, Result};
pub use machine::{
    Conversation, Effect, IntakeState, Notice, PendingSubject, Rejection, Submission, Transition,
};
pub use notify::{DeliveryReport, DeliveryStatus, Notification, NotificationDispatcher};
pub use policy::{IntakePolicy, DEFAULT_RETENTION_DAYS};
pub use procedures::{commit_submission, remove_submission, CommitReport, RemovalOutcome};
pub use service::{CommitOutcome, HandleOutcome, IntakeService};
pub use sessions::SessionRegistry;
pub use texts::{gender_options, menu_options, picker_options};
pub use transport::{DeliveryError, MessageHandle, OptionSet, SelectableOption, Transport};
