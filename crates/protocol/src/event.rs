use crate::subject::Gender;

/// Inbound conversation events, already decoded from the transport.
///
/// The submitter's identity travels next to the event rather than inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeEvent {
    /// `/start`: show the entry menu.
    Start,
    BeginSignup,
    Remove,
    GenderChoice(Gender),
    FreeText(String),
    /// Requested topic page. Signed so that out-of-range requests reach the
    /// catalog and are rejected there.
    PageNav(i64),
    Toggle(String),
    Commit,
    Cancel,
}

impl IntakeEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeEvent::Start => "start",
            IntakeEvent::BeginSignup => "begin_signup",
            IntakeEvent::Remove => "remove",
            IntakeEvent::GenderChoice(_) => "gender_choice",
            IntakeEvent::FreeText(_) => "free_text",
            IntakeEvent::PageNav(_) => "page_nav",
            IntakeEvent::Toggle(_) => "toggle",
            IntakeEvent::Commit => "commit",
            IntakeEvent::Cancel => "cancel",
        }
    }
}
