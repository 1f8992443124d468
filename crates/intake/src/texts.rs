use dua_catalog::CatalogPage;
use dua_protocol::{CallbackPayload, Gender};

use crate::transport::{OptionSet, SelectableOption};

pub(crate) const MENU_PROMPT: &str = "Welcome! Choose an option:";
pub(crate) const GENDER_PROMPT: &str = "Are you a Brother or Sister?";
pub(crate) const NAME_PROMPT: &str = "Enter your Name:";
pub(crate) const FATHER_NAME_PROMPT: &str = "Enter your Father's Name:";
pub(crate) const PICKER_PROMPT: &str = "Choose Topics for Dua (click multiple, then Done):";
pub(crate) const SAVED: &str = "✅ Your information has been saved!";
pub(crate) const SAVE_FAILED: &str =
    "⚠️ Saving failed, nothing was recorded. Press Done to try again.";
pub(crate) const REMOVED: &str = "Your entry has been removed.";
pub(crate) const NOTHING_TO_REMOVE: &str = "You don't have an entry to remove.";
pub(crate) const REMOVE_FAILED: &str = "⚠️ Removing your entry failed. Please try again later.";
pub(crate) const CANCELLED: &str = "Operation cancelled.";
pub(crate) const SELECTION_REQUIRED: &str =
    "Please choose at least one topic before pressing Done.";

const SIGN_UP_LABEL: &str = "Sign Up";
const REMOVE_LABEL: &str = "Remove Entry";
const BACK_LABEL: &str = "⬅️ Back";
const NEXT_LABEL: &str = "➡️ Next";
const DONE_LABEL: &str = "✅ Done";

pub fn menu_options() -> OptionSet {
    OptionSet {
        choices: vec![
            SelectableOption::new(SIGN_UP_LABEL, CallbackPayload::Signup.encode()),
            SelectableOption::new(REMOVE_LABEL, CallbackPayload::Remove.encode()),
        ],
        ..OptionSet::default()
    }
}

pub fn gender_options() -> OptionSet {
    OptionSet {
        choices: Gender::ALL
            .iter()
            .map(|gender| {
                SelectableOption::new(gender.as_str(), CallbackPayload::Gender(*gender).encode())
            })
            .collect(),
        ..OptionSet::default()
    }
}

pub fn picker_options(page: &CatalogPage) -> OptionSet {
    let choices = page
        .entries
        .iter()
        .map(|entry| {
            SelectableOption::new(
                entry.display_text.clone(),
                CallbackPayload::Topic(entry.short_label.clone()).encode(),
            )
        })
        .collect();

    let index = page.index as i64;
    let mut navigation = Vec::new();
    if page.has_prior_page {
        navigation.push(SelectableOption::new(
            BACK_LABEL,
            CallbackPayload::Page(index - 1).encode(),
        ));
    }
    if page.has_next_page {
        navigation.push(SelectableOption::new(
            NEXT_LABEL,
            CallbackPayload::Page(index + 1).encode(),
        ));
    }

    OptionSet {
        choices,
        navigation,
        done: Some(SelectableOption::new(
            DONE_LABEL,
            CallbackPayload::Done.encode(),
        )),
    }
}
