use dua_intake::{OptionSet, SelectableOption};

use super::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Choices are wrapped `per_row` to a row; navigation shares one row and
/// "done" always sits alone on the last row.
pub fn layout(options: &OptionSet, per_row: usize) -> InlineKeyboardMarkup {
    let per_row = per_row.max(1);
    let mut rows: Vec<Vec<InlineKeyboardButton>> = options
        .choices
        .chunks(per_row)
        .map(|chunk| chunk.iter().map(button).collect())
        .collect();

    if !options.navigation.is_empty() {
        rows.push(options.navigation.iter().map(button).collect());
    }
    if let Some(done) = &options.done {
        rows.push(vec![button(done)]);
    }

    InlineKeyboardMarkup {
        inline_keyboard: rows,
    }
}

fn button(option: &SelectableOption) -> InlineKeyboardButton {
    InlineKeyboardButton {
        text: option.label.clone(),
        callback_data: option.payload.clone(),
    }
}
