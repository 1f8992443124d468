use dua_protocol::{CallbackPayload, IdentityId, IntakeEvent};

use crate::telegram::Update;

/// An update reduced to what the intake service needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub identity: IdentityId,
    /// `None` when the update is acknowledged but carries nothing to act on.
    pub event: Option<IntakeEvent>,
    /// Callback queries must be answered even when they are ignored.
    pub callback_id: Option<String>,
}

/// Map a Bot API update onto an intake event.
///
/// Only private chats are served, so the chat id doubles as the identity.
/// Group traffic, bots and non-text messages yield `None`.
pub fn route(update: &Update) -> Option<Routed> {
    if let Some(query) = &update.callback_query {
        let private = query
            .message
            .as_ref()
            .map_or(true, |message| message.chat.is_private());
        let event = match (&query.data, private) {
            (Some(data), true) => Some(CallbackPayload::parse(data).into_event()),
            _ => None,
        };
        return Some(Routed {
            identity: IdentityId(query.from.id),
            event,
            callback_id: Some(query.id.clone()),
        });
    }

    let message = update.message.as_ref()?;
    if !message.chat.is_private() {
        return None;
    }
    if message.from.as_ref().is_some_and(|user| user.is_bot) {
        return None;
    }
    let event = text_event(message.text.as_deref()?)?;
    Some(Routed {
        identity: IdentityId(message.chat.id),
        event: Some(event),
        callback_id: None,
    })
}

fn text_event(text: &str) -> Option<IntakeEvent> {
    let Some(command) = text.strip_prefix('/') else {
        return Some(IntakeEvent::FreeText(text.to_string()));
    };
    // "/start payload" and "/start@SomeBot" both name the start command
    let name = command
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .split('@')
        .next()
        .unwrap_or_default();
    match name {
        "start" => Some(IntakeEvent::Start),
        "cancel" => Some(IntakeEvent::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dua_protocol::Gender;
    use pretty_assertions::assert_eq;

    fn update(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    fn text_update(chat_type: &str, text: &str) -> Update {
        update(&format!(
            r#"{{"update_id":1,"message":{{"message_id":5,"from":{{"id":42,"is_bot":false}},
                "chat":{{"id":42,"type":"{chat_type}"}},"text":{}}}}}"#,
            serde_json::to_string(text).unwrap()
        ))
    }

    fn callback_update(data: &str) -> Update {
        update(&format!(
            r#"{{"update_id":2,"callback_query":{{"id":"q-1","from":{{"id":42,"is_bot":false}},
                "message":{{"message_id":9,"chat":{{"id":42,"type":"private"}}}},
                "data":"{data}"}}}}"#
        ))
    }

    #[test]
    fn plain_text_is_free_text() {
        let routed = route(&text_update("private", "Abdullah")).unwrap();
        assert_eq!(routed.identity, IdentityId(42));
        assert_eq!(
            routed.event,
            Some(IntakeEvent::FreeText("Abdullah".to_string()))
        );
        assert_eq!(routed.callback_id, None);
    }

    #[test]
    fn commands() {
        for (text, expected) in [
            ("/start", Some(IntakeEvent::Start)),
            ("/start ref42", Some(IntakeEvent::Start)),
            ("/start@DuaBot", Some(IntakeEvent::Start)),
            ("/cancel", Some(IntakeEvent::Cancel)),
        ] {
            assert_eq!(route(&text_update("private", text)).unwrap().event, expected);
        }
        assert!(route(&text_update("private", "/help")).is_none());
        assert!(route(&text_update("private", "/")).is_none());
    }

    #[test]
    fn group_messages_are_ignored() {
        assert!(route(&text_update("group", "hello")).is_none());
        assert!(route(&text_update("supergroup", "/start")).is_none());
    }

    #[test]
    fn callbacks_decode_payloads() {
        let cases = [
            ("signup", IntakeEvent::BeginSignup),
            ("remove", IntakeEvent::Remove),
            ("Sister", IntakeEvent::GenderChoice(Gender::Sister)),
            ("PAGE_2", IntakeEvent::PageNav(2)),
            ("DONE", IntakeEvent::Commit),
            ("CANCEL", IntakeEvent::Cancel),
            ("Health", IntakeEvent::Toggle("Health".to_string())),
        ];
        for (data, expected) in cases {
            let routed = route(&callback_update(data)).unwrap();
            assert_eq!(routed.event, Some(expected));
            assert_eq!(routed.callback_id.as_deref(), Some("q-1"));
        }
    }

    #[test]
    fn callback_without_data_is_still_acknowledged() {
        let routed = route(&update(
            r#"{"update_id":3,"callback_query":{"id":"q-2","from":{"id":42}}}"#,
        ))
        .unwrap();
        assert_eq!(routed.event, None);
        assert_eq!(routed.callback_id.as_deref(), Some("q-2"));
    }

    #[test]
    fn stickers_are_ignored() {
        let sticker = update(
            r#"{"update_id":4,"message":{"message_id":1,"chat":{"id":42,"type":"private"}}}"#,
        );
        assert!(route(&sticker).is_none());
    }
}
