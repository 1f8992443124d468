//! Bot API client and the [`Transport`] implementation on top of it.

mod keyboard;
mod types;

use anyhow::Context;
use async_trait::async_trait;
use dua_intake::{DeliveryError, MessageHandle, OptionSet, Transport};
use dua_protocol::ChatId;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub use keyboard::layout;
pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User,
};

use types::{
    AnswerCallbackQuery, ApiResponse, EditReplyMarkup, GetUpdates, NoParams, SendMessage,
};

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];
/// Slack on top of the long-poll timeout before the HTTP request gives up.
const REQUEST_GRACE: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request to {method} failed: {source}")]
    Http {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} returned error {code}: {description}")]
    Api {
        method: &'static str,
        code: i64,
        description: String,
    },

    #[error("{method} returned no result")]
    EmptyResult { method: &'static str },
}

impl ApiError {
    fn http(method: &'static str, source: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        ApiError::Http {
            method,
            source: source.without_url(),
        }
    }

    fn is_not_modified(&self) -> bool {
        matches!(
            self,
            ApiError::Api { description, .. } if description.contains("message is not modified")
        )
    }
}

pub struct TelegramClient {
    http: Client,
    endpoint: String,
    buttons_per_row: usize,
}

impl TelegramClient {
    pub fn new(
        api_base: &str,
        token: &str,
        buttons_per_row: usize,
        poll_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(poll_timeout + REQUEST_GRACE)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: format!("{}/bot{token}", api_base.trim_end_matches('/')),
            buttons_per_row,
        })
    }

    async fn call<P, R>(&self, method: &'static str, params: &P) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{method}", self.endpoint))
            .json(params)
            .send()
            .await
            .map_err(|err| ApiError::http(method, err))?;
        let body: ApiResponse<R> = response
            .json()
            .await
            .map_err(|err| ApiError::http(method, err))?;

        if !body.ok {
            return Err(ApiError::Api {
                method,
                code: body.error_code.unwrap_or_default(),
                description: body.description.unwrap_or_default(),
            });
        }
        body.result.ok_or(ApiError::EmptyResult { method })
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.call("getMe", &NoParams {}).await
    }

    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, ApiError> {
        let params = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params).await
    }

    pub async fn answer_callback(&self, callback_query_id: &str) -> Result<(), ApiError> {
        let _: bool = self
            .call("answerCallbackQuery", &AnswerCallbackQuery { callback_query_id })
            .await?;
        Ok(())
    }

    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        reply_markup: Option<InlineKeyboardMarkup>,
    ) -> Result<Message, ApiError> {
        let params = SendMessage {
            chat_id: chat.0,
            text,
            reply_markup,
        };
        self.call("sendMessage", &params).await
    }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn render_options(
        &self,
        chat: ChatId,
        prompt: &str,
        options: &OptionSet,
    ) -> Result<MessageHandle, DeliveryError> {
        let markup = layout(options, self.buttons_per_row);
        let message = self
            .send_message(chat, prompt, Some(markup))
            .await
            .map_err(|err| DeliveryError::new(chat, err.to_string()))?;
        Ok(MessageHandle {
            chat,
            message_id: message.message_id,
        })
    }

    async fn update_options(
        &self,
        handle: &MessageHandle,
        options: &OptionSet,
    ) -> Result<(), DeliveryError> {
        let params = EditReplyMarkup {
            chat_id: handle.chat.0,
            message_id: handle.message_id,
            reply_markup: layout(options, self.buttons_per_row),
        };
        match self
            .call::<_, serde_json::Value>("editMessageReplyMarkup", &params)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.is_not_modified() => Ok(()),
            Err(err) => Err(DeliveryError::new(handle.chat, err.to_string())),
        }
    }

    async fn send_text(&self, chat: ChatId, body: &str) -> Result<(), DeliveryError> {
        self.send_message(chat, body, None)
            .await
            .map(|_| ())
            .map_err(|err| DeliveryError::new(chat, err.to_string()))
    }
}
