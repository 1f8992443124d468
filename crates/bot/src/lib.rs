//! Telegram front end: configuration, the Bot API transport and the
//! long-polling loop that feeds updates into [`dua_intake::IntakeService`].

pub mod config;
pub mod runner;
pub mod telegram;
pub mod updates;

pub use config::{BotConfig, ConfigSource, TopicConfig};
pub use telegram::{ApiError, TelegramClient};
pub use updates::{route, Routed};
