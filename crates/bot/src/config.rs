use anyhow::{anyhow, Context, Result};
use dua_catalog::{builtin_topics, TopicCatalog, TopicEntry, DEFAULT_PAGE_SIZE};
use dua_intake::{IntakePolicy, NotificationDispatcher, DEFAULT_RETENTION_DAYS};
use dua_protocol::{is_reserved_payload, CallbackPayload, ChatId};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "dua-bot.toml";
pub const DEFAULT_STORE_PATH: &str = "dua_records.json";
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

pub const CONFIG_ENV: &str = "DUA_CONFIG";
pub const STORE_PATH_ENV: &str = "DUA_STORE_PATH";
pub const TOKEN_ENV: &str = "BOT_TOKEN";

const DEFAULT_BUTTONS_PER_ROW: usize = 2;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
/// Telegram allows at most 8 buttons in one keyboard row.
const MAX_BUTTONS_PER_ROW: usize = 8;

/// Where the configuration file path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    Default(PathBuf),
}

impl ConfigSource {
    /// `--config` wins over `DUA_CONFIG`, which wins over the default path.
    pub fn resolve(flag: Option<PathBuf>, env: Option<String>) -> Self {
        if let Some(path) = flag {
            return ConfigSource::Flag(path);
        }
        match env.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(path) => ConfigSource::Env(PathBuf::from(path)),
            None => ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_PATH)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Flag(path) | ConfigSource::Env(path) | ConfigSource::Default(path) => {
                path
            }
        }
    }

    /// An explicitly named file must exist; the default one may be absent.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, ConfigSource::Default(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    pub store_path: PathBuf,
    pub broadcast_chat_id: Option<i64>,
    pub retention_days: u32,
    pub page_size: usize,
    pub require_selection: bool,
    pub buttons_per_row: usize,
    pub poll_timeout_secs: u64,
    pub api_base: String,
    pub topics: Vec<TopicConfig>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            broadcast_chat_id: None,
            retention_days: DEFAULT_RETENTION_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            require_selection: true,
            buttons_per_row: DEFAULT_BUTTONS_PER_ROW,
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
            api_base: DEFAULT_API_BASE.to_string(),
            topics: Vec::new(),
        }
    }
}

impl BotConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| anyhow!("Config is not valid TOML: {err}"))
    }

    pub fn load(source: &ConfigSource) -> Result<Self> {
        let path = source.path();
        if !path.exists() {
            if source.is_explicit() {
                return Err(anyhow!("Config file {} does not exist", path.display()));
            }
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// `--store` wins over `DUA_STORE_PATH`, which wins over the file.
    pub fn override_store_path(&mut self, flag: Option<PathBuf>, env: Option<String>) {
        if let Some(path) = flag {
            self.store_path = path;
        } else if let Some(path) = env.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.store_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.catalog()?;
        self.policy().validate()?;
        if self.buttons_per_row == 0 || self.buttons_per_row > MAX_BUTTONS_PER_ROW {
            return Err(anyhow!(
                "buttons_per_row must be between 1 and {MAX_BUTTONS_PER_ROW}, got {}",
                self.buttons_per_row
            ));
        }
        if self.api_base.trim().is_empty() {
            return Err(anyhow!("api_base must not be empty"));
        }
        Ok(())
    }

    /// Topics from the file, or the built-in list when none are given.
    pub fn catalog(&self) -> Result<TopicCatalog> {
        let entries: Vec<TopicEntry> = if self.topics.is_empty() {
            builtin_topics()
        } else {
            self.topics
                .iter()
                .map(|topic| TopicEntry::new(topic.label.clone(), topic.text.clone()))
                .collect()
        };

        for entry in &entries {
            CallbackPayload::validate_topic_label(&entry.label)
                .with_context(|| format!("Invalid topic label '{}'", entry.label))?;
            if is_reserved_payload(&entry.label) {
                return Err(anyhow!(
                    "Topic label '{}' collides with a reserved button payload",
                    entry.label
                ));
            }
        }

        TopicCatalog::new(entries, self.page_size).context("Invalid topic catalog")
    }

    pub fn policy(&self) -> IntakePolicy {
        IntakePolicy {
            retention_days: self.retention_days,
            require_selection: self.require_selection,
        }
    }

    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(self.broadcast_chat_id.map(ChatId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_yields_defaults() {
        let config = BotConfig::from_toml_str("").unwrap();
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.store_path, PathBuf::from("dua_records.json"));
        assert_eq!(config.catalog().unwrap().page_count(), 3);
        assert_eq!(config.policy(), IntakePolicy::default());
        assert!(config.dispatcher().broadcast_destination().is_none());
    }

    #[test]
    fn parses_custom_topics_and_channel() {
        let config = BotConfig::from_toml_str(
            r#"
            broadcast_chat_id = -100123
            retention_days = 30
            page_size = 2

            [[topics]]
            label = "Rain"
            text = "Rain for the crops."

            [[topics]]
            label = "Travel"
            text = "A safe journey."

            [[topics]]
            label = "Exams"
            text = "Success in exams."
            "#,
        )
        .unwrap();

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.page_count(), 2);
        assert_eq!(config.policy().retention_days, 30);
        assert_eq!(
            config.dispatcher().broadcast_destination(),
            Some(ChatId(-100123))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(BotConfig::from_toml_str("store = \"x.json\"").is_err());
    }

    #[test]
    fn reserved_labels_are_rejected() {
        for label in ["DONE", "PAGE_3", "Brother", "signup"] {
            let config = BotConfig {
                topics: vec![TopicConfig {
                    label: label.to_string(),
                    text: "Some text.".to_string(),
                }],
                ..BotConfig::default()
            };
            assert!(config.validate().is_err(), "{label} should be rejected");
        }
    }

    #[test]
    fn oversized_label_is_rejected() {
        let config = BotConfig {
            topics: vec![TopicConfig {
                label: "x".repeat(65),
                text: "Some text.".to_string(),
            }],
            ..BotConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn numeric_limits_are_checked() {
        for config in [
            BotConfig {
                page_size: 0,
                ..BotConfig::default()
            },
            BotConfig {
                retention_days: 0,
                ..BotConfig::default()
            },
            BotConfig {
                buttons_per_row: 0,
                ..BotConfig::default()
            },
        ] {
            assert!(config.validate().is_err());
        }
        assert!(BotConfig::default().validate().is_ok());
    }

    #[test]
    fn store_path_precedence() {
        let mut config = BotConfig::default();
        config.override_store_path(None, Some("  ".to_string()));
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));

        config.override_store_path(None, Some("/srv/env.json".to_string()));
        assert_eq!(config.store_path, PathBuf::from("/srv/env.json"));

        config.override_store_path(
            Some(PathBuf::from("/srv/flag.json")),
            Some("/srv/env.json".to_string()),
        );
        assert_eq!(config.store_path, PathBuf::from("/srv/flag.json"));
    }

    #[test]
    fn config_source_precedence() {
        let flag = ConfigSource::resolve(Some(PathBuf::from("a.toml")), Some("b.toml".into()));
        assert_eq!(flag, ConfigSource::Flag(PathBuf::from("a.toml")));

        let env = ConfigSource::resolve(None, Some("b.toml".into()));
        assert!(env.is_explicit());
        assert_eq!(env.path(), Path::new("b.toml"));

        let default = ConfigSource::resolve(None, None);
        assert!(!default.is_explicit());
        assert_eq!(default.path(), Path::new(DEFAULT_CONFIG_PATH));
    }
}
