use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main client configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the recipe backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Drop results of a request once a newer one has started
    #[serde(default)]
    pub discard_stale_responses: bool,
    /// Presentation timings
    #[serde(default)]
    pub timings: TimingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            discard_stale_responses: false,
            timings: TimingConfig::default(),
        }
    }
}

/// Delays used by toasts, card entrance, tag feedback and redirects
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// How long a toast stays fully visible
    #[serde(default = "default_message_dwell_ms")]
    pub message_dwell_ms: u64,
    /// Slide-out time before the toast is removed
    #[serde(default = "default_message_exit_ms")]
    pub message_exit_ms: u64,
    /// Delay before navigating to the subscription page after a 402
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    /// Per-card entrance stagger
    #[serde(default = "default_card_stagger_ms")]
    pub card_stagger_ms: u64,
    /// Card fade/slide transition length
    #[serde(default = "default_card_transition_ms")]
    pub card_transition_ms: u64,
    /// Tag press animation length
    #[serde(default = "default_tag_press_ms")]
    pub tag_press_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            message_dwell_ms: default_message_dwell_ms(),
            message_exit_ms: default_message_exit_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
            card_stagger_ms: default_card_stagger_ms(),
            card_transition_ms: default_card_transition_ms(),
            tag_press_ms: default_tag_press_ms(),
        }
    }
}

impl TimingConfig {
    pub fn message_dwell(&self) -> Duration {
        Duration::from_millis(self.message_dwell_ms)
    }

    pub fn message_exit(&self) -> Duration {
        Duration::from_millis(self.message_exit_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Delay before the card at `index` starts its entrance
    pub fn card_delay(&self, index: usize) -> Duration {
        Duration::from_millis(self.card_stagger_ms * index as u64)
    }

    pub fn card_transition(&self) -> Duration {
        Duration::from_millis(self.card_transition_ms)
    }

    pub fn tag_press(&self) -> Duration {
        Duration::from_millis(self.tag_press_ms)
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("recipe-recommender/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_message_dwell_ms() -> u64 {
    3000
}

fn default_message_exit_ms() -> u64 {
    300
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

fn default_card_stagger_ms() -> u64 {
    100
}

fn default_card_transition_ms() -> u64 {
    500
}

fn default_tag_press_ms() -> u64 {
    100
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. recipes.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__TIMINGS__REDIRECT_DELAY_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipes").required(false))
        // Use double underscore for nested: RECIPES__TIMINGS__CARD_STAGGER_MS
        .add_source(
            Environment::with_prefix("RECIPES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "http://localhost:5000");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_message_dwell_ms(), 3000);
        assert_eq!(default_message_exit_ms(), 300);
        assert_eq!(default_redirect_delay_ms(), 2000);
        assert_eq!(default_card_stagger_ms(), 100);
        assert_eq!(default_card_transition_ms(), 500);
        assert_eq!(default_tag_press_ms(), 100);
    }

    #[test]
    fn test_card_delay_is_staggered() {
        let timings = TimingConfig::default();
        assert_eq!(timings.card_delay(0), Duration::ZERO);
        assert_eq!(timings.card_delay(3), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = Config::builder()
            .add_source(File::from_str(
                r#"
                base_url = "http://recipes.test"

                [timings]
                redirect_delay_ms = 50
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.base_url, "http://recipes.test");
        assert_eq!(config.timeout, 30);
        assert!(!config.discard_stale_responses);
        assert_eq!(config.timings.redirect_delay_ms, 50);
        assert_eq!(config.timings.message_dwell_ms, 3000);
    }

    #[test]
    fn test_empty_source_matches_default() {
        let config: ClientConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.base_url, ClientConfig::default().base_url);
        assert_eq!(config.timings, TimingConfig::default());
    }
}
