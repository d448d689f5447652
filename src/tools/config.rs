use serde::{Deserialize, Serialize};

pub const BRAVE_API_KEY_ENV: &str = "BRAVE_API_KEY";
pub const BRAVE_BASE_URL_ENV: &str = "TOOLGATE_BRAVE_BASE_URL";
pub const WIKIPEDIA_API_URL_ENV: &str = "TOOLGATE_WIKIPEDIA_API_URL";
pub const TIMEOUT_ENV: &str = "TOOLGATE_TOOL_TIMEOUT_MS";

pub const DEFAULT_BRAVE_BASE_URL: &str = "https://api.search.brave.com/res/v1/web/search";
pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://{lang}.wikipedia.org/w/api.php";
pub const BRAVE_MAX_RESULTS: u32 = 20;
pub const WIKIPEDIA_MAX_SUMMARY_CHARS: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraveSearchConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_brave_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_brave_max_results")]
    pub max_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaConfig {
    /// API endpoint; `{lang}` is replaced with the requested language code.
    #[serde(default = "default_wikipedia_api_url")]
    pub api_url: String,
    #[serde(default = "default_wikipedia_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_wikipedia_max_summary_chars")]
    pub max_summary_chars: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub brave: BraveSearchConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

impl ToolsConfig {
    /// Builds the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        config.brave.api_key = read(BRAVE_API_KEY_ENV);
        if let Some(base_url) = read(BRAVE_BASE_URL_ENV) {
            config.brave.base_url = base_url;
        }
        if let Some(api_url) = read(WIKIPEDIA_API_URL_ENV) {
            config.wikipedia.api_url = api_url;
        }
        if let Some(raw) = read(TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(timeout_ms) if timeout_ms > 0 => {
                    config.brave.timeout_ms = timeout_ms;
                    config.wikipedia.timeout_ms = timeout_ms;
                }
                _ => tracing::warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }
        config
    }
}

impl Default for BraveSearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_brave_base_url(),
            timeout_ms: default_timeout_ms(),
            max_results: default_brave_max_results(),
        }
    }
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_wikipedia_api_url(),
            user_agent: default_wikipedia_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_summary_chars: default_wikipedia_max_summary_chars(),
        }
    }
}

fn default_brave_base_url() -> String {
    DEFAULT_BRAVE_BASE_URL.to_string()
}

fn default_wikipedia_api_url() -> String {
    DEFAULT_WIKIPEDIA_API_URL.to_string()
}

fn default_wikipedia_user_agent() -> String {
    format!("toolgate-wikipedia/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_brave_max_results() -> u32 {
    BRAVE_MAX_RESULTS
}

fn default_wikipedia_max_summary_chars() -> usize {
    WIKIPEDIA_MAX_SUMMARY_CHARS
}
