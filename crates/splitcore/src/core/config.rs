use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the registry file
pub const DEFAULT_DATA_FILE: &str = "users.json";

/// Default log file path
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Parses a comma/whitespace separated list of Telegram user ids.
/// Unparseable fragments are skipped.
pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
    raw.split([',', ' ', '\n', '\t'])
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

/// Runtime configuration, read once at startup and handed to whoever needs it.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token (BOT_TOKEN or TELOXIDE_TOKEN)
    pub bot_token: String,
    /// Registry file (DATA_FILE)
    pub data_file: PathBuf,
    /// Log file (LOG_FILE_PATH)
    pub log_file: PathBuf,
    /// Log level name (LOG_LEVEL)
    pub log_level: String,
    /// Admins merged into the registry at startup (ADMIN_IDS)
    pub admin_ids: Vec<i64>,
    /// Custom Bot API server (BOT_API_URL)
    pub bot_api_url: Option<String>,
    /// HTTP timeout for Bot API requests (REQUEST_TIMEOUT_SECS)
    pub request_timeout: Duration,
}

impl BotConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = non_empty("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(network::timeout);

        Self {
            bot_token: non_empty("BOT_TOKEN")
                .or_else(|| non_empty("TELOXIDE_TOKEN"))
                .unwrap_or_default(),
            data_file: PathBuf::from(non_empty("DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())),
            log_file: PathBuf::from(non_empty("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            admin_ids: lookup("ADMIN_IDS").map(|raw| parse_admin_ids(&raw)).unwrap_or_default(),
            bot_api_url: non_empty("BOT_API_URL"),
            request_timeout,
        }
    }
}
