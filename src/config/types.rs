//! Settings value type.

/// Default backend endpoint used when no setting or override is present.
pub const DEFAULT_API_BASE_URL: &str = "https://api.storefront.local/v1";

/// User-configurable settings loaded from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Base URL every endpoint path is appended to.
    pub api_base_url: String,
    /// Items requested per page (1..=100).
    pub page_limit: u32,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Locale for user-facing messages (e.g. `en-US`, `ar`).
    pub locale: String,
    /// Write the favorites cache to disk and restore it at startup.
    pub persist_favorites: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_limit: 20,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            locale: "en-US".to_string(),
            persist_favorites: true,
        }
    }
}
