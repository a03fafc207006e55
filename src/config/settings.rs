use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::config::paths::resolve_settings_config_path;
use crate::config::types::Settings;

/// Environment override for the API base URL.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// What: Strip a trailing `//` or `#` comment from a value.
///
/// Inputs:
/// - `s`: Raw value text after `=`.
///
/// Output:
/// - Value without the comment, trimmed.
///
/// Details:
/// - `//` inside a URL scheme (`https://`) is kept: only `//` preceded by whitespace counts.
fn strip_inline_comment(s: &str) -> &str {
    let mut end = s.len();
    if let Some(i) = s.find(" //").or_else(|| s.find("\t//")) {
        end = end.min(i);
    }
    if let Some(i) = s.find(" #").or_else(|| s.find("\t#")) {
        end = end.min(i);
    }
    s[..end].trim()
}

/// What: Interpret a config flag value.
///
/// Inputs:
/// - `val`: Raw value.
///
/// Output:
/// - `true` for `true`, `1`, `yes`, `on` (case-insensitive).
fn parse_flag(val: &str) -> bool {
    let lv = val.to_ascii_lowercase();
    lv == "true" || lv == "1" || lv == "yes" || lv == "on"
}

/// What: Parse settings.conf content into `settings`.
///
/// Inputs:
/// - `content`: Content of the settings file.
/// - `settings`: Mutable reference to `Settings` to populate.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Skips blank lines and lines starting with `#` or `//`.
/// - Keys are lower-cased and `.`, `-`, space become `_`; unknown keys are ignored.
/// - Values that fail to parse leave the current value untouched.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, val_raw)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(val_raw.trim());
        match key.as_str() {
            "api_base_url" | "api_url" | "base_url" => {
                settings.api_base_url = val.to_string();
            }
            "page_limit" | "page_size" => {
                if let Ok(v) = val.parse::<u32>() {
                    settings.page_limit = v;
                }
            }
            "request_timeout_secs" | "request_timeout" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.request_timeout_secs = v;
                }
            }
            "connect_timeout_secs" | "connect_timeout" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.connect_timeout_secs = v;
                }
            }
            "locale" | "language" => {
                settings.locale = val.to_string();
            }
            "persist_favorites" => {
                settings.persist_favorites = parse_flag(val);
            }
            _ => {
                debug!(key = %key, "ignoring unknown settings key");
            }
        }
    }
}

/// What: Normalize settings values parsed from configuration files.
///
/// Inputs:
/// - `settings`: Mutable reference to `Settings` to normalize in-place.
///
/// Details:
/// - Clamps `page_limit` to 1..=100 (0 falls back to 20).
/// - Timeouts of 0 fall back to their defaults.
/// - Trims the base URL and its trailing `/`; an empty URL falls back to the default.
pub fn normalize(settings: &mut Settings) {
    let defaults = Settings::default();
    if settings.page_limit == 0 {
        settings.page_limit = defaults.page_limit;
    }
    settings.page_limit = settings.page_limit.min(100);
    if settings.request_timeout_secs == 0 {
        settings.request_timeout_secs = defaults.request_timeout_secs;
    }
    if settings.connect_timeout_secs == 0 {
        settings.connect_timeout_secs = defaults.connect_timeout_secs;
    }
    let url = settings.api_base_url.trim().trim_end_matches('/');
    settings.api_base_url = if url.is_empty() {
        defaults.api_base_url
    } else {
        url.to_string()
    };
    let locale = settings.locale.trim();
    settings.locale = if locale.is_empty() {
        defaults.locale
    } else {
        locale.to_string()
    };
}

/// What: Load settings from an explicit file.
///
/// Inputs:
/// - `path`: Settings file path.
///
/// Output:
/// - Parsed and normalized `Settings`; defaults when the file is missing or unreadable.
pub fn load_settings_from(path: &Path) -> Settings {
    let mut out = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => {
            parse_settings(&content, &mut out);
            debug!(path = %path.display(), "loaded settings");
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "settings file not found; using defaults");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
        }
    }
    normalize(&mut out);
    out
}

/// What: Resolve and load settings without caching.
///
/// Output:
/// - `Settings` from the first settings.conf found under HOME/XDG, then the
///   `STOREFRONT_API_URL` override applied.
#[must_use]
pub fn load_settings() -> Settings {
    let mut out = resolve_settings_config_path().map_or_else(
        || {
            let mut s = Settings::default();
            normalize(&mut s);
            s
        },
        |p| load_settings_from(&p),
    );
    if let Ok(url) = std::env::var(API_URL_ENV)
        && !url.trim().is_empty()
    {
        out.api_base_url = url;
        normalize(&mut out);
    }
    out
}

/// What: Process-wide settings, loaded once on first use.
///
/// Output:
/// - Clone of the cached `Settings`.
#[must_use]
pub fn settings() -> Settings {
    SETTINGS.get_or_init(load_settings).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Keys are normalized, comments stripped and unknown keys ignored.
    ///
    /// - Input: Settings text with comments, mixed-case keys, and a URL containing `//`
    /// - Output: Parsed fields keep the full URL and numeric values
    fn parse_settings_reads_known_keys() {
        let content = "\
# storefront settings
API.Base-URL = https://shop.example.com/api/ // production
page_limit = 50 # per page
request-timeout = 12
locale = ar
persist_favorites = no
theme = dark
";
        let mut s = Settings::default();
        parse_settings(content, &mut s);
        assert_eq!(s.api_base_url, "https://shop.example.com/api/");
        assert_eq!(s.page_limit, 50);
        assert_eq!(s.request_timeout_secs, 12);
        assert_eq!(s.locale, "ar");
        assert!(!s.persist_favorites);
        normalize(&mut s);
        assert_eq!(s.api_base_url, "https://shop.example.com/api");
    }

    #[test]
    /// What: Out-of-range and empty values are normalized.
    ///
    /// - Input: `page_limit` 0 and 500, zero timeouts, empty URL
    /// - Output: Defaults or clamped values
    fn normalize_clamps_values() {
        let mut s = Settings {
            api_base_url: "  ".to_string(),
            page_limit: 0,
            request_timeout_secs: 0,
            connect_timeout_secs: 0,
            locale: String::new(),
            persist_favorites: true,
        };
        normalize(&mut s);
        assert_eq!(s, Settings::default());
        s.page_limit = 500;
        normalize(&mut s);
        assert_eq!(s.page_limit, 100);
    }

    #[test]
    /// What: Missing file yields defaults; present file is parsed.
    ///
    /// - Input: Nonexistent path, then a temp file
    /// - Output: Defaults, then parsed values
    fn load_settings_from_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("nope.conf");
        assert_eq!(load_settings_from(&missing), Settings::default());

        let path = tmp.path().join("settings.conf");
        fs::write(&path, "page_limit = 7\n").expect("write");
        let s = load_settings_from(&path);
        assert_eq!(s.page_limit, 7);
    }
}
