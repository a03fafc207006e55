//! Shared HTTP client for the storefront backend.

use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::Result;
use crate::config::Settings;

/// Handle to the backend API: a pooled `reqwest::Client` plus the base URL.
///
/// Cloning is cheap; the connection pool is shared between clones.
#[derive(Clone, Debug)]
pub struct ApiClient {
    /// Pooled HTTP client with the configured timeouts.
    http: reqwest::Client,
    /// Base URL without trailing `/`.
    base_url: String,
}

/// What: Map an HTTP status to a user-friendly message.
///
/// Inputs:
/// - `status`: Non-success status returned by the backend
///
/// Output:
/// - Message suitable for showing in place of a list
///
/// Details:
/// - Maps the statuses users actually hit (401/403, 404, 429, 5xx) to descriptive text.
/// - Every message comes from the active locale; other codes use the generic status message.
#[must_use]
pub fn map_status_error(status: StatusCode) -> String {
    match status.as_u16() {
        401 | 403 => crate::i18n::t("app.errors.session_expired"),
        404 => crate::i18n::t("app.errors.not_found"),
        429 => crate::i18n::t("app.errors.rate_limited"),
        502..=504 => crate::i18n::t("app.errors.unavailable"),
        code => crate::i18n::t_fmt1("app.errors.http_status", code),
    }
}

/// What: Turn a transport error into a user-facing message.
///
/// Inputs:
/// - `err`: Error returned by `reqwest`
///
/// Output:
/// - Localised message for timeouts and connection failures; the error text otherwise
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        crate::i18n::t("app.errors.timeout")
    } else if err.is_connect() {
        crate::i18n::t("app.errors.connect")
    } else {
        err.to_string()
    }
}

impl ApiClient {
    /// What: Build a client for `base_url` with the timeouts from `settings`.
    ///
    /// Inputs:
    /// - `base_url`: Backend base URL (trailing `/` ignored).
    /// - `settings`: Source of connect/request timeouts.
    ///
    /// Output:
    /// - `Ok(ApiClient)`; `Err` when the URL is invalid or the client cannot be built.
    ///
    /// # Errors
    /// - Returns `Err` when `base_url` does not parse as a URL
    /// - Returns `Err` when the TLS backend cannot be initialised
    pub fn new(base_url: &str, settings: &Settings) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| format!("invalid API base URL '{base_url}': {e}"))?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(format!("storefront/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// What: Build a client from settings alone.
    ///
    /// # Errors
    /// - Same as [`ApiClient::new`]
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.api_base_url, settings)
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// What: Build an endpoint URL for a fixed path with query parameters.
    ///
    /// Inputs:
    /// - `path`: Static path relative to the base URL (leading `/` optional).
    /// - `query`: Pairs to append, percent-encoded.
    ///
    /// Output:
    /// - Absolute URL; no `?` is added when `query` is empty.
    ///
    /// Details:
    /// - Only for paths without user input; ids go through [`ApiClient::endpoint_segments`].
    pub(crate) fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.endpoint_segments(&segments, query)
    }

    /// What: Build an endpoint URL from individual path segments.
    ///
    /// Inputs:
    /// - `segments`: Path segments appended to the base URL's path.
    /// - `query`: Pairs to append, percent-encoded.
    ///
    /// Output:
    /// - Absolute URL where each segment is encoded on its own, so `/`, `?` and `#`
    ///   inside an id stay part of that segment.
    ///
    /// # Errors
    /// - Returns `Err` when the base URL cannot carry a path
    pub(crate) fn endpoint_segments(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| format!("API base URL '{}' cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// What: GET a URL and parse the body as JSON.
    ///
    /// Inputs:
    /// - `url`: Absolute URL from [`ApiClient::endpoint`].
    ///
    /// Output:
    /// - Parsed JSON `Value`; `Err` with a user-facing message on transport or status failure.
    pub(crate) async fn get_json(&self, url: Url) -> Result<Value> {
        debug!(url = %url, "GET");
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "request failed");
            describe_transport_error(&e)
        })?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "non-success status");
            return Err(map_status_error(status).into());
        }
        let value = response.json::<Value>().await?;
        Ok(value)
    }

    /// What: Send a body-less request and only check the status.
    ///
    /// Inputs:
    /// - `method`: HTTP method (e.g. `POST`, `DELETE`).
    /// - `url`: Absolute URL.
    ///
    /// Output:
    /// - `Ok(())` on any 2xx; `Err` otherwise.
    pub(crate) async fn send_empty(&self, method: Method, url: Url) -> Result<()> {
        debug!(method = %method, url = %url, "sending");
        let response = self
            .http
            .request(method.clone(), url.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(method = %method, url = %url, error = %e, "request failed");
                describe_transport_error(&e)
            })?;
        let status = response.status();
        if !status.is_success() {
            warn!(method = %method, url = %url, status = status.as_u16(), "non-success status");
            return Err(map_status_error(status).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, &Settings::default()).expect("client")
    }

    #[test]
    /// What: Endpoint URLs join cleanly and encode query values.
    ///
    /// - Input: Base with trailing slash, path with leading slash, query with spaces
    /// - Output: Single slash join and percent/plus-encoded query
    fn endpoint_joins_and_encodes() {
        let api = client("https://api.example.com/v1/");
        assert_eq!(api.base_url(), "https://api.example.com/v1");
        let url = api
            .endpoint("/kenz/listings", &[("search", "red bike".to_string())])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/kenz/listings?search=red+bike"
        );
        let bare = api.endpoint("chat/conversations", &[]).expect("url");
        assert_eq!(bare.as_str(), "https://api.example.com/v1/chat/conversations");
    }

    #[test]
    /// What: Ids with URL metacharacters stay inside their own path segment.
    ///
    /// - Input: Ids `L1?x=`, `../../admin` and `c#frag` between fixed segments
    /// - Output: Each id percent-encoded; the trailing segment is kept
    fn endpoint_segments_encode_ids() {
        let api = client("http://localhost:8080");
        let url = api
            .endpoint_segments(&["kenz", "listings", "L1?x=", "favorite"], &[])
            .expect("url");
        assert_eq!(url.path(), "/kenz/listings/L1%3Fx=/favorite");
        assert!(url.query().is_none());

        let url = api
            .endpoint_segments(&["kenz", "listings", "../../admin", "favorite"], &[])
            .expect("url");
        assert_eq!(url.path(), "/kenz/listings/..%2F..%2Fadmin/favorite");

        let url = api
            .endpoint_segments(
                &["chat", "conversations", "c#frag", "messages"],
                &[("limit", "5".to_string())],
            )
            .expect("url");
        assert_eq!(url.path(), "/chat/conversations/c%23frag/messages");
        assert_eq!(url.query(), Some("limit=5"));
        assert!(url.fragment().is_none());
    }

    #[test]
    /// What: Invalid base URLs are rejected at construction.
    ///
    /// - Input: `not a url`
    /// - Output: `Err`
    fn new_rejects_invalid_base() {
        assert!(ApiClient::new("not a url", &Settings::default()).is_err());
    }

    #[test]
    /// What: Common statuses map to descriptive messages.
    ///
    /// - Input: 401, 404, 503
    /// - Output: Distinct non-empty messages
    fn status_messages_are_descriptive() {
        assert!(map_status_error(StatusCode::UNAUTHORIZED).contains("sign in"));
        assert!(map_status_error(StatusCode::NOT_FOUND).contains("not be found"));
        assert!(map_status_error(StatusCode::SERVICE_UNAVAILABLE).contains("unavailable"));
    }

    #[test]
    /// What: Every status message is translated in every bundled locale.
    ///
    /// - Input: Status message keys against the `en-US` and `ar` catalogs
    /// - Output: Each key present and non-empty in both
    fn status_messages_are_localised() {
        let keys = [
            "app.errors.session_expired",
            "app.errors.not_found",
            "app.errors.rate_limited",
            "app.errors.unavailable",
            "app.errors.http_status",
        ];
        for locale in ["en-US", "ar"] {
            let map = crate::i18n::load_bundled_locale(locale).expect("bundled locale");
            for key in keys {
                assert!(
                    map.get(key).is_some_and(|v| !v.trim().is_empty()),
                    "{locale} lacks {key}"
                );
            }
        }
        assert_eq!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS),
            crate::i18n::t("app.errors.rate_limited")
        );
    }
}
