// SPDX-License-Identifier: MPL-2.0
//! Remote search backend.
//!
//! The session controller never talks to the network itself. It hands out
//! [`PageRequest`]s and the application executes them through a
//! [`SearchBackend`]. [`UnsplashClient`] is the production backend; tests plug
//! in scripted backends instead.

use super::photo::Photo;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Unsplash photo search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.unsplash.com/search/photos";

/// Response header carrying the remaining request quota for the current hour.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Access key captured from the build environment, if any.
pub const BUILD_TIME_ACCESS_KEY: Option<&str> = option_env!("UNSPLASH_ACCESS_KEY");

/// Runtime environment variable consulted for the access key.
pub const ENV_ACCESS_KEY: &str = "UNSPLASH_ACCESS_KEY";

const USER_AGENT: &str = concat!("LumenSearch/", env!("CARGO_PKG_VERSION"));

/// Errors produced while fetching a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, timeout...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("HTTP status: {0}")]
    Status(u16),
    /// The body could not be decoded as a search response.
    #[error("malformed response: {0}")]
    Decode(String),
    /// No access key was configured.
    #[error("no Unsplash access key configured")]
    MissingCredential,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// A single page fetch issued by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Search generation that issued this request.
    pub generation: u64,
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

/// One decoded page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub photos: Vec<Photo>,
    pub total_pages: u32,
    /// Raw value of the rate-limit-remaining header, when present.
    pub rate_limit_remaining: Option<String>,
}

impl SearchPage {
    /// Whether the server reported an exhausted quota.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit_remaining.as_deref() == Some("0")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_pages: u32,
    results: Vec<Photo>,
}

/// Something that can execute a [`PageRequest`].
///
/// The returned future is `'static` so it can be handed to `Task::perform`.
pub trait SearchBackend: Send + Sync {
    fn search(&self, request: PageRequest) -> BoxFuture<'static, Result<SearchPage, ApiError>>;
}

/// Connection settings for [`UnsplashClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub endpoint: String,
    pub access_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_API_TIMEOUT_SECS),
        }
    }
}

/// Picks the first usable access key: CLI, config, runtime env, build env.
#[must_use]
pub fn resolve_access_key(cli: Option<String>, config: Option<String>) -> Option<String> {
    cli.into_iter()
        .chain(config)
        .chain(std::env::var(ENV_ACCESS_KEY).ok())
        .chain(BUILD_TIME_ACCESS_KEY.map(str::to_string))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// Production backend for the Unsplash search API.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl UnsplashClient {
    /// Builds a client with the given settings.
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    /// Returns a clone of the underlying HTTP client, shared with image loading.
    #[must_use]
    pub fn http(&self) -> reqwest::Client {
        self.client.clone()
    }

    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }
}

impl SearchBackend for UnsplashClient {
    fn search(&self, request: PageRequest) -> BoxFuture<'static, Result<SearchPage, ApiError>> {
        let client = self.client.clone();
        let endpoint = self.settings.endpoint.clone();
        let access_key = self.settings.access_key.clone();

        Box::pin(async move {
            let access_key = access_key.ok_or(ApiError::MissingCredential)?;
            let page = request.page.to_string();
            let per_page = request.per_page.to_string();

            tracing::debug!(query = %request.query, page = request.page, "requesting search page");

            let response = client
                .get(&endpoint)
                .query(&[
                    ("client_id", access_key.as_str()),
                    ("query", request.query.as_str()),
                    ("per_page", per_page.as_str()),
                    ("page", page.as_str()),
                ])
                .send()
                .await?;

            let status = response.status().as_u16();
            let remaining = response
                .headers()
                .get(RATE_LIMIT_REMAINING_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?;

            parse_response(status, remaining.as_deref(), &body)
        })
    }
}

/// Interprets a raw HTTP response from the search endpoint.
///
/// A 2xx answer carrying an exhausted quota is returned as an empty rate-limited
/// page even when its body cannot be decoded, so the caller can start the
/// cooldown instead of reporting a generic failure.
pub fn parse_response(
    status: u16,
    rate_limit_remaining: Option<&str>,
    body: &[u8],
) -> Result<SearchPage, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status(status));
    }

    let rate_limit_remaining = rate_limit_remaining.map(|value| value.trim().to_string());

    match serde_json::from_slice::<SearchResponse>(body) {
        Ok(decoded) => Ok(SearchPage {
            photos: decoded.results,
            total_pages: decoded.total_pages,
            rate_limit_remaining,
        }),
        Err(_) if rate_limit_remaining.as_deref() == Some("0") => Ok(SearchPage {
            rate_limit_remaining,
            ..SearchPage::default()
        }),
        Err(err) => Err(ApiError::Decode(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "total": 2,
        "total_pages": 1,
        "results": [
            {
                "id": "one",
                "alt_description": "red apple",
                "width": 10,
                "height": 20,
                "urls": { "raw": "r1", "full": "f1", "regular": "g1", "small": "s1" }
            },
            {
                "id": "two",
                "alt_description": null,
                "width": 30,
                "height": 40,
                "urls": { "raw": "r2", "full": "f2", "regular": "g2", "small": "s2" }
            }
        ]
    }"#;

    #[test]
    fn parse_response_decodes_results_in_order() {
        let page = parse_response(200, Some("49"), PAGE_JSON.as_bytes()).expect("valid page");
        let ids: Vec<_> = page.photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["one", "two"]);
        assert_eq!(page.total_pages, 1);
        assert!(!page.is_rate_limited());
    }

    #[test]
    fn parse_response_flags_exhausted_quota() {
        let page = parse_response(200, Some("0"), PAGE_JSON.as_bytes()).expect("valid page");
        assert!(page.is_rate_limited());
        assert_eq!(page.photos.len(), 2);
    }

    #[test]
    fn parse_response_tolerates_garbage_body_when_rate_limited() {
        let page = parse_response(200, Some("0"), b"Rate Limit Exceeded").expect("rate limited");
        assert!(page.is_rate_limited());
        assert!(page.photos.is_empty());
    }

    #[test]
    fn parse_response_rejects_non_success_status() {
        assert_eq!(
            parse_response(401, Some("50"), PAGE_JSON.as_bytes()),
            Err(ApiError::Status(401))
        );
        assert_eq!(parse_response(403, Some("0"), b""), Err(ApiError::Status(403)));
    }

    #[test]
    fn parse_response_reports_malformed_body() {
        let result = parse_response(200, Some("10"), b"{\"results\": 5}");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn remaining_other_than_zero_is_not_rate_limited() {
        let page = SearchPage {
            rate_limit_remaining: Some("00".to_string()),
            ..SearchPage::default()
        };
        assert!(!page.is_rate_limited());
    }

    #[test]
    fn resolve_access_key_prefers_cli_then_config() {
        assert_eq!(
            resolve_access_key(Some("cli".into()), Some("cfg".into())).as_deref(),
            Some("cli")
        );
        assert_eq!(
            resolve_access_key(Some("  ".into()), Some("cfg".into())).as_deref(),
            Some("cfg")
        );
    }

    #[tokio::test]
    async fn client_without_key_fails_before_network() {
        let client = UnsplashClient::new(ApiSettings::default()).expect("client builds");
        let request = PageRequest {
            generation: 1,
            query: "apples".into(),
            page: 1,
            per_page: 30,
        };
        assert_eq!(
            client.search(request).await,
            Err(ApiError::MissingCredential)
        );
    }
}
