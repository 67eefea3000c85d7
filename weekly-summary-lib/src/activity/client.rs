//! GitHub API client
//!
//! Minimal GitHub REST client for fetching repository activity. Every request is made exactly
//! once; the caller decides what an unsuccessful result means for its resource.

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

const LOG_TARGET: &str = "    github";

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type for the standard v3 JSON representation.
pub const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

/// Media type that adds `starred_at` to the starred repository listing.
pub const MEDIA_TYPE_STAR: &str = "application/vnd.github.star+json";

/// Items requested per page on list endpoints.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Upper bound on pages fetched for any single listing.
const MAX_PAGES: u32 = 100;

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of a GitHub API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded
    Success(T),

    /// The requested resource was not found (404)
    NotFound,

    /// The API refused the request because the quota is exhausted
    RateLimited(Option<RateLimitInfo>),

    /// Transport failure, unexpected status, or undecodable body
    Failed(ohno::AppError),
}

impl<T> ApiResult<T> {
    /// Turn anything but success into `None`, logging a warning that names `what` was being fetched.
    pub fn or_warn(self, what: &str) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::NotFound => {
                log::warn!(target: LOG_TARGET, "Could not fetch {what}: not found");
                None
            }
            Self::RateLimited(Some(rl)) => {
                log::warn!(
                    target: LOG_TARGET,
                    "Could not fetch {what}: rate limit exhausted ({} remaining, resets at {})",
                    rl.remaining,
                    rl.reset_at.format("%T UTC")
                );
                None
            }
            Self::RateLimited(None) => {
                log::warn!(target: LOG_TARGET, "Could not fetch {what}: rate limited");
                None
            }
            Self::Failed(e) => {
                log::warn!(target: LOG_TARGET, "Could not fetch {what}: {e:#}");
                None
            }
        }
    }
}

/// GitHub API client, built once per run and shared by every fetch.
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    page_size: u8,
}

impl Client {
    /// Create a new client with an optional authentication token and base URL
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_V3));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("weekly-summary")
            .default_headers(headers)
            .build()?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the number of items requested per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn page_size(&self) -> u8 {
        self.page_size
    }

    /// Build an API URL from a path such as `/repos/o/r/commits` plus query parameters.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> crate::Result<Url> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                let _ = pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Make an API call and classify the result
    pub async fn api_call(&self, url: Url, media_type: Option<&str>) -> ApiResult<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(media_type) = media_type {
            request = request.header(ACCEPT, media_type);
        }

        let resp = match request.send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.into()),
        };

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp);
        }

        let status_code = status.as_u16();
        if matches!(status_code, 403 | 429) {
            let rate_limit = extract_rate_limit_from_headers(resp.headers());
            if status_code == 429 || rate_limit.is_some_and(|rl| rl.remaining == 0) {
                return ApiResult::RateLimited(rate_limit);
            }
        }

        if status_code == 404 {
            return ApiResult::NotFound;
        }

        match resp.error_for_status() {
            Ok(resp) => ApiResult::Success(resp),
            Err(e) => ApiResult::Failed(e.into()),
        }
    }

    /// Fetch and decode a single JSON document.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = match self.url(path, &[]) {
            Ok(url) => url,
            Err(e) => return ApiResult::Failed(e),
        };

        log::debug!(target: LOG_TARGET, "GET {url}");
        match self.api_call(url, None).await {
            ApiResult::Success(resp) => match resp.json().await {
                Ok(data) => ApiResult::Success(data),
                Err(e) => ApiResult::Failed(e.into()),
            },
            ApiResult::NotFound => ApiResult::NotFound,
            ApiResult::RateLimited(rl) => ApiResult::RateLimited(rl),
            ApiResult::Failed(e) => ApiResult::Failed(e),
        }
    }

    /// Fetch every page of a list endpoint.
    ///
    /// Pages are requested with `per_page`/`page` until one comes back with fewer items than the
    /// page size, or until `stop` returns true for the page just received. Any failed page fails
    /// the whole listing.
    pub async fn get_pages<T, F>(&self, path: &str, query: &[(&str, &str)], media_type: Option<&str>, stop: F) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: Fn(&[T]) -> bool,
    {
        let per_page = self.page_size.to_string();
        let mut items = Vec::new();
        let mut page_num = 1u32;

        loop {
            let page_str = page_num.to_string();
            let mut params: Vec<(&str, &str)> = query.to_vec();
            params.push(("per_page", &per_page));
            params.push(("page", &page_str));

            let url = match self.url(path, &params) {
                Ok(url) => url,
                Err(e) => return ApiResult::Failed(e),
            };

            log::debug!(target: LOG_TARGET, "GET {url}");
            let resp = match self.api_call(url, media_type).await {
                ApiResult::Success(resp) => resp,
                ApiResult::NotFound => return ApiResult::NotFound,
                ApiResult::RateLimited(rl) => return ApiResult::RateLimited(rl),
                ApiResult::Failed(e) => return ApiResult::Failed(e),
            };

            let page: Vec<T> = match resp.json().await {
                Ok(page) => page,
                Err(e) => return ApiResult::Failed(e.into()),
            };

            let last_page = page.len() < usize::from(self.page_size) || stop(page.as_slice());
            items.extend(page);

            if last_page {
                break;
            }

            page_num += 1;
            if page_num > MAX_PAGES {
                log::debug!(target: LOG_TARGET, "Reached maximum page limit ({MAX_PAGES}) for '{path}', stopping after {} items", items.len());
                break;
            }
        }

        ApiResult::Success(items)
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
