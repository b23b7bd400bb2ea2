//! HTTP client for the places REST API.
//!
//! Wraps `reqwest` with API key management, typed request/response bodies,
//! status-to-error mapping and retry on transient failures.

use std::future::Future;
use std::time::Duration;

use geoplaces_core::PlacesConfig;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::service::PlacesService;
use crate::types::{
    GetPlaceRequest, GetPlaceResponse, ReverseGeocodeRequest, ReverseGeocodeResponse,
    SearchTextRequest, SearchTextResponse, SuggestRequest, SuggestResponse,
};

const DEFAULT_BASE_URL: &str = "https://places.geo.us-east-1.amazonaws.com";

/// Characters escaped when a place id is written into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Client for the places REST API.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a client pointed at the default regional endpoint, with
    /// retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL, with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("geoplaces/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Exactly one trailing slash, so relative joins append to the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Creates a client from loaded configuration, including its retry policy.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::with_base_url`].
    pub fn from_config(config: &PlacesConfig) -> Result<Self, PlacesError> {
        Ok(
            Self::with_base_url(&config.api_key, config.request_timeout_secs, &config.base_url)?
                .with_retry(config.max_retries, config.retry_backoff_base_ms),
        )
    }

    /// Enables retry of transient failures: up to `max_retries` extra
    /// attempts, with the n-th wait around `backoff_base_ms * 2^(n-1)`.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Builds the request URL for `path` with the API key and any extra
    /// query parameters, percent-encoded.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Builds the `GetPlace` path. Empty and dot-only ids are refused: URL
    /// resolution treats them (even percent-encoded) as path segments.
    fn place_path(place_id: &str) -> Result<String, PlacesError> {
        if place_id.chars().all(|c| c == '.') {
            return Err(PlacesError::InvalidBaseUrl {
                url: format!("v2/place/{place_id}"),
                reason: "place id cannot be empty or a dot segment".to_string(),
            });
        }
        Ok(format!("v2/place/{}", utf8_percent_encode(place_id, PATH_SEGMENT)))
    }

    async fn post_json<B, T>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, PlacesError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.build_url(path, &[])?;
        tracing::debug!(operation, path, "sending places request");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.post(url).json(body).send().await?;
                Self::decode(operation, response).await
            }
        })
        .await
    }

    async fn get_json<T>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PlacesError>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(path, query)?;
        tracing::debug!(operation, path, "sending places request");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url).send().await?;
                Self::decode(operation, response).await
            }
        })
        .await
    }

    /// Maps the HTTP status to a typed error, then parses the body.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Throttled`] on 429.
    /// - [`PlacesError::Api`] on any other non-2xx status.
    /// - [`PlacesError::Deserialize`] if a 2xx body does not parse as `T`.
    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T, PlacesError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PlacesError::Throttled { retry_after_secs });
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: operation.to_string(),
            source: e,
        })
    }
}

/// Pulls the human-readable message out of an error body.
///
/// The service sends `{"message": "..."}` (sometimes `"Message"`); anything
/// else falls back to the raw body or the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("Message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        });

    from_json.unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            trimmed.to_string()
        }
    })
}

impl PlacesService for PlacesClient {
    fn search_text(
        &self,
        request: &SearchTextRequest,
    ) -> impl Future<Output = Result<SearchTextResponse, PlacesError>> + Send {
        self.post_json("SearchText", "v2/search-text", request)
    }

    fn reverse_geocode(
        &self,
        request: &ReverseGeocodeRequest,
    ) -> impl Future<Output = Result<ReverseGeocodeResponse, PlacesError>> + Send {
        self.post_json("ReverseGeocode", "v2/reverse-geocode", request)
    }

    fn get_place(
        &self,
        request: &GetPlaceRequest,
    ) -> impl Future<Output = Result<GetPlaceResponse, PlacesError>> + Send {
        async move {
            let path = Self::place_path(&request.place_id)?;
            let query: Vec<(&str, &str)> = request
                .language
                .as_deref()
                .map(|lang| ("language", lang))
                .into_iter()
                .collect();
            self.get_json("GetPlace", &path, &query).await
        }
    }

    fn suggest(
        &self,
        request: &SuggestRequest,
    ) -> impl Future<Output = Result<SuggestResponse, PlacesError>> + Send {
        self.post_json("Suggest", "v2/suggest", request)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
