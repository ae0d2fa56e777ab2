//! HTTP client for the market data API
//!
//! One `ApiClient` per configuration. The bearer token lives on the instance,
//! so call sites that need different credentials build their own client.

use super::{ApiError, DEFAULT_HEADERS};
use crate::config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let mut api = Self::with_client(client, config.base_url.clone());
        if let Some(key) = &config.api_key {
            api.set_api_key(key.clone());
        }

        tracing::debug!(
            "Initialized API client: {} (auth: {})",
            api.base_url,
            api.api_key.is_some()
        );

        Ok(api)
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
        }
    }

    /// Store a bearer token for all subsequent requests
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for &(name, value) in DEFAULT_HEADERS {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }

        if let Some(key) = &self.api_key {
            match HeaderValue::from_str(&format!("Bearer {}", key)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    tracing::warn!("API key is not a valid header value, sending unauthenticated")
                }
            }
        }

        headers
    }

    /// Base URL + `endpoint`, then each of `segments` percent-encoded as a
    /// single path segment (`/`, `?` and `#` included), then the query
    fn build_url(
        &self,
        endpoint: &str,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint);
        let mut url =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(format!("{}: cannot append path", raw)))?
                .pop_if_empty()
                .extend(segments);
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// GET `endpoint` with optional query parameters and decode the JSON body
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint, &[], params)?;
        self.send(url).await
    }

    /// Like [`ApiClient::get`], with caller-supplied values appended to the
    /// path as encoded segments
    pub async fn get_with_segments<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint, segments, params)?;
        self.send(url).await
    }

    async fn send<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).headers(self.headers()).send().await?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            // Error payload is best-effort: unreadable or non-JSON bodies become None
            let body = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice(&bytes).ok());

            tracing::warn!("API request failed: {}", status);

            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap as AxumHeaders, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String) -> ApiClient {
        let http = Client::builder().no_proxy().build().unwrap();
        ApiClient::with_client(http, base_url)
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/missing-json",
                get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))) }),
            )
            .route(
                "/missing-text",
                get(|| async { (StatusCode::NOT_FOUND, "<html>nope</html>") }),
            )
            .route("/garbled", get(|| async { (StatusCode::OK, "{not json") }))
            .route(
                "/echo",
                get(
                    |headers: AxumHeaders, Query(params): Query<HashMap<String, String>>| async move {
                        let header = |name: &str| {
                            headers
                                .get(name)
                                .and_then(|v| v.to_str().ok())
                                .map(String::from)
                        };
                        Json(json!({
                            "authorization": header("authorization"),
                            "content_type": header("content-type"),
                            "params": params,
                        }))
                    },
                ),
            )
    }

    #[tokio::test]
    async fn error_status_carries_parsed_body() {
        let api = client(spawn_server(router()).await);
        let err = api.get::<Value>("/missing-json", &[]).await.unwrap_err();

        match err {
            ApiError::Status {
                status,
                status_text,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
                assert_eq!(body, Some(json!({"error": "not found"})));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn error_status_with_unparsable_body_has_no_body() {
        let api = client(spawn_server(router()).await);
        let err = api.get::<Value>("/missing-text", &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(matches!(err, ApiError::Status { body: None, .. }));
    }

    #[tokio::test]
    async fn malformed_success_body_is_parse_error() {
        let api = client(spawn_server(router()).await);
        let err = api.get::<Value>("/garbled", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn sends_default_headers_and_query() {
        let api = client(spawn_server(router()).await);
        let body: Value = api
            .get("/echo", &[("expiry", "2024-01-19"), ("limit", "5")])
            .await
            .unwrap();

        assert_eq!(body["authorization"], Value::Null);
        assert_eq!(body["content_type"], "application/json");
        assert_eq!(body["params"]["expiry"], "2024-01-19");
        assert_eq!(body["params"]["limit"], "5");
    }

    #[tokio::test]
    async fn bearer_token_is_attached_once_configured() {
        let mut api = client(spawn_server(router()).await);
        api.set_api_key("secret-token");
        let body: Value = api.get("/echo", &[]).await.unwrap();
        assert_eq!(body["authorization"], "Bearer secret-token");
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(format!("http://{}", addr));
        let err = api.get::<Value>("/anything", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let api = client("not a url".to_string());
        let err = api.build_url("/dealergamma", &["SPY"], &[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn segments_are_encoded_as_single_path_segments() {
        let api = client("http://localhost:8080/".to_string());

        let url = api.build_url("/dealergamma", &["BRK/B"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/dealergamma/BRK%2FB");

        let url = api.build_url("/dealergamma", &["A?b=1#c"], &[]).unwrap();
        assert_eq!(url.path(), "/dealergamma/A%3Fb=1%23c");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let url = api
            .build_url("/dealergamma", &["SPY"], &[("limit", "5")])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/dealergamma/SPY?limit=5");
    }
}
