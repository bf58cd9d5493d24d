//! Forwarding of inbound requests to the origin server.

use crate::config::OriginConfig;
use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use reqwest::{redirect, Client};
use std::time::Duration;

/// Headers that describe a single connection and are never forwarded.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// An inbound request, reduced to what the origin needs to see.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub path_and_query: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardRequest {
    /// Build a forward request, dropping headers the proxy owns.
    ///
    /// `Accept-Encoding` is removed so the origin answers with an identity
    /// body the rewriter can read.
    pub fn new(method: Method, path_and_query: impl Into<String>, headers: &HeaderMap, body: Bytes) -> Self {
        let headers = headers
            .iter()
            .filter(|(name, _)| {
                !is_hop_by_hop(name)
                    && *name != header::HOST
                    && *name != header::CONTENT_LENGTH
                    && *name != header::ACCEPT_ENCODING
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self {
            method,
            path_and_query: path_and_query.into(),
            headers,
            body,
        }
    }

    /// The `User-Agent` header, or an empty string when absent.
    pub fn user_agent(&self) -> &str {
        self.headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// A buffered origin response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Replace the body, keeping status and headers.
    ///
    /// `Content-Length` is set to the new body's length; a relayed response
    /// keeps whatever length the origin sent.
    pub fn with_body(self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let mut headers = self.headers;
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        Self {
            status: self.status,
            headers,
            body,
        }
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// HTTP client for the origin server.
pub struct OriginClient {
    client: Client,
    base_url: String,
}

impl OriginClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `[origin]` section; `None` when no URL is set.
    pub fn from_config(config: &OriginConfig) -> Option<Self> {
        config
            .url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_secs(config.timeout_secs)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        if path_and_query.starts_with('/') {
            format!("{}{}", self.base_url, path_and_query)
        } else {
            format!("{}/{}", self.base_url, path_and_query)
        }
    }

    /// Send `request` to the origin and buffer the response.
    pub async fn forward(&self, request: ForwardRequest) -> hls_edge_common::Result<UpstreamResponse> {
        let url = self.url(&request.path_and_query);
        tracing::debug!(method = %request.method, %url, "Forwarding to origin");

        let response = self
            .client
            .request(request.method, &url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(hls_edge_common::Error::origin)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !is_hop_by_hop(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(hls_edge_common::Error::origin)?;

        tracing::debug!(%status, bytes = body.len(), "Origin responded");

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
