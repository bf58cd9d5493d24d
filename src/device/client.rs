use super::{profile_from_document, DeviceResolver, ResolutionError};
use crate::config::DdrConfig;
use hls_edge_common::DeviceProfile;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for a device description repository classify endpoint.
pub struct DdrClient {
    client: Client,
    url: String,
}

impl DdrClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &DdrConfig) -> Self {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl DeviceResolver for DdrClient {
    async fn resolve(&self, user_agent: &str) -> Result<DeviceProfile, ResolutionError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("ua", user_agent)])
            .send()
            .await
            .map_err(ResolutionError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::Status(status));
        }

        let document: serde_json::Value =
            response.json().await.map_err(ResolutionError::Decode)?;
        let profile = profile_from_document(&document)?;

        tracing::debug!(user_agent, device = %profile, "Resolved device profile");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DdrClient {
        DdrClient::new(
            format!("{}/servlet/classify", server.uri()),
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_resolve_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servlet/classify"))
            .and(query_param("ua", "Mozilla/5.0 (Linux; Android 4.4)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "attributes": {
                        "displayWidth": "480",
                        "displayHeight": "800",
                        "is_desktop": "false",
                        "device_os": "Android",
                        "device_os_version": "4.4"
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .resolve("Mozilla/5.0 (Linux; Android 4.4)")
            .await
            .unwrap();

        assert_eq!(profile.display_height, 800);
        assert_eq!(profile.os_version_major, Some(4));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).resolve("ua").await.unwrap_err();
        assert_matches!(err, ResolutionError::Status(s) if s.as_u16() == 503);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).resolve("ua").await.unwrap_err();
        assert_matches!(err, ResolutionError::Decode(_));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = DdrClient::new("http://127.0.0.1:1/servlet/classify", Duration::from_secs(1));
        let err = client.resolve("ua").await.unwrap_err();
        assert_matches!(err, ResolutionError::Request(_));
    }
}
