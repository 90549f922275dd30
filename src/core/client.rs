use crate::domain::model::{Credentials, FetchOutcome, SendBody, TemplateBody};
use crate::domain::ports::MailerApi;
use crate::utils::error::{MailerError, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const TEMPLATE_PATH: &str = "/api/v1/template";
pub const SEND_PATH: &str = "/api/v1/send";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP side of the mailer service. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct TransportClient {
    client: Client,
    base_url: String,
}

impl TransportClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailerError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_credentials(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        Self::new(credentials.base_url(), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` as JSON and classifies the response. Every failure maps
    /// onto one of the three transport variants of `MailerError`.
    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| MailerError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(MailerError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::debug!("Failed to read response body: {}", e);
            MailerError::ResponseParseError
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Response body is not JSON: {}", e);
            MailerError::ResponseParseError
        })
    }
}

#[async_trait::async_trait]
impl MailerApi for TransportClient {
    async fn post_template(&self, body: &TemplateBody) -> Result<Value> {
        self.post_json(TEMPLATE_PATH, body).await
    }

    async fn post_send(&self, body: &SendBody) -> FetchOutcome {
        let outcome = FetchOutcome::from(self.post_json(SEND_PATH, body).await);
        if let Some(error) = outcome.error() {
            tracing::error!("{}", error);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn send_body() -> SendBody {
        SendBody {
            name: "welcome".to_string(),
            rcpt: "x@y.com".to_string(),
            domain: "d".to_string(),
            locale: String::new(),
            vars: serde_json::Map::new(),
            user: "alice".to_string(),
            token: "s3cr3t".to_string(),
        }
    }

    fn template_body() -> TemplateBody {
        TemplateBody {
            template: "<mjml></mjml>".to_string(),
            domain: "example.com".to_string(),
            sender: String::new(),
            name: Some("welcome".to_string()),
            subject: None,
            locale: None,
            user: "alice".to_string(),
            token: "s3cr3t".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> TransportClient {
        TransportClient::new(&server.base_url(), DEFAULT_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn test_post_send_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(SEND_PATH)
                .header("content-type", "application/json")
                .json_body(serde_json::to_value(send_body()).unwrap());
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"queued": 1}));
        });

        let outcome = client_for(&server).post_send(&send_body()).await;

        api_mock.assert();
        assert_eq!(outcome, FetchOutcome::success(serde_json::json!({"queued": 1})));
    }

    #[tokio::test]
    async fn test_post_send_http_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(SEND_PATH);
            then.status(500);
        });

        let outcome = client_for(&server).post_send(&send_body()).await;

        api_mock.assert();
        assert!(outcome.result().is_none());
        assert_eq!(outcome.error(), Some("HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn test_post_send_non_json_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(SEND_PATH);
            then.status(200).body("<html>ok</html>");
        });

        let outcome = client_for(&server).post_send(&send_body()).await;

        api_mock.assert();
        assert_eq!(outcome.error(), Some("Failed to parse response as JSON"));
        assert!(outcome.result().is_none());
    }

    #[tokio::test]
    async fn test_post_send_network_failure() {
        // Nothing listens on port 1.
        let client = TransportClient::new("http://127.0.0.1:1", DEFAULT_TIMEOUT).unwrap();

        let outcome = client.post_send(&send_body()).await;

        assert!(outcome.result().is_none());
        assert!(outcome
            .error()
            .unwrap()
            .starts_with("Network or fetch error: "));
    }

    #[tokio::test]
    async fn test_post_send_timeout_is_network_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(SEND_PATH);
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(serde_json::json!({}));
        });

        let client = TransportClient::new(&server.base_url(), Duration::from_millis(50)).unwrap();
        let outcome = client.post_send(&send_body()).await;

        assert!(outcome
            .error()
            .unwrap()
            .starts_with("Network or fetch error: "));
    }

    #[tokio::test]
    async fn test_post_template_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(TEMPLATE_PATH)
                .json_body(serde_json::json!({
                    "template": "<mjml></mjml>",
                    "domain": "example.com",
                    "sender": "",
                    "name": "welcome",
                    "user": "alice",
                    "token": "s3cr3t"
                }));
            then.status(201).json_body(serde_json::json!({"id": "tpl-1"}));
        });

        let result = client_for(&server)
            .post_template(&template_body())
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result["id"], "tpl-1");
    }

    #[tokio::test]
    async fn test_post_template_raises_on_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(TEMPLATE_PATH);
            then.status(401).json_body(serde_json::json!({"error": "bad token"}));
        });

        let err = client_for(&server)
            .post_template(&template_body())
            .await
            .unwrap_err();

        assert!(matches!(err, MailerError::HttpStatusError { status: 401 }));
    }

    #[tokio::test]
    async fn test_post_template_raises_on_bad_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(TEMPLATE_PATH);
            then.status(200).body("stored");
        });

        let err = client_for(&server)
            .post_template(&template_body())
            .await
            .unwrap_err();

        assert!(matches!(err, MailerError::ResponseParseError));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = TransportClient::new("http://localhost:3000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_credentials_with_trailing_slash_hit_send_path() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path(SEND_PATH);
            then.status(200).json_body(serde_json::json!({"queued": 1}));
        });
        let credentials =
            Credentials::new("alice", "s3cr3t", &format!("{}/", server.base_url())).unwrap();

        let outcome = TransportClient::from_credentials(&credentials, DEFAULT_TIMEOUT)
            .unwrap()
            .post_send(&send_body())
            .await;

        api_mock.assert();
        assert!(outcome.is_success());
    }
}
