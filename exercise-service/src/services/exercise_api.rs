//! Client for the public exercise catalogue.
//!
//! Results are relayed verbatim; this service never interprets them.

use crate::config::ExerciseApiConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;

const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Clone)]
pub struct ExerciseApiClient {
    client: Client,
    config: ExerciseApiConfig,
}

impl ExerciseApiClient {
    pub fn new(config: ExerciseApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Check if the API key is set.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty()
    }

    /// Catalogue entries that target a muscle group. Without a muscle the
    /// filter is left off the upstream request entirely.
    pub async fn search_by_muscle(&self, muscle: Option<&str>) -> Result<Value> {
        self.lookup("muscle", muscle).await
    }

    /// Catalogue entries whose name matches.
    pub async fn search_by_name(&self, name: &str) -> Result<Value> {
        self.lookup("name", Some(name)).await
    }

    async fn lookup(&self, filter: &str, value: Option<&str>) -> Result<Value> {
        if !self.is_configured() {
            tracing::warn!("Exercise API key is not configured; upstream will likely reject");
        }

        let mut request = self
            .client
            .get(&self.config.base_url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret());
        if let Some(value) = value {
            request = request.query(&[(filter, value)]);
        }

        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, filter = %filter, "Exercise API response");

        if !status.is_success() {
            return Err(anyhow!("Exercise API returned {}: {}", status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use serde_json::json;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: String, key: &str) -> ExerciseApiClient {
        ExerciseApiClient::new(ExerciseApiConfig {
            base_url,
            api_key: Secret::new(key.to_string()),
        })
    }

    #[tokio::test]
    async fn sends_key_and_muscle_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("X-Api-Key", "k-123"))
            .and(query_param("muscle", "biceps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "Curl" }])))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(server.uri(), "k-123")
            .search_by_muscle(Some("biceps"))
            .await
            .unwrap();

        assert_eq!(body, json!([{ "name": "Curl" }]));
    }

    #[tokio::test]
    async fn absent_muscle_sends_no_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(|req: &wiremock::Request| req.url.query().is_none())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(server.uri(), "k").search_by_muscle(None).await.unwrap();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn name_lookup_uses_name_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("name", "press"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(server.uri(), "k").search_by_name("press").await.unwrap();
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn upstream_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        assert!(client_for(server.uri(), "k")
            .search_by_muscle(Some("legs"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        assert!(client_for(server.uri(), "k")
            .search_by_name("squat")
            .await
            .is_err());
    }

    #[test]
    fn reports_missing_key() {
        assert!(!client_for("http://localhost".into(), "").is_configured());
        assert!(client_for("http://localhost".into(), "k").is_configured());
    }
}
