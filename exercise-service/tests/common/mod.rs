#![allow(dead_code)]

use chrono::{Duration, Utc};
use exercise_service::config::{ExerciseConfig, StoreBackend};
use exercise_service::middleware::AccessTokenClaims;
use exercise_service::services::ExerciseStore;
use exercise_service::startup::Application;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_API_KEY: &str = "test-api-key";
pub const USER_A: &str = "64b7f0c2a1b2c3d4e5f60001";
pub const USER_B: &str = "64b7f0c2a1b2c3d4e5f60002";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn ExerciseStore>,
    pub exercise_api: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_api_url(None).await
    }

    /// Spawn with the exercise catalogue at `api_url` instead of the mock server.
    pub async fn spawn_with_api_url(api_url: Option<String>) -> Self {
        let exercise_api = MockServer::start().await;

        let mut config = ExerciseConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.store.backend = StoreBackend::Memory;
        config.auth.jwt_secret = Secret::new(TEST_JWT_SECRET.to_string());
        config.exercise_api.base_url =
            api_url.unwrap_or_else(|| format!("{}/v1/exercises", exercise_api.uri()));
        config.exercise_api.api_key = Secret::new(TEST_API_KEY.to_string());

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.state().store.clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            exercise_api,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// POST /exercises as `user_id`, returning the raw response.
    pub async fn create_exercise(&self, user_id: &str, exercise: Value) -> reqwest::Response {
        self.client
            .post(self.url("/exercises"))
            .bearer_auth(token_for(user_id))
            .json(&json!({ "exercise": exercise }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create an exercise as `user_id` and return its id.
    pub async fn seed_exercise(&self, user_id: &str) -> String {
        let response = self.create_exercise(user_id, squat()).await;
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        body["exercise"]["_id"]
            .as_str()
            .expect("created exercise has an _id")
            .to_string()
    }
}

pub fn token_for(user_id: &str) -> String {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        exp: (now + Duration::minutes(15)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

pub fn squat() -> Value {
    json!({
        "name": "Squat",
        "type": "strength",
        "muscle": "legs",
        "equipment": "barbell",
        "difficulty": "medium",
        "instructions": "Feet shoulder-width apart, sit back and stand up."
    })
}
