//! Dialogflow ES provider.
//!
//! Calls the `detectIntent` REST endpoint with a self-signed service-account
//! bearer token. The agent keeps its own conversation memory per session
//! path; the relay never stores one.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::auth::{signed_bearer, ServiceAccountKey};
use super::{Provider, QueryResult};

pub const PROJECT_ID: &str = "nomadia-chatbot-hjcj";
pub const LANGUAGE_CODE: &str = "fr-FR";

const DIALOGFLOW_BASE_URL: &str = "https://dialogflow.googleapis.com";
const DIALOGFLOW_AUDIENCE: &str = "https://dialogflow.googleapis.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub struct DialogflowProvider {
    client: HttpClient,
    key: ServiceAccountKey,
    base_url: String,
}

impl DialogflowProvider {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self::with_base_url(key, DIALOGFLOW_BASE_URL)
    }

    /// Point the client at a different host. Used by tests to run against a
    /// local mock server.
    pub fn with_base_url(key: ServiceAccountKey, base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            key,
            base_url: base_url.into(),
        }
    }

    /// Create from the `GOOGLE_CREDENTIALS_JSON` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ServiceAccountKey::from_env()?))
    }

    fn session_path(session_id: &str) -> String {
        format!("projects/{}/agent/sessions/{}", PROJECT_ID, session_id)
    }
}

#[async_trait]
impl Provider for DialogflowProvider {
    fn name(&self) -> &'static str {
        "Dialogflow ES"
    }

    async fn detect_intent(&self, session_id: &str, text: &str) -> Result<QueryResult> {
        let api_request = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text,
                    language_code: LANGUAGE_CODE,
                },
            },
        };

        let url = format!(
            "{}/v2/{}:detectIntent",
            self.base_url,
            Self::session_path(session_id)
        );
        let token = signed_bearer(&self.key, DIALOGFLOW_AUDIENCE)?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&api_request)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Dialogflow API error: {} - {}", status, body);
        }

        let api_response: DetectIntentResponse = response.json().await?;

        Ok(api_response.query_result)
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct DetectIntentRequest<'a> {
    #[serde(rename = "queryInput")]
    query_input: QueryInput<'a>,
}

#[derive(Serialize)]
struct QueryInput<'a> {
    text: TextInput<'a>,
}

#[derive(Serialize)]
struct TextInput<'a> {
    text: &'a str,
    #[serde(rename = "languageCode")]
    language_code: &'a str,
}

#[derive(Deserialize)]
struct DetectIntentResponse {
    #[serde(rename = "queryResult", default)]
    query_result: QueryResult,
}
