// src/provider/mod.rs
// Conversational-agent provider interface and shared response types.

pub mod auth;
pub mod dialogflow;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// A conversational agent that maps one utterance to one query result.
///
/// Injected into `AppState` behind a trait object so handlers can run
/// against a stub in tests.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Send `text` to the agent under `session_id` and await its single
    /// response.
    async fn detect_intent(&self, session_id: &str, text: &str) -> Result<QueryResult>;
}

/// The subset of the agent's query result the relay consumes.
///
/// `parameters` and the entries of `fulfillment_messages` are kept as raw
/// JSON: they arrive in the tagged Struct encoding and are flattened by the
/// normalizer, not deserialized into domain types.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryResult {
    pub fulfillment_text: String,
    pub intent: Intent,
    pub parameters: Value,
    pub fulfillment_messages: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Intent {
    pub name: String,
    pub display_name: String,
}
