// src/api/chat.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::normalize::struct_to_json;
use crate::provider::QueryResult;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub text: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub query_result: CleanQueryResult,
    pub session_id: String,
}

/// The narrowed, flattened query result sent to the web client: only the
/// intent fields it uses, parameters and payloads already normalized.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanQueryResult {
    pub fulfillment_text: String,
    pub intent: IntentSummary,
    pub parameters: Value,
    pub fulfillment_messages: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummary {
    pub display_name: String,
    pub name: String,
}

fn clean_query_result(result: QueryResult) -> CleanQueryResult {
    let fulfillment_messages = result
        .fulfillment_messages
        .iter()
        .map(|msg| match msg.get("payload") {
            // Custom payloads arrive in the tagged Struct encoding; flatten
            // them. Other message kinds (plain text, quick replies) pass
            // through verbatim.
            Some(payload) => json!({ "payload": struct_to_json(payload) }),
            None => msg.clone(),
        })
        .collect();

    CleanQueryResult {
        fulfillment_text: result.fulfillment_text,
        intent: IntentSummary {
            display_name: result.intent.display_name,
            name: result.intent.name,
        },
        parameters: struct_to_json(&result.parameters),
        fulfillment_messages,
    }
}

pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SendMessageRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let session = request
            .session_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        info!("Detect-intent request for session {}", session);

        let query_result = app_state
            .provider
            .detect_intent(&session, &request.text)
            .await
            .map_err(|e| {
                error!("Provider call failed: {:#}", e);
                ApiError::internal(format!("{e:#}"))
            })?;

        Ok(Json(SendMessageResponse {
            query_result: clean_query_result(query_result),
            session_id: session,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
