use serde::{Deserialize, Serialize};

/// Wrapper for Stagehand API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Options for starting a browser session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionOptions {
    /// "LOCAL" or "BROWSERBASE".
    pub env: String,
    #[serde(rename = "modelName", skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(rename = "browserbaseApiKey", skip_serializing_if = "Option::is_none")]
    pub browserbase_api_key: Option<String>,
    #[serde(rename = "browserbaseProjectId", skip_serializing_if = "Option::is_none")]
    pub browserbase_project_id: Option<String>,
}

/// Session metadata returned when a session starts.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigateRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActRequest {
    pub instruction: String,
}

/// A natural-language extraction request with a response JSON schema.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub instruction: String,
    #[serde(rename = "schemaDefinition")]
    pub schema: serde_json::Value,
}

/// Rendered DOM snapshot of the session's current page.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentData {
    pub content: String,
}
