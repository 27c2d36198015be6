pub mod error;
pub mod types;

pub use error::{Result, StagehandError};
pub use types::SessionOptions;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use types::{ActRequest, ApiResponse, ContentData, ExtractRequest, NavigateRequest, SessionData};

pub struct StagehandClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl StagehandClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
        }
    }

    /// Start a browser session. The returned handle owns no connection
    /// state beyond the session id; drop it only after calling `end`.
    pub async fn start_session(&self, options: &SessionOptions) -> Result<StagehandSession> {
        let url = format!("{}/sessions", self.base_url);
        let data: SessionData = self.post_json(&url, options).await?;
        tracing::info!(session_id = %data.session_id, env = %options.env, "Stagehand session started");

        Ok(StagehandSession {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            session_id: data.session_id,
        })
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        post_json(&self.client, self.api_key.as_deref(), url, body).await
    }
}

/// A live browser session on the Stagehand server.
pub struct StagehandSession {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    session_id: String,
}

impl StagehandSession {
    pub fn id(&self) -> &str {
        &self.session_id
    }

    /// Navigate the session's page to a URL and wait for the DOM to load.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let endpoint = self.endpoint("navigate");
        let _: serde_json::Value = self
            .post_json(&endpoint, &NavigateRequest { url: url.to_string() })
            .await?;
        tracing::debug!(session_id = %self.session_id, url, "Navigated");
        Ok(())
    }

    /// Perform a natural-language page action (clicking, scrolling,
    /// dismissing banners).
    pub async fn act(&self, instruction: &str) -> Result<()> {
        let endpoint = self.endpoint("act");
        let _: serde_json::Value = self
            .post_json(
                &endpoint,
                &ActRequest {
                    instruction: instruction.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    /// Run a natural-language extraction against the current page.
    /// The server shapes its answer to the supplied JSON schema; the raw
    /// value is returned for the caller to deserialize.
    pub async fn extract(
        &self,
        instruction: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let endpoint = self.endpoint("extract");
        let data: serde_json::Value = self
            .post_json(
                &endpoint,
                &ExtractRequest {
                    instruction: instruction.to_string(),
                    schema: schema.clone(),
                },
            )
            .await?;

        if data.is_null() {
            return Err(StagehandError::MissingData(
                "extract returned no data".to_string(),
            ));
        }
        Ok(data)
    }

    /// Fetch the rendered DOM snapshot of the current page.
    pub async fn content(&self) -> Result<String> {
        let url = self.endpoint("content");
        let mut req = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StagehandError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_resp: ApiResponse<ContentData> = resp.json().await?;
        if api_resp.data.content.is_empty() {
            return Err(StagehandError::MissingData(
                "page content is empty".to_string(),
            ));
        }
        Ok(api_resp.data.content)
    }

    /// End the session, releasing the remote browser. Safe to call from
    /// any exit path; callers should log rather than propagate a failure
    /// here so it never masks the run's own result.
    pub async fn end(&self) -> Result<()> {
        let endpoint = self.endpoint("end");
        let _: serde_json::Value = self.post_json(&endpoint, &serde_json::json!({})).await?;
        tracing::info!(session_id = %self.session_id, "Stagehand session ended");
        Ok(())
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/sessions/{}/{}", self.base_url, self.session_id, action)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        post_json(&self.client, self.api_key.as_deref(), url, body).await
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(
    client: &reqwest::Client,
    api_key: Option<&str>,
    url: &str,
    body: &B,
) -> Result<T> {
    let mut req = client.post(url).json(body);
    if let Some(key) = api_key {
        req = req.bearer_auth(key);
    }

    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(StagehandError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let api_resp: ApiResponse<T> = resp.json().await?;
    Ok(api_resp.data)
}
