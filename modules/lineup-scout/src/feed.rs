use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Result, ScoutError};

// --- Feed document shapes ---
//
// The three CDN documents cross this boundary as typed structs or not at
// all: a body that does not deserialize is rejected as `FeedSchema`.

/// Weekend-configuration document: `config-<event>-<instance>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDocument {
    pub config: ConfigBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigBody {
    pub weekends: Vec<WeekendWindow>,
    #[serde(rename = "withTimetable", default)]
    pub with_timetable: Option<bool>,
}

/// A named contiguous date range within a multi-weekend event.
/// Invariant upstream: `start_date <= end_date` as ISO dates.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekendWindow {
    pub name: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

/// Stage-directory document: `stages-<event>-<instance>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StagesDocument {
    pub stages: Vec<StageEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageEntry {
    #[serde(default)]
    pub id: Option<StageId>,
    pub name: String,
}

/// Stage ids arrive as JSON strings or numbers depending on feed vintage.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StageId {
    Str(String),
    Num(i64),
}

impl StageId {
    /// Canonical string form, used as the directory key.
    pub fn as_key(&self) -> String {
        match self {
            StageId::Str(s) => s.clone(),
            StageId::Num(n) => n.to_string(),
        }
    }
}

impl StagesDocument {
    /// Build the stage id → display name directory. Entries without an id
    /// cannot be referenced by performances and are skipped.
    pub fn directory(&self) -> StageDirectory {
        self.stages
            .iter()
            .filter_map(|s| s.id.as_ref().map(|id| (id.as_key(), s.name.clone())))
            .collect()
    }
}

/// Mapping from stage identifier to stage display name.
pub type StageDirectory = HashMap<String, String>;

/// Performance-feed document: `<event>-<weekend>-<instance>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformancesDocument {
    pub performances: Vec<PerformanceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceEntry {
    pub name: String,
    #[serde(default)]
    pub artists: Option<Vec<PerformerRef>>,
    #[serde(default)]
    pub stage: Option<StageRef>,
    pub date: String,
    #[serde(rename = "startTime", default)]
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformerRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageRef {
    #[serde(default)]
    pub id: Option<StageId>,
    #[serde(default)]
    pub name: Option<String>,
}

// --- Client ---

/// Client for the artist-lineup CDN. One GET per document, no retries:
/// the feed is the last resort, so a failed fetch aborts the whole
/// fallback attempt rather than degrading further.
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the weekend-configuration document for an event instance.
    pub async fn fetch_config(&self, event_code: &str, instance_id: &str) -> Result<ConfigDocument> {
        let url = format!("{}/config-{event_code}-{instance_id}.json", self.base_url);
        self.get_json(&url).await
    }

    /// Fetch the stage-directory document for an event instance.
    pub async fn fetch_stages(&self, event_code: &str, instance_id: &str) -> Result<StagesDocument> {
        let url = format!("{}/stages-{event_code}-{instance_id}.json", self.base_url);
        self.get_json(&url).await
    }

    /// Fetch the performance feed scoped to a resolved weekend.
    pub async fn fetch_performances(
        &self,
        event_code: &str,
        weekend: &str,
        instance_id: &str,
    ) -> Result<PerformancesDocument> {
        let url = format!("{}/{event_code}-{weekend}-{instance_id}.json", self.base_url);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "Fetching feed document");
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScoutError::FeedFetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|source| ScoutError::FeedSchema {
            url: url.to_string(),
            source,
        })
    }
}
