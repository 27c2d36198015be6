use std::env;

use tracing::info;

/// Where the Stagehand browser session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagehandEnv {
    Local,
    Browserbase,
}

impl std::fmt::Display for StagehandEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StagehandEnv::Local => write!(f, "LOCAL"),
            StagehandEnv::Browserbase => write!(f, "BROWSERBASE"),
        }
    }
}

const LOCAL_API_URL: &str = "http://localhost:8930";
const BROWSERBASE_API_URL: &str = "https://api.stagehand.browserbase.com/v1";

/// Default quality-gate threshold: primary extractions with fewer rows
/// are treated as incomplete and trigger the feed fallback.
pub const DEFAULT_MIN_EXTRACT_ROWS: usize = 20;

const DEFAULT_CDN_URL: &str = "https://artist-lineup-cdn.tomorrowland.com";

/// Application configuration loaded from environment variables.
/// Everything has a working default; Browserbase credentials are only
/// required when the hosted environment is selected explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub stagehand_env: StagehandEnv,
    pub stagehand_api_url: String,
    pub browserbase_api_key: Option<String>,
    pub browserbase_project_id: Option<String>,
    pub stagehand_model: Option<String>,
    pub lineup_cdn_url: String,
    pub min_extract_rows: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let browserbase_api_key = optional_env("BROWSERBASE_API_KEY");
        let browserbase_project_id = optional_env("BROWSERBASE_PROJECT_ID");

        let stagehand_env = detect_stagehand_env(
            env::var("STAGEHAND_ENV").ok().as_deref(),
            browserbase_api_key.is_some(),
            browserbase_project_id.is_some(),
        );

        let stagehand_api_url = env::var("STAGEHAND_API_URL").unwrap_or_else(|_| {
            match stagehand_env {
                StagehandEnv::Local => LOCAL_API_URL,
                StagehandEnv::Browserbase => BROWSERBASE_API_URL,
            }
            .to_string()
        });

        let min_extract_rows = env::var("LINEUP_MIN_EXTRACT_ROWS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MIN_EXTRACT_ROWS);

        Self {
            stagehand_env,
            stagehand_api_url,
            browserbase_api_key,
            browserbase_project_id,
            stagehand_model: optional_env("STAGEHAND_MODEL"),
            lineup_cdn_url: env::var("LINEUP_CDN_URL")
                .unwrap_or_else(|_| DEFAULT_CDN_URL.to_string()),
            min_extract_rows,
        }
    }

    /// Log the effective configuration without leaking credentials.
    pub fn log_redacted(&self) {
        info!(
            stagehand_env = %self.stagehand_env,
            stagehand_api_url = %self.stagehand_api_url,
            browserbase_api_key = if self.browserbase_api_key.is_some() { "set" } else { "unset" },
            browserbase_project_id = if self.browserbase_project_id.is_some() { "set" } else { "unset" },
            stagehand_model = self.stagehand_model.as_deref().unwrap_or("default"),
            lineup_cdn_url = %self.lineup_cdn_url,
            min_extract_rows = self.min_extract_rows,
            "Configuration loaded"
        );
    }
}

/// `STAGEHAND_ENV` wins when set to a recognized value; otherwise the
/// presence of both Browserbase credentials selects the hosted environment.
fn detect_stagehand_env(explicit: Option<&str>, has_key: bool, has_project: bool) -> StagehandEnv {
    match explicit {
        Some("BROWSERBASE") => StagehandEnv::Browserbase,
        Some("LOCAL") => StagehandEnv::Local,
        _ if has_key && has_project => StagehandEnv::Browserbase,
        _ => StagehandEnv::Local,
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_env_wins_over_credentials() {
        assert_eq!(
            detect_stagehand_env(Some("LOCAL"), true, true),
            StagehandEnv::Local
        );
        assert_eq!(
            detect_stagehand_env(Some("BROWSERBASE"), false, false),
            StagehandEnv::Browserbase
        );
    }

    #[test]
    fn both_credentials_select_browserbase() {
        assert_eq!(
            detect_stagehand_env(None, true, true),
            StagehandEnv::Browserbase
        );
    }

    #[test]
    fn partial_credentials_stay_local() {
        assert_eq!(detect_stagehand_env(None, true, false), StagehandEnv::Local);
        assert_eq!(detect_stagehand_env(None, false, true), StagehandEnv::Local);
        assert_eq!(detect_stagehand_env(None, false, false), StagehandEnv::Local);
    }

    #[test]
    fn unrecognized_env_falls_through_to_detection() {
        assert_eq!(
            detect_stagehand_env(Some("CLOUD"), true, true),
            StagehandEnv::Browserbase
        );
    }
}
