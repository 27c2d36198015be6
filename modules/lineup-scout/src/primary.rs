use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use lineup_common::PerformanceRow;

use crate::page::AgentPage;
use crate::profiles::FestivalProfile;

/// What the page-reading agent returns for each visible performance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedPerformance {
    pub artist: String,
    #[serde(default)]
    pub stage: Option<String>,
    /// HH:MM set time, when the page shows one.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// The full extraction response from the agent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub performances: Vec<ExtractedPerformance>,
}

/// Outcome of the primary strategy. `Insufficient` is not an error: the
/// call succeeded but produced fewer rows than the quality gate demands,
/// which we read as "the agent did not fully explore the page."
pub enum PrimaryOutcome {
    Extracted(Vec<PerformanceRow>),
    Insufficient(Vec<PerformanceRow>),
    Failed(anyhow::Error),
}

/// Run the natural-language extraction against the rendered page and
/// apply the quality gate.
pub async fn run(
    page: &dyn AgentPage,
    profile: &FestivalProfile,
    day: &str,
    min_rows: usize,
) -> PrimaryOutcome {
    let rows = match extract_rows(page, profile, day).await {
        Ok(rows) => rows,
        Err(e) => return PrimaryOutcome::Failed(e),
    };

    info!(count = rows.len(), day, "Primary extraction returned rows");

    if rows.len() < min_rows {
        PrimaryOutcome::Insufficient(rows)
    } else {
        PrimaryOutcome::Extracted(rows)
    }
}

async fn extract_rows(
    page: &dyn AgentPage,
    profile: &FestivalProfile,
    day: &str,
) -> Result<Vec<PerformanceRow>> {
    page.sweep().await?;

    let schema = serde_json::to_value(schemars::schema_for!(ExtractionResponse))
        .context("Failed to build extraction schema")?;
    let instruction = profile.extract_instruction_for(day);

    let raw = page.extract(&instruction, &schema).await?;
    let response: ExtractionResponse =
        serde_json::from_value(raw).context("Extraction response did not match schema")?;

    Ok(normalize_rows(response, day))
}

/// Normalize agent output into rows for the requested day. Rows whose
/// date names a different day are noise from adjacent tabs, not a
/// multi-day artifact, and are dropped.
fn normalize_rows(response: ExtractionResponse, day: &str) -> Vec<PerformanceRow> {
    response
        .performances
        .iter()
        .filter_map(|p| {
            PerformanceRow::normalized(
                &p.artist,
                p.stage.as_deref(),
                p.time.as_deref(),
                p.date.as_deref(),
                day,
            )
        })
        .filter(|row| row.date == day)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf(artist: &str, date: Option<&str>) -> ExtractedPerformance {
        ExtractedPerformance {
            artist: artist.to_string(),
            stage: None,
            time: None,
            date: date.map(String::from),
        }
    }

    #[test]
    fn drops_rows_for_other_days() {
        let response = ExtractionResponse {
            performances: vec![
                perf("Keeps Implied", None),
                perf("Keeps Explicit", Some("2026-07-17")),
                perf("Dropped", Some("2026-07-18")),
            ],
        };
        let rows = normalize_rows(response, "2026-07-17");
        let artists: Vec<_> = rows.iter().map(|r| r.artist.as_str()).collect();
        assert_eq!(artists, vec!["Keeps Implied", "Keeps Explicit"]);
        assert!(rows.iter().all(|r| r.date == "2026-07-17"));
    }

    #[test]
    fn drops_rows_without_artist() {
        let response = ExtractionResponse {
            performances: vec![perf("  ", None), perf("Artist X", None)],
        };
        let rows = normalize_rows(response, "2026-07-17");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].artist, "Artist X");
    }

    #[test]
    fn empty_response_deserializes() {
        let response: ExtractionResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.performances.is_empty());
    }
}
