use tracing::{info, warn};

use lineup_common::{ExtractionResult, ExtractionSource};

use crate::error::Result;
use crate::fallback;
use crate::feed::FeedClient;
use crate::page::AgentPage;
use crate::primary::{self, PrimaryOutcome};
use crate::profiles::FestivalProfile;

/// Strategy orchestrator: primary extraction first, structured-feed
/// fallback on quality or technical failure. Two states, both terminal on
/// success; a fallback failure fails the whole run.
pub struct Scout {
    feed: FeedClient,
    profile: &'static FestivalProfile,
    day: String,
    min_rows: usize,
}

impl Scout {
    pub fn new(
        feed: FeedClient,
        profile: &'static FestivalProfile,
        day: &str,
        min_rows: usize,
    ) -> Self {
        Self {
            feed,
            profile,
            day: day.to_string(),
            min_rows,
        }
    }

    pub async fn run(&self, page: &dyn AgentPage) -> Result<ExtractionResult> {
        match primary::run(page, self.profile, &self.day, self.min_rows).await {
            PrimaryOutcome::Extracted(rows) => {
                info!(count = rows.len(), "Primary extraction accepted");
                return Ok(ExtractionResult {
                    rows,
                    source: ExtractionSource::Primary,
                    meta: None,
                });
            }
            PrimaryOutcome::Insufficient(rows) => {
                warn!(
                    count = rows.len(),
                    min_rows = self.min_rows,
                    "Primary extraction below quality gate, falling back to official feed"
                );
            }
            PrimaryOutcome::Failed(e) => {
                warn!(error = ?e, "Primary extraction failed, falling back to official feed");
            }
        }

        let (rows, meta) = fallback::run(page, &self.feed, &self.day).await?;
        info!(count = rows.len(), "Fallback extraction complete");

        Ok(ExtractionResult {
            rows,
            source: ExtractionSource::Fallback,
            meta: Some(meta),
        })
    }
}
