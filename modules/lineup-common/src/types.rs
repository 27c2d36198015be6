use serde::{Deserialize, Serialize};

use crate::row::PerformanceRow;

/// Identifiers for the backend feed instance serving a line-up page.
/// Discovered once per run from the rendered page; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_code: String,
    pub instance_id: String,
}

/// Which strategy produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Primary,
    Fallback,
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionSource::Primary => write!(f, "primary"),
            ExtractionSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// The orchestrator's output: the final row set with provenance.
/// `meta` is populated only when the fallback path ran.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub rows: Vec<PerformanceRow>,
    pub source: ExtractionSource,
    pub meta: Option<EventMetadata>,
}
