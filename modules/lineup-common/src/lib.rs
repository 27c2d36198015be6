pub mod config;
pub mod row;
pub mod types;

pub use config::{Config, StagehandEnv};
pub use row::{row_order, sort_rows, PerformanceRow};
pub use types::{EventMetadata, ExtractionResult, ExtractionSource};
