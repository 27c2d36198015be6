use std::path::PathBuf;

use lineup_common::{sort_rows, PerformanceRow};

use crate::error::{Result, ScoutError};

/// Paths and row count of a completed write.
#[derive(Debug)]
pub struct WrittenOutput {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub count: usize,
}

/// Write the row set as `<out>.json` and `<out>.csv`, overwriting any
/// existing files. Rows are re-sorted here with the shared comparator so
/// the artifacts are deterministic regardless of which strategy produced
/// them; the sort is stable, so already-sorted input is unchanged.
pub async fn write_outputs(out: &str, rows: &[PerformanceRow]) -> Result<WrittenOutput> {
    let mut sorted = rows.to_vec();
    sort_rows(&mut sorted);

    let json_path = PathBuf::from(format!("{out}.json"));
    let csv_path = PathBuf::from(format!("{out}.csv"));

    let json = serde_json::to_string_pretty(&sorted)
        .expect("PerformanceRow serialization should never fail");
    write_file(&json_path, &format!("{json}\n")).await?;

    write_file(&csv_path, &render_csv(&sorted)).await?;

    Ok(WrittenOutput {
        json_path,
        csv_path,
        count: sorted.len(),
    })
}

async fn write_file(path: &PathBuf, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ScoutError::OutputWrite {
            path: path.display().to_string(),
            source,
        })
}

fn render_csv(rows: &[PerformanceRow]) -> String {
    let mut lines = vec!["artist,stage,time,date".to_string()];
    for row in rows {
        lines.push(
            [
                csv_escape(Some(&row.artist)),
                csv_escape(row.stage.as_deref()),
                csv_escape(row.time.as_deref()),
                csv_escape(Some(&row.date)),
            ]
            .join(","),
        );
    }
    format!("{}\n", lines.join("\n"))
}

/// Quote a field when it contains a comma, newline, or double quote,
/// doubling interior quotes. Absent fields render as empty string.
fn csv_escape(value: Option<&str>) -> String {
    let Some(s) = value else {
        return String::new();
    };
    if s.contains(',') || s.contains('\n') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
