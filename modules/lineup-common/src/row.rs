use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One artist performing once on one stage on one day.
///
/// Immutable after creation — normalization happens once, in
/// [`PerformanceRow::normalized`], and no later stage touches the fields.
/// Serde field order is the stable JSON key order for output artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub artist: String,
    pub stage: Option<String>,
    pub time: Option<String>,
    pub date: String,
}

impl PerformanceRow {
    /// Canonicalize raw field values into a row, or reject it.
    ///
    /// Artist is trimmed; an empty artist rejects the row since it carries
    /// no identifying information. Stage and time are trimmed, with absent
    /// or empty values becoming `None`. Date defaults to `day` when absent.
    pub fn normalized(
        artist: &str,
        stage: Option<&str>,
        time: Option<&str>,
        date: Option<&str>,
        day: &str,
    ) -> Option<Self> {
        let artist = artist.trim();
        if artist.is_empty() {
            return None;
        }

        let date = match date.map(str::trim) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => day.to_string(),
        };

        Some(Self {
            artist: artist.to_string(),
            stage: non_empty(stage),
            time: non_empty(time),
            date,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Canonical output ordering: `time` ascending with `None` sorting before
/// any scheduled time (unscheduled performances list first), ties broken
/// by `artist` in code-point order.
pub fn row_order(a: &PerformanceRow, b: &PerformanceRow) -> Ordering {
    let t1 = a.time.as_deref().unwrap_or("");
    let t2 = b.time.as_deref().unwrap_or("");
    t1.cmp(t2).then_with(|| a.artist.cmp(&b.artist))
}

/// Sort rows into the canonical output order. Stable, so re-sorting an
/// already-sorted set yields the same sequence.
pub fn sort_rows(rows: &mut [PerformanceRow]) {
    rows.sort_by(row_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(artist: &str, time: Option<&str>) -> PerformanceRow {
        PerformanceRow {
            artist: artist.to_string(),
            stage: None,
            time: time.map(String::from),
            date: "2026-07-17".to_string(),
        }
    }

    #[test]
    fn normalized_trims_and_defaults() {
        let row = PerformanceRow::normalized(
            "  Artist X  ",
            Some(" Main Stage "),
            Some("22:30"),
            None,
            "2026-07-17",
        )
        .unwrap();
        assert_eq!(row.artist, "Artist X");
        assert_eq!(row.stage.as_deref(), Some("Main Stage"));
        assert_eq!(row.time.as_deref(), Some("22:30"));
        assert_eq!(row.date, "2026-07-17");
    }

    #[test]
    fn normalized_rejects_empty_artist() {
        assert!(PerformanceRow::normalized("   ", None, None, None, "2026-07-17").is_none());
        assert!(PerformanceRow::normalized("", None, None, None, "2026-07-17").is_none());
    }

    #[test]
    fn normalized_empty_stage_and_time_become_none() {
        let row =
            PerformanceRow::normalized("Artist X", Some("  "), Some(""), None, "2026-07-17")
                .unwrap();
        assert!(row.stage.is_none());
        assert!(row.time.is_none());
    }

    #[test]
    fn normalized_empty_date_defaults_to_day() {
        let row =
            PerformanceRow::normalized("Artist X", None, None, Some(" "), "2026-07-18").unwrap();
        assert_eq!(row.date, "2026-07-18");
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = PerformanceRow::normalized(
            " Artist X ",
            Some("Main Stage"),
            Some(" 22:30"),
            Some("2026-07-17"),
            "2026-07-17",
        )
        .unwrap();
        let second = PerformanceRow::normalized(
            &first.artist,
            first.stage.as_deref(),
            first.time.as_deref(),
            Some(&first.date),
            "2026-07-17",
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unscheduled_rows_sort_first() {
        let mut rows = vec![
            row("B", Some("12:00")),
            row("A", None),
            row("C", Some("11:00")),
        ];
        sort_rows(&mut rows);
        let artists: Vec<_> = rows.iter().map(|r| r.artist.as_str()).collect();
        assert_eq!(artists, vec!["A", "C", "B"]);
    }

    #[test]
    fn ties_break_on_artist_code_point_order() {
        let mut rows = vec![
            row("b", Some("12:00")),
            row("B", Some("12:00")),
            row("A", Some("12:00")),
        ];
        sort_rows(&mut rows);
        let artists: Vec<_> = rows.iter().map(|r| r.artist.as_str()).collect();
        // Case-sensitive: uppercase sorts before lowercase.
        assert_eq!(artists, vec!["A", "B", "b"]);
    }

    #[test]
    fn double_sort_is_deterministic() {
        let mut rows = vec![
            row("C", Some("20:00")),
            row("A", None),
            row("B", Some("20:00")),
            row("D", Some("18:15")),
        ];
        sort_rows(&mut rows);
        let once = rows.clone();
        sort_rows(&mut rows);
        assert_eq!(rows, once);
    }

    #[test]
    fn json_key_order_is_stable() {
        let row = PerformanceRow {
            artist: "Artist X".to_string(),
            stage: Some("Main Stage".to_string()),
            time: Some("22:30".to_string()),
            date: "2026-07-17".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"artist":"Artist X","stage":"Main Stage","time":"22:30","date":"2026-07-17"}"#
        );
    }
}
