use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use lineup_common::{sort_rows, EventMetadata, PerformanceRow};

use crate::discovery::discover_event_metadata;
use crate::error::{Result, ScoutError};
use crate::feed::{FeedClient, PerformanceEntry, StageDirectory, WeekendWindow};
use crate::page::AgentPage;

static RE_TIME_HHMM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(\d{2}:\d{2}):\d{2}").unwrap());

/// Reconstruct the day's row set from the structured feed discovered in
/// the page's embedded metadata. Any step's failure aborts the whole run;
/// this path is the last resort.
pub async fn run(
    page: &dyn AgentPage,
    feed: &FeedClient,
    day: &str,
) -> Result<(Vec<PerformanceRow>, EventMetadata)> {
    let html = page.content().await?;
    let meta = discover_event_metadata(&html)?;
    info!(
        event_code = %meta.event_code,
        instance_id = %meta.instance_id,
        "Discovered line-up feed metadata"
    );

    // The two preliminary documents are independent; fetch them together.
    let (config, stages) = tokio::try_join!(
        feed.fetch_config(&meta.event_code, &meta.instance_id),
        feed.fetch_stages(&meta.event_code, &meta.instance_id),
    )?;

    let weekend = resolve_weekend(day, &config.config.weekends)?;
    info!(
        weekend = %weekend.name,
        with_timetable = config.config.with_timetable.unwrap_or(false),
        "Resolved weekend from feed configuration"
    );

    let performances = feed
        .fetch_performances(&meta.event_code, &weekend.name, &meta.instance_id)
        .await?;

    let directory = stages.directory();
    let mut rows = rows_from_feed(&performances.performances, &directory, day);
    sort_rows(&mut rows);

    Ok((rows, meta))
}

/// Find the weekend window containing `day`. Window bounds may carry a
/// time component; only the date part participates in the comparison,
/// which is lexicographic and correct for zero-padded ISO dates.
pub fn resolve_weekend<'a>(day: &str, weekends: &'a [WeekendWindow]) -> Result<&'a WeekendWindow> {
    weekends
        .iter()
        .find(|w| {
            let start = date_part(&w.start_date);
            let end = date_part(&w.end_date);
            start <= day && day <= end
        })
        .ok_or_else(|| ScoutError::NoWeekendForDay {
            day: day.to_string(),
        })
}

fn date_part(date_time: &str) -> &str {
    date_time.split(' ').next().unwrap_or(date_time)
}

/// Extract the HH:MM component from a `"YYYY-MM-DD HH:MM:SS"` timestamp.
/// Any other shape yields `None` rather than an error; the feed's
/// timestamp format is not guaranteed.
pub fn extract_time_hhmm(date_time: Option<&str>) -> Option<String> {
    let dt = date_time?;
    RE_TIME_HHMM
        .captures(dt)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Join feed entries into rows for the requested day.
///
/// Artist is the comma-joined embedded performer list when present, else
/// the entry's own title. Stage prefers the inline name, then the
/// directory lookup by id.
pub fn rows_from_feed(
    performances: &[PerformanceEntry],
    directory: &StageDirectory,
    day: &str,
) -> Vec<PerformanceRow> {
    performances
        .iter()
        .filter(|p| p.date == day)
        .filter_map(|p| {
            let artist = match p.artists.as_deref() {
                Some(artists) if !artists.is_empty() => artists
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => p.name.clone(),
            };

            let stage = p.stage.as_ref().and_then(|s| {
                s.name
                    .as_deref()
                    .filter(|n| !n.trim().is_empty())
                    .map(String::from)
                    .or_else(|| {
                        s.id.as_ref()
                            .and_then(|id| directory.get(&id.as_key()).cloned())
                    })
            });

            let time = extract_time_hhmm(p.start_time.as_deref());

            PerformanceRow::normalized(
                &artist,
                stage.as_deref(),
                time.as_deref(),
                Some(&p.date),
                day,
            )
        })
        .collect()
}
