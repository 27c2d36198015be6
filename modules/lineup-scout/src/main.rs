use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lineup_common::Config;
use lineup_scout::feed::FeedClient;
use lineup_scout::output;
use lineup_scout::profiles::{festival_profile, known_festivals, FestivalProfile};
use lineup_scout::Scout;
use stagehand_client::{SessionOptions, StagehandClient, StagehandSession};

#[derive(Parser)]
#[command(name = "lineup-scout", about = "Festival lineup extraction pipeline")]
struct Cli {
    /// Lineup page to scrape (defaults to the festival profile's URL)
    #[arg(long)]
    url: Option<String>,

    /// Target day, ISO YYYY-MM-DD (defaults to the URL's `day` query
    /// parameter, then the profile's default day)
    #[arg(long)]
    day: Option<String>,

    /// Output basename for <out>.json and <out>.csv
    #[arg(long)]
    out: Option<String>,

    /// Festival profile slug
    #[arg(long, default_value = "tomorrowland")]
    festival: String,

    /// Quality-gate threshold: primary results with fewer rows fall back
    /// to the official feed
    #[arg(long)]
    min_rows: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    config.log_redacted();

    let Some(profile) = festival_profile(&cli.festival) else {
        bail!(
            "Unknown festival: {}. Supported: {}",
            cli.festival,
            known_festivals().join(", ")
        );
    };

    let url = cli.url.clone().unwrap_or_else(|| profile.url.to_string());
    let day = resolve_day(cli.day.as_deref(), &url, profile)?;
    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| format!("{}-lineup-{}", profile.slug, day));
    let min_rows = cli.min_rows.unwrap_or(config.min_extract_rows);

    info!(festival = profile.name, url, day, out, min_rows, "Lineup scout starting");

    let client = StagehandClient::new(
        &config.stagehand_api_url,
        config.browserbase_api_key.as_deref(),
    );
    let session = client
        .start_session(&SessionOptions {
            env: config.stagehand_env.to_string(),
            model_name: config.stagehand_model.clone(),
            browserbase_api_key: config.browserbase_api_key.clone(),
            browserbase_project_id: config.browserbase_project_id.clone(),
        })
        .await
        .context("Failed to start Stagehand session")?;

    let result = run_scrape(&session, &config, profile, &url, &day, &out, min_rows).await;

    // Always release the browser session, on success and failure alike.
    if let Err(e) = session.end().await {
        error!("Failed to end Stagehand session: {e}");
    }

    result
}

async fn run_scrape(
    session: &StagehandSession,
    config: &Config,
    profile: &'static FestivalProfile,
    url: &str,
    day: &str,
    out: &str,
    min_rows: usize,
) -> Result<()> {
    session
        .navigate(url)
        .await
        .context("Failed to navigate to lineup page")?;

    let feed = FeedClient::new(&config.lineup_cdn_url);
    let scout = Scout::new(feed, profile, day, min_rows);
    let result = scout.run(session).await?;

    let written = output::write_outputs(out, &result.rows).await?;

    info!(
        count = written.count,
        source = %result.source,
        day,
        "Scrape complete"
    );
    if let Some(meta) = &result.meta {
        info!(event_code = %meta.event_code, instance_id = %meta.instance_id, "Feed instance used");
    }
    info!(path = %written.json_path.display(), "Wrote JSON artifact");
    info!(path = %written.csv_path.display(), "Wrote CSV artifact");

    Ok(())
}

/// Target day: explicit flag, else the URL's `day` query parameter, else
/// the profile default. Whatever wins must be a real ISO date.
fn resolve_day(flag: Option<&str>, url: &str, profile: &FestivalProfile) -> Result<String> {
    let day = match flag {
        Some(d) => d.to_string(),
        None => day_from_url(url).unwrap_or_else(|| profile.default_day.to_string()),
    };

    // Downstream comparisons are lexicographic against zero-padded ISO
    // feed dates, so the day must round-trip through the canonical form.
    let parsed = chrono::NaiveDate::parse_from_str(&day, "%Y-%m-%d")
        .with_context(|| format!("Invalid day (expected YYYY-MM-DD): {day}"))?;
    if parsed.format("%Y-%m-%d").to_string() != day {
        bail!("Invalid day (expected zero-padded YYYY-MM-DD): {day}");
    }

    Ok(day)
}

fn day_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "day")
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_flag_wins() {
        let profile = festival_profile("tomorrowland").unwrap();
        let day = resolve_day(
            Some("2026-07-18"),
            "https://example.com/?day=2026-07-19",
            profile,
        )
        .unwrap();
        assert_eq!(day, "2026-07-18");
    }

    #[test]
    fn day_falls_back_to_url_query() {
        let profile = festival_profile("tomorrowland").unwrap();
        let day = resolve_day(None, "https://example.com/line-up/?day=2026-07-24", profile).unwrap();
        assert_eq!(day, "2026-07-24");
    }

    #[test]
    fn day_falls_back_to_profile_default() {
        let profile = festival_profile("tomorrowland").unwrap();
        let day = resolve_day(None, "https://example.com/line-up/", profile).unwrap();
        assert_eq!(day, profile.default_day);
    }

    #[test]
    fn invalid_day_is_rejected() {
        let profile = festival_profile("tomorrowland").unwrap();
        assert!(resolve_day(Some("july 17"), "https://example.com/", profile).is_err());
        assert!(resolve_day(Some("2026-07-32"), "https://example.com/", profile).is_err());
    }

    #[test]
    fn non_zero_padded_day_is_rejected() {
        // A non-padded day would pass chrono's parser but never match a
        // zero-padded ISO feed date lexicographically.
        let profile = festival_profile("tomorrowland").unwrap();
        assert!(resolve_day(Some("2026-7-17"), "https://example.com/", profile).is_err());
        assert!(resolve_day(Some("2026-07-1"), "https://example.com/", profile).is_err());
    }
}
