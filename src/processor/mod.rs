mod report;

use self::report::ChartReport;
use crate::charts::{self, PlayEvent};
use crate::clients::lastfm::{LastFmClient, RecentTrack, MAX_PAGE_LIMIT};
use crate::config::Config;
use crate::error::Result;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info, warn};

pub struct ChartProcessor {
    config: Config,
    client: LastFmClient,
}

impl ChartProcessor {
    pub fn new(config: Config) -> Result<Self> {
        let client = LastFmClient::new(
            config.http_client.clone(),
            &config.args.api_url,
            &config.api_key,
        )?;

        Ok(Self { config, client })
    }

    pub async fn run(&self) -> Result<()> {
        self.config.ensure_export_dir()?;
        let args = &self.config.args;

        let start = charts::week_start(args.year, args.week);
        let (from, to) = week_window(start);

        info!("Step 1: Fetching plays between {from} and {to}...");
        let page = self
            .client
            .recent_tracks(&args.user, from, to, MAX_PAGE_LIMIT, 1)
            .await?;
        if page.total_pages > 1 {
            warn!(
                "History for this week spans {} pages; only the first {} plays are charted",
                page.total_pages, MAX_PAGE_LIMIT
            );
        }
        if let Some(now_playing) = &page.now_playing {
            debug!(
                "{} is listening to {} by {} right now",
                page.user, now_playing.name, now_playing.artist
            );
        }

        info!("Step 2: Calculating charts from {} plays...", page.tracks.len());
        let events: Vec<PlayEvent> = page.tracks.into_iter().map(play_event).collect();
        let tracks = charts::weekly_charts(args.top, args.year, args.week, &events)?;

        info!("Step 3: Rendering report with {} chart entries...", tracks.len());
        let report = ChartReport::new(page.user, args.year, args.week, start, tracks);
        print!("{}", report.render());

        if let Some(dir) = &args.export_dir {
            let path = dir.join(report.file_name());
            std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
            info!("Chart written to {}", path.display());
        }

        Ok(())
    }
}

/// The fetch window covering one ISO week: Monday midnight through Sunday
/// 23:59:59, both UTC.
fn week_window(start: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = start.and_time(NaiveTime::MIN).and_utc();
    let to = from + Duration::days(7) - Duration::seconds(1);
    (from, to)
}

fn play_event(track: RecentTrack) -> PlayEvent {
    PlayEvent {
        name: track.name,
        artist: track.artist,
        album: track.album,
        played_at: track.played_at,
    }
}
