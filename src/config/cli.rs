use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// last.fm user whose listening history is charted
    pub user: String,

    /// ISO year of the target week
    pub year: i32,

    /// ISO week number within the year (1-53)
    #[arg(value_parser = clap::value_parser!(u32).range(1..=53))]
    pub week: u32,

    /// Number of chart positions to keep
    #[arg(long, default_value_t = 100)]
    pub top: usize,

    /// File containing the last.fm API key
    #[arg(long, env = "LASTFM_API_KEY_FILE", default_value = "lastfm_api_key")]
    pub api_key_file: PathBuf,

    /// Base URL of the last.fm API
    #[arg(
        long,
        env = "LASTFM_API_URL",
        default_value = "https://ws.audioscrobbler.com/2.0/"
    )]
    pub api_url: String,

    /// Directory to write the chart as JSON, in addition to printing it
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}
