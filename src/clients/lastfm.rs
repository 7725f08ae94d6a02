use crate::error::{ChartError, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;

/// Upper bound the API enforces on the per-page track limit.
pub const MAX_PAGE_LIMIT: u32 = 200;

#[derive(Debug)]
pub struct LastFmClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

/// One page of a user's play history, decoded into clean domain values.
#[derive(Debug)]
pub struct RecentTracks {
    pub user: String,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: u32,
    pub now_playing: Option<NowPlaying>,
    pub tracks: Vec<RecentTrack>,
}

/// The track the user is listening to right now, if any. It carries no
/// timestamp and never counts as a play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub name: String,
    pub artist: String,
    pub album: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RecentTracksEnvelope {
    recenttracks: RawRecentTracks,
}

#[derive(Debug, Deserialize)]
struct RawRecentTracks {
    #[serde(default)]
    track: Vec<RawTrack>,
    #[serde(rename = "@attr")]
    attr: RawPageAttr,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    name: String,
    artist: RawTextField,
    album: RawTextField,
    #[serde(rename = "@attr")]
    attr: Option<RawTrackAttr>,
    date: Option<RawDate>,
}

#[derive(Debug, Deserialize)]
struct RawTextField {
    #[serde(rename = "#text")]
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawTrackAttr {
    nowplaying: String,
}

#[derive(Debug, Deserialize)]
struct RawDate {
    uts: String,
}

// The API serializes every number in @attr as a string.
#[derive(Debug, Deserialize)]
struct RawPageAttr {
    user: String,
    page: String,
    #[serde(rename = "perPage")]
    per_page: String,
    #[serde(rename = "totalPages")]
    total_pages: String,
    total: String,
}

impl LastFmClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ChartError::Parse(format!("invalid API base URL: {e}")))?;

        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ChartError::Validation(
                "API key cannot be empty or whitespace only".to_string(),
            ));
        }

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Fetches one page of the tracks played by `user` between `from` and
    /// `to` (inclusive), at most `limit` tracks per page.
    pub async fn recent_tracks(
        &self,
        user: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        limit: u32,
        page: u32,
    ) -> Result<RecentTracks> {
        let user = user.trim();
        if user.is_empty() {
            return Err(ChartError::Validation(
                "user cannot be empty or whitespace only".to_string(),
            ));
        }
        if from > to {
            return Err(ChartError::Validation(
                "from timestamp cannot be after to timestamp".to_string(),
            ));
        }
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(ChartError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }
        if page == 0 {
            return Err(ChartError::Validation(
                "page must be greater than 0".to_string(),
            ));
        }

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("method", "user.getRecentTracks")
            .append_pair("api_key", &self.api_key)
            .append_pair("user", user)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string())
            .append_pair("from", &from.timestamp().to_string())
            .append_pair("to", &to.timestamp().to_string());

        let envelope: RecentTracksEnvelope = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        decode_recent_tracks(envelope.recenttracks)
    }
}

fn decode_recent_tracks(raw: RawRecentTracks) -> Result<RecentTracks> {
    let mut now_playing = None;
    let mut tracks = Vec::with_capacity(raw.track.len());

    for track in raw.track {
        let is_now_playing = match &track.attr {
            Some(attr) => attr.nowplaying.parse::<bool>().map_err(|_| {
                ChartError::Parse(format!(
                    "invalid nowplaying flag: {:?}",
                    attr.nowplaying
                ))
            })?,
            None => false,
        };

        if is_now_playing {
            if now_playing.is_some() {
                return Err(ChartError::Parse(
                    "found multiple now playing tracks".to_string(),
                ));
            }
            now_playing = Some(NowPlaying {
                name: track.name,
                artist: track.artist.text,
                album: track.album.text,
            });
            continue;
        }

        let date = track
            .date
            .ok_or_else(|| ChartError::Parse(format!("track {:?} has no play date", track.name)))?;
        let uts: i64 = date
            .uts
            .parse()
            .map_err(|_| ChartError::Parse(format!("invalid uts timestamp: {:?}", date.uts)))?;
        let played_at = DateTime::from_timestamp(uts, 0)
            .ok_or_else(|| ChartError::Parse(format!("uts timestamp out of range: {uts}")))?;

        tracks.push(RecentTrack {
            name: track.name,
            artist: track.artist.text,
            album: track.album.text,
            played_at,
        });
    }

    Ok(RecentTracks {
        user: raw.attr.user,
        page: parse_page_attr("page", &raw.attr.page)?,
        per_page: parse_page_attr("perPage", &raw.attr.per_page)?,
        total_pages: parse_page_attr("totalPages", &raw.attr.total_pages)?,
        total: parse_page_attr("total", &raw.attr.total)?,
        now_playing,
        tracks,
    })
}

fn parse_page_attr(field: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .map_err(|_| ChartError::Parse(format!("invalid {field} value: {value:?}")))
}
