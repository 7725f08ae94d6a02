use crate::error::{ChartError, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

pub(crate) mod week;

pub use week::week_start;

/// One observed play of a track, as delivered by the history source.
#[derive(Debug, Clone)]
pub struct PlayEvent {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub played_at: DateTime<Utc>,
}

/// Composite identity used to count plays. Exact-match, case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId {
    pub name: String,
    pub artist: String,
    pub album: String,
}

impl PlayEvent {
    fn track_id(&self) -> TrackId {
        TrackId {
            name: self.name.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTrack {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub plays: u32,
    pub points: u32,
}

/// Counts plays per track identity, keeping only events whose timestamp
/// falls into the given ISO week. Events outside the week are skipped.
pub fn aggregate(year: i32, week: u32, events: &[PlayEvent]) -> HashMap<TrackId, u32> {
    let mut plays: HashMap<TrackId, u32> = HashMap::new();

    for event in events {
        let iso = event.played_at.iso_week();
        if iso.year() != year || iso.week() != week {
            continue;
        }
        *plays.entry(event.track_id()).or_insert(0) += 1;
    }

    plays
}

/// Orders aggregated tracks by play count descending, keeps the first
/// `min(top, len)` of them and assigns competition-style points: the set
/// size for the highest play count, one point less each time the play
/// count strictly drops. Tracks tied on plays share the same points, and a
/// tier drop costs exactly one point no matter how wide the tier above was.
///
/// Tie order among equal play counts is arbitrary.
pub fn rank(top: usize, plays: HashMap<TrackId, u32>) -> Result<Vec<RankedTrack>> {
    if top == 0 {
        return Err(ChartError::Validation(
            "top must be a positive number of chart positions".to_string(),
        ));
    }

    if plays.is_empty() {
        return Ok(Vec::new());
    }

    let mut tracks: Vec<(TrackId, u32)> = plays.into_iter().collect();
    tracks.sort_by(|a, b| b.1.cmp(&a.1));
    tracks.truncate(top);

    let mut current_points = tracks.len() as u32;
    let mut previous_plays = tracks[0].1;

    let ranked = tracks
        .into_iter()
        .map(|(id, plays)| {
            if plays < previous_plays {
                current_points -= 1;
            }
            previous_plays = plays;
            RankedTrack {
                name: id.name,
                artist: id.artist,
                album: id.album,
                plays,
                points: current_points,
            }
        })
        .collect();

    Ok(ranked)
}

/// Full weekly chart for one ISO week: aggregate, then rank.
pub fn weekly_charts(
    top: usize,
    year: i32,
    week: u32,
    events: &[PlayEvent],
) -> Result<Vec<RankedTrack>> {
    rank(top, aggregate(year, week, events))
}
