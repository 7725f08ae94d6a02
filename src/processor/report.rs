use crate::charts::RankedTrack;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub user: String,
    pub year: i32,
    pub week: u32,
    pub week_start: NaiveDate,
    pub generated_at: String,
    pub tracks: Vec<RankedTrack>,
}

impl ChartReport {
    pub fn new(
        user: String,
        year: i32,
        week: u32,
        week_start: NaiveDate,
        tracks: Vec<RankedTrack>,
    ) -> Self {
        Self {
            user,
            year,
            week,
            week_start,
            generated_at: chrono::Local::now().to_rfc3339(),
            tracks,
        }
    }

    pub fn file_name(&self) -> String {
        format!("chart_{}_{}_w{:02}.json", self.user, self.year, self.week)
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Weekly charts for {} - week {}/{} (starting {})\n",
            self.user, self.week, self.year, self.week_start
        );

        if self.tracks.is_empty() {
            out.push_str("No plays found in this week.\n");
            return out;
        }

        for (position, track) in self.tracks.iter().enumerate() {
            out.push_str(&format!(
                "{:>3}. [{:>3} pts, {:>3} plays] {} - {} ({})\n",
                position + 1,
                track.points,
                track.plays,
                track.name,
                track.artist,
                track.album
            ));
        }

        out
    }
}
