use chrono::{Datelike, Duration, NaiveDate};

/// Calculates the Monday starting the given ISO week of the given ISO year.
///
/// Starts from July 1, which always falls inside the ISO week range of its
/// year, rolls back to that week's Monday and shifts by whole weeks. The
/// result may lie in the adjacent calendar year (ISO week 1 can start in
/// December).
///
/// Adapted from https://stackoverflow.com/a/52303730
pub fn week_start(year: i32, week: u32) -> NaiveDate {
    let reference = NaiveDate::from_ymd_opt(year, 7, 1)
        .expect("July 1 is representable for every supported year");

    // Roll back to Monday:
    let monday = reference - Duration::days(reference.weekday().num_days_from_monday() as i64);

    // Difference in weeks:
    let reference_week = monday.iso_week().week();
    monday + Duration::days((week as i64 - reference_week as i64) * 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_year_week() {
        assert_eq!(
            week_start(2018, 27),
            NaiveDate::from_ymd_opt(2018, 7, 2).unwrap()
        );
    }

    #[test]
    fn last_week_of_year() {
        assert_eq!(
            week_start(2022, 52),
            NaiveDate::from_ymd_opt(2022, 12, 26).unwrap()
        );
    }

    #[test]
    fn first_week_starting_in_the_same_year() {
        assert_eq!(
            week_start(2023, 1),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
        );
    }

    #[test]
    fn first_week_starting_in_the_previous_year() {
        assert_eq!(
            week_start(2025, 1),
            NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()
        );
    }

    #[test]
    fn week_53_of_a_long_iso_year() {
        assert_eq!(
            week_start(2020, 53),
            NaiveDate::from_ymd_opt(2020, 12, 28).unwrap()
        );
    }

    #[test]
    fn results_are_always_mondays() {
        for year in [2018, 2020, 2023, 2024, 2025] {
            for week in [1, 26, 52] {
                assert_eq!(
                    week_start(year, week).weekday(),
                    chrono::Weekday::Mon,
                    "week {week} of {year}"
                );
            }
        }
    }
}
