//! Display strings for distances and elapsed time.

use chrono::{DateTime, Datelike, Timelike, Utc};

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2_520;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Distance rounded to two decimals, e.g. `"12.34 km"`.
#[must_use]
pub fn format_distance(km: f64) -> String {
    format!("{km:.2} km")
}

/// Elapsed time between `observed` and `now` in words, e.g.
/// `"about 3 hours ago"`, or `"in 5 minutes"` for future observations.
#[must_use]
pub fn time_ago(observed: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if observed > now {
        format!("in {}", distance_in_words(now, observed))
    } else {
        format!("{} ago", distance_in_words(observed, now))
    }
}

fn distance_in_words(earlier: DateTime<Utc>, later: DateTime<Utc>) -> String {
    let seconds = (later - earlier).num_seconds();
    let minutes = rounded_div(seconds, 60);

    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        m if m < 45 => format!("{m} minutes"),
        m if m < 90 => "about 1 hour".to_string(),
        m if m < MINUTES_IN_DAY => format!("about {}", plural(rounded_div(m, 60), "hour")),
        m if m < MINUTES_IN_ALMOST_TWO_DAYS => "1 day".to_string(),
        m if m < MINUTES_IN_MONTH => plural(rounded_div(m, MINUTES_IN_DAY), "day"),
        m if m < MINUTES_IN_TWO_MONTHS => {
            format!("about {}", plural(rounded_div(m, MINUTES_IN_MONTH), "month"))
        }
        m => {
            let months = calendar_months_between(earlier, later);
            if months < 12 {
                return plural(rounded_div(m, MINUTES_IN_MONTH), "month");
            }
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", plural(years, "year")),
                3..=8 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    }
}

/// Whole calendar months from `earlier` to `later`, not counting a final
/// partial month.
fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month()) - i64::from(earlier.month());
    let later_in_month = (later.day(), later.num_seconds_from_midnight());
    let earlier_in_month = (earlier.day(), earlier.num_seconds_from_midnight());
    if later_in_month < earlier_in_month {
        months -= 1;
    }
    months.max(0)
}

/// `value / divisor` rounded half up, for non-negative values.
fn rounded_div(value: i64, divisor: i64) -> i64 {
    (value + divisor / 2) / divisor
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 20, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        time_ago(now() - d, now())
    }

    #[test]
    fn format_distance_rounds_to_two_places() {
        assert_eq!(format_distance(2.0), "2.00 km");
        assert_eq!(format_distance(14.999), "15.00 km");
        assert_eq!(format_distance(0.123_4), "0.12 km");
    }

    #[test]
    fn under_a_minute() {
        assert_eq!(ago(Duration::seconds(0)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(29)), "less than a minute ago");
    }

    #[test]
    fn minutes() {
        assert_eq!(ago(Duration::seconds(30)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(2)), "2 minutes ago");
        assert_eq!(ago(Duration::minutes(44)), "44 minutes ago");
    }

    #[test]
    fn hours() {
        assert_eq!(ago(Duration::minutes(45)), "about 1 hour ago");
        assert_eq!(ago(Duration::minutes(89)), "about 1 hour ago");
        assert_eq!(ago(Duration::minutes(90)), "about 2 hours ago");
        assert_eq!(ago(Duration::hours(23)), "about 23 hours ago");
    }

    #[test]
    fn days() {
        assert_eq!(ago(Duration::hours(24)), "1 day ago");
        assert_eq!(ago(Duration::hours(41)), "1 day ago");
        assert_eq!(ago(Duration::hours(42)), "2 days ago");
        assert_eq!(ago(Duration::days(29)), "29 days ago");
    }

    #[test]
    fn months() {
        assert_eq!(ago(Duration::days(30)), "about 1 month ago");
        assert_eq!(ago(Duration::days(59)), "about 2 months ago");
        assert_eq!(ago(Duration::days(95)), "3 months ago");
    }

    #[test]
    fn years() {
        let observed = Utc.with_ymd_and_hms(2020, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(time_ago(observed, now()), "about 1 year ago");

        let observed = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(time_ago(observed, now()), "over 1 year ago");

        let observed = Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(time_ago(observed, now()), "almost 2 years ago");
    }

    #[test]
    fn future_observations_use_prefix() {
        assert_eq!(time_ago(now() + Duration::minutes(5), now()), "in 5 minutes");
    }

    #[test]
    fn calendar_months_ignores_partial_final_month() {
        let earlier = Utc.with_ymd_and_hms(2021, 1, 25, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2021, 3, 24, 0, 0, 0).unwrap();
        assert_eq!(calendar_months_between(earlier, later), 1);
    }
}
