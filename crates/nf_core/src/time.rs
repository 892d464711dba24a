use chrono::{DateTime, Utc};

/// Human-readable distance between `then` and `now`, coarsest unit wins.
/// Timestamps at or ahead of `now` read as "just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_days() > 0 {
        unit_ago(elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        unit_ago(elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        unit_ago(elapsed.num_minutes(), "minute")
    } else {
        "just now".to_string()
    }
}

fn unit_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
