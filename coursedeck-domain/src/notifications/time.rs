//! Relative-time derivation for notification timestamps.

use chrono::{DateTime, Utc};

/// Buckets the elapsed time between `timestamp` and `now` into a
/// human-relative age string.
///
/// Pure function of its two arguments; callers re-derive on every render
/// because "now" advances. Timestamps in the future clamp to
/// "moments ago".
pub fn relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp).num_seconds();

    if elapsed < 60 {
        "moments ago".to_string()
    } else if elapsed < 3_600 {
        format!("{} minutes ago", elapsed / 60)
    } else if elapsed < 86_400 {
        format!("{} hours ago", elapsed / 3_600)
    } else if elapsed < 604_800 {
        format!("{} days ago", elapsed / 86_400)
    } else {
        format!("{} weeks ago", elapsed / 604_800)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn under_a_minute_is_moments_ago() {
        assert_eq!(relative_age(now() - Duration::seconds(30), now()), "moments ago");
        assert_eq!(relative_age(now() - Duration::seconds(59), now()), "moments ago");
    }

    #[test]
    fn minutes_bucket() {
        assert_eq!(
            relative_age(now() - Duration::seconds(300), now()),
            "5 minutes ago"
        );
        assert_eq!(
            relative_age(now() - Duration::seconds(3_599), now()),
            "59 minutes ago"
        );
    }

    #[test]
    fn hours_bucket() {
        assert_eq!(
            relative_age(now() - Duration::seconds(7_200), now()),
            "2 hours ago"
        );
    }

    #[test]
    fn days_bucket() {
        assert_eq!(
            relative_age(now() - Duration::seconds(172_800), now()),
            "2 days ago"
        );
    }

    #[test]
    fn weeks_bucket() {
        assert_eq!(
            relative_age(now() - Duration::seconds(1_209_600), now()),
            "2 weeks ago"
        );
    }

    #[test]
    fn future_timestamp_clamps_to_moments_ago() {
        assert_eq!(relative_age(now() + Duration::hours(1), now()), "moments ago");
    }
}
