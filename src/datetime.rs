//! Date/time utilities.

use chrono::{DateTime, Utc};

/// Wall-clock format used in chat message `time` fields.
const MESSAGE_TIME_FORMAT: &str = "%H:%M:%S";

/// Current time in milliseconds since the Unix epoch.
///
/// Participant liveness (`lastStatus`) is stored in this representation.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a datetime as a chat message timestamp (HH:MM:SS, UTC).
pub fn format_message_time(dt: &DateTime<Utc>) -> String {
    dt.format(MESSAGE_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_message_time() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 5).unwrap();
        assert_eq!(format_message_time(&dt), "10:30:05");
    }

    #[test]
    fn test_format_message_time_midnight() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(format_message_time(&dt), "00:00:00");
    }

    #[test]
    fn test_now_millis_is_positive() {
        assert!(now_millis() > 0);
    }
}
