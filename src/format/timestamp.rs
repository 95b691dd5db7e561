/// Format a duration in seconds as a compact timestamp: `M:SS`, or
/// `H:MM:SS` once the duration reaches an hour. Used for inline durations
/// and chapter-index entries.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a duration in seconds as a zero-padded timestamp: `MM:SS` or
/// `HH:MM:SS`. Used for chapter header anchors.
pub fn format_timestamp_padded(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_form() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(65.0), "1:05");
        assert_eq!(format_timestamp(3661.0), "1:01:01");
    }

    #[test]
    fn test_padded_form() {
        assert_eq!(format_timestamp_padded(0.0), "00:00");
        assert_eq!(format_timestamp_padded(65.0), "01:05");
        assert_eq!(format_timestamp_padded(3661.0), "01:01:01");
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        assert_eq!(format_timestamp(59.9), "0:59");
        assert_eq!(format_timestamp_padded(119.4), "01:59");
    }
}
