use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<date>[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{2}-[0-9]{2})").expect("date pattern")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2}(?:[.,][0-9]{3,6})?)").expect("time pattern")
});

/// Date and time tokens exactly as they appeared in the line.
///
/// Kept textual: only display and order-of-appearance matter downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub date: String,
    pub time: String,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

/// Find the first date-shaped and the first time-shaped token anywhere in `line`.
///
/// The two searches are independent: producers put thread/process ids of
/// varying width between the stamp and the tag, so nothing here is anchored.
pub fn scan(line: &str) -> Option<Timestamp> {
    let date = DATE_RE.captures(line)?.name("date")?.as_str();
    let time = TIME_RE.captures(line)?.name("time")?.as_str();
    Some(Timestamp {
        date: date.to_string(),
        time: time.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_full_date_and_fractional_time() {
        let ts = scan("2025-12-27 10:11:12.345  1234  5678 I SpeedTestSKT: x").unwrap();
        assert_eq!(ts.date, "2025-12-27");
        assert_eq!(ts.time, "10:11:12.345");
    }

    #[test]
    fn accepts_short_date_and_comma_fraction() {
        let ts = scan("12-27 10:11:12,123456 pid=99 tag").unwrap();
        assert_eq!(ts.date, "12-27");
        assert_eq!(ts.time, "10:11:12,123456");
    }

    #[test]
    fn tokens_need_not_be_adjacent() {
        let ts = scan("[10:00:01] worker-3 on 2024-01-02 says hi").unwrap();
        assert_eq!(ts.to_string(), "2024-01-02 10:00:01");
    }

    #[test]
    fn missing_either_part_is_none() {
        assert!(scan("10:11:12 SpeedTestSKT: TestData").is_none());
        assert!(scan("2025-12-27 SpeedTestSKT: TestData").is_none());
        assert!(scan("").is_none());
    }

    #[test]
    fn short_fraction_is_not_captured() {
        let ts = scan("01-02 03:04:05.12").unwrap();
        assert_eq!(ts.time, "03:04:05");
    }
}
