//! Raw commit records and log line parsing.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::error::RecordError;

/// Field delimiter between timestamp, subject and short id.
pub const DELIMITER: &str = "|**|";

/// When a commit was made, as reported by the log source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Seconds since the Unix epoch (`%at`).
    Epoch(i64),
    /// Pre-formatted calendar date (`%as`).
    Date(NaiveDate),
}

impl Timestamp {
    /// Sort key used to order records newest-first.
    ///
    /// In newest-first output, date-only records land after every epoch
    /// record of the same day.
    pub fn sort_key<Tz: TimeZone>(&self, tz: &Tz) -> (Option<NaiveDate>, i64) {
        match self {
            Self::Epoch(secs) => {
                let date = tz.timestamp_opt(*secs, 0).single().map(|dt| dt.date_naive());
                (date, *secs)
            }
            Self::Date(date) => (Some(*date), i64::MIN),
        }
    }
}

impl std::str::FromStr for Timestamp {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<i64>()
                .map(Self::Epoch)
                .map_err(|_| RecordError::InvalidTimestamp(s.to_string()));
        }

        // chrono accepts unpadded fields such as `2023-1-5`; `%as` never emits them.
        if s.len() != 10 {
            return Err(RecordError::InvalidTimestamp(s.to_string()));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::Date)
            .map_err(|_| RecordError::InvalidTimestamp(s.to_string()))
    }
}

/// One line of the commit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub timestamp: Timestamp,
    pub subject: String,
    pub short_id: String,
}

/// Parse a single `<timestamp>|**|<subject>|**|<short id>` line.
pub fn parse_line(line: &str) -> Result<CommitRecord, RecordError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    let [timestamp, subject, short_id] = fields.as_slice() else {
        return Err(RecordError::FieldCount { found: fields.len() });
    };

    for (name, value) in [("timestamp", timestamp), ("subject", subject), ("short id", short_id)] {
        if value.is_empty() {
            return Err(RecordError::EmptyField(name));
        }
    }

    Ok(CommitRecord {
        timestamp: timestamp.parse()?,
        subject: subject.to_string(),
        short_id: short_id.to_string(),
    })
}

/// Parse every well-formed line of a log, in order.
///
/// Malformed lines (blank trailing lines included) are skipped.
pub fn parse_log(text: &str) -> Vec<CommitRecord> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| match parse_line(line) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping log line {}: {}", i + 1, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_parse_epoch_line() {
        let record = parse_line("1700000000|**|feat: add login|**|abc123").unwrap();
        assert_eq!(record.timestamp, Timestamp::Epoch(1_700_000_000));
        assert_eq!(record.subject, "feat: add login");
        assert_eq!(record.short_id, "abc123");
    }

    #[test]
    fn test_parse_date_line() {
        let record = parse_line("2023-11-14|**|fix: typo|**|def456").unwrap();
        assert_eq!(
            record.timestamp,
            Timestamp::Date(NaiveDate::from_ymd_opt(2023, 11, 14).unwrap())
        );
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let record = parse_line("1700000000|**|feat: x|**|abc123\r").unwrap();
        assert_eq!(record.short_id, "abc123");
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert_eq!(parse_line(""), Err(RecordError::FieldCount { found: 1 }));
        assert_eq!(
            parse_line("1700000000|**|feat: x"),
            Err(RecordError::FieldCount { found: 2 })
        );
        assert_eq!(
            parse_line("1700000000|**|feat: a |**| b|**|abc123"),
            Err(RecordError::FieldCount { found: 4 })
        );
    }

    #[test]
    fn test_parse_empty_field() {
        assert_eq!(
            parse_line("1700000000|**||**|abc123"),
            Err(RecordError::EmptyField("subject"))
        );
        assert_eq!(
            parse_line("1700000000|**|feat: x|**|"),
            Err(RecordError::EmptyField("short id"))
        );
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        assert_eq!(
            parse_line("yesterday|**|feat: x|**|abc123"),
            Err(RecordError::InvalidTimestamp("yesterday".to_string()))
        );
        assert!(parse_line("2023-13-40|**|feat: x|**|abc123").is_err());
    }

    #[test]
    fn test_parse_log_skips_malformed_lines() {
        let text = "1700000000|**|feat: a|**|aaa\n\nnot a record\n1699913600|**|fix: b|**|bbb\n";
        let records = parse_log(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].short_id, "aaa");
        assert_eq!(records[1].short_id, "bbb");
    }

    #[test]
    fn test_parse_rejects_unpadded_date() {
        assert_eq!(
            parse_line("2023-1-5|**|fix: x|**|abc123"),
            Err(RecordError::InvalidTimestamp("2023-1-5".to_string()))
        );
        assert_eq!(
            parse_line("2023-01-5|**|fix: x|**|abc123"),
            Err(RecordError::InvalidTimestamp("2023-01-5".to_string()))
        );
    }

    #[test]
    fn test_sort_key_puts_dates_after_epochs_on_same_day() {
        let epoch = Timestamp::Epoch(1_700_000_000).sort_key(&Utc);
        let dated = Timestamp::Date(NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()).sort_key(&Utc);
        // Sorted descending, the larger key comes first.
        assert!(epoch > dated);
    }

    #[test]
    fn test_sort_key_orders_epochs() {
        let newer = Timestamp::Epoch(1_700_000_000).sort_key(&Utc);
        let older = Timestamp::Epoch(1_699_913_600).sort_key(&Utc);
        assert!(newer > older);
    }
}
