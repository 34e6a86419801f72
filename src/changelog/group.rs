//! Grouping classified commits by calendar date and commit type.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::RecordError;
use crate::git::{CommitRecord, Timestamp};

use super::classify::{classify, CommitType};

/// Calendar date of a timestamp in the given time zone.
///
/// Date-only timestamps are returned unchanged. Returns `None` for epoch
/// values chrono cannot represent.
pub fn calendar_date<Tz: TimeZone>(timestamp: &Timestamp, tz: &Tz) -> Option<NaiveDate> {
    match timestamp {
        Timestamp::Epoch(secs) => tz.timestamp_opt(*secs, 0).single().map(|dt| dt.date_naive()),
        Timestamp::Date(date) => Some(*date),
    }
}

/// `YYYY-MM-DD HH:MM:SS` for epoch timestamps; `None` for date-only ones.
pub fn display_datetime<Tz>(timestamp: &Timestamp, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match timestamp {
        Timestamp::Epoch(secs) => tz
            .timestamp_opt(*secs, 0)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        Timestamp::Date(_) => None,
    }
}

/// A commit that passed the conventional-commit filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCommit {
    #[serde(flatten)]
    pub record: CommitRecord,
    pub commit_type: CommitType,
    pub date: NaiveDate,
}

/// Commits of one type under one date.
#[derive(Debug, Serialize)]
pub struct TypeSection<'a> {
    pub commit_type: CommitType,
    pub commits: &'a [ClassifiedCommit],
}

/// All commits for one calendar date, bucketed by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSection {
    pub date: NaiveDate,
    // Indexed by `CommitType::order()`.
    buckets: [Vec<ClassifiedCommit>; CommitType::PRIORITY.len()],
}

impl DateSection {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            buckets: Default::default(),
        }
    }

    /// Non-empty type sections in canonical priority order.
    pub fn sections(&self) -> Vec<TypeSection<'_>> {
        CommitType::PRIORITY
            .iter()
            .filter_map(|ty| {
                let commits = self.commits(*ty);
                (!commits.is_empty()).then_some(TypeSection {
                    commit_type: *ty,
                    commits,
                })
            })
            .collect()
    }

    /// Commits of one type, in arrival order.
    pub fn commits(&self, commit_type: CommitType) -> &[ClassifiedCommit] {
        &self.buckets[commit_type.order()]
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for DateSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            date: NaiveDate,
            sections: Vec<TypeSection<'a>>,
        }

        Repr {
            date: self.date,
            sections: self.sections(),
        }
        .serialize(serializer)
    }
}

/// Date sections in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangelogDocument {
    dates: Vec<DateSection>,
    #[serde(skip)]
    index: HashMap<NaiveDate, usize>,
}

impl ChangelogDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit under its (date, type) bucket, creating buckets as needed.
    pub fn insert(&mut self, commit: ClassifiedCommit) {
        let pos = *self.index.entry(commit.date).or_insert_with(|| {
            self.dates.push(DateSection::new(commit.date));
            self.dates.len() - 1
        });
        self.dates[pos].buckets[commit.commit_type.order()].push(commit);
    }

    pub fn dates(&self) -> &[DateSection] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Total number of entries across all dates.
    pub fn entry_count(&self) -> usize {
        self.dates.iter().map(DateSection::len).sum()
    }

    /// Entry counts per type in canonical order, omitting absent types.
    pub fn count_by_type(&self) -> Vec<(CommitType, usize)> {
        CommitType::PRIORITY
            .iter()
            .map(|ty| {
                let count = self.dates.iter().map(|d| d.commits(*ty).len()).sum::<usize>();
                (*ty, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Group records by local calendar date, then by type.
pub fn group(records: impl IntoIterator<Item = CommitRecord>) -> ChangelogDocument {
    group_in(records, &Local)
}

/// Group records by calendar date in `tz`, then by type.
///
/// Records without a recognized type prefix are dropped, as are records
/// whose timestamp has no calendar date. Input order is kept; nothing is
/// re-sorted.
pub fn group_in<Tz: TimeZone>(
    records: impl IntoIterator<Item = CommitRecord>,
    tz: &Tz,
) -> ChangelogDocument {
    let mut doc = ChangelogDocument::new();

    for record in records {
        let Some(commit_type) = classify(&record.subject) else {
            trace!("Skipping unconventional commit {}", record.short_id);
            continue;
        };

        let Some(date) = calendar_date(&record.timestamp, tz) else {
            if let Timestamp::Epoch(secs) = record.timestamp {
                debug!(
                    "Skipping commit {}: {}",
                    record.short_id,
                    RecordError::TimestampOutOfRange(secs)
                );
            }
            continue;
        };

        doc.insert(ClassifiedCommit {
            record,
            commit_type,
            date,
        });
    }

    doc
}
