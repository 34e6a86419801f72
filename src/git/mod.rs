//! Commit log sources and record parsing.

pub mod record;
pub mod source;

pub use record::{parse_line, parse_log, CommitRecord, Timestamp, DELIMITER};
pub use source::{GitCommand, LogFormat, LogSource, RepositoryLog};
